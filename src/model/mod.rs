//! Data model for rooted lineage trees of single cells.
//!
//! # Tree representation
//! Lineage edges are stored in an [EdgeIndex], the authoritative ordered
//! list of parent→child [Edge]s with a derived adjacency. A [TreeBuilder]
//! materializes a [LineageTree] from it, which uses the arena pattern to
//! store [Vertex] nodes referenced by [VertexIndex]. Each vertex is a `Root`,
//! `Internal`, or `Leaf` and carries its cell id.
//!
//! | Type | Role |
//! |------|------|
//! | [EdgeIndex] | Edge order, `children_of` lookups, edge removal |
//! | [LineageTree] | Materialized tree, traversal, in-place pruning |
//! | [GroupAnnotations] | Cell → group lookups for annotation tracks |
//!
//! Sibling order everywhere is the order in which the edges were added.

pub mod edge;
pub mod edge_index;
pub mod groups;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use edge::Edge;
pub use edge::InvalidEdgeId;
pub use edge_index::EdgeIndex;
pub use groups::GroupAnnotations;
pub use tree::LineageTree;
pub use tree::PruneReport;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::Vertex;
