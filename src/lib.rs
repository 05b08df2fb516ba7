//! cnvtree is a library for the lineage tree behind single-cell copy-number
//! views.
//!
//! A view shows a rooted lineage tree of single cells next to a matrix with
//! one copy-number row per cell. This crate owns the model underneath such a
//! view; drawing, colours and event capture stay with the rendering layer.
//! Core functionality provided:
//! - Edge index: ordered parent→child edges with `children_of` lookups
//!   ([model::EdgeIndex]).
//! - Tree builder: materializes a rooted arena tree and rejects input that is
//!   not a single rooted tree ([model::TreeBuilder], [model::LineageTree]).
//! - Downstream closure: all cells and edges below an edge, parent before
//!   child ([engine::downstream_closure]).
//! - Selection: the cells and edges currently highlighted
//!   ([engine::SelectionState]).
//! - Trim: atomic removal of a subtree, returning the new cell order and an
//!   old→new ordinal map for repacking matrix rows ([engine::trim]).
//! - Linear order: depth-first pre-order of all cells ([engine::linear_order]).
//! - Interaction session: tool modes (brush selection, scissors) and the
//!   hover/click/brush events that drive the above ([session]).
//!
//! Limitations:
//! - Exactly one root; every other cell has exactly one parent
//! - Cells can only be removed, never re-attached
//!
//! # Usage patterns
//! 1. Load a widget configuration and drive an [InteractionSession].
//! 2. Use the model and engine functions directly on your own state.
//!
//! ## Example Session
//! ```
//! use cnvtree::{CnvTreeConfig, InteractionSession, Tool};
//! use cnvtree::model::Edge;
//!
//! let config = CnvTreeConfig::from_json_str(r#"{
//!     "tree_edges": [
//!         {"source_sc_id": "A", "target_sc_id": "B"},
//!         {"source_sc_id": "A", "target_sc_id": "C"},
//!         {"source_sc_id": "B", "target_sc_id": "D"}
//!     ],
//!     "root_sc_id": "A",
//!     "sc_ids_ordered": ["A", "B", "D", "C"]
//! }"#)?;
//!
//! let mut session = InteractionSession::from_config(&config)?;
//! session.toggle_tool(Tool::Trim);
//! session.hover_edge(&Edge::new("A", "B"))?;
//! let outcome = session.click_edge(&Edge::new("A", "B"))?.unwrap();
//!
//! assert_eq!(outcome.new_order, ["A", "C"]);
//! assert_eq!(session.order(), ["A", "C"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Example Engine
//! ```
//! use cnvtree::engine::{downstream_closure, linear_order};
//! use cnvtree::model::{Edge, EdgeIndex, TreeBuilder};
//!
//! let index = EdgeIndex::from_edges([Edge::new("A", "B"), Edge::new("B", "C")])?;
//! let tree = TreeBuilder::build(&index, "A")?;
//! assert_eq!(tree.num_leaves(), 1);
//! assert_eq!(linear_order(&index, "A")?, ["A", "B", "C"]);
//! assert_eq!(downstream_closure(&index, &Edge::new("B", "C"))?.nodes, ["C"]);
//! # Ok::<(), cnvtree::TreeError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod session;

pub use crate::config::CnvTreeConfig;
pub use crate::error::{ConfigError, MalformedTree, TreeError};
pub use crate::session::{HoverOutcome, InteractionSession, Tool, ToolMode};

use crate::model::{EdgeIndex, LineageTree, TreeBuilder};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Reads a configuration JSON file and opens an [InteractionSession] on it.
///
/// See [CnvTreeConfig::from_json_file] and [InteractionSession::from_config].
pub fn open_session<P: AsRef<Path>>(path: P) -> Result<InteractionSession, ConfigError> {
    let config = CnvTreeConfig::from_json_file(path)?;
    InteractionSession::from_config(&config)
}

/// Builds the edge index and tree described by a configuration record.
///
/// See [CnvTreeConfig::edge_index] and [TreeBuilder::build].
pub fn build_tree(config: &CnvTreeConfig) -> Result<(EdgeIndex, LineageTree), TreeError> {
    let index = config.edge_index()?;
    let tree = TreeBuilder::build(&index, &config.root_sc_id)?;
    Ok((index, tree))
}
