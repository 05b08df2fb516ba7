//! Error types for tree construction, interaction and configuration.
//!
//! This module provides [TreeError] for integrity and lookup failures of the
//! lineage model, and [ConfigError] for loading and validating a widget
//! configuration record. All errors are synchronous and final: none of them
//! describes a transient condition worth retrying.

use crate::engine::InvalidRowHeight;
use std::path::PathBuf;

/// Result alias used throughout the model and engine modules.
pub type Result<T> = std::result::Result<T, TreeError>;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors raised by the edge index, the tree builder and the engines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Input edges do not describe a single rooted tree.
    #[error("Malformed tree: {0}")]
    MalformedTree(#[from] MalformedTree),

    /// An edge with the same source and target is already present.
    #[error("Duplicate edge {edge}")]
    DuplicateEdge { edge: String },

    /// Cell ids of an edge are empty or make its DOM id ambiguous.
    #[error("Edge {parent:?} -> {child:?} has no unique DOM id")]
    AmbiguousEdge { parent: String, child: String },

    /// A node id or edge id is absent from the current state.
    #[error("Unknown id {id}")]
    UnknownId { id: String },

    /// The root cannot be trimmed away.
    #[error("Cannot remove root {root}")]
    RootRemoval { root: String },

    /// A node was reached twice while walking the edges.
    #[error("Cycle detected at node {node}")]
    Cycle { node: String },
}

/// Reason a set of edges was rejected as a rooted tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTree {
    #[error("node {node} has more than one parent ({})", .parents.join(", "))]
    MultipleParents { node: String, parents: Vec<String> },

    #[error("root {root} has incoming edge from {parent}")]
    RootHasParent { root: String, parent: String },

    #[error("root {root} does not occur in any edge")]
    RootNotFound { root: String },
}

// =#========================================================================#=
// CONFIG ERROR
// =#========================================================================#=
/// Errors raised while loading or validating a [CnvTreeConfig](crate::config::CnvTreeConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Layout(#[from] InvalidRowHeight),

    /// `matrix_height` is zero, negative or not finite.
    #[error("Matrix height must be positive and finite, got {height}")]
    InvalidMatrixHeight { height: f64 },

    /// Configured cell order lists some cells more than once.
    #[error("Configured cell order repeats cells [{}]", .cells.join(", "))]
    DuplicateCells { cells: Vec<String> },

    /// Configured cell order and tree do not cover the same cells.
    #[error(
        "Configured cell order does not match tree (missing from order: [{}], not in tree: [{}])",
        .missing.join(", "),
        .extra.join(", ")
    )]
    OrderMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },
}
