//! Downstream closure of a lineage edge.
//!
//! The closure of an edge is its target cell plus everything below it: all
//! descendant cells and all edges among them, listed parent before child
//! (pre-order) with siblings in edge input order. Consumers apply visual
//! changes in closure order, so the last element is the deepest-last cell of
//! the final branch.

use crate::error::{Result, TreeError};
use crate::model::{Edge, EdgeIndex};
use rustc_hash::FxHashSet;
use serde::Serialize;

// =#========================================================================#=
// CLOSURE
// =#========================================================================#=
/// Cells and edges downstream of (and including) a start edge.
///
/// `nodes[i]` is always the target of `edges[i]`: each cell enters the
/// closure together with the edge leading into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Closure {
    /// Cell ids in pre-order, starting with the start edge's target
    pub nodes: Vec<String>,
    /// Edges in pre-order, starting with the start edge
    pub edges: Vec<Edge>,
}

impl Closure {
    /// Returns the number of cells in the closure.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the closure is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns whether `cell_id` is in the closure.
    pub fn contains_node(&self, cell_id: &str) -> bool {
        self.nodes.iter().any(|id| id == cell_id)
    }

    /// Returns the last cell visited, or `None` if empty.
    pub fn last_node(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Returns the edges as DOM ids, in closure order.
    pub fn edge_dom_ids(&self) -> Vec<String> {
        self.edges.iter().map(Edge::dom_id).collect()
    }
}

// =#========================================================================#=
// TRAVERSAL
// =#========================================================================#=
/// Computes the downstream closure of `start`.
///
/// Reads the edge index only; the caller decides where the closure goes
/// (usually [SelectionState::select_closure](crate::engine::SelectionState::select_closure)).
///
/// # Arguments
/// * `edge_index` - Current edges
/// * `start` - The edge the user interacts with
///
/// # Errors
/// * [TreeError::UnknownId] if `start` is not in `edge_index`
/// * [TreeError::Cycle] if a cell is reached twice
///
/// # Example
/// ```
/// use cnvtree::engine::downstream_closure;
/// use cnvtree::model::{Edge, EdgeIndex};
///
/// let index = EdgeIndex::from_edges([
///     Edge::new("A", "B"),
///     Edge::new("A", "C"),
///     Edge::new("B", "D"),
/// ]).unwrap();
///
/// let closure = downstream_closure(&index, &Edge::new("A", "B")).unwrap();
/// assert_eq!(closure.nodes, ["B", "D"]);
/// ```
pub fn downstream_closure(edge_index: &EdgeIndex, start: &Edge) -> Result<Closure> {
    if !edge_index.contains(start) {
        return Err(TreeError::UnknownId { id: start.dom_id() });
    }

    let mut closure = Closure::default();
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<Edge> = vec![start.clone()];

    while let Some(edge) = stack.pop() {
        if !visited.insert(edge.target.clone()) {
            return Err(TreeError::Cycle { node: edge.target });
        }

        // Last child pushed first, so first child is expanded next
        stack.extend(edge_index.outgoing(edge.target()).rev());
        closure.nodes.push(edge.target.clone());
        closure.edges.push(edge);
    }

    tracing::debug!(
        start = %start,
        cells = closure.nodes.len(),
        "computed downstream closure"
    );
    Ok(closure)
}
