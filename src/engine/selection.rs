//! Currently selected cells and edges.

use crate::engine::traversal::Closure;
use crate::model::Edge;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};

/// Selected cell ids and edges of the ongoing interaction.
///
/// Selections are never edited incrementally: every interaction derives a
/// fresh set from the current tree and replaces the previous one through
/// [select](SelectionState::select) or
/// [select_closure](SelectionState::select_closure). Both sets keep insertion
/// order, so a selected closure is read back in closure order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    nodes: IndexSet<String, FxBuildHasher>,
    edges: IndexSet<Edge, FxBuildHasher>,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with the given cells and edges.
    pub fn select<N, E>(&mut self, nodes: N, edges: E)
    where
        N: IntoIterator<Item = String>,
        E: IntoIterator<Item = Edge>,
    {
        self.nodes = nodes.into_iter().collect();
        self.edges = edges.into_iter().collect();
    }

    /// Replaces the selection with the given cells and no edges.
    pub fn select_nodes<N: IntoIterator<Item = String>>(&mut self, nodes: N) {
        self.nodes = nodes.into_iter().collect();
        self.edges.clear();
    }

    /// Replaces the selection with a computed closure.
    pub fn select_closure(&mut self, closure: Closure) {
        self.select(closure.nodes, closure.edges);
    }

    /// Empties both sets.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Returns whether neither cells nor edges are selected.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Returns the selected cell ids in selection order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Returns the selected edges in selection order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns whether `cell_id` is selected.
    pub fn contains_node(&self, cell_id: &str) -> bool {
        self.nodes.contains(cell_id)
    }

    /// Returns whether `edge` is selected.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Returns the selected cells as an owned set, as consumed by
    /// [trim](crate::engine::trim::trim).
    pub fn node_set(&self) -> FxHashSet<String> {
        self.nodes.iter().cloned().collect()
    }

    /// Returns the selected edges as an owned set.
    pub fn edge_set(&self) -> FxHashSet<Edge> {
        self.edges.iter().cloned().collect()
    }
}
