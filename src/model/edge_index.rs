//! Authoritative edge storage with a derived source→children adjacency.

use crate::error::{Result, TreeError};
use crate::model::edge::Edge;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

// =#========================================================================#=
// EDGE INDEX
// =#========================================================================#=
/// Ordered store of directed lineage edges.
///
/// The edge sequence is kept in insertion order, which is also the order in
/// which [children_of](EdgeIndex::children_of) reports the targets of a
/// source. The adjacency (`source → targets`) and its reverse
/// (`target → sources`) are derived from the sequence and rebuilt whenever
/// edges are removed.
///
/// The index itself does not enforce tree shape: a node may temporarily have
/// two parents here. [TreeBuilder](crate::model::TreeBuilder) is where the
/// single-parent and root invariants are checked.
///
/// # Example
/// ```
/// use cnvtree::model::{Edge, EdgeIndex};
///
/// let mut index = EdgeIndex::new();
/// index.add_edges([Edge::new("A", "B"), Edge::new("A", "C")]).unwrap();
/// assert_eq!(index.children_of("A"), ["B", "C"]);
/// assert!(index.children_of("B").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    /// Edges in insertion order
    edges: IndexSet<Edge, FxBuildHasher>,
    /// Derived: source id → target ids, in edge order
    children: FxHashMap<String, Vec<String>>,
    /// Derived: target id → source ids, in edge order
    parents: FxHashMap<String, Vec<String>>,
}

impl EdgeIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index holding `edges` in the given order.
    ///
    /// # Errors
    /// Errors of [add_edges](EdgeIndex::add_edges).
    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Result<Self> {
        let mut index = Self::new();
        index.add_edges(edges)?;
        Ok(index)
    }

    /// Appends `edges` in the given order.
    ///
    /// Either all edges are inserted or, on error, none of them.
    ///
    /// # Errors
    /// * [TreeError::AmbiguousEdge] if an edge has no unique DOM id (see
    ///   [Edge::has_unique_dom_id])
    /// * [TreeError::DuplicateEdge] if an edge is already stored or occurs
    ///   twice within `edges`
    pub fn add_edges<I: IntoIterator<Item = Edge>>(&mut self, edges: I) -> Result<()> {
        let batch: Vec<Edge> = edges.into_iter().collect();

        let mut seen: FxHashSet<&Edge> = FxHashSet::default();
        for edge in &batch {
            if !edge.has_unique_dom_id() {
                return Err(TreeError::AmbiguousEdge {
                    parent: edge.source.clone(),
                    child: edge.target.clone(),
                });
            }
            if self.edges.contains(edge) || !seen.insert(edge) {
                return Err(TreeError::DuplicateEdge {
                    edge: edge.dom_id(),
                });
            }
        }

        self.edges.reserve(batch.len());
        for edge in batch {
            self.link(&edge);
            self.edges.insert(edge);
        }

        Ok(())
    }

    /// Removes every listed edge that is present; unknown edges are ignored.
    ///
    /// # Returns
    /// The number of edges actually removed.
    pub fn remove_edges<'a, I: IntoIterator<Item = &'a Edge>>(&mut self, edges: I) -> usize {
        let to_remove: FxHashSet<&Edge> = edges.into_iter().collect();
        let before = self.edges.len();
        self.edges.retain(|edge| !to_remove.contains(edge));

        let removed = before - self.edges.len();
        if removed > 0 {
            self.rebuild_adjacency();
        }
        removed
    }

    /// Returns the targets of all edges leaving `node_id`, in insertion order.
    ///
    /// Empty for leaves and for ids that do not occur in the index.
    pub fn children_of(&self, node_id: &str) -> &[String] {
        self.children.get(node_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the sources of all edges entering `node_id`, in insertion order.
    pub fn parents_of(&self, node_id: &str) -> &[String] {
        self.parents.get(node_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the number of edges entering `node_id`.
    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.parents_of(node_id).len()
    }

    /// Returns the edges leaving `node_id`, in insertion order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl DoubleEndedIterator<Item = Edge> + 'a {
        self.children_of(node_id)
            .iter()
            .map(move |target| Edge::new(node_id, target.as_str()))
    }

    /// Returns whether `edge` is stored.
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Returns whether `node_id` is the source or target of some edge.
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.children.contains_key(node_id) || self.parents.contains_key(node_id)
    }

    /// Returns the number of stored edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether no edges are stored.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates the edges in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns every node id occurring in an edge, in order of first appearance.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: IndexSet<&str, FxBuildHasher> = IndexSet::default();
        for edge in &self.edges {
            ids.insert(edge.source());
            ids.insert(edge.target());
        }
        ids.into_iter().collect()
    }

    fn link(&mut self, edge: &Edge) {
        self.children
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
        self.parents
            .entry(edge.target.clone())
            .or_default()
            .push(edge.source.clone());
    }

    fn rebuild_adjacency(&mut self) {
        self.children.clear();
        self.parents.clear();
        let edges = std::mem::take(&mut self.edges);
        for edge in &edges {
            self.link(edge);
        }
        self.edges = edges;
    }
}

impl PartialEq for EdgeIndex {
    /// Two indices are equal when they hold the same edges in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.edges.iter().eq(other.edges.iter())
    }
}

impl Eq for EdgeIndex {}

impl<'a> IntoIterator for &'a EdgeIndex {
    type Item = &'a Edge;
    type IntoIter = indexmap::set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
