//! Arena representation of a rooted lineage tree.
//!
//! Provides core data structures for representing lineage trees:
//! * [LineageTree] - Main tree structure using the arena pattern, vertices
//!   referenced by [VertexIndex] and looked up by cell id
//! * [PreOrderIter] and [PostOrderIter] - stack-based traversals
//! * [PruneReport] - outcome of removing subtrees in place

use crate::error::{Result, TreeError};
use crate::model::vertex::Vertex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::Write;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted lineage tree of single cells represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]; no vertex holds a reference to another. Each vertex also
/// carries its cell id, and the tree keeps a map from cell id to index.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Arena order is the pre-order of the tree (root at index 0), both after
///   construction by [TreeBuilder](crate::model::TreeBuilder) and after
///   [prune](LineageTree::prune).
/// - Children of each vertex are in edge input order.
///
/// Trees are obtained from [TreeBuilder](crate::model::TreeBuilder) and
/// shrunk in place with [prune](LineageTree::prune); vertices are never added
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Cell id → arena index
    index_of: FxHashMap<String, VertexIndex>,
}

/// Cells removed by [LineageTree::prune].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Requested cells that were present, in pre-order
    pub removed: Vec<String>,
    /// Cells removed because an ancestor was removed, but not requested themselves
    pub orphaned: Vec<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl LineageTree {
    /// Assembles a tree from an arena whose vertices carry their own indices.
    pub(crate) fn from_vertices(vertices: Vec<Vertex>, root_index: VertexIndex) -> Self {
        let index_of = vertices
            .iter()
            .map(|vertex| (vertex.cell_id().to_string(), vertex.index()))
            .collect();

        LineageTree {
            vertices,
            root_index,
            index_of,
        }
    }

    /// Returns a reference to the root vertex.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns the cell id of the root.
    pub fn root_id(&self) -> &str {
        self.root().cell_id()
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the arena index of the given cell, or `None` if not in this tree.
    pub fn index_of(&self, cell_id: &str) -> Option<VertexIndex> {
        self.index_of.get(cell_id).copied()
    }

    /// Returns the vertex of the given cell, or `None` if not in this tree.
    pub fn get(&self, cell_id: &str) -> Option<&Vertex> {
        self.index_of(cell_id).map(|index| &self[index])
    }

    /// Returns whether the given cell is part of this tree.
    pub fn contains(&self, cell_id: &str) -> bool {
        self.index_of.contains_key(cell_id)
    }

    /// Returns the cell ids of the children of `cell_id`, in edge input order.
    ///
    /// Empty for leaves and for cells not in this tree.
    pub fn children_ids(&self, cell_id: &str) -> Vec<&str> {
        self.get(cell_id)
            .map(|vertex| {
                vertex
                    .children()
                    .iter()
                    .map(|&child| self[child].cell_id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the cell id of the parent of `cell_id`, or `None` for the root
    /// and cells not in this tree.
    pub fn parent_id(&self, cell_id: &str) -> Option<&str> {
        let parent = self.get(cell_id)?.parent_index()?;
        Some(self[parent].cell_id())
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the cell ids of all leaves, in pre-order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(Vertex::cell_id)
            .collect()
    }

    /// Returns all cell ids in pre-order (parents before children, siblings
    /// in edge input order).
    pub fn cell_ids(&self) -> Vec<&str> {
        self.pre_order_iter().map(Vertex::cell_id).collect()
    }

    /// Returns the number of vertices in the subtree rooted at `cell_id`,
    /// including itself; `0` if the cell is not in this tree.
    pub fn subtree_size(&self, cell_id: &str) -> usize {
        self.index_of(cell_id)
            .map_or(0, |index| self.pre_order_from(index).count())
    }

    /// Returns, for every arena index, the size of the subtree rooted there.
    pub fn subtree_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![1; self.num_vertices()];
        for vertex in self.post_order_iter() {
            let size = sizes[vertex.index()];
            if let Some(parent) = vertex.parent_index() {
                sizes[parent] += size;
            }
        }
        sizes
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root_index)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use cnvtree::model::{Edge, EdgeIndex, TreeBuilder};
    ///
    /// let index = EdgeIndex::from_edges([
    ///     Edge::new("A", "B"),
    ///     Edge::new("A", "C"),
    ///     Edge::new("B", "D"),
    /// ]).unwrap();
    /// let tree = TreeBuilder::build(&index, "A").unwrap();
    ///
    /// let ids: Vec<_> = tree.pre_order_iter().map(|v| v.cell_id()).collect();
    /// assert_eq!(ids, ["A", "B", "D", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root_index)
    }

    /// Returns a pre-order iterator over the subtree rooted at `index`.
    pub fn pre_order_from(&self, index: VertexIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, index)
    }
}

// ============================================================================
// Pruning (pub)
// ============================================================================
impl LineageTree {
    /// Removes the given cells together with all their descendants, in place.
    ///
    /// Each removed vertex is detached from its parent's child list. Cells
    /// that lose their parent without being listed themselves are removed
    /// as orphans and reported in [PruneReport::orphaned]. Ids not in the
    /// tree are ignored. The arena is compacted afterwards, keeping the
    /// remaining vertices in pre-order.
    ///
    /// # Errors
    /// [TreeError::RootRemoval] if `cell_ids` contains the root; the tree is
    /// left untouched in that case.
    pub fn prune(&mut self, cell_ids: &FxHashSet<String>) -> Result<PruneReport> {
        if cell_ids.contains(self.root_id()) {
            return Err(TreeError::RootRemoval {
                root: self.root_id().to_string(),
            });
        }

        let mut removed = vec![false; self.num_vertices()];
        let mut report = PruneReport::default();
        for vertex in self.pre_order_iter() {
            let listed = cell_ids.contains(vertex.cell_id());
            let parent_removed = vertex.parent_index().is_some_and(|parent| removed[parent]);

            if listed {
                report.removed.push(vertex.cell_id().to_string());
            } else if parent_removed {
                report.orphaned.push(vertex.cell_id().to_string());
            }
            removed[vertex.index()] = listed || parent_removed;
        }

        if report.removed.is_empty() {
            return Ok(report);
        }

        // Old index -> new index, in pre-order so the arena stays pre-ordered
        let mut remap: Vec<Option<VertexIndex>> = vec![None; self.num_vertices()];
        let mut next = 0;
        let order: Vec<VertexIndex> = self.pre_order_iter().map(Vertex::index).collect();
        for old in order.iter().copied().filter(|&old| !removed[old]) {
            remap[old] = Some(next);
            next += 1;
        }

        let mut slots: Vec<Option<Vertex>> = std::mem::take(&mut self.vertices)
            .into_iter()
            .map(Some)
            .collect();
        let mut vertices = Vec::with_capacity(next);
        for old in order.into_iter().filter(|&old| !removed[old]) {
            if let Some(vertex) = slots[old].take() {
                vertices.push(vertex.reindexed(&remap));
            }
        }

        let root_index = remap[self.root_index].unwrap_or_default();
        *self = LineageTree::from_vertices(vertices, root_index);

        Ok(report)
    }
}

impl std::ops::Index<VertexIndex> for LineageTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl LineageTree {
    /// Renders the tree as indented ASCII art, one cell per line.
    ///
    /// # Example Output
    /// ```text
    /// A (5 cells)
    ///   ├─ B (3 cells)
    ///   │   ├─ D
    ///   │   └─ E
    ///   └─ C
    /// ```
    pub fn to_ascii(&self) -> String {
        let sizes = self.subtree_sizes();
        let mut out = String::new();

        // (index, prefix of this line, is last sibling)
        let mut stack: Vec<(VertexIndex, String, bool)> = vec![(self.root_index, String::new(), true)];
        while let Some((index, prefix, is_last)) = stack.pop() {
            let vertex = &self[index];
            let connector = if vertex.is_root() {
                ""
            } else if is_last {
                "└─ "
            } else {
                "├─ "
            };

            let _ = write!(out, "{prefix}{connector}{}", vertex.cell_id());
            if !vertex.is_leaf() {
                let _ = write!(out, " ({} cells)", sizes[index]);
            }
            out.push('\n');

            let child_prefix = if vertex.is_root() {
                "  ".to_string()
            } else {
                format!("{}{}   ", prefix, if is_last { " " } else { "│" })
            };
            let children = vertex.children();
            for (position, &child) in children.iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), position + 1 == children.len()));
            }
        }

        out
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a LineageTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a LineageTree, start: VertexIndex) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Last child pushed first, so first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants, siblings in edge
/// input order.
pub struct PreOrderIter<'a> {
    tree: &'a LineageTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a LineageTree, start: VertexIndex) -> Self {
        PreOrderIter {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}
