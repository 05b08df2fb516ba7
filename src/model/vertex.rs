//! Vertex module for lineage tree representation.

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (single cell) in a lineage tree.
///
/// A vertex can be either:
/// - **Root**: Has no parent, any number of children (none for a lone root)
/// - **Internal**: Has a parent and at least one child
/// - **Leaf**: Has a parent and no children
///
/// # Invariants
/// - `index` is the position of the vertex in the tree arena
/// - `cell_id` is unique within one tree
/// - `children` of `Root` and `Internal` are in edge input order;
///   an `Internal` vertex always has at least one child
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Single-cell id
        cell_id: String,
        /// Indices of the child vertices, in edge input order
        children: Vec<VertexIndex>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Single-cell id
        cell_id: String,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in edge input order
        children: Vec<VertexIndex>,
    },
    /// Leaf vertex (has parent, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Single-cell id
        cell_id: String,
        /// Index of the parent vertex
        parent: VertexIndex,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `cell_id` - The single-cell id
    /// * `children` - Child indices in edge input order
    pub fn new_root(index: VertexIndex, cell_id: String, children: Vec<VertexIndex>) -> Self {
        Vertex::Root {
            index,
            cell_id,
            children,
        }
    }

    /// Creates a non-root vertex, `Leaf` if `children` is empty, else `Internal`.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `cell_id` - The single-cell id
    /// * `parent` - Index of the parent vertex
    /// * `children` - Child indices in edge input order
    pub fn new_descendant(
        index: VertexIndex,
        cell_id: String,
        parent: VertexIndex,
        children: Vec<VertexIndex>,
    ) -> Self {
        if children.is_empty() {
            Vertex::Leaf {
                index,
                cell_id,
                parent,
            }
        } else {
            Vertex::Internal {
                index,
                cell_id,
                parent,
                children,
            }
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the single-cell id of this vertex.
    pub fn cell_id(&self) -> &str {
        match self {
            Vertex::Root { cell_id, .. } => cell_id,
            Vertex::Internal { cell_id, .. } => cell_id,
            Vertex::Leaf { cell_id, .. } => cell_id,
        }
    }

    /// Returns the child indices; empty for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } => children,
            Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns `true` if this vertex has no children.
    ///
    /// A root without children counts as a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => Some(*parent),
            Vertex::Root { .. } => None,
        }
    }

    /// Rewrites all arena indices of this vertex through `remap` and drops
    /// children that map to `None`.
    ///
    /// An `Internal` vertex that loses all its children becomes a `Leaf`.
    ///
    /// # Panics
    /// Panics if the vertex itself or its parent maps to `None`.
    pub(crate) fn reindexed(self, remap: &[Option<VertexIndex>]) -> Self {
        let keep = |children: Vec<VertexIndex>| -> Vec<VertexIndex> {
            children.into_iter().filter_map(|child| remap[child]).collect()
        };
        let new_index = |index: VertexIndex| remap[index].expect("reindexing removed vertex");

        match self {
            Vertex::Root {
                index,
                cell_id,
                children,
            } => Vertex::new_root(new_index(index), cell_id, keep(children)),
            Vertex::Internal {
                index,
                cell_id,
                parent,
                children,
            } => Vertex::new_descendant(new_index(index), cell_id, new_index(parent), keep(children)),
            Vertex::Leaf {
                index,
                cell_id,
                parent,
            } => Vertex::new_descendant(new_index(index), cell_id, new_index(parent), Vec::new()),
        }
    }
}
