//! Materializes a [LineageTree] from an [EdgeIndex].
//!
//! The builder walks the edge index from a designated root with an explicit
//! stack, assigning arena indices in pre-order and children in the order in
//! which [EdgeIndex::children_of] reports them.
//!
//! # Checked invariants
//! Before walking, the builder verifies that the edges can form a single
//! rooted tree:
//! - every cell is the target of at most one edge,
//! - the root is the target of no edge,
//! - the root occurs in the index unless the index is empty (a lone root).
//!
//! Cells that are not reachable from the root are skipped with a warning.
//! A revisited cell while walking is reported as [TreeError::Cycle].

use crate::error::{MalformedTree, Result, TreeError};
use crate::model::edge_index::EdgeIndex;
use crate::model::tree::{LineageTree, VertexIndex};
use crate::model::vertex::Vertex;
use rustc_hash::FxHashSet;

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================#=
/// Builds [LineageTree] instances from an [EdgeIndex].
///
/// Building is pure: the edge index is only read, and a fresh tree is
/// returned. After the edge index changes, either build again or apply the
/// same change to the tree (as [trim](crate::engine::trim::trim) does with
/// [LineageTree::prune]).
pub struct TreeBuilder;

/// Vertex under construction: cell id, parent, children.
struct PendingVertex {
    cell_id: String,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
}

impl TreeBuilder {
    /// Builds the tree rooted at `root_id`.
    ///
    /// # Arguments
    /// * `edge_index` - Edges to materialize
    /// * `root_id` - Cell id of the root
    ///
    /// # Errors
    /// * [TreeError::MalformedTree] if some cell has two parents, the root has
    ///   a parent, or the root does not occur in a non-empty index
    /// * [TreeError::Cycle] if a cell is reached twice from the root
    pub fn build(edge_index: &EdgeIndex, root_id: &str) -> Result<LineageTree> {
        Self::check_shape(edge_index, root_id)?;

        let mut pending: Vec<PendingVertex> = Vec::with_capacity(edge_index.len() + 1);
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<(&str, Option<VertexIndex>)> = vec![(root_id, None)];

        while let Some((cell_id, parent)) = stack.pop() {
            if !visited.insert(cell_id) {
                return Err(TreeError::Cycle {
                    node: cell_id.to_string(),
                });
            }

            let index = pending.len();
            pending.push(PendingVertex {
                cell_id: cell_id.to_string(),
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                pending[parent].children.push(index);
            }

            // Last child pushed first, so first child gets the next index
            for child in edge_index.children_of(cell_id).iter().rev() {
                stack.push((child.as_str(), Some(index)));
            }
        }

        let unreachable = edge_index
            .node_ids()
            .into_iter()
            .filter(|id| !visited.contains(id))
            .count();
        if unreachable > 0 {
            tracing::warn!(
                root = root_id,
                unreachable,
                "ignoring cells not reachable from root"
            );
        }

        let vertices = pending
            .into_iter()
            .enumerate()
            .map(|(index, vertex)| match vertex.parent {
                None => Vertex::new_root(index, vertex.cell_id, vertex.children),
                Some(parent) => {
                    Vertex::new_descendant(index, vertex.cell_id, parent, vertex.children)
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(root = root_id, vertices = vertices.len(), "built lineage tree");
        Ok(LineageTree::from_vertices(vertices, 0))
    }

    /// Verifies single-parent and root invariants over the whole index.
    fn check_shape(edge_index: &EdgeIndex, root_id: &str) -> Result<()> {
        for node in edge_index.node_ids() {
            let parents = edge_index.parents_of(node);
            if parents.len() > 1 {
                return Err(MalformedTree::MultipleParents {
                    node: node.to_string(),
                    parents: parents.to_vec(),
                }
                .into());
            }
        }

        if let Some(parent) = edge_index.parents_of(root_id).first() {
            return Err(MalformedTree::RootHasParent {
                root: root_id.to_string(),
                parent: parent.clone(),
            }
            .into());
        }

        if !edge_index.is_empty() && !edge_index.contains_node(root_id) {
            return Err(MalformedTree::RootNotFound {
                root: root_id.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
