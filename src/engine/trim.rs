//! Destructive removal of a subtree.
//!
//! A trim removes a coherent subtree (typically the
//! [downstream closure](crate::engine::downstream_closure) of an edge) from
//! both the [EdgeIndex] and the [LineageTree], then reports how every
//! surviving cell moved in the linear order. That report, the offset map, is
//! the only thing the matrix repacking step needs: row `old_ordinal` slides
//! up to row `new_ordinal`.
//!
//! # Atomicity
//! All ids are validated first and the removal is applied to copies, which
//! replace the originals only once every step succeeded. On error, edge
//! index and tree are unchanged.
//!
//! # Orphans
//! Cells that lose their only incoming edge, or whose ancestor is removed,
//! without being listed themselves, are removed as well and reported in
//! [TrimOutcome::orphaned], together with any edge touching them.

use crate::engine::ordering::{linear_order, ordinals};
use crate::error::{Result, TreeError};
use crate::model::{Edge, EdgeIndex, LineageTree};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

// =#========================================================================#=
// TRIM OUTCOME
// =#========================================================================#=
/// Position of a surviving cell before and after a trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrdinalShift {
    /// Position in the linear order before the trim
    pub old_ordinal: usize,
    /// Position in the linear order after the trim
    pub new_ordinal: usize,
}

impl OrdinalShift {
    /// Returns how many rows the cell moves up.
    ///
    /// Removing cells from a pre-order never moves a survivor down, so this
    /// is `old_ordinal - new_ordinal`.
    pub fn rows_moved(&self) -> usize {
        self.old_ordinal.saturating_sub(self.new_ordinal)
    }

    /// Returns whether the cell changes position.
    pub fn is_moved(&self) -> bool {
        self.old_ordinal != self.new_ordinal
    }
}

/// Result of a committed trim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrimOutcome {
    /// Linear order of the surviving cells
    pub new_order: Vec<String>,
    /// Ordinal shift of every surviving cell, in `new_order` order
    pub offset_map: IndexMap<String, OrdinalShift>,
    /// Listed cells that were removed, in pre-trim order
    pub removed_nodes: Vec<String>,
    /// Removed edges, in edge input order
    pub removed_edges: Vec<Edge>,
    /// Cells removed without being listed, in pre-trim order
    pub orphaned: Vec<String>,
}

impl TrimOutcome {
    /// Returns the number of cells removed, listed or orphaned.
    pub fn num_removed_cells(&self) -> usize {
        self.removed_nodes.len() + self.orphaned.len()
    }
}

// =#========================================================================#=
// TRIM
// =#========================================================================#=
/// Removes the listed cells and edges from `edge_index` and `tree`.
///
/// # Arguments
/// * `edge_index` - Edges, updated in place on success
/// * `tree` - Tree built from `edge_index`, updated in place on success
/// * `node_ids` - Cells to remove
/// * `edges` - Edges to remove
///
/// # Errors
/// * [TreeError::UnknownId] if a cell is not in `tree` or an edge is not in
///   `edge_index`
/// * [TreeError::RootRemoval] if `node_ids` contains the root
/// * [TreeError::Cycle] if `edge_index` is cyclic
///
/// In all cases `edge_index` and `tree` are left unmodified.
///
/// # Example
/// ```
/// use cnvtree::engine::{downstream_closure, trim};
/// use cnvtree::model::{Edge, EdgeIndex, TreeBuilder};
///
/// let mut index = EdgeIndex::from_edges([
///     Edge::new("A", "B"),
///     Edge::new("A", "C"),
///     Edge::new("B", "D"),
///     Edge::new("B", "E"),
/// ]).unwrap();
/// let mut tree = TreeBuilder::build(&index, "A").unwrap();
///
/// let closure = downstream_closure(&index, &Edge::new("A", "B")).unwrap();
/// let nodes = closure.nodes.iter().cloned().collect();
/// let edges = closure.edges.iter().cloned().collect();
/// let outcome = trim(&mut index, &mut tree, &nodes, &edges).unwrap();
///
/// assert_eq!(outcome.new_order, ["A", "C"]);
/// assert_eq!(outcome.offset_map["C"].old_ordinal, 4);
/// assert_eq!(outcome.offset_map["C"].new_ordinal, 1);
/// ```
pub fn trim(
    edge_index: &mut EdgeIndex,
    tree: &mut LineageTree,
    node_ids: &FxHashSet<String>,
    edges: &FxHashSet<Edge>,
) -> Result<TrimOutcome> {
    validate(edge_index, tree, node_ids, edges)?;

    let root_id = tree.root_id().to_string();
    let old_order = linear_order(edge_index, &root_id)?;

    // Edges first: anything no longer reachable from the root goes as well
    let mut next_index = edge_index.clone();
    next_index.remove_edges(edges);
    let reachable: FxHashSet<String> = linear_order(&next_index, &root_id)?.into_iter().collect();

    let mut prune_set = node_ids.clone();
    prune_set.extend(
        tree.cell_ids()
            .into_iter()
            .filter(|id| !reachable.contains(*id))
            .map(str::to_string),
    );

    let mut next_tree = tree.clone();
    let report = next_tree.prune(&prune_set)?;

    // Drop edges left dangling at pruned cells
    let pruned: FxHashSet<&str> = report
        .removed
        .iter()
        .chain(&report.orphaned)
        .map(String::as_str)
        .collect();
    let dangling: Vec<Edge> = next_index
        .iter()
        .filter(|edge| pruned.contains(edge.source()) || pruned.contains(edge.target()))
        .cloned()
        .collect();
    next_index.remove_edges(&dangling);

    let new_order = linear_order(&next_index, &root_id)?;
    let old_ordinals = ordinals(&old_order);
    let offset_map: IndexMap<String, OrdinalShift> = new_order
        .iter()
        .enumerate()
        .filter_map(|(new_ordinal, cell_id)| {
            old_ordinals.get(cell_id.as_str()).map(|&old_ordinal| {
                (
                    cell_id.clone(),
                    OrdinalShift {
                        old_ordinal,
                        new_ordinal,
                    },
                )
            })
        })
        .collect();

    let (removed_nodes, orphaned): (Vec<String>, Vec<String>) = old_order
        .into_iter()
        .filter(|id| !next_tree.contains(id))
        .partition(|id| node_ids.contains(id));
    let removed_edges: Vec<Edge> = edge_index
        .iter()
        .filter(|edge| !next_index.contains(edge))
        .cloned()
        .collect();

    if !orphaned.is_empty() {
        tracing::warn!(
            orphaned = orphaned.len(),
            "removed cells detached by trim but not listed"
        );
    }
    tracing::info!(
        cells = removed_nodes.len() + orphaned.len(),
        edges = removed_edges.len(),
        remaining = new_order.len(),
        "trimmed subtree"
    );

    *edge_index = next_index;
    *tree = next_tree;

    Ok(TrimOutcome {
        new_order,
        offset_map,
        removed_nodes,
        removed_edges,
        orphaned,
    })
}

/// Checks that every listed id exists and the root is not listed.
fn validate(
    edge_index: &EdgeIndex,
    tree: &LineageTree,
    node_ids: &FxHashSet<String>,
    edges: &FxHashSet<Edge>,
) -> Result<()> {
    if node_ids.contains(tree.root_id()) {
        return Err(TreeError::RootRemoval {
            root: tree.root_id().to_string(),
        });
    }

    // Sorted, so the reported id does not depend on hashing
    let mut unknown: Vec<String> = node_ids
        .iter()
        .filter(|id| !tree.contains(id))
        .cloned()
        .chain(
            edges
                .iter()
                .filter(|edge| !edge_index.contains(edge))
                .map(Edge::dom_id),
        )
        .collect();
    unknown.sort();

    match unknown.into_iter().next() {
        Some(id) => Err(TreeError::UnknownId { id }),
        None => Ok(()),
    }
}
