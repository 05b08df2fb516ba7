//! Canonical linear order of cells.
//!
//! The linear order is the depth-first pre-order of the tree from the root,
//! siblings in edge input order: the order in which a reader going
//! top-to-bottom through the drawn tree meets the cells. The copy-number
//! matrix assigns rows in this order.

use crate::error::{Result, TreeError};
use crate::model::EdgeIndex;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// Returns all cells reachable from `root_id` in pre-order.
///
/// # Errors
/// [TreeError::Cycle] if a cell is reached twice.
///
/// # Example
/// ```
/// use cnvtree::engine::linear_order;
/// use cnvtree::model::{Edge, EdgeIndex};
///
/// let index = EdgeIndex::from_edges([
///     Edge::new("A", "B"),
///     Edge::new("A", "C"),
///     Edge::new("B", "D"),
///     Edge::new("B", "E"),
/// ]).unwrap();
/// assert_eq!(linear_order(&index, "A").unwrap(), ["A", "B", "D", "E", "C"]);
/// ```
pub fn linear_order(edge_index: &EdgeIndex, root_id: &str) -> Result<Vec<String>> {
    let mut order: IndexSet<String, FxBuildHasher> = IndexSet::default();
    let mut stack: Vec<&str> = vec![root_id];

    while let Some(cell_id) = stack.pop() {
        if !order.insert(cell_id.to_string()) {
            return Err(TreeError::Cycle {
                node: cell_id.to_string(),
            });
        }
        stack.extend(edge_index.children_of(cell_id).iter().rev().map(String::as_str));
    }

    tracing::debug!(root = root_id, cells = order.len(), "computed linear order");
    Ok(order.into_iter().collect())
}

/// Returns the position of every cell in `order`.
pub fn ordinals(order: &[String]) -> FxHashMap<&str, usize> {
    order
        .iter()
        .enumerate()
        .map(|(ordinal, cell_id)| (cell_id.as_str(), ordinal))
        .collect()
}

// =#========================================================================#=
// ORDER CHECK
// =#========================================================================#=
/// Comparison between a configured cell order and a derived one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCheck {
    /// Cells in the derived order but absent from the expected one
    pub missing: Vec<String>,
    /// Cells in the expected order but absent from the derived one
    pub extra: Vec<String>,
    /// Cells listed more than once in the expected order, once each
    pub duplicates: Vec<String>,
    /// Whether both orders list the same cells in the same sequence
    pub same_sequence: bool,
}

impl OrderCheck {
    /// Returns whether both orders cover the same cells (in any sequence),
    /// each exactly once.
    pub fn same_cells(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.duplicates.is_empty()
    }
}

/// Cross-validates an `expected` order (e.g. from configuration) against a
/// `derived` one (e.g. from [linear_order]).
pub fn compare_orders(expected: &[String], derived: &[String]) -> OrderCheck {
    let expected_set: FxHashSet<&str> = expected.iter().map(String::as_str).collect();
    let derived_set: FxHashSet<&str> = derived.iter().map(String::as_str).collect();

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates: IndexSet<String, FxBuildHasher> = IndexSet::default();
    for id in expected {
        if !seen.insert(id.as_str()) {
            duplicates.insert(id.clone());
        }
    }

    OrderCheck {
        missing: derived
            .iter()
            .filter(|id| !expected_set.contains(id.as_str()))
            .cloned()
            .collect(),
        extra: expected
            .iter()
            .filter(|id| !derived_set.contains(id.as_str()))
            .cloned()
            .collect(),
        duplicates: duplicates.into_iter().collect(),
        same_sequence: expected == derived,
    }
}
