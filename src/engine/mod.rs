//! Algorithms over the lineage model.
//!
//! - [traversal]: downstream closure of an edge
//! - [selection]: the current selection of cells and edges
//! - [ordering]: linear (pre-order) cell order and its cross-validation
//! - [trim]: atomic subtree removal and the resulting offset map
//! - [matrix]: row geometry for repacking the copy-number matrix
//!
//! All functions are synchronous and operate on explicitly passed state; no
//! global view object exists. They read an [EdgeIndex](crate::model::EdgeIndex)
//! directly, so results always reflect the latest trim.

pub mod matrix;
pub mod ordering;
pub mod selection;
pub mod traversal;
pub mod trim;

pub use matrix::{InvalidRowHeight, RowLayout};
pub use ordering::{OrderCheck, compare_orders, linear_order, ordinals};
pub use selection::SelectionState;
pub use traversal::{Closure, downstream_closure};
pub use trim::{OrdinalShift, TrimOutcome, trim};
