//! Row geometry of the copy-number matrix.
//!
//! Each cell occupies one row of the matrix, in linear order. [RowLayout]
//! turns ordinals and [OrdinalShift]s into vertical coordinates, and finds
//! the rows covered by a brushed extent.

use crate::engine::trim::{OrdinalShift, TrimOutcome};
use indexmap::IndexMap;

/// Error returned for a row height that is not positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Row height must be positive and finite, got {0}")]
pub struct InvalidRowHeight(pub f64);

/// Fixed-height rows stacked from `y = 0` downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    row_height: f64,
}

impl RowLayout {
    /// Creates a layout with the given row height.
    ///
    /// # Errors
    /// [InvalidRowHeight] if `row_height` is not positive and finite.
    pub fn new(row_height: f64) -> Result<Self, InvalidRowHeight> {
        if row_height > 0.0 && row_height.is_finite() {
            Ok(RowLayout { row_height })
        } else {
            Err(InvalidRowHeight(row_height))
        }
    }

    /// Creates a layout fitting `num_rows` rows into `height`.
    ///
    /// The row height stays fixed afterwards: trimming rows shrinks the
    /// matrix rather than stretching the remaining rows.
    ///
    /// # Errors
    /// [InvalidRowHeight] if `height` is not positive and finite.
    pub fn fit(height: f64, num_rows: usize) -> Result<Self, InvalidRowHeight> {
        Self::new(height / num_rows.max(1) as f64)
    }

    /// Returns the height of one row.
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Returns the top coordinate of the row at `ordinal`.
    pub fn row_top(&self, ordinal: usize) -> f64 {
        ordinal as f64 * self.row_height
    }

    /// Returns the height of a matrix with `num_rows` rows.
    pub fn matrix_height(&self, num_rows: usize) -> f64 {
        self.row_top(num_rows)
    }

    /// Returns the vertical translation that moves a row from its old to its
    /// new position: `-(old − new) × row_height`, negative meaning upwards.
    pub fn translation(&self, shift: &OrdinalShift) -> f64 {
        -(shift.rows_moved() as f64) * self.row_height
    }

    /// Returns the translation of every surviving row after a trim, in new
    /// row order.
    pub fn translations(&self, outcome: &TrimOutcome) -> IndexMap<String, f64> {
        outcome
            .offset_map
            .iter()
            .map(|(cell_id, shift)| (cell_id.clone(), self.translation(shift)))
            .collect()
    }

    /// Returns the cells of `order` whose rows intersect the vertical extent
    /// `[start, end]`, in row order.
    ///
    /// A row touching the extent only at its border counts as intersecting.
    /// The bounds may be given in either order.
    pub fn rows_in_extent<'a>(&self, order: &'a [String], start: f64, end: f64) -> Vec<&'a str> {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };

        order
            .iter()
            .enumerate()
            .filter(|&(ordinal, _)| {
                let top = self.row_top(ordinal);
                low <= top + self.row_height && top <= high
            })
            .map(|(_, cell_id)| cell_id.as_str())
            .collect()
    }
}
