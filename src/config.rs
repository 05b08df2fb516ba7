//! Configuration record handed over by the widget front end.
//!
//! The record is JSON with the field names of the widget data:
//!
//! ```json
//! {
//!   "tree_edges": [{"source_sc_id": "A", "target_sc_id": "B"}],
//!   "root_sc_id": "A",
//!   "sc_ids_ordered": ["A", "B"],
//!   "numeric_node_labels": false,
//!   "sc_groups": [{"single_cell_id": "B", "group": "1"}],
//!   "matrix_height": 500.0
//! }
//! ```
//!
//! Only `tree_edges`, `root_sc_id` and `sc_ids_ordered` are required.

use crate::engine::{OrderCheck, compare_orders, linear_order};
use crate::error::{ConfigError, Result};
use crate::model::{Edge, EdgeIndex, GroupAnnotations, TreeBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default height of the matrix rows area.
const DEFAULT_MATRIX_HEIGHT: f64 = 500.0;

/// One directed lineage edge as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source_sc_id: String,
    pub target_sc_id: String,
}

impl From<&EdgeRecord> for Edge {
    fn from(record: &EdgeRecord) -> Self {
        Edge::new(record.source_sc_id.as_str(), record.target_sc_id.as_str())
    }
}

/// Group annotation of one cell as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub single_cell_id: String,
    pub group: String,
}

// =#========================================================================#=
// CONFIG
// =#========================================================================#=
/// Input of a lineage view: tree edges, root, matrix cell order, display flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnvTreeConfig {
    /// Directed edges in input order (sibling order follows this order)
    pub tree_edges: Vec<EdgeRecord>,

    /// Cell id of the root
    pub root_sc_id: String,

    /// All cell ids in initial matrix order
    pub sc_ids_ordered: Vec<String>,

    /// Whether numeric node labels are shown as integers; rendering only
    #[serde(default)]
    pub numeric_node_labels: bool,

    /// Optional group annotation per cell
    #[serde(default)]
    pub sc_groups: Vec<GroupRecord>,

    /// Height of the matrix rows area, shared by all rows
    #[serde(default = "default_matrix_height")]
    pub matrix_height: f64,
}

fn default_matrix_height() -> f64 {
    DEFAULT_MATRIX_HEIGHT
}

impl CnvTreeConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the configured edges as an [EdgeIndex].
    ///
    /// # Errors
    /// [TreeError::DuplicateEdge](crate::error::TreeError::DuplicateEdge) on repeated edges.
    pub fn edge_index(&self) -> Result<EdgeIndex> {
        EdgeIndex::from_edges(self.tree_edges.iter().map(Edge::from))
    }

    /// Returns the configured group annotations.
    pub fn group_annotations(&self) -> GroupAnnotations {
        GroupAnnotations::from_pairs(
            self.sc_groups
                .iter()
                .map(|record| (record.single_cell_id.as_str(), record.group.as_str())),
        )
    }

    /// Returns whether any cell carries a group annotation.
    pub fn groups_specified(&self) -> bool {
        !self.sc_groups.is_empty()
    }

    /// Checks the matrix height and that the edges form a rooted tree, then
    /// cross-validates `sc_ids_ordered` against the tree order.
    ///
    /// Repeated or differing cells are an error; the same cells in a
    /// different sequence are accepted and logged.
    ///
    /// # Returns
    /// The comparison, for callers that want to report sequence differences.
    pub fn validate(&self) -> std::result::Result<OrderCheck, ConfigError> {
        if !(self.matrix_height > 0.0 && self.matrix_height.is_finite()) {
            return Err(ConfigError::InvalidMatrixHeight {
                height: self.matrix_height,
            });
        }

        let index = self.edge_index()?;
        TreeBuilder::build(&index, &self.root_sc_id)?;
        let derived = linear_order(&index, &self.root_sc_id)?;
        let check = compare_orders(&self.sc_ids_ordered, &derived);

        if !check.duplicates.is_empty() {
            return Err(ConfigError::DuplicateCells {
                cells: check.duplicates,
            });
        }
        if !check.same_cells() {
            return Err(ConfigError::OrderMismatch {
                missing: check.missing,
                extra: check.extra,
            });
        }
        if !check.same_sequence {
            tracing::debug!("configured cell order differs from tree order");
        }

        Ok(check)
    }
}
