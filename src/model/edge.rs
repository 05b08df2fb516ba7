//! Directed lineage edge between two single cells.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of the DOM id rendering of an edge.
const DOM_ID_PREFIX: &str = "link_source_";
/// Separator between source and target in the DOM id rendering.
const DOM_ID_TARGET: &str = "_target_";

// =#========================================================================#=
// EDGE
// =#========================================================================#=
/// A directed parent→child relationship between two cells.
///
/// Edges are identified by their `(source, target)` pair, so two edges are
/// equal exactly when they connect the same cells in the same direction.
/// This record is the key used by [EdgeIndex](crate::model::EdgeIndex),
/// selections and trims.
///
/// For the rendering layer, an edge has a deterministic string id
/// `link_source_<source>_target_<target>` (see [Edge::dom_id]), which can be
/// turned back into an edge with [Edge::from_dom_id] or [str::parse]. The id
/// is unique only for edges with [Edge::has_unique_dom_id], which
/// [EdgeIndex](crate::model::EdgeIndex) enforces on insertion.
///
/// # Example
/// ```
/// use cnvtree::model::Edge;
///
/// let edge = Edge::new("A", "B");
/// assert_eq!(edge.dom_id(), "link_source_A_target_B");
/// assert_eq!("link_source_A_target_B".parse::<Edge>().unwrap(), edge);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Parent cell id
    pub source: String,
    /// Child cell id
    pub target: String,
}

impl Edge {
    /// Creates a new edge from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns the parent cell id.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the child cell id.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns whether the DOM id of this edge identifies it unambiguously.
    ///
    /// That is the case when both cell ids are non-empty and `_target_`
    /// occurs exactly once in `<source>_target_<target>`, namely between the
    /// two ids. Ids such as `A_target` or `B_target_C` break this.
    pub fn has_unique_dom_id(&self) -> bool {
        let rest = format!("{}{}{}", self.source, DOM_ID_TARGET, self.target);
        !self.source.is_empty()
            && !self.target.is_empty()
            && single_marker_at(&rest) == Some(self.source.len())
    }

    /// Returns the DOM id of this edge, `link_source_<source>_target_<target>`.
    pub fn dom_id(&self) -> String {
        let mut id = String::with_capacity(
            DOM_ID_PREFIX.len() + self.source.len() + DOM_ID_TARGET.len() + self.target.len(),
        );
        id.push_str(DOM_ID_PREFIX);
        id.push_str(&self.source);
        id.push_str(DOM_ID_TARGET);
        id.push_str(&self.target);
        id
    }

    /// Recovers an edge from its DOM id.
    ///
    /// # Returns
    /// `None` if `dom_id` does not have the form
    /// `link_source_<source>_target_<target>` with exactly one `_target_`
    /// marker and non-empty parts.
    pub fn from_dom_id(dom_id: &str) -> Option<Self> {
        let rest = dom_id.strip_prefix(DOM_ID_PREFIX)?;
        let split = single_marker_at(rest)?;
        let source = &rest[..split];
        let target = &rest[split + DOM_ID_TARGET.len()..];
        if source.is_empty() || target.is_empty() {
            return None;
        }
        Some(Edge::new(source, target))
    }
}

/// Position of the `_target_` marker in `rest` if it occurs exactly once,
/// overlapping occurrences included.
fn single_marker_at(rest: &str) -> Option<usize> {
    let first = rest.find(DOM_ID_TARGET)?;
    (rest.rfind(DOM_ID_TARGET) == Some(first)).then_some(first)
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}{}", DOM_ID_PREFIX, self.source, DOM_ID_TARGET, self.target)
    }
}

/// Error returned when parsing a string that is not an edge DOM id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not an edge id: {0}")]
pub struct InvalidEdgeId(pub String);

impl FromStr for Edge {
    type Err = InvalidEdgeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edge::from_dom_id(s).ok_or_else(|| InvalidEdgeId(s.to_string()))
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for Edge {
    fn from((source, target): (S, T)) -> Self {
        Edge::new(source, target)
    }
}
