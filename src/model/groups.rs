//! Group annotations of single cells.
//!
//! - `GroupAnnotations`: group → cells lookup, and the reverse.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

// =#========================================================================#=
// GROUP ANNOTATIONS
// =#========================================================================#=
/// Assignment of cells to named groups (e.g. clones or samples).
///
/// Groups keep the order in which they first appear, and each group lists its
/// cells in the order they were annotated. A cell belongs to at most one
/// group; annotating it again moves it.
///
/// # Example
/// ```
/// use cnvtree::model::GroupAnnotations;
///
/// let groups = GroupAnnotations::from_pairs([("c1", "g1"), ("c2", "g2"), ("c3", "g1")]);
/// assert_eq!(groups.cells_in("g1"), ["c1", "c3"]);
/// assert_eq!(groups.group_of("c2"), Some("g2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAnnotations {
    /// Group → cells, in order of first appearance
    groups: IndexMap<String, Vec<String>, FxBuildHasher>,
    /// Cell → group
    group_of: FxHashMap<String, String>,
}

impl GroupAnnotations {
    /// Creates an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds annotations from `(cell, group)` pairs.
    pub fn from_pairs<C, G, I>(pairs: I) -> Self
    where
        C: Into<String>,
        G: Into<String>,
        I: IntoIterator<Item = (C, G)>,
    {
        let mut annotations = Self::new();
        for (cell, group) in pairs {
            annotations.annotate(cell, group);
        }
        annotations
    }

    /// Assigns `cell` to `group`, removing it from its previous group.
    pub fn annotate(&mut self, cell: impl Into<String>, group: impl Into<String>) {
        let cell = cell.into();
        let group = group.into();

        if let Some(previous) = self.group_of.insert(cell.clone(), group.clone()) {
            if let Some(cells) = self.groups.get_mut(&previous) {
                cells.retain(|c| c != &cell);
            }
        }
        self.groups.entry(group).or_default().push(cell);
    }

    /// Returns the cells of `group`; empty for unknown groups.
    pub fn cells_in(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the group of `cell`, or `None` if it is not annotated.
    pub fn group_of(&self, cell: &str) -> Option<&str> {
        self.group_of.get(cell).map(String::as_str)
    }

    /// Returns the group names in order of first appearance.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether no cell is annotated.
    pub fn is_empty(&self) -> bool {
        self.group_of.is_empty()
    }

    /// Drops the annotations of the given cells.
    ///
    /// Groups left without cells are kept, so group order stays stable for
    /// legends.
    pub fn remove_cells<'a, I: IntoIterator<Item = &'a str>>(&mut self, cells: I) {
        for cell in cells {
            if let Some(group) = self.group_of.remove(cell) {
                if let Some(members) = self.groups.get_mut(&group) {
                    members.retain(|c| c != cell);
                }
            }
        }
    }
}

impl fmt::Display for GroupAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "GroupAnnotations ({} groups):", self.groups.len())?;
        for (group, cells) in &self.groups {
            writeln!(f, "  [{}] {}", group, cells.join(", "))?;
        }
        Ok(())
    }
}
