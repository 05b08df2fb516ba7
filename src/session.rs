//! Interaction state of one lineage view.
//!
//! [InteractionSession] owns everything an interactive view mutates: the
//! edge index, the tree, the selection, group annotations and the current
//! linear order. Rendering code forwards discrete events (hover, leave,
//! click, tool toggles, brush extents) and applies the returned outcomes.
//!
//! # Tool modes
//! | Mode          | `toggle_tool(Select)` | `toggle_tool(Trim)` |
//! |---------------|-----------------------|---------------------|
//! | `Idle`        | `SelectArmed`         | `TrimArmed`         |
//! | `SelectArmed` | `Idle`                | `TrimArmed`         |
//! | `TrimArmed`   | `SelectArmed`         | `Idle`              |
//!
//! Every mode change clears the selection. Hovering an edge highlights its
//! downstream closure in `Idle`, marks it as cut candidate in `TrimArmed` and
//! is ignored in `SelectArmed`, where the brush owns the selection. Clicking
//! an edge trims only in `TrimArmed`.

use crate::config::CnvTreeConfig;
use crate::engine::{
    Closure, RowLayout, SelectionState, TrimOutcome, downstream_closure, linear_order, trim,
};
use crate::error::{ConfigError, Result};
use crate::model::{Edge, EdgeIndex, GroupAnnotations, LineageTree, TreeBuilder};
use serde::Serialize;

/// Interaction tool that can be armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tool {
    /// Brush selection over matrix rows
    Select,
    /// Scissors: cut the subtree below a clicked edge
    Trim,
}

/// Which tool, if any, is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ToolMode {
    #[default]
    Idle,
    SelectArmed,
    TrimArmed,
}

impl ToolMode {
    fn armed(tool: Tool) -> Self {
        match tool {
            Tool::Select => ToolMode::SelectArmed,
            Tool::Trim => ToolMode::TrimArmed,
        }
    }
}

/// What a hovered edge should look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HoverOutcome {
    /// Nothing changes
    Ignored,
    /// Highlight the closure
    Highlighted(Closure),
    /// Highlight the closure and mark `edge` as the place of the cut
    CutCandidate { closure: Closure, edge: Edge },
}

// =#========================================================================#=
// INTERACTION SESSION
// =#========================================================================#=
/// Single owner of the mutable state behind one lineage view.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    edge_index: EdgeIndex,
    tree: LineageTree,
    selection: SelectionState,
    groups: GroupAnnotations,
    order: Vec<String>,
    layout: RowLayout,
    mode: ToolMode,
}

impl InteractionSession {
    /// Creates a session for the tree of `edge_index` rooted at `root_id`.
    ///
    /// # Arguments
    /// * `edge_index` - Lineage edges
    /// * `root_id` - Cell id of the root
    /// * `groups` - Group annotations (may be empty)
    /// * `layout` - Matrix row geometry
    ///
    /// # Errors
    /// Errors of [TreeBuilder::build] and [linear_order].
    pub fn new(
        edge_index: EdgeIndex,
        root_id: &str,
        groups: GroupAnnotations,
        layout: RowLayout,
    ) -> Result<Self> {
        let tree = TreeBuilder::build(&edge_index, root_id)?;
        let order = linear_order(&edge_index, root_id)?;

        Ok(InteractionSession {
            edge_index,
            tree,
            selection: SelectionState::new(),
            groups,
            order,
            layout,
            mode: ToolMode::Idle,
        })
    }

    /// Creates a session from a validated configuration record.
    ///
    /// Rows are sized so that all cells of the tree fill
    /// [matrix_height](CnvTreeConfig::matrix_height).
    ///
    /// # Errors
    /// Errors of [CnvTreeConfig::validate].
    pub fn from_config(config: &CnvTreeConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let edge_index = config.edge_index()?;
        let num_rows = linear_order(&edge_index, &config.root_sc_id)?.len();
        let layout = RowLayout::fit(config.matrix_height, num_rows)?;
        Ok(Self::new(
            edge_index,
            &config.root_sc_id,
            config.group_annotations(),
            layout,
        )?)
    }

    /// Returns the current edges.
    pub fn edge_index(&self) -> &EdgeIndex {
        &self.edge_index
    }

    /// Returns the current tree.
    pub fn tree(&self) -> &LineageTree {
        &self.tree
    }

    /// Returns the highlighted cells and edges.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Returns the group annotations of the remaining cells.
    pub fn groups(&self) -> &GroupAnnotations {
        &self.groups
    }

    /// Returns the current linear order of cells (matrix row order).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns the matrix row geometry.
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Returns the armed tool, if any.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Returns the height of the matrix with the current rows.
    pub fn matrix_height(&self) -> f64 {
        self.layout.matrix_height(self.order.len())
    }
}

// ============================================================================
// Events (pub)
// ============================================================================
impl InteractionSession {
    /// Arms `tool`, or disarms it if it is already armed.
    ///
    /// Any mode change first clears the selection, so switching from one
    /// tool to the other never carries state across.
    ///
    /// # Returns
    /// The new mode.
    pub fn toggle_tool(&mut self, tool: Tool) -> ToolMode {
        let next = if self.mode == ToolMode::armed(tool) {
            ToolMode::Idle
        } else {
            ToolMode::armed(tool)
        };

        self.selection.clear();
        tracing::info!(from = ?self.mode, to = ?next, "tool mode changed");
        self.mode = next;
        next
    }

    /// Handles the pointer entering `edge`.
    ///
    /// # Errors
    /// [TreeError::UnknownId](crate::error::TreeError::UnknownId) if `edge` is
    /// not (or no longer) in the tree; the selection is unchanged then.
    pub fn hover_edge(&mut self, edge: &Edge) -> Result<HoverOutcome> {
        match self.mode {
            ToolMode::SelectArmed => Ok(HoverOutcome::Ignored),
            ToolMode::Idle => {
                let closure = downstream_closure(&self.edge_index, edge)?;
                self.selection.select_closure(closure.clone());
                Ok(HoverOutcome::Highlighted(closure))
            }
            ToolMode::TrimArmed => {
                let closure = downstream_closure(&self.edge_index, edge)?;
                self.selection.select_closure(closure.clone());
                Ok(HoverOutcome::CutCandidate {
                    closure,
                    edge: edge.clone(),
                })
            }
        }
    }

    /// Handles the pointer leaving an edge.
    ///
    /// Clears the selection unless the brush tool owns it.
    pub fn hover_leave(&mut self) {
        if self.mode != ToolMode::SelectArmed {
            self.selection.clear();
        }
    }

    /// Handles the pointer entering a cell; highlights that cell alone.
    ///
    /// # Returns
    /// Whether the cell was selected (only in `Idle` and for known cells).
    pub fn hover_node(&mut self, cell_id: &str) -> bool {
        if self.mode != ToolMode::Idle || !self.tree.contains(cell_id) {
            return false;
        }
        self.selection.select_nodes([cell_id.to_string()]);
        true
    }

    /// Handles the pointer entering a group annotation; highlights all cells
    /// of `group`.
    ///
    /// # Returns
    /// Whether any cell was selected (only in `Idle`).
    pub fn hover_group(&mut self, group: &str) -> bool {
        if self.mode != ToolMode::Idle {
            return false;
        }
        let cells = self.groups.cells_in(group).to_vec();
        let selected = !cells.is_empty();
        self.selection.select_nodes(cells);
        selected
    }

    /// Handles a click on `edge`.
    ///
    /// With the trim tool armed, removes the subtree below `edge` and clears
    /// the selection. The selection from the preceding hover is used when it
    /// is the closure of `edge`; otherwise the closure is recomputed.
    ///
    /// # Returns
    /// The trim outcome, or `None` if the trim tool is not armed.
    ///
    /// # Errors
    /// Errors of [downstream_closure] and [trim]; state is unchanged then.
    pub fn click_edge(&mut self, edge: &Edge) -> Result<Option<TrimOutcome>> {
        if self.mode != ToolMode::TrimArmed {
            return Ok(None);
        }

        if self.selection.edges().next() != Some(edge) {
            let closure = downstream_closure(&self.edge_index, edge)?;
            self.selection.select_closure(closure);
        }

        let outcome = trim(
            &mut self.edge_index,
            &mut self.tree,
            &self.selection.node_set(),
            &self.selection.edge_set(),
        )?;

        self.groups.remove_cells(
            outcome
                .removed_nodes
                .iter()
                .chain(&outcome.orphaned)
                .map(String::as_str),
        );
        self.order = outcome.new_order.clone();
        self.selection.clear();

        Ok(Some(outcome))
    }

    /// Handles a brushed vertical extent over the matrix rows.
    ///
    /// With the select tool armed, selects the cells whose rows intersect
    /// `[start, end]`; `None` (an empty brush) clears the selection.
    ///
    /// # Returns
    /// The selected cells in row order; empty if the select tool is not armed.
    pub fn brush(&mut self, extent: Option<(f64, f64)>) -> Vec<String> {
        if self.mode != ToolMode::SelectArmed {
            return Vec::new();
        }

        let cells: Vec<String> = match extent {
            Some((start, end)) => self
                .layout
                .rows_in_extent(&self.order, start, end)
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };
        self.selection.select_nodes(cells.clone());
        cells
    }
}
