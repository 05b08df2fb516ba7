use cnvtree::TreeError;
use cnvtree::engine::{
    InvalidRowHeight, OrdinalShift, RowLayout, downstream_closure, linear_order, trim,
};
use cnvtree::model::{Edge, EdgeIndex, LineageTree, TreeBuilder};
use rustc_hash::FxHashSet;

fn edges(pairs: &[(&str, &str)]) -> EdgeIndex {
    EdgeIndex::from_edges(pairs.iter().map(|&(s, t)| Edge::new(s, t))).unwrap()
}

fn scenario() -> (EdgeIndex, LineageTree) {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();
    (index, tree)
}

fn node_set(ids: &[&str]) -> FxHashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn edge_set(pairs: &[(&str, &str)]) -> FxHashSet<Edge> {
    pairs.iter().map(|&(s, t)| Edge::new(s, t)).collect()
}

#[test]
fn test_trim_subtree_scenario() {
    let (mut index, mut tree) = scenario();

    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&["B", "D", "E"]),
        &edge_set(&[("A", "B"), ("B", "D"), ("B", "E")]),
    )
    .unwrap();

    assert_eq!(outcome.new_order, ["A", "C"]);
    assert_eq!(
        outcome.offset_map["C"],
        OrdinalShift {
            old_ordinal: 4,
            new_ordinal: 1
        }
    );
    assert_eq!(
        outcome.offset_map["A"],
        OrdinalShift {
            old_ordinal: 0,
            new_ordinal: 0
        }
    );
    assert_eq!(outcome.offset_map.len(), 2);
    assert_eq!(outcome.removed_nodes, ["B", "D", "E"]);
    assert_eq!(
        outcome.removed_edges,
        [Edge::new("A", "B"), Edge::new("B", "D"), Edge::new("B", "E")]
    );
    assert!(outcome.orphaned.is_empty());

    // Edge index and tree agree afterwards
    assert_eq!(index.len(), 1);
    assert_eq!(index.children_of("A"), ["C"]);
    assert_eq!(tree.cell_ids(), ["A", "C"]);
    assert_eq!(linear_order(&index, "A").unwrap(), tree.cell_ids());
}

#[test]
fn test_trim_leaf_collapses_its_slot() {
    let (mut index, mut tree) = scenario();
    let old_order = linear_order(&index, "A").unwrap();

    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&["D"]),
        &edge_set(&[("B", "D")]),
    )
    .unwrap();

    assert_eq!(outcome.new_order.len(), old_order.len() - 1);
    let removed_slot = old_order.iter().position(|id| id == "D").unwrap();
    for (new_ordinal, cell_id) in outcome.new_order.iter().enumerate() {
        let shift = outcome.offset_map[cell_id.as_str()];
        assert_eq!(shift.new_ordinal, new_ordinal);
        let expected = if shift.old_ordinal > removed_slot {
            shift.old_ordinal - 1
        } else {
            shift.old_ordinal
        };
        assert_eq!(shift.new_ordinal, expected);
    }
    assert_eq!(outcome.offset_map["E"].rows_moved(), 1);
    assert!(!outcome.offset_map["B"].is_moved());
}

#[test]
fn test_trim_from_closure() {
    let mut index = edges(&[
        ("A", "B"),
        ("A", "C"),
        ("B", "D"),
        ("C", "E"),
        ("C", "F"),
        ("E", "G"),
    ]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();

    let closure = downstream_closure(&index, &Edge::new("C", "E")).unwrap();
    let nodes: FxHashSet<String> = closure.nodes.iter().cloned().collect();
    let edges: FxHashSet<Edge> = closure.edges.iter().cloned().collect();
    let outcome = trim(&mut index, &mut tree, &nodes, &edges).unwrap();

    assert_eq!(outcome.new_order, ["A", "B", "D", "C", "F"]);
    assert_eq!(outcome.offset_map["F"].old_ordinal, 6);
    assert_eq!(outcome.offset_map["F"].new_ordinal, 4);
    assert_eq!(outcome.num_removed_cells(), 2);
}

#[test]
fn test_trim_with_unknown_id_is_atomic() {
    let (mut index, mut tree) = scenario();
    let index_before = index.clone();
    let tree_before = tree.clone();

    let err = trim(
        &mut index,
        &mut tree,
        &node_set(&["D", "Z"]),
        &edge_set(&[("B", "D")]),
    )
    .unwrap_err();

    assert_eq!(
        err,
        TreeError::UnknownId {
            id: "Z".to_string()
        }
    );
    assert_eq!(index, index_before);
    assert_eq!(tree, tree_before);
    assert_eq!(
        index.iter().collect::<Vec<_>>(),
        index_before.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_trim_with_unknown_edge_is_atomic() {
    let (mut index, mut tree) = scenario();
    let index_before = index.clone();
    let tree_before = tree.clone();

    let err = trim(
        &mut index,
        &mut tree,
        &node_set(&["D"]),
        &edge_set(&[("B", "D"), ("C", "D")]),
    )
    .unwrap_err();

    assert_eq!(
        err,
        TreeError::UnknownId {
            id: "link_source_C_target_D".to_string()
        }
    );
    assert_eq!(index, index_before);
    assert_eq!(tree, tree_before);
}

#[test]
fn test_trim_root_is_rejected() {
    let (mut index, mut tree) = scenario();
    let index_before = index.clone();

    let err = trim(&mut index, &mut tree, &node_set(&["A"]), &edge_set(&[])).unwrap_err();

    assert!(matches!(err, TreeError::RootRemoval { .. }));
    assert_eq!(index, index_before);
}

#[test]
fn test_trim_edge_only_removes_orphans() {
    let (mut index, mut tree) = scenario();

    // Cutting A -> B without listing B detaches the whole B subtree
    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&[]),
        &edge_set(&[("A", "B")]),
    )
    .unwrap();

    assert_eq!(outcome.new_order, ["A", "C"]);
    assert!(outcome.removed_nodes.is_empty());
    assert_eq!(outcome.orphaned, ["B", "D", "E"]);
    assert_eq!(outcome.removed_edges.len(), 3);
    assert!(index.children_of("B").is_empty());
    assert_eq!(tree.cell_ids(), ["A", "C"]);
}

#[test]
fn test_trim_node_only_drops_dangling_edges() {
    let (mut index, mut tree) = scenario();

    let outcome = trim(&mut index, &mut tree, &node_set(&["E"]), &edge_set(&[])).unwrap();

    assert_eq!(outcome.new_order, ["A", "B", "D", "C"]);
    assert_eq!(outcome.removed_edges, [Edge::new("B", "E")]);
    assert!(!index.contains(&Edge::new("B", "E")));
}

#[test]
fn test_successive_trims() {
    let (mut index, mut tree) = scenario();

    trim(
        &mut index,
        &mut tree,
        &node_set(&["D"]),
        &edge_set(&[("B", "D")]),
    )
    .unwrap();
    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&["B", "E"]),
        &edge_set(&[("A", "B"), ("B", "E")]),
    )
    .unwrap();

    // Ordinals refer to the order right before the second trim
    assert_eq!(outcome.offset_map["C"].old_ordinal, 3);
    assert_eq!(outcome.offset_map["C"].new_ordinal, 1);
}

// --- ROW LAYOUT ---
#[test]
fn test_row_translations() {
    let (mut index, mut tree) = scenario();
    let layout = RowLayout::fit(50.0, 5).unwrap();
    assert_eq!(layout.row_height(), 10.0);

    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&["B", "D", "E"]),
        &edge_set(&[("A", "B"), ("B", "D"), ("B", "E")]),
    )
    .unwrap();

    let translations = layout.translations(&outcome);
    assert_eq!(translations["A"], 0.0);
    assert_eq!(translations["C"], -30.0);
    assert_eq!(layout.matrix_height(outcome.new_order.len()), 20.0);
}

#[test]
fn test_rows_in_extent() {
    let order: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
    let layout = RowLayout::new(10.0).unwrap();

    assert_eq!(layout.rows_in_extent(&order, 12.0, 25.0), ["B", "C"]);
    assert_eq!(layout.rows_in_extent(&order, 25.0, 12.0), ["B", "C"]);
    // Touching the top border of C
    assert_eq!(layout.rows_in_extent(&order, 5.0, 20.0), ["A", "B", "C"]);
    assert!(layout.rows_in_extent(&order, 100.0, 120.0).is_empty());
}

#[test]
fn test_row_layout_rejects_invalid_height() {
    assert_eq!(RowLayout::new(0.0), Err(InvalidRowHeight(0.0)));
    assert_eq!(RowLayout::new(-5.0), Err(InvalidRowHeight(-5.0)));
    assert!(RowLayout::new(f64::INFINITY).is_err());
    assert!(RowLayout::new(f64::NAN).is_err());
    assert!(RowLayout::fit(0.0, 7).is_err());
    assert_eq!(RowLayout::fit(70.0, 0).unwrap().row_height(), 70.0);
}

#[test]
fn test_trim_keeps_unreachable_edges() {
    let mut index = edges(&[("A", "B"), ("A", "C"), ("X", "Y")]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();

    let outcome = trim(
        &mut index,
        &mut tree,
        &node_set(&["B"]),
        &edge_set(&[("A", "B")]),
    )
    .unwrap();

    assert_eq!(outcome.removed_edges, [Edge::new("A", "B")]);
    assert!(index.contains(&Edge::new("X", "Y")));
}
