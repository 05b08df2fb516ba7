use cnvtree::model::{Edge, EdgeIndex, TreeBuilder};
use cnvtree::{MalformedTree, TreeError};
use rustc_hash::FxHashSet;

fn edges(pairs: &[(&str, &str)]) -> EdgeIndex {
    EdgeIndex::from_edges(pairs.iter().map(|&(s, t)| Edge::new(s, t))).unwrap()
}

fn set(ids: &[&str]) -> FxHashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_building_tree() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    // Counts
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);

    // Root
    let root = tree.root();
    assert!(root.is_root());
    assert_eq!(root.cell_id(), "A");
    assert_eq!(tree.root_index(), 0);
    assert_eq!(tree.children_ids("A"), ["B", "C"]);

    // Internal
    let b = tree.get("B").unwrap();
    assert!(b.is_internal());
    assert!(!b.is_leaf());
    assert_eq!(b.parent_index(), Some(tree.root_index()));
    assert_eq!(tree.children_ids("B"), ["D", "E"]);

    // Leaf
    let d = tree.get("D").unwrap();
    assert!(d.is_leaf());
    assert!(d.children().is_empty());
    assert_eq!(tree.parent_id("D"), Some("B"));
    assert_eq!(tree.parent_id("A"), None);
}

#[test]
fn test_arena_is_pre_order() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    assert_eq!(tree.cell_ids(), ["A", "B", "D", "E", "C"]);
    for (position, vertex) in tree.pre_order_iter().enumerate() {
        assert_eq!(vertex.index(), position);
    }
    assert_eq!(tree.leaf_ids(), ["D", "E", "C"]);
}

#[test]
fn test_post_order_visits_children_first() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    let ids: Vec<&str> = tree.post_order_iter().map(|v| v.cell_id()).collect();
    assert_eq!(ids, ["D", "E", "B", "C", "A"]);
}

#[test]
fn test_subtree_sizes() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    assert_eq!(tree.subtree_size("A"), 5);
    assert_eq!(tree.subtree_size("B"), 3);
    assert_eq!(tree.subtree_size("C"), 1);
    assert_eq!(tree.subtree_size("Z"), 0);
    assert_eq!(tree.subtree_sizes(), [5, 3, 1, 1, 1]);
}

#[test]
fn test_lone_root() {
    let tree = TreeBuilder::build(&EdgeIndex::new(), "solo").unwrap();
    assert_eq!(tree.num_vertices(), 1);
    assert!(tree.root().is_root());
    assert!(tree.root().is_leaf());
    assert_eq!(tree.to_ascii(), "solo\n");
}

#[test]
fn test_multiple_parents_is_malformed() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
    let err = TreeBuilder::build(&index, "A").unwrap_err();

    assert_eq!(
        err,
        TreeError::MalformedTree(MalformedTree::MultipleParents {
            node: "D".to_string(),
            parents: vec!["B".to_string(), "C".to_string()],
        })
    );
}

#[test]
fn test_root_with_parent_is_malformed() {
    let index = edges(&[("A", "B"), ("B", "C")]);
    let err = TreeBuilder::build(&index, "B").unwrap_err();

    assert!(matches!(
        err,
        TreeError::MalformedTree(MalformedTree::RootHasParent { .. })
    ));
}

#[test]
fn test_unknown_root_is_malformed() {
    let index = edges(&[("A", "B")]);
    let err = TreeBuilder::build(&index, "Q").unwrap_err();

    assert_eq!(
        err,
        TreeError::MalformedTree(MalformedTree::RootNotFound {
            root: "Q".to_string()
        })
    );
}

#[test]
fn test_cycle_below_root_is_rejected() {
    // The loop B -> C -> B gives B a second parent
    let index = edges(&[("A", "B"), ("B", "C"), ("C", "B")]);
    assert!(matches!(
        TreeBuilder::build(&index, "A"),
        Err(TreeError::MalformedTree(MalformedTree::MultipleParents { .. }))
    ));
}

#[test]
fn test_unreachable_cells_are_ignored() {
    let index = edges(&[("A", "B"), ("X", "Y")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    assert_eq!(tree.cell_ids(), ["A", "B"]);
    assert!(!tree.contains("X"));
}

#[test]
fn test_to_ascii() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let tree = TreeBuilder::build(&index, "A").unwrap();

    let expected = "\
A (5 cells)
  ├─ B (3 cells)
  │   ├─ D
  │   └─ E
  └─ C
";
    assert_eq!(tree.to_ascii(), expected);
}

// --- PRUNING ---
#[test]
fn test_prune_detaches_subtree() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();

    let report = tree.prune(&set(&["B", "D", "E"])).unwrap();

    assert_eq!(report.removed, ["B", "D", "E"]);
    assert!(report.orphaned.is_empty());
    assert_eq!(tree.cell_ids(), ["A", "C"]);
    assert_eq!(tree.children_ids("A"), ["C"]);
    assert_eq!(tree.index_of("C"), Some(1));
    assert_eq!(tree.get("C").unwrap().parent_index(), Some(0));
}

#[test]
fn test_prune_reports_orphans() {
    let index = edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();

    let report = tree.prune(&set(&["B"])).unwrap();

    assert_eq!(report.removed, ["B"]);
    assert_eq!(report.orphaned, ["D", "E"]);
    assert_eq!(tree.num_vertices(), 2);
}

#[test]
fn test_prune_turns_childless_internal_into_leaf() {
    let index = edges(&[("A", "B"), ("B", "C")]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();

    tree.prune(&set(&["C"])).unwrap();

    let b = tree.get("B").unwrap();
    assert!(b.is_leaf());
    assert!(!b.is_internal());
    assert_eq!(tree.num_leaves(), 1);
}

#[test]
fn test_prune_root_fails_and_keeps_tree() {
    let index = edges(&[("A", "B")]);
    let mut tree = TreeBuilder::build(&index, "A").unwrap();
    let before = tree.clone();

    let err = tree.prune(&set(&["A", "B"])).unwrap_err();

    assert_eq!(
        err,
        TreeError::RootRemoval {
            root: "A".to_string()
        }
    );
    assert_eq!(tree, before);
}
