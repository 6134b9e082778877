//! Tests for the four flattening orders

use checktree::domain::{NodeId, NodeSpec, TreeArena, Traversal, Value};
use rstest::rstest;

fn ids(tree: &TreeArena, nodes: &[NodeId]) -> Vec<Value> {
    nodes
        .iter()
        .map(|&n| tree.record(n).unwrap().id().clone())
        .collect()
}

fn values(raw: &[&str]) -> Vec<Value> {
    raw.iter().map(|&s| Value::from(s)).collect()
}

// a            e
// ├── b        └── f
// │   └── d
// └── c
// g  (uneven depths: f is enqueued after d's parent b)
fn forest() -> TreeArena {
    TreeArena::from_forest(vec![
        NodeSpec::new("a").children([
            NodeSpec::new("b").child(NodeSpec::new("d")),
            NodeSpec::new("c"),
        ]),
        NodeSpec::new("e").child(NodeSpec::new("f")),
        NodeSpec::new("g"),
    ])
    .unwrap()
}

#[rstest]
#[case(Traversal::LevelOrder, &["a", "e", "g", "b", "c", "f", "d"])]
#[case(Traversal::StackOrder, &["g", "e", "f", "a", "c", "b", "d"])]
#[case(Traversal::PostOrder, &["d", "b", "c", "a", "f", "e", "g"])]
#[case(Traversal::Preorder, &["a", "b", "d", "c", "e", "f", "g"])]
fn given_multi_root_forest_when_flattening_then_order_matches(
    #[case] traversal: Traversal,
    #[case] expected: &[&str],
) {
    let tree = forest();
    assert_eq!(ids(&tree, &tree.flatten(traversal)), values(expected));
}

#[test]
fn given_single_root_when_flattening_then_same_as_one_element_forest() {
    let single = TreeArena::from_forest(NodeSpec::new(1).child(NodeSpec::new(2))).unwrap();
    let forest =
        TreeArena::from_forest(vec![NodeSpec::new(1).child(NodeSpec::new(2))]).unwrap();

    for traversal in [
        Traversal::LevelOrder,
        Traversal::StackOrder,
        Traversal::PostOrder,
        Traversal::Preorder,
    ] {
        assert_eq!(
            ids(&single, &single.flatten(traversal)),
            ids(&forest, &forest.flatten(traversal))
        );
    }
}

#[test]
fn given_any_forest_when_flattening_then_every_walk_visits_every_node_once() {
    let tree = forest();
    let mut expected = ids(&tree, &tree.flatten(Traversal::Preorder));
    expected.sort_by_key(|v| v.to_string());

    for traversal in [Traversal::LevelOrder, Traversal::StackOrder, Traversal::PostOrder] {
        let mut got = ids(&tree, &tree.flatten(traversal));
        got.sort_by_key(|v| v.to_string());
        assert_eq!(got, expected, "{:?}", traversal);
    }
}

#[test]
fn given_preorder_and_postorder_when_flattening_then_ancestors_precede_or_follow() {
    let tree = forest();
    let pre = tree.flatten(Traversal::Preorder);
    let post = tree.flatten(Traversal::PostOrder);
    let position = |seq: &[NodeId], id: &str| {
        let target = Value::from(id);
        seq.iter()
            .position(|&n| tree.record(n).unwrap().id() == &target)
            .unwrap()
    };

    for (ancestor, descendant) in [("a", "b"), ("a", "d"), ("b", "d"), ("e", "f")] {
        assert!(position(&pre, ancestor) < position(&pre, descendant));
        assert!(position(&post, ancestor) > position(&post, descendant));
    }
}

#[test]
fn given_subtree_node_when_flatten_from_then_only_that_subtree() {
    let tree = forest();
    let b = tree.find_by_key_value("id", &Value::from("b")).unwrap();
    let nodes = tree.flatten_from(b, Traversal::LevelOrder).unwrap();
    assert_eq!(ids(&tree, &nodes), values(&["b", "d"]));
}

#[test]
fn given_empty_tree_when_flattening_then_empty_sequence() {
    assert!(TreeArena::new().flatten(Traversal::LevelOrder).is_empty());
}
