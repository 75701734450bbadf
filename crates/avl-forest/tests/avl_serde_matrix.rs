use avl_forest::{AvlTree, DuplicatePolicy, TraversalOrder, TreeOptions};
use serde_json::json;

#[test]
fn tree_serializes_as_sorted_array() {
    let tree: AvlTree<i32> = [5, 3, 8, 1].into_iter().collect();
    assert_eq!(serde_json::to_value(&tree).unwrap(), json!([1, 3, 5, 8]));
    assert_eq!(serde_json::to_string(&AvlTree::<i32>::new()).unwrap(), "[]");
}

#[test]
fn tree_deserializes_and_balances() {
    let tree: AvlTree<String> = serde_json::from_str(r#"["c", "b", "a", "b"]"#).unwrap();
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root().map(|n| n.key().as_str()), Some("b"));

    let back: AvlTree<String> =
        serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();
    assert_eq!(back.to_vec(), tree.to_vec());
}

#[test]
fn tree_rejects_non_sequence() {
    assert!(serde_json::from_str::<AvlTree<i32>>(r#"{"a": 1}"#).is_err());
    assert!(serde_json::from_str::<AvlTree<i32>>(r#"[1, "x"]"#).is_err());
}

#[test]
fn options_config_matrix() {
    let options: TreeOptions = serde_json::from_str(r#"{"duplicates": "replace"}"#).unwrap();
    assert_eq!(options.duplicates, DuplicatePolicy::Replace);

    let options: TreeOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, TreeOptions::default());

    assert_eq!(
        serde_json::to_value(TreeOptions::default()).unwrap(),
        json!({ "duplicates": "ignore" })
    );
}

#[test]
fn traversal_order_names_matrix() {
    let order: TraversalOrder = serde_json::from_str(r#""level-order""#).unwrap();
    assert_eq!(order, TraversalOrder::LevelOrder);
    assert_eq!(
        serde_json::to_string(&TraversalOrder::PreOrder).unwrap(),
        r#""pre-order""#
    );
}
