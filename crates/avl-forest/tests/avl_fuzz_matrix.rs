use std::collections::BTreeSet;

use avl_forest::{AvlTree, TraversalOrder};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn check_against(tree: &AvlTree<i64>, model: &BTreeSet<i64>) {
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().eq(model.iter()));
    assert_eq!(tree.min(), model.first());
    assert_eq!(tree.max(), model.last());
}

#[test]
fn seeded_differential_matrix() {
    for seed in 0u8..8 {
        let mut rng = Xoshiro256StarStar::from_seed([seed; 32]);
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for step in 0..2_000 {
            let key = rng.gen_range(0..256i64);
            if rng.gen_bool(0.6) {
                assert_eq!(tree.insert(key), model.insert(key), "insert {key} at {step}");
            } else {
                assert_eq!(tree.remove(&key), model.remove(&key), "remove {key} at {step}");
            }
            if step % 64 == 0 {
                check_against(&tree, &model);
            }
        }
        check_against(&tree, &model);

        let keys: Vec<i64> = model.iter().copied().collect();
        for key in keys {
            assert_eq!(tree.take(&key), Some(key));
        }
        assert!(tree.is_empty());
        tree.assert_valid().unwrap();
    }
}

#[test]
fn seeded_height_bound_matrix() {
    let mut rng = Xoshiro256StarStar::from_seed([7; 32]);
    let mut tree = AvlTree::new();
    for _ in 0..10_000 {
        tree.insert(rng.gen::<u32>());
    }
    tree.assert_valid().unwrap();
    // AVL height is below 1.44 * log2(n + 2).
    let bound = (1.44 * ((tree.len() + 2) as f64).log2()) as i32;
    assert!(tree.height() <= bound, "height {} > {bound}", tree.height());
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => (-64i16..64).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn balance_and_order_hold_after_any_ops(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(k) => prop_assert_eq!(tree.insert(k), model.insert(k)),
                Op::Remove(k) => prop_assert_eq!(tree.remove(&k), model.remove(&k)),
            }
            prop_assert!(tree.assert_valid().is_ok());
        }
        let in_order: Vec<i16> = tree.traverse(TraversalOrder::InOrder).copied().collect();
        let expected: Vec<i16> = model.into_iter().collect();
        prop_assert_eq!(in_order, expected);
    }

    #[test]
    fn every_order_visits_every_key(keys in prop::collection::btree_set(any::<i32>(), 0..100)) {
        let tree: AvlTree<i32> = keys.iter().copied().collect();
        for order in [TraversalOrder::PreOrder, TraversalOrder::PostOrder, TraversalOrder::LevelOrder] {
            let mut seen: Vec<i32> = tree.traverse(order).copied().collect();
            seen.sort_unstable();
            prop_assert!(seen.iter().eq(keys.iter()));
        }
    }

    #[test]
    fn insert_then_search_round_trips(keys in prop::collection::vec(any::<u16>(), 1..64), probe in any::<u16>()) {
        let mut tree: AvlTree<u16> = keys.iter().copied().collect();
        tree.insert(probe);
        prop_assert!(tree.search(&probe));
        prop_assert!(tree.remove(&probe));
        prop_assert!(!tree.search(&probe));
        prop_assert!(tree.assert_valid().is_ok());
    }
}
