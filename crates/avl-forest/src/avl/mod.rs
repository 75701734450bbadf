//! AVL tree: an arena-backed, height-balanced binary search tree.

pub mod options;
mod serialize;
pub mod tree;
pub mod types;
pub mod util;

pub use options::{DuplicatePolicy, TreeOptions};
pub use tree::{AvlTree, NodeRef};
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, balance_factor, insert, print, rebalance, remove, rotate_left, rotate_right,
    InsertOutcome, Removal, Rotation,
};
