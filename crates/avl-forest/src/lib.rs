//! Arena-based AVL tree.
//!
//! Keys live in a [`Vec`]-backed arena owned by the tree; child links are
//! `Option<u32>` indices into it. Every index is held by exactly one parent
//! slot (or by the tree as its root), so rotations move indices between
//! slots and never alias them.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`KeyNode`] link traits, comparator helpers |
//! [`util`] | Arena helpers: `first`, `last`, `find`, `swap_keys` |
//! [`avl`] | Rotations, insert/remove with rebalancing, [`AvlTree`] |
//! [`traverse`] | In/pre/post/level-order [`Traverse`] iterator |
//! [`print`] | Box-drawing dump used by `Display` |
//! [`error`] | [`InvariantError`] returned by validation |
//!
//! ```
//! use avl_forest::{AvlTree, TraversalOrder};
//!
//! let mut tree = AvlTree::new();
//! for k in [30, 20, 10] {
//!     tree.insert(k);
//! }
//! assert_eq!(tree.root().map(|n| *n.key()), Some(20));
//! assert_eq!(tree.traverse(TraversalOrder::PreOrder).copied().collect::<Vec<_>>(), [20, 10, 30]);
//! assert!(tree.remove(&20));
//! assert!(!tree.search(&20));
//! ```

pub mod avl;
pub mod error;
pub mod print;
pub mod traverse;
pub mod types;
pub mod util;

pub use avl::{AvlTree, DuplicatePolicy, NodeRef, TreeOptions};
pub use error::InvariantError;
pub use traverse::{TraversalOrder, Traverse};
pub use types::{default_comparator, KeyNode, Node};
