use std::fmt::{self, Debug};

use log::trace;

use crate::error::InvariantError;
use crate::print::{print_tree, PrintChild};
use crate::util::{get_l, get_r, set_l, set_r, swap_keys};

use super::types::AvlNodeLike;

/// The four AVL rebalancing cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Left subtree too tall on its outer side: single right rotation.
    LeftLeft,
    /// Right subtree too tall on its outer side: single left rotation.
    RightRight,
    /// Left subtree too tall on its inner side: left child left, node right.
    LeftRight,
    /// Right subtree too tall on its inner side: right child right, node left.
    RightLeft,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rotation::LeftLeft => "LL",
            Rotation::RightRight => "RR",
            Rotation::LeftRight => "LR",
            Rotation::RightLeft => "RL",
        })
    }
}

/// Result of linking a new leaf into a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The leaf was linked; `root` is the (possibly rotated) new root.
    Linked { root: u32 },
    /// A node with an equal key already exists; the tree is untouched.
    Duplicate { existing: u32 },
}

/// Result of unlinking a key from a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub root: Option<u32>,
    /// Detached node now holding the removed key, if the key was found.
    pub removed: Option<u32>,
}

#[inline]
fn h<K, N>(arena: &[N], i: Option<u32>) -> i32
where
    N: AvlNodeLike<K>,
{
    i.map_or(-1, |i| arena[i as usize].h())
}

#[inline]
fn update_height<K, N>(arena: &mut [N], n: u32)
where
    N: AvlNodeLike<K>,
{
    let lh = h(arena, get_l(arena, n));
    let rh = h(arena, get_r(arena, n));
    arena[n as usize].set_h(1 + lh.max(rh));
}

/// Height of the subtree at `node` as cached in the arena; -1 when absent.
pub fn height<K, N>(arena: &[N], node: Option<u32>) -> i32
where
    N: AvlNodeLike<K>,
{
    h(arena, node)
}

/// `height(right) - height(left)` at `n`.
pub fn balance_factor<K, N>(arena: &[N], n: u32) -> i32
where
    N: AvlNodeLike<K>,
{
    h(arena, get_r(arena, n)) - h(arena, get_l(arena, n))
}

/// Pivots `n` on its right child and returns the new subtree root.
///
/// The caller relinks the result into the parent slot (or the tree root).
pub fn rotate_left<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let Some(r) = get_r(arena, n) else {
        return n;
    };
    let rl = get_l(arena, r);
    set_r(arena, n, rl);
    set_l(arena, r, Some(n));
    update_height(arena, n);
    update_height(arena, r);
    r
}

/// Pivots `n` on its left child and returns the new subtree root.
pub fn rotate_right<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let Some(l) = get_l(arena, n) else {
        return n;
    };
    let lr = get_r(arena, l);
    set_l(arena, n, lr);
    set_r(arena, l, Some(n));
    update_height(arena, n);
    update_height(arena, l);
    l
}

fn rotate<K, N>(arena: &mut [N], n: u32, rotation: Rotation) -> u32
where
    N: AvlNodeLike<K>,
{
    trace!("avl: {rotation} rotation at node {n}");
    match rotation {
        Rotation::LeftLeft => rotate_right(arena, n),
        Rotation::RightRight => rotate_left(arena, n),
        Rotation::LeftRight => {
            if let Some(l) = get_l(arena, n) {
                let l = rotate_left(arena, l);
                set_l(arena, n, Some(l));
            }
            rotate_right(arena, n)
        }
        Rotation::RightLeft => {
            if let Some(r) = get_r(arena, n) {
                let r = rotate_right(arena, r);
                set_r(arena, n, Some(r));
            }
            rotate_left(arena, n)
        }
    }
}

struct InsertState {
    n: u32,
    rotated: bool,
    duplicate: Option<u32>,
}

fn insert_at<K, N, C>(
    arena: &mut [N],
    node: Option<u32>,
    state: &mut InsertState,
    comparator: &C,
) -> u32
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(curr) = node else {
        return state.n;
    };

    let cmp = comparator(arena[state.n as usize].key(), arena[curr as usize].key());
    if cmp == 0 {
        state.duplicate = Some(curr);
        return curr;
    }
    if cmp < 0 {
        let l = insert_at(arena, get_l(arena, curr), state, comparator);
        set_l(arena, curr, Some(l));
    } else {
        let r = insert_at(arena, get_r(arena, curr), state, comparator);
        set_r(arena, curr, Some(r));
    }
    if state.duplicate.is_some() {
        return curr;
    }

    update_height(arena, curr);
    if state.rotated {
        return curr;
    }

    let bf = balance_factor(arena, curr);
    let rotation = if bf < -1 {
        let Some(l) = get_l(arena, curr) else {
            return curr;
        };
        if comparator(arena[state.n as usize].key(), arena[l as usize].key()) < 0 {
            Rotation::LeftLeft
        } else {
            Rotation::LeftRight
        }
    } else if bf > 1 {
        let Some(r) = get_r(arena, curr) else {
            return curr;
        };
        if comparator(arena[state.n as usize].key(), arena[r as usize].key()) > 0 {
            Rotation::RightRight
        } else {
            Rotation::RightLeft
        }
    } else {
        return curr;
    };

    state.rotated = true;
    rotate(arena, curr, rotation)
}

/// Links the detached leaf `n` into the tree at `root`.
///
/// Descends by key, attaches `n` at the empty slot and rebalances on the way
/// back up. At most one (single or double) rotation fires; ancestors above
/// it only get their heights refreshed.
pub fn insert<K, N, C>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    comparator: &C,
) -> InsertOutcome
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut state = InsertState {
        n,
        rotated: false,
        duplicate: None,
    };
    let root = insert_at(arena, root, &mut state, comparator);
    match state.duplicate {
        Some(existing) => InsertOutcome::Duplicate { existing },
        None => InsertOutcome::Linked { root },
    }
}

/// Refreshes the height at `n` and restores its balance, choosing the case
/// from the taller child's own balance factor.
pub fn rebalance<K, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    update_height(arena, n);
    let bf = balance_factor(arena, n);
    let rotation = if bf < -1 {
        let Some(l) = get_l(arena, n) else {
            return n;
        };
        if balance_factor(arena, l) <= 0 {
            Rotation::LeftLeft
        } else {
            Rotation::LeftRight
        }
    } else if bf > 1 {
        let Some(r) = get_r(arena, n) else {
            return n;
        };
        if balance_factor(arena, r) >= 0 {
            Rotation::RightRight
        } else {
            Rotation::RightLeft
        }
    } else {
        return n;
    };
    rotate(arena, n, rotation)
}

/// Detaches the leftmost node under `n`; returns the new subtree root and
/// the detached node.
fn remove_min<K, N>(arena: &mut [N], n: u32) -> (Option<u32>, u32)
where
    N: AvlNodeLike<K>,
{
    match get_l(arena, n) {
        None => {
            let r = get_r(arena, n);
            set_r(arena, n, None);
            (r, n)
        }
        Some(l) => {
            let (l, min) = remove_min(arena, l);
            set_l(arena, n, l);
            (Some(rebalance(arena, n)), min)
        }
    }
}

fn remove_at<K, N, C>(
    arena: &mut [N],
    node: Option<u32>,
    key: &K,
    removed: &mut Option<u32>,
    comparator: &C,
) -> Option<u32>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let curr = node?;
    let cmp = comparator(key, arena[curr as usize].key());
    if cmp < 0 {
        let l = remove_at(arena, get_l(arena, curr), key, removed, comparator);
        set_l(arena, curr, l);
    } else if cmp > 0 {
        let r = remove_at(arena, get_r(arena, curr), key, removed, comparator);
        set_r(arena, curr, r);
    } else {
        match (get_l(arena, curr), get_r(arena, curr)) {
            (Some(_), Some(r)) => {
                // The successor's key moves up; its old node carries the
                // removed key out of the tree.
                let (r, successor) = remove_min(arena, r);
                set_r(arena, curr, r);
                swap_keys(arena, curr, successor);
                *removed = Some(successor);
            }
            (child, other) => {
                set_l(arena, curr, None);
                set_r(arena, curr, None);
                *removed = Some(curr);
                return child.or(other);
            }
        }
    }

    if removed.is_none() {
        return Some(curr);
    }
    Some(rebalance(arena, curr))
}

/// Unlinks the node holding `key` from the tree at `root`.
///
/// Every ancestor of the structural change is rebalanced, since a rotation
/// during removal may shorten the subtree and unbalance the next level up.
/// The detached node is returned with its links cleared; the caller owns
/// freeing its arena slot.
pub fn remove<K, N, C>(arena: &mut [N], root: Option<u32>, key: &K, comparator: &C) -> Removal
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut removed = None;
    let root = remove_at(arena, root, key, &mut removed, comparator);
    Removal { root, removed }
}

fn validate<K, N, C>(
    arena: &[N],
    node: u32,
    visited: &mut [bool],
    prev: &mut Option<u32>,
    comparator: &C,
) -> Result<i32, InvariantError>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let len = visited.len();
    let Some(seen) = visited.get_mut(node as usize) else {
        return Err(InvariantError::OutOfBounds { index: node, len });
    };
    if *seen {
        return Err(InvariantError::SharedNode { index: node });
    }
    *seen = true;

    let lh = match get_l(arena, node) {
        Some(l) => validate(arena, l, visited, prev, comparator)?,
        None => -1,
    };

    if let Some(p) = *prev {
        if comparator(arena[p as usize].key(), arena[node as usize].key()) >= 0 {
            return Err(InvariantError::OrderViolated { index: node });
        }
    }
    *prev = Some(node);

    let rh = match get_r(arena, node) {
        Some(r) => validate(arena, r, visited, prev, comparator)?,
        None => -1,
    };

    let expected = 1 + lh.max(rh);
    let actual = arena[node as usize].h();
    if actual != expected {
        return Err(InvariantError::HeightMismatch {
            index: node,
            expected,
            actual,
        });
    }

    let balance_factor = rh - lh;
    if !(-1..=1).contains(&balance_factor) {
        return Err(InvariantError::Unbalanced {
            index: node,
            balance_factor,
        });
    }

    Ok(expected)
}

/// Checks links, cached heights, balance and key order of the tree at
/// `root`. Returns the number of reachable nodes.
pub fn assert_avl_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<usize, InvariantError>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(0);
    };
    let mut visited = vec![false; arena.len()];
    let mut prev = None;
    validate(arena, root, &mut visited, &mut prev, comparator)?;
    Ok(visited.iter().filter(|v| **v).count())
}

/// Debug printer for AVL trees.
pub fn print<K, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    N: AvlNodeLike<K>,
{
    let Some(i) = node else {
        return "∅".to_string();
    };
    let n = &arena[i as usize];
    let left: &PrintChild<'_> = &|tab: &str| print(arena, n.l(), tab);
    let right: &PrintChild<'_> = &|tab: &str| print(arena, n.r(), tab);
    format!(
        "{:?} [h={} bf={}]{}",
        n.key(),
        n.h(),
        balance_factor(arena, i),
        print_tree(Some(tab), &[Some(left), Some(right)])
    )
}
