//! Arena helpers shared by the tree implementations.
//!
//! Key-based helpers (`find`) accept a `key_of` accessor closure so they work
//! with any arena node layout.

pub mod swap;

use crate::types::Node;

pub use swap::swap_keys;

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Finds the slot that links to `node`.
///
/// Returns `Some(None)` when `node` is the root, `Some(Some(parent))` when
/// it hangs below `parent`, and `None` when it is not reachable by
/// descending with its own key.
pub fn find_parent<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    node: u32,
    key_of: F,
    comparator: C,
) -> Option<Option<u32>>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let key = key_of(&arena[node as usize]);
    let mut parent = None;
    let mut curr = root;
    while let Some(i) = curr {
        if i == node {
            return Some(parent);
        }
        let cmp = comparator(key, key_of(&arena[i as usize]));
        parent = Some(i);
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Points whichever child slot of `parent` holds `from` at `to`.
pub fn replace_child<N: Node>(arena: &mut [N], parent: u32, from: u32, to: Option<u32>) {
    if get_l(arena, parent) == Some(from) {
        set_l(arena, parent, to);
    } else {
        set_r(arena, parent, to);
    }
}
