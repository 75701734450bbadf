//! Node trait definitions.
//!
//! Nodes are plain structs stored in a [`Vec`]-backed arena. Each child
//! "pointer" is an `Option<u32>` index into that arena, and every index is
//! held by exactly one parent slot (or by the owning tree as its root), so
//! the node graph is a tree by construction: no sharing, no cycles.
//!
//! All tree-manipulation functions take the arena as `&mut [N]` (or
//! `&mut Vec<N>` when they allocate) and work with indices.

/// Child links (`l`, `r`).
pub trait Node {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Keyed node interface.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
    fn key_mut(&mut self) -> &mut K;
}

/// Three-way comparator derived from [`Ord`].
///
/// Trees take any `Fn(&K, &K) -> i32` returning a negative number when
/// `a < b`, zero when equal and a positive number when `a > b`.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> i32 {
    match a.cmp(b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}
