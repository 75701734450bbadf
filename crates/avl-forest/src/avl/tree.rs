use std::fmt;

use log::debug;

use crate::error::InvariantError;
use crate::traverse::{traverse_with, TraversalOrder, Traverse};
use crate::types::default_comparator;
use crate::util::{find, find_parent, first, last, replace_child, swap_keys};

use super::options::{DuplicatePolicy, TreeOptions};
use super::types::AvlNode;
use super::util::{self, InsertOutcome};

/// Height-balanced ordered set of keys.
///
/// Nodes live in an arena owned by the tree and link to their children by
/// index. The arena stays dense: removing a key frees its node immediately
/// and moves the last node into the vacated slot.
pub struct AvlTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Option<u32>,
    arena: Vec<AvlNode<K>>,
    comparator: C,
    options: TreeOptions,
}

impl<K> AvlTree<K, fn(&K, &K) -> i32>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    pub fn with_options(options: TreeOptions) -> Self {
        Self::with_comparator_and_options(default_comparator::<K>, options)
    }
}

impl<K> Default for AvlTree<K, fn(&K, &K) -> i32>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_options(comparator, TreeOptions::default())
    }

    pub fn with_comparator_and_options(comparator: C, options: TreeOptions) -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            comparator,
            options,
        }
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Height of the tree: -1 when empty, 0 for a single key.
    pub fn height(&self) -> i32 {
        util::height(&self.arena, self.root)
    }

    /// Adds `key`, rebalancing on the way back up.
    ///
    /// Returns `true` if a new node was created. An equal key is handled
    /// according to [`TreeOptions::duplicates`].
    pub fn insert(&mut self, key: K) -> bool {
        self.arena.push(AvlNode::new(key));
        let n = (self.arena.len() - 1) as u32;
        match util::insert(&mut self.arena, self.root, n, &self.comparator) {
            InsertOutcome::Linked { root } => {
                self.root = Some(root);
                true
            }
            InsertOutcome::Duplicate { existing } => {
                if self.options.duplicates == DuplicatePolicy::Replace {
                    swap_keys(&mut self.arena, existing, n);
                }
                self.arena.pop();
                false
            }
        }
    }

    /// Removes `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and returns the key that was stored for it.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let removal = util::remove(&mut self.arena, self.root, key, &self.comparator);
        self.root = removal.root;
        let removed = removal.removed?;
        Some(self.free(removed))
    }

    /// Drops the detached node at `idx`, filling the hole with the last
    /// arena node.
    fn free(&mut self, idx: u32) -> K {
        let last = (self.arena.len() - 1) as u32;
        if idx != last {
            match find_parent(&self.arena, self.root, last, |n| &n.k, &self.comparator) {
                Some(Some(parent)) => replace_child(&mut self.arena, parent, last, Some(idx)),
                Some(None) => self.root = Some(idx),
                None => debug!("avl: node {last} unreachable while compacting"),
            }
            debug!("avl: moved node {last} into freed slot {idx}");
        }
        self.arena.swap_remove(idx as usize).k
    }

    fn find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n| &n.k, &self.comparator)
    }

    /// Whether a key equal to `key` is stored. Never mutates the tree.
    pub fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|i| &self.arena[i as usize].k)
    }

    pub fn min(&self) -> Option<&K> {
        first(&self.arena, self.root).map(|i| &self.arena[i as usize].k)
    }

    pub fn max(&self) -> Option<&K> {
        last(&self.arena, self.root).map(|i| &self.arena[i as usize].k)
    }

    /// Read-only view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|idx| NodeRef {
            arena: &self.arena,
            idx,
        })
    }

    /// Lazily walks the keys in `order`, starting from the current root.
    pub fn traverse(&self, order: TraversalOrder) -> Traverse<'_, K, AvlNode<K>> {
        Traverse::new(&self.arena, self.root, order)
    }

    pub fn traverse_with<F: FnMut(&K)>(&self, order: TraversalOrder, visit: F) {
        traverse_with(&self.arena, self.root, order, visit);
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Traverse<'_, K, AvlNode<K>> {
        self.traverse(TraversalOrder::InOrder)
    }

    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Checks cached heights, balance factors, key order and that every
    /// arena node is reachable exactly once.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        let reachable = util::assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        if reachable != self.arena.len() {
            return Err(InvariantError::SizeMismatch {
                reachable,
                len: self.arena.len(),
            });
        }
        Ok(())
    }
}

/// Borrowed view of one node, for inspecting tree shape.
pub struct NodeRef<'a, K> {
    arena: &'a [AvlNode<K>],
    idx: u32,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    fn node(&self) -> &'a AvlNode<K> {
        &self.arena[self.idx as usize]
    }

    fn at(&self, idx: Option<u32>) -> Option<Self> {
        idx.map(|idx| Self {
            arena: self.arena,
            idx,
        })
    }

    pub fn key(&self) -> &'a K {
        &self.node().k
    }

    pub fn left(&self) -> Option<Self> {
        self.at(self.node().l)
    }

    pub fn right(&self) -> Option<Self> {
        self.at(self.node().r)
    }

    pub fn height(&self) -> i32 {
        self.node().h
    }

    /// `height(right) - height(left)`.
    pub fn balance_factor(&self) -> i32 {
        util::balance_factor(self.arena, self.idx)
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}

impl<K, C> fmt::Debug for AvlTree<K, C>
where
    K: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> fmt::Display for AvlTree<K, C>
where
    K: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(_) => write!(f, "AvlTree\n└─ {}", util::print(&self.arena, self.root, "   ")),
            None => f.write_str("AvlTree ∅"),
        }
    }
}

impl<K, C> Clone for AvlTree<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            arena: self.arena.clone(),
            comparator: self.comparator.clone(),
            options: self.options,
        }
    }
}

impl<K, C> Extend<K> for AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, C> IntoIterator for &'a AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = &'a K;
    type IntoIter = Traverse<'a, K, AvlNode<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_moves_last_node_into_hole() {
        let mut tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        // Key 1 sits at arena slot 1; key 3 (slot 2) must move into it.
        assert!(tree.remove(&1));
        assert_eq!(tree.arena.len(), 2);
        assert_eq!(tree.arena[1].k, 3);
        assert_eq!(tree.arena[0].r, Some(1));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn free_relinks_root_when_it_was_last() {
        let mut tree: AvlTree<i32> = [1, 2, 3].into_iter().collect();
        // 1, 2, 3 rotates so that key 2 (slot 1) is the root.
        assert_eq!(tree.root, Some(1));
        assert!(tree.remove(&1));
        tree.assert_valid().unwrap();
        assert_eq!(tree.to_vec(), vec![2, 3]);
        assert!(tree.remove(&3));
        assert_eq!(tree.root, Some(0));
        assert_eq!(tree.to_vec(), vec![2]);
        tree.assert_valid().unwrap();
    }

    type Entry = (i32, &'static str);

    #[test]
    fn replace_policy_swaps_stored_key() {
        let by_first = |a: &Entry, b: &Entry| default_comparator(&a.0, &b.0);
        let options = TreeOptions::default().with_duplicates(DuplicatePolicy::Replace);
        let mut tree = AvlTree::with_comparator_and_options(by_first, options);
        assert!(tree.insert((1, "a")));
        assert!(!tree.insert((1, "b")));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&(1, "")), Some(&(1, "b")));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn display_dumps_structure() {
        let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        let out = tree.to_string();
        assert!(out.starts_with("AvlTree\n└─ 2 [h=1 bf=0]"));
        assert_eq!(AvlTree::<i32>::new().to_string(), "AvlTree ∅");
    }
}
