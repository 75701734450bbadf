//! Lazy depth-first and breadth-first walks over an arena tree.

use std::collections::VecDeque;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::types::KeyNode;

/// Visiting order of [`Traverse`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree. Ascending key order.
    #[default]
    InOrder,
    /// Node before its descendants, left before right.
    PreOrder,
    /// Descendants before the node, left before right.
    PostOrder,
    /// Breadth-first, level by level, left to right.
    LevelOrder,
}

enum Frontier {
    /// Pending nodes; the flag marks a node whose children are already queued.
    Stack(Vec<(u32, bool)>),
    Queue(VecDeque<u32>),
}

/// Iterator over the keys of an arena tree in a fixed [`TraversalOrder`].
///
/// Holds a shared borrow of the arena, so the tree cannot change while a
/// walk is in progress. Each walk starts from the root it was created with.
pub struct Traverse<'a, K, N> {
    arena: &'a [N],
    order: TraversalOrder,
    frontier: Frontier,
    _key: PhantomData<&'a K>,
}

impl<'a, K, N> Traverse<'a, K, N>
where
    N: KeyNode<K>,
{
    pub fn new(arena: &'a [N], root: Option<u32>, order: TraversalOrder) -> Self {
        let frontier = match order {
            TraversalOrder::LevelOrder => Frontier::Queue(root.into_iter().collect()),
            _ => Frontier::Stack(root.into_iter().map(|i| (i, false)).collect()),
        };
        Self {
            arena,
            order,
            frontier,
            _key: PhantomData,
        }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }
}

impl<'a, K, N> Iterator for Traverse<'a, K, N>
where
    K: 'a,
    N: KeyNode<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let arena = self.arena;
        let order = self.order;
        match &mut self.frontier {
            Frontier::Queue(queue) => {
                let i = queue.pop_front()?;
                let n = &arena[i as usize];
                queue.extend(n.l());
                queue.extend(n.r());
                Some(n.key())
            }
            Frontier::Stack(stack) => loop {
                let (i, expanded) = stack.pop()?;
                let n = &arena[i as usize];
                if expanded {
                    return Some(n.key());
                }
                let l = n.l().map(|l| (l, false));
                let r = n.r().map(|r| (r, false));
                match order {
                    TraversalOrder::PreOrder => {
                        stack.extend(r);
                        stack.extend(l);
                        return Some(n.key());
                    }
                    TraversalOrder::PostOrder => {
                        stack.push((i, true));
                        stack.extend(r);
                        stack.extend(l);
                    }
                    _ => {
                        stack.extend(r);
                        stack.push((i, true));
                        stack.extend(l);
                    }
                }
            },
        }
    }
}

/// Drives `visit` over every key in `order`.
pub fn traverse_with<K, N, F>(
    arena: &[N],
    root: Option<u32>,
    order: TraversalOrder,
    mut visit: F,
) where
    N: KeyNode<K>,
    F: FnMut(&K),
{
    for key in Traverse::new(arena, root, order) {
        visit(key);
    }
}
