//! Flattening a forest into a sequence of node handles.
//!
//! Four walks with distinct, observable orders:
//!
//! | walk | structure | guarantee |
//! |------|-----------|-----------|
//! | [`Traversal::LevelOrder`] | FIFO queue | node before descendants, enqueue order |
//! | [`Traversal::StackOrder`] | LIFO stack | last root / last child first |
//! | [`Traversal::PostOrder`] | LIFO stack, prepend | node after descendants |
//! | [`Traversal::Preorder`] | recursion | node before descendants, original order |

use std::collections::VecDeque;

use tracing::{instrument, warn};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// Selects one of the flattening orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    LevelOrder,
    StackOrder,
    PostOrder,
    Preorder,
}

/// Breadth-first walk: emit the earliest-enqueued node, enqueue its children.
pub struct LevelOrderIter<'a> {
    tree: &'a TreeArena,
    queue: VecDeque<NodeId>,
}

impl<'a> LevelOrderIter<'a> {
    pub fn new(tree: &'a TreeArena, seeds: &[NodeId]) -> Self {
        Self {
            tree,
            queue: seeds.iter().copied().collect(),
        }
    }
}

impl Iterator for LevelOrderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(current).iter().copied());
        Some(current)
    }
}

/// Stack walk: pop the last-pushed node, push its children in original order.
///
/// Children are deliberately not reversed, so siblings and multiple roots come
/// out last-first while each subtree is still visited depth-first.
pub struct StackOrderIter<'a> {
    tree: &'a TreeArena,
    stack: Vec<NodeId>,
}

impl<'a> StackOrderIter<'a> {
    pub fn new(tree: &'a TreeArena, seeds: &[NodeId]) -> Self {
        Self {
            tree,
            stack: seeds.to_vec(),
        }
    }
}

impl Iterator for StackOrderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(self.tree.children(current).iter().copied());
        Some(current)
    }
}

fn require_seeds(seeds: &[NodeId]) -> DomainResult<()> {
    if seeds.is_empty() {
        Err(DomainError::Input("nothing to traverse".to_string()))
    } else {
        Ok(())
    }
}

pub fn level_order(tree: &TreeArena, seeds: &[NodeId]) -> DomainResult<Vec<NodeId>> {
    require_seeds(seeds)?;
    Ok(LevelOrderIter::new(tree, seeds).collect())
}

pub fn stack_order(tree: &TreeArena, seeds: &[NodeId]) -> DomainResult<Vec<NodeId>> {
    require_seeds(seeds)?;
    Ok(StackOrderIter::new(tree, seeds).collect())
}

/// Every popped node is prepended, i.e. the stack walk reversed.
pub fn post_order(tree: &TreeArena, seeds: &[NodeId]) -> DomainResult<Vec<NodeId>> {
    require_seeds(seeds)?;
    let mut result: VecDeque<NodeId> = VecDeque::with_capacity(tree.len());
    for node in StackOrderIter::new(tree, seeds) {
        result.push_front(node);
    }
    Ok(result.into())
}

pub fn preorder(tree: &TreeArena, seeds: &[NodeId]) -> DomainResult<Vec<NodeId>> {
    require_seeds(seeds)?;
    let mut result = Vec::with_capacity(tree.len());
    collect_preorder(tree, seeds, &mut result);
    Ok(result)
}

fn collect_preorder(tree: &TreeArena, nodes: &[NodeId], out: &mut Vec<NodeId>) {
    for &node in nodes {
        out.push(node);
        collect_preorder(tree, tree.children(node), out);
    }
}

pub fn flatten_with(
    tree: &TreeArena,
    seeds: &[NodeId],
    traversal: Traversal,
) -> DomainResult<Vec<NodeId>> {
    match traversal {
        Traversal::LevelOrder => level_order(tree, seeds),
        Traversal::StackOrder => stack_order(tree, seeds),
        Traversal::PostOrder => post_order(tree, seeds),
        Traversal::Preorder => preorder(tree, seeds),
    }
}

impl TreeArena {
    /// Flatten the whole forest.
    ///
    /// An empty forest is logged and yields an empty sequence.
    #[instrument(level = "trace", skip(self))]
    pub fn flatten(&self, traversal: Traversal) -> Vec<NodeId> {
        flatten_with(self, self.roots(), traversal).unwrap_or_else(|e| {
            warn!("flatten {:?}: {}", traversal, e);
            Vec::new()
        })
    }

    /// Flatten the subtree rooted at `node`, the node included.
    #[instrument(level = "trace", skip(self))]
    pub fn flatten_from(&self, node: NodeId, traversal: Traversal) -> DomainResult<Vec<NodeId>> {
        self.node(node)?;
        flatten_with(self, &[node], traversal)
    }

    pub fn iter_level_order(&self) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self, self.roots())
    }

    pub fn iter_stack_order(&self) -> StackOrderIter<'_> {
        StackOrderIter::new(self, self.roots())
    }
}
