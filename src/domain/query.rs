//! Lookups built on the traversal primitives.
//!
//! Read-only queries degrade gracefully: an empty forest or an unusable
//! argument is logged and answered with `None` / an empty sequence. The
//! ancestor chain fails fast, because callers build on its result.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::error::DomainResult;
use crate::domain::guard::{is_usable_name, is_usable_value, require_name, require_value};
use crate::domain::traversal::{level_order, LevelOrderIter};
use crate::domain::value::{Record, Value};

/// How a search recognizes its target node.
pub enum Criteria<'a> {
    /// Field `key` equals `value`.
    ByKeyValue { key: &'a str, value: &'a Value },
    /// Caller predicate over the node's record.
    ByPredicate(&'a dyn Fn(&Record) -> bool),
}

impl<'a> Criteria<'a> {
    pub fn key_value(key: &'a str, value: &'a Value) -> Self {
        Criteria::ByKeyValue { key, value }
    }

    pub fn predicate(predicate: &'a dyn Fn(&Record) -> bool) -> Self {
        Criteria::ByPredicate(predicate)
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Criteria::ByKeyValue { key, value } => record.get(key) == *value,
            Criteria::ByPredicate(predicate) => predicate(record),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            Criteria::ByKeyValue { key, value } => {
                require_name("key", key)?;
                require_value("value", value)
            }
            Criteria::ByPredicate(_) => Ok(()),
        }
    }
}

impl fmt::Debug for Criteria<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::ByKeyValue { key, value } => f
                .debug_struct("ByKeyValue")
                .field("key", key)
                .field("value", value)
                .finish(),
            Criteria::ByPredicate(_) => f.write_str("ByPredicate(..)"),
        }
    }
}

/// Outcome of [`TreeArena::find_path`].
///
/// `NotFound` and a root match are distinct from any ancestor path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathLookup<T> {
    /// No root's search reached the target.
    NotFound,
    /// The target is itself a root; holds the target's own key (or node).
    Root(T),
    /// Ancestors of the target, outermost first, target excluded.
    Ancestors(Vec<T>),
}

impl<T> PathLookup<T> {
    pub fn is_found(&self) -> bool {
        !matches!(self, PathLookup::NotFound)
    }

    pub fn is_root(&self) -> bool {
        matches!(self, PathLookup::Root(_))
    }
}

/// Search an already flattened sequence for the first node with `key == value`.
pub fn find_in(tree: &TreeArena, nodes: &[NodeId], key: &str, value: &Value) -> Option<NodeId> {
    if let Err(e) = Criteria::key_value(key, value).validate() {
        warn!("find_in: {}", e);
        return None;
    }
    nodes
        .iter()
        .copied()
        .find(|&n| tree.get_node(n).is_some_and(|node| node.record.get(key) == value))
}

impl TreeArena {
    /// First node, in level order, whose field `key` equals `value`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_key_value(&self, key: &str, value: &Value) -> Option<NodeId> {
        if self.is_empty() {
            warn!("find_by_key_value: tree is empty");
            return None;
        }
        if let Err(e) = Criteria::key_value(key, value).validate() {
            warn!("find_by_key_value: {}", e);
            return None;
        }
        LevelOrderIter::new(self, self.roots())
            .find(|&n| self.get_node(n).is_some_and(|node| node.record.get(key) == value))
    }

    /// Every node, in level order, for which `predicate` holds.
    #[instrument(level = "debug", skip(self, predicate))]
    pub fn find_all<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Record) -> bool,
    {
        if self.is_empty() {
            warn!("find_all: tree is empty");
            return Vec::new();
        }
        LevelOrderIter::new(self, self.roots())
            .filter(|&n| self.get_node(n).is_some_and(|node| predicate(&node.record)))
            .collect()
    }

    /// Descendants of the first node matching `criteria`, in level order,
    /// the matched node excluded.
    ///
    /// The match is searched depth-first (children before remaining siblings).
    /// No match and a leaf match both yield an empty sequence.
    #[instrument(level = "debug", skip(self))]
    pub fn find_descendants(&self, criteria: &Criteria<'_>) -> Vec<NodeId> {
        if self.is_empty() {
            warn!("find_descendants: tree is empty");
            return Vec::new();
        }
        if let Err(e) = criteria.validate() {
            warn!("find_descendants: {}", e);
            return Vec::new();
        }

        let mut pending: VecDeque<NodeId> = self.roots().iter().copied().collect();
        while let Some(current) = pending.pop_front() {
            let Some(node) = self.get_node(current) else {
                continue;
            };
            if criteria.matches(&node.record) {
                trace!("find_descendants: matched {}", current);
                return level_order(self, &node.children).unwrap_or_default();
            }
            for &child in node.children.iter().rev() {
                pending.push_front(child);
            }
        }
        Vec::new()
    }

    /// Like [`find_descendants`](Self::find_descendants), answering the
    /// `key` field of each descendant instead of its handle.
    pub fn find_descendant_keys(&self, criteria: &Criteria<'_>, key: &str) -> Vec<Value> {
        if !is_usable_name(key) {
            warn!("find_descendant_keys: key is empty");
            return Vec::new();
        }
        self.find_descendants(criteria)
            .into_iter()
            .filter_map(|n| self.get_node(n).map(|node| node.record.get(key).clone()))
            .collect()
    }

    /// Ancestor chain starting at the node whose `id` is `parent_id`,
    /// outermost first.
    ///
    /// Walks `parentId` values, not structural links: a broken reference
    /// ends the chain early, a revisited node ends a `parentId` loop.
    #[instrument(level = "debug", skip(self))]
    pub fn find_ancestors(&self, parent_id: &Value) -> DomainResult<Vec<NodeId>> {
        let roots = self.require_roots()?;
        require_value("parent_id", parent_id)?;

        let flat = level_order(self, roots)?;
        let mut chain: VecDeque<NodeId> = VecDeque::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut current = find_by_id(self, &flat, parent_id);

        while let Some(node) = current {
            if !seen.insert(node) {
                warn!("find_ancestors: parentId chain of {} loops", parent_id);
                break;
            }
            chain.push_front(node);
            let next_id = self.record(node)?.parent_id();
            current = if is_usable_value(next_id) {
                find_by_id(self, &flat, next_id)
            } else {
                None
            };
        }

        Ok(chain.into())
    }

    /// Identifier form of [`find_ancestors`](Self::find_ancestors).
    pub fn find_ancestor_ids(&self, parent_id: &Value) -> DomainResult<Vec<Value>> {
        self.find_ancestors(parent_id)?
            .into_iter()
            .map(|n| self.record(n).map(|r| r.id().clone()))
            .collect()
    }

    /// Key path to the first node whose `key` field equals `target`.
    ///
    /// Each root is searched depth-first in turn until one yields a match.
    #[instrument(level = "debug", skip(self))]
    pub fn find_path(&self, target: &Value, key: &str) -> DomainResult<PathLookup<Value>> {
        require_name("key", key)?;
        if self.is_empty() {
            warn!("find_path: tree is empty");
            return Ok(PathLookup::NotFound);
        }

        let mut path = Vec::new();
        for &root in self.roots() {
            path.clear();
            if search_path(self, root, target, key, &mut path) {
                debug!("find_path: {}", path.iter().join(" > "));
                return Ok(split_path(path));
            }
        }
        Ok(PathLookup::NotFound)
    }

    /// Detail form of [`find_path`](Self::find_path): keys resolved back to
    /// nodes with [`find_all`](Self::find_all).
    pub fn find_path_nodes(&self, target: &Value, key: &str) -> DomainResult<PathLookup<NodeId>> {
        Ok(match self.find_path(target, key)? {
            PathLookup::NotFound => PathLookup::NotFound,
            PathLookup::Root(root_key) => self
                .find_all(|r| r.get(key) == &root_key)
                .first()
                .map_or(PathLookup::NotFound, |&n| PathLookup::Root(n)),
            PathLookup::Ancestors(keys) => {
                PathLookup::Ancestors(self.find_all(|r| keys.contains(r.get(key))))
            }
        })
    }

    /// A parent node has at least one child.
    pub fn is_parent(&self, node: NodeId) -> bool {
        self.get_node(node).is_some_and(|n| !n.is_leaf())
    }

    /// True when the node keyed `target` exists below some root.
    pub fn is_descendant(&self, target: &Value, key: &str) -> bool {
        matches!(self.find_path(target, key), Ok(PathLookup::Ancestors(_)))
    }
}

fn find_by_id(tree: &TreeArena, flat: &[NodeId], id: &Value) -> Option<NodeId> {
    find_in(tree, flat, crate::domain::value::ID_FIELD, id)
}

fn search_path(
    tree: &TreeArena,
    node: NodeId,
    target: &Value,
    key: &str,
    path: &mut Vec<Value>,
) -> bool {
    let Some(current) = tree.get_node(node) else {
        return false;
    };
    let value = current.record.get(key);
    path.push(value.clone());
    if value == target {
        return true;
    }
    for &child in &current.children {
        if search_path(tree, child, target, key, path) {
            return true;
        }
    }
    path.pop();
    false
}

fn split_path(mut path: Vec<Value>) -> PathLookup<Value> {
    if path.len() == 1 {
        return PathLookup::Root(path.remove(0));
    }
    path.pop();
    PathLookup::Ancestors(path)
}
