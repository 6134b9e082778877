use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::value::{Record, Value};

/// Caller-built nested node: a record plus its ordered children.
///
/// This is the input shape. [`TreeArena`] normalizes it once into arena
/// storage addressed by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSpec {
    pub record: Record,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Node with the given `id` and no other fields.
    pub fn new(id: impl Into<Value>) -> Self {
        let mut record = Record::new();
        record.set(crate::domain::value::ID_FIELD, id);
        Self {
            record,
            children: Vec::new(),
        }
    }

    pub fn from_record(record: Record) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    pub fn parent(self, parent_id: impl Into<Value>) -> Self {
        self.with(crate::domain::value::PARENT_ID_FIELD, parent_id)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.set(name, value);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// A record counts as empty when it has neither fields nor children.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty() && self.children.is_empty()
    }
}

/// Tree input: a single root or an ordered sequence of roots.
#[derive(Debug, Clone, PartialEq)]
pub enum Forest {
    Root(NodeSpec),
    Roots(Vec<NodeSpec>),
}

impl Forest {
    pub fn into_roots(self) -> Vec<NodeSpec> {
        match self {
            Forest::Root(root) => vec![root],
            Forest::Roots(roots) => roots,
        }
    }
}

impl From<NodeSpec> for Forest {
    fn from(root: NodeSpec) -> Self {
        Forest::Root(root)
    }
}

impl From<Vec<NodeSpec>> for Forest {
    fn from(roots: Vec<NodeSpec>) -> Self {
        Forest::Roots(roots)
    }
}

/// Opaque handle to a node inside one [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Caller fields, including `id`, `parentId` and the selection flags
    pub record: Record,
    /// Structural parent, None for root nodes
    pub parent: Option<NodeId>,
    /// Ordered child handles
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based forest.
///
/// Uses generational arena for memory-safe node handles and O(1) lookups.
/// Roots keep the order in which the caller supplied them.
#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    roots: Vec<NodeId>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize caller-built records into a new arena.
    ///
    /// Fails with [`DomainError::Input`] for an empty sequence or an empty record.
    pub fn from_forest(forest: impl Into<Forest>) -> DomainResult<Self> {
        crate::domain::builder::TreeBuilder::new().build(forest.into())
    }

    #[instrument(level = "trace", skip(self, record))]
    pub fn insert_node(&mut self, record: Record, parent: Option<NodeId>) -> NodeId {
        let node = TreeNode {
            record,
            parent,
            children: Vec::new(),
        };
        let node_id = NodeId(self.arena.insert(node));

        if let Some(parent_id) = parent {
            if let Some(parent) = self.arena.get_mut(parent_id.0) {
                parent.children.push(node_id);
            }
        } else {
            self.roots.push(node_id);
        }

        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.arena.get_mut(id.0)
    }

    pub fn node(&self, id: NodeId) -> DomainResult<&TreeNode> {
        self.get_node(id).ok_or(DomainError::UnknownNode(id))
    }

    pub fn record(&self, id: NodeId) -> DomainResult<&Record> {
        self.node(id).map(|node| &node.record)
    }

    pub fn record_mut(&mut self, id: NodeId) -> DomainResult<&mut Record> {
        self.get_node_mut(id)
            .map(|node| &mut node.record)
            .ok_or(DomainError::UnknownNode(id))
    }

    /// Write a boolean field, e.g. the checked flag before propagating.
    pub fn set_flag(&mut self, id: NodeId, name: &str, value: bool) -> DomainResult<()> {
        self.record_mut(id)?.set(name, value);
        Ok(())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get_node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Roots as a traversal seed; an empty forest is an input error.
    pub(crate) fn require_roots(&self) -> DomainResult<&[NodeId]> {
        if self.roots.is_empty() {
            Err(DomainError::Input("tree is empty".to_string()))
        } else {
            Ok(&self.roots)
        }
    }
}
