//! Tree builder normalizing caller-built records into an arena.

use tracing::{debug, instrument};

use crate::domain::arena::{Forest, NodeId, NodeSpec, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a [`TreeArena`] from nested [`NodeSpec`]s.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: TreeArena,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, forest))]
    pub fn build(mut self, forest: Forest) -> DomainResult<TreeArena> {
        let roots = match forest {
            Forest::Root(root) if root.is_empty() => {
                return Err(DomainError::Input("root record is empty".to_string()));
            }
            Forest::Roots(roots) if roots.is_empty() => {
                return Err(DomainError::Input("forest has no roots".to_string()));
            }
            forest => forest.into_roots(),
        };

        for root in roots {
            self.insert_tree(root);
        }
        debug!(
            "built tree: {} roots, {} nodes",
            self.tree.roots().len(),
            self.tree.len()
        );

        Ok(self.tree)
    }

    /// Iterative insert; children are pushed in reverse so they land in order.
    fn insert_tree(&mut self, root: NodeSpec) {
        let mut stack: Vec<(NodeSpec, Option<NodeId>)> = vec![(root, None)];

        while let Some((spec, parent)) = stack.pop() {
            let NodeSpec { record, children } = spec;
            let current = self.tree.insert_node(record, parent);

            for child in children.into_iter().rev() {
                stack.push((child, Some(current)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Value;

    // root
    // ├── child1
    // │   └── grandchild1
    // └── child2
    #[test]
    fn test_build_keeps_child_order() {
        let spec = NodeSpec::new("root").children([
            NodeSpec::new("child1").child(NodeSpec::new("grandchild1")),
            NodeSpec::new("child2"),
        ]);

        let tree = TreeBuilder::new().build(spec.into()).unwrap();

        let root = tree.roots()[0];
        assert_eq!(tree.record(root).unwrap().id(), &Value::from("root"));
        let children = tree.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(tree.record(children[0]).unwrap().id(), &Value::from("child1"));
        assert_eq!(tree.record(children[1]).unwrap().id(), &Value::from("child2"));

        let grandchildren = tree.children(children[0]);
        assert_eq!(grandchildren.len(), 1);
        assert_eq!(
            tree.record(grandchildren[0]).unwrap().id(),
            &Value::from("grandchild1")
        );
        assert!(tree.children(children[1]).is_empty());
    }

    #[test]
    fn test_build_keeps_root_order() {
        let tree = TreeBuilder::new()
            .build(vec![NodeSpec::new(1), NodeSpec::new(2), NodeSpec::new(3)].into())
            .unwrap();

        let ids: Vec<_> = tree
            .roots()
            .iter()
            .map(|&r| tree.record(r).unwrap().id().clone())
            .collect();
        assert_eq!(ids, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn test_build_rejects_empty_inputs() {
        let empty_roots = TreeBuilder::new().build(Forest::Roots(vec![]));
        assert!(matches!(empty_roots, Err(DomainError::Input(_))));

        let empty_root = TreeBuilder::new().build(Forest::Root(NodeSpec::default()));
        assert!(matches!(empty_root, Err(DomainError::Input(_))));
    }
}
