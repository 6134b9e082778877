//! Plain-text dump of a tree for logs and test failure output.

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeId, TreeArena};

pub trait TreeDisplay {
    /// One `termtree` per root, each node labelled with its `label` field.
    fn to_tree_strings(&self, label: &str) -> Vec<Tree<String>>;
}

impl TreeDisplay for TreeArena {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_strings(&self, label: &str) -> Vec<Tree<String>> {
        fn build_tree(arena: &TreeArena, node_id: NodeId, label: &str) -> Tree<String> {
            let text = arena
                .get_node(node_id)
                .map(|node| node.record.get(label).to_string())
                .unwrap_or_default();
            let leaves: Vec<_> = arena
                .children(node_id)
                .iter()
                .map(|&child| build_tree(arena, child, label))
                .collect();
            Tree::new(text).with_leaves(leaves)
        }

        self.roots()
            .iter()
            .map(|&root| build_tree(self, root, label))
            .collect()
    }
}
