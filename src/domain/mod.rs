//! Domain layer: tree model, traversals, queries and selection propagation
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod error;
pub mod guard;
pub mod query;
pub mod selection;
pub mod traversal;
pub mod value;

pub use arena::{Forest, NodeId, NodeSpec, TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use display::TreeDisplay;
pub use error::{DomainError, DomainResult};
pub use query::{find_in, Criteria, PathLookup};
pub use selection::{Coverage, Propagation, SelectionFields};
pub use traversal::{LevelOrderIter, StackOrderIter, Traversal};
pub use value::{Record, Value, ID_FIELD, PARENT_ID_FIELD};
