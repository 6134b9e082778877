//! Flatten, query and tri-state selection propagation for id/parentId hierarchies.
//!
//! Callers build nested [`NodeSpec`](domain::NodeSpec) records, normalize them
//! once into a [`TreeArena`](domain::TreeArena) and address nodes through
//! [`NodeId`](domain::NodeId) handles from then on.
//!
//! ```
//! use checktree::domain::{NodeSpec, SelectionFields, TreeArena, Value};
//!
//! let mut tree = TreeArena::from_forest(vec![NodeSpec::new(1).children([
//!     NodeSpec::new(2).parent(1).with("checked", false),
//!     NodeSpec::new(3).parent(1).with("checked", false),
//! ])])?;
//!
//! let two = tree.find_by_key_value("id", &Value::from(2)).unwrap();
//! tree.set_flag(two, "checked", true)?;
//! tree.propagate_selection(two, &SelectionFields::default())?;
//!
//! let one = tree.find_by_key_value("id", &Value::from(1)).unwrap();
//! assert!(tree.record(one)?.flag("indeterminate"));
//! # Ok::<(), checktree::domain::DomainError>(())
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod util;

pub use errors::{CheckTreeError, CheckTreeResult};
