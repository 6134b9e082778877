//! Tri-state checkbox propagation.
//!
//! A node is *checked* when its whole subtree is selected, *indeterminate*
//! when only part of it is, and neither when nothing below it is selected.
//! After the caller flips one node's checked flag, [`TreeArena::propagate_selection`]
//! restores that invariant below and above the node.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::error::DomainResult;
use crate::domain::guard::{require_name, require_value};
use crate::domain::query::Criteria;
use crate::domain::value::Value;

/// Caller-chosen field names for the selection state, the match key and the
/// `parentId` value that marks a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionFields {
    pub checked: String,
    pub indeterminate: String,
    pub key: String,
    pub root_parent: Value,
}

impl Default for SelectionFields {
    fn default() -> Self {
        Self {
            checked: "checked".into(),
            indeterminate: "indeterminate".into(),
            key: crate::domain::value::ID_FIELD.into(),
            root_parent: Value::Null,
        }
    }
}

impl SelectionFields {
    fn validate(&self) -> DomainResult<()> {
        require_name("checked", &self.checked)?;
        require_name("indeterminate", &self.indeterminate)?;
        require_name("key", &self.key)
    }
}

/// Which directions a propagation call touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Leaf root: nothing to update.
    None,
    Upward,
    Downward,
    Both,
}

/// Selection coverage of an ancestor's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Empty,
    Partial,
    Full,
}

impl Coverage {
    /// Ordered overwrite rules; a later rule replaces an earlier one:
    /// 1. some checked → `Partial`
    /// 2. all checked → `Full`
    /// 3. neither → `Empty`
    pub fn classify(all_checked: bool, some_checked: bool) -> Self {
        let mut coverage = None;
        if some_checked {
            coverage = Some(Coverage::Partial);
        }
        if all_checked {
            coverage = Some(Coverage::Full);
        }
        coverage.unwrap_or(Coverage::Empty)
    }

    /// Classify a subtree from its checked flags.
    pub fn of<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (mut all, mut some) = (true, false);
        for flag in flags {
            all &= flag;
            some |= flag;
        }
        Self::classify(all, some)
    }

    /// `(checked, indeterminate)` written for this coverage.
    pub fn state(self) -> (bool, bool) {
        match self {
            Coverage::Full => (true, false),
            Coverage::Partial => (false, true),
            Coverage::Empty => (false, false),
        }
    }
}

impl TreeArena {
    /// Restore the tri-state invariant after `item`'s checked flag was set.
    ///
    /// - leaf below a root: upward
    /// - branch below a root: downward, then upward
    /// - branch root: downward
    /// - leaf root: nothing
    ///
    /// A node is a root when its `parentId` equals `fields.root_parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn propagate_selection(
        &mut self,
        item: NodeId,
        fields: &SelectionFields,
    ) -> DomainResult<Propagation> {
        self.require_roots()?;
        fields.validate()?;
        let node = self.node(item)?;
        require_value(&fields.key, node.record.get(&fields.key))?;

        let is_root = node.record.parent_id() == &fields.root_parent;
        let propagation = match (node.is_leaf(), is_root) {
            (true, false) => {
                self.propagate_up(item, fields)?;
                Propagation::Upward
            }
            (false, false) => {
                self.propagate_down(item, fields)?;
                self.propagate_up(item, fields)?;
                Propagation::Both
            }
            (false, true) => {
                self.propagate_down(item, fields)?;
                Propagation::Downward
            }
            (true, true) => Propagation::None,
        };
        debug!("propagate_selection {}: {:?}", item, propagation);
        Ok(propagation)
    }

    /// Force every descendant to the item's checked value.
    fn propagate_down(&mut self, item: NodeId, fields: &SelectionFields) -> DomainResult<()> {
        let record = self.record_mut(item)?;
        record.set(fields.indeterminate.as_str(), false);
        let checked = record.flag(&fields.checked);
        let key_value = record.get(&fields.key).clone();

        let descendants = self.find_descendants(&Criteria::key_value(&fields.key, &key_value));
        trace!("propagate_down: {} descendants -> {}", descendants.len(), checked);
        for descendant in descendants {
            let record = self.record_mut(descendant)?;
            if record.flag(&fields.indeterminate) {
                record.set(fields.indeterminate.as_str(), false);
            }
            record.set(fields.checked.as_str(), checked);
        }
        Ok(())
    }

    /// Re-derive every ancestor's state from its descendants.
    ///
    /// Ancestors are evaluated nearest first, so each one reads the already
    /// updated state of the ancestors below it. Every ancestor must carry the
    /// match key; otherwise nothing is written.
    fn propagate_up(&mut self, item: NodeId, fields: &SelectionFields) -> DomainResult<()> {
        let parent_id = self.record(item)?.parent_id().clone();
        let ancestors = self.find_ancestors(&parent_id)?;

        let mut keyed = Vec::with_capacity(ancestors.len());
        for &ancestor in ancestors.iter().rev() {
            let key_value = self.record(ancestor)?.get(&fields.key).clone();
            require_value(&fields.key, &key_value)?;
            keyed.push((ancestor, key_value));
        }

        for (ancestor, key_value) in keyed {
            let coverage = {
                let descendants =
                    self.find_descendants(&Criteria::key_value(&fields.key, &key_value));
                Coverage::of(
                    descendants
                        .iter()
                        .filter_map(|&n| self.get_node(n))
                        .map(|node| node.record.flag(&fields.checked)),
                )
            };
            let (checked, indeterminate) = coverage.state();
            trace!("propagate_up: {} is {:?}", key_value, coverage);

            let record = self.record_mut(ancestor)?;
            record.set(fields.checked.as_str(), checked);
            record.set(fields.indeterminate.as_str(), indeterminate);
        }
        Ok(())
    }
}
