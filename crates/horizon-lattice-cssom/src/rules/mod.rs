//! The rule tree.
//!
//! Rules live in a [`RuleArena`] owned by their [`StyleSheet`]. Parent links
//! are [`RuleId`]s into the same arena, so detaching a rule is a matter of
//! clearing one link and moving the subtree out.

mod arena;
mod builder;
mod namespaces;
mod rule;
mod stylesheet;
mod view;

pub use arena::{RuleArena, RuleId};
pub use builder::{TreeBuilder, canonical_slot};
pub use namespaces::NamespaceTable;
pub use rule::{ImportLayer, ImportRule, RuleData, RuleNode};
pub use stylesheet::{DetachedRule, ReplaceState, StyleSheet};
pub use view::{RuleList, RuleRef};
