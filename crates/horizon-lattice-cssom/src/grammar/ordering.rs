//! Ordering constraints of the top-level rule list.

use super::RuleKind;

/// Position state of the top-level rule list.
///
/// `@import` rules come first, then `@namespace` rules, then everything
/// else. `@layer` statements may appear among the imports without closing
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TopLevelState {
    /// Nothing but `@layer` statements seen yet.
    #[default]
    Start,
    /// `@import` rules may still follow.
    Imports,
    /// `@namespace` rules may still follow.
    Namespaces,
    /// Only body rules may follow.
    Body,
}

impl TopLevelState {
    /// The state after a rule of `kind`, or `None` if the rule is not
    /// permitted in the current state.
    pub fn advance(self, kind: RuleKind) -> Option<Self> {
        match kind {
            RuleKind::Import => (self <= Self::Imports).then_some(Self::Imports),
            RuleKind::Namespace => (self <= Self::Namespaces).then_some(Self::Namespaces),
            RuleKind::LayerStatement if self <= Self::Imports => Some(self),
            _ => Some(Self::Body),
        }
    }

    /// Returns `true` if a list of rule kinds satisfies the ordering constraints.
    pub fn accepts(kinds: impl IntoIterator<Item = RuleKind>) -> bool {
        kinds
            .into_iter()
            .try_fold(Self::Start, |state, kind| state.advance(kind))
            .is_some()
    }
}
