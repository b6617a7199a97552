//! Read-only views over rule lists and rules.

use crate::declarations::{DeclarationBlock, FeatureValueMap};
use crate::grammar::{FeatureType, MediaList, RuleKind};
use crate::serialize;

use super::arena::{RuleArena, RuleId};
use super::rule::{ImportRule, RuleData, RuleNode};

/// A live, index-addressable view of a rule list.
///
/// Indices are positions, not identities: they shift when rules are
/// inserted or deleted.
#[derive(Debug, Clone, Copy)]
pub struct RuleList<'a> {
    arena: &'a RuleArena,
    ids: &'a [RuleId],
}

impl<'a> RuleList<'a> {
    pub(crate) fn new(arena: &'a RuleArena, ids: &'a [RuleId]) -> Self {
        Self { arena, ids }
    }

    /// Number of rules in the list.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The rule at `index`.
    pub fn item(&self, index: usize) -> Option<RuleRef<'a>> {
        self.ids
            .get(index)
            .and_then(|&id| RuleRef::new(self.arena, id))
    }

    /// The ids of the rules, in list order.
    pub fn ids(&self) -> &'a [RuleId] {
        self.ids
    }

    /// Position of the rule `id` in this list.
    pub fn index_of(&self, id: RuleId) -> Option<usize> {
        self.ids.iter().position(|&candidate| candidate == id)
    }

    /// Iterate over the rules in list order.
    pub fn iter(&self) -> impl Iterator<Item = RuleRef<'a>> + 'a {
        let arena = self.arena;
        self.ids.iter().filter_map(move |&id| RuleRef::new(arena, id))
    }
}

/// A read-only handle to one rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleRef<'a> {
    arena: &'a RuleArena,
    id: RuleId,
    node: &'a RuleNode,
}

impl<'a> RuleRef<'a> {
    pub(crate) fn new(arena: &'a RuleArena, id: RuleId) -> Option<Self> {
        let node = arena.get(id)?;
        Some(Self { arena, id, node })
    }

    /// The id of this rule.
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The kind of this rule.
    pub fn kind(&self) -> RuleKind {
        self.node.kind()
    }

    /// Variant-specific data.
    pub fn data(&self) -> &'a RuleData {
        &self.node.data
    }

    /// The parent rule, `None` at the top level.
    pub fn parent(&self) -> Option<RuleRef<'a>> {
        self.node.parent.and_then(|id| RuleRef::new(self.arena, id))
    }

    /// The child rules. Empty for rules without a rule list.
    pub fn child_rules(&self) -> RuleList<'a> {
        RuleList::new(self.arena, &self.node.children)
    }

    /// The declaration set, for rules owning one.
    pub fn declarations(&self) -> Option<&'a DeclarationBlock> {
        self.node.declarations.as_ref()
    }

    /// Number of stored declarations.
    pub fn declaration_count(&self) -> usize {
        self.declarations().map_or(0, DeclarationBlock::len)
    }

    /// The stored value of a declaration.
    pub fn property_value(&self, name: &str) -> Option<&'a str> {
        self.declarations()?.value(name)
    }

    /// `"important"` if the declaration is important, otherwise the empty string.
    pub fn property_priority(&self, name: &str) -> &'static str {
        self.declarations()
            .map_or("", |block| block.priority(name))
    }

    /// Serialize this rule and its descendants.
    pub fn css_text(&self) -> String {
        serialize::rule_css_text(self.arena, self.id)
    }

    /// The selector text of a style rule or `@page` rule.
    pub fn selector_text(&self) -> Option<String> {
        match &self.node.data {
            RuleData::Style { selectors } => Some(selectors.to_string()),
            RuleData::Page { selectors } => Some(selectors.to_string()),
            _ => None,
        }
    }

    /// The condition text of `@media`, `@supports` and `@container`.
    pub fn condition_text(&self) -> Option<String> {
        self.node.data.condition_text()
    }

    /// The media list of `@media` and `@import`.
    pub fn media(&self) -> Option<&'a MediaList> {
        match &self.node.data {
            RuleData::Media { media } => Some(media),
            RuleData::Import(import) => Some(&import.media),
            _ => None,
        }
    }

    /// The key text of a keyframe rule.
    pub fn key_text(&self) -> Option<String> {
        match &self.node.data {
            RuleData::Keyframe { selector } => Some(selector.to_string()),
            _ => None,
        }
    }

    /// The name of a named rule: `@keyframes`, `@counter-style`,
    /// `@property`, `@font-palette-values`, `@position-try`,
    /// `@color-profile`, a margin rule or an `@layer` block.
    ///
    /// An anonymous `@layer` block has the empty name.
    pub fn name(&self) -> Option<String> {
        match &self.node.data {
            RuleData::Keyframes { name }
            | RuleData::CounterStyle { name }
            | RuleData::Property { name }
            | RuleData::FontPaletteValues { name }
            | RuleData::PositionTry { name }
            | RuleData::ColorProfile { name } => Some(name.clone()),
            RuleData::Margin { .. } => self.node.data.margin_name().map(str::to_string),
            RuleData::LayerBlock { name } => {
                Some(name.as_ref().map(ToString::to_string).unwrap_or_default())
            }
            _ => None,
        }
    }

    /// The layer names of an `@layer` statement.
    pub fn name_list(&self) -> Option<Vec<String>> {
        match &self.node.data {
            RuleData::LayerStatement { names } => {
                Some(names.iter().map(ToString::to_string).collect())
            }
            _ => None,
        }
    }

    /// The prelude of an `@import` rule.
    pub fn import(&self) -> Option<&'a ImportRule> {
        match &self.node.data {
            RuleData::Import(import) => Some(import),
            _ => None,
        }
    }

    /// The prefix of an `@namespace` rule; the empty string for the default namespace.
    pub fn prefix(&self) -> Option<&'a str> {
        match &self.node.data {
            RuleData::Namespace { prefix, .. } => Some(prefix.as_deref().unwrap_or_default()),
            _ => None,
        }
    }

    /// The URI of an `@namespace` rule.
    pub fn namespace_uri(&self) -> Option<&'a str> {
        match &self.node.data {
            RuleData::Namespace { uri, .. } => Some(uri),
            _ => None,
        }
    }

    /// The scoping root selector text of `@scope`.
    pub fn scope_start(&self) -> Option<String> {
        match &self.node.data {
            RuleData::Scope { start, .. } => start.as_ref().map(ToString::to_string),
            _ => None,
        }
    }

    /// The scoping limit selector text of `@scope`.
    pub fn scope_end(&self) -> Option<String> {
        match &self.node.data {
            RuleData::Scope { end, .. } => end.as_ref().map(ToString::to_string),
            _ => None,
        }
    }

    /// The font family names of `@font-feature-values`.
    pub fn font_family(&self) -> Option<String> {
        match &self.node.data {
            RuleData::FontFeatureValues { families } => Some(
                families
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }

    /// The feature value map of one feature type of `@font-feature-values`,
    /// or of a feature value block itself.
    pub fn feature_values(&self, feature: FeatureType) -> Option<&'a FeatureValueMap> {
        let holds = |node: &'a RuleNode| match &node.data {
            RuleData::FontFeatureValueType { values } if values.feature() == feature => Some(values),
            _ => None,
        };
        match &self.node.data {
            RuleData::FontFeatureValues { .. } => self
                .node
                .children
                .iter()
                .filter_map(|&id| self.arena.get(id))
                .find_map(holds),
            _ => holds(self.node),
        }
    }
}
