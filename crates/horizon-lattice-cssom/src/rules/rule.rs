//! Rule variants and rule nodes.

use crate::declarations::{DeclarationBlock, FeatureValueMap};
use crate::grammar::{
    FamilyName, KeyframeSelector, LayerName, MARGIN_BOXES, MediaList, PageSelectorList,
    RuleContext, RuleKind,
};
use crate::selector::SelectorList;

use super::arena::RuleId;

/// The layer clause of an `@import` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportLayer {
    /// `layer`
    Anonymous,
    /// `layer(name)`
    Named(LayerName),
}

/// The prelude of an `@import` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRule {
    /// The URL of the imported stylesheet.
    pub href: String,
    /// The cascade layer the import is placed in.
    pub layer: Option<ImportLayer>,
    /// The `supports()` condition.
    pub supports: Option<String>,
    /// The media query list.
    pub media: MediaList,
}

impl ImportRule {
    /// The layer name: the empty string for an anonymous layer, `None`
    /// without a layer clause.
    pub fn layer_name(&self) -> Option<String> {
        match &self.layer {
            None => None,
            Some(ImportLayer::Anonymous) => Some(String::new()),
            Some(ImportLayer::Named(name)) => Some(name.to_string()),
        }
    }

    /// The `supports()` condition text.
    pub fn supports_text(&self) -> Option<&str> {
        self.supports.as_deref()
    }
}

/// Variant-specific data of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleData {
    Style {
        selectors: SelectorList,
    },
    Import(ImportRule),
    Namespace {
        prefix: Option<String>,
        uri: String,
    },
    LayerStatement {
        names: Vec<LayerName>,
    },
    LayerBlock {
        name: Option<LayerName>,
    },
    Media {
        media: MediaList,
    },
    Supports {
        condition: String,
    },
    Container {
        name: Option<String>,
        query: Option<String>,
    },
    Page {
        selectors: PageSelectorList,
    },
    /// A margin box of `@page`; the index into [`MARGIN_BOXES`].
    Margin {
        index: usize,
    },
    Keyframes {
        name: String,
    },
    Keyframe {
        selector: KeyframeSelector,
    },
    FontFace,
    FontFeatureValues {
        families: Vec<FamilyName>,
    },
    FontFeatureValueType {
        values: FeatureValueMap,
    },
    FontPaletteValues {
        name: String,
    },
    CounterStyle {
        name: String,
    },
    Property {
        name: String,
    },
    PositionTry {
        name: String,
    },
    Scope {
        start: Option<SelectorList>,
        end: Option<SelectorList>,
    },
    StartingStyle,
    ColorProfile {
        name: String,
    },
    ViewTransition,
}

impl RuleData {
    /// The kind of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleData::Style { .. } => RuleKind::Style,
            RuleData::Import(_) => RuleKind::Import,
            RuleData::Namespace { .. } => RuleKind::Namespace,
            RuleData::LayerStatement { .. } => RuleKind::LayerStatement,
            RuleData::LayerBlock { .. } => RuleKind::LayerBlock,
            RuleData::Media { .. } => RuleKind::Media,
            RuleData::Supports { .. } => RuleKind::Supports,
            RuleData::Container { .. } => RuleKind::Container,
            RuleData::Page { .. } => RuleKind::Page,
            RuleData::Margin { .. } => RuleKind::Margin,
            RuleData::Keyframes { .. } => RuleKind::Keyframes,
            RuleData::Keyframe { .. } => RuleKind::Keyframe,
            RuleData::FontFace => RuleKind::FontFace,
            RuleData::FontFeatureValues { .. } => RuleKind::FontFeatureValues,
            RuleData::FontFeatureValueType { .. } => RuleKind::FontFeatureValueType,
            RuleData::FontPaletteValues { .. } => RuleKind::FontPaletteValues,
            RuleData::CounterStyle { .. } => RuleKind::CounterStyle,
            RuleData::Property { .. } => RuleKind::Property,
            RuleData::PositionTry { .. } => RuleKind::PositionTry,
            RuleData::Scope { .. } => RuleKind::Scope,
            RuleData::StartingStyle => RuleKind::StartingStyle,
            RuleData::ColorProfile { .. } => RuleKind::ColorProfile,
            RuleData::ViewTransition => RuleKind::ViewTransition,
        }
    }

    /// The margin box name of a margin rule.
    pub fn margin_name(&self) -> Option<&'static str> {
        match self {
            RuleData::Margin { index } => MARGIN_BOXES.get(*index).copied(),
            _ => None,
        }
    }

    /// The condition text of a conditional rule.
    pub fn condition_text(&self) -> Option<String> {
        match self {
            RuleData::Media { media } => Some(media.media_text()),
            RuleData::Supports { condition } => Some(condition.clone()),
            RuleData::Container { name, query } => Some(
                [name.as_deref(), query.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        }
    }
}

/// A rule stored in a [`super::RuleArena`].
#[derive(Debug, Clone, PartialEq)]
pub struct RuleNode {
    /// Variant-specific data.
    pub data: RuleData,
    /// The declaration set, for kinds that own one.
    pub declarations: Option<DeclarationBlock>,
    /// The context of the list the rule appears in.
    pub context: RuleContext,
    /// The parent rule; `None` at the top level and when detached.
    pub parent: Option<RuleId>,
    /// Child rules in list order.
    pub children: Vec<RuleId>,
}

impl RuleNode {
    /// Create an unattached node.
    pub fn new(data: RuleData, declarations: Option<DeclarationBlock>, context: RuleContext) -> Self {
        Self {
            data,
            declarations,
            context,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The kind of this rule.
    pub fn kind(&self) -> RuleKind {
        self.data.kind()
    }

    /// The context of this rule's own block.
    pub fn block_context(&self) -> RuleContext {
        self.kind().block_context(self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::MediaList;

    #[test]
    fn test_condition_text() {
        let media = RuleData::Media {
            media: MediaList::parse_text("screen, print"),
        };
        assert_eq!(media.condition_text().as_deref(), Some("screen, print"));

        let container = RuleData::Container {
            name: Some("sidebar".into()),
            query: Some("(min-width: 400px)".into()),
        };
        assert_eq!(
            container.condition_text().as_deref(),
            Some("sidebar (min-width: 400px)")
        );
        assert_eq!(RuleData::FontFace.condition_text(), None);
    }

    #[test]
    fn test_margin_name_and_block_context() {
        let margin = RuleData::Margin { index: 0 };
        assert_eq!(margin.margin_name(), Some(MARGIN_BOXES[0]));

        let node = RuleNode::new(
            RuleData::Media {
                media: MediaList::default(),
            },
            None,
            RuleContext::StyleBlock,
        );
        assert_eq!(node.kind(), RuleKind::Media);
        assert_eq!(node.block_context(), RuleContext::NestedGroup);
    }
}
