//! Grammar table and context validation.
//!
//! Every statement produced by the splitter is classified here: the at-rule
//! name (or the qualified-rule position) selects a [`RuleKind`], the prelude
//! is matched against that kind's production, and the kind is checked
//! against the [`RuleContext`] it appears in.

mod conditions;
mod names;
mod ordering;
mod prelude;

pub use conditions::{MediaList, MediaQuery, parse_container_prelude, parse_supports_condition};
pub use names::{
    CSS_WIDE_KEYWORDS, FamilyName, FeatureType, KeyframeSelector, LayerName, MARGIN_BOXES,
    PageSelector, PageSelectorList, is_counter_style_name, is_custom_ident, is_dashed_ident,
    margin_index,
};
pub use ordering::TopLevelState;
pub use prelude::{parse_prelude, selector_mode};

use crate::syntax::{ContentMode, Statement};

/// The kind of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Style,
    Import,
    Namespace,
    LayerStatement,
    LayerBlock,
    Media,
    Supports,
    Container,
    Page,
    Margin,
    Keyframes,
    Keyframe,
    FontFace,
    FontFeatureValues,
    FontFeatureValueType,
    FontPaletteValues,
    CounterStyle,
    Property,
    PositionTry,
    Scope,
    StartingStyle,
    ColorProfile,
    ViewTransition,
}

impl RuleKind {
    /// A short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Style => "style",
            RuleKind::Import => "@import",
            RuleKind::Namespace => "@namespace",
            RuleKind::LayerStatement => "@layer statement",
            RuleKind::LayerBlock => "@layer block",
            RuleKind::Media => "@media",
            RuleKind::Supports => "@supports",
            RuleKind::Container => "@container",
            RuleKind::Page => "@page",
            RuleKind::Margin => "margin",
            RuleKind::Keyframes => "@keyframes",
            RuleKind::Keyframe => "keyframe",
            RuleKind::FontFace => "@font-face",
            RuleKind::FontFeatureValues => "@font-feature-values",
            RuleKind::FontFeatureValueType => "feature value block",
            RuleKind::FontPaletteValues => "@font-palette-values",
            RuleKind::CounterStyle => "@counter-style",
            RuleKind::Property => "@property",
            RuleKind::PositionTry => "@position-try",
            RuleKind::Scope => "@scope",
            RuleKind::StartingStyle => "@starting-style",
            RuleKind::ColorProfile => "@color-profile",
            RuleKind::ViewTransition => "@view-transition",
        }
    }

    /// Returns `true` for rules owning a list of child rules.
    pub fn has_child_rules(self) -> bool {
        matches!(
            self,
            RuleKind::Style
                | RuleKind::LayerBlock
                | RuleKind::Media
                | RuleKind::Supports
                | RuleKind::Container
                | RuleKind::Page
                | RuleKind::Keyframes
                | RuleKind::FontFeatureValues
                | RuleKind::Scope
                | RuleKind::StartingStyle
        )
    }

    /// Returns `true` for rules owning a declaration set.
    pub fn has_declarations(self) -> bool {
        matches!(
            self,
            RuleKind::Style
                | RuleKind::Page
                | RuleKind::Margin
                | RuleKind::Keyframe
                | RuleKind::FontFace
                | RuleKind::FontFeatureValues
                | RuleKind::FontPaletteValues
                | RuleKind::CounterStyle
                | RuleKind::Property
                | RuleKind::PositionTry
                | RuleKind::ColorProfile
                | RuleKind::ViewTransition
        )
    }

    /// Returns `true` for conditional and grouping rules whose block is a rule list.
    pub fn is_group(self) -> bool {
        matches!(
            self,
            RuleKind::LayerBlock
                | RuleKind::Media
                | RuleKind::Supports
                | RuleKind::Container
                | RuleKind::StartingStyle
        )
    }

    /// The context of this rule's block when the rule itself appears in `parent`.
    pub fn block_context(self, parent: RuleContext) -> RuleContext {
        match self {
            RuleKind::Style => RuleContext::StyleBlock,
            kind if kind.is_group() => match parent {
                RuleContext::StyleBlock | RuleContext::NestedGroup => RuleContext::NestedGroup,
                _ => RuleContext::Group,
            },
            RuleKind::Scope => RuleContext::Scope,
            RuleKind::Keyframes => RuleContext::Keyframes,
            RuleKind::Page => RuleContext::Page,
            RuleKind::FontFeatureValues => RuleContext::FontFeatureValues,
            _ => RuleContext::Declarations,
        }
    }
}

/// The kind of list a rule appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleContext {
    /// The top level of a stylesheet.
    Stylesheet,
    /// The block of a grouping rule outside of any style rule.
    Group,
    /// The block of a style rule.
    StyleBlock,
    /// The block of a grouping rule nested in a style rule.
    NestedGroup,
    /// The block of `@scope`.
    Scope,
    /// The block of `@keyframes`.
    Keyframes,
    /// The block of `@page`.
    Page,
    /// The block of `@font-feature-values`.
    FontFeatureValues,
    /// A block accepting declarations only.
    Declarations,
}

const STATEMENT_RULES: &[RuleKind] = &[
    RuleKind::Style,
    RuleKind::Import,
    RuleKind::Namespace,
    RuleKind::LayerStatement,
    RuleKind::LayerBlock,
    RuleKind::Media,
    RuleKind::Supports,
    RuleKind::Container,
    RuleKind::Page,
    RuleKind::Keyframes,
    RuleKind::FontFace,
    RuleKind::FontFeatureValues,
    RuleKind::FontPaletteValues,
    RuleKind::CounterStyle,
    RuleKind::Property,
    RuleKind::PositionTry,
    RuleKind::Scope,
    RuleKind::StartingStyle,
    RuleKind::ColorProfile,
    RuleKind::ViewTransition,
];

const NESTED_RULES: &[RuleKind] = &[
    RuleKind::Style,
    RuleKind::LayerStatement,
    RuleKind::LayerBlock,
    RuleKind::Media,
    RuleKind::Supports,
    RuleKind::Container,
    RuleKind::Scope,
    RuleKind::StartingStyle,
];

impl RuleContext {
    /// Returns `true` if rules of `kind` may appear in this context.
    pub fn allows(self, kind: RuleKind) -> bool {
        match self {
            RuleContext::Stylesheet => STATEMENT_RULES.contains(&kind),
            RuleContext::Group => {
                STATEMENT_RULES.contains(&kind)
                    && !matches!(kind, RuleKind::Import | RuleKind::Namespace)
            }
            RuleContext::StyleBlock | RuleContext::NestedGroup | RuleContext::Scope => {
                NESTED_RULES.contains(&kind)
            }
            RuleContext::Keyframes => kind == RuleKind::Keyframe,
            RuleContext::Page => kind == RuleKind::Margin,
            RuleContext::FontFeatureValues => kind == RuleKind::FontFeatureValueType,
            RuleContext::Declarations => false,
        }
    }

    /// How the contents of a block in this context are split.
    pub fn content_mode(self) -> ContentMode {
        match self {
            RuleContext::Stylesheet => ContentMode::Stylesheet,
            RuleContext::Group | RuleContext::Keyframes => ContentMode::RuleList,
            RuleContext::StyleBlock
            | RuleContext::NestedGroup
            | RuleContext::Scope
            | RuleContext::Page
            | RuleContext::FontFeatureValues
            | RuleContext::Declarations => ContentMode::Declarations,
        }
    }

    /// The kind of rule a qualified rule denotes in this context.
    pub fn qualified_rule_kind(self) -> Option<RuleKind> {
        match self {
            RuleContext::Stylesheet
            | RuleContext::Group
            | RuleContext::StyleBlock
            | RuleContext::NestedGroup
            | RuleContext::Scope => Some(RuleKind::Style),
            RuleContext::Keyframes => Some(RuleKind::Keyframe),
            _ => None,
        }
    }
}

/// Whether an at-rule takes a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockShape {
    Required(RuleKind),
    Forbidden(RuleKind),
    Either { block: RuleKind, statement: RuleKind },
}

/// At-rules known to the grammar, by lowercase name.
const AT_RULES: &[(&str, BlockShape)] = &[
    ("color-profile", BlockShape::Required(RuleKind::ColorProfile)),
    ("container", BlockShape::Required(RuleKind::Container)),
    ("counter-style", BlockShape::Required(RuleKind::CounterStyle)),
    ("font-face", BlockShape::Required(RuleKind::FontFace)),
    ("font-feature-values", BlockShape::Required(RuleKind::FontFeatureValues)),
    ("font-palette-values", BlockShape::Required(RuleKind::FontPaletteValues)),
    ("import", BlockShape::Forbidden(RuleKind::Import)),
    ("keyframes", BlockShape::Required(RuleKind::Keyframes)),
    (
        "layer",
        BlockShape::Either {
            block: RuleKind::LayerBlock,
            statement: RuleKind::LayerStatement,
        },
    ),
    ("media", BlockShape::Required(RuleKind::Media)),
    ("namespace", BlockShape::Forbidden(RuleKind::Namespace)),
    ("page", BlockShape::Required(RuleKind::Page)),
    ("position-try", BlockShape::Required(RuleKind::PositionTry)),
    ("property", BlockShape::Required(RuleKind::Property)),
    ("scope", BlockShape::Required(RuleKind::Scope)),
    ("starting-style", BlockShape::Required(RuleKind::StartingStyle)),
    ("supports", BlockShape::Required(RuleKind::Supports)),
    ("view-transition", BlockShape::Required(RuleKind::ViewTransition)),
    ("annotation", BlockShape::Required(RuleKind::FontFeatureValueType)),
    ("character-variant", BlockShape::Required(RuleKind::FontFeatureValueType)),
    ("ornaments", BlockShape::Required(RuleKind::FontFeatureValueType)),
    ("styleset", BlockShape::Required(RuleKind::FontFeatureValueType)),
    ("stylistic", BlockShape::Required(RuleKind::FontFeatureValueType)),
    ("swash", BlockShape::Required(RuleKind::FontFeatureValueType)),
];

/// At-rule names that are accepted with a vendor prefix.
const PREFIXED_AT_RULES: &[&str] = &["keyframes"];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-o-", "-ms-"];

/// Why a statement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `@charset`, which is recognized but never materialized.
    Ignored,
    /// The at-rule name is not recognized.
    UnknownRule,
    /// The block is missing where required, or present where forbidden.
    InvalidBlock,
    /// The prelude does not match the rule's production.
    InvalidPrelude,
    /// The rule is valid but not permitted in this context.
    NotAllowed,
    /// The rule is valid but not permitted at this position.
    InvalidPosition,
}

/// Normalize an at-rule name: lowercase it and strip a supported vendor prefix.
pub fn normalize_at_rule_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    for prefix in VENDOR_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix)
            && PREFIXED_AT_RULES.contains(&rest)
        {
            return rest.to_string();
        }
    }
    lower
}

/// Classify a statement into a rule kind, checking the block shape.
///
/// Qualified rules take their kind from `context`.
pub fn classify(statement: &Statement, context: RuleContext) -> Result<RuleKind, Rejection> {
    let Some(name) = &statement.name else {
        return context.qualified_rule_kind().ok_or(Rejection::NotAllowed);
    };

    let name = normalize_at_rule_name(name);
    if name == "charset" {
        return Err(Rejection::Ignored);
    }
    if margin_index(&name).is_some() {
        return match statement.block {
            Some(_) => Ok(RuleKind::Margin),
            None => Err(Rejection::InvalidBlock),
        };
    }

    let shape = AT_RULES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, shape)| *shape)
        .ok_or(Rejection::UnknownRule)?;

    match (shape, statement.block.is_some()) {
        (BlockShape::Required(kind), true) | (BlockShape::Forbidden(kind), false) => Ok(kind),
        (BlockShape::Either { block, .. }, true) => Ok(block),
        (BlockShape::Either { statement, .. }, false) => Ok(statement),
        _ => Err(Rejection::InvalidBlock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Statements, tokenize, BlockItem};

    fn statement(css: &str) -> Statement {
        let values = tokenize(css);
        match Statements::new(&values, ContentMode::Stylesheet).next() {
            Some(BlockItem::Rule(statement)) => statement,
            other => panic!("expected a rule, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_at_rules() {
        let top = RuleContext::Stylesheet;
        assert_eq!(classify(&statement("@MEDIA all {}"), top), Ok(RuleKind::Media));
        assert_eq!(classify(&statement("@layer a;"), top), Ok(RuleKind::LayerStatement));
        assert_eq!(classify(&statement("@layer a {}"), top), Ok(RuleKind::LayerBlock));
        assert_eq!(classify(&statement("@-webkit-keyframes x {}"), top), Ok(RuleKind::Keyframes));
        assert_eq!(classify(&statement("@top-left {}"), top), Ok(RuleKind::Margin));
        assert_eq!(classify(&statement("@charset \"utf-8\";"), top), Err(Rejection::Ignored));
        assert_eq!(classify(&statement("@unknown {}"), top), Err(Rejection::UnknownRule));
        assert_eq!(classify(&statement("@namespace ns {}"), top), Err(Rejection::InvalidBlock));
        assert_eq!(classify(&statement("@media all;"), top), Err(Rejection::InvalidBlock));
        assert_eq!(classify(&statement("@-webkit-media all {}"), top), Err(Rejection::UnknownRule));
    }

    #[test]
    fn test_qualified_rule_kind_depends_on_context() {
        let rule = statement("to {}");
        assert_eq!(classify(&rule, RuleContext::Keyframes), Ok(RuleKind::Keyframe));
        assert_eq!(classify(&rule, RuleContext::Group), Ok(RuleKind::Style));
        assert_eq!(classify(&rule, RuleContext::Page), Err(Rejection::NotAllowed));
    }

    #[test]
    fn test_context_whitelists() {
        assert!(RuleContext::Stylesheet.allows(RuleKind::Import));
        assert!(!RuleContext::Group.allows(RuleKind::Import));
        assert!(!RuleContext::Group.allows(RuleKind::Margin));
        assert!(RuleContext::StyleBlock.allows(RuleKind::Media));
        assert!(!RuleContext::StyleBlock.allows(RuleKind::Keyframes));
        assert!(RuleContext::Page.allows(RuleKind::Margin));
        assert!(!RuleContext::Declarations.allows(RuleKind::Style));
    }

    #[test]
    fn test_block_context() {
        assert_eq!(
            RuleKind::Media.block_context(RuleContext::Stylesheet),
            RuleContext::Group
        );
        assert_eq!(
            RuleKind::Media.block_context(RuleContext::StyleBlock),
            RuleContext::NestedGroup
        );
        assert_eq!(
            RuleKind::Keyframe.block_context(RuleContext::Keyframes),
            RuleContext::Declarations
        );
    }
}
