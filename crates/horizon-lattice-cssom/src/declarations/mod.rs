//! Descriptor and declaration validation.
//!
//! Every rule kind that owns declarations validates them against a fixed
//! whitelist for its [`DeclarationContext`], delegates the value to a
//! [`ValueGrammar`], and stores at most one accepted value per name in a
//! [`DeclarationBlock`] that serializes in canonical order.

mod block;
mod descriptors;
mod features;
mod validator;
mod values;

pub use block::{DeclarationBlock, StoredDeclaration};
pub use descriptors::{PROPERTIES, PropertyDef, canonical_index, is_recognized};
pub use features::FeatureValueMap;
pub use validator::DeclarationValidator;
pub use values::{BasicValueGrammar, Validation, ValueGrammar, ValueKind};

use crate::grammar::RuleKind;

/// The declaration context of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationContext {
    /// Style rules and the groups nested in them.
    Style,
    /// Keyframe rules.
    Keyframe,
    /// `@page`.
    Page,
    /// Margin rules.
    Margin,
    /// `@font-face`.
    FontFace,
    /// `@font-feature-values`.
    FontFeatureValues,
    /// `@font-palette-values`.
    FontPaletteValues,
    /// `@counter-style`.
    CounterStyle,
    /// `@property`.
    Property,
    /// `@position-try`.
    PositionTry,
    /// `@color-profile`.
    ColorProfile,
    /// `@view-transition`.
    ViewTransition,
}

impl DeclarationContext {
    /// The declaration context of a rule kind's block.
    ///
    /// Grouping rules map to [`DeclarationContext::Style`]; they only
    /// carry declarations when nested in a style rule.
    pub fn for_rule(kind: RuleKind) -> Option<Self> {
        match kind {
            RuleKind::Style | RuleKind::Scope => Some(Self::Style),
            kind if kind.is_group() => Some(Self::Style),
            RuleKind::Keyframe => Some(Self::Keyframe),
            RuleKind::Page => Some(Self::Page),
            RuleKind::Margin => Some(Self::Margin),
            RuleKind::FontFace => Some(Self::FontFace),
            RuleKind::FontFeatureValues => Some(Self::FontFeatureValues),
            RuleKind::FontPaletteValues => Some(Self::FontPaletteValues),
            RuleKind::CounterStyle => Some(Self::CounterStyle),
            RuleKind::Property => Some(Self::Property),
            RuleKind::PositionTry => Some(Self::PositionTry),
            RuleKind::ColorProfile => Some(Self::ColorProfile),
            RuleKind::ViewTransition => Some(Self::ViewTransition),
            _ => None,
        }
    }

    /// Returns `true` for contexts holding properties rather than descriptors.
    pub fn is_property_context(self) -> bool {
        matches!(
            self,
            Self::Style | Self::Keyframe | Self::Page | Self::Margin | Self::PositionTry
        )
    }

    /// Returns `true` if `!important` is permitted.
    pub fn accepts_important(self) -> bool {
        matches!(self, Self::Style | Self::Page | Self::Margin)
    }

    /// Returns `true` if custom properties are permitted.
    pub fn accepts_custom_properties(self) -> bool {
        matches!(self, Self::Style | Self::Keyframe | Self::Page | Self::Margin)
    }

    /// Canonical form of a declaration name: custom properties keep their
    /// case, everything else is lowercased.
    pub fn canonical_name(name: &str) -> String {
        if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }
}
