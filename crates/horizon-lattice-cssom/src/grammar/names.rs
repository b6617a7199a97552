//! Small prelude value types: identifiers, layer names, keyframe selectors,
//! page selectors, margin boxes, font families and feature types.

use std::fmt;

use crate::syntax::{
    ComponentValue, TokenCursor, identifier_to_css, split_commas, string_to_css, trim_whitespace,
};

/// Keywords valid as the value of any property, and never valid as a custom identifier.
pub const CSS_WIDE_KEYWORDS: &[&str] = &["initial", "inherit", "unset", "revert", "revert-layer"];

/// Returns `true` if `name` is a valid `<custom-ident>`.
pub fn is_custom_ident(name: &str) -> bool {
    !name.is_empty()
        && !CSS_WIDE_KEYWORDS
            .iter()
            .chain(&["default"])
            .any(|keyword| keyword.eq_ignore_ascii_case(name))
}

/// Returns `true` if `name` is a `<dashed-ident>`.
pub fn is_dashed_ident(name: &str) -> bool {
    name.len() > 2 && name.starts_with("--")
}

/// Returns `true` if `name` may name a `@counter-style` rule.
pub fn is_counter_style_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "none",
        "decimal",
        "disc",
        "square",
        "circle",
        "disclosure-open",
        "disclosure-closed",
    ];
    is_custom_ident(name) && !RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// A dotted cascade layer name (e.g. `base.reset`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerName(pub Vec<String>);

impl LayerName {
    /// Parse a layer name. No whitespace may separate its segments.
    pub fn parse(cursor: &mut TokenCursor<'_>) -> Option<Self> {
        cursor.try_parse(|cursor| {
            let first = cursor.expect_ident()?;
            if !is_custom_ident(first) {
                return None;
            }
            let mut segments = vec![first.to_string()];
            while matches!(cursor.peek_including_whitespace(), Some(ComponentValue::Delim('.'))) {
                cursor.next_including_whitespace();
                match cursor.next_including_whitespace()? {
                    ComponentValue::Ident(segment) if is_custom_ident(segment) => {
                        segments.push(segment.clone());
                    }
                    _ => return None,
                }
            }
            Some(Self(segments))
        })
    }

    /// Parse a value list consisting of exactly one layer name.
    pub fn parse_values(values: &[ComponentValue]) -> Option<Self> {
        let mut cursor = TokenCursor::new(values);
        let name = Self::parse(&mut cursor)?;
        cursor.expect_exhausted()?;
        Some(name)
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", identifier_to_css(segment))?;
        }
        Ok(())
    }
}

/// A keyframe selector list, as percentages in `0..=100`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSelector(pub Vec<f32>);

impl KeyframeSelector {
    /// Parse `from`, `to` and percentages, comma separated.
    pub fn parse(values: &[ComponentValue]) -> Option<Self> {
        let mut offsets = Vec::new();
        for item in split_commas(values) {
            let [value] = item else {
                return None;
            };
            let offset = match value {
                ComponentValue::Ident(keyword) if keyword.eq_ignore_ascii_case("from") => 0.0,
                ComponentValue::Ident(keyword) if keyword.eq_ignore_ascii_case("to") => 100.0,
                ComponentValue::Percentage {
                    int_value: Some(int),
                    ..
                } => *int as f32,
                ComponentValue::Percentage { unit_value, .. } => {
                    (unit_value * 100.0 * 10_000.0).round() / 10_000.0
                }
                _ => return None,
            };
            if !(0.0..=100.0).contains(&offset) {
                return None;
            }
            offsets.push(offset);
        }
        Some(Self(offsets))
    }

    /// Parse a keyframe selector from text.
    pub fn parse_text(text: &str) -> Option<Self> {
        Self::parse(&crate::syntax::tokenize(text))
    }
}

impl fmt::Display for KeyframeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, offset) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}%", offset)?;
        }
        Ok(())
    }
}

/// Page margin box names in canonical order.
pub const MARGIN_BOXES: [&str; 16] = [
    "top-left-corner",
    "top-left",
    "top-center",
    "top-right",
    "top-right-corner",
    "bottom-left-corner",
    "bottom-left",
    "bottom-center",
    "bottom-right",
    "bottom-right-corner",
    "left-top",
    "left-middle",
    "left-bottom",
    "right-top",
    "right-middle",
    "right-bottom",
];

/// The canonical position of a margin box name (ASCII case-insensitive).
pub fn margin_index(name: &str) -> Option<usize> {
    MARGIN_BOXES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A page selector (e.g. `intro:first`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelector {
    pub name: Option<String>,
    /// Lowercased page pseudo-classes (`left`, `right`, `first`, `blank`).
    pub pseudo_classes: Vec<String>,
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}", identifier_to_css(name))?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }
        Ok(())
    }
}

/// A possibly empty list of page selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSelectorList(pub Vec<PageSelector>);

impl PageSelectorList {
    const PSEUDO_PAGES: &'static [&'static str] = &["left", "right", "first", "blank"];

    /// Parse a page selector list. An empty prelude yields an empty list.
    pub fn parse(values: &[ComponentValue]) -> Option<Self> {
        if trim_whitespace(values).is_empty() {
            return Some(Self::default());
        }

        let mut selectors = Vec::new();
        for item in split_commas(values) {
            let mut cursor = TokenCursor::new(item);
            let name = match cursor.peek_including_whitespace() {
                Some(ComponentValue::Ident(name)) => {
                    cursor.next_including_whitespace();
                    Some(name.clone())
                }
                _ => None,
            };

            let mut pseudo_classes = Vec::new();
            while let Some(value) = cursor.next_including_whitespace() {
                let ComponentValue::Colon = value else {
                    return None;
                };
                let pseudo = cursor.next_including_whitespace()?.as_ident()?.to_ascii_lowercase();
                if !Self::PSEUDO_PAGES.contains(&pseudo.as_str()) {
                    return None;
                }
                pseudo_classes.push(pseudo);
            }

            if name.is_none() && pseudo_classes.is_empty() {
                return None;
            }
            selectors.push(PageSelector {
                name,
                pseudo_classes,
            });
        }
        Some(Self(selectors))
    }

    /// Returns `true` if the list has no selectors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PageSelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A font family name in a `@font-feature-values` prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    /// A quoted family name.
    Quoted(String),
    /// A sequence of identifiers, joined by single spaces.
    Unquoted(Vec<String>),
}

impl FamilyName {
    /// Parse a comma-separated, non-empty list of family names.
    pub fn parse_list(values: &[ComponentValue]) -> Option<Vec<Self>> {
        let mut families = Vec::new();
        for item in split_commas(values) {
            let family = match item {
                [ComponentValue::QuotedString(name)] => FamilyName::Quoted(name.clone()),
                _ => {
                    let mut idents = Vec::new();
                    for value in item.iter().filter(|value| !value.is_whitespace()) {
                        idents.push(value.as_ident()?.to_string());
                    }
                    let first = idents.first()?;
                    if idents.len() == 1 && !is_custom_ident(first) {
                        return None;
                    }
                    FamilyName::Unquoted(idents)
                }
            };
            families.push(family);
        }
        Some(families)
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyName::Quoted(name) => write!(f, "{}", string_to_css(name)),
            FamilyName::Unquoted(idents) => {
                for (i, ident) in idents.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", identifier_to_css(ident))?;
                }
                Ok(())
            }
        }
    }
}

/// A font feature type block of `@font-feature-values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureType {
    Annotation,
    CharacterVariant,
    Ornaments,
    Styleset,
    Stylistic,
    Swash,
}

impl FeatureType {
    /// All feature types in canonical order.
    pub const ALL: [FeatureType; 6] = [
        FeatureType::Annotation,
        FeatureType::CharacterVariant,
        FeatureType::Ornaments,
        FeatureType::Styleset,
        FeatureType::Stylistic,
        FeatureType::Swash,
    ];

    /// The at-rule name of this feature type.
    pub fn name(self) -> &'static str {
        match self {
            FeatureType::Annotation => "annotation",
            FeatureType::CharacterVariant => "character-variant",
            FeatureType::Ornaments => "ornaments",
            FeatureType::Styleset => "styleset",
            FeatureType::Stylistic => "stylistic",
            FeatureType::Swash => "swash",
        }
    }

    /// Look up a feature type by at-rule name (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name))
    }

    /// Returns `true` if `values` satisfies the arity and range of this feature type.
    pub fn accepts(self, values: &[u32]) -> bool {
        match self {
            FeatureType::Annotation
            | FeatureType::Ornaments
            | FeatureType::Stylistic
            | FeatureType::Swash => values.len() == 1 && values[0] <= 99,
            FeatureType::CharacterVariant => {
                values.len() == 2 && values.iter().all(|value| *value <= 99)
            }
            FeatureType::Styleset => !values.is_empty() && values.iter().all(|value| *value <= 20),
        }
    }
}
