//! The value-grammar seam and the bundled reference value grammar.
//!
//! Whether a value is acceptable for a property or descriptor is decided by
//! a [`ValueGrammar`]. The stylesheet model only relies on the verdict and on
//! the canonical text returned with it. [`BasicValueGrammar`] checks values
//! against coarse value kinds; it is not a complete CSS value engine.

use std::fmt;

use super::DeclarationContext;
use super::descriptors;
use crate::grammar::{CSS_WIDE_KEYWORDS, is_custom_ident, is_dashed_ident};
use crate::syntax::{ComponentValue, TokenCursor, serialize_values, trim_whitespace};

/// Verdict of a value grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value is valid; carries its canonical text.
    Accepted(String),
    /// The value is invalid.
    Rejected,
}

/// An external value-grammar engine.
pub trait ValueGrammar: Send + Sync + fmt::Debug {
    /// Validate `value` for the property or descriptor `name` (canonical case)
    /// in `context`.
    fn validate(&self, name: &str, context: DeclarationContext, value: &[ComponentValue]) -> Validation;
}

/// Coarse value kinds understood by [`BasicValueGrammar`].
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// Any non-empty run of component values.
    Any,
    /// One keyword from the list.
    Keyword(&'static [&'static str]),
    /// A color.
    Color,
    /// A length, a percentage, or a keyword from the list.
    LengthPercentage(&'static [&'static str]),
    /// A non-negative length or percentage, or a keyword from the list.
    NonNegativeLengthPercentage(&'static [&'static str]),
    /// A length or a keyword from the list.
    Length(&'static [&'static str]),
    /// A percentage.
    Percentage,
    /// A number or a keyword from the list.
    Number(&'static [&'static str]),
    /// An integer or a keyword from the list.
    Integer(&'static [&'static str]),
    /// A time.
    Time,
    /// A quoted string.
    String,
    /// A URL.
    Url,
    /// A `<custom-ident>` that is none of the listed keywords.
    CustomIdent(&'static [&'static str]),
    /// A `<dashed-ident>`.
    DashedIdent,
    /// A list of font family names.
    FamilyList,
    /// `@font-face` sources.
    FontSources,
    /// Unicode ranges.
    UnicodeRange,
    /// Generated content.
    Content,
    /// The `system` descriptor of `@counter-style`.
    CounterSystem,
    /// One value of either kind.
    Either(&'static ValueKind, &'static ValueKind),
    /// One up to `n` whitespace-separated values.
    Repeat(&'static ValueKind, usize),
    /// One or more comma-separated values.
    CommaList(&'static ValueKind),
}

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "rex", "ch", "rch", "cap", "rcap", "ic", "ric", "lh", "rlh", "vw",
    "vh", "vi", "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw", "cqh",
    "cqi", "cqb", "cqmin", "cqmax", "cm", "mm", "q", "in", "pt", "pc",
];

const MATH_FUNCTIONS: &[&str] = &[
    "calc", "min", "max", "clamp", "round", "mod", "rem", "abs", "sign", "anchor",
    "anchor-size",
];

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
    "color-mix", "light-dark", "contrast-color", "device-cmyk",
];

const NAMED_COLORS: &[&str] = &[
    "aqua", "beige", "black", "blue", "brown", "chocolate", "coral", "crimson", "currentcolor",
    "cyan", "darkblue", "darkgreen", "darkred", "fuchsia", "gold", "gray", "green", "grey",
    "indigo", "ivory", "khaki", "lavender", "lightblue", "lightgray", "lightgreen", "lime",
    "magenta", "maroon", "navy", "olive", "orange", "orchid", "pink", "plum", "purple",
    "rebeccapurple", "red", "salmon", "silver", "skyblue", "steelblue", "tan", "teal",
    "tomato", "transparent", "turquoise", "violet", "white", "yellow",
];

const SUBSTITUTION_FUNCTIONS: &[&str] = &["var", "env", "attr", "if", "inherit"];

fn keyword(cursor: &mut TokenCursor<'_>, keywords: &[&str]) -> Option<String> {
    cursor.try_parse(|cursor| {
        let ident = cursor.next()?.as_ident()?;
        keywords
            .iter()
            .find(|keyword| keyword.eq_ignore_ascii_case(ident))
            .map(|keyword| keyword.to_string())
    })
}

fn function_text(value: &ComponentValue) -> String {
    match value {
        ComponentValue::Function { name, arguments } => {
            format!("{}({})", name.to_ascii_lowercase(), serialize_values(arguments))
        }
        other => other.to_string(),
    }
}

fn is_function_in(value: &ComponentValue, names: &[&str]) -> bool {
    names.iter().any(|name| value.is_function(name))
}

fn is_zero(value: f32) -> bool {
    value == 0.0
}

impl ValueKind {
    /// Consume one value of this kind, returning its canonical text.
    pub fn parse(&self, cursor: &mut TokenCursor<'_>) -> Option<String> {
        cursor.try_parse(|cursor| self.parse_inner(cursor))
    }

    fn parse_inner(&self, cursor: &mut TokenCursor<'_>) -> Option<String> {
        match self {
            ValueKind::Any => {
                let rest = trim_whitespace(cursor.take_rest());
                (!rest.is_empty()).then(|| serialize_values(rest))
            }
            ValueKind::Keyword(keywords) => keyword(cursor, keywords),
            ValueKind::Color => {
                if let Some(name) = keyword(cursor, NAMED_COLORS) {
                    return Some(name);
                }
                let value = cursor.next()?;
                match value {
                    ComponentValue::Hash(hex) | ComponentValue::IdHash(hex)
                        if matches!(hex.len(), 3 | 4 | 6 | 8)
                            && hex.bytes().all(|byte| byte.is_ascii_hexdigit()) =>
                    {
                        Some(format!("#{}", hex.to_ascii_lowercase()))
                    }
                    value if is_function_in(value, COLOR_FUNCTIONS) => Some(function_text(value)),
                    _ => None,
                }
            }
            ValueKind::LengthPercentage(keywords) => numeric(cursor, keywords, true, true),
            ValueKind::NonNegativeLengthPercentage(keywords) => numeric(cursor, keywords, true, false),
            ValueKind::Length(keywords) => numeric(cursor, keywords, false, true),
            ValueKind::Percentage => match cursor.next()? {
                value @ ComponentValue::Percentage { .. } => Some(value.to_string()),
                value if is_function_in(value, MATH_FUNCTIONS) => Some(function_text(value)),
                _ => None,
            },
            ValueKind::Number(keywords) => {
                if let Some(keyword) = keyword(cursor, keywords) {
                    return Some(keyword);
                }
                match cursor.next()? {
                    value @ ComponentValue::Number { .. } => Some(value.to_string()),
                    value if is_function_in(value, MATH_FUNCTIONS) => Some(function_text(value)),
                    _ => None,
                }
            }
            ValueKind::Integer(keywords) => {
                if let Some(keyword) = keyword(cursor, keywords) {
                    return Some(keyword);
                }
                match cursor.next()? {
                    value @ ComponentValue::Number {
                        int_value: Some(_), ..
                    } => Some(value.to_string()),
                    value if is_function_in(value, MATH_FUNCTIONS) => Some(function_text(value)),
                    _ => None,
                }
            }
            ValueKind::Time => match cursor.next()? {
                value @ ComponentValue::Dimension { unit, .. }
                    if unit.eq_ignore_ascii_case("s") || unit.eq_ignore_ascii_case("ms") =>
                {
                    Some(value.to_string())
                }
                value if is_function_in(value, MATH_FUNCTIONS) => Some(function_text(value)),
                _ => None,
            },
            ValueKind::String => match cursor.next()? {
                value @ ComponentValue::QuotedString(_) => Some(value.to_string()),
                _ => None,
            },
            ValueKind::Url => {
                let value = cursor.next()?;
                value.as_url().map(crate::syntax::url_to_css)
            }
            ValueKind::CustomIdent(excluded) => {
                let ident = cursor.next()?.as_ident()?;
                let excluded = excluded.iter().any(|keyword| keyword.eq_ignore_ascii_case(ident));
                (is_custom_ident(ident) && !excluded).then(|| crate::syntax::identifier_to_css(ident))
            }
            ValueKind::DashedIdent => {
                let ident = cursor.next()?.as_ident()?;
                is_dashed_ident(ident).then(|| crate::syntax::identifier_to_css(ident))
            }
            ValueKind::FamilyList => {
                let rest = cursor.take_rest();
                crate::grammar::FamilyName::parse_list(rest).map(|families| {
                    families
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
            }
            ValueKind::FontSources => {
                let mut sources = Vec::new();
                for item in crate::syntax::split_commas(cursor.take_rest()) {
                    sources.push(font_source(item)?);
                }
                Some(sources.join(", "))
            }
            ValueKind::UnicodeRange => {
                let rest = trim_whitespace(cursor.take_rest());
                let valid = !rest.is_empty()
                    && crate::syntax::split_commas(rest).iter().all(|range| {
                        range
                            .first()
                            .and_then(ComponentValue::as_ident)
                            .is_some_and(|ident| ident.starts_with(['u', 'U']))
                    });
                valid.then(|| serialize_values(rest))
            }
            ValueKind::Content => {
                if let Some(keyword) = keyword(cursor, &["normal", "none"]) {
                    return Some(keyword);
                }
                let rest = trim_whitespace(cursor.take_rest());
                let valid = !rest.is_empty()
                    && rest.iter().all(|value| {
                        matches!(
                            value,
                            ComponentValue::QuotedString(_)
                                | ComponentValue::Url(_)
                                | ComponentValue::Function { .. }
                                | ComponentValue::Ident(_)
                                | ComponentValue::WhiteSpace
                                | ComponentValue::Delim('/')
                        )
                    });
                valid.then(|| serialize_values(rest))
            }
            ValueKind::CounterSystem => {
                if let Some(keyword) =
                    keyword(cursor, &["cyclic", "numeric", "alphabetic", "symbolic", "additive"])
                {
                    return Some(keyword);
                }
                if keyword(cursor, &["fixed"]).is_some() {
                    return match ValueKind::Integer(&[]).parse(cursor) {
                        Some(first) => Some(format!("fixed {first}")),
                        None => Some("fixed".to_string()),
                    };
                }
                keyword(cursor, &["extends"])?;
                let name = ValueKind::CustomIdent(&["none"]).parse(cursor)?;
                Some(format!("extends {name}"))
            }
            ValueKind::Either(first, second) => first.parse(cursor).or_else(|| second.parse(cursor)),
            ValueKind::Repeat(inner, max) => {
                let mut parts = vec![inner.parse(cursor)?];
                while parts.len() < *max {
                    match inner.parse(cursor) {
                        Some(part) => parts.push(part),
                        None => break,
                    }
                }
                Some(parts.join(" "))
            }
            ValueKind::CommaList(inner) => {
                let mut parts = vec![inner.parse(cursor)?];
                while matches!(cursor.peek(), Some(ComponentValue::Comma)) {
                    cursor.next();
                    parts.push(inner.parse(cursor)?);
                }
                Some(parts.join(", "))
            }
        }
    }

    /// Validate a complete value against this kind.
    pub fn validate(&self, value: &[ComponentValue]) -> Option<String> {
        let mut cursor = TokenCursor::new(value);
        let text = self.parse(&mut cursor)?;
        cursor.expect_exhausted()?;
        Some(text)
    }
}

fn numeric(
    cursor: &mut TokenCursor<'_>,
    keywords: &[&str],
    percentage: bool,
    negative: bool,
) -> Option<String> {
    if let Some(keyword) = keyword(cursor, keywords) {
        return Some(keyword);
    }
    match cursor.next()? {
        value @ ComponentValue::Dimension { value: number, unit, .. }
            if LENGTH_UNITS.iter().any(|known| known.eq_ignore_ascii_case(unit))
                && (negative || *number >= 0.0) =>
        {
            Some(value.to_string())
        }
        value @ ComponentValue::Percentage { unit_value, .. }
            if percentage && (negative || *unit_value >= 0.0) =>
        {
            Some(value.to_string())
        }
        ComponentValue::Number { value, .. } if is_zero(*value) => Some("0".to_string()),
        value if is_function_in(value, MATH_FUNCTIONS) => Some(function_text(value)),
        _ => None,
    }
}

fn font_source(values: &[ComponentValue]) -> Option<String> {
    let mut cursor = TokenCursor::new(values);
    let first = cursor.next()?;

    if first.is_function("local") {
        cursor.expect_exhausted()?;
        return Some(function_text(first));
    }

    let mut parts = vec![crate::syntax::url_to_css(first.as_url()?)];
    while let Some(value) = cursor.next() {
        if !(value.is_function("format") || value.is_function("tech")) {
            return None;
        }
        parts.push(function_text(value));
    }
    Some(parts.join(" "))
}

/// The bundled reference value grammar.
///
/// Values are checked against the coarse [`ValueKind`] registered for each
/// property and descriptor. In property contexts, CSS-wide keywords are
/// accepted on their own, values referencing `var()` and similar functions
/// are accepted as written, and custom properties accept anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicValueGrammar;

impl ValueGrammar for BasicValueGrammar {
    fn validate(&self, name: &str, context: DeclarationContext, value: &[ComponentValue]) -> Validation {
        let value = trim_whitespace(value);

        if name.starts_with("--") {
            return Validation::Accepted(serialize_values(value));
        }

        if value.is_empty() {
            return Validation::Rejected;
        }

        if context.is_property_context() {
            if let [ComponentValue::Ident(ident)] = value
                && CSS_WIDE_KEYWORDS
                    .iter()
                    .any(|keyword| keyword.eq_ignore_ascii_case(ident))
            {
                return Validation::Accepted(ident.to_ascii_lowercase());
            }

            let substituted = value.iter().any(|component| {
                component.any(&|nested| is_function_in(nested, SUBSTITUTION_FUNCTIONS))
            });
            if substituted {
                return Validation::Accepted(serialize_values(value));
            }
        }

        match descriptors::value_kind(context, name).and_then(|kind| kind.validate(value)) {
            Some(text) => Validation::Accepted(text),
            None => Validation::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    fn check(kind: ValueKind, text: &str) -> Option<String> {
        kind.validate(&tokenize(text))
    }

    #[test]
    fn test_numeric_kinds() {
        assert_eq!(check(ValueKind::LengthPercentage(&["auto"]), "1px").as_deref(), Some("1px"));
        assert_eq!(check(ValueKind::LengthPercentage(&["auto"]), "AUTO").as_deref(), Some("auto"));
        assert_eq!(check(ValueKind::LengthPercentage(&[]), "-50%").as_deref(), Some("-50%"));
        assert!(check(ValueKind::NonNegativeLengthPercentage(&[]), "-1px").is_none());
        assert!(check(ValueKind::Length(&[]), "50%").is_none());
        assert_eq!(check(ValueKind::Length(&[]), "0").as_deref(), Some("0"));
        assert!(check(ValueKind::Length(&[]), "invalid").is_none());
        assert_eq!(
            check(ValueKind::Length(&[]), "calc( 1px + 2em )").as_deref(),
            Some("calc(1px + 2em)")
        );
    }

    #[test]
    fn test_colors() {
        assert_eq!(check(ValueKind::Color, "Green").as_deref(), Some("green"));
        assert_eq!(check(ValueKind::Color, "#ABC").as_deref(), Some("#abc"));
        assert!(check(ValueKind::Color, "#abcde").is_none());
        assert_eq!(
            check(ValueKind::Color, "RGB(0,0,0)").as_deref(),
            Some("rgb(0, 0, 0)")
        );
        assert!(check(ValueKind::Color, "invalid").is_none());
    }

    #[test]
    fn test_composite_kinds() {
        const LENGTH: ValueKind = ValueKind::LengthPercentage(&["auto"]);
        assert_eq!(
            check(ValueKind::Repeat(&LENGTH, 4), "1px  auto 2px").as_deref(),
            Some("1px auto 2px")
        );
        assert!(check(ValueKind::Repeat(&LENGTH, 2), "1px 2px 3px").is_none());
        assert_eq!(
            check(ValueKind::CommaList(&ValueKind::Time), "1s,200ms").as_deref(),
            Some("1s, 200ms")
        );
    }

    #[test]
    fn test_font_sources() {
        assert_eq!(
            check(ValueKind::FontSources, "url(serif.woff2) format(\"woff2\"), local(Serif)")
                .as_deref(),
            Some("url(\"serif.woff2\") format(\"woff2\"), local(Serif)")
        );
        assert!(check(ValueKind::FontSources, "serif").is_none());
    }

    #[test]
    fn test_counter_system() {
        assert_eq!(check(ValueKind::CounterSystem, "fixed 1").as_deref(), Some("fixed 1"));
        assert_eq!(check(ValueKind::CounterSystem, "CYCLIC").as_deref(), Some("cyclic"));
        assert_eq!(
            check(ValueKind::CounterSystem, "extends decimal").as_deref(),
            Some("extends decimal")
        );
        assert!(check(ValueKind::CounterSystem, "extends none").is_none());
    }

    #[test]
    fn test_basic_grammar_property_rules() {
        let grammar = BasicValueGrammar;
        let style = DeclarationContext::Style;
        assert_eq!(
            grammar.validate("color", style, &tokenize("INHERIT")),
            Validation::Accepted("inherit".into())
        );
        assert_eq!(
            grammar.validate("top", style, &tokenize("var(--gap)")),
            Validation::Accepted("var(--gap)".into())
        );
        assert_eq!(grammar.validate("top", style, &tokenize("invalid")), Validation::Rejected);
        assert_eq!(
            grammar.validate("--custom", style, &tokenize(" { a } ")),
            Validation::Accepted("{a}".into())
        );
        assert_eq!(
            grammar.validate("system", DeclarationContext::CounterStyle, &tokenize("inherit")),
            Validation::Rejected
        );
    }
}
