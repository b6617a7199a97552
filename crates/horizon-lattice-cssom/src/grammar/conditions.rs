//! Media queries, `@supports` conditions and `@container` queries.
//!
//! Conditions are validated and kept in their canonical text form: keywords
//! lowercased, whitespace normalized.

use std::fmt;

use super::names::is_custom_ident;
use crate::syntax::{
    ComponentValue, TokenCursor, parse_declaration, serialize_values, split_commas, tokenize,
    trim_whitespace,
};

/// Parses one `<*-in-parens>` term, returning its canonical text.
type InParens<'f> = &'f dyn Fn(&ComponentValue) -> Option<String>;

/// Parse `not <in-parens>` or `<in-parens> [ and <in-parens> ]*` (or the
/// same with `or` when `allow_or` is set). Mixing `and` and `or` is invalid.
fn parse_condition(cursor: &mut TokenCursor<'_>, in_parens: InParens<'_>, allow_or: bool) -> Option<String> {
    cursor.try_parse(|cursor| {
        if cursor.expect_keyword("not").is_some() {
            let term = in_parens(cursor.next()?)?;
            return Some(format!("not {term}"));
        }

        let mut text = in_parens(cursor.next()?)?;
        let mut operator: Option<&str> = None;
        loop {
            let keyword = if cursor.expect_keyword("and").is_some() {
                "and"
            } else if allow_or && cursor.expect_keyword("or").is_some() {
                "or"
            } else {
                break;
            };
            if operator.is_some_and(|previous| previous != keyword) {
                return None;
            }
            operator = Some(keyword);
            let term = in_parens(cursor.next()?)?;
            text = format!("{text} {keyword} {term}");
        }
        Some(text)
    })
}

/// Parse a complete condition from a block's contents.
fn parse_whole_condition(values: &[ComponentValue], in_parens: InParens<'_>) -> Option<String> {
    let mut cursor = TokenCursor::new(values);
    let condition = parse_condition(&mut cursor, in_parens, true)?;
    cursor.expect_exhausted()?;
    Some(condition)
}

/// `<general-enclosed>`: a function or parenthesized block with arbitrary contents.
fn general_enclosed(value: &ComponentValue) -> Option<String> {
    match value {
        ComponentValue::Function { .. } | ComponentValue::ParenthesisBlock(_) => {
            Some(serialize_values(std::slice::from_ref(value)))
        }
        _ => None,
    }
}

/// A media feature or range: `(name)`, `(name: value)`, `(width >= 600px)`.
fn media_feature(values: &[ComponentValue]) -> Option<String> {
    let values = trim_whitespace(values);
    match values {
        [ComponentValue::Ident(name)] => return Some(format!("({})", name.to_ascii_lowercase())),
        [] => return None,
        _ => {}
    }

    if let Some(declaration) = parse_declaration(values) {
        if declaration.important || declaration.value.is_empty() {
            return None;
        }
        return Some(format!(
            "({}: {})",
            declaration.name.to_ascii_lowercase(),
            serialize_values(&declaration.value)
        ));
    }

    let comparison = values
        .iter()
        .any(|value| matches!(value, ComponentValue::Delim('<' | '>' | '=')));
    let has_name = values.iter().any(|value| value.as_ident().is_some());
    if comparison && has_name {
        Some(format!("({})", serialize_values(values)))
    } else {
        None
    }
}

fn media_in_parens(value: &ComponentValue) -> Option<String> {
    match value {
        ComponentValue::ParenthesisBlock(inner) => {
            if let Some(condition) = parse_whole_condition(inner, &media_in_parens) {
                return Some(format!("({condition})"));
            }
            media_feature(inner).or_else(|| general_enclosed(value))
        }
        ComponentValue::Function { .. } => general_enclosed(value),
        _ => None,
    }
}

/// A single media query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaQuery {
    /// A valid query in canonical form.
    Valid(String),
    /// An invalid query, which matches nothing.
    Invalid,
}

impl MediaQuery {
    const RESERVED_TYPES: &'static [&'static str] = &["only", "not", "and", "or", "layer"];

    /// Parse one media query.
    pub fn parse(values: &[ComponentValue]) -> Self {
        Self::parse_valid(values).map_or(Self::Invalid, Self::Valid)
    }

    fn parse_valid(values: &[ComponentValue]) -> Option<String> {
        let mut cursor = TokenCursor::new(values);
        if cursor.is_exhausted() {
            return None;
        }

        if let Some(condition) = cursor.try_parse(|cursor| {
            let condition = parse_condition(cursor, &media_in_parens, true)?;
            cursor.expect_exhausted()?;
            Some(condition)
        }) {
            return Some(condition);
        }

        let modifier = ["not", "only"]
            .into_iter()
            .find(|modifier| cursor.expect_keyword(modifier).is_some());
        let media_type = cursor.expect_ident()?.to_ascii_lowercase();
        if Self::RESERVED_TYPES.contains(&media_type.as_str()) {
            return None;
        }

        let mut text = match modifier {
            Some(modifier) => format!("{modifier} {media_type}"),
            None => media_type,
        };

        if cursor.is_exhausted() {
            return Some(text);
        }

        cursor.expect_keyword("and")?;
        let condition = parse_condition(&mut cursor, &media_in_parens, false)?;
        cursor.expect_exhausted()?;
        text.push_str(" and ");
        text.push_str(&condition);
        Some(text)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaQuery::Valid(text) => write!(f, "{}", text),
            MediaQuery::Invalid => write!(f, "not all"),
        }
    }
}

/// A media query list. An empty list matches all media.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaList(pub Vec<MediaQuery>);

impl MediaList {
    /// Parse a comma-separated media query list. Invalid queries become `not all`.
    pub fn parse(values: &[ComponentValue]) -> Self {
        if trim_whitespace(values).is_empty() {
            return Self::default();
        }
        Self(split_commas(values).into_iter().map(MediaQuery::parse).collect())
    }

    /// Parse a media query list from text.
    pub fn parse_text(text: &str) -> Self {
        Self::parse(&tokenize(text))
    }

    /// The canonical text of the list.
    pub fn media_text(&self) -> String {
        self.to_string()
    }

    /// Number of queries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no queries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical text of the query at `index`.
    pub fn item(&self, index: usize) -> Option<String> {
        self.0.get(index).map(ToString::to_string)
    }

    /// Append a query unless it is invalid or already present.
    pub fn append_medium(&mut self, text: &str) {
        let query = MediaQuery::parse(&tokenize(text));
        if query != MediaQuery::Invalid && !self.0.contains(&query) {
            self.0.push(query);
        }
    }

    /// Remove every occurrence of a query. Returns `false` if none was found.
    pub fn delete_medium(&mut self, text: &str) -> bool {
        let query = MediaQuery::parse(&tokenize(text));
        let before = self.0.len();
        self.0.retain(|existing| *existing != query);
        self.0.len() != before
    }
}

impl fmt::Display for MediaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, query) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", query)?;
        }
        Ok(())
    }
}

fn supports_in_parens(value: &ComponentValue) -> Option<String> {
    match value {
        ComponentValue::ParenthesisBlock(inner) => {
            if let Some(condition) = parse_whole_condition(inner, &supports_in_parens) {
                return Some(format!("({condition})"));
            }
            if let Some(declaration) = supports_declaration(inner) {
                return Some(format!("({declaration})"));
            }
            general_enclosed(value)
        }
        ComponentValue::Function { .. } => general_enclosed(value),
        _ => None,
    }
}

fn supports_declaration(values: &[ComponentValue]) -> Option<String> {
    let declaration = parse_declaration(trim_whitespace(values))?;
    let name = if declaration.name.starts_with("--") {
        declaration.name
    } else {
        declaration.name.to_ascii_lowercase()
    };
    let mut text = format!("{}: {}", name, serialize_values(&declaration.value));
    if declaration.important {
        text.push_str(" !important");
    }
    Some(text)
}

/// Parse an `@supports` condition, or the argument of `supports()` in `@import`,
/// which may also be a bare declaration.
pub fn parse_supports_condition(values: &[ComponentValue], allow_declaration: bool) -> Option<String> {
    parse_whole_condition(values, &supports_in_parens)
        .or_else(|| allow_declaration.then(|| supports_declaration(values)).flatten())
}

fn container_in_parens(value: &ComponentValue) -> Option<String> {
    match value {
        ComponentValue::ParenthesisBlock(inner) => {
            if let Some(condition) = parse_whole_condition(inner, &container_in_parens) {
                return Some(format!("({condition})"));
            }
            media_feature(inner).or_else(|| general_enclosed(value))
        }
        ComponentValue::Function { name, arguments }
            if (name.eq_ignore_ascii_case("style") || name.eq_ignore_ascii_case("scroll-state"))
                && !trim_whitespace(arguments).is_empty() =>
        {
            Some(format!(
                "{}({})",
                name.to_ascii_lowercase(),
                serialize_values(arguments)
            ))
        }
        ComponentValue::Function { .. } => general_enclosed(value),
        _ => None,
    }
}

/// Parse an `@container` prelude into an optional name and an optional query.
/// At least one of them must be present.
pub fn parse_container_prelude(values: &[ComponentValue]) -> Option<(Option<String>, Option<String>)> {
    const RESERVED: &[&str] = &["none", "and", "or", "not"];

    let mut cursor = TokenCursor::new(values);
    let name = cursor.try_parse(|cursor| {
        let name = cursor.expect_ident()?;
        (is_custom_ident(name) && !RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(name)))
            .then(|| name.to_string())
    });

    let query = if cursor.is_exhausted() {
        None
    } else {
        let query = parse_condition(&mut cursor, &container_in_parens, true)?;
        cursor.expect_exhausted()?;
        Some(query)
    };

    if name.is_none() && query.is_none() {
        return None;
    }
    Some((name, query))
}
