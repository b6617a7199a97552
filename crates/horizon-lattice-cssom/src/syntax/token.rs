//! Owned component values built on top of the `cssparser` tokenizer.
//!
//! `cssparser` hands out tokens that borrow from the parser input. The rule
//! tree outlives the input text, and statement splitting needs to look ahead
//! and backtrack freely, so the token stream is materialized once into a tree
//! of [`ComponentValue`]s: simple blocks and functions own their contents.

use std::fmt::{self, Write};

use cssparser::{
    CowRcStr, ParseError as CssParseError, Parser, ParserInput, ToCss, Token,
    serialize_identifier, serialize_string,
};

/// A preserved token, simple block or function.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// An identifier such as `color` or `--custom`.
    Ident(String),
    /// An at-keyword without its `@`.
    AtKeyword(String),
    /// A `#name` token whose name is not a valid identifier (`#123`).
    Hash(String),
    /// A `#name` token whose name is a valid identifier.
    IdHash(String),
    /// A quoted string, unescaped.
    QuotedString(String),
    /// An unquoted `url(...)`.
    Url(String),
    /// A single code point that is not part of another token.
    Delim(char),
    /// A number.
    Number {
        value: f32,
        int_value: Option<i32>,
        has_sign: bool,
    },
    /// A percentage; `unit_value` is the value divided by one hundred.
    Percentage {
        unit_value: f32,
        int_value: Option<i32>,
        has_sign: bool,
    },
    /// A number followed by a unit.
    Dimension {
        value: f32,
        int_value: Option<i32>,
        has_sign: bool,
        unit: String,
    },
    /// A run of whitespace.
    WhiteSpace,
    Colon,
    Semicolon,
    Comma,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// A function with its arguments.
    Function {
        name: String,
        arguments: Vec<ComponentValue>,
    },
    /// A `( ... )` block.
    ParenthesisBlock(Vec<ComponentValue>),
    /// A `[ ... ]` block.
    SquareBracketBlock(Vec<ComponentValue>),
    /// A `{ ... }` block.
    CurlyBracketBlock(Vec<ComponentValue>),
    BadUrl(String),
    BadString(String),
    /// An unmatched `)`.
    CloseParenthesis,
    /// An unmatched `]`.
    CloseSquareBracket,
    /// An unmatched `}`.
    CloseCurlyBracket,
}

/// Tokenize CSS text into a list of component values.
///
/// Comments are dropped by the tokenizer. Whitespace runs are preserved as a
/// single [`ComponentValue::WhiteSpace`] each.
pub fn tokenize(css: &str) -> Vec<ComponentValue> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    consume_values(&mut parser)
}

fn consume_values<'i>(parser: &mut Parser<'i, '_>) -> Vec<ComponentValue> {
    let mut values = Vec::new();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let value = match token {
            Token::Function(name) => ComponentValue::Function {
                name: name.to_string(),
                arguments: consume_block(parser),
            },
            Token::ParenthesisBlock => ComponentValue::ParenthesisBlock(consume_block(parser)),
            Token::SquareBracketBlock => ComponentValue::SquareBracketBlock(consume_block(parser)),
            Token::CurlyBracketBlock => ComponentValue::CurlyBracketBlock(consume_block(parser)),
            other => ComponentValue::from_token(&other),
        };
        values.push(value);
    }

    values
}

fn consume_block<'i>(parser: &mut Parser<'i, '_>) -> Vec<ComponentValue> {
    parser
        .parse_nested_block(|nested| Ok::<_, CssParseError<'_, ()>>(consume_values(nested)))
        .unwrap_or_default()
}

impl ComponentValue {
    fn from_token(token: &Token<'_>) -> Self {
        match token {
            Token::Ident(value) => Self::Ident(value.to_string()),
            Token::AtKeyword(value) => Self::AtKeyword(value.to_string()),
            Token::Hash(value) => Self::Hash(value.to_string()),
            Token::IDHash(value) => Self::IdHash(value.to_string()),
            Token::QuotedString(value) => Self::QuotedString(value.to_string()),
            Token::UnquotedUrl(value) => Self::Url(value.to_string()),
            Token::Delim(c) => Self::Delim(*c),
            Token::Number {
                has_sign,
                value,
                int_value,
            } => Self::Number {
                value: *value,
                int_value: *int_value,
                has_sign: *has_sign,
            },
            Token::Percentage {
                has_sign,
                unit_value,
                int_value,
            } => Self::Percentage {
                unit_value: *unit_value,
                int_value: *int_value,
                has_sign: *has_sign,
            },
            Token::Dimension {
                has_sign,
                value,
                int_value,
                unit,
            } => Self::Dimension {
                value: *value,
                int_value: *int_value,
                has_sign: *has_sign,
                unit: unit.to_string(),
            },
            Token::WhiteSpace(_) => Self::WhiteSpace,
            Token::Comment(_) => Self::WhiteSpace,
            Token::Colon => Self::Colon,
            Token::Semicolon => Self::Semicolon,
            Token::Comma => Self::Comma,
            Token::IncludeMatch => Self::IncludeMatch,
            Token::DashMatch => Self::DashMatch,
            Token::PrefixMatch => Self::PrefixMatch,
            Token::SuffixMatch => Self::SuffixMatch,
            Token::SubstringMatch => Self::SubstringMatch,
            Token::CDO => Self::Cdo,
            Token::CDC => Self::Cdc,
            Token::BadUrl(value) => Self::BadUrl(value.to_string()),
            Token::BadString(value) => Self::BadString(value.to_string()),
            Token::CloseParenthesis => Self::CloseParenthesis,
            Token::CloseSquareBracket => Self::CloseSquareBracket,
            Token::CloseCurlyBracket => Self::CloseCurlyBracket,
            // Block-opening tokens are handled by the caller.
            Token::Function(name) => Self::Function {
                name: name.to_string(),
                arguments: Vec::new(),
            },
            Token::ParenthesisBlock => Self::ParenthesisBlock(Vec::new()),
            Token::SquareBracketBlock => Self::SquareBracketBlock(Vec::new()),
            Token::CurlyBracketBlock => Self::CurlyBracketBlock(Vec::new()),
        }
    }

    /// Returns `true` for whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::WhiteSpace)
    }

    /// Returns the identifier text if this is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if this is the identifier `keyword`, compared ASCII case-insensitively.
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.as_ident()
            .is_some_and(|name| name.eq_ignore_ascii_case(keyword))
    }

    /// Returns `true` if this is the delimiter `c`.
    pub fn is_delim(&self, c: char) -> bool {
        matches!(self, Self::Delim(d) if *d == c)
    }

    /// Returns `true` if this is a function named `name` (ASCII case-insensitive).
    pub fn is_function(&self, name: &str) -> bool {
        matches!(self, Self::Function { name: n, .. } if n.eq_ignore_ascii_case(name))
    }

    /// Returns the contents of a block or the arguments of a function.
    pub fn nested(&self) -> Option<&[ComponentValue]> {
        match self {
            Self::Function { arguments, .. } => Some(arguments),
            Self::ParenthesisBlock(values)
            | Self::SquareBracketBlock(values)
            | Self::CurlyBracketBlock(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the URL text of an unquoted `url(...)` or a `url("...")` function.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Function { name, arguments } if name.eq_ignore_ascii_case("url") => {
                let mut values = arguments.iter().filter(|value| !value.is_whitespace());
                match (values.next(), values.next()) {
                    (Some(Self::QuotedString(url)), None) => Some(url),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Returns `true` if this value, or anything nested in it, satisfies `predicate`.
    pub fn any(&self, predicate: &dyn Fn(&ComponentValue) -> bool) -> bool {
        predicate(self)
            || self
                .nested()
                .is_some_and(|values| values.iter().any(|value| value.any(predicate)))
    }

    /// Serialize this value to CSS text.
    pub fn to_css<W: Write>(&self, dest: &mut W) -> fmt::Result {
        match self {
            Self::Ident(value) => serialize_identifier(value, dest),
            Self::AtKeyword(value) => Token::AtKeyword(CowRcStr::from(value.as_str())).to_css(dest),
            Self::Hash(value) => Token::Hash(CowRcStr::from(value.as_str())).to_css(dest),
            Self::IdHash(value) => Token::IDHash(CowRcStr::from(value.as_str())).to_css(dest),
            Self::QuotedString(value) => serialize_string(value, dest),
            Self::Url(value) => {
                dest.write_str("url(")?;
                serialize_string(value, dest)?;
                dest.write_char(')')
            }
            Self::Delim(c) => dest.write_char(*c),
            Self::Number {
                value,
                int_value,
                has_sign,
            } => Token::Number {
                has_sign: *has_sign,
                value: *value,
                int_value: *int_value,
            }
            .to_css(dest),
            Self::Percentage {
                unit_value,
                int_value,
                has_sign,
            } => Token::Percentage {
                has_sign: *has_sign,
                unit_value: *unit_value,
                int_value: *int_value,
            }
            .to_css(dest),
            Self::Dimension {
                value,
                int_value,
                has_sign,
                unit,
            } => Token::Dimension {
                has_sign: *has_sign,
                value: *value,
                int_value: *int_value,
                unit: CowRcStr::from(unit.as_str()),
            }
            .to_css(dest),
            Self::WhiteSpace => dest.write_char(' '),
            Self::Colon => dest.write_char(':'),
            Self::Semicolon => dest.write_char(';'),
            Self::Comma => dest.write_char(','),
            Self::IncludeMatch => dest.write_str("~="),
            Self::DashMatch => dest.write_str("|="),
            Self::PrefixMatch => dest.write_str("^="),
            Self::SuffixMatch => dest.write_str("$="),
            Self::SubstringMatch => dest.write_str("*="),
            Self::Cdo => dest.write_str("<!--"),
            Self::Cdc => dest.write_str("-->"),
            Self::Function { name, arguments } => {
                serialize_identifier(name, dest)?;
                dest.write_char('(')?;
                write_values(arguments, dest)?;
                dest.write_char(')')
            }
            Self::ParenthesisBlock(values) => {
                dest.write_char('(')?;
                write_values(values, dest)?;
                dest.write_char(')')
            }
            Self::SquareBracketBlock(values) => {
                dest.write_char('[')?;
                write_values(values, dest)?;
                dest.write_char(']')
            }
            Self::CurlyBracketBlock(values) => {
                dest.write_char('{')?;
                write_values(values, dest)?;
                dest.write_char('}')
            }
            Self::BadUrl(value) => write!(dest, "url({value})"),
            Self::BadString(value) => {
                dest.write_char('"')?;
                dest.write_str(value)
            }
            Self::CloseParenthesis => dest.write_char(')'),
            Self::CloseSquareBracket => dest.write_char(']'),
            Self::CloseCurlyBracket => dest.write_char('}'),
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_css(f)
    }
}

/// Serialize a run of component values with normalized whitespace.
///
/// Leading and trailing whitespace is trimmed, whitespace before a comma is
/// removed and a single space follows every comma. Nested blocks are
/// normalized the same way.
pub fn write_values<W: Write>(values: &[ComponentValue], dest: &mut W) -> fmt::Result {
    let values = trim_whitespace(values);
    let mut pending_space = false;
    let mut after_comma = false;

    for (index, value) in values.iter().enumerate() {
        match value {
            ComponentValue::WhiteSpace => {
                pending_space = true;
            }
            ComponentValue::Comma => {
                pending_space = false;
                after_comma = true;
                dest.write_char(',')?;
                if index + 1 < values.len() {
                    dest.write_char(' ')?;
                }
            }
            _ => {
                if pending_space && !after_comma {
                    dest.write_char(' ')?;
                }
                pending_space = false;
                after_comma = false;
                value.to_css(dest)?;
            }
        }
    }

    Ok(())
}

/// Serialize a run of component values into a new string. See [`write_values`].
pub fn serialize_values(values: &[ComponentValue]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_values(values, &mut out);
    out
}

/// Strip leading and trailing whitespace from a run of component values.
pub fn trim_whitespace(values: &[ComponentValue]) -> &[ComponentValue] {
    let start = values
        .iter()
        .position(|value| !value.is_whitespace())
        .unwrap_or(values.len());
    let end = values
        .iter()
        .rposition(|value| !value.is_whitespace())
        .map_or(start, |position| position + 1);
    &values[start..end]
}

/// Split a run of component values at top-level commas.
pub fn split_commas(values: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    values
        .split(|value| matches!(value, ComponentValue::Comma))
        .map(trim_whitespace)
        .collect()
}

/// Serialize an identifier to a new string.
pub fn identifier_to_css(name: &str) -> String {
    let mut out = String::new();
    let _ = serialize_identifier(name, &mut out);
    out
}

/// Serialize a string as a double-quoted CSS string.
pub fn string_to_css(value: &str) -> String {
    let mut out = String::new();
    let _ = serialize_string(value, &mut out);
    out
}

/// Serialize a URL as `url("...")`.
pub fn url_to_css(url: &str) -> String {
    format!("url({})", string_to_css(url))
}
