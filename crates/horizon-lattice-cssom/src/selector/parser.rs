//! Selector parsing.
//!
//! Selectors are parsed from component values into the types of
//! [`super::types`]. A syntax error anywhere invalidates the whole list; a
//! selector using an undeclared namespace prefix is dropped from the list on
//! its own, and the list is only invalid if nothing remains.

use super::types::{
    AttributeOperator, AttributeSelector, Combinator, NamespacePrefix, NthExpr, PseudoArgument,
    PseudoClass, PseudoElement, Selector, SelectorList, SelectorPart, SimpleSelector,
    TypeSelector,
};
use crate::logging::targets;
use crate::rules::NamespaceTable;
use crate::syntax::{ComponentValue, TokenCursor, split_commas, tokenize};

/// How relative selectors are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMode {
    /// Selectors of top-level and grouped style rules. Leading combinators are invalid.
    Absolute,
    /// Selectors of style rules nested in a style rule. Selectors without `&`
    /// and selectors with a leading combinator are prefixed with `&`.
    Nested,
    /// Selectors of style rules in `@scope` and arguments of `:has()`.
    /// Leading combinators are kept as written.
    Relative,
}

/// Pseudo-classes taking no argument.
const PSEUDO_CLASSES: &[&str] = &[
    "active", "any-link", "autofill", "blank", "checked", "closed", "current", "default",
    "defined", "disabled", "empty", "enabled", "first-child", "first-of-type",
    "focus", "focus-visible", "focus-within", "fullscreen", "future", "hover",
    "in-range", "indeterminate", "invalid", "last-child", "last-of-type", "link",
    "local-link", "modal", "muted", "only-child", "only-of-type", "open", "optional",
    "out-of-range", "past", "paused", "picture-in-picture", "placeholder-shown", "playing",
    "popover-open", "read-only", "read-write", "required", "root", "scope", "seeking",
    "stalled", "target", "target-within", "user-invalid", "user-valid", "valid", "visited",
    "volume-locked", "host",
];

/// Pseudo-classes taking a selector list.
const SELECTOR_LIST_PSEUDO_CLASSES: &[&str] = &["is", "not", "where"];

/// Pseudo-classes taking an `An+B` argument; the first two accept `of <selector-list>`.
const NTH_PSEUDO_CLASSES: &[&str] = &[
    "nth-child",
    "nth-last-child",
    "nth-of-type",
    "nth-last-of-type",
];

/// Pseudo-classes taking any non-empty argument.
const RAW_PSEUDO_CLASSES: &[&str] = &["dir", "host", "host-context", "lang", "state", "heading"];

/// Pseudo-elements taking no argument.
const PSEUDO_ELEMENTS: &[&str] = &[
    "after", "backdrop", "before", "cue", "cue-region", "details-content",
    "file-selector-button", "first-letter", "first-line", "grammar-error", "marker",
    "placeholder", "selection", "spelling-error", "target-text", "view-transition",
];

/// Pseudo-elements taking an argument.
const FUNCTIONAL_PSEUDO_ELEMENTS: &[&str] = &[
    "cue", "cue-region", "highlight", "part", "slotted", "view-transition-group",
    "view-transition-image-pair", "view-transition-new", "view-transition-old",
];

/// Pseudo-elements that may be written with a single colon.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["after", "before", "first-letter", "first-line"];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

fn is_vendor_prefixed(name: &str) -> bool {
    VENDOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Syntax,
    UndeclaredPrefix,
}

type ParseResult<T> = std::result::Result<T, Failure>;

/// Parse a selector list from component values.
///
/// Returns `None` if the list is invalid.
pub fn parse_selector_list(
    values: &[ComponentValue],
    mode: SelectorMode,
    namespaces: &NamespaceTable,
) -> Option<SelectorList> {
    SelectorParser { namespaces }.parse_list(values, mode).ok()
}

/// Parse a selector list from text. See [`parse_selector_list`].
pub fn parse_selector_text(
    text: &str,
    mode: SelectorMode,
    namespaces: &NamespaceTable,
) -> Option<SelectorList> {
    parse_selector_list(&tokenize(text), mode, namespaces)
}

struct SelectorParser<'n> {
    namespaces: &'n NamespaceTable,
}

impl SelectorParser<'_> {
    fn parse_list(&self, values: &[ComponentValue], mode: SelectorMode) -> ParseResult<SelectorList> {
        let mut selectors = Vec::new();

        for item in split_commas(values) {
            match self.parse_complex(item, mode) {
                Ok(selector) => selectors.push(selector),
                Err(Failure::UndeclaredPrefix) => {
                    tracing::trace!(
                        target: targets::GRAMMAR,
                        "dropping selector with an undeclared namespace prefix"
                    );
                }
                Err(Failure::Syntax) => return Err(Failure::Syntax),
            }
        }

        if selectors.is_empty() {
            Err(Failure::UndeclaredPrefix)
        } else {
            Ok(SelectorList(selectors))
        }
    }

    fn parse_complex(&self, values: &[ComponentValue], mode: SelectorMode) -> ParseResult<Selector> {
        let mut cursor = TokenCursor::new(values);
        let mut selector = Selector {
            leading: None,
            parts: vec![],
            combinators: vec![],
        };

        cursor.skip_whitespace();
        if let Some(combinator) = cursor.peek().and_then(explicit_combinator) {
            if mode == SelectorMode::Absolute {
                return Err(Failure::Syntax);
            }
            cursor.next();
            selector.leading = Some(combinator);
            cursor.skip_whitespace();
        }

        loop {
            let part = self.parse_compound(&mut cursor)?;
            selector.parts.push(part);

            let checkpoint = cursor.checkpoint();
            cursor.skip_whitespace();
            let had_whitespace = cursor.checkpoint() > checkpoint;

            let combinator = match cursor.peek_including_whitespace() {
                None => break,
                Some(value) => match explicit_combinator(value) {
                    Some(combinator) => {
                        cursor.next();
                        cursor.skip_whitespace();
                        combinator
                    }
                    None if had_whitespace => Combinator::Descendant,
                    None => return Err(Failure::Syntax),
                },
            };
            selector.combinators.push(combinator);
        }

        if mode == SelectorMode::Nested && (selector.leading.is_some() || !selector.contains_nesting()) {
            selector = selector.prefix_with_nesting();
        }

        Ok(selector)
    }

    fn parse_compound(&self, cursor: &mut TokenCursor<'_>) -> ParseResult<SelectorPart> {
        let mut part = SelectorPart::new();
        part.type_selector = self.parse_type_selector(cursor)?;

        while let Some(value) = cursor.peek_including_whitespace() {
            if !part.pseudo_elements.is_empty() && !matches!(value, ComponentValue::Colon) {
                return Err(Failure::Syntax);
            }

            match value {
                ComponentValue::Delim('&') => {
                    cursor.next_including_whitespace();
                    part.simple.push(SimpleSelector::Nesting);
                }
                ComponentValue::IdHash(id) => {
                    cursor.next_including_whitespace();
                    part.simple.push(SimpleSelector::Id(id.clone()));
                }
                ComponentValue::Hash(_) => return Err(Failure::Syntax),
                ComponentValue::Delim('.') => {
                    cursor.next_including_whitespace();
                    match cursor.next_including_whitespace() {
                        Some(ComponentValue::Ident(class)) => {
                            part.simple.push(SimpleSelector::Class(class.clone()));
                        }
                        _ => return Err(Failure::Syntax),
                    }
                }
                ComponentValue::SquareBracketBlock(inner) => {
                    cursor.next_including_whitespace();
                    let attribute = self.parse_attribute(inner)?;
                    part.simple.push(SimpleSelector::Attribute(attribute));
                }
                ComponentValue::Colon => {
                    cursor.next_including_whitespace();
                    self.parse_pseudo(cursor, &mut part)?;
                }
                _ => break,
            }
        }

        if part.is_empty() {
            Err(Failure::Syntax)
        } else {
            Ok(part)
        }
    }

    fn check_prefix(&self, prefix: &str) -> ParseResult<NamespacePrefix> {
        if self.namespaces.is_declared(prefix) {
            Ok(NamespacePrefix::Named(prefix.to_string()))
        } else {
            Err(Failure::UndeclaredPrefix)
        }
    }

    /// Parses `[ns|]name`, `[ns|]*` or nothing.
    fn parse_type_selector(&self, cursor: &mut TokenCursor<'_>) -> ParseResult<Option<TypeSelector>> {
        let checkpoint = cursor.checkpoint();

        let namespace = match cursor.next_including_whitespace() {
            Some(ComponentValue::Delim('|')) => Some(NamespacePrefix::None),
            Some(first @ (ComponentValue::Ident(_) | ComponentValue::Delim('*'))) => {
                let after_first = cursor.checkpoint();
                let qualified = matches!(cursor.next_including_whitespace(), Some(ComponentValue::Delim('|')))
                    && matches!(
                        cursor.peek_including_whitespace(),
                        Some(ComponentValue::Ident(_) | ComponentValue::Delim('*'))
                    );
                if qualified {
                    match first {
                        ComponentValue::Ident(prefix) => Some(self.check_prefix(prefix)?),
                        _ => Some(NamespacePrefix::Any),
                    }
                } else {
                    cursor.restore(after_first);
                    return Ok(Some(TypeSelector {
                        namespace: None,
                        name: first.as_ident().map(str::to_string),
                    }));
                }
            }
            _ => {
                cursor.restore(checkpoint);
                return Ok(None);
            }
        };

        match cursor.next_including_whitespace() {
            Some(ComponentValue::Ident(name)) => Ok(Some(TypeSelector {
                namespace,
                name: Some(name.clone()),
            })),
            Some(ComponentValue::Delim('*')) => Ok(Some(TypeSelector { namespace, name: None })),
            _ => Err(Failure::Syntax),
        }
    }

    fn parse_attribute(&self, values: &[ComponentValue]) -> ParseResult<AttributeSelector> {
        let mut cursor = TokenCursor::new(values);
        cursor.skip_whitespace();

        let (namespace, name) = match cursor.next_including_whitespace() {
            Some(ComponentValue::Delim('|')) => (Some(NamespacePrefix::None), expect_name(&mut cursor)?),
            Some(ComponentValue::Delim('*')) => match cursor.next_including_whitespace() {
                Some(ComponentValue::Delim('|')) => (Some(NamespacePrefix::Any), expect_name(&mut cursor)?),
                _ => return Err(Failure::Syntax),
            },
            Some(ComponentValue::Ident(first)) => {
                let checkpoint = cursor.checkpoint();
                match cursor.next_including_whitespace() {
                    Some(ComponentValue::Delim('|')) => {
                        (Some(self.check_prefix(first)?), expect_name(&mut cursor)?)
                    }
                    _ => {
                        cursor.restore(checkpoint);
                        (None, first.clone())
                    }
                }
            }
            _ => return Err(Failure::Syntax),
        };

        let operator = match cursor.next() {
            None => {
                return Ok(AttributeSelector {
                    namespace,
                    name,
                    matcher: None,
                    modifier: None,
                });
            }
            Some(ComponentValue::Delim('=')) => AttributeOperator::Equals,
            Some(ComponentValue::IncludeMatch) => AttributeOperator::Includes,
            Some(ComponentValue::DashMatch) => AttributeOperator::DashMatch,
            Some(ComponentValue::PrefixMatch) => AttributeOperator::Prefix,
            Some(ComponentValue::SuffixMatch) => AttributeOperator::Suffix,
            Some(ComponentValue::SubstringMatch) => AttributeOperator::Substring,
            Some(_) => return Err(Failure::Syntax),
        };

        let value = match cursor.next() {
            Some(ComponentValue::Ident(value) | ComponentValue::QuotedString(value)) => value.clone(),
            _ => return Err(Failure::Syntax),
        };

        let modifier = match cursor.next() {
            None => None,
            Some(ComponentValue::Ident(flag)) if flag.eq_ignore_ascii_case("i") => Some('i'),
            Some(ComponentValue::Ident(flag)) if flag.eq_ignore_ascii_case("s") => Some('s'),
            Some(_) => return Err(Failure::Syntax),
        };

        if !cursor.is_exhausted() {
            return Err(Failure::Syntax);
        }

        Ok(AttributeSelector {
            namespace,
            name,
            matcher: Some((operator, value)),
            modifier,
        })
    }

    /// Parses what follows a `:`, pushing a pseudo-class or pseudo-element into `part`.
    fn parse_pseudo(&self, cursor: &mut TokenCursor<'_>, part: &mut SelectorPart) -> ParseResult<()> {
        let is_element = matches!(cursor.peek_including_whitespace(), Some(ComponentValue::Colon));
        if is_element {
            cursor.next_including_whitespace();
        }

        let (name, argument) = match cursor.next_including_whitespace() {
            Some(ComponentValue::Ident(name)) => (name.to_ascii_lowercase(), None),
            Some(ComponentValue::Function { name, arguments }) => {
                (name.to_ascii_lowercase(), Some(arguments.as_slice()))
            }
            _ => return Err(Failure::Syntax),
        };

        if is_element || (argument.is_none() && LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str())) {
            let known = match argument {
                None => PSEUDO_ELEMENTS.contains(&name.as_str()),
                Some(arguments) => {
                    FUNCTIONAL_PSEUDO_ELEMENTS.contains(&name.as_str()) && !is_blank(arguments)
                }
            };
            if !known && !is_vendor_prefixed(&name) {
                return Err(Failure::Syntax);
            }
            part.pseudo_elements.push(PseudoElement {
                name,
                argument: argument.map(|arguments| trimmed(arguments)),
                pseudo_classes: vec![],
            });
            return Ok(());
        }

        let pseudo = match argument {
            None if PSEUDO_CLASSES.contains(&name.as_str()) || is_vendor_prefixed(&name) => {
                PseudoClass::new(name)
            }
            None => return Err(Failure::Syntax),
            Some(arguments) => {
                let argument = self.parse_pseudo_argument(&name, arguments)?;
                PseudoClass {
                    name,
                    argument: Some(argument),
                }
            }
        };

        match part.pseudo_elements.last_mut() {
            Some(element) => element.pseudo_classes.push(pseudo),
            None => part.simple.push(SimpleSelector::PseudoClass(pseudo)),
        }
        Ok(())
    }

    fn parse_pseudo_argument(&self, name: &str, arguments: &[ComponentValue]) -> ParseResult<PseudoArgument> {
        if SELECTOR_LIST_PSEUDO_CLASSES.contains(&name) {
            return self
                .parse_list(arguments, SelectorMode::Absolute)
                .map(PseudoArgument::Selectors)
                .map_err(|_| Failure::Syntax);
        }

        if name == "has" {
            return self
                .parse_list(arguments, SelectorMode::Relative)
                .map(PseudoArgument::Selectors)
                .map_err(|_| Failure::Syntax);
        }

        if let Some(index) = NTH_PSEUDO_CLASSES.iter().position(|candidate| *candidate == name) {
            let mut cursor = TokenCursor::new(arguments);
            let expr = parse_nth(&mut cursor).ok_or(Failure::Syntax)?;
            if cursor.is_exhausted() {
                return Ok(PseudoArgument::Nth(expr, None));
            }
            // Only :nth-child() and :nth-last-child() accept a selector filter.
            if index < 2 && cursor.expect_keyword("of").is_some() {
                let list = self
                    .parse_list(cursor.take_rest(), SelectorMode::Absolute)
                    .map_err(|_| Failure::Syntax)?;
                return Ok(PseudoArgument::Nth(expr, Some(list)));
            }
            return Err(Failure::Syntax);
        }

        if (RAW_PSEUDO_CLASSES.contains(&name) || is_vendor_prefixed(name)) && !is_blank(arguments) {
            return Ok(PseudoArgument::Raw(trimmed(arguments)));
        }

        Err(Failure::Syntax)
    }
}

fn explicit_combinator(value: &ComponentValue) -> Option<Combinator> {
    match value {
        ComponentValue::Delim('>') => Some(Combinator::Child),
        ComponentValue::Delim('+') => Some(Combinator::AdjacentSibling),
        ComponentValue::Delim('~') => Some(Combinator::GeneralSibling),
        _ => None,
    }
}

fn expect_name(cursor: &mut TokenCursor<'_>) -> ParseResult<String> {
    match cursor.next_including_whitespace() {
        Some(ComponentValue::Ident(name)) => Ok(name.clone()),
        _ => Err(Failure::Syntax),
    }
}

fn is_blank(values: &[ComponentValue]) -> bool {
    values.iter().all(ComponentValue::is_whitespace)
}

fn trimmed(values: &[ComponentValue]) -> Vec<ComponentValue> {
    crate::syntax::trim_whitespace(values).to_vec()
}

/// Parse the `An+B` microsyntax.
fn parse_nth(cursor: &mut TokenCursor<'_>) -> Option<NthExpr> {
    cursor.skip_whitespace();

    let (a, unit) = match cursor.next_including_whitespace()? {
        ComponentValue::Ident(keyword) if keyword.eq_ignore_ascii_case("odd") => {
            return Some(NthExpr::odd());
        }
        ComponentValue::Ident(keyword) if keyword.eq_ignore_ascii_case("even") => {
            return Some(NthExpr::even());
        }
        ComponentValue::Number {
            int_value: Some(b), ..
        } => return Some(NthExpr::new(0, *b)),
        ComponentValue::Dimension {
            int_value: Some(a),
            unit,
            ..
        } => (*a, unit.to_ascii_lowercase()),
        ComponentValue::Ident(ident) => match ident.strip_prefix('-') {
            Some(rest) => (-1, rest.to_ascii_lowercase()),
            None => (1, ident.to_ascii_lowercase()),
        },
        ComponentValue::Delim('+') => match cursor.next_including_whitespace()? {
            ComponentValue::Ident(ident) if !ident.starts_with('-') => (1, ident.to_ascii_lowercase()),
            _ => return None,
        },
        _ => return None,
    };

    if unit == "n" {
        let b = cursor
            .try_parse(|cursor| match cursor.next()? {
                ComponentValue::Number {
                    int_value: Some(b),
                    has_sign: true,
                    ..
                } => Some(*b),
                ComponentValue::Delim(sign @ ('+' | '-')) => match cursor.next()? {
                    ComponentValue::Number {
                        int_value: Some(b),
                        has_sign: false,
                        ..
                    } => Some(if *sign == '-' { -*b } else { *b }),
                    _ => None,
                },
                _ => None,
            })
            .unwrap_or(0);
        return Some(NthExpr::new(a, b));
    }

    if unit == "n-" {
        return match cursor.next()? {
            ComponentValue::Number {
                int_value: Some(b),
                has_sign: false,
                ..
            } => Some(NthExpr::new(a, -*b)),
            _ => None,
        };
    }

    let digits = unit.strip_prefix("n-")?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let b: i32 = digits.parse().ok()?;
    Some(NthExpr::new(a, -b))
}
