//! Statement splitting.
//!
//! Turns a run of component values into a lazy sequence of raw statements
//! (at-rules and qualified rules) and, inside blocks that accept them,
//! declarations. Nothing here knows which rules exist; classification
//! happens in [`crate::grammar`].

use super::cursor::TokenCursor;
use super::token::{ComponentValue, trim_whitespace};
use crate::logging::targets;
use crate::{Error, Result};

/// A raw at-rule or qualified rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The at-keyword name for at-rules, `None` for qualified rules.
    pub name: Option<String>,
    /// The prelude, with surrounding whitespace trimmed.
    pub prelude: Vec<ComponentValue>,
    /// The `{}` block contents, if the statement has a block.
    pub block: Option<Vec<ComponentValue>>,
}

impl Statement {
    /// Returns `true` for qualified rules.
    pub fn is_qualified(&self) -> bool {
        self.name.is_none()
    }
}

/// A raw declaration: a name, its value tokens and the importance flag.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDeclaration {
    pub name: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

/// An item of a block's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Declaration(RawDeclaration),
    Rule(Statement),
}

/// How the contents being split are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// The top level of a stylesheet. `<!--` and `-->` are skipped and a
    /// qualified rule only ends at its block.
    Stylesheet,
    /// A nested list of rules. A qualified rule is discarded at `;`.
    RuleList,
    /// A block accepting declarations and nested rules.
    Declarations,
}

/// A lazy, restartable sequence of statements over component values.
#[derive(Debug, Clone)]
pub struct Statements<'a> {
    cursor: TokenCursor<'a>,
    mode: ContentMode,
}

impl<'a> Statements<'a> {
    /// Split `values` according to `mode`.
    pub fn new(values: &'a [ComponentValue], mode: ContentMode) -> Self {
        Self {
            cursor: TokenCursor::new(values),
            mode,
        }
    }

    fn consume_at_rule(&mut self, name: &str) -> Statement {
        let mut prelude = Vec::new();
        let mut block = None;

        while let Some(value) = self.cursor.next_including_whitespace() {
            match value {
                ComponentValue::Semicolon => break,
                ComponentValue::CurlyBracketBlock(contents) => {
                    block = Some(contents.clone());
                    break;
                }
                other => prelude.push(other.clone()),
            }
        }

        Statement {
            name: Some(name.to_string()),
            prelude: trim_whitespace(&prelude).to_vec(),
            block,
        }
    }

    fn consume_qualified_rule(&mut self) -> Option<Statement> {
        let mut prelude = Vec::new();

        while let Some(value) = self.cursor.next_including_whitespace() {
            match value {
                ComponentValue::CurlyBracketBlock(contents) => {
                    return Some(Statement {
                        name: None,
                        prelude: trim_whitespace(&prelude).to_vec(),
                        block: Some(contents.clone()),
                    });
                }
                ComponentValue::Semicolon if self.mode != ContentMode::Stylesheet => {
                    tracing::trace!(
                        target: targets::PARSER,
                        "discarding qualified rule prelude terminated by ';'"
                    );
                    return None;
                }
                other => prelude.push(other.clone()),
            }
        }

        tracing::trace!(target: targets::PARSER, "discarding qualified rule without a block");
        None
    }

    fn consume_declaration(&mut self, first: &ComponentValue) -> Option<RawDeclaration> {
        let mut values = vec![first.clone()];
        while let Some(value) = self.cursor.next_including_whitespace() {
            if matches!(value, ComponentValue::Semicolon) {
                break;
            }
            values.push(value.clone());
        }

        let declaration = parse_declaration(&values);
        if declaration.is_none() {
            tracing::trace!(target: targets::PARSER, "discarding malformed declaration");
        }
        declaration
    }
}

impl Iterator for Statements<'_> {
    type Item = BlockItem;

    fn next(&mut self) -> Option<BlockItem> {
        loop {
            let value = self.cursor.next_including_whitespace()?;

            match (value, self.mode) {
                (ComponentValue::WhiteSpace, _) => continue,
                (ComponentValue::Cdo | ComponentValue::Cdc, ContentMode::Stylesheet | ContentMode::RuleList) => {
                    continue;
                }
                (ComponentValue::Semicolon, ContentMode::Declarations) => continue,
                (ComponentValue::AtKeyword(name), _) => {
                    return Some(BlockItem::Rule(self.consume_at_rule(name)));
                }
                (ComponentValue::Ident(_), ContentMode::Declarations) => {
                    if let Some(declaration) = self.consume_declaration(value) {
                        return Some(BlockItem::Declaration(declaration));
                    }
                }
                _ => {
                    self.cursor.restore(self.cursor.checkpoint() - 1);
                    if let Some(rule) = self.consume_qualified_rule() {
                        return Some(BlockItem::Rule(rule));
                    }
                }
            }
        }
    }
}

/// Parse `name ws* : value [!important]` from a run of component values.
pub fn parse_declaration(values: &[ComponentValue]) -> Option<RawDeclaration> {
    let mut cursor = TokenCursor::new(values);
    let name = cursor.expect_ident()?.to_string();
    match cursor.next()? {
        ComponentValue::Colon => {}
        _ => return None,
    }

    let mut value = trim_whitespace(cursor.rest());
    let mut important = false;

    if let Some((last, before)) = value.split_last()
        && last.is_ident("important")
    {
        let before = trim_whitespace(before);
        if let Some((bang, rest)) = before.split_last()
            && bang.is_delim('!')
        {
            important = true;
            value = trim_whitespace(rest);
        }
    }

    Some(RawDeclaration {
        name,
        value: value.to_vec(),
        important,
    })
}

/// Parse exactly one statement, as required when inserting a rule.
///
/// Returns [`Error::MissingRule`] for empty input, [`Error::InvalidRuleSyntax`]
/// when the text does not start with a rule and [`Error::ExtraRule`] when
/// anything other than whitespace follows the rule.
pub fn parse_single_statement(values: &[ComponentValue]) -> Result<Statement> {
    let mut statements = Statements::new(values, ContentMode::Stylesheet);

    if statements.cursor.is_exhausted() {
        return Err(Error::MissingRule);
    }

    statements.cursor.skip_whitespace();
    let statement = match statements.cursor.next_including_whitespace() {
        Some(ComponentValue::AtKeyword(name)) => statements.consume_at_rule(name),
        Some(_) => {
            statements.cursor.restore(statements.cursor.checkpoint() - 1);
            statements
                .consume_qualified_rule()
                .ok_or(Error::InvalidRuleSyntax)?
        }
        None => return Err(Error::MissingRule),
    };

    if statements.cursor.is_exhausted() {
        Ok(statement)
    } else {
        Err(Error::ExtraRule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{serialize_values, tokenize};

    fn items(css: &str, mode: ContentMode) -> Vec<BlockItem> {
        let values = tokenize(css);
        Statements::new(&values, mode).collect()
    }

    #[test]
    fn test_splits_top_level_statements() {
        let items = items("@import 'a.css'; .a { color: red } @media all {}", ContentMode::Stylesheet);
        assert_eq!(items.len(), 3);
        match &items[0] {
            BlockItem::Rule(statement) => {
                assert_eq!(statement.name.as_deref(), Some("import"));
                assert!(statement.block.is_none());
            }
            other => panic!("unexpected item {other:?}"),
        }
        match &items[1] {
            BlockItem::Rule(statement) => {
                assert!(statement.is_qualified());
                assert_eq!(serialize_values(&statement.prelude), ".a");
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_top_level_semicolon_does_not_end_qualified_rule() {
        let items = items("color: red; {} .a {}", ContentMode::Stylesheet);
        assert_eq!(items.len(), 2);
        match &items[0] {
            BlockItem::Rule(statement) => {
                assert_eq!(serialize_values(&statement.prelude), "color: red;");
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_html_comments_skipped_at_top_level() {
        let items = items("<!-- .a {} -->", ContentMode::Stylesheet);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_nested_rule_list_discards_at_semicolon() {
        let items = items("color: red; .a {}", ContentMode::RuleList);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_declarations_and_nested_rules() {
        let items = items(
            "color: red !important; identifier {}; & .b { top: 0 } <!-- x; bottom: 1px",
            ContentMode::Declarations,
        );
        assert_eq!(items.len(), 3);
        match &items[0] {
            BlockItem::Declaration(declaration) => {
                assert_eq!(declaration.name, "color");
                assert!(declaration.important);
                assert_eq!(serialize_values(&declaration.value), "red");
            }
            other => panic!("unexpected item {other:?}"),
        }
        assert!(matches!(&items[1], BlockItem::Rule(statement) if statement.is_qualified()));
        assert!(matches!(&items[2], BlockItem::Declaration(d) if d.name == "bottom"));
    }

    #[test]
    fn test_single_statement_errors() {
        assert_eq!(parse_single_statement(&tokenize("  ")), Err(Error::MissingRule));
        assert_eq!(
            parse_single_statement(&tokenize("color: red")),
            Err(Error::InvalidRuleSyntax)
        );
        assert_eq!(
            parse_single_statement(&tokenize(".a {} .b {}")),
            Err(Error::ExtraRule)
        );
        assert!(parse_single_statement(&tokenize(" .a { color: red } ")).is_ok());
    }
}
