//! Stylesheet and parser configuration.

use std::sync::Arc;

use crate::declarations::{BasicValueGrammar, ValueGrammar};

/// What happens to declarations written directly inside a conditional or
/// grouping rule that is nested in a style rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NestedGroupDeclarations {
    /// Validate the declarations, then drop them.
    #[default]
    Discard,
    /// Keep them in the group rule's own declaration set, serialized before
    /// its child rules.
    Retain,
}

/// Options controlling how source text is parsed.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Handling of declarations directly inside nested group rules.
    pub nested_group_declarations: NestedGroupDeclarations,

    /// The value grammar that validates declaration values.
    pub value_grammar: Arc<dyn ValueGrammar>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            nested_group_declarations: NestedGroupDeclarations::default(),
            value_grammar: Arc::new(BasicValueGrammar),
        }
    }
}

impl ParserOptions {
    /// Set the handling of declarations inside nested group rules.
    pub fn nested_group_declarations(mut self, handling: NestedGroupDeclarations) -> Self {
        self.nested_group_declarations = handling;
        self
    }

    /// Set the value grammar.
    pub fn value_grammar(mut self, grammar: Arc<dyn ValueGrammar>) -> Self {
        self.value_grammar = grammar;
        self
    }
}

/// Configuration of a stylesheet.
///
/// These inputs come from whatever hosts the stylesheet (a document, a
/// constructor call); the stylesheet only records them.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Whether the rules may be read and modified.
    pub origin_clean: bool,

    /// Whether the stylesheet was constructed programmatically. Only
    /// constructed stylesheets support `replace_sync` and they never hold
    /// `@import` rules.
    pub constructed: bool,

    /// Whether the stylesheet is disabled.
    pub disabled: bool,

    /// The location the stylesheet was loaded from.
    pub location: Option<String>,

    /// The media the stylesheet applies to.
    pub media: Option<String>,

    /// The title of the stylesheet.
    pub title: Option<String>,

    /// Parser options.
    pub parser: ParserOptions,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            origin_clean: true,
            constructed: false,
            disabled: false,
            location: None,
            media: None,
            title: None,
            parser: ParserOptions::default(),
        }
    }
}

impl SheetConfig {
    /// Configuration of a stylesheet created by a constructor call.
    pub fn constructed() -> Self {
        Self {
            constructed: true,
            ..Default::default()
        }
    }

    /// Set whether the rules may be read and modified.
    pub fn origin_clean(mut self, origin_clean: bool) -> Self {
        self.origin_clean = origin_clean;
        self
    }

    /// Set whether the stylesheet is disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the media text.
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the parser options.
    pub fn parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }
}
