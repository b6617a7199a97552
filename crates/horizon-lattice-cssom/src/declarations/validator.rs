//! Whitelist, importance and value checks for declarations.

use std::sync::Arc;

use super::descriptors;
use super::values::{BasicValueGrammar, Validation, ValueGrammar};
use super::{DeclarationBlock, DeclarationContext, StoredDeclaration};
use crate::logging::targets;
use crate::syntax::{ComponentValue, RawDeclaration, tokenize};
use crate::{Error, Result};

/// Validates declarations for a context and stores accepted ones.
#[derive(Debug, Clone)]
pub struct DeclarationValidator {
    grammar: Arc<dyn ValueGrammar>,
}

impl Default for DeclarationValidator {
    fn default() -> Self {
        Self::new(Arc::new(BasicValueGrammar))
    }
}

impl DeclarationValidator {
    /// Create a validator delegating values to `grammar`.
    pub fn new(grammar: Arc<dyn ValueGrammar>) -> Self {
        Self { grammar }
    }

    /// The value grammar in use.
    pub fn grammar(&self) -> &Arc<dyn ValueGrammar> {
        &self.grammar
    }

    /// Validate one declaration, returning its canonical name and stored value.
    pub fn validate(
        &self,
        context: DeclarationContext,
        name: &str,
        value: &[ComponentValue],
        important: bool,
    ) -> Option<(String, StoredDeclaration)> {
        let name = DeclarationContext::canonical_name(name);

        let recognized = if name.starts_with("--") {
            context.accepts_custom_properties()
        } else {
            descriptors::is_recognized(context, &name)
        };
        if !recognized {
            tracing::trace!(target: targets::GRAMMAR, name = %name, ?context, "unrecognized declaration");
            return None;
        }

        if important && !context.accepts_important() {
            tracing::trace!(target: targets::GRAMMAR, name = %name, ?context, "!important not permitted");
            return None;
        }

        match self.grammar.validate(&name, context, value) {
            Validation::Accepted(text) => Some((name, StoredDeclaration::new(text, important))),
            Validation::Rejected => {
                tracing::trace!(target: targets::GRAMMAR, name = %name, ?context, "value rejected");
                None
            }
        }
    }

    /// Validate a raw declaration and store it in `block` if accepted.
    ///
    /// Returns `true` if the declaration was stored.
    pub fn apply(&self, block: &mut DeclarationBlock, declaration: &RawDeclaration) -> bool {
        match self.validate(
            block.context(),
            &declaration.name,
            &declaration.value,
            declaration.important,
        ) {
            Some((name, stored)) => {
                block.insert(&name, stored);
                true
            }
            None => false,
        }
    }

    /// Validate a declaration given as text, as done by property setters.
    pub fn parse(
        &self,
        context: DeclarationContext,
        name: &str,
        value: &str,
        important: bool,
    ) -> Result<(String, StoredDeclaration)> {
        let values = tokenize(value);
        self.validate(context, name, &values, important)
            .ok_or_else(|| Error::invalid_declaration(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(context: DeclarationContext, name: &str, value: &str, important: bool) -> bool {
        DeclarationValidator::default()
            .parse(context, name, value, important)
            .is_ok()
    }

    #[test]
    fn test_keyframe_declarations() {
        let keyframe = DeclarationContext::Keyframe;
        assert!(accepts(keyframe, "top", "1px", false));
        assert!(!accepts(keyframe, "top", "1px", true));
        assert!(!accepts(keyframe, "animation-delay", "1s", false));
        assert!(!accepts(keyframe, "animation-duration", "1s", false));
        assert!(accepts(keyframe, "--x", "1", false));
    }

    #[test]
    fn test_page_and_margin_declarations() {
        assert!(accepts(DeclarationContext::Page, "font-size", "20px", true));
        assert!(!accepts(DeclarationContext::Page, "top", "1px", false));
        assert!(!accepts(DeclarationContext::Page, "bottom", "1px", false));
        assert!(accepts(DeclarationContext::Margin, "content", "\"important\"", true));
        assert!(!accepts(DeclarationContext::Margin, "top", "1px", false));
    }

    #[test]
    fn test_descriptor_contexts_reject_important_and_custom_properties() {
        assert!(accepts(DeclarationContext::FontFace, "font-display", "swap", false));
        assert!(!accepts(DeclarationContext::FontFace, "font-display", "swap", true));
        assert!(!accepts(DeclarationContext::FontFace, "--x", "1", false));
        assert!(!accepts(DeclarationContext::FontFace, "font-display", "inherit", false));
    }

    #[test]
    fn test_names_are_canonicalized() {
        let (name, stored) = DeclarationValidator::default()
            .parse(DeclarationContext::Style, "COLOR", "RED", false)
            .unwrap();
        assert_eq!(name, "color");
        assert_eq!(stored.value, "red");
    }
}
