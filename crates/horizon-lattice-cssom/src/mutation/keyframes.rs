//! `@keyframes` helpers: append, find and delete by key text.

use crate::grammar::{KeyframeSelector, RuleContext, RuleKind};
use crate::logging::targets;
use crate::rules::{DetachedRule, RuleData, RuleId, StyleSheet, TreeBuilder};
use crate::syntax::{parse_single_statement, tokenize};
use crate::{Error, Result};

/// Normalize key text to its serialized form: `to, 50%` becomes `100%, 50%`.
fn normalize_key_text(text: &str) -> Option<String> {
    KeyframeSelector::parse_text(text).map(|selector| selector.to_string())
}

impl StyleSheet {
    /// Parse a keyframe rule and append it to `keyframes`.
    pub fn append_keyframe(&mut self, keyframes: RuleId, text: &str) -> Result<RuleId> {
        self.ensure_origin_clean()?;
        self.node_of_kind(keyframes, RuleKind::Keyframes)?;

        let values = tokenize(text);
        let statement = parse_single_statement(&values)?;
        if !statement.is_qualified() {
            return Err(Error::InvalidRuleSyntax);
        }

        let options = self.config.parser.clone();
        let id = TreeBuilder::new(&mut self.arena, &mut self.namespaces, &options)
            .build(RuleKind::Keyframe, &statement, RuleContext::Keyframes)
            .map_err(|_| Error::InvalidRuleSyntax)?;
        let index = self.arena.children(keyframes).len();
        self.arena.attach_child(keyframes, index, id);

        tracing::debug!(target: targets::MUTATION, index, "appended keyframe");
        Ok(id)
    }

    /// The last keyframe of `keyframes` whose key text equals `key` after
    /// normalization. Key lists are compared in order.
    pub fn find_keyframe(&self, keyframes: RuleId, key: &str) -> Option<RuleId> {
        let node = self.node_of_kind(keyframes, RuleKind::Keyframes).ok()?;
        let key = normalize_key_text(key)?;
        node.children.iter().rev().copied().find(|&id| {
            matches!(
                self.arena.get(id).map(|node| &node.data),
                Some(RuleData::Keyframe { selector }) if selector.to_string() == key
            )
        })
    }

    /// Delete the keyframe [`find_keyframe`](Self::find_keyframe) returns.
    ///
    /// Returns `Ok(None)` when no keyframe matches.
    pub fn delete_keyframe(&mut self, keyframes: RuleId, key: &str) -> Result<Option<DetachedRule>> {
        self.ensure_origin_clean()?;
        self.node_of_kind(keyframes, RuleKind::Keyframes)?;

        let Some(id) = self.find_keyframe(keyframes, key) else {
            return Ok(None);
        };
        tracing::debug!(target: targets::MUTATION, key, "deleted keyframe");
        Ok(self.detach(id))
    }

    /// Set the key text of a keyframe rule.
    pub fn set_key_text(&mut self, keyframe: RuleId, text: &str) -> Result<()> {
        self.ensure_origin_clean()?;
        self.node_of_kind(keyframe, RuleKind::Keyframe)?;

        let selector = KeyframeSelector::parse_text(text).ok_or_else(|| Error::invalid_key_text(text))?;
        if let Some(node) = self.arena.get_mut(keyframe) {
            node.data = RuleData::Keyframe { selector };
        }
        Ok(())
    }

    /// Rename a `@keyframes` rule. The name is stored as given and
    /// serialized as a string when it is not a valid identifier.
    pub fn set_keyframes_name(&mut self, keyframes: RuleId, name: &str) -> Result<()> {
        self.ensure_origin_clean()?;
        self.node_of_kind(keyframes, RuleKind::Keyframes)?;

        if name.is_empty() {
            return Err(Error::invalid_name(name));
        }
        if let Some(node) = self.arena.get_mut(keyframes) {
            node.data = RuleData::Keyframes {
                name: name.to_string(),
            };
        }
        Ok(())
    }
}
