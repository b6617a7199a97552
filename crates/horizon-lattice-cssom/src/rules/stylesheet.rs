//! Stylesheets and detached rules.

use crate::config::{ParserOptions, SheetConfig};
use crate::grammar::{MediaList, RuleKind};
use crate::logging::targets;
use crate::serialize;
use crate::syntax::tokenize;
use crate::{Error, Result};

use super::arena::{RuleArena, RuleId};
use super::builder::TreeBuilder;
use super::namespaces::NamespaceTable;
use super::rule::{RuleData, RuleNode};
use super::view::{RuleList, RuleRef};

/// The replace lock of a stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceState {
    /// No replace is in flight.
    #[default]
    Idle,
    /// A replace has been requested and not yet committed. Rule insertion
    /// and deletion fail until it completes.
    Pending,
}

/// A stylesheet: the top-level rule list, the namespace table and the
/// flags supplied by the host.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub(crate) arena: RuleArena,
    pub(crate) rules: Vec<RuleId>,
    pub(crate) namespaces: NamespaceTable,
    pub(crate) config: SheetConfig,
    pub(crate) media: MediaList,
    pub(crate) replace_state: ReplaceState,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(config: SheetConfig) -> Self {
        let media = config
            .media
            .as_deref()
            .map(MediaList::parse_text)
            .unwrap_or_default();
        Self {
            arena: RuleArena::new(),
            rules: Vec::new(),
            namespaces: NamespaceTable::new(),
            config,
            media,
            replace_state: ReplaceState::Idle,
        }
    }

    /// Create an empty constructed stylesheet.
    pub fn constructed() -> Self {
        Self::new(SheetConfig::constructed())
    }

    /// Parse a stylesheet from source text.
    ///
    /// Invalid statements are dropped. A constructed stylesheet never holds
    /// `@import` rules.
    pub fn parse(css: &str, config: SheetConfig) -> Self {
        let mut sheet = Self::new(config);
        sheet.rules = sheet.build_rules(css);
        tracing::debug!(
            target: targets::PARSER,
            rules = sheet.rules.len(),
            "parsed stylesheet"
        );
        sheet
    }

    /// Parse `css` into the arena, registering namespaces, and return the
    /// top-level rules. The current rules are left untouched.
    pub(crate) fn build_rules(&mut self, css: &str) -> Vec<RuleId> {
        let options = self.config.parser.clone();
        TreeBuilder::new(&mut self.arena, &mut self.namespaces, &options)
            .allow_imports(!self.config.constructed)
            .build_stylesheet(&tokenize(css))
    }

    /// The configuration this stylesheet was created with.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The parser options.
    pub fn parser_options(&self) -> &ParserOptions {
        &self.config.parser
    }

    /// The location the stylesheet was loaded from.
    pub fn href(&self) -> Option<&str> {
        self.config.location.as_deref()
    }

    /// The title.
    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    /// The media the stylesheet applies to.
    pub fn media(&self) -> &MediaList {
        &self.media
    }

    /// Whether the stylesheet is disabled.
    pub fn disabled(&self) -> bool {
        self.config.disabled
    }

    /// Enable or disable the stylesheet.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Whether the rules may be read and modified.
    pub fn origin_clean(&self) -> bool {
        self.config.origin_clean
    }

    /// Whether the stylesheet was constructed programmatically.
    pub fn is_constructed(&self) -> bool {
        self.config.constructed
    }

    /// The replace lock state.
    pub fn replace_state(&self) -> ReplaceState {
        self.replace_state
    }

    /// The namespace prefixes declared by `@namespace` rules.
    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// The arena holding every attached rule.
    pub fn arena(&self) -> &RuleArena {
        &self.arena
    }

    /// The top-level rule ids.
    pub fn top_level(&self) -> &[RuleId] {
        &self.rules
    }

    /// The top-level rule list.
    ///
    /// Fails with [`Error::AccessDenied`] if the stylesheet is not origin-clean.
    pub fn rules(&self) -> Result<RuleList<'_>> {
        self.ensure_origin_clean()?;
        Ok(RuleList::new(&self.arena, &self.rules))
    }

    /// A rule attached to this stylesheet, `None` for stale ids.
    pub fn rule(&self, id: RuleId) -> Option<RuleRef<'_>> {
        RuleRef::new(&self.arena, id)
    }

    /// Serialize every top-level rule, one per line.
    pub fn css_text(&self) -> String {
        serialize::rules_css_text(&self.arena, &self.rules)
    }

    pub(crate) fn ensure_origin_clean(&self) -> Result<()> {
        if self.config.origin_clean {
            Ok(())
        } else {
            Err(Error::AccessDenied)
        }
    }

    pub(crate) fn ensure_unlocked(&self) -> Result<()> {
        match self.replace_state {
            ReplaceState::Idle => Ok(()),
            ReplaceState::Pending => Err(Error::LockedSheet),
        }
    }

    /// The node `id`, which must have kind `kind`.
    pub(crate) fn node_of_kind(&self, id: RuleId, kind: RuleKind) -> Result<&RuleNode> {
        self.arena
            .get(id)
            .filter(|node| node.kind() == kind)
            .ok_or(Error::UnknownRule)
    }

    /// Rebuild the namespace table from the top-level `@namespace` rules.
    pub(crate) fn rebuild_namespaces(&mut self) {
        self.namespaces.clear();
        for &id in &self.rules {
            if let Some(RuleNode {
                data: RuleData::Namespace { prefix, uri },
                ..
            }) = self.arena.get(id)
            {
                self.namespaces.register(prefix.clone(), uri.clone());
            }
        }
    }

    /// Move a subtree out of the arena.
    pub(crate) fn detach(&mut self, id: RuleId) -> Option<DetachedRule> {
        let mut arena = RuleArena::new();
        let root = self.arena.move_subtree(id, &mut arena)?;
        Some(DetachedRule { arena, root })
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

/// A rule removed from a stylesheet, with its descendants.
///
/// It has no parent and its old id no longer resolves in the stylesheet.
#[derive(Debug, Clone)]
pub struct DetachedRule {
    arena: RuleArena,
    root: RuleId,
}

impl DetachedRule {
    /// The kind of the detached rule.
    pub fn kind(&self) -> Option<RuleKind> {
        self.arena.get(self.root).map(RuleNode::kind)
    }

    /// A view of the detached rule.
    pub fn rule(&self) -> Option<RuleRef<'_>> {
        RuleRef::new(&self.arena, self.root)
    }

    /// Serialize the detached rule.
    pub fn css_text(&self) -> String {
        serialize::rule_css_text(&self.arena, self.root)
    }
}
