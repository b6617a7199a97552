//! Rule insertion and deletion.

use crate::grammar::{
    Rejection, RuleContext, RuleKind, TopLevelState, classify, parse_prelude,
};
use crate::logging::targets;
use crate::rules::{DetachedRule, RuleId, RuleNode, StyleSheet, TreeBuilder, canonical_slot};
use crate::syntax::{parse_single_statement, tokenize};
use crate::{Error, Result};

/// The rule list an insertion or deletion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    /// The top-level rule list of the stylesheet.
    TopLevel,
    /// The child rules of a grouping rule, style rule, `@page` or `@keyframes`.
    Children(RuleId),
}

/// Kinds that may precede `@namespace` rules.
fn is_prologue(kind: RuleKind) -> bool {
    matches!(
        kind,
        RuleKind::Import | RuleKind::Namespace | RuleKind::LayerStatement
    )
}

impl StyleSheet {
    /// Insert a rule into the top-level list at `index`, returning its position.
    pub fn insert_rule(&mut self, text: &str, index: usize) -> Result<usize> {
        self.insert_into(ListTarget::TopLevel, text, index)
    }

    /// Delete the top-level rule at `index`.
    pub fn delete_rule(&mut self, index: usize) -> Result<DetachedRule> {
        self.delete_from(ListTarget::TopLevel, index)
    }

    /// Insert a rule into the child list of `parent` at `index`, returning
    /// its position.
    ///
    /// Margin rules of `@page` take their canonical position; `index` is
    /// only checked against the bounds of the list.
    pub fn insert_child_rule(&mut self, parent: RuleId, text: &str, index: usize) -> Result<usize> {
        self.insert_into(ListTarget::Children(parent), text, index)
    }

    /// Delete the child rule of `parent` at `index`.
    pub fn delete_child_rule(&mut self, parent: RuleId, index: usize) -> Result<DetachedRule> {
        self.delete_from(ListTarget::Children(parent), index)
    }

    /// Insert a rule into `target` at `index`.
    pub fn insert_into(&mut self, target: ListTarget, text: &str, index: usize) -> Result<usize> {
        self.ensure_origin_clean()?;
        self.ensure_unlocked()?;

        let (context, length) = self.list_info(target)?;
        if index > length {
            return Err(Error::invalid_index(index, length));
        }

        let values = tokenize(text);
        let statement = parse_single_statement(&values)?;
        let kind = classify(&statement, context).map_err(|rejection| match rejection {
            Rejection::NotAllowed | Rejection::InvalidPosition => Error::InvalidPosition,
            Rejection::Ignored
            | Rejection::UnknownRule
            | Rejection::InvalidBlock
            | Rejection::InvalidPrelude => Error::InvalidRuleSyntax,
        })?;
        let data = parse_prelude(kind, &statement, context, &self.namespaces)
            .ok_or(Error::InvalidRuleSyntax)?;

        if kind == RuleKind::Import && self.config.constructed {
            return Err(Error::InvalidImportInsertion);
        }
        if !context.allows(kind) {
            return Err(Error::InvalidPosition);
        }
        if target == ListTarget::TopLevel {
            self.check_top_level_insert(kind, index)?;
        }

        let options = self.config.parser.clone();
        let id = TreeBuilder::new(&mut self.arena, &mut self.namespaces, &options)
            .materialize(data, &statement, context);

        let position = match target {
            ListTarget::TopLevel => {
                self.rules.insert(index, id);
                index
            }
            ListTarget::Children(parent) => {
                let position = canonical_slot(&self.arena, parent, id).unwrap_or(index);
                self.arena.attach_child(parent, position, id);
                position
            }
        };

        tracing::debug!(
            target: targets::MUTATION,
            kind = kind.name(),
            index = position,
            "inserted rule"
        );
        Ok(position)
    }

    /// Delete the rule at `index` of `target`, returning it detached.
    pub fn delete_from(&mut self, target: ListTarget, index: usize) -> Result<DetachedRule> {
        self.ensure_origin_clean()?;
        self.ensure_unlocked()?;

        let ids = self.list_ids(target)?;
        let id = *ids
            .get(index)
            .ok_or_else(|| Error::invalid_index(index, ids.len()))?;
        let kind = self.arena.get(id).map(RuleNode::kind).ok_or(Error::UnknownRule)?;

        if kind == RuleKind::Namespace && self.has_body_rules() {
            return Err(Error::InvalidNamespaceState);
        }

        if target == ListTarget::TopLevel {
            self.rules.remove(index);
        }
        let detached = self.detach(id).ok_or(Error::UnknownRule)?;
        if kind == RuleKind::Namespace {
            self.rebuild_namespaces();
        }

        tracing::debug!(target: targets::MUTATION, kind = kind.name(), index, "deleted rule");
        Ok(detached)
    }

    fn list_ids(&self, target: ListTarget) -> Result<&[RuleId]> {
        match target {
            ListTarget::TopLevel => Ok(&self.rules),
            ListTarget::Children(parent) => {
                let node = self.arena.get(parent).ok_or(Error::UnknownRule)?;
                let kind = node.kind();
                if kind.has_child_rules() && kind != RuleKind::FontFeatureValues {
                    Ok(&node.children)
                } else {
                    Err(Error::UnknownRule)
                }
            }
        }
    }

    fn list_info(&self, target: ListTarget) -> Result<(RuleContext, usize)> {
        let length = self.list_ids(target)?.len();
        let context = match target {
            ListTarget::TopLevel => RuleContext::Stylesheet,
            ListTarget::Children(parent) => self
                .arena
                .get(parent)
                .map(RuleNode::block_context)
                .ok_or(Error::UnknownRule)?,
        };
        Ok((context, length))
    }

    fn top_level_kinds(&self) -> Vec<RuleKind> {
        self.rules
            .iter()
            .filter_map(|&id| self.arena.get(id))
            .map(RuleNode::kind)
            .collect()
    }

    fn has_body_rules(&self) -> bool {
        self.top_level_kinds().into_iter().any(|kind| !is_prologue(kind))
    }

    fn check_top_level_insert(&self, kind: RuleKind, index: usize) -> Result<()> {
        let mut kinds = self.top_level_kinds();
        kinds.insert(index, kind);

        if !TopLevelState::accepts(kinds.iter().copied()) {
            return Err(Error::InvalidPosition);
        }
        if kind == RuleKind::Namespace && kinds.iter().any(|&kind| !is_prologue(kind)) {
            return Err(Error::InvalidNamespaceState);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    fn kinds(sheet: &StyleSheet) -> Vec<RuleKind> {
        sheet.top_level_kinds()
    }

    #[test]
    fn test_insert_and_delete() {
        let mut sheet = StyleSheet::constructed();
        assert_eq!(sheet.insert_rule(".selector { color: red }", 0), Ok(0));
        let first = sheet.top_level()[0];

        assert_eq!(sheet.insert_rule(".selector { color: green }", 0), Ok(0));
        assert_eq!(sheet.top_level()[1], first);

        let detached = sheet.delete_rule(1).unwrap();
        assert_eq!(sheet.top_level().len(), 1);
        assert_eq!(detached.css_text(), ".selector { color: red; }");
        assert!(detached.rule().unwrap().parent().is_none());
        assert!(sheet.rule(first).is_none());
    }

    #[test]
    fn test_rule_text_errors() {
        let mut sheet = StyleSheet::constructed();
        assert_eq!(sheet.insert_rule("", 0), Err(Error::MissingRule));
        assert_eq!(sheet.insert_rule("  ", 0), Err(Error::MissingRule));
        assert_eq!(sheet.insert_rule(".a {} .b {}", 0), Err(Error::ExtraRule));
        assert_eq!(sheet.insert_rule("color: red", 0), Err(Error::InvalidRuleSyntax));
        assert_eq!(
            sheet.insert_rule("@namespace <bad-string-or-url>;", 0),
            Err(Error::InvalidRuleSyntax)
        );
        assert_eq!(sheet.insert_rule("@unknown {}", 0), Err(Error::InvalidRuleSyntax));
        assert_eq!(sheet.insert_rule("@charset \"utf-8\";", 0), Err(Error::InvalidRuleSyntax));
        assert!(sheet.top_level().is_empty());
    }

    #[test]
    fn test_index_and_access_errors() {
        let mut sheet = StyleSheet::constructed();
        assert_eq!(
            sheet.insert_rule(".a {}", 1),
            Err(Error::invalid_index(1, 0))
        );
        assert_eq!(sheet.delete_rule(0).map(|_| ()), Err(Error::invalid_index(0, 0)));

        let mut sheet = StyleSheet::parse(".a {}", SheetConfig::default().origin_clean(false));
        assert_eq!(sheet.insert_rule(".b {}", 0), Err(Error::AccessDenied));
        assert_eq!(sheet.delete_rule(0).map(|_| ()), Err(Error::AccessDenied));
    }

    #[test]
    fn test_import_insertion() {
        let mut constructed = StyleSheet::constructed();
        assert_eq!(
            constructed.insert_rule("@import \"x.css\";", 0),
            Err(Error::InvalidImportInsertion)
        );

        let mut sheet = StyleSheet::default();
        assert_eq!(sheet.insert_rule("@layer base;", 0), Ok(0));
        assert_eq!(sheet.insert_rule("@import \"x.css\";", 1), Ok(1));
    }

    #[test]
    fn test_top_level_positions() {
        let mut sheet = StyleSheet::default();
        let svg = "@namespace svg \"http://www.w3.org/2000/svg\";";

        sheet.insert_rule("@import \"./stylesheet.css\";", 0).unwrap();
        assert_eq!(sheet.insert_rule(svg, 0), Err(Error::InvalidPosition));
        assert_eq!(sheet.insert_rule(".selector { color: red }", 0), Err(Error::InvalidPosition));

        assert_eq!(sheet.insert_rule(svg, 1), Ok(1));
        assert!(sheet.namespaces().is_declared("svg"));
        assert_eq!(sheet.insert_rule(".selector { color: red }", 1), Err(Error::InvalidPosition));
        assert_eq!(sheet.insert_rule("@import \"./stylesheet.css\";", 2), Err(Error::InvalidPosition));

        assert_eq!(sheet.insert_rule(".selector { color: red }", 2), Ok(2));
        assert_eq!(sheet.insert_rule("@import \"./stylesheet.css\";", 3), Err(Error::InvalidPosition));
        assert_eq!(sheet.insert_rule(svg, 3), Err(Error::InvalidPosition));

        assert_eq!(
            kinds(&sheet),
            vec![RuleKind::Import, RuleKind::Namespace, RuleKind::Style]
        );
    }

    #[test]
    fn test_namespace_state() {
        let mut sheet = StyleSheet::constructed();
        sheet.insert_rule(".selector { color: red }", 0).unwrap();
        assert_eq!(
            sheet.insert_rule("@namespace svg \"http://www.w3.org/2000/svg\";", 0),
            Err(Error::InvalidNamespaceState)
        );

        let mut sheet = StyleSheet::parse(
            "@namespace svg url(http://www.w3.org/2000/svg); svg|rect {}",
            SheetConfig::default(),
        );
        assert_eq!(sheet.delete_rule(0).map(|_| ()), Err(Error::InvalidNamespaceState));
        sheet.delete_rule(1).unwrap();
        sheet.delete_rule(0).unwrap();
        assert!(sheet.namespaces().is_empty());
    }

    #[test]
    fn test_rules_after_namespaces() {
        let mut sheet = StyleSheet::parse(
            "@layer a; @namespace svg url(http://www.w3.org/2000/svg);",
            SheetConfig::default(),
        );
        assert_eq!(sheet.insert_rule("svg|rect { fill: green }", 2), Ok(2));
        assert_eq!(sheet.insert_rule("SVG|rect { fill: green }", 3), Err(Error::InvalidRuleSyntax));
    }

    #[test]
    fn test_grouping_rule_children() {
        let mut sheet = StyleSheet::parse("@media screen {}", SheetConfig::default());
        let media = sheet.top_level()[0];

        assert_eq!(sheet.insert_child_rule(media, ".selector { color: orange }", 0), Ok(0));
        assert_eq!(sheet.insert_child_rule(media, "invalid", 0), Err(Error::InvalidRuleSyntax));
        assert_eq!(sheet.insert_child_rule(media, ".selector { color: red }", 0), Ok(0));
        assert_eq!(sheet.insert_child_rule(media, ".selector { color: green }", 2), Ok(2));
        assert_eq!(
            sheet.insert_child_rule(media, "@import \"a.css\";", 0),
            Err(Error::InvalidPosition)
        );
        assert_eq!(
            sheet.insert_child_rule(media, "@top-left {}", 0),
            Err(Error::InvalidPosition)
        );

        let removed = sheet.delete_child_rule(media, 0).unwrap();
        assert_eq!(removed.css_text(), ".selector { color: red; }");
        assert_eq!(
            sheet.css_text(),
            "@media screen { .selector { color: orange; } .selector { color: green; } }"
        );
    }

    #[test]
    fn test_nested_style_rule_children() {
        let mut sheet = StyleSheet::parse(".a { color: red }", SheetConfig::default());
        let style = sheet.top_level()[0];

        assert_eq!(sheet.insert_child_rule(style, ".b { top: 1px }", 0), Ok(0));
        assert_eq!(sheet.insert_child_rule(style, "@media print { top: 0 }", 1), Ok(1));
        assert_eq!(
            sheet.insert_child_rule(style, "@font-face {}", 0),
            Err(Error::InvalidPosition)
        );
        assert_eq!(
            sheet.css_text(),
            ".a { color: red; & .b { top: 1px; } @media print {} }"
        );
    }

    #[test]
    fn test_margin_rules_take_canonical_slots() {
        let mut sheet = StyleSheet::parse("@page { color: green }", SheetConfig::default());
        let page = sheet.top_level()[0];

        assert_eq!(sheet.insert_child_rule(page, "@top-left {}", 0), Ok(0));
        assert_eq!(sheet.insert_child_rule(page, "invalid", 0), Err(Error::InvalidRuleSyntax));
        assert_eq!(sheet.insert_child_rule(page, "@top-left-corner {}", 1), Ok(0));
        assert_eq!(sheet.insert_child_rule(page, "@top-center {}", 0), Ok(2));
        assert_eq!(
            sheet.insert_child_rule(page, "@top-right {}", 4),
            Err(Error::invalid_index(4, 3))
        );
        assert_eq!(
            sheet.insert_child_rule(page, ".a {}", 0),
            Err(Error::InvalidPosition)
        );

        let names: Vec<_> = sheet
            .rule(page)
            .unwrap()
            .child_rules()
            .iter()
            .filter_map(|rule| rule.name())
            .collect();
        assert_eq!(names, vec!["top-left-corner", "top-left", "top-center"]);

        let removed = sheet.delete_child_rule(page, 0).unwrap();
        assert!(removed.rule().unwrap().parent().is_none());
        assert_eq!(
            sheet.css_text(),
            "@page { color: green; @top-left {} @top-center {} }"
        );
    }

    #[test]
    fn test_children_of_leaf_rules_are_rejected() {
        let mut sheet = StyleSheet::parse("@font-face {}", SheetConfig::default());
        let font_face = sheet.top_level()[0];
        assert_eq!(
            sheet.insert_child_rule(font_face, ".a {}", 0),
            Err(Error::UnknownRule)
        );
    }
}
