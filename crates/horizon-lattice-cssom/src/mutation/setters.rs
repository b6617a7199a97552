//! Setters for selectors, names, declarations and font feature values.

use crate::declarations::{DeclarationValidator, FeatureValueMap};
use crate::grammar::{FeatureType, PageSelectorList, RuleContext, RuleKind, is_counter_style_name, selector_mode};
use crate::logging::targets;
use crate::rules::{RuleData, RuleId, RuleNode, StyleSheet, canonical_slot};
use crate::selector::parse_selector_text;
use crate::syntax::{ComponentValue, tokenize, trim_whitespace};
use crate::{Error, Result};

impl StyleSheet {
    /// Set the selector text of a style rule or `@page` rule.
    ///
    /// Invalid selector text is ignored.
    pub fn set_selector_text(&mut self, id: RuleId, text: &str) -> Result<()> {
        self.ensure_origin_clean()?;
        let node = self.arena.get(id).ok_or(Error::UnknownRule)?;

        let data = match node.kind() {
            RuleKind::Style => {
                parse_selector_text(text, selector_mode(node.context), &self.namespaces)
                    .map(|selectors| RuleData::Style { selectors })
            }
            RuleKind::Page => PageSelectorList::parse(&tokenize(text))
                .map(|selectors| RuleData::Page { selectors }),
            _ => return Err(Error::UnknownRule),
        };

        match data {
            Some(data) => {
                if let Some(node) = self.arena.get_mut(id) {
                    node.data = data;
                }
            }
            None => {
                tracing::debug!(target: targets::MUTATION, text, "ignoring invalid selector text");
            }
        }
        Ok(())
    }

    /// Rename a `@counter-style` rule.
    ///
    /// Fails with [`Error::InvalidName`] for an empty or reserved name.
    pub fn set_counter_style_name(&mut self, id: RuleId, name: &str) -> Result<()> {
        self.ensure_origin_clean()?;
        self.node_of_kind(id, RuleKind::CounterStyle)?;

        let values = tokenize(name);
        let name = match trim_whitespace(&values) {
            [ComponentValue::Ident(ident)] if is_counter_style_name(ident) => ident.clone(),
            _ => return Err(Error::invalid_name(name)),
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.data = RuleData::CounterStyle { name };
        }
        Ok(())
    }

    /// Validate and store a declaration in the declaration set of `id`.
    ///
    /// An empty value removes the declaration. A rejected declaration fails
    /// with [`Error::InvalidDeclaration`] and leaves the set unchanged.
    pub fn set_property(&mut self, id: RuleId, name: &str, value: &str, important: bool) -> Result<()> {
        self.ensure_origin_clean()?;
        if trim_whitespace(&tokenize(value)).is_empty() {
            return self.remove_property(id, name).map(|_| ());
        }

        let validator = DeclarationValidator::new(self.config.parser.value_grammar.clone());
        let block = self
            .arena
            .get_mut(id)
            .and_then(|node| node.declarations.as_mut())
            .ok_or(Error::UnknownRule)?;
        let (name, stored) = validator.parse(block.context(), name, value, important)?;
        block.insert(&name, stored);

        tracing::trace!(target: targets::MUTATION, name = %name, "set declaration");
        Ok(())
    }

    /// Remove a declaration from `id`, returning its value.
    pub fn remove_property(&mut self, id: RuleId, name: &str) -> Result<Option<String>> {
        self.ensure_origin_clean()?;
        let block = self
            .arena
            .get_mut(id)
            .and_then(|node| node.declarations.as_mut())
            .ok_or(Error::UnknownRule)?;
        Ok(block.remove(name).map(|declaration| declaration.value))
    }

    /// Set the values of a named feature in a `@font-feature-values` rule.
    ///
    /// The feature value block is created if the rule has none for
    /// `feature`. Values violating the arity or range of the feature type
    /// fail with [`Error::InvalidFeatureValue`].
    pub fn set_feature_value(
        &mut self,
        id: RuleId,
        feature: FeatureType,
        name: &str,
        values: Vec<u32>,
    ) -> Result<()> {
        self.ensure_origin_clean()?;
        self.node_of_kind(id, RuleKind::FontFeatureValues)?;

        if let Some(map) = self.feature_map_mut(id, feature) {
            return map.set(name, values);
        }

        let mut map = FeatureValueMap::new(feature);
        map.set(name, values)?;
        let child = self.arena.insert(RuleNode::new(
            RuleData::FontFeatureValueType { values: map },
            None,
            RuleContext::FontFeatureValues,
        ));
        let index = canonical_slot(&self.arena, id, child)
            .unwrap_or_else(|| self.arena.children(id).len());
        self.arena.attach_child(id, index, child);
        Ok(())
    }

    /// Delete a named feature from a `@font-feature-values` rule, returning
    /// `true` if it was present.
    pub fn delete_feature_value(&mut self, id: RuleId, feature: FeatureType, name: &str) -> Result<bool> {
        self.ensure_origin_clean()?;
        self.node_of_kind(id, RuleKind::FontFeatureValues)?;
        Ok(self
            .feature_map_mut(id, feature)
            .is_some_and(|map| map.delete(name)))
    }

    fn feature_map_mut(&mut self, id: RuleId, feature: FeatureType) -> Option<&mut FeatureValueMap> {
        let child = self.arena.children(id).iter().copied().find(|&child| {
            matches!(
                self.arena.get(child).map(|node| &node.data),
                Some(RuleData::FontFeatureValueType { values }) if values.feature() == feature
            )
        })?;
        match &mut self.arena.get_mut(child)?.data {
            RuleData::FontFeatureValueType { values } => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    fn sheet(css: &str) -> (StyleSheet, RuleId) {
        let sheet = StyleSheet::parse(css, SheetConfig::default());
        let id = sheet.top_level()[0];
        (sheet, id)
    }

    #[test]
    fn test_set_selector_text() {
        let (mut sheet, id) = sheet(".a { color: red }");
        sheet.set_selector_text(id, ".b > .c").unwrap();
        assert_eq!(sheet.css_text(), ".b > .c { color: red; }");

        sheet.set_selector_text(id, "> invalid").unwrap();
        assert_eq!(sheet.css_text(), ".b > .c { color: red; }");

        let (mut sheet, page) = super::tests::sheet("@page { color: green }");
        sheet.set_selector_text(page, "intro:first").unwrap();
        assert_eq!(sheet.css_text(), "@page intro:first { color: green; }");
        sheet.set_selector_text(page, ":nope").unwrap();
        assert_eq!(sheet.css_text(), "@page intro:first { color: green; }");
    }

    #[test]
    fn test_counter_style_name() {
        let (mut sheet, id) = sheet("@counter-style thumbs { system: cyclic; symbols: \"a\" }");
        sheet.set_counter_style_name(id, "stars").unwrap();
        assert_eq!(sheet.rule(id).unwrap().name().as_deref(), Some("stars"));

        assert_eq!(sheet.set_counter_style_name(id, ""), Err(Error::invalid_name("")));
        assert_eq!(sheet.set_counter_style_name(id, "decimal"), Err(Error::invalid_name("decimal")));
        assert_eq!(sheet.rule(id).unwrap().name().as_deref(), Some("stars"));
    }

    #[test]
    fn test_set_and_remove_property() {
        let (mut sheet, id) = sheet(".a { color: red }");

        sheet.set_property(id, "TOP", "1px", true).unwrap();
        let rule = sheet.rule(id).unwrap();
        assert_eq!(rule.property_value("top"), Some("1px"));
        assert_eq!(rule.property_priority("top"), "important");

        assert_eq!(
            sheet.set_property(id, "not-a-property", "1px", false),
            Err(Error::invalid_declaration("not-a-property"))
        );
        assert_eq!(sheet.rule(id).unwrap().declaration_count(), 2);

        assert_eq!(sheet.remove_property(id, "color"), Ok(Some("red".to_string())));
        sheet.set_property(id, "top", "", false).unwrap();
        assert_eq!(sheet.css_text(), ".a {}");
    }

    #[test]
    fn test_descriptor_setters_respect_context() {
        let (mut sheet, id) = sheet("@font-face { font-family: Serif }");
        assert!(sheet.set_property(id, "font-display", "swap", false).is_ok());
        assert_eq!(
            sheet.set_property(id, "font-display", "swap", true),
            Err(Error::invalid_declaration("font-display"))
        );
        assert_eq!(
            sheet.set_property(id, "color", "red", false),
            Err(Error::invalid_declaration("color"))
        );

        let (mut sheet, media) = super::tests::sheet("@media print {}");
        assert_eq!(
            sheet.set_property(media, "color", "red", false),
            Err(Error::UnknownRule)
        );
    }

    #[test]
    fn test_feature_values() {
        let (mut sheet, id) = sheet("@font-feature-values Font One { @swash { fancy: 1 } }");

        sheet.set_feature_value(id, FeatureType::Styleset, "nice", vec![1, 2]).unwrap();
        sheet.set_feature_value(id, FeatureType::Swash, "plain", vec![0]).unwrap();
        assert_eq!(
            sheet.set_feature_value(id, FeatureType::Swash, "fancy", vec![1, 2]),
            Err(Error::invalid_feature_value("fancy"))
        );
        assert_eq!(
            sheet.set_feature_value(id, FeatureType::Annotation, "big", vec![100]),
            Err(Error::invalid_feature_value("big"))
        );

        let rule = sheet.rule(id).unwrap();
        assert!(rule.feature_values(FeatureType::Annotation).is_none());
        assert_eq!(
            rule.feature_values(FeatureType::Swash).unwrap().get("fancy"),
            Some(&[1][..])
        );
        assert_eq!(
            sheet.css_text(),
            "@font-feature-values Font One { @styleset { nice: 1 2; } @swash { fancy: 1; plain: 0; } }"
        );

        assert_eq!(sheet.delete_feature_value(id, FeatureType::Swash, "fancy"), Ok(true));
        assert_eq!(sheet.delete_feature_value(id, FeatureType::Swash, "fancy"), Ok(false));
        assert_eq!(sheet.delete_feature_value(id, FeatureType::Ornaments, "x"), Ok(false));
    }
}
