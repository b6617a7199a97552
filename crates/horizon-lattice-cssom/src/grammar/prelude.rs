//! Prelude productions of every rule kind.

use super::names::{
    FamilyName, FeatureType, KeyframeSelector, LayerName, PageSelectorList, is_counter_style_name,
    is_custom_ident, is_dashed_ident, margin_index,
};
use super::{MediaList, RuleContext, RuleKind, parse_container_prelude, parse_supports_condition};
use crate::declarations::FeatureValueMap;
use crate::rules::{ImportLayer, ImportRule, NamespaceTable, RuleData};
use crate::selector::{SelectorMode, parse_selector_list};
use crate::syntax::{ComponentValue, Statement, TokenCursor, split_commas, trim_whitespace};

/// The selector mode of style rules appearing in `context`.
pub fn selector_mode(context: RuleContext) -> SelectorMode {
    match context {
        RuleContext::StyleBlock | RuleContext::NestedGroup => SelectorMode::Nested,
        RuleContext::Scope => SelectorMode::Relative,
        _ => SelectorMode::Absolute,
    }
}

/// Match the prelude of `statement` against the production of `kind`.
///
/// Returns `None` if the prelude is invalid.
pub fn parse_prelude(
    kind: RuleKind,
    statement: &Statement,
    context: RuleContext,
    namespaces: &NamespaceTable,
) -> Option<RuleData> {
    let prelude = trim_whitespace(&statement.prelude);
    let name = statement.name.as_deref().unwrap_or_default();

    match kind {
        RuleKind::Style => {
            let selectors = parse_selector_list(prelude, selector_mode(context), namespaces)?;
            Some(RuleData::Style { selectors })
        }
        RuleKind::Import => parse_import(prelude).map(RuleData::Import),
        RuleKind::Namespace => {
            let (prefix, uri) = parse_namespace(prelude)?;
            Some(RuleData::Namespace { prefix, uri })
        }
        RuleKind::LayerStatement => {
            let names = split_commas(prelude)
                .into_iter()
                .map(LayerName::parse_values)
                .collect::<Option<Vec<_>>>()?;
            Some(RuleData::LayerStatement { names })
        }
        RuleKind::LayerBlock => {
            let name = if prelude.is_empty() {
                None
            } else {
                Some(LayerName::parse_values(prelude)?)
            };
            Some(RuleData::LayerBlock { name })
        }
        RuleKind::Media => Some(RuleData::Media {
            media: MediaList::parse(prelude),
        }),
        RuleKind::Supports => {
            let condition = parse_supports_condition(prelude, false)?;
            Some(RuleData::Supports { condition })
        }
        RuleKind::Container => {
            let (name, query) = parse_container_prelude(prelude)?;
            Some(RuleData::Container { name, query })
        }
        RuleKind::Page => {
            let selectors = PageSelectorList::parse(prelude)?;
            Some(RuleData::Page { selectors })
        }
        RuleKind::Margin => {
            let index = margin_index(&name.to_ascii_lowercase())?;
            prelude.is_empty().then_some(RuleData::Margin { index })
        }
        RuleKind::Keyframes => {
            let name = parse_keyframes_name(prelude)?;
            Some(RuleData::Keyframes { name })
        }
        RuleKind::Keyframe => {
            let selector = KeyframeSelector::parse(prelude)?;
            Some(RuleData::Keyframe { selector })
        }
        RuleKind::FontFeatureValues => {
            let families = FamilyName::parse_list(prelude)?;
            Some(RuleData::FontFeatureValues { families })
        }
        RuleKind::FontFeatureValueType => {
            let feature = FeatureType::from_name(name)?;
            prelude.is_empty().then(|| RuleData::FontFeatureValueType {
                values: FeatureValueMap::new(feature),
            })
        }
        RuleKind::FontPaletteValues => {
            let name = parse_dashed_name(prelude)?;
            Some(RuleData::FontPaletteValues { name })
        }
        RuleKind::PositionTry => {
            let name = parse_dashed_name(prelude)?;
            Some(RuleData::PositionTry { name })
        }
        RuleKind::Property => {
            let name = parse_dashed_name(prelude)?;
            Some(RuleData::Property { name })
        }
        RuleKind::ColorProfile => {
            let name = match prelude {
                [ComponentValue::Ident(ident)] if ident.eq_ignore_ascii_case("device-cmyk") => {
                    "device-cmyk".to_string()
                }
                _ => parse_dashed_name(prelude)?,
            };
            Some(RuleData::ColorProfile { name })
        }
        RuleKind::CounterStyle => match prelude {
            [ComponentValue::Ident(name)] if is_counter_style_name(name) => {
                Some(RuleData::CounterStyle { name: name.clone() })
            }
            _ => None,
        },
        RuleKind::Scope => {
            let (start, end) = parse_scope(prelude, namespaces)?;
            Some(RuleData::Scope { start, end })
        }
        RuleKind::FontFace => prelude.is_empty().then_some(RuleData::FontFace),
        RuleKind::StartingStyle => prelude.is_empty().then_some(RuleData::StartingStyle),
        RuleKind::ViewTransition => prelude.is_empty().then_some(RuleData::ViewTransition),
    }
}

fn parse_import(prelude: &[ComponentValue]) -> Option<ImportRule> {
    let mut cursor = TokenCursor::new(prelude);
    let href = match cursor.next()? {
        ComponentValue::QuotedString(url) => url.clone(),
        value => value.as_url()?.to_string(),
    };

    let layer = if cursor.expect_keyword("layer").is_some() {
        Some(ImportLayer::Anonymous)
    } else if cursor.peek().is_some_and(|value| value.is_function("layer")) {
        let arguments = cursor.next()?.nested()?;
        Some(ImportLayer::Named(LayerName::parse_values(arguments)?))
    } else {
        None
    };

    let supports = if cursor.peek().is_some_and(|value| value.is_function("supports")) {
        let arguments = cursor.next()?.nested()?;
        Some(parse_supports_condition(arguments, true)?)
    } else {
        None
    };

    Some(ImportRule {
        href,
        layer,
        supports,
        media: MediaList::parse(cursor.take_rest()),
    })
}

fn parse_namespace(prelude: &[ComponentValue]) -> Option<(Option<String>, String)> {
    let mut cursor = TokenCursor::new(prelude);
    let prefix = cursor.expect_ident().map(str::to_string);
    let uri = match cursor.next()? {
        ComponentValue::QuotedString(uri) => uri.clone(),
        value => value.as_url()?.to_string(),
    };
    cursor.expect_exhausted()?;
    Some((prefix, uri))
}

fn parse_keyframes_name(prelude: &[ComponentValue]) -> Option<String> {
    match prelude {
        [ComponentValue::Ident(name)] if is_custom_ident(name) && !name.eq_ignore_ascii_case("none") => {
            Some(name.clone())
        }
        [ComponentValue::QuotedString(name)] if !name.is_empty() => Some(name.clone()),
        _ => None,
    }
}

fn parse_dashed_name(prelude: &[ComponentValue]) -> Option<String> {
    match prelude {
        [ComponentValue::Ident(name)] if is_dashed_ident(name) => Some(name.clone()),
        _ => None,
    }
}

type ScopeBounds = (Option<crate::selector::SelectorList>, Option<crate::selector::SelectorList>);

fn parse_scope(prelude: &[ComponentValue], namespaces: &NamespaceTable) -> Option<ScopeBounds> {
    let mut cursor = TokenCursor::new(prelude);

    let start = match cursor.peek() {
        Some(ComponentValue::ParenthesisBlock(inner)) => {
            cursor.next();
            Some(parse_selector_list(inner, SelectorMode::Absolute, namespaces)?)
        }
        _ => None,
    };

    let end = if cursor.expect_keyword("to").is_some() {
        match cursor.next()? {
            ComponentValue::ParenthesisBlock(inner) => {
                Some(parse_selector_list(inner, SelectorMode::Relative, namespaces)?)
            }
            _ => return None,
        }
    } else {
        None
    };

    cursor.expect_exhausted()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{BlockItem, ContentMode, Statements, tokenize};

    fn parse(css: &str, kind: RuleKind) -> Option<RuleData> {
        let values = tokenize(css);
        let Some(BlockItem::Rule(statement)) =
            Statements::new(&values, ContentMode::Stylesheet).next()
        else {
            return None;
        };
        parse_prelude(kind, &statement, RuleContext::Stylesheet, &NamespaceTable::default())
    }

    #[test]
    fn test_import_prelude() {
        let Some(RuleData::Import(import)) = parse(
            "@import url(a.css) layer(base.reset) supports(display: grid) screen;",
            RuleKind::Import,
        ) else {
            panic!("expected an import rule");
        };
        assert_eq!(import.href, "a.css");
        assert_eq!(import.layer_name().as_deref(), Some("base.reset"));
        assert_eq!(import.supports_text(), Some("display: grid"));
        assert_eq!(import.media.media_text(), "screen");

        let Some(RuleData::Import(import)) = parse("@import \"b.css\" layer;", RuleKind::Import)
        else {
            panic!("expected an import rule");
        };
        assert_eq!(import.layer_name().as_deref(), Some(""));
        assert!(import.media.is_empty());

        assert!(parse("@import layer;", RuleKind::Import).is_none());
        assert!(parse("@import \"a.css\" layer();", RuleKind::Import).is_none());
    }

    #[test]
    fn test_namespace_prelude() {
        assert_eq!(
            parse("@namespace svg url(http://www.w3.org/2000/svg);", RuleKind::Namespace),
            Some(RuleData::Namespace {
                prefix: Some("svg".into()),
                uri: "http://www.w3.org/2000/svg".into(),
            })
        );
        assert_eq!(
            parse("@namespace \"urn:x\";", RuleKind::Namespace),
            Some(RuleData::Namespace {
                prefix: None,
                uri: "urn:x".into(),
            })
        );
        assert!(parse("@namespace a b;", RuleKind::Namespace).is_none());
    }

    #[test]
    fn test_named_rules() {
        assert!(parse("@keyframes none {}", RuleKind::Keyframes).is_none());
        assert!(parse("@keyframes {}", RuleKind::Keyframes).is_none());
        assert!(parse("@keyframes \"\" {}", RuleKind::Keyframes).is_none());
        assert!(parse("@counter-style decimal {}", RuleKind::CounterStyle).is_none());
        assert!(parse("@counter-style thumbs {}", RuleKind::CounterStyle).is_some());
        assert!(parse("@property --x {}", RuleKind::Property).is_some());
        assert!(parse("@property x {}", RuleKind::Property).is_none());
        assert!(parse("@color-profile device-cmyk {}", RuleKind::ColorProfile).is_some());
        assert!(parse("@font-face x {}", RuleKind::FontFace).is_none());
        assert!(parse("@layer a, b.c;", RuleKind::LayerStatement).is_some());
        assert!(parse("@layer a, ;", RuleKind::LayerStatement).is_none());
    }

    #[test]
    fn test_scope_prelude() {
        let Some(RuleData::Scope { start, end }) =
            parse("@scope (.card) to (> .content) {}", RuleKind::Scope)
        else {
            panic!("expected a scope rule");
        };
        assert_eq!(start.map(|list| list.to_string()).as_deref(), Some(".card"));
        assert_eq!(end.map(|list| list.to_string()).as_deref(), Some("> .content"));

        assert_eq!(
            parse("@scope {}", RuleKind::Scope),
            Some(RuleData::Scope {
                start: None,
                end: None
            })
        );
        assert!(parse("@scope .card {}", RuleKind::Scope).is_none());
    }
}
