//! Grammar validation tests: which statements and declarations survive parsing.

use std::sync::Arc;

use horizon_lattice_cssom::declarations::{DeclarationContext, Validation};
use horizon_lattice_cssom::prelude::*;
use horizon_lattice_cssom::syntax::{ComponentValue, serialize_values, trim_whitespace};

fn parse(css: &str) -> StyleSheet {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    StyleSheet::parse(css, SheetConfig::default())
}

fn kinds(list: &RuleList<'_>) -> Vec<RuleKind> {
    list.iter().map(|rule| rule.kind()).collect()
}

#[test]
fn test_html_comments_are_skipped_at_top_level() {
    let sheet = parse(
        r#"
        <!-- .selector { color: green } -->
        .selector {
            <!-- color: red; -->;
            color: green;
            <!-- color: red; -->
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    assert_eq!(rules.len(), 2);
    let second = rules.item(1).unwrap();
    assert_eq!(second.property_value("color"), Some("green"));
    assert_eq!(second.declaration_count(), 1);
}

#[test]
fn test_unknown_and_malformed_rules_are_dropped() {
    let sheet = parse(
        r#"
        @unknown {}
        @unknown;
        @namespace ns {}
        @media all;
        .selector;
        "#,
    );
    assert!(sheet.rules().unwrap().is_empty());
}

#[test]
fn test_charset_is_ignored() {
    let sheet = parse(
        r#"
        @charset "utf-8";
        .selector { color: green; }
        @charset "utf-8";
        .selector { color: green; }
        "#,
    );
    assert_eq!(
        kinds(&sheet.rules().unwrap()),
        vec![RuleKind::Style, RuleKind::Style]
    );
}

#[test]
fn test_import_after_other_rules_is_dropped() {
    let sheet = parse(
        r#"
        .selector { color: green; }
        @import "./stylesheet.css";
        .selector { color: green; }
        "#,
    );
    assert_eq!(
        kinds(&sheet.rules().unwrap()),
        vec![RuleKind::Style, RuleKind::Style]
    );
}

#[test]
fn test_invalid_rules_do_not_close_the_prologue() {
    let sheet = parse(
        r#"
        @namespace <bad-string-or-url>;
        @import "./stylesheet.css";
        @charset "utf-8";
        "#,
    );
    assert_eq!(kinds(&sheet.rules().unwrap()), vec![RuleKind::Import]);

    let sheet = parse(
        r#"
        @import <bad-string-or-url>;
        @namespace svg "http://www.w3.org/2000/svg";
        @charset "UTF-8";
        @import <bad-string-or-url>;
        "#,
    );
    let rules = sheet.rules().unwrap();
    assert_eq!(kinds(&rules), vec![RuleKind::Namespace]);
    assert_eq!(rules.item(0).unwrap().prefix(), Some("svg"));
}

#[test]
fn test_namespace_after_style_rule_is_dropped() {
    let sheet = parse(
        r#"
        .selector { color: green; }
        @namespace svg "http://www.w3.org/2000/svg";
        .selector { color: green; }
        "#,
    );
    assert_eq!(
        kinds(&sheet.rules().unwrap()),
        vec![RuleKind::Style, RuleKind::Style]
    );
    assert!(!sheet.namespaces().is_declared("svg"));
}

#[test]
fn test_rules_not_allowed_at_top_level() {
    let sheet = parse(
        r#"
        @top-left {}
        & { color: green; }
        0% {}
        "#,
    );
    assert_eq!(kinds(&sheet.rules().unwrap()), vec![RuleKind::Style]);
}

#[test]
fn test_rules_not_allowed_in_conditional_rules() {
    for prelude in ["@media all", "@supports (color: green)"] {
        let sheet = parse(&format!(
            r#"
            {prelude} {{
                @import "./stylesheet.css";
                @namespace svg "http://www.w3.org/2000/svg";
                @top-left {{}}
                & {{ color: green; }}
                0% {{}}
            }}
            "#
        ));
        let rules = sheet.rules().unwrap();
        let children = rules.item(0).unwrap().child_rules();
        assert_eq!(kinds(&children), vec![RuleKind::Style], "in {prelude}");
    }
}

#[test]
fn test_rules_not_allowed_in_keyframes() {
    let sheet = parse(
        r#"
        @keyframes myAnimation {
            @import "./stylesheet.css";
            @namespace svg "http://www.w3.org/2000/svg";
            @keyframes subAnimation {}
            @media all {}
            @top-left {}
            @supports (color: red) {}
            .selector {}
            0% { color: green; }
            & {}
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let keyframes = rules.item(0).unwrap();
    assert_eq!(kinds(&keyframes.child_rules()), vec![RuleKind::Keyframe]);
    assert_eq!(keyframes.name().as_deref(), Some("myAnimation"));
}

#[test]
fn test_rules_not_allowed_in_page() {
    let sheet = parse(
        r#"
        @page {
            @import "./stylesheet.css";
            @namespace svg "http://www.w3.org/2000/svg";
            @keyframes myAnimation {}
            @media all {}
            @supports (color: red) {}
            & {};
            @top-left { color: green; }
            color: green;
            0% {}
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let page = rules.item(0).unwrap();
    assert_eq!(kinds(&page.child_rules()), vec![RuleKind::Margin]);
    assert_eq!(page.property_value("color"), Some("green"));

    let margin = page.child_rules().item(0).unwrap();
    assert_eq!(margin.name().as_deref(), Some("top-left"));
    assert_eq!(margin.property_value("color"), Some("green"));
}

#[test]
fn test_leaf_blocks_keep_only_declarations() {
    let sheet = parse(
        r#"
        @keyframes myAnimation {
            0% {
                @media all {}
                & {};
                color: green;
                0% {}
            }
        }
        @page {
            @top-left {
                @top-left {}
                @supports (color: red) {}
                & {};
                color: green;
                0% {}
            }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    for rule in rules.iter() {
        let leaf = rule.child_rules().item(0).unwrap();
        assert!(leaf.child_rules().is_empty());
        assert_eq!(leaf.property_value("color"), Some("green"));
    }
}

#[test]
fn test_rules_not_allowed_in_style_rule() {
    let sheet = parse(
        r#"
        .selector {
            top: 1px;
            @import "./stylesheet.css";
            @namespace svg "http://www.w3.org/2000/svg";
            @keyframes myAnimation {}
            @top-left {}
            identifier {};
            & { color: green; }
            @media all { color: green; }
            @supports (color: green) { color: green; }
            0% {};
            bottom: 1px;
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let style = rules.item(0).unwrap();
    assert_eq!(style.property_value("top"), Some("1px"));
    assert_eq!(style.property_value("bottom"), Some("1px"));

    let children = style.child_rules();
    assert_eq!(
        kinds(&children),
        vec![RuleKind::Style, RuleKind::Media, RuleKind::Supports]
    );
    let nested = children.item(0).unwrap();
    assert_eq!(nested.selector_text().as_deref(), Some("&"));
    assert_eq!(nested.property_value("color"), Some("green"));
}

#[test]
fn test_rules_not_allowed_in_nested_style_rule() {
    let sheet = parse(
        r#"
        .selector {
            & {
                top: 1px;
                @import "./stylesheet.css";
                @keyframes myAnimation {}
                @top-left {}
                identifier {};
                & { color: green; }
                bottom: 2px;
                0% {};
                bottom: 1px;
            }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let nested = rules.item(0).unwrap().child_rules().item(0).unwrap();
    assert_eq!(nested.property_value("top"), Some("1px"));
    assert_eq!(nested.property_value("bottom"), Some("1px"));

    let innermost = nested.child_rules();
    assert_eq!(kinds(&innermost), vec![RuleKind::Style]);
    assert_eq!(innermost.item(0).unwrap().property_value("color"), Some("green"));
}

#[test]
fn test_nested_conditional_rules() {
    let sheet = parse(
        r#"
        .selector {
            @media all {
                top: 1px;
                @import "./stylesheet.css";
                @keyframes myAnimation {}
                @top-left {}
                identifier {};
                @media all { color: green; }
                0% {};
                bottom: 1px;
            }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let media = rules.item(0).unwrap().child_rules().item(0).unwrap();
    assert_eq!(media.kind(), RuleKind::Media);
    assert_eq!(kinds(&media.child_rules()), vec![RuleKind::Media]);
}

#[test]
fn test_undeclared_namespace_prefix() {
    let sheet = parse(
        r#"
        @namespace svg url("http://www.w3.org/2000/svg");
        svg|rect { fill: green }
        SVG|rect { fill: red }
        "#,
    );
    let rules = sheet.rules().unwrap();
    assert_eq!(rules.len(), 2);
    let style = rules.item(1).unwrap();
    assert_eq!(style.selector_text().as_deref(), Some("svg|rect"));
    assert_eq!(style.property_value("fill"), Some("green"));
}

#[test]
fn test_declarations_outside_declaration_blocks_are_dropped() {
    let sheet = parse(
        r#"
        color: red; {}
        .selector { color: green }
        color: red;
        "#,
    );
    assert_eq!(kinds(&sheet.rules().unwrap()), vec![RuleKind::Style]);

    let sheet = parse(
        r#"
        @media all {
            color: red; {}
            @media all { color: red; }
            .selector { color: green; }
            @supports (color: green) { color: red; }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let media = rules.item(0).unwrap();
    assert_eq!(
        kinds(&media.child_rules()),
        vec![RuleKind::Media, RuleKind::Style, RuleKind::Supports]
    );
    assert!(media.declarations().is_none());

    let sheet = parse(
        r#"
        @keyframes myAnimation {
            color: red; {}
            to { color: green; }
            color: red;
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    assert_eq!(
        kinds(&rules.item(0).unwrap().child_rules()),
        vec![RuleKind::Keyframe]
    );
}

#[test]
fn test_unknown_properties_and_invalid_values() {
    let sheet = parse(
        r#"
        .selector {
            unknown-before: red;
            top: invalid;
            color: green;
            bottom: invalid;
            unknown-after: red;
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let style = rules.item(0).unwrap();
    assert_eq!(style.declaration_count(), 1);
    assert_eq!(style.property_value("color"), Some("green"));
}

#[test]
fn test_keyframe_declarations() {
    let sheet = parse(
        r#"
        @keyframes myAnimation {
            to {
                animation-delay: 1s;
                color: green;
                animation-duration: 1s;
                color: red !important;
            }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let keyframe = rules.item(0).unwrap().child_rules().item(0).unwrap();
    assert_eq!(keyframe.declaration_count(), 1);
    assert_eq!(keyframe.property_value("color"), Some("green"));
    assert_eq!(keyframe.key_text().as_deref(), Some("100%"));
}

#[test]
fn test_page_and_margin_declarations() {
    let sheet = parse(
        r#"
        @page {
            top: 1px;
            font-size: 16px;
            bottom: 1px;
            invalid: value;
            font-size: 20px !important;
            @top-left {
                top: 1px;
                content: "allowed";
                bottom: 1px;
                content: "important" !important;
                invalid: value;
            }
        }
        "#,
    );
    let rules = sheet.rules().unwrap();
    let page = rules.item(0).unwrap();
    assert_eq!(page.declaration_count(), 1);
    assert_eq!(page.property_value("font-size"), Some("20px"));
    assert_eq!(page.property_priority("font-size"), "important");

    let margin = page.child_rules().item(0).unwrap();
    assert_eq!(margin.declaration_count(), 1);
    assert_eq!(margin.property_value("content"), Some("\"important\""));
}

#[test]
fn test_vendor_prefixed_rule() {
    let sheet = parse("@-webkit-keyframes myAnimation {}");
    let rules = sheet.rules().unwrap();
    let keyframes = rules.item(0).unwrap();
    assert_eq!(keyframes.kind(), RuleKind::Keyframes);
    assert_eq!(keyframes.css_text(), "@keyframes myAnimation {}");
}

/// Accepts only uppercase-free values, and reports them uppercased.
#[derive(Debug)]
struct ShoutingGrammar;

impl ValueGrammar for ShoutingGrammar {
    fn validate(&self, _name: &str, _context: DeclarationContext, value: &[ComponentValue]) -> Validation {
        let text = serialize_values(trim_whitespace(value));
        if text.chars().any(|c| c.is_ascii_uppercase()) {
            Validation::Rejected
        } else {
            Validation::Accepted(text.to_ascii_uppercase())
        }
    }
}

#[test]
fn test_custom_value_grammar() {
    let options = ParserOptions::default().value_grammar(Arc::new(ShoutingGrammar));
    let mut sheet = StyleSheet::parse(
        ".a { color: red; top: 1PX; unknown: red }",
        SheetConfig::default().parser(options),
    );
    let id = sheet.top_level()[0];
    assert_eq!(sheet.css_text(), ".a { color: RED; }");

    sheet.set_property(id, "top", "auto", false).unwrap();
    assert_eq!(sheet.rule(id).unwrap().property_value("top"), Some("AUTO"));
    assert_eq!(
        sheet.set_property(id, "top", "Auto", false),
        Err(Error::invalid_declaration("top"))
    );
}
