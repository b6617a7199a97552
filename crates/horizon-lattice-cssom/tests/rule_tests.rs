//! Rule object tests: accessors, serialization and per-rule mutation.

use horizon_lattice_cssom::prelude::*;

fn parse(css: &str) -> StyleSheet {
    StyleSheet::parse(css, SheetConfig::default())
}

fn first(sheet: &StyleSheet) -> RuleId {
    sheet.top_level()[0]
}

#[test]
fn test_constructed_stylesheet_metadata() {
    let sheet = StyleSheet::new(SheetConfig::constructed().disabled(true).media("all"));
    assert!(sheet.is_constructed());
    assert!(sheet.disabled());
    assert_eq!(sheet.media().media_text(), "all");
    assert_eq!(sheet.title(), None);
    assert!(sheet.rules().unwrap().is_empty());
}

#[test]
fn test_parsed_stylesheet_metadata() {
    let config = SheetConfig::default()
        .location("http://github.com/cdoublev/css/")
        .media("all")
        .title("Main CSS");
    let sheet = StyleSheet::parse("@import \"./stylesheet.css\"; .selector {}", config);

    assert!(!sheet.is_constructed());
    assert!(!sheet.disabled());
    assert_eq!(sheet.href(), Some("http://github.com/cdoublev/css/"));
    assert_eq!(sheet.title(), Some("Main CSS"));
    assert_eq!(sheet.media().media_text(), "all");

    let rules = sheet.rules().unwrap();
    assert_eq!(rules.item(0).unwrap().kind(), RuleKind::Import);
    assert_eq!(rules.item(1).unwrap().kind(), RuleKind::Style);
    assert!(rules.item(2).is_none());
}

#[test]
fn test_font_face_rule() {
    let sheet = parse("@font-face { src: url(serif.woff2); }");
    let rule = sheet.rule(first(&sheet)).unwrap();
    assert_eq!(rule.css_text(), "@font-face { src: url(\"serif.woff2\"); }");
    assert!(rule.parent().is_none());
    assert_eq!(rule.declaration_count(), 1);
}

#[test]
fn test_import_rule() {
    let sheet = parse("@import \"./stylesheet.css\";");
    let rule = sheet.rule(first(&sheet)).unwrap();
    assert_eq!(rule.css_text(), "@import url(\"./stylesheet.css\");");
    assert_eq!(rule.import().unwrap().href, "./stylesheet.css");
    assert!(rule.media().unwrap().is_empty());
}

#[test]
fn test_keyframe_rule() {
    let mut sheet = parse("@keyframes myAnimation { to { color: red; color: orange } }");
    let keyframes = first(&sheet);
    let keyframe = sheet.arena().children(keyframes)[0];
    {
        let rule = sheet.rule(keyframe).unwrap();
        assert_eq!(rule.css_text(), "100% { color: orange; }");
        assert_eq!(rule.parent().map(|parent| parent.id()), Some(keyframes));
        assert_eq!(rule.key_text().as_deref(), Some("100%"));
        assert_eq!(rule.declaration_count(), 1);
    }

    sheet.set_property(keyframe, "color", "green", false).unwrap();
    assert_eq!(sheet.rule(keyframe).unwrap().css_text(), "100% { color: green; }");

    sheet.set_key_text(keyframe, "from").unwrap();
    let rule = sheet.rule(keyframe).unwrap();
    assert_eq!(rule.key_text().as_deref(), Some("0%"));
    assert_eq!(rule.css_text(), "0% { color: green; }");

    assert_eq!(
        sheet.set_key_text(keyframe, "101%"),
        Err(Error::InvalidKeyText("101%".to_string()))
    );
}

#[test]
fn test_keyframes_rule() {
    let mut sheet = parse("@keyframes myAnimation { to { color: green } }");
    let keyframes = first(&sheet);
    {
        let rule = sheet.rule(keyframes).unwrap();
        assert_eq!(rule.css_text(), "@keyframes myAnimation { 100% { color: green; } }");
        assert_eq!(rule.child_rules().len(), 1);
        assert_eq!(rule.name().as_deref(), Some("myAnimation"));
    }

    sheet.set_keyframes_name(keyframes, "myAnimationName").unwrap();
    assert_eq!(
        sheet.rule(keyframes).unwrap().css_text(),
        "@keyframes myAnimationName { 100% { color: green; } }"
    );
}

#[test]
fn test_margin_rule() {
    let mut sheet = parse("@page { @top-left { color: red; color: orange } }");
    let page = first(&sheet);
    let margin = sheet.arena().children(page)[0];
    {
        let rule = sheet.rule(margin).unwrap();
        assert_eq!(rule.css_text(), "@top-left { color: orange; }");
        assert_eq!(rule.parent().map(|parent| parent.id()), Some(page));
        assert_eq!(rule.name().as_deref(), Some("top-left"));
    }

    sheet.set_property(margin, "color", "green", false).unwrap();
    assert_eq!(sheet.rule(margin).unwrap().property_value("color"), Some("green"));
}

#[test]
fn test_media_rule() {
    let sheet = parse("@media all { .selector { color: green } }");
    let rule = sheet.rule(first(&sheet)).unwrap();
    assert_eq!(rule.css_text(), "@media all { .selector { color: green; } }");
    assert_eq!(rule.condition_text().as_deref(), Some("all"));
    assert_eq!(rule.media().unwrap().media_text(), "all");
    assert_eq!(rule.child_rules().len(), 1);
}

#[test]
fn test_media_rule_children() {
    let mut sheet = parse("@media all {}");
    let media = first(&sheet);

    sheet.insert_child_rule(media, ".selector { color: orange }", 0).unwrap();
    assert_eq!(
        sheet.insert_child_rule(media, "invalid", 0),
        Err(Error::InvalidRuleSyntax)
    );
    sheet.insert_child_rule(media, ".selector { color: red }", 0).unwrap();
    sheet.insert_child_rule(media, ".selector { color: green }", 2).unwrap();

    let colors = |sheet: &StyleSheet| -> Vec<String> {
        sheet
            .rule(media)
            .unwrap()
            .child_rules()
            .iter()
            .filter_map(|rule| rule.property_value("color").map(str::to_string))
            .collect()
    };
    assert_eq!(colors(&sheet), vec!["red", "orange", "green"]);

    let removed = sheet.delete_child_rule(media, 0).unwrap();
    assert!(removed.rule().unwrap().parent().is_none());
    assert_eq!(colors(&sheet), vec!["orange", "green"]);
}

#[test]
fn test_namespace_rule() {
    let sheet = parse("@namespace svg \"http://www.w3.org/2000/svg\";");
    let rule = sheet.rule(first(&sheet)).unwrap();
    assert_eq!(rule.css_text(), "@namespace svg url(\"http://www.w3.org/2000/svg\");");
    assert_eq!(rule.namespace_uri(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(rule.prefix(), Some("svg"));
}

#[test]
fn test_page_rule() {
    let mut sheet = parse("@page intro { color: red; color: orange; @top-left {} }");
    let page = first(&sheet);
    {
        let rule = sheet.rule(page).unwrap();
        assert_eq!(rule.css_text(), "@page intro { color: orange; @top-left {} }");
        assert_eq!(rule.selector_text().as_deref(), Some("intro"));
        assert_eq!(rule.declaration_count(), 1);
    }

    sheet.set_property(page, "color", "green", false).unwrap();
    assert_eq!(
        sheet.rule(page).unwrap().css_text(),
        "@page intro { color: green; @top-left {} }"
    );

    sheet.set_selector_text(page, "outro").unwrap();
    let rule = sheet.rule(page).unwrap();
    assert_eq!(rule.selector_text().as_deref(), Some("outro"));
    assert_eq!(rule.css_text(), "@page outro { color: green; @top-left {} }");
}

#[test]
fn test_page_rule_margins() {
    let mut sheet = parse("@page {}");
    let page = first(&sheet);

    sheet.insert_child_rule(page, "@top-left {}", 0).unwrap();
    assert_eq!(
        sheet.insert_child_rule(page, "invalid", 0),
        Err(Error::InvalidRuleSyntax)
    );
    assert_eq!(sheet.insert_child_rule(page, "@top-left-corner {}", 1), Ok(0));
    assert_eq!(sheet.insert_child_rule(page, "@top-center {}", 2), Ok(2));

    let names = |sheet: &StyleSheet| -> Vec<String> {
        sheet
            .rule(page)
            .unwrap()
            .child_rules()
            .iter()
            .filter_map(|rule| rule.name())
            .collect()
    };
    assert_eq!(names(&sheet), vec!["top-left-corner", "top-left", "top-center"]);

    sheet.delete_child_rule(page, 0).unwrap();
    assert_eq!(names(&sheet), vec!["top-left", "top-center"]);
}

#[test]
fn test_style_rule() {
    let mut sheet = parse(
        r#"
        .selector {
            color: red;
            color: orange;
            & .child {
                color: red;
                color: orange
            }
        }
        "#,
    );
    let style = first(&sheet);
    let nested = sheet.arena().children(style)[0];
    {
        let rule = sheet.rule(style).unwrap();
        let child = sheet.rule(nested).unwrap();
        assert_eq!(rule.css_text(), ".selector { color: orange; & .child { color: orange; } }");
        assert_eq!(child.css_text(), "& .child { color: orange; }");
        assert!(rule.parent().is_none());
        assert_eq!(child.parent().map(|parent| parent.id()), Some(style));
        assert_eq!(rule.selector_text().as_deref(), Some(".selector"));
        assert_eq!(child.selector_text().as_deref(), Some("& .child"));
    }

    sheet.set_property(style, "color", "green", false).unwrap();
    sheet.set_property(nested, "color", "green", false).unwrap();
    sheet.set_selector_text(style, ".selector-element").unwrap();
    sheet.set_selector_text(nested, "& .child-element").unwrap();

    assert_eq!(
        sheet.rule(style).unwrap().css_text(),
        ".selector-element { color: green; & .child-element { color: green; } }"
    );
    assert_eq!(
        sheet.rule(nested).unwrap().css_text(),
        "& .child-element { color: green; }"
    );
}

#[test]
fn test_style_rule_children() {
    let mut sheet = parse(".selector {}");
    let style = first(&sheet);

    sheet.insert_child_rule(style, "@media screen {}", 0).unwrap();
    sheet.insert_child_rule(style, "@media print {}", 0).unwrap();
    sheet.insert_child_rule(style, "@media all {}", 2).unwrap();

    let conditions = |sheet: &StyleSheet| -> Vec<String> {
        sheet
            .rule(style)
            .unwrap()
            .child_rules()
            .iter()
            .filter_map(|rule| rule.condition_text())
            .collect()
    };
    assert_eq!(conditions(&sheet), vec!["print", "screen", "all"]);

    sheet.delete_child_rule(style, 0).unwrap();
    assert_eq!(conditions(&sheet), vec!["screen", "all"]);
}

#[test]
fn test_supports_rule() {
    let mut sheet = parse("@supports (color: green) { .selector { color: green } }");
    let supports = first(&sheet);
    {
        let rule = sheet.rule(supports).unwrap();
        assert_eq!(
            rule.css_text(),
            "@supports (color: green) { .selector { color: green; } }"
        );
        assert_eq!(rule.condition_text().as_deref(), Some("(color: green)"));
    }

    sheet.insert_child_rule(supports, ".selector { color: red }", 0).unwrap();
    let rule = sheet.rule(supports).unwrap();
    assert_eq!(rule.child_rules().len(), 2);
    assert_eq!(
        rule.child_rules().item(0).unwrap().property_value("color"),
        Some("red")
    );
}

#[test]
fn test_tree_debug_output() {
    let sheet = parse("@media all { .a { color: red } } .b {}");
    let output = RuleTreeDebug::for_sheet(&sheet).format_all();
    assert!(output.starts_with("Rule Tree (3 total rules):"));
    assert!(output.contains("@media"));
}
