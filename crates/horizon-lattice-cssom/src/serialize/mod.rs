//! Canonical serialization of rules and stylesheets.
//!
//! Serialization is a pure function of the tree: at-rule names are written
//! in lowercase, declarations in canonical order, and nested blocks are
//! joined with single spaces. An empty block is written as `{}`.

use std::fmt::{self, Write};

use crate::grammar::is_custom_ident;
use crate::rules::{ImportLayer, ImportRule, RuleArena, RuleData, RuleId, RuleNode};
use crate::syntax::{identifier_to_css, string_to_css, url_to_css};

/// Serialize a rule and its descendants.
pub fn rule_css_text(arena: &RuleArena, id: RuleId) -> String {
    let mut out = String::new();
    let _ = write_rule(arena, id, &mut out);
    out
}

/// Serialize a list of rules, one rule per line.
pub fn rules_css_text(arena: &RuleArena, ids: &[RuleId]) -> String {
    ids.iter()
        .map(|&id| rule_css_text(arena, id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write a rule and its descendants to `dest`.
///
/// Unknown ids write nothing.
pub fn write_rule<W: Write>(arena: &RuleArena, id: RuleId, dest: &mut W) -> fmt::Result {
    let Some(node) = arena.get(id) else {
        return Ok(());
    };

    match &node.data {
        RuleData::Style { selectors } => {
            write!(dest, "{selectors}")?;
            write_block(arena, node, dest)
        }
        RuleData::Import(import) => write_import(import, dest),
        RuleData::Namespace { prefix, uri } => {
            dest.write_str("@namespace ")?;
            if let Some(prefix) = prefix {
                write!(dest, "{} ", identifier_to_css(prefix))?;
            }
            write!(dest, "{};", url_to_css(uri))
        }
        RuleData::LayerStatement { names } => {
            dest.write_str("@layer ")?;
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    dest.write_str(", ")?;
                }
                write!(dest, "{name}")?;
            }
            dest.write_char(';')
        }
        RuleData::LayerBlock { name } => {
            dest.write_str("@layer")?;
            if let Some(name) = name {
                write!(dest, " {name}")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::Media { media } => {
            dest.write_str("@media")?;
            if !media.is_empty() {
                write!(dest, " {media}")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::Supports { condition } => {
            write!(dest, "@supports {condition}")?;
            write_block(arena, node, dest)
        }
        RuleData::Container { .. } => {
            dest.write_str("@container")?;
            if let Some(condition) = node.data.condition_text()
                && !condition.is_empty()
            {
                write!(dest, " {condition}")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::Page { selectors } => {
            dest.write_str("@page")?;
            if !selectors.is_empty() {
                write!(dest, " {selectors}")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::Margin { .. } => {
            write!(dest, "@{}", node.data.margin_name().unwrap_or_default())?;
            write_block(arena, node, dest)
        }
        RuleData::Keyframes { name } => {
            write!(dest, "@keyframes {}", keyframes_name_to_css(name))?;
            write_block(arena, node, dest)
        }
        RuleData::Keyframe { selector } => {
            write!(dest, "{selector}")?;
            write_block(arena, node, dest)
        }
        RuleData::FontFace => {
            dest.write_str("@font-face")?;
            write_block(arena, node, dest)
        }
        RuleData::FontFeatureValues { families } => {
            dest.write_str("@font-feature-values ")?;
            for (i, family) in families.iter().enumerate() {
                if i > 0 {
                    dest.write_str(", ")?;
                }
                write!(dest, "{family}")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::FontFeatureValueType { values } => values.to_css(dest),
        RuleData::FontPaletteValues { name } => write_named("font-palette-values", name, arena, node, dest),
        RuleData::CounterStyle { name } => write_named("counter-style", name, arena, node, dest),
        RuleData::Property { name } => write_named("property", name, arena, node, dest),
        RuleData::PositionTry { name } => write_named("position-try", name, arena, node, dest),
        RuleData::ColorProfile { name } => write_named("color-profile", name, arena, node, dest),
        RuleData::Scope { start, end } => {
            dest.write_str("@scope")?;
            if let Some(start) = start {
                write!(dest, " ({start})")?;
            }
            if let Some(end) = end {
                write!(dest, " to ({end})")?;
            }
            write_block(arena, node, dest)
        }
        RuleData::StartingStyle => {
            dest.write_str("@starting-style")?;
            write_block(arena, node, dest)
        }
        RuleData::ViewTransition => {
            dest.write_str("@view-transition")?;
            write_block(arena, node, dest)
        }
    }
}

/// Serialize a keyframes name: as an identifier when it is a valid custom
/// identifier, as a string otherwise.
pub fn keyframes_name_to_css(name: &str) -> String {
    if is_custom_ident(name) && !name.eq_ignore_ascii_case("none") {
        identifier_to_css(name)
    } else {
        string_to_css(name)
    }
}

fn write_named<W: Write>(
    keyword: &str,
    name: &str,
    arena: &RuleArena,
    node: &RuleNode,
    dest: &mut W,
) -> fmt::Result {
    write!(dest, "@{keyword} {}", identifier_to_css(name))?;
    write_block(arena, node, dest)
}

fn write_import<W: Write>(import: &ImportRule, dest: &mut W) -> fmt::Result {
    write!(dest, "@import {}", url_to_css(&import.href))?;
    match &import.layer {
        Some(ImportLayer::Anonymous) => dest.write_str(" layer")?,
        Some(ImportLayer::Named(name)) => write!(dest, " layer({name})")?,
        None => {}
    }
    if let Some(supports) = &import.supports {
        write!(dest, " supports({supports})")?;
    }
    if !import.media.is_empty() {
        write!(dest, " {}", import.media)?;
    }
    dest.write_char(';')
}

/// Write ` { declarations children }`, or ` {}` when both are empty.
fn write_block<W: Write>(arena: &RuleArena, node: &RuleNode, dest: &mut W) -> fmt::Result {
    let declarations = node.declarations.as_ref().filter(|block| !block.is_empty());
    if declarations.is_none() && node.children.is_empty() {
        return dest.write_str(" {}");
    }

    dest.write_str(" {")?;
    if let Some(block) = declarations {
        dest.write_char(' ')?;
        block.to_css(dest)?;
    }
    for &child in &node.children {
        dest.write_char(' ')?;
        write_rule(arena, child, dest)?;
    }
    dest.write_str(" }")
}
