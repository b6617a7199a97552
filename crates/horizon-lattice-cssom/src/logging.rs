//! Logging and debugging facilities.
//!
//! This module provides:
//! - Target names for the `tracing` events emitted by the parser and the
//!   mutation engine
//! - Debug visualization for rule trees
//!
//! # Tracing Integration
//!
//! Dropped statements and declarations are reported at `debug` and `trace`
//! level; they never surface as errors. Install a subscriber to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_cssom::grammar=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`RuleTreeDebug`] to inspect the rules of a stylesheet:
//!
//! ```ignore
//! use horizon_lattice_cssom::logging::RuleTreeDebug;
//!
//! println!("{}", RuleTreeDebug::for_sheet(&sheet));
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::rules::{RuleArena, RuleData, RuleId, StyleSheet};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Statement splitting and tokenization.
    pub const PARSER: &str = "horizon_lattice_cssom::parser";
    /// Rule classification, preludes and declaration validation.
    pub const GRAMMAR: &str = "horizon_lattice_cssom::grammar";
    /// Programmatic rule and declaration changes.
    pub const MUTATION: &str = "horizon_lattice_cssom::mutation";
    /// `replace` and `replace_sync`.
    pub const REPLACE: &str = "horizon_lattice_cssom::replace";
}

/// Style options for rule tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for rule tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show rule ids.
    pub show_ids: bool,
    /// Whether to show rule kinds.
    pub show_kinds: bool,
    /// Whether to list declaration names under each rule.
    pub show_declarations: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_kinds: true,
            show_declarations: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_declarations: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_kinds: false,
            show_declarations: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing rule trees.
#[derive(Debug, Clone)]
pub struct RuleTreeDebug<'a> {
    arena: &'a RuleArena,
    roots: &'a [RuleId],
    options: TreeFormatOptions,
}

impl<'a> RuleTreeDebug<'a> {
    /// Create a visualizer for the given top-level rules.
    pub fn new(arena: &'a RuleArena, roots: &'a [RuleId]) -> Self {
        Self {
            arena,
            roots,
            options: TreeFormatOptions::default(),
        }
    }

    /// Create a visualizer for the rules of a stylesheet.
    pub fn for_sheet(sheet: &'a StyleSheet) -> Self {
        Self::new(sheet.arena(), sheet.top_level())
    }

    /// Replace the format options.
    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Format every top-level rule and its descendants.
    pub fn format_all(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Rule Tree ({} total rules):", self.arena.len());

        if self.roots.is_empty() {
            let _ = writeln!(output, "  (empty)");
        } else {
            for &root in self.roots {
                self.format_subtree_into(root, 0, true, &mut output);
            }
        }
        output
    }

    /// Format a subtree starting from a specific rule.
    pub fn format_subtree(&self, root: RuleId) -> String {
        let mut output = String::new();
        self.format_subtree_into(root, 0, true, &mut output);
        output
    }

    fn format_subtree_into(&self, id: RuleId, depth: usize, is_last: bool, output: &mut String) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(node) = self.arena.get(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&rule_label(&node.data));

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if self.options.show_kinds {
            let _ = write!(output, " ({})", node.kind().name());
        }
        output.push('\n');

        if self.options.show_declarations
            && let Some(block) = &node.declarations
        {
            let prefix = self.build_property_prefix(depth);
            for (name, declaration) in block.iter() {
                let _ = writeln!(output, "{}  .{}: {}", prefix, name, declaration.value);
            }
        }

        let child_count = node.children.len();
        for (i, &child) in node.children.iter().enumerate() {
            self.format_subtree_into(child, depth + 1, i == child_count - 1, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500} ",
                "\u{2514}\u{2500}\u{2500} ",
            ),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix
    }

    fn build_property_prefix(&self, depth: usize) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };
        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix
    }
}

impl fmt::Display for RuleTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_all())
    }
}

/// A one-line label for a rule: its selector or at-rule head.
fn rule_label(data: &RuleData) -> String {
    match data {
        RuleData::Style { selectors } => selectors.to_string(),
        RuleData::Import(import) => format!("@import {}", import.href),
        RuleData::Namespace { prefix, uri } => match prefix {
            Some(prefix) => format!("@namespace {prefix} {uri}"),
            None => format!("@namespace {uri}"),
        },
        RuleData::LayerStatement { names } => format!(
            "@layer {}",
            names.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        ),
        RuleData::LayerBlock { name: Some(name) } => format!("@layer {name}"),
        RuleData::Page { selectors } if !selectors.is_empty() => format!("@page {selectors}"),
        RuleData::Margin { .. } => format!("@{}", data.margin_name().unwrap_or_default()),
        RuleData::Keyframes { name } => format!("@keyframes {name}"),
        RuleData::Keyframe { selector } => selector.to_string(),
        RuleData::FontFeatureValueType { values } => format!("@{}", values.feature().name()),
        RuleData::FontPaletteValues { name }
        | RuleData::CounterStyle { name }
        | RuleData::Property { name }
        | RuleData::PositionTry { name }
        | RuleData::ColorProfile { name } => format!("{} {name}", data.kind().name()),
        _ => match data.condition_text() {
            Some(condition) => format!("{} {condition}", data.kind().name()),
            None => data.kind().name().to_string(),
        },
    }
}
