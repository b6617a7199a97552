//! Stylesheet object model for Horizon Lattice.
//!
//! This crate turns CSS text into a validated tree of rules and keeps that
//! tree consistent under programmatic changes:
//!
//! - **Parsing**: Split text into statements and validate each against the
//!   grammar of the context it appears in
//! - **Rule tree**: Rules live in an arena and are addressed by [`RuleId`](rules::RuleId)
//! - **Mutation**: Insert, delete and edit rules with the same checks parsing applies
//! - **Serialization**: Produce canonical text for any rule or stylesheet
//! - **Replacement**: Swap the whole rule list synchronously or as a future
//!
//! # Example
//!
//! ```
//! use horizon_lattice_cssom::prelude::*;
//!
//! let mut sheet = StyleSheet::parse(".a { color: red }", SheetConfig::default());
//! sheet.insert_rule("@media print { .a { color: black } }", 1)?;
//! assert_eq!(
//!     sheet.css_text(),
//!     ".a { color: red; }\n@media print { .a { color: black; } }"
//! );
//! # Ok::<(), horizon_lattice_cssom::Error>(())
//! ```

pub mod config;
pub mod declarations;
pub mod grammar;
pub mod logging;
pub mod mutation;
pub mod rules;
pub mod selector;
pub mod serialize;
pub mod syntax;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::{NestedGroupDeclarations, ParserOptions, SheetConfig};
    pub use crate::declarations::{BasicValueGrammar, ValueGrammar};
    pub use crate::grammar::{FeatureType, MediaList, RuleContext, RuleKind};
    pub use crate::logging::{RuleTreeDebug, TreeFormatOptions, TreeStyle};
    pub use crate::mutation::{ListTarget, Replace, SharedStyleSheet};
    pub use crate::rules::{DetachedRule, ReplaceState, RuleId, RuleList, RuleRef, StyleSheet};
    pub use crate::{Error, Result};
}
