//! CSS selector types and parsing.

mod parser;
mod types;

pub use parser::{SelectorMode, parse_selector_list, parse_selector_text};
pub use types::*;
