//! CSS syntax: component values, a backtracking cursor and statement splitting.
//!
//! Tokenization is delegated to `cssparser`; everything above the token
//! level (blocks, statements, declarations) is built here.

mod cursor;
mod splitter;
mod token;

pub use cursor::TokenCursor;
pub use splitter::{
    BlockItem, ContentMode, RawDeclaration, Statement, Statements, parse_declaration,
    parse_single_statement,
};
pub use token::{
    ComponentValue, identifier_to_css, serialize_values, split_commas, string_to_css, tokenize,
    trim_whitespace, url_to_css, write_values,
};
