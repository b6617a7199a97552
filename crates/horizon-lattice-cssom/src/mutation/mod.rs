//! Programmatic changes to a stylesheet.
//!
//! Every entry point validates completely before touching the tree: a
//! failed call returns an [`Error`](crate::Error) and leaves the stylesheet
//! exactly as it was.
//!
//! Rule insertion and deletion check, in order:
//!
//! 1. the stylesheet is origin-clean ([`Error::AccessDenied`](crate::Error::AccessDenied)),
//! 2. no replace is pending ([`Error::LockedSheet`](crate::Error::LockedSheet)),
//! 3. the index is in bounds,
//! 4. the text holds exactly one valid rule,
//! 5. the rule is permitted in the target list and at the index.

mod insert;
mod keyframes;
mod replace;
mod setters;

pub use insert::ListTarget;
pub use replace::{Replace, SharedStyleSheet};
