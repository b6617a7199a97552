//! Error types for the stylesheet object model.
//!
//! Only programmatic mutations report errors. Statements that fail to
//! validate while a stylesheet is being parsed are logged and dropped.

/// Result type alias for stylesheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by stylesheet mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The stylesheet is not origin-clean; its rules cannot be read or modified.
    #[error("Access to the rules of a non-origin-clean stylesheet is denied")]
    AccessDenied,

    /// A replace is pending, or the stylesheet does not permit replacement.
    #[error("The stylesheet is locked")]
    LockedSheet,

    /// The rule text did not contain a rule.
    #[error("No rule found in the given text")]
    MissingRule,

    /// The rule text contained more than one rule.
    #[error("Unexpected content after the rule")]
    ExtraRule,

    /// The rule text did not parse, or the rule is unknown.
    #[error("Invalid rule syntax")]
    InvalidRuleSyntax,

    /// The index is out of bounds for the target rule list.
    #[error("Index {index} is out of bounds for a rule list of length {length}")]
    InvalidIndex { index: usize, length: usize },

    /// The rule is not permitted at this position or in this context.
    #[error("The rule is not permitted at this position")]
    InvalidPosition,

    /// A namespace rule cannot be inserted or removed while other rules are present.
    #[error("Namespace rules cannot be changed once the stylesheet contains other rules")]
    InvalidNamespaceState,

    /// Import rules cannot be inserted into a constructed stylesheet.
    #[error("Import rules cannot be inserted into a constructed stylesheet")]
    InvalidImportInsertion,

    /// The keyframe selector text is invalid.
    #[error("Invalid keyframe selector '{0}'")]
    InvalidKeyText(String),

    /// A font feature value list violates the arity or range of its feature type.
    #[error("Invalid values for feature '{name}'")]
    InvalidFeatureValue { name: String },

    /// A name setter received an empty or reserved name.
    #[error("Invalid rule name '{0}'")]
    InvalidName(String),

    /// A declaration setter received a value the validator rejected.
    #[error("Invalid declaration for '{name}'")]
    InvalidDeclaration { name: String },

    /// The rule id is not attached to this stylesheet or names a rule of the wrong kind.
    #[error("The rule is not attached to this stylesheet or has the wrong kind")]
    UnknownRule,
}

impl Error {
    /// Create an index error.
    pub fn invalid_index(index: usize, length: usize) -> Self {
        Self::InvalidIndex { index, length }
    }

    /// Create a key text error.
    pub fn invalid_key_text(text: impl Into<String>) -> Self {
        Self::InvalidKeyText(text.into())
    }

    /// Create a feature value error.
    pub fn invalid_feature_value(name: impl Into<String>) -> Self {
        Self::InvalidFeatureValue { name: name.into() }
    }

    /// Create a name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    /// Create a declaration error.
    pub fn invalid_declaration(name: impl Into<String>) -> Self {
        Self::InvalidDeclaration { name: name.into() }
    }
}
