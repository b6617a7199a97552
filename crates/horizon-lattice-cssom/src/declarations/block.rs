//! Declaration storage in canonical order.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use super::DeclarationContext;
use super::descriptors::canonical_index;

/// An accepted declaration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDeclaration {
    /// Canonical value text.
    pub value: String,
    /// Whether the declaration carries `!important`.
    pub important: bool,
}

impl StoredDeclaration {
    /// Create a stored declaration.
    pub fn new(value: impl Into<String>, important: bool) -> Self {
        Self {
            value: value.into(),
            important,
        }
    }
}

/// The declaration set of a rule.
///
/// Holds at most one entry per canonical name and iterates in the
/// canonical order of its context; custom properties follow the
/// recognized names in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationBlock {
    context: DeclarationContext,
    entries: Vec<(String, StoredDeclaration)>,
}

impl DeclarationBlock {
    /// Create an empty block for `context`.
    pub fn new(context: DeclarationContext) -> Self {
        Self {
            context,
            entries: Vec::new(),
        }
    }

    /// The context of this block.
    pub fn context(&self) -> DeclarationContext {
        self.context
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the block holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (canonical_index(self.context, a), canonical_index(self.context, b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(existing, _)| self.compare(existing, name))
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&StoredDeclaration> {
        let name = DeclarationContext::canonical_name(name);
        self.position(&name)
            .ok()
            .map(|index| &self.entries[index].1)
    }

    /// The value of a declaration, if present.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|declaration| declaration.value.as_str())
    }

    /// `"important"` for an important declaration, otherwise the empty string.
    pub fn priority(&self, name: &str) -> &'static str {
        match self.get(name) {
            Some(declaration) if declaration.important => "important",
            _ => "",
        }
    }

    /// Store a declaration under its canonical name, replacing any
    /// previous entry.
    pub fn insert(&mut self, name: &str, declaration: StoredDeclaration) {
        let name = DeclarationContext::canonical_name(name);
        match self.position(&name) {
            Ok(index) => self.entries[index].1 = declaration,
            Err(index) => self.entries.insert(index, (name, declaration)),
        }
    }

    /// Remove a declaration, returning it.
    pub fn remove(&mut self, name: &str) -> Option<StoredDeclaration> {
        let name = DeclarationContext::canonical_name(name);
        let index = self.position(&name).ok()?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over declarations in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredDeclaration)> {
        self.entries
            .iter()
            .map(|(name, declaration)| (name.as_str(), declaration))
    }

    /// Write the declarations as `name: value;` items separated by spaces.
    pub fn to_css<W: Write>(&self, dest: &mut W) -> fmt::Result {
        for (index, (name, declaration)) in self.iter().enumerate() {
            if index > 0 {
                dest.write_char(' ')?;
            }
            write!(dest, "{name}: {}", declaration.value)?;
            if declaration.important {
                dest.write_str(" !important")?;
            }
            dest.write_char(';')?;
        }
        Ok(())
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_css(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_is_independent_of_insertion_order() {
        let mut first = DeclarationBlock::new(DeclarationContext::CounterStyle);
        first.insert("system", StoredDeclaration::new("fixed 1", false));
        first.insert("speak-as", StoredDeclaration::new("auto", false));

        let mut second = DeclarationBlock::new(DeclarationContext::CounterStyle);
        second.insert("speak-as", StoredDeclaration::new("auto", false));
        second.insert("system", StoredDeclaration::new("fixed 1", false));

        assert_eq!(first, second);
        assert_eq!(first.to_string(), "system: fixed 1; speak-as: auto;");
    }

    #[test]
    fn test_last_value_wins_and_names_fold_case() {
        let mut block = DeclarationBlock::new(DeclarationContext::Style);
        block.insert("top", StoredDeclaration::new("1px", false));
        block.insert("TOP", StoredDeclaration::new("2px", true));

        assert_eq!(block.len(), 1);
        assert_eq!(block.value("Top"), Some("2px"));
        assert_eq!(block.priority("top"), "important");
        assert_eq!(block.to_string(), "top: 2px !important;");
    }

    #[test]
    fn test_custom_properties_follow_in_lexicographic_order() {
        let mut block = DeclarationBlock::new(DeclarationContext::Style);
        block.insert("--b", StoredDeclaration::new("2", false));
        block.insert("color", StoredDeclaration::new("red", false));
        block.insert("--A", StoredDeclaration::new("1", false));

        assert_eq!(block.to_string(), "color: red; --A: 1; --b: 2;");
        assert_eq!(block.value("--a"), None);
        assert!(block.remove("--A").is_some());
        assert_eq!(block.len(), 2);
    }
}
