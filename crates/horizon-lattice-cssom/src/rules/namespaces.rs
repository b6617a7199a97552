//! The namespace-prefix table of a stylesheet.

/// Namespace prefixes declared by `@namespace` rules, in declaration order.
///
/// Prefixes are matched case-sensitively. At most one default namespace is
/// held; a later declaration for the same prefix replaces the earlier URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    default: Option<String>,
    prefixes: Vec<(String, String)>,
}

impl NamespaceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace; `None` declares the default namespace.
    pub fn register(&mut self, prefix: Option<String>, uri: String) {
        match prefix {
            None => self.default = Some(uri),
            Some(prefix) => {
                match self.prefixes.iter_mut().find(|(existing, _)| *existing == prefix) {
                    Some(entry) => entry.1 = uri,
                    None => self.prefixes.push((prefix, uri)),
                }
            }
        }
    }

    /// Returns `true` if `prefix` has been declared.
    pub fn is_declared(&self, prefix: &str) -> bool {
        self.resolve(prefix).is_some()
    }

    /// The URI bound to `prefix`.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(existing, _)| existing == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// The default namespace, if declared.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Number of declared namespaces, including the default one.
    pub fn len(&self) -> usize {
        self.prefixes.len() + usize::from(self.default.is_some())
    }

    /// Returns `true` if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over prefixed namespaces in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Remove every declaration.
    pub fn clear(&mut self) {
        self.default = None;
        self.prefixes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_case_sensitive() {
        let mut table = NamespaceTable::new();
        table.register(Some("svg".into()), "http://www.w3.org/2000/svg".into());

        assert!(table.is_declared("svg"));
        assert!(!table.is_declared("SVG"));
        assert_eq!(table.resolve("svg"), Some("http://www.w3.org/2000/svg"));
    }

    #[test]
    fn test_redeclaration_replaces_uri() {
        let mut table = NamespaceTable::new();
        table.register(None, "a".into());
        table.register(None, "b".into());
        table.register(Some("x".into()), "1".into());
        table.register(Some("x".into()), "2".into());

        assert_eq!(table.default_namespace(), Some("b"));
        assert_eq!(table.resolve("x"), Some("2"));
        assert_eq!(table.len(), 2);

        table.clear();
        assert!(table.is_empty());
    }
}
