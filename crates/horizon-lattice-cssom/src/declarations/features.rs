//! Font feature value maps of `@font-feature-values`.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::grammar::FeatureType;
use crate::logging::targets;
use crate::syntax::{ComponentValue, RawDeclaration, identifier_to_css};
use crate::{Error, Result};

/// Feature names of one feature type mapped to their value lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureValueMap {
    feature: FeatureType,
    values: BTreeMap<String, Vec<u32>>,
}

impl FeatureValueMap {
    /// Create an empty map for `feature`.
    pub fn new(feature: FeatureType) -> Self {
        Self {
            feature,
            values: BTreeMap::new(),
        }
    }

    /// The feature type of this map.
    pub fn feature(&self) -> FeatureType {
        self.feature
    }

    /// Number of feature names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values stored for `name`.
    pub fn get(&self, name: &str) -> Option<&[u32]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Store `values` for `name`.
    ///
    /// Fails with [`Error::InvalidFeatureValue`] if the values violate the
    /// arity or range of the feature type; the map is left unchanged.
    pub fn set(&mut self, name: &str, values: Vec<u32>) -> Result<()> {
        if !self.feature.accepts(&values) {
            return Err(Error::invalid_feature_value(name));
        }
        self.values.insert(name.to_string(), values);
        Ok(())
    }

    /// Remove `name`, returning `true` if it was present.
    pub fn delete(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Apply a declaration from a feature type block.
    ///
    /// Invalid declarations are dropped.
    pub fn apply(&mut self, declaration: &RawDeclaration) -> bool {
        let stored = !declaration.important
            && parse_feature_values(&declaration.value)
                .is_some_and(|values| self.set(&declaration.name, values).is_ok());
        if !stored {
            tracing::trace!(
                target: targets::GRAMMAR,
                feature = self.feature.name(),
                name = %declaration.name,
                "dropping invalid feature value"
            );
        }
        stored
    }

    /// Merge another map of the same type into this one; later values win.
    pub fn merge(&mut self, other: FeatureValueMap) {
        self.values.extend(other.values);
    }

    /// Iterate over feature names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.values
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Write the map as a feature type block.
    pub fn to_css<W: Write>(&self, dest: &mut W) -> fmt::Result {
        write!(dest, "@{} {{", self.feature.name())?;
        for (name, values) in self.iter() {
            write!(dest, " {}:", identifier_to_css(name))?;
            for value in values {
                write!(dest, " {value}")?;
            }
            dest.write_char(';')?;
        }
        if self.is_empty() {
            dest.write_char('}')
        } else {
            dest.write_str(" }")
        }
    }
}

impl fmt::Display for FeatureValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_css(f)
    }
}

/// Parse a whitespace-separated list of non-negative integers.
pub fn parse_feature_values(values: &[ComponentValue]) -> Option<Vec<u32>> {
    values
        .iter()
        .filter(|value| !value.is_whitespace())
        .map(|value| match value {
            ComponentValue::Number {
                int_value: Some(int),
                has_sign: false,
                ..
            } => u32::try_from(*int).ok(),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    #[test]
    fn test_arity_and_range() {
        let mut swash = FeatureValueMap::new(FeatureType::Swash);
        assert!(swash.set("flowing", vec![1]).is_ok());
        assert_eq!(
            swash.set("flowing", vec![1, 2]),
            Err(Error::invalid_feature_value("flowing"))
        );
        assert!(swash.set("big", vec![100]).is_err());
        assert_eq!(swash.get("flowing"), Some(&[1][..]));

        let mut variant = FeatureValueMap::new(FeatureType::CharacterVariant);
        assert!(variant.set("alt", vec![1]).is_err());
        assert!(variant.set("alt", vec![1, 99]).is_ok());

        let mut styleset = FeatureValueMap::new(FeatureType::Styleset);
        assert!(styleset.set("set", vec![1, 2, 20]).is_ok());
        assert!(styleset.set("set", vec![21]).is_err());
        assert!(styleset.set("set", Vec::new()).is_err());
        assert_eq!(styleset.get("set"), Some(&[1, 2, 20][..]));
    }

    #[test]
    fn test_parse_values_rejects_signs_and_fractions() {
        assert_eq!(parse_feature_values(&tokenize("1 2")), Some(vec![1, 2]));
        assert_eq!(parse_feature_values(&tokenize("+1")), None);
        assert_eq!(parse_feature_values(&tokenize("-1")), None);
        assert_eq!(parse_feature_values(&tokenize("1.5")), None);
    }

    #[test]
    fn test_serialization() {
        let mut map = FeatureValueMap::new(FeatureType::Swash);
        assert_eq!(map.to_string(), "@swash {}");
        map.set("flowing", vec![1]).unwrap();
        map.set("bold", vec![2]).unwrap();
        assert_eq!(map.to_string(), "@swash { bold: 2; flowing: 1; }");
        assert!(map.delete("bold"));
        assert!(!map.delete("bold"));
    }
}
