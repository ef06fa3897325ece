//! Property selectors.
//!
//! A [`Selector`] is a flat map of property name → required value. An entry
//! matches when every selector key is present in its properties with a
//! strictly equal value. The empty selector matches every entry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Value as YamlValue;

use super::error::{QueryError, QueryResult};
use crate::document::node::{Properties, PropertyValue};
use crate::document::parser::{property_value, scalar_to_string, yaml_type_name};

/// A conjunction of property equality constraints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub struct Selector {
    constraints: IndexMap<String, PropertyValue>,
}

impl Selector {
    /// The selector with no constraints. Matches every entry.
    pub fn any() -> Self {
        Self::default()
    }

    /// Adds a constraint, returning the selector.
    ///
    /// ```
    /// use nodequery::query::Selector;
    ///
    /// let selector = Selector::any().with("purple", true).with("red", "dark");
    /// assert_eq!(selector.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.constraints.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if `properties` satisfies every constraint.
    ///
    /// A missing property never matches, not even a `Null` constraint; only an
    /// explicitly stored `Null` does.
    pub fn matches(&self, properties: &Properties) -> bool {
        self.constraints
            .iter()
            .all(|(name, expected)| properties.get(name) == Some(expected))
    }

    /// Builds a selector from a dynamic YAML value.
    ///
    /// `null` is the absent selector. Anything other than a mapping from
    /// scalar names to scalar values is rejected.
    pub fn from_value(value: &YamlValue) -> QueryResult<Self> {
        let mapping = match value {
            YamlValue::Null => return Ok(Self::any()),
            YamlValue::Mapping(mapping) => mapping,
            other => {
                return Err(QueryError::invalid_selector(format!(
                    "expected a mapping of property names to values, found {}",
                    yaml_type_name(other)
                )))
            }
        };

        let mut constraints = IndexMap::with_capacity(mapping.len());
        for (name, expected) in mapping {
            // Same naming rule as tree designs: scalar names are stringified
            let name = scalar_to_string(name).ok_or_else(|| {
                QueryError::invalid_selector(format!(
                    "property names must be scalars, found {}",
                    yaml_type_name(name)
                ))
            })?;
            let expected = property_value(expected).map_err(|err| {
                QueryError::invalid_selector(format!("property '{}': {}", name, err))
            })?;
            constraints.insert(name, expected);
        }
        Ok(Self { constraints })
    }

    /// Parses a selector written in YAML, e.g. `{purple: true, red: dark}`.
    ///
    /// ```
    /// use nodequery::query::{QueryError, Selector};
    ///
    /// let selector = Selector::parse("{purple: true}").unwrap();
    /// assert_eq!(selector, Selector::any().with("purple", true));
    ///
    /// assert!(matches!(Selector::parse("bar"), Err(QueryError::InvalidSelector { .. })));
    /// ```
    pub fn parse(source: &str) -> QueryResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::any());
        }
        let value: YamlValue = serde_yaml::from_str(source)
            .map_err(|err| QueryError::invalid_selector(err.to_string()))?;
        Self::from_value(&value)
    }
}

/// Standalone form of [`Selector::matches`] where `None` is the absent selector.
pub fn matches(properties: &Properties, selector: Option<&Selector>) -> bool {
    selector.map_or(true, |selector| selector.matches(properties))
}

impl TryFrom<YamlValue> for Selector {
    type Error = QueryError;

    fn try_from(value: YamlValue) -> QueryResult<Self> {
        Self::from_value(&value)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.constraints)
    }
}

impl<K, V> FromIterator<(K, V)> for Selector
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            constraints: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> Properties {
        let mut props = Properties::new();
        props.insert("purple".to_string(), PropertyValue::Boolean(true));
        props.insert("red".to_string(), PropertyValue::from("dark"));
        props.insert("gone".to_string(), PropertyValue::Null);
        props
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        assert!(Selector::any().matches(&props()));
        assert!(Selector::any().matches(&Properties::new()));
        assert!(matches(&props(), None));
    }

    #[test]
    fn test_all_constraints_must_hold() {
        let selector = Selector::any().with("purple", true).with("red", "dark");
        assert!(selector.matches(&props()));
        assert!(matches(&props(), Some(&selector)));

        let selector = Selector::any().with("purple", true).with("red", "light");
        assert!(!selector.matches(&props()));
    }

    #[test]
    fn test_strict_equality() {
        assert!(!Selector::any().with("purple", "true").matches(&props()));
        assert!(!Selector::any().with("purple", 1).matches(&props()));
    }

    #[test]
    fn test_missing_key_is_not_null() {
        assert!(!Selector::any().with("absent", PropertyValue::Null).matches(&props()));
        assert!(Selector::any().with("gone", PropertyValue::Null).matches(&props()));
    }

    #[test]
    fn test_from_value_rejects_non_mappings() {
        for source in ["bar", "[purple]", "42", "true"] {
            let result = Selector::parse(source);
            assert!(
                matches!(result, Err(QueryError::InvalidSelector { .. })),
                "{} should be rejected",
                source
            );
        }
    }

    #[test]
    fn test_from_value_rejects_nested_values() {
        let err = Selector::parse("{red: {shade: dark}}").unwrap_err();
        assert!(err.to_string().contains("property 'red'"), "{}", err);
        assert!(Selector::parse("{[a, b]: x}").is_err());
    }

    #[test]
    fn test_scalar_names_are_stringified() {
        let selector = Selector::parse("{1: x, true: 2}").unwrap();
        assert_eq!(selector.get("1"), Some(&PropertyValue::from("x")));
        assert_eq!(selector.get("true"), Some(&PropertyValue::Integer(2)));
    }

    #[test]
    fn test_numeric_name_matches_design_property() {
        let tree = crate::document::parser::parse_design("a: { 1: x }").unwrap();
        let entry = tree.get("a").unwrap();
        assert!(Selector::parse("{1: x}").unwrap().matches(entry.properties()));
    }

    #[test]
    fn test_null_and_blank_are_absent() {
        assert_eq!(Selector::parse("").unwrap(), Selector::any());
        assert_eq!(Selector::parse("~").unwrap(), Selector::any());
        assert_eq!(Selector::parse("{}").unwrap(), Selector::any());
    }

    #[test]
    fn test_deserialize_and_serialize() {
        let selector: Selector = serde_yaml::from_str("{purple: true, red: dark}").unwrap();
        assert_eq!(selector, Selector::any().with("purple", true).with("red", "dark"));

        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, r#"{"purple":true,"red":"dark"}"#);

        let bad: Result<Selector, _> = serde_yaml::from_str("bar");
        assert!(bad.is_err());
    }

    #[test]
    fn test_collect() {
        let selector: Selector = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(selector.get("b"), Some(&PropertyValue::Integer(2)));
    }
}
