//! Tree design parsing.
//!
//! A tree design is a YAML mapping that describes a [`Tree`] of string
//! payloads. Every key names an entry; inside an entry, the payload field
//! (default `node`) gives the payload label, the children field (default
//! `children`) holds a nested design, and every other key is a property.
//!
//! # Example
//!
//! ```
//! use nodequery::document::parser::parse_design;
//! use nodequery::document::node::PropertyValue;
//!
//! let yaml = r#"
//! root:
//!   node: rootNode
//!   red: dark
//!   children:
//!     foo: { purple: true }
//! "#;
//! let tree = parse_design(yaml).unwrap();
//!
//! let root = tree.get("root").unwrap();
//! assert_eq!(root.payload(), "rootNode");
//! assert_eq!(root.property("red"), Some(&PropertyValue::from("dark")));
//! // Entries without a payload field use their key
//! assert_eq!(root.children().get("foo").unwrap().payload(), "foo");
//! ```

use anyhow::{anyhow, bail, Context, Result};
use serde_yaml::{Mapping, Value as YamlValue};

use super::node::{Entry, Properties, PropertyValue};
use super::tree::Tree;

/// Field names that give structure to a design document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignFields {
    /// Key holding an entry's payload label
    pub payload: String,
    /// Key holding an entry's nested design
    pub children: String,
}

impl Default for DesignFields {
    fn default() -> Self {
        Self {
            payload: "node".to_string(),
            children: "children".to_string(),
        }
    }
}

/// Parses a YAML design document using the default field names.
pub fn parse_design(source: &str) -> Result<Tree<String>> {
    parse_design_with(source, &DesignFields::default())
}

/// Parses a YAML design document with custom field names.
pub fn parse_design_with(source: &str, fields: &DesignFields) -> Result<Tree<String>> {
    if source.trim().is_empty() {
        return Ok(Tree::new());
    }
    let value: YamlValue = serde_yaml::from_str(source).context("Failed to parse YAML")?;
    design_to_tree(&value, fields)
}

/// Converts an already-parsed YAML value into a tree.
///
/// `null` (an empty document) yields an empty tree.
pub fn design_to_tree(value: &YamlValue, fields: &DesignFields) -> Result<Tree<String>> {
    build_level(value, fields, "")
}

fn build_level(value: &YamlValue, fields: &DesignFields, parent_path: &str) -> Result<Tree<String>> {
    let mapping = match value {
        YamlValue::Null => return Ok(Tree::new()),
        YamlValue::Mapping(mapping) => mapping,
        other => bail!(
            "Expected a mapping of entries at '{}', found {}",
            display_path(parent_path),
            yaml_type_name(other)
        ),
    };

    let mut tree = Tree::new();
    for (key, design) in mapping {
        let key = scalar_to_string(key)
            .ok_or_else(|| anyhow!("Non-scalar key at '{}'", display_path(parent_path)))?;
        let path = if parent_path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", parent_path, key)
        };
        let entry = build_entry(&key, design, fields, &path)?;
        tree.insert(key, entry);
    }
    Ok(tree)
}

fn build_entry(key: &str, design: &YamlValue, fields: &DesignFields, path: &str) -> Result<Entry<String>> {
    let mapping: &Mapping = match design {
        YamlValue::Null => return Ok(Entry::new(key.to_string())),
        YamlValue::Mapping(mapping) => mapping,
        other => bail!(
            "Entry '{}' must be a mapping, found {}",
            path,
            yaml_type_name(other)
        ),
    };

    let mut payload = key.to_string();
    let mut properties = Properties::new();
    let mut children = Tree::new();

    for (name, value) in mapping {
        let name = scalar_to_string(name)
            .ok_or_else(|| anyhow!("Non-scalar property name in entry '{}'", path))?;
        if name == fields.payload {
            payload = scalar_to_string(value)
                .ok_or_else(|| anyhow!("Payload of entry '{}' must be a scalar", path))?;
        } else if name == fields.children {
            children = build_level(value, fields, path)?;
        } else {
            let value = property_value(value).with_context(|| {
                format!("Invalid value for property '{}' of entry '{}'", name, path)
            })?;
            properties.insert(name, value);
        }
    }

    Ok(Entry::with_parts(payload, properties, children))
}

/// Converts a scalar YAML value to a property value.
pub(crate) fn property_value(value: &YamlValue) -> Result<PropertyValue> {
    match value {
        YamlValue::Null => Ok(PropertyValue::Null),
        YamlValue::Bool(b) => Ok(PropertyValue::Boolean(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PropertyValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(PropertyValue::Float(f))
            } else {
                bail!("number {} is out of range", n)
            }
        }
        YamlValue::String(s) => Ok(PropertyValue::String(s.clone())),
        other => bail!("expected a scalar, found {}", yaml_type_name(other)),
    }
}

pub(crate) fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<top level>"
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_empty_tree() {
        let tree = parse_design("").unwrap();
        assert!(tree.is_empty());
        let tree = parse_design("~").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_null_entry_uses_key_as_payload() {
        let tree = parse_design("leaf:\n").unwrap();
        let leaf = tree.get("leaf").unwrap();
        assert_eq!(leaf.payload(), "leaf");
        assert!(leaf.properties().is_empty());
        assert!(leaf.is_leaf());
    }

    #[test]
    fn test_property_types() {
        let tree = parse_design("a: { b: true, i: 3, f: 1.5, s: x, n: null }").unwrap();
        let a = tree.get("a").unwrap();
        assert_eq!(a.property("b"), Some(&PropertyValue::Boolean(true)));
        assert_eq!(a.property("i"), Some(&PropertyValue::Integer(3)));
        assert_eq!(a.property("f"), Some(&PropertyValue::Float(1.5)));
        assert_eq!(a.property("s"), Some(&PropertyValue::from("x")));
        assert_eq!(a.property("n"), Some(&PropertyValue::Null));
    }

    #[test]
    fn test_nested_property_is_rejected_with_path() {
        let err = parse_design("root:\n  children:\n    foo:\n      tags: [a, b]\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("'tags'"), "{}", message);
        assert!(message.contains("root.foo"), "{}", message);
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = parse_design("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("<top level>"));
    }

    #[test]
    fn test_custom_fields() {
        let fields = DesignFields {
            payload: "id".to_string(),
            children: "kids".to_string(),
        };
        let tree = parse_design_with("r: { id: R, node: prop, kids: { c: { id: C } } }", &fields).unwrap();
        let r = tree.get("r").unwrap();
        assert_eq!(r.payload(), "R");
        assert_eq!(r.property("node"), Some(&PropertyValue::from("prop")));
        assert_eq!(r.children().get("c").unwrap().payload(), "C");
    }
}
