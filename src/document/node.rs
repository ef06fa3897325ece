//! Node representation for queryable trees.
//!
//! Each node of a tree is an [`Entry`]: an opaque payload owned by the caller,
//! a flat map of named properties used by selectors, and an ordered map of
//! child entries. Entries are built once and never mutated by the query engine.
//!
//! # Example
//!
//! ```
//! use nodequery::document::node::{Entry, PropertyValue};
//! use nodequery::document::tree::Tree;
//!
//! let leaf = Entry::new("bar").with_property("red", "dark");
//! let entry = Entry::new("foo")
//!     .with_property("purple", true)
//!     .with_children(Tree::new().with_entry("bar", leaf));
//!
//! assert_eq!(entry.payload(), &"foo");
//! assert_eq!(entry.property("purple"), Some(&PropertyValue::Boolean(true)));
//! assert_eq!(entry.children().len(), 1);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tree::Tree;

/// A primitive property value.
///
/// Equality is strict: two values are equal only if they have the same
/// variant and the same contents. `Integer(1)` never equals `Float(1.0)`,
/// and `String("true")` never equals `Boolean(true)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Explicit null sentinel
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// Returns true if this value is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Returns a short name for the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

/// Named properties of an entry, in insertion order.
pub type Properties = IndexMap<String, PropertyValue>;

/// One node of a queryable tree.
///
/// `P` is the caller's payload type. The query engine only ever hands out
/// `&P` references to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<P> {
    pub(crate) payload: P,
    pub(crate) properties: Properties,
    pub(crate) children: Tree<P>,
}

impl<P> Entry<P> {
    /// Creates an entry with no properties and no children.
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            properties: Properties::new(),
            children: Tree::new(),
        }
    }

    /// Creates an entry from all of its parts.
    pub fn with_parts(payload: P, properties: Properties, children: Tree<P>) -> Self {
        Self {
            payload,
            properties,
            children,
        }
    }

    /// Adds or replaces a property, returning the entry.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Replaces the children of the entry.
    pub fn with_children(mut self, children: Tree<P>) -> Self {
        self.children = children;
        self
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Looks up a single property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn children(&self) -> &Tree<P> {
        &self.children
    }

    /// Returns true if the entry has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
