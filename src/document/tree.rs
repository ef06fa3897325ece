//! Ordered, keyed trees of entries.
//!
//! A [`Tree`] maps unique string keys to [`Entry`] values. Iteration follows
//! insertion order, and that order is what "first match" means for every
//! query strategy.
//!
//! # Example
//!
//! ```
//! use nodequery::document::node::Entry;
//! use nodequery::document::tree::Tree;
//!
//! let tree = Tree::new()
//!     .with_entry("foo", Entry::new(1))
//!     .with_entry("bar", Entry::new(2));
//!
//! let keys: Vec<&str> = tree.keys().collect();
//! assert_eq!(keys, vec!["foo", "bar"]);
//! assert_eq!(tree.get("bar").map(|e| *e.payload()), Some(2));
//! ```

use indexmap::IndexMap;

use super::node::Entry;

/// An insertion-ordered mapping from key to entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<P> {
    entries: IndexMap<String, Entry<P>>,
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tree<P> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts an entry under `key`.
    ///
    /// Keys are unique within one mapping: inserting an existing key replaces
    /// the entry but keeps its original position. Returns the replaced entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry<P>) -> Option<Entry<P>> {
        self.entries.insert(key.into(), entry)
    }

    /// Builder-style [`Tree::insert`].
    pub fn with_entry(mut self, key: impl Into<String>, entry: Entry<P>) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Entry<P>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the top-level entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<P>> {
        self.entries.values()
    }

    /// Iterates over `(key, entry)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry<P>> {
        self.entries.iter()
    }

    /// Total number of entries at every level.
    pub fn entry_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| 1 + entry.children().entry_count())
            .sum()
    }

    /// Number of levels in the tree. An empty tree has depth 0.
    pub fn depth(&self) -> usize {
        self.entries
            .values()
            .map(|entry| 1 + entry.children().depth())
            .max()
            .unwrap_or(0)
    }
}

impl<P> FromIterator<(String, Entry<P>)> for Tree<P> {
    fn from_iter<I: IntoIterator<Item = (String, Entry<P>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'t, P> IntoIterator for &'t Tree<P> {
    type Item = (&'t String, &'t Entry<P>);
    type IntoIter = indexmap::map::Iter<'t, String, Entry<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
