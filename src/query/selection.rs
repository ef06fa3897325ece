//! Chainable selections over a [`Tree`].
//!
//! A [`Selection`] is an ordered list of payloads, each still tied to the
//! entry that produced it. Every strategy runs independently per selected
//! entry and returns a new selection, so chains like
//! `find_all(a).find_in_children(b)` search below each match of `a`
//! separately instead of pooling their children.
//!
//! # Example
//!
//! ```
//! use nodequery::document::node::Entry;
//! use nodequery::document::tree::Tree;
//! use nodequery::query::{Selection, Selector};
//!
//! let tree = Tree::new().with_entry(
//!     "root",
//!     Entry::new("root").with_children(
//!         Tree::new()
//!             .with_entry("foo", Entry::new("foo").with_property("purple", true))
//!             .with_entry("qux", Entry::new("qux").with_property("red", "light")),
//!     ),
//! );
//!
//! let selection = Selection::new(&tree);
//! let purple = selection.find(&Selector::any().with("purple", true));
//! assert_eq!(purple.payloads(), vec![&"foo"]);
//!
//! let children = selection.find_all_in_children(&Selector::any());
//! assert_eq!(children.len(), 2);
//! ```

use std::ops::Index;

use tracing::{debug, trace};

use super::selector::Selector;
use crate::document::node::Entry;
use crate::document::tree::Tree;

/// An ordered, immutable set of selected entries.
///
/// Only payloads are visible to callers; the entries themselves are kept so
/// that further calls know where to continue.
#[derive(Debug)]
pub struct Selection<'a, P> {
    entries: Vec<&'a Entry<P>>,
}

// Manual impl: cloning copies references, so `P: Clone` is not needed.
impl<P> Clone for Selection<'_, P> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Creates the initial selection over the top-level entries of `tree`.
pub fn create_selection<P>(tree: &Tree<P>) -> Selection<'_, P> {
    Selection::new(tree)
}

impl<'a, P> Selection<'a, P> {
    /// Selects the top-level entries of `tree`, in mapping order.
    pub fn new(tree: &'a Tree<P>) -> Self {
        Self {
            entries: tree.entries().collect(),
        }
    }

    /// A selection with nothing in it.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// For each entry, the first match in pre-order over the entry and its
    /// descendants. The entry itself is tested first, so `find(&Selector::any())`
    /// returns the selection unchanged.
    pub fn find(&self, selector: &Selector) -> Self {
        let entries: Vec<_> = self
            .entries
            .iter()
            .filter_map(|&entry| first_in_subtree(entry, selector))
            .collect();
        self.log_step("find", selector, entries.len());
        Self { entries }
    }

    /// For each entry, every matching descendant in pre-order. The entry
    /// itself is never tested.
    pub fn find_all(&self, selector: &Selector) -> Self {
        let mut entries = Vec::new();
        for &entry in &self.entries {
            collect_descendants(entry.children(), selector, &mut entries);
        }
        self.log_step("findAll", selector, entries.len());
        Self { entries }
    }

    /// For each entry, the first direct child that matches.
    pub fn find_in_children(&self, selector: &Selector) -> Self {
        let entries: Vec<_> = self
            .entries
            .iter()
            .filter_map(|&entry| {
                entry
                    .children()
                    .entries()
                    .find(|child| selector.matches(child.properties()))
            })
            .collect();
        self.log_step("findInChildren", selector, entries.len());
        Self { entries }
    }

    /// For each entry, every direct child that matches.
    pub fn find_all_in_children(&self, selector: &Selector) -> Self {
        let entries: Vec<_> = self
            .entries
            .iter()
            .flat_map(|&entry| entry.children().entries())
            .filter(|child| selector.matches(child.properties()))
            .collect();
        self.log_step("findAllInChildren", selector, entries.len());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the payload at `index`.
    pub fn get(&self, index: usize) -> Option<&'a P> {
        self.entries.get(index).map(|&entry| entry.payload())
    }

    pub fn first(&self) -> Option<&'a P> {
        self.get(0)
    }

    /// Iterates over the selected payloads in order.
    pub fn iter(&self) -> Iter<'a, '_, P> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Collects the selected payloads in order.
    pub fn payloads(&self) -> Vec<&'a P> {
        self.iter().collect()
    }

    fn log_step(&self, strategy: &str, selector: &Selector, produced: usize) {
        debug!(
            strategy = strategy,
            constraints = selector.len(),
            input = self.entries.len(),
            output = produced,
            "selection step"
        );
    }
}

fn first_in_subtree<'a, P>(entry: &'a Entry<P>, selector: &Selector) -> Option<&'a Entry<P>> {
    trace!(properties = entry.properties().len(), "visiting entry");
    if selector.matches(entry.properties()) {
        return Some(entry);
    }
    entry
        .children()
        .entries()
        .find_map(|child| first_in_subtree(child, selector))
}

fn collect_descendants<'a, P>(tree: &'a Tree<P>, selector: &Selector, results: &mut Vec<&'a Entry<P>>) {
    for child in tree.entries() {
        trace!(properties = child.properties().len(), "visiting entry");
        if selector.matches(child.properties()) {
            results.push(child);
        }
        collect_descendants(child.children(), selector, results);
    }
}

/// Iterator over the payloads of a [`Selection`].
pub struct Iter<'a, 's, P> {
    inner: std::slice::Iter<'s, &'a Entry<P>>,
}

impl<'a, P> Iterator for Iter<'a, '_, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        self.inner.next().map(|&entry| entry.payload())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<P> ExactSizeIterator for Iter<'_, '_, P> {}

impl<P> DoubleEndedIterator for Iter<'_, '_, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&entry| entry.payload())
    }
}

impl<'a, 's, P> IntoIterator for &'s Selection<'a, P> {
    type Item = &'a P;
    type IntoIter = Iter<'a, 's, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P> Index<usize> for Selection<'_, P> {
    type Output = P;

    fn index(&self, index: usize) -> &P {
        self.entries[index].payload()
    }
}
