//! nodequery - chainable property-selector queries over ordered, keyed node trees.
//!
//! A [`Tree`](document::tree::Tree) maps keys to entries; each entry carries a
//! payload, a flat property map and child entries. Queries start from a
//! [`Selection`](query::Selection) over the top-level entries and narrow it
//! with `find`, `find_all`, `find_in_children` and `find_all_in_children`, or
//! replay a script of commands with `find_with_commands`.

pub mod cli;
pub mod config;
pub mod document;
pub mod file;
pub mod output;
pub mod query;
