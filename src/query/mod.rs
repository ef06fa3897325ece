//! Property-selector queries over [`Tree`](crate::document::tree::Tree)s.
//!
//! Queries start from [`Selection::new`] over the top-level entries of a
//! tree and are chained with four strategies:
//!
//! - `find` - first match per entry, searching the entry itself and then its
//!   descendants in pre-order
//! - `find_all` - every matching descendant per entry (the entry itself excluded)
//! - `find_in_children` - first matching direct child per entry
//! - `find_all_in_children` - every matching direct child per entry
//!
//! A [`Selector`] matches an entry when each of its constraints equals the
//! entry's property of the same name. [`Selection::find_with_commands`]
//! replays a script of [`Command`]s.
//!
//! # Examples
//!
//! ```
//! use nodequery::document::parser::parse_design;
//! use nodequery::query::{Selection, Selector};
//!
//! let tree = parse_design(
//!     "root: { children: { foo: { purple: true, children: { bar: { red: dark } } },
//!                          qux: { purple: true, children: { baz: { red: dark } } } } }",
//! )
//! .unwrap();
//!
//! let result = Selection::new(&tree)
//!     .find_all(&Selector::any().with("purple", true))
//!     .find_in_children(&Selector::any().with("red", "dark"));
//! assert_eq!(result.payloads(), vec!["bar", "baz"]);
//! ```

pub mod command;
pub mod error;
pub mod selection;
pub mod selector;

pub use command::{Command, Strategy};
pub use error::{QueryError, QueryResult};
pub use selection::{create_selection, Selection};
pub use selector::{matches, Selector};
