//! Declarative command scripts.
//!
//! A command is a `{type, selector}` record naming one of the four
//! selection strategies. [`Selection::find_with_commands`] replays a list of
//! them left to right.
//!
//! # Example
//!
//! ```
//! use nodequery::document::parser::parse_design;
//! use nodequery::query::{Command, Selection};
//!
//! let tree = parse_design("root: { children: { foo: { purple: true }, qux: {} } }").unwrap();
//! let commands: Vec<Command> = serde_yaml::from_str(
//!     "[{type: findAllInChildren, selector: {purple: true}}]",
//! )
//! .unwrap();
//!
//! let result = Selection::new(&tree).find_with_commands(&commands).unwrap();
//! assert_eq!(result.payloads(), vec!["foo"]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{QueryError, QueryResult};
use super::selection::Selection;
use super::selector::Selector;

/// The closed set of selection strategies a command can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Find,
    FindAll,
    FindInChildren,
    FindAllInChildren,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Find,
        Strategy::FindAll,
        Strategy::FindInChildren,
        Strategy::FindAllInChildren,
    ];

    /// The command `type` that names this strategy.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Find => "find",
            Strategy::FindAll => "findAll",
            Strategy::FindInChildren => "findInChildren",
            Strategy::FindAllInChildren => "findAllInChildren",
        }
    }

    /// Runs the strategy over `selection`.
    pub fn apply<'a, P>(self, selection: &Selection<'a, P>, selector: &Selector) -> Selection<'a, P> {
        match self {
            Strategy::Find => selection.find(selector),
            Strategy::FindAll => selection.find_all(selector),
            Strategy::FindInChildren => selection.find_in_children(selector),
            Strategy::FindAllInChildren => selection.find_all_in_children(selector),
        }
    }
}

impl FromStr for Strategy {
    type Err = QueryError;

    fn from_str(kind: &str) -> QueryResult<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == kind)
            .ok_or_else(|| QueryError::UnsupportedCommand {
                kind: kind.to_string(),
            })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a command script.
///
/// `kind` is kept as written so that scripts with an unknown type still load;
/// the type is checked when the script runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub selector: Selector,
}

impl Command {
    pub fn new(strategy: Strategy, selector: Selector) -> Self {
        Self {
            kind: strategy.name().to_string(),
            selector,
        }
    }

    /// Resolves the command's type to a strategy.
    pub fn strategy(&self) -> QueryResult<Strategy> {
        self.kind.parse()
    }
}

impl<'a, P> Selection<'a, P> {
    /// Applies `commands` in order, each to the result of the previous one.
    ///
    /// An empty list returns the selection unchanged. Every command type is
    /// resolved before any strategy runs, so an unsupported type fails the
    /// whole call with [`QueryError::UnsupportedCommand`].
    pub fn find_with_commands(&self, commands: &[Command]) -> QueryResult<Self> {
        let plan = commands
            .iter()
            .map(|command| Ok((command.strategy()?, &command.selector)))
            .collect::<QueryResult<Vec<_>>>()?;

        debug!(steps = plan.len(), "running command script");
        Ok(plan
            .into_iter()
            .fold(self.clone(), |selection, (strategy, selector)| {
                strategy.apply(&selection, selector)
            }))
    }
}
