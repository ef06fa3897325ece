//! Command-line surface: argument parsing and the query pipeline behind it.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, OutputFormat};
use crate::file::loader::{load_script_file, load_tree_file, load_tree_from_stdin, parse_command};
use crate::output::render_payloads;
use crate::query::{Command, Selection};

/// nodequery - query ordered node trees by property selectors
#[derive(Debug, Parser)]
#[command(name = "nodequery")]
#[command(version)]
#[command(about = "Run chained property-selector queries over a YAML tree design", long_about = None)]
pub struct Cli {
    /// Tree design file (omit or use '-' to read from stdin)
    pub tree: Option<PathBuf>,

    /// Command script file: a YAML/JSON list of {type, selector} records
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Inline command record, e.g. '{type: findAll, selector: {purple: true}}' (repeatable, runs after the script)
    #[arg(short, long = "command")]
    pub commands: Vec<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print only the number of selected payloads
    #[arg(long)]
    pub count: bool,
}

/// Where the tree design is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    File(PathBuf),
    Stdin,
}

/// Resolves the TREE argument.
///
/// An explicit `-` always means stdin. With no argument, stdin is only used
/// when something is piped into it; an interactive terminal is a usage error.
pub fn tree_source(tree: Option<&Path>, stdin_is_terminal: bool) -> Result<TreeSource> {
    match tree {
        Some(path) if path.as_os_str() == "-" => Ok(TreeSource::Stdin),
        Some(path) => Ok(TreeSource::File(path.to_path_buf())),
        None if stdin_is_terminal => {
            bail!("No tree design given: pass a TREE file or pipe a design on stdin (see --help)")
        }
        None => Ok(TreeSource::Stdin),
    }
}

impl Cli {
    /// Script commands first, then inline `-c` commands in order.
    pub fn collect_commands(&self) -> Result<Vec<Command>> {
        let mut commands = match &self.script {
            Some(path) => load_script_file(path)?,
            None => Vec::new(),
        };
        for source in &self.commands {
            commands.push(parse_command(source)?);
        }
        Ok(commands)
    }

    /// The output format, with the command line taking precedence over `config`.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.output.unwrap_or(config.output)
    }
}

/// Runs the full pipeline and returns the text to write to stdout.
pub fn run(cli: &Cli, config: &Config) -> Result<String> {
    let fields = config.design_fields();
    let source = tree_source(cli.tree.as_deref(), io::stdin().is_terminal())?;
    let tree = match &source {
        TreeSource::File(path) => load_tree_file(path, &fields)?,
        TreeSource::Stdin => load_tree_from_stdin(&fields)?,
    };

    let commands = cli.collect_commands()?;
    debug!(source = ?source, commands = commands.len(), "running query");

    let selection = Selection::new(&tree)
        .find_with_commands(&commands)
        .context("Query failed")?;

    if cli.count {
        Ok(format!("{}\n", selection.len()))
    } else {
        render_payloads(&selection.payloads(), cli.output_format(config))
    }
}
