//! Tree design and command script loading.
//!
//! This module reads tree designs and command scripts from files or stdin.
//! Files ending in `.gz`, and stdin input starting with the gzip magic bytes,
//! are decompressed transparently.

use crate::document::parser::{parse_design_with, DesignFields};
use crate::document::tree::Tree;
use crate::query::Command;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Loads and parses a tree design file.
///
/// # Examples
///
/// ```no_run
/// use nodequery::document::parser::DesignFields;
/// use nodequery::file::loader::load_tree_file;
///
/// let tree = load_tree_file("tree.yaml", &DesignFields::default()).unwrap();
/// println!("{} top-level entries", tree.len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The contents are not a valid tree design
pub fn load_tree_file<P: AsRef<Path>>(path: P, fields: &DesignFields) -> Result<Tree<String>> {
    let path_ref = path.as_ref();
    let content = read_text_file(path_ref)?;
    let tree = parse_design_with(&content, fields)
        .with_context(|| format!("Invalid tree design in {}", path_ref.display()))?;
    info!(
        path = %path_ref.display(),
        top_level = tree.len(),
        entries = tree.entry_count(),
        "loaded tree design"
    );
    Ok(tree)
}

/// Loads and parses a tree design from standard input.
pub fn load_tree_from_stdin(fields: &DesignFields) -> Result<Tree<String>> {
    let content = read_stdin()?;
    let tree = parse_design_with(&content, fields).context("Invalid tree design on stdin")?;
    info!(top_level = tree.len(), entries = tree.entry_count(), "loaded tree design from stdin");
    Ok(tree)
}

/// Loads a command script file.
pub fn load_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let path_ref = path.as_ref();
    let content = read_text_file(path_ref)?;
    let commands = parse_script(&content)
        .with_context(|| format!("Invalid command script in {}", path_ref.display()))?;
    info!(path = %path_ref.display(), commands = commands.len(), "loaded command script");
    Ok(commands)
}

/// Parses a command script: a YAML (or JSON) sequence of `{type, selector}`
/// records. An empty document is an empty script.
///
/// ```
/// use nodequery::file::loader::parse_script;
///
/// let commands = parse_script("- {type: findAll, selector: {purple: true}}\n- type: find\n").unwrap();
/// assert_eq!(commands.len(), 2);
/// assert!(commands[1].selector.is_empty());
/// ```
pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    let commands: Option<Vec<Command>> =
        serde_yaml::from_str(source).context("Failed to parse command script")?;
    Ok(commands.unwrap_or_default())
}

/// Parses a single inline command record, e.g. `{type: find, selector: {red: dark}}`.
pub fn parse_command(source: &str) -> Result<Command> {
    serde_yaml::from_str(source).with_context(|| format!("Invalid command '{}'", source))
}

fn read_text_file(path: &Path) -> Result<String> {
    if is_gzipped(path) {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn read_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // gzip magic bytes
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Strategy;

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("~\n").unwrap().is_empty());
        assert!(parse_script("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_script() {
        let commands =
            parse_script(r#"[{"type": "findInChildren", "selector": {"red": "dark"}}]"#).unwrap();
        assert_eq!(commands[0].strategy().unwrap(), Strategy::FindInChildren);
    }

    #[test]
    fn test_script_must_be_sequence() {
        assert!(parse_script("type: find").is_err());
    }

    #[test]
    fn test_parse_command() {
        let command = parse_command("{type: find, selector: {red: light}}").unwrap();
        assert_eq!(command.kind, "find");
        assert!(parse_command("{selector: {}}").is_err());
    }

    #[test]
    fn test_gzip_detection() {
        assert!(is_gzipped(Path::new("tree.yaml.gz")));
        assert!(!is_gzipped(Path::new("tree.yaml")));
        assert!(!is_gzipped(Path::new("gz")));
    }
}
