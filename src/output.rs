//! Result rendering for the command-line interface.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;

/// Renders selected payloads in the requested format.
///
/// Plain output is one payload per line with a trailing newline; an empty
/// result renders as an empty string.
///
/// ```
/// use nodequery::config::OutputFormat;
/// use nodequery::output::render_payloads;
///
/// let out = render_payloads(&["foo", "bar"], OutputFormat::Json).unwrap();
/// assert_eq!(out, "[\"foo\",\"bar\"]\n");
/// ```
pub fn render_payloads<T>(payloads: &[T], format: OutputFormat) -> Result<String>
where
    T: Serialize + std::fmt::Display,
{
    match format {
        OutputFormat::Plain => Ok(payloads
            .iter()
            .map(|payload| format!("{}\n", payload))
            .collect()),
        OutputFormat::Yaml => serde_yaml::to_string(payloads).context("Failed to render YAML"),
        OutputFormat::Json => {
            let mut out = serde_json::to_string(payloads).context("Failed to render JSON")?;
            out.push('\n');
            Ok(out)
        }
    }
}
