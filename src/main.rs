use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nodequery::cli::{run, Cli};
use nodequery::config::Config;

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Results go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The subscriber needs the config's filter, so a config error is held
    // until logging is up
    let (config, config_error) = match Config::try_load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        warn!(error = %format!("{:#}", err), "using default config");
    }

    let rendered = run(&cli, &config)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
