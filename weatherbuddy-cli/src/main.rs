//! Binary crate for the `weatherbuddy` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments into front-end events
//! - Interactive configuration
//! - Human-friendly output and error notifications

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weatherbuddy_core::Config;

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let config = Config::load()?;
    init_logging(cmd.verbose, &config);
    cmd.run(config).await
}

/// `RUST_LOG` wins; otherwise `--verbose`, then `log_level` from config.
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("warn")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
