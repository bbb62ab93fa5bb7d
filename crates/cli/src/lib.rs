//! # ERD Builder CLI
//!
//! Command-line front end for the schema graph.
//!
//! ## Commands
//!
//! - `generate` - Print or write the MySQL DDL for a schema
//! - `sample` - Export the built-in sample schema
//! - `validate` - Report problems in a schema
//! - `info` - Summarize a schema
//! - `geometry` - Print connector and marker paths for every relation
//!
//! Commands that read a schema take `-i FILE` (a snapshot written by `sample`
//! or another export) and fall back to the sample schema without it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::{CONFIG_FILE_NAME, Config};

use clap::Parser;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse the process arguments and run
pub fn run() -> anyhow::Result<()> {
    run_with(Cli::parse())
}

/// Run already-parsed arguments, writing reports to stdout
pub fn run_with(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init_logging(&logging::effective_level(cli.verbose, &config.log_level));
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli.command, &config, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_run_with_missing_config() {
        let cli = Cli::try_parse_from([
            "erd-builder",
            "info",
            "--config",
            "/nonexistent/erd.toml",
        ])
        .unwrap();
        let err = run_with(cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/erd.toml"));
    }
}
