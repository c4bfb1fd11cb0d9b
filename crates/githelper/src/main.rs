//! githelper: git history reports and commit helpers
//!
//! Prints commit reports, staged changes and recent commit subjects for a
//! local working copy, and commits staged changes.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, error};

use githelper::cli;
use githelper::config::{Config, ConfigError};
use githelper::logging;

fn main() -> Result<()> {
    let config = Config::parse();

    logging::init(config.log_level()).context("Failed to initialise logging")?;

    config.validate().context("Invalid configuration")?;
    let repo = config.repo_path().ok_or(ConfigError::NoRepository)?;

    let Some(command) = &config.command else {
        Config::command().print_help()?;
        println!();
        return Ok(());
    };

    debug!(repo = %repo.display(), "Resolved repository");
    match cli::run(command, &repo) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e.into())
        }
    }
}
