// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Configuration for the githelper command line
//!
//! This module provides the CLI definition, the repository path default and
//! the logging level derived from the verbosity flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use githelper_git::DEFAULT_RECENT_COUNT;

/// Githelper - git history reports and commit helpers
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "githelper")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (prints help when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the git working copy
    ///
    /// The repository metadata must live directly beneath this path.
    /// Defaults to the current working directory.
    #[arg(short, long, env = "GITHELPER_REPO")]
    pub repo: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so that report text on stdout stays clean.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report the commits made between two dates
    ///
    /// Both dates are inclusive and use the YYYY-MM-DD format.
    ///
    /// Example:
    ///   githelper report 2025-01-01 2025-01-07 --diff
    Report {
        /// First day of the range (YYYY-MM-DD)
        start: String,

        /// Last day of the range (YYYY-MM-DD)
        end: String,

        /// Include each commit's diff against its first parent
        #[arg(long)]
        diff: bool,

        /// Stop at the first commit older than the range
        ///
        /// Only safe when history is ordered by commit time; rebased or
        /// cherry-picked commits may be skipped.
        #[arg(long)]
        assume_time_sorted: bool,

        /// Emit the report entries as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the staged changes (index against the last commit)
    Staged,

    /// Show the subjects of the most recent commits
    Recent {
        /// Number of commits to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_COUNT)]
        count: usize,
    },

    /// Commit the staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Show the context for writing a commit message
    ///
    /// Prints a preview of the staged changes together with recent commit
    /// subjects for reference.
    Context {
        /// Extra instructions to echo alongside the context
        #[arg(short, long)]
        instructions: Option<String>,
    },

    /// Run a tool by name with JSON arguments
    ///
    /// Tools: commit_report, staged_changes, recent_commits, commit_context,
    /// commit.
    ///
    /// Example:
    ///   githelper tool commit_report '{"start_date":"2025-01-01","end_date":"2025-01-07"}'
    Tool {
        /// Tool name
        name: String,

        /// Arguments as a JSON object (defaults to `{}`)
        args: Option<String>,
    },
}

impl Config {
    /// Get the repository path, using current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path is specified but doesn't
    /// exist or is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepositoryNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepositoryNotDirectory(repo.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// Current directory could not be determined
    #[error("No repository given and the current directory is unavailable")]
    NoRepository,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.repo.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_repo_path_default() {
        let config = Config::default();
        let repo = config.repo_path();
        assert!(repo.is_some());
    }

    #[test]
    fn test_repo_path_custom() {
        let custom = PathBuf::from("/tmp");
        let config = Config {
            repo: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.repo_path(), Some(custom));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);

        let verbose = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);

        let quiet = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(quiet.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::RepositoryNotFound(_))));
    }

    #[test]
    fn test_validate_valid_directory() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
