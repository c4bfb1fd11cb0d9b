// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Error types for githelper-git

use thiserror::Error;

/// Errors that can occur during git history operations
#[derive(Debug, Error)]
pub enum GitError {
    /// No metadata store under the given working copy
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The working copy path that was opened
        path: String,
    },

    /// A calendar date could not be parsed as `YYYY-MM-DD`
    #[error("Invalid date '{input}': {reason}")]
    DateFormat {
        /// The string as supplied by the caller
        input: String,
        /// Why the string was rejected
        reason: String,
    },

    /// The start date lies after the end date
    #[error("Invalid date range: start date {start} is after end date {end}")]
    DateRangeInvalid {
        /// Requested start date
        start: String,
        /// Requested end date
        end: String,
    },

    /// Diff of a single commit against its first parent failed
    ///
    /// Recovered inside [`crate::diff::diff_commit`]; reports carry it inline.
    #[error("Diff failed for commit {sha}: {source}")]
    DiffComputation {
        /// The commit whose diff failed
        sha: String,
        /// The store failure
        source: git2::Error,
    },

    /// I/O or corruption in the object store while running an operation
    #[error("Git {operation} failed for {path}: {source}")]
    Store {
        /// Name of the operation that failed
        operation: &'static str,
        /// Repository path the operation ran against
        path: String,
        /// Error from the git2 library
        source: git2::Error,
    },

    /// Commit requested with an empty message
    #[error("Commit message must not be empty")]
    EmptyCommitMessage,
}

impl GitError {
    /// Build a closure mapping a git2 error into [`GitError::Store`]
    pub(crate) fn store<'a>(
        operation: &'static str,
        path: &'a std::path::Path,
    ) -> impl FnOnce(git2::Error) -> GitError + 'a {
        move |source| GitError::Store {
            operation,
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_store_error_carries_context() {
        let err = GitError::store("walk", Path::new("/repo/path"))(git2::Error::from_str("boom"));
        let msg = err.to_string();
        assert!(msg.contains("walk"));
        assert!(msg.contains("/repo/path"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_date_format_message_includes_parse_text() {
        let source = chrono::NaiveDate::parse_from_str("2025-13-01", "%Y-%m-%d").unwrap_err();
        let expected = source.to_string();
        let err = GitError::DateFormat {
            input: "2025-13-01".to_string(),
            reason: expected.clone(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-13-01"));
        assert!(msg.contains(&expected));
    }

    #[test]
    fn test_range_message_echoes_dates() {
        let err = GitError::DateRangeInvalid {
            start: "2025-02-01".to_string(),
            end: "2025-01-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start date 2025-02-01 is after end date 2025-01-01"
        );
    }
}
