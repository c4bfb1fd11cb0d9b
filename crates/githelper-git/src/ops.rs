// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Repository operations
//!
//! Each function opens its own [`RepositoryHandle`] and releases it before
//! returning; no repository state is kept between calls. Concurrent readers
//! are safe; serializing a [`commit`] against in-flight reads is up to the
//! caller.

use std::path::Path;

use tracing::{debug, info};

use crate::diff::diff_commit;
use crate::error::GitError;
use crate::handle::RepositoryHandle;
use crate::range::DateRange;
use crate::report::{Report, ReportEntry};
use crate::staged;
use crate::walk::walk;

/// Number of commits returned by [`recent_commit_messages`] when unspecified
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Parameters for a date-bounded commit log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery {
    /// Inclusive calendar range
    pub range: DateRange,
    /// Attach the diff against each commit's first parent
    pub include_diff: bool,
    /// Stop walking at the first commit older than the range
    ///
    /// Only correct when history is strictly ordered by commit time. Rebased
    /// or cherry-picked commits can break that order, in which case qualifying
    /// commits behind the first older one are dropped.
    pub assume_time_sorted: bool,
}

impl LogQuery {
    /// Query a range without diffs, walking the whole history
    #[must_use]
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            include_diff: false,
            assume_time_sorted: false,
        }
    }

    /// Enable diff extraction
    #[must_use]
    pub fn with_diff(mut self, include: bool) -> Self {
        self.include_diff = include;
        self
    }

    /// Opt in to stopping at the first commit older than the range
    #[must_use]
    pub fn time_sorted(mut self, sorted: bool) -> Self {
        self.assume_time_sorted = sorted;
        self
    }
}

/// Render the commit log for a `YYYY-MM-DD` range as report text
///
/// Dates are validated before the repository is touched.
///
/// # Errors
///
/// Returns `GitError::DateFormat` or `GitError::DateRangeInvalid` for bad
/// input, `GitError::RepositoryNotFound` for a bad path and
/// `GitError::Store` if the history cannot be read.
pub fn commit_logs(
    path: impl AsRef<Path>,
    start: &str,
    end: &str,
    include_diff: bool,
) -> Result<String, GitError> {
    let range = DateRange::parse(start, end)?;
    let report = commit_log_report(path, &LogQuery::new(range).with_diff(include_diff))?;
    Ok(report.to_string())
}

/// Build the structured commit log report for a query
///
/// # Errors
///
/// Returns `GitError::RepositoryNotFound` for a bad path, and
/// `GitError::Store` if the history cannot be read. Per-commit diff failures
/// are annotated in the report instead.
pub fn commit_log_report(path: impl AsRef<Path>, query: &LogQuery) -> Result<Report, GitError> {
    let window = query.range.window()?;
    let handle = RepositoryHandle::open(path)?;

    let mut entries = Vec::new();
    let mut commits = walk(&handle, None)?;
    for commit in commits.by_ref() {
        let commit = commit?;
        let seconds = commit.epoch_seconds();

        if !window.contains(seconds) {
            if query.assume_time_sorted && seconds < window.since {
                debug!(sha = %commit.short_id(), "Reached commit older than range, stopping");
                break;
            }
            continue;
        }

        let diff = query.include_diff.then(|| diff_commit(&handle, &commit));
        entries.push(ReportEntry { commit, diff });
    }

    info!(
        range = %query.range,
        walked = commits.yielded(),
        matched = entries.len(),
        "Built commit log report"
    );
    Ok(Report::new(query.range, entries))
}

/// Diff of the index against the last commit, empty when nothing is staged
///
/// # Errors
///
/// Returns `GitError::RepositoryNotFound` for a bad path and
/// `GitError::Store` if the index cannot be read.
pub fn staged_changes(path: impl AsRef<Path>) -> Result<String, GitError> {
    let handle = RepositoryHandle::open(path)?;
    staged::staged_changes(&handle)
}

/// Subjects of the `count` most recent commits, one per line
///
/// # Errors
///
/// Returns `GitError::RepositoryNotFound` for a bad path and
/// `GitError::Store` if the history cannot be walked.
pub fn recent_commit_messages(path: impl AsRef<Path>, count: usize) -> Result<String, GitError> {
    let handle = RepositoryHandle::open(path)?;
    staged::recent_messages(&handle, count)
}

/// Commit the current index on top of HEAD and return the new commit id
///
/// Uses the signature configured for the repository.
///
/// # Errors
///
/// Returns `GitError::EmptyCommitMessage` for a blank message,
/// `GitError::RepositoryNotFound` for a bad path and `GitError::Store` if
/// the commit cannot be written.
pub fn commit(path: impl AsRef<Path>, message: &str) -> Result<String, GitError> {
    if message.trim().is_empty() {
        return Err(GitError::EmptyCommitMessage);
    }
    let handle = RepositoryHandle::open(path)?;
    let repo = handle.repo();

    let signature = repo.signature().map_err(handle.store_err("read signature"))?;
    let mut index = repo.index().map_err(handle.store_err("read index"))?;
    let tree_id = index.write_tree().map_err(handle.store_err("write tree"))?;
    let tree = repo.find_tree(tree_id).map_err(handle.store_err("write tree"))?;

    let parent = handle.head_commit()?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    let oid = repo
        .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .map_err(handle.store_err("commit"))?;

    info!(sha = %oid, "Created commit");
    Ok(oid.to_string())
}
