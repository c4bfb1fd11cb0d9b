// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Git commit metadata as read from the object store

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of hex characters shown for an abbreviated commit id
pub const SHORT_ID_LEN: usize = 8;

/// Immutable projection of one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit id (40 hex characters)
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit (committer) timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit ids, first parent first
    pub parents: Vec<String>,
    /// Id of the tree snapshot this commit points at
    pub tree: String,
}

impl Commit {
    /// Build from a git2 commit
    ///
    /// Returns `None` when the commit time lies outside chrono's range.
    pub(crate) fn from_git2(git_commit: &git2::Commit<'_>) -> Option<Self> {
        let author = git_commit.author();
        Some(Self {
            sha: git_commit.id().to_string(),
            message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
            author: author.name().unwrap_or("Unknown").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            timestamp: commit_time(git_commit.time().seconds())?,
            parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
            tree: git_commit.tree_id().to_string(),
        })
    }

    /// Abbreviated id (first 8 characters)
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.sha[..SHORT_ID_LEN.min(self.sha.len())]
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Commit time as seconds since the epoch
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Calendar date of the commit in the local time zone
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

/// Commit time as UTC, or `None` outside chrono's representable range
pub(crate) fn commit_time(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
