// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Commit log reports
//!
//! A [`Report`] renders, through [`std::fmt::Display`], to the fixed text
//! layout consumed by tool callers:
//!
//! ```text
//! Found 1 commits (2025-01-02 to 2025-01-05)
//!
//! ================================================================================
//! Commit: 1945ab9c
//! Author: Test Author
//! Date: 2025-01-03
//! Message: fix bug
//!
//! ```
//!
//! An empty report renders as `No commits found between <start> and <end>.`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::diff::CommitDiff;
use crate::range::DateRange;

/// Stable prefix of the empty-report sentinel
pub const NO_COMMITS_PREFIX: &str = "No commits found";

/// Width of the rule separating commit blocks
pub const SEPARATOR_WIDTH: usize = 80;

/// Marker shown instead of a diff for a root commit
pub const INITIAL_COMMIT_MARKER: &str = "[Initial commit - showing all new files]";

/// One qualifying commit with its diff, if diffs were requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The commit data
    #[serde(flatten)]
    pub commit: Commit,
    /// Diff against the first parent (if requested)
    pub diff: Option<CommitDiff>,
}

/// A date-bounded commit report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The range the report was requested for
    pub range: DateRange,
    /// Qualifying commits in walk order
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a report from entries already in walk order
    #[must_use]
    pub fn new(range: DateRange, entries: Vec<ReportEntry>) -> Self {
        Self { range, entries }
    }

    /// Number of qualifying commits
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no commit qualified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = (self.range.start(), self.range.end());
        if self.is_empty() {
            return write!(f, "{NO_COMMITS_PREFIX} between {start} and {end}.");
        }

        write!(f, "Found {} commits ({start} to {end})\n\n", self.count())?;
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commit = &self.commit;
        writeln!(f, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(f, "Commit: {}", commit.short_id())?;
        writeln!(f, "Author: {}", commit.author)?;
        writeln!(f, "Date: {}", commit.local_date().format("%Y-%m-%d"))?;
        writeln!(f, "Message: {}", commit.message)?;

        match &self.diff {
            Some(CommitDiff::Patch(patch)) if !patch.is_empty() => {
                write!(f, "\nCode Changes:\n{patch}")?;
            }
            Some(CommitDiff::InitialCommit) => write!(f, "\n{INITIAL_COMMIT_MARKER}\n")?,
            Some(CommitDiff::Failed(reason)) => write!(
                f,
                "\n[Could not get code changes for this commit: {reason}]\n"
            )?,
            _ => {}
        }

        writeln!(f)
    }
}
