// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Textual diffs of a commit against its first parent
//!
//! Diffs are opaque patch text. Merge commits are compared against their
//! first parent only. A failure while diffing one commit is reported as
//! [`CommitDiff::Failed`] so the surrounding report keeps going.

use git2::{Diff, DiffFormat, DiffOptions, Oid};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commit::Commit;
use crate::error::GitError;
use crate::handle::RepositoryHandle;

/// Outcome of diffing one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CommitDiff {
    /// Unified patch against the first parent (may be empty)
    Patch(String),
    /// Root commit: there is no parent to compare with
    InitialCommit,
    /// The diff could not be computed; carries the failure description
    Failed(String),
}

impl CommitDiff {
    /// Whether this diff is a recovered failure
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Diff `commit` against its first parent, recovering from failures
///
/// Never returns an error: store failures become [`CommitDiff::Failed`].
pub fn diff_commit(handle: &RepositoryHandle, commit: &Commit) -> CommitDiff {
    if commit.is_root() {
        return CommitDiff::InitialCommit;
    }
    match first_parent_patch(handle, commit) {
        Ok(patch) => {
            debug!(sha = %commit.short_id(), bytes = patch.len(), "Computed commit diff");
            CommitDiff::Patch(patch)
        }
        Err(e) => {
            warn!(sha = %commit.short_id(), error = %e, "Could not diff commit");
            let description = match e {
                GitError::DiffComputation { source, .. } => source.message().to_string(),
                other => other.to_string(),
            };
            CommitDiff::Failed(description)
        }
    }
}

fn first_parent_patch(handle: &RepositoryHandle, commit: &Commit) -> Result<String, GitError> {
    let failed = |source| GitError::DiffComputation {
        sha: commit.sha.clone(),
        source,
    };
    let repo = handle.repo();

    let oid = Oid::from_str(&commit.sha).map_err(failed)?;
    let git_commit = repo.find_commit(oid).map_err(failed)?;
    let tree = git_commit.tree().map_err(failed)?;
    let parent_tree = git_commit
        .parent(0)
        .and_then(|parent| parent.tree())
        .map_err(failed)?;

    let mut opts = DiffOptions::new();
    opts.ignore_whitespace(false);
    let diff = repo
        .diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))
        .map_err(failed)?;

    patch_text(&diff).map_err(failed)
}

/// Render a git2 diff as unified patch text
pub(crate) fn patch_text(diff: &Diff<'_>) -> Result<String, git2::Error> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}
