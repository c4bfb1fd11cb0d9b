// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Staged changes and short recent history

use git2::DiffOptions;
use tracing::debug;

use crate::diff::patch_text;
use crate::error::GitError;
use crate::handle::RepositoryHandle;
use crate::walk::walk;

/// Diff of the index against the last commit, empty when nothing is staged
///
/// A repository without commits compares the index against the empty tree.
///
/// # Errors
///
/// Returns `GitError::Store` if the index or HEAD cannot be read.
pub fn staged_changes(handle: &RepositoryHandle) -> Result<String, GitError> {
    let repo = handle.repo();
    let head_tree = match handle.head_commit()? {
        Some(commit) => Some(commit.tree().map_err(handle.store_err("read HEAD tree"))?),
        None => None,
    };
    let index = repo.index().map_err(handle.store_err("read index"))?;

    let mut opts = DiffOptions::new();
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))
        .map_err(handle.store_err("diff index"))?;
    let text = patch_text(&diff).map_err(handle.store_err("diff index"))?;

    debug!(bytes = text.len(), "Read staged changes");
    Ok(text)
}

/// Subjects of the `count` most recent commits, newline-joined in walk order
///
/// # Errors
///
/// Returns `GitError::Store` if the history cannot be walked.
pub fn recent_messages(handle: &RepositoryHandle, count: usize) -> Result<String, GitError> {
    let subjects = walk(handle, Some(count))?
        .map(|commit| commit.map(|c| c.subject().to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(subjects.join("\n"))
}
