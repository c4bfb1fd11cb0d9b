// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Lazy commit history traversal
//!
//! Commits come out in the store's native revwalk order starting at HEAD.
//! Nothing is re-sorted: history order is not guaranteed to agree with
//! commit timestamps after rebases or cherry-picks.

use git2::{Revwalk, Sort};
use tracing::{debug, warn};

use crate::commit::Commit;
use crate::error::GitError;
use crate::handle::RepositoryHandle;

/// Iterator over the commits reachable from HEAD
pub struct CommitWalk<'h> {
    handle: &'h RepositoryHandle,
    revwalk: Option<Revwalk<'h>>,
    remaining: Option<usize>,
    yielded: usize,
}

/// Start a walk from HEAD, optionally bounded to the first `max_count` commits
///
/// A repository without commits yields an empty walk.
///
/// # Errors
///
/// Returns `GitError::Store` if the revwalk cannot be set up.
pub fn walk(handle: &RepositoryHandle, max_count: Option<usize>) -> Result<CommitWalk<'_>, GitError> {
    // push_head fails with a generic error on an unborn branch
    if handle.head_commit()?.is_none() {
        debug!(path = %handle.path().display(), "Repository has no commits");
        return Ok(CommitWalk {
            handle,
            revwalk: None,
            remaining: max_count,
            yielded: 0,
        });
    }

    let repo = handle.repo();
    let mut revwalk = repo.revwalk().map_err(handle.store_err("walk history"))?;
    revwalk
        .set_sorting(Sort::NONE)
        .map_err(handle.store_err("walk history"))?;
    revwalk.push_head().map_err(handle.store_err("walk history"))?;

    Ok(CommitWalk {
        handle,
        revwalk: Some(revwalk),
        remaining: max_count,
        yielded: 0,
    })
}

impl CommitWalk<'_> {
    /// Number of commits yielded so far
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<Commit, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let commit = loop {
            let oid = match self.revwalk.as_mut()?.next()? {
                Ok(oid) => oid,
                Err(e) => return Some(Err(self.handle.store_err("walk history")(e))),
            };
            let git_commit = match self.handle.repo().find_commit(oid) {
                Ok(c) => c,
                Err(e) => return Some(Err(self.handle.store_err("read commit")(e))),
            };
            match Commit::from_git2(&git_commit) {
                Some(commit) => break commit,
                None => warn!(
                    sha = %oid,
                    seconds = git_commit.time().seconds(),
                    "Skipping commit with unrepresentable time"
                ),
            }
        };

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        self.yielded += 1;
        Some(Ok(commit))
    }
}
