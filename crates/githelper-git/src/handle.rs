// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Scoped read handle onto a working copy's metadata store
//!
//! Every public operation opens its own [`RepositoryHandle`] and drops it
//! before returning, so results always reflect what is on disk.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// Name of the metadata store directory inside a working copy
pub const METADATA_DIR: &str = ".git";

/// An open repository, released when dropped
pub struct RepositoryHandle {
    repo: Repository,
    path: PathBuf,
}

impl RepositoryHandle {
    /// Open the working copy at `path`
    ///
    /// The metadata store must live directly beneath the path; parent
    /// directories are not searched.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the metadata store is missing
    /// or cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let not_found = || GitError::RepositoryNotFound {
            path: path.display().to_string(),
        };

        if !path.join(METADATA_DIR).exists() {
            return Err(not_found());
        }
        let repo = Repository::open(path).map_err(|_| not_found())?;

        debug!(path = %path.display(), "Opened repository handle");
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// The working copy path this handle was opened on
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying git2 repository
    #[must_use]
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Map a git2 error from `operation` into a store error with path context
    pub(crate) fn store_err(&self, operation: &'static str) -> impl FnOnce(git2::Error) -> GitError + '_ {
        GitError::store(operation, &self.path)
    }

    /// Resolve HEAD to a commit, or `None` for a repository with no commits
    ///
    /// # Errors
    ///
    /// Returns `GitError::Store` if HEAD exists but cannot be resolved.
    pub fn head_commit(&self) -> Result<Option<git2::Commit<'_>>, GitError> {
        match self.repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map(Some)
                .map_err(self.store_err("resolve HEAD")),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(self.store_err("resolve HEAD")(e)),
        }
    }
}

impl Drop for RepositoryHandle {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "Released repository handle");
    }
}

/// True when a git2 error means HEAD points at a branch with no commits
pub(crate) fn is_unborn(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "githelper-handle-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_open_nonexistent_repository() {
        let result = RepositoryHandle::open("/nonexistent/path");
        match result {
            Err(GitError::RepositoryNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            _ => panic!("Expected RepositoryNotFound error"),
        }
    }

    #[test]
    fn test_open_plain_directory_is_not_found() {
        let dir = temp_dir("plain");
        let result = RepositoryHandle::open(&dir);
        assert!(matches!(result, Err(GitError::RepositoryNotFound { .. })));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_does_not_search_parents() {
        let dir = temp_dir("nested");
        Repository::init(&dir).expect("init");
        let nested = dir.join("sub");
        std::fs::create_dir_all(&nested).expect("create nested");

        assert!(RepositoryHandle::open(&dir).is_ok());
        assert!(matches!(
            RepositoryHandle::open(&nested),
            Err(GitError::RepositoryNotFound { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_head_commit_on_empty_repository() {
        let dir = temp_dir("empty");
        Repository::init(&dir).expect("init");
        let handle = RepositoryHandle::open(&dir).expect("open");
        assert!(handle.head_commit().expect("head").is_none());
        assert_eq!(handle.path(), dir.as_path());
        drop(handle);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
