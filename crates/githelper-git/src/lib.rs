// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! githelper-git: date-bounded git history reports
//!
//! This library crate walks a working copy's history, selects the commits
//! made within a calendar date range, optionally diffs each against its first
//! parent, and renders a fixed text report. It also reads staged changes and
//! recent commit subjects, and can commit the current index.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use githelper_git::{DateRange, LogQuery, commit_log_report};
//!
//! let range = DateRange::parse("2025-01-01", "2025-01-31").expect("valid range");
//! let report = commit_log_report(".", &LogQuery::new(range).with_diff(true))
//!     .expect("build report");
//!
//! println!("{report}");
//! ```

pub mod commit;
pub mod diff;
pub mod error;
pub mod handle;
pub mod ops;
pub mod range;
pub mod report;
pub mod staged;
pub mod walk;

pub use commit::Commit;
pub use diff::CommitDiff;
pub use error::GitError;
pub use handle::RepositoryHandle;
pub use ops::{
    DEFAULT_RECENT_COUNT, LogQuery, commit, commit_log_report, commit_logs,
    recent_commit_messages, staged_changes,
};
pub use range::DateRange;
pub use report::{NO_COMMITS_PREFIX, Report, ReportEntry};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::diff::CommitDiff;
    pub use crate::error::GitError;
    pub use crate::ops::LogQuery;
    pub use crate::range::DateRange;
    pub use crate::report::{Report, ReportEntry};
}
