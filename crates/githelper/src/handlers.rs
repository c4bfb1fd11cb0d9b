// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Tool handlers
//!
//! Each handler runs one repository operation and wraps the result in the
//! user-facing text returned to a tool caller. Inputs are typed structs that
//! can also be deserialized from JSON tool arguments.

use std::path::Path;

use githelper_git::{
    DEFAULT_RECENT_COUNT, DateRange, GitError, LogQuery, NO_COMMITS_PREFIX, commit,
    commit_log_report, recent_commit_messages, staged_changes,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Maximum characters of staged diff shown in the commit context
pub const STAGED_PREVIEW_CHARS: usize = 800;

/// Tool names accepted by [`call_tool`]
pub const TOOL_NAMES: [&str; 5] = [
    "commit_report",
    "staged_changes",
    "recent_commits",
    "commit_context",
    "commit",
];

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Git operation error
    #[error("Git operation failed: {0}")]
    Git(#[from] GitError),

    /// Invalid input - bad or missing field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Repository path does not exist
    #[error("Project path does not exist: {0}. Check the repository path.")]
    RepositoryPathNotFound(String),

    /// No tool with this name
    #[error("Unknown tool: {0}. Available tools: {tools}", tools = TOOL_NAMES.join(", "))]
    UnknownTool(String),
}

impl HandlerError {
    /// Map date errors to input errors with a format hint
    pub(crate) fn from_git(err: GitError) -> Self {
        match err {
            GitError::DateFormat { .. } => Self::InvalidInput(format!(
                "{err}. Expected format YYYY-MM-DD (for example 2025-01-01)"
            )),
            GitError::DateRangeInvalid { .. } => Self::InvalidInput(err.to_string()),
            other => Self::Git(other),
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for the commit report tool
#[derive(Debug, Clone, Deserialize)]
pub struct CommitReportInput {
    /// First day of the range (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the range (YYYY-MM-DD)
    pub end_date: String,
    /// Include code changes for each commit
    #[serde(default)]
    pub include_details: bool,
    /// Stop at the first commit older than the range
    #[serde(default)]
    pub assume_time_sorted: bool,
}

/// Input for the recent commits tool
#[derive(Debug, Clone, Deserialize)]
pub struct RecentCommitsInput {
    /// Number of commits to show
    #[serde(default = "default_recent_count")]
    pub count: usize,
}

impl Default for RecentCommitsInput {
    fn default() -> Self {
        Self {
            count: default_recent_count(),
        }
    }
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

/// Input for the commit context tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitContextInput {
    /// Optional instructions from the user
    pub instructions: Option<String>,
}

/// Input for the commit tool
#[derive(Debug, Clone, Deserialize)]
pub struct CommitInput {
    /// Commit message
    pub message: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse tool arguments into a typed input struct
///
/// # Errors
///
/// Returns `HandlerError::InvalidInput` if the arguments do not match.
pub fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args.map(Value::Object).unwrap_or(Value::Object(Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

/// Run the named tool with JSON arguments
///
/// # Errors
///
/// Returns `HandlerError::UnknownTool` for an unrecognised name,
/// `HandlerError::InvalidInput` if the arguments do not fit the tool, or the
/// tool's own error.
pub fn call_tool(
    repo: &Path,
    name: &str,
    args: Option<Map<String, Value>>,
) -> Result<String, HandlerError> {
    debug!(tool = name, "Calling tool");
    match name {
        "commit_report" => handle_commit_report(repo, &parse_input(args)?),
        "staged_changes" => handle_staged_changes(repo),
        "recent_commits" => handle_recent_commits(repo, &parse_input(args)?),
        "commit_context" => handle_commit_context(repo, &parse_input(args)?),
        "commit" => handle_commit(repo, &parse_input(args)?),
        other => Err(HandlerError::UnknownTool(other.to_string())),
    }
}

/// Handle the commit report tool
///
/// Returns the commit log for the range, headed by project and range.
pub fn handle_commit_report(repo: &Path, input: &CommitReportInput) -> Result<String, HandlerError> {
    let range =
        DateRange::parse(&input.start_date, &input.end_date).map_err(HandlerError::from_git)?;
    ensure_exists(repo)?;

    let query = LogQuery::new(range)
        .with_diff(input.include_details)
        .time_sorted(input.assume_time_sorted);
    let logs = commit_log_report(repo, &query)?.to_string();
    let name = project_name(repo);

    if logs.starts_with(NO_COMMITS_PREFIX) {
        return Ok(format!("Warning: {logs}\n\nProject: {name}"));
    }

    Ok(format!(
        "Commit history for project {name}\nRange: {} to {}\n\n{logs}",
        input.start_date, input.end_date
    ))
}

/// Handle the staged changes tool
pub fn handle_staged_changes(repo: &Path) -> Result<String, HandlerError> {
    ensure_exists(repo)?;
    let changes = staged_changes(repo)?;
    let name = project_name(repo);

    if changes.is_empty() {
        return Ok(format!(
            "No staged changes.\n\nProject: {name}\nPath: {}\n\n\
             Use 'git add <file>' to stage files.",
            repo.display()
        ));
    }
    Ok(format!("Project: {name}\n\nStaged changes:\n```\n{changes}\n```"))
}

/// Handle the recent commits tool
pub fn handle_recent_commits(repo: &Path, input: &RecentCommitsInput) -> Result<String, HandlerError> {
    ensure_exists(repo)?;
    let commits = recent_commit_messages(repo, input.count)?;
    let name = project_name(repo);

    if commits.trim().is_empty() {
        return Ok(format!(
            "This project has no commits yet.\n\nProject: {name}\nPath: {}",
            repo.display()
        ));
    }
    let shown = commits.lines().count();
    Ok(format!(
        "Project: {name}\n\nLast {shown} commits:\n```\n{commits}\n```"
    ))
}

/// Handle the commit context tool
///
/// Shows a preview of the staged diff with recent subjects for reference.
pub fn handle_commit_context(repo: &Path, input: &CommitContextInput) -> Result<String, HandlerError> {
    ensure_exists(repo)?;
    let changes = staged_changes(repo)?;
    if changes.is_empty() {
        return Ok(format!(
            "No staged changes.\n\nStage files first:\n  git add <file>  or  git add .\n\n\
             Project path: {}",
            repo.display()
        ));
    }
    let recent = recent_commit_messages(repo, DEFAULT_RECENT_COUNT)?;

    let mut out = format!("Analyzed project: {}\n\n", project_name(repo));
    if let Some(instructions) = input.instructions.as_deref().map(str::trim)
        && !instructions.is_empty()
    {
        out.push_str(&format!("Instructions: {instructions}\n\n"));
    }

    let (preview, truncated) = truncate_chars(&changes, STAGED_PREVIEW_CHARS);
    debug!(total = changes.len(), truncated, "Built staged preview");
    out.push_str("Staged changes summary:\n```\n");
    out.push_str(preview);
    if truncated {
        out.push_str(&format!(
            "\n...\n(large change, showing the first {STAGED_PREVIEW_CHARS} characters)"
        ));
    }
    out.push_str("\n```\n");

    if !recent.is_empty() {
        out.push_str(&format!(
            "\nRecent commits (for reference):\n```\n{recent}\n```\n"
        ));
    }
    Ok(out)
}

/// Handle the commit tool
pub fn handle_commit(repo: &Path, input: &CommitInput) -> Result<String, HandlerError> {
    ensure_exists(repo)?;
    let sha = commit(repo, &input.message)?;
    Ok(format!(
        "Created commit {} in {}",
        &sha[..sha.len().min(8)],
        project_name(repo)
    ))
}

/// Split `text` after at most `max` characters, reporting whether it was cut
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

fn ensure_exists(repo: &Path) -> Result<(), HandlerError> {
    if repo.exists() {
        Ok(())
    } else {
        Err(HandlerError::RepositoryPathNotFound(
            repo.display().to_string(),
        ))
    }
}

/// Display name of a project: the last path component
fn project_name(repo: &Path) -> String {
    repo.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo.display().to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper to convert a JSON Value to a Map for testing
    fn to_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected JSON object"),
        }
    }

    #[test]
    fn test_parse_commit_report_input() {
        let args = to_map(json!({
            "start_date": "2025-01-01",
            "end_date": "2025-01-07",
            "include_details": true
        }));
        let input: CommitReportInput = parse_input(Some(args)).expect("parse");
        assert_eq!(input.start_date, "2025-01-01");
        assert_eq!(input.end_date, "2025-01-07");
        assert!(input.include_details);
        assert!(!input.assume_time_sorted);
    }

    #[test]
    fn test_parse_commit_report_input_requires_dates() {
        let args = to_map(json!({ "start_date": "2025-01-01" }));
        let result: Result<CommitReportInput, _> = parse_input(Some(args));
        assert!(matches!(result, Err(HandlerError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_recent_commits_input_defaults() {
        let input: RecentCommitsInput = parse_input(None).expect("parse");
        assert_eq!(input.count, 5);
        assert_eq!(RecentCommitsInput::default().count, 5);
    }

    #[test]
    fn test_parse_commit_context_input() {
        let input: CommitContextInput = parse_input(None).expect("parse");
        assert!(input.instructions.is_none());

        let args = to_map(json!({ "instructions": "keep it short" }));
        let input: CommitContextInput = parse_input(Some(args)).expect("parse");
        assert_eq!(input.instructions.as_deref(), Some("keep it short"));
    }

    #[test]
    fn test_report_bad_date_is_invalid_input() {
        let input = CommitReportInput {
            start_date: "01/02/2025".to_string(),
            end_date: "2025-01-05".to_string(),
            include_details: false,
            assume_time_sorted: false,
        };
        let err = handle_commit_report(Path::new("/nonexistent"), &input).unwrap_err();
        match err {
            HandlerError::InvalidInput(msg) => assert!(msg.contains("YYYY-MM-DD")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_report_reversed_range_is_invalid_input() {
        let input = CommitReportInput {
            start_date: "2025-02-01".to_string(),
            end_date: "2025-01-01".to_string(),
            include_details: false,
            assume_time_sorted: false,
        };
        let err = handle_commit_report(Path::new("/nonexistent"), &input).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_repository_path() {
        let err = handle_staged_changes(Path::new("/nonexistent/project")).unwrap_err();
        assert!(matches!(err, HandlerError::RepositoryPathNotFound(_)));
    }

    #[test]
    fn test_call_tool_unknown_name() {
        let err = call_tool(Path::new("/nonexistent"), "search", None).unwrap_err();
        match err {
            HandlerError::UnknownTool(name) => assert_eq!(name, "search"),
            other => panic!("Expected UnknownTool, got {other:?}"),
        }
        let msg = HandlerError::UnknownTool("search".to_string()).to_string();
        assert!(msg.contains("commit_report, staged_changes"));
    }

    #[test]
    fn test_call_tool_rejects_bad_arguments() {
        let args = to_map(json!({ "end_date": "2025-01-07" }));
        let err = call_tool(Path::new("/nonexistent"), "commit_report", Some(args)).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidInput(_)));

        let err = call_tool(Path::new("/nonexistent"), "commit", None).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidInput(_)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), ("hello", false));
        assert_eq!(truncate_chars("hello", 5), ("hello", false));
        assert_eq!(truncate_chars("hello", 3), ("hel", true));
        assert_eq!(truncate_chars("日本語テキスト", 3), ("日本語", true));
        assert_eq!(truncate_chars("", 0), ("", false));
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name(Path::new("/home/dev/my-project")), "my-project");
    }
}
