//! Subcommand dispatch
//!
//! Maps each parsed subcommand onto its handler and returns the text to
//! print on stdout.

use std::path::Path;

use githelper_git::{DateRange, LogQuery, commit_log_report};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Command;
use crate::handlers::{
    CommitContextInput, CommitInput, CommitReportInput, HandlerError, RecentCommitsInput,
    call_tool, handle_commit, handle_commit_context, handle_commit_report, handle_recent_commits,
    handle_staged_changes,
};

/// Run a subcommand against the repository at `repo`
///
/// # Errors
///
/// Returns the handler error for the subcommand.
pub fn run(command: &Command, repo: &Path) -> Result<String, HandlerError> {
    debug!(?command, repo = %repo.display(), "Running subcommand");

    match command {
        Command::Report {
            start,
            end,
            diff,
            assume_time_sorted,
            json: true,
        } => report_json(repo, start, end, *diff, *assume_time_sorted),
        Command::Report {
            start,
            end,
            diff,
            assume_time_sorted,
            json: false,
        } => handle_commit_report(
            repo,
            &CommitReportInput {
                start_date: start.clone(),
                end_date: end.clone(),
                include_details: *diff,
                assume_time_sorted: *assume_time_sorted,
            },
        ),
        Command::Staged => handle_staged_changes(repo),
        Command::Recent { count } => {
            handle_recent_commits(repo, &RecentCommitsInput { count: *count })
        }
        Command::Commit { message } => handle_commit(
            repo,
            &CommitInput {
                message: message.clone(),
            },
        ),
        Command::Context { instructions } => handle_commit_context(
            repo,
            &CommitContextInput {
                instructions: instructions.clone(),
            },
        ),
        Command::Tool { name, args } => {
            call_tool(repo, name, args.as_deref().map(tool_arguments).transpose()?)
        }
    }
}

/// Parse a JSON object of tool arguments
fn tool_arguments(text: &str) -> Result<Map<String, Value>, HandlerError> {
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        other => Err(HandlerError::InvalidInput(format!(
            "tool arguments must be a JSON object, got {other}"
        ))),
    }
}

fn report_json(
    repo: &Path,
    start: &str,
    end: &str,
    diff: bool,
    assume_time_sorted: bool,
) -> Result<String, HandlerError> {
    let range = DateRange::parse(start, end).map_err(HandlerError::from_git)?;
    let query = LogQuery::new(range)
        .with_diff(diff)
        .time_sorted(assume_time_sorted);
    let report = commit_log_report(repo, &query)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_report_rejects_bad_date() {
        let command = Command::Report {
            start: "2025-13-01".to_string(),
            end: "2025-01-05".to_string(),
            diff: false,
            assume_time_sorted: false,
            json: true,
        };
        let err = run(&command, Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidInput(_)));
    }

    #[test]
    fn test_tool_arguments_must_be_object() {
        assert!(tool_arguments(r#"{"count": 2}"#).is_ok());
        assert!(matches!(
            tool_arguments("[1, 2]"),
            Err(HandlerError::InvalidInput(_))
        ));
        assert!(matches!(tool_arguments("{"), Err(HandlerError::Json(_))));
    }

    #[test]
    fn test_json_report_missing_repository() {
        let command = Command::Report {
            start: "2025-01-01".to_string(),
            end: "2025-01-05".to_string(),
            diff: false,
            assume_time_sorted: false,
            json: true,
        };
        let err = run(&command, Path::new("/nonexistent/githelper")).unwrap_err();
        assert!(matches!(err, HandlerError::Git(_)));
    }
}
