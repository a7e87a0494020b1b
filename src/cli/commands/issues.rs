//! Issues command implementation.
//!
//! Flat listing without the grouping pass, for quick inspection of what the
//! tracker returns.

use crate::api::{IssueQuery, TrackerClient};
use crate::cli::IssuesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::format_issue_row;
use trackline_lib::scale::session_max_hours;
use trackline_lib::model::Group;

/// Execute the issues command.
///
/// # Errors
///
/// Returns an error when configuration is incomplete or the fetch fails.
pub fn execute(
    args: &IssuesArgs,
    url: Option<String>,
    api_key: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(url, api_key)?;
    let client = TrackerClient::new(config);

    let query = IssueQuery {
        project_id: args.project,
        status_id: args.status,
        assigned_to_id: args.assigned_to,
        limit: args.limit,
        updated_since: None,
    };
    let issues = client.issues(&query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    // Reuse the list-row scale across the flat result.
    let groups: Vec<Group> = issues.iter().cloned().map(Group::new).collect();
    let session_max = session_max_hours(&groups);
    for issue in &issues {
        println!("{}", format_issue_row(issue, session_max));
    }
    println!("\n{} issue(s)", issues.len());

    Ok(())
}
