//! Board command implementation.
//!
//! One load cycle, then filtering and rendering: the grouped Gantt grid by
//! default, the compact hour-bar list with `--list`, the grouped structure as
//! JSON with `--json`.

use chrono::Utc;

use crate::api::TrackerClient;
use crate::cli::BoardArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::{format_issue_row, render_board};
use crate::load::load_groups;
use trackline_lib::filter::{apply_filters, StreamToggles};
use trackline_lib::scale::session_max_hours;

/// Execute the board command.
///
/// # Errors
///
/// Returns an error when configuration is incomplete or any fetch of the
/// load cycle fails.
pub fn execute(
    args: &BoardArgs,
    url: Option<String>,
    api_key: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(url, api_key)?;
    let client = TrackerClient::new(config);

    let groups = load_groups(&client, &args.project)?;

    let toggles = if args.stream.is_empty() {
        StreamToggles::default()
    } else {
        StreamToggles::only(&args.stream)
    };
    let visible = apply_filters(
        &groups,
        toggles,
        args.ticket.as_deref().unwrap_or(""),
        args.assignee.as_deref().unwrap_or(""),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    if args.list {
        let session_max = session_max_hours(&visible);
        for group in &visible {
            println!("{}", format_issue_row(&group.feature, session_max));
            for part in &group.parts {
                println!("  {}", format_issue_row(part, session_max));
            }
        }
    } else {
        let today = Utc::now().date_naive();
        print!("{}", render_board(&visible, today));
    }

    Ok(())
}
