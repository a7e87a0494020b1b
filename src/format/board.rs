//! Gantt board rendering.
//!
//! One row per issue, one character per day of the visible window, grouped as
//! feature row plus indented part rows. The month header and today marker sit
//! above the grid. Rows are laid out cell by cell from
//! [`trackline_lib::timeline::layout_day`], so what prints is exactly what
//! the layout engine computed.

use chrono::{Datelike, Months, NaiveDate};

use trackline_lib::classify::StatusTone;
use trackline_lib::model::{Group, Issue};
use trackline_lib::timeline::{
    completed_under_budget, layout_day, progress_percent, DaySegment, TimelineWindow,
};

use super::text::{pad_display, status_glyph};

/// Width of the left gutter holding glyph, id and subject.
const GUTTER: usize = 36;

fn day_cell(segment: Option<DaySegment>, hide_empty_track: bool) -> char {
    match segment {
        None => ' ',
        Some(seg) if seg.fill >= 99.5 => '█',
        Some(seg) if seg.fill > 0.0 => '▒',
        Some(_) if hide_empty_track => ' ',
        Some(_) => '░',
    }
}

fn issue_row(issue: &Issue, window: TimelineWindow, indent: &str) -> String {
    let tone = StatusTone::from_name(&issue.status.name);
    let gutter = pad_display(
        &format!("{indent}{} #{} {}", status_glyph(tone), issue.id, issue.subject),
        GUTTER,
    );

    let progress = progress_percent(issue);
    let hide_empty_track = completed_under_budget(issue);
    let mut label = None;
    let cells: String = window
        .days()
        .map(|day| {
            let segment = layout_day(day, issue.start_date, issue.due_date, progress);
            if let Some(seg) = segment {
                if seg.label.is_some() {
                    label = seg.label;
                }
            }
            day_cell(segment, hide_empty_track)
        })
        .collect();

    label.map_or_else(
        || format!("{gutter}{cells}"),
        |pct| format!("{gutter}{cells} {pct}%"),
    )
}

/// Month header: each month's label padded to that month's day count so the
/// labels line up with the grid columns below.
fn month_header(window: TimelineWindow) -> String {
    let mut header = " ".repeat(GUTTER);
    for first in window.months() {
        let next = first
            .checked_add_months(Months::new(1))
            .unwrap_or(window.end);
        let days = (next.min(window.end.succ_opt().unwrap_or(window.end)) - first).num_days();
        #[allow(clippy::cast_sign_loss)]
        let span = days.max(0) as usize;
        let label = format!("{}-{:02}", first.year(), first.month());
        header.push_str(&pad_display(&label, span));
    }
    header
}

fn today_marker(window: TimelineWindow, today: NaiveDate) -> String {
    let mut row = " ".repeat(GUTTER);
    for day in window.days() {
        row.push(if day == today { '▼' } else { ' ' });
    }
    row
}

/// Render the grouped board as text: month header, today marker, then per
/// group a feature row and its part rows.
#[must_use]
pub fn render_board(groups: &[Group], today: NaiveDate) -> String {
    let window = TimelineWindow::around(today);

    let mut out = String::new();
    out.push_str(&month_header(window));
    out.push('\n');
    out.push_str(&today_marker(window, today));
    out.push('\n');

    for group in groups {
        out.push_str(&issue_row(&group.feature, window, ""));
        out.push('\n');
        for part in &group.parts {
            out.push_str(&issue_row(part, window, "  "));
            out.push('\n');
        }
    }
    out
}
