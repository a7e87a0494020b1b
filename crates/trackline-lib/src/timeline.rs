//! Gantt timeline layout.
//!
//! Decomposes an issue's progress bar into per-day cells over a fixed
//! thirteen-month window (six whole months back, the current month, six whole
//! months forward). Each cell is a pure function of (day, start, end,
//! progress), so layout is recomputed freely on every filter change and is
//! testable day by day.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::model::Issue;

/// The visible calendar window, anchored on "today" at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    /// Window from the first day of the month six months before `today`
    /// through the last day of the month six months after.
    #[must_use]
    pub fn around(today: NaiveDate) -> Self {
        let anchor = today.with_day(1).unwrap_or(today);
        let start = anchor
            .checked_sub_months(Months::new(6))
            .unwrap_or(anchor);
        let end = anchor
            .checked_add_months(Months::new(7))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap_or(anchor);
        Self { start, end }
    }

    /// Every day in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// First-of-month anchors covering the window, for the header row.
    #[must_use]
    pub fn months(&self) -> Vec<NaiveDate> {
        let mut months = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            months.push(cursor);
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        months
    }
}

/// Bar geometry for one issue-day cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySegment {
    /// Fill of this day's slice of the bar, 0-100.
    pub fill: f64,
    /// Pill-shaped left edge; only on the day equal to the start date.
    pub round_left: bool,
    /// Pill-shaped right edge; only on the day equal to the end date.
    pub round_right: bool,
    /// Rounded progress percent, emitted exactly once per issue on the last
    /// day with non-zero fill. The fill edge is capped on that day too.
    pub label: Option<u32>,
}

/// Progress source selection: spent/estimated hours when an estimate exists
/// (may exceed 100 for over-budget spend), else the tracker's own done ratio.
#[must_use]
pub fn progress_percent(issue: &Issue) -> f64 {
    let estimated = issue.estimated();
    if estimated > 0.0 {
        issue.spent() / estimated * 100.0
    } else {
        f64::from(issue.done_ratio)
    }
}

/// Done per the tracker but under the hour budget: the renderer hides the
/// empty remainder of the track for these.
#[must_use]
pub fn completed_under_budget(issue: &Issue) -> bool {
    issue.done_ratio == 100 && progress_percent(issue) < 100.0
}

/// Compute the bar segment for one day, or `None` when the issue has no
/// usable date range or the day falls outside it.
///
/// The bar spans `[start, end]` inclusive. Progress is spread across the span
/// in day units: days wholly inside the progress extent fill 100, the day
/// holding the progress tip fills by the fractional remainder, later days
/// stay empty. The tip label attributes an exact day-boundary progress value
/// to the completed prior day rather than the empty next one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn layout_day(
    day: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    progress: f64,
) -> Option<DaySegment> {
    let (start, end) = (start?, end?);
    if day < start || day > end {
        return None;
    }

    let total_days = (end - start).num_days().max(0) + 1;
    let day_index = (day - start).num_days();

    let progress_in_days = progress / 100.0 * total_days as f64;
    let whole = progress_in_days.floor() as i64;

    let fill = if day_index < whole {
        100.0
    } else if day_index == whole {
        progress_in_days.fract() * 100.0
    } else {
        0.0
    };

    // Epsilon guards the exact-boundary case: progress landing on a day
    // boundary labels the completed prior day, not the empty next one.
    let tip_index = (progress_in_days - 0.001).floor() as i64;
    let label = if day_index == tip_index && fill > 0.0 {
        Some(progress.round() as u32)
    } else {
        None
    };

    Some(DaySegment {
        fill,
        round_left: day == start,
        round_right: day == end,
        label,
    })
}
