//! Text formatting primitives for the dashboard views.
//!
//! Plain text (non-ANSI) building blocks shared by the board and list views:
//! - status glyphs (○ ◐ ● ✓ ✗ ◌ ❄)
//! - work-stream badges ([BE], [FE], ...)
//! - display-width-aware padding (CJK subjects count double)
//! - the scaled hour bar for list rows

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use trackline_lib::classify::{StatusTone, WorkStream};
use trackline_lib::model::Issue;
use trackline_lib::scale::scale_width;

/// Status glyph characters.
pub mod glyphs {
    /// Freshly filed, untouched (hollow circle).
    pub const NEW: &str = "○";
    /// In progress (half-filled).
    pub const DOING: &str = "◐";
    /// Resolved, awaiting verification (filled circle).
    pub const RESOLVED: &str = "●";
    /// Verified done (checkmark).
    pub const SUCCESS: &str = "✓";
    /// Verified failed (X mark).
    pub const FAIL: &str = "✗";
    /// Bounced back for rework (dotted circle).
    pub const FEEDBACK: &str = "◌";
    /// On hold (snowflake).
    pub const HOLD: &str = "❄";
    /// Anything else.
    pub const OTHER: &str = "·";
}

/// Return the glyph for a status tone.
#[must_use]
pub const fn status_glyph(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::New => glyphs::NEW,
        StatusTone::Doing => glyphs::DOING,
        StatusTone::Resolved => glyphs::RESOLVED,
        StatusTone::Success => glyphs::SUCCESS,
        StatusTone::Fail => glyphs::FAIL,
        StatusTone::Feedback => glyphs::FEEDBACK,
        StatusTone::Hold => glyphs::HOLD,
        StatusTone::Other => glyphs::OTHER,
    }
}

/// Format a work stream as a bracketed badge; unclassified issues get an
/// empty badge so columns stay aligned.
#[must_use]
pub fn stream_badge(stream: WorkStream) -> String {
    let tag = stream.as_str();
    if tag.is_empty() {
        "[ ]".to_string()
    } else {
        format!("[{tag}]")
    }
}

/// Truncate and pad `text` to exactly `width` terminal columns.
///
/// Widths are display widths, not char counts, so Hangul and CJK subjects
/// (two columns per glyph) keep the day grid aligned. Truncation marks the
/// cut with `…`.
#[must_use]
pub fn pad_display(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        // Leave room for the ellipsis.
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    format!("{out}{}", " ".repeat(width - used))
}

/// Render the hour bar for a list row: spent hours as `█` overlaid on the
/// estimate's `░` track, outer width scaled against the session maximum.
/// Issues with no hours at all get a blank cell.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hour_bar(estimated: f64, spent: f64, session_max: f64, width: usize) -> String {
    let Some(bar) = scale_width(estimated, spent, session_max) else {
        return " ".repeat(width);
    };

    let outer = ((bar.outer_pct / 100.0 * width as f64).round() as usize).clamp(1, width);
    let spent_cells = (bar.spent_pct / 100.0 * outer as f64).round() as usize;
    let estimated_cells = (bar.estimated_pct / 100.0 * outer as f64).round() as usize;

    let mut out = String::with_capacity(width * 3);
    for i in 0..outer {
        if i < spent_cells {
            out.push('█');
        } else if i < estimated_cells {
            out.push('░');
        } else {
            out.push(' ');
        }
    }
    out.push_str(&" ".repeat(width - outer));
    out
}

/// Format one compact list row.
///
/// Format: `{glyph} #{id} {badge} {subject} {hour bar} {spent}/{est}h {assignee}`
#[must_use]
pub fn format_issue_row(issue: &Issue, session_max: f64) -> String {
    let tone = StatusTone::from_name(&issue.status.name);
    let stream = trackline_lib::classify::classify(issue);
    format!(
        "{} #{:<6} {} {} {} {:>5.1}/{:<5.1}h {}",
        status_glyph(tone),
        issue.id,
        pad_display(&stream_badge(stream), 8),
        pad_display(&issue.subject, 40),
        hour_bar(issue.estimated(), issue.spent(), session_max, 20),
        issue.spent(),
        issue.estimated(),
        issue.assignee_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackline_lib::model::NamedRef;

    #[test]
    fn test_status_glyphs() {
        assert_eq!(status_glyph(StatusTone::New), "○");
        assert_eq!(status_glyph(StatusTone::Doing), "◐");
        assert_eq!(status_glyph(StatusTone::Resolved), "●");
        assert_eq!(status_glyph(StatusTone::Success), "✓");
        assert_eq!(status_glyph(StatusTone::Fail), "✗");
        assert_eq!(status_glyph(StatusTone::Feedback), "◌");
        assert_eq!(status_glyph(StatusTone::Hold), "❄");
        assert_eq!(status_glyph(StatusTone::Other), "·");
    }

    #[test]
    fn test_stream_badges() {
        assert_eq!(stream_badge(WorkStream::Be), "[BE]");
        assert_eq!(stream_badge(WorkStream::Design), "[Design]");
        assert_eq!(stream_badge(WorkStream::Unassigned), "[ ]");
    }

    #[test]
    fn test_pad_display_ascii() {
        assert_eq!(pad_display("abc", 5), "abc  ");
        assert_eq!(pad_display("abcdef", 4), "abc…");
    }

    #[test]
    fn test_pad_display_counts_hangul_double_width() {
        // "회원" is 4 columns wide.
        assert_eq!(pad_display("회원", 6), "회원  ");
        let cut = pad_display("회원가입", 5);
        assert_eq!(UnicodeWidthStr::width(cut.as_str()), 5);
        assert!(cut.contains('…'));
    }

    #[test]
    fn test_hour_bar_blank_without_hours() {
        assert_eq!(hour_bar(0.0, 0.0, 20.0, 10), " ".repeat(10));
    }

    #[test]
    fn test_hour_bar_overlay() {
        // Estimate fills the outer bar, spent covers half of it.
        let bar = hour_bar(14.0, 7.0, 14.0, 20);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(bar.chars().filter(|&c| c == '░').count(), 10);
    }

    #[test]
    fn test_hour_bar_floor_width() {
        // sessionMax=20, est=0.5: outer is 30% of the row.
        let bar = hour_bar(0.5, 0.0, 20.0, 20);
        let drawn = bar.chars().filter(|&c| c != ' ').count();
        assert_eq!(drawn, 6);
    }

    #[test]
    fn test_format_issue_row_shape() {
        let issue = Issue {
            id: 4312,
            subject: "로그인 개선".to_string(),
            status: NamedRef::new(2, "진행"),
            assigned_to: Some(NamedRef::new(7, "이자련(ryeon)")),
            estimated_hours: Some(8.0),
            spent_hours: Some(3.0),
            ..Default::default()
        };
        let row = format_issue_row(&issue, 20.0);
        assert!(row.starts_with("◐ #4312"));
        assert!(row.contains("[BE]"));
        assert!(row.contains("로그인 개선"));
        assert!(row.ends_with("이자련(ryeon)"));
    }
}
