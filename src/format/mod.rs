//! Output formatting for `trackline`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON mode sends clean JSON to stdout with diagnostics to stderr; the text
//! views live here:
//! - board view: one character per window day per issue, grouped by feature
//! - list view: compact rows with a scaled hour bar
//!
//! All column math is display-width aware so CJK subjects and assignee names
//! line up.

mod board;
mod text;

pub use board::render_board;
pub use text::{format_issue_row, hour_bar, pad_display, status_glyph, stream_badge};
