//! `trackline` (tln) - Gantt timeline dashboard
//!
//! Read-only dashboard over a Redmine-compatible tracker, plus a stdio
//! protocol bridge. Never writes to the tracker; no daemons, no state on
//! disk.

use trackline::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
