//! `trackline-lib` — pure ticket-board engines.
//!
//! Everything needed to turn a flat tracker issue list into a grouped,
//! filtered, laid-out Gantt board, with no I/O anywhere: fetching and
//! rendering live in the `trackline` binary crate. All derived structures are
//! recomputed from the latest snapshot; nothing here holds mutable state.
//!
//! # Quick start
//!
//! ```
//! use trackline_lib::{StreamToggles, TimelineWindow, apply_filters, group_issues};
//! use trackline_lib::model::Issue;
//!
//! let issues: Vec<Issue> = Vec::new(); // from the tracker API
//! let groups = group_issues(&issues);
//! let visible = apply_filters(&groups, StreamToggles::default(), "login", "");
//! let window = TimelineWindow::around(chrono::Utc::now().date_naive());
//! ```

pub mod classify;
pub mod filter;
pub mod group;
pub mod model;
pub mod scale;
pub mod timeline;

pub use classify::{StatusTone, WorkStream, classify};
pub use filter::{StreamToggles, apply_filters};
pub use group::{group_issues, missing_parent_ids};
pub use model::{Group, Issue, NamedRef, ParentRef, Project};
pub use scale::{BarScale, scale_width, session_max_hours};
pub use timeline::{
    DaySegment, TimelineWindow, completed_under_budget, layout_day, progress_percent,
};
