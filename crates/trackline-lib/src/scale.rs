//! Hour-bar scaling for the compact list rows.
//!
//! Each row shows one outer bar whose width reflects the issue's hour weight
//! relative to the whole visible board, with estimated and spent sub-bars
//! overlaid inside it. Small tasks get a readable floor width, long tasks are
//! truncated at a hard cap rather than proportionally scaled, so a single
//! monster task cannot flatten every other row.

use crate::model::{Group, Issue};

/// Smallest task granularity given the floor width.
const MIN_HOURS: f64 = 0.5;
/// Tasks at or above this many hours render at full width.
const CAP_HOURS: f64 = 14.0;

/// Largest estimated-or-spent hour value across every visible issue, used as
/// the scaling reference. Floor of 5 so a board of tiny tasks keeps sane
/// proportions. Computed once per filtered render pass.
#[must_use]
pub fn session_max_hours(groups: &[Group]) -> f64 {
    let mut max_hours = 5.0_f64;
    let mut fold = |issue: &Issue| {
        max_hours = max_hours.max(issue.estimated()).max(issue.spent());
    };
    for group in groups {
        fold(&group.feature);
        for part in &group.parts {
            fold(part);
        }
    }
    max_hours
}

/// Relative widths for one row's hour bar, all percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    /// Outer bar width relative to the row.
    pub outer_pct: f64,
    /// Estimated-hours sub-bar width relative to the outer bar.
    pub estimated_pct: f64,
    /// Spent-hours sub-bar width relative to the outer bar, drawn on top of
    /// the estimate for the over/under-budget signal.
    pub spent_pct: f64,
}

/// Compute the bar widths for an issue, or `None` when there are no hours to
/// show (no bar is rendered at all).
#[must_use]
pub fn scale_width(estimated: f64, spent: f64, session_max: f64) -> Option<BarScale> {
    let item_max = estimated.max(spent);
    if item_max <= 0.0 {
        return None;
    }

    let scale_reference = session_max.max(item_max).max(1.0);

    // Visual weight of a 0.5h task: a 6h slice of the session scale, clamped
    // so tiny tasks never dominate the row.
    let floor_width = (6.0 / scale_reference * 100.0).min(30.0);

    let outer_pct = if item_max <= MIN_HOURS {
        floor_width
    } else if item_max >= CAP_HOURS {
        100.0
    } else {
        let ratio = (item_max - MIN_HOURS) / (CAP_HOURS - MIN_HOURS);
        floor_width + ratio * (100.0 - floor_width)
    };

    Some(BarScale {
        outer_pct,
        estimated_pct: estimated / item_max * 100.0,
        spent_pct: spent / item_max * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bar_without_hours() {
        assert!(scale_width(0.0, 0.0, 20.0).is_none());
        assert!(scale_width(-1.0, 0.0, 20.0).is_none());
    }

    #[test]
    fn test_floor_width_example() {
        // sessionMax=20h, estimated=0.5h: floor = min(6/20*100, 30) = 30.
        let bar = scale_width(0.5, 0.0, 20.0).unwrap();
        assert!((bar.outer_pct - 30.0).abs() < 1e-9);
        assert!((bar.estimated_pct - 100.0).abs() < 1e-9);
        assert_eq!(bar.spent_pct, 0.0);
    }

    #[test]
    fn test_floor_clamp_kicks_in_for_small_sessions() {
        // 6/10*100 = 60, clamped to 30.
        let bar = scale_width(0.25, 0.0, 10.0).unwrap();
        assert!((bar.outer_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_cap_at_fourteen_hours() {
        let bar = scale_width(14.0, 0.0, 40.0).unwrap();
        assert_eq!(bar.outer_pct, 100.0);
        let over = scale_width(80.0, 0.0, 80.0).unwrap();
        assert_eq!(over.outer_pct, 100.0);
    }

    #[test]
    fn test_linear_interpolation_midpoint() {
        // Midpoint of [0.5, 14] is 7.25h; width is halfway between the floor
        // and 100.
        let session_max = 20.0;
        let floor = 6.0 / session_max * 100.0; // 30, no clamp needed
        let bar = scale_width(7.25, 0.0, session_max).unwrap();
        assert!((bar.outer_pct - (floor + (100.0 - floor) / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spent_drives_item_max() {
        // Over-budget: spent exceeds the estimate, so spent fills the outer
        // bar and the estimate shrinks proportionally.
        let bar = scale_width(4.0, 8.0, 20.0).unwrap();
        assert!((bar.spent_pct - 100.0).abs() < 1e-9);
        assert!((bar.estimated_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_max_floor_and_fold() {
        let mut feature = Issue {
            estimated_hours: Some(2.0),
            ..Default::default()
        };
        let part = Issue {
            spent_hours: Some(12.5),
            ..Default::default()
        };
        let groups = vec![Group {
            feature: feature.clone(),
            parts: vec![part],
        }];
        assert!((session_max_hours(&groups) - 12.5).abs() < 1e-9);

        feature.estimated_hours = Some(1.0);
        let small = vec![Group {
            feature,
            parts: Vec::new(),
        }];
        // Floor of 5 when everything is tiny.
        assert!((session_max_hours(&small) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_reference_guards_small_session() {
        // item_max above session_max: the item itself becomes the reference.
        let bar = scale_width(0.4, 0.0, 0.0).unwrap();
        // reference = max(0, 0.4, 1) = 1; floor = min(600, 30) = 30.
        assert!((bar.outer_pct - 30.0).abs() < 1e-9);
    }
}
