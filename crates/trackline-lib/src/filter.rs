//! Board filtering.
//!
//! Recomputes the visible subset of groups from three independent predicates:
//! work-stream toggles, a ticket text query and an assignee text query. Pure
//! function over the grouped data; the base groups are never mutated, so
//! re-running with relaxed inputs restores the full board. Group counts are
//! bounded by one fetch page, so full recomputation on every input change is
//! cheaper than tracking deltas.

use crate::classify::{WorkStream, classify};
use crate::model::{Group, Issue};

/// Which of the five toggleable work streams are visible. PM and unclassified
/// parts always pass (PM never reaches the parts list anyway; unclassified
/// parts have no checkbox to hide them with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StreamToggles {
    pub be: bool,
    pub fe: bool,
    pub plan: bool,
    pub design: bool,
    pub qa: bool,
}

impl Default for StreamToggles {
    fn default() -> Self {
        Self {
            be: true,
            fe: true,
            plan: true,
            design: true,
            qa: true,
        }
    }
}

impl StreamToggles {
    /// Visibility of a single stream. Labels outside the toggle set are
    /// always visible.
    #[must_use]
    pub const fn allows(self, stream: WorkStream) -> bool {
        match stream {
            WorkStream::Be => self.be,
            WorkStream::Fe => self.fe,
            WorkStream::Plan => self.plan,
            WorkStream::Design => self.design,
            WorkStream::Qa => self.qa,
            WorkStream::Pm | WorkStream::Unassigned => true,
        }
    }

    /// Toggle set with only the given streams enabled.
    #[must_use]
    pub fn only(streams: &[WorkStream]) -> Self {
        let mut toggles = Self {
            be: false,
            fe: false,
            plan: false,
            design: false,
            qa: false,
        };
        for stream in streams {
            match stream {
                WorkStream::Be => toggles.be = true,
                WorkStream::Fe => toggles.fe = true,
                WorkStream::Plan => toggles.plan = true,
                WorkStream::Design => toggles.design = true,
                WorkStream::Qa => toggles.qa = true,
                WorkStream::Pm | WorkStream::Unassigned => {}
            }
        }
        toggles
    }
}

fn matches_ticket(issue: &Issue, query: &str) -> bool {
    query.is_empty()
        || issue.id.to_string().contains(query)
        || issue.subject.to_lowercase().contains(query)
}

fn matches_assignee(issue: &Issue, query: &str) -> bool {
    query.is_empty() || issue.assignee_name().to_lowercase().contains(query)
}

/// Apply the three filter predicates to a grouped board.
///
/// A feature that satisfies both text queries makes every one of its parts
/// relevant to the ticket search (a pure per-row substring filter would hide
/// meaningful sub-tasks whose subjects don't mention the term). Each part
/// must still pass its own stream toggle and the assignee query. A group
/// survives when its feature matched or any part did.
#[must_use]
pub fn apply_filters(
    groups: &[Group],
    toggles: StreamToggles,
    ticket_query: &str,
    assignee_query: &str,
) -> Vec<Group> {
    let ticket_query = ticket_query.trim().to_lowercase();
    let assignee_query = assignee_query.trim().to_lowercase();

    groups
        .iter()
        .filter_map(|group| {
            let feature_matches = matches_ticket(&group.feature, &ticket_query)
                && matches_assignee(&group.feature, &assignee_query);

            let parts: Vec<Issue> = group
                .parts
                .iter()
                .filter(|part| {
                    if !toggles.allows(classify(part)) {
                        return false;
                    }
                    let ticket_ok = feature_matches || matches_ticket(part, &ticket_query);
                    ticket_ok && matches_assignee(part, &assignee_query)
                })
                .cloned()
                .collect();

            if feature_matches || !parts.is_empty() {
                Some(Group {
                    feature: group.feature.clone(),
                    parts,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NamedRef, ParentRef};
    use proptest::prelude::*;

    fn issue(id: u64, subject: &str, assignee: Option<&str>, category: Option<&str>) -> Issue {
        Issue {
            id,
            subject: subject.to_string(),
            assigned_to: assignee.map(|n| NamedRef::new(1, n)),
            category: category.map(|n| NamedRef::new(2, n)),
            ..Default::default()
        }
    }

    fn part_of(parent_id: u64, mut issue: Issue) -> Issue {
        issue.parent = Some(ParentRef {
            id: parent_id,
            subject: None,
        });
        issue
    }

    fn login_board() -> Vec<Group> {
        vec![Group {
            feature: issue(100, "Login rework", None, None),
            parts: vec![
                part_of(100, issue(101, "API endpoint", Some("배준(JUN)"), None)),
                part_of(100, issue(102, "Screen layout", Some("FE_DVHuy"), None)),
                part_of(100, issue(103, "시나리오 검증", None, Some("검증"))),
            ],
        }]
    }

    #[test]
    fn test_identity_law() {
        // All toggles on + empty queries returns the board unchanged.
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "", "");
        assert_eq!(filtered, groups);
    }

    #[test]
    fn test_idempotent() {
        let groups = login_board();
        let toggles = StreamToggles::only(&[WorkStream::Fe]);
        let once = apply_filters(&groups, toggles, "login", "");
        let twice = apply_filters(&once, toggles, "login", "");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_feature_match_pulls_in_all_parts() {
        // "login" only appears in the feature subject; every part inherits
        // the match as long as its stream toggle is active.
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "login", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].parts.len(), 3);
    }

    #[test]
    fn test_feature_match_still_respects_toggles() {
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::only(&[WorkStream::Be]), "login", "");
        assert_eq!(filtered.len(), 1);
        // FE roster part and QA-categorized part are hidden by their
        // toggles; only the BE part remains.
        assert_eq!(
            filtered[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![101]
        );
    }

    #[test]
    fn test_part_level_ticket_match_keeps_group() {
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "endpoint", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![101]
        );
    }

    #[test]
    fn test_id_text_match() {
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "102", "");
        assert_eq!(filtered[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![102]);
    }

    #[test]
    fn test_feature_match_requires_both_query_legs() {
        // The feature has no assignee, so "login" + "jun" never matches the
        // feature itself. Parts cannot inherit the ticket match and none of
        // them contains "login" on its own, so the whole group drops.
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "login", "jun");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_assignee_query_is_independent() {
        // With the feature matching both legs, parts inherit the ticket
        // match but must still pass the assignee leg on their own.
        let mut groups = login_board();
        groups[0].feature.assigned_to = Some(NamedRef::new(9, "배준(JUN)"));
        let filtered = apply_filters(&groups, StreamToggles::default(), "login", "jun");
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![101]
        );
    }

    #[test]
    fn test_no_match_drops_group() {
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "payments", "");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_query_normalization() {
        let groups = login_board();
        let filtered = apply_filters(&groups, StreamToggles::default(), "  LOGIN  ", "");
        assert_eq!(filtered.len(), 1);
        // Whitespace-only queries match everything.
        let all = apply_filters(&groups, StreamToggles::default(), "   ", "   ");
        assert_eq!(all, groups);
    }

    #[test]
    fn test_unclassified_part_ignores_toggles() {
        let groups = vec![Group {
            feature: issue(1, "Feature", None, None),
            parts: vec![part_of(1, issue(2, "misc work", None, None))],
        }];
        let none_on = StreamToggles::only(&[]);
        let filtered = apply_filters(&groups, none_on, "", "");
        assert_eq!(filtered[0].parts.len(), 1);
    }

    proptest! {
        /// Filtering is idempotent for arbitrary query strings.
        #[test]
        fn prop_filter_idempotent(ticket in ".{0,12}", assignee in ".{0,12}") {
            let groups = login_board();
            let once = apply_filters(&groups, StreamToggles::default(), &ticket, &assignee);
            let twice = apply_filters(&once, StreamToggles::default(), &ticket, &assignee);
            prop_assert_eq!(once, twice);
        }
    }
}
