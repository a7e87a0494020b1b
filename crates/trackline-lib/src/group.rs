//! Feature/parts grouping.
//!
//! Partitions a flat issue collection into groups: one parentless "feature"
//! issue anchoring an ordered list of child "parts". Parent issues referenced
//! by a child but absent from the working set must be fetched by the caller
//! (see [`missing_parent_ids`]) and appended before grouping; a parent that is
//! still absent silently drops its children. That is accepted behavior for
//! cross-project parent references the caller chose not to supplement.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::classify::{WorkStream, classify};
use crate::model::{Group, Issue};

/// Group a flat issue collection into feature/parts groups.
///
/// Rules:
/// - every parentless issue seeds a group keyed by its id;
/// - every child attaches to its parent's group, lazily creating the group
///   when the parent issue is present in the working set;
/// - children classified as PM resolve parent linkage but are dropped from
///   the parts list;
/// - a group whose feature itself has a parent is kept only if it gathered at
///   least one part (it only existed transiently for parent resolution);
/// - output is sorted by feature creation date descending, ties broken by due
///   date descending with missing due dates last.
#[must_use]
pub fn group_issues(issues: &[Issue]) -> Vec<Group> {
    let by_id: HashMap<u64, &Issue> = issues.iter().map(|i| (i.id, i)).collect();

    // BTreeMap keyed by feature id keeps the pre-sort order deterministic.
    let mut groups: BTreeMap<u64, Group> = BTreeMap::new();

    for issue in issues {
        match &issue.parent {
            None => {
                groups
                    .entry(issue.id)
                    .or_insert_with(|| Group::new(issue.clone()));
            }
            Some(parent) => {
                if !groups.contains_key(&parent.id) {
                    if let Some(feature) = by_id.get(&parent.id) {
                        groups.insert(parent.id, Group::new((*feature).clone()));
                    } else {
                        debug!(
                            issue = issue.id,
                            parent = parent.id,
                            "parent not in working set; child dropped"
                        );
                    }
                }
                if let Some(group) = groups.get_mut(&parent.id) {
                    if classify(issue) != WorkStream::Pm {
                        group.parts.push(issue.clone());
                    }
                }
            }
        }
    }

    let mut out: Vec<Group> = groups
        .into_values()
        .filter(|g| !g.parts.is_empty() || g.feature.parent.is_none())
        .collect();

    out.sort_by(|a, b| {
        b.feature
            .created_on
            .cmp(&a.feature.created_on)
            .then_with(|| b.feature.due_date.cmp(&a.feature.due_date))
    });
    out
}

/// Parent ids referenced by some issue but not present in the working set.
///
/// The caller fetches each of these individually and appends the results
/// before calling [`group_issues`]. One level only: a supplemented parent's
/// own parent is not chased.
#[must_use]
pub fn missing_parent_ids(issues: &[Issue]) -> BTreeSet<u64> {
    let present: BTreeSet<u64> = issues.iter().map(|i| i.id).collect();
    issues
        .iter()
        .filter_map(|i| i.parent.as_ref().map(|p| p.id))
        .filter(|id| !present.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NamedRef, ParentRef};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn feature(id: u64, created_day: u32) -> Issue {
        Issue {
            id,
            subject: format!("feature-{id}"),
            created_on: Utc.with_ymd_and_hms(2025, 3, created_day, 0, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    fn child(id: u64, parent_id: u64) -> Issue {
        Issue {
            id,
            subject: format!("part-{id}"),
            parent: Some(ParentRef {
                id: parent_id,
                subject: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_children_attach_to_parent_group() {
        let issues = vec![feature(1, 1), child(2, 1), child(3, 1)];
        let groups = group_issues(&issues);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].feature.id, 1);
        assert_eq!(
            groups[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_child_before_parent_in_input() {
        // Group creation is lazy; input order must not matter.
        let issues = vec![child(2, 1), feature(1, 1)];
        let groups = group_issues(&issues);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].parts.len(), 1);
    }

    #[test]
    fn test_each_child_lands_in_exactly_one_group() {
        let issues = vec![feature(1, 1), feature(4, 2), child(2, 1), child(5, 4)];
        let groups = group_issues(&issues);
        let mut seen = Vec::new();
        for g in &groups {
            for p in &g.parts {
                seen.push(p.id);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![2, 5]);
    }

    #[test]
    fn test_pm_child_excluded_from_parts() {
        let mut pm = child(2, 1);
        pm.tracker = NamedRef::new(9, "PM");
        let issues = vec![feature(1, 1), pm, child(3, 1)];
        let groups = group_issues(&issues);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![3]
        );
    }

    #[test]
    fn test_pm_only_children_keep_top_level_feature() {
        // The PM child is dropped from parts, but the feature is a true
        // top-level issue and survives as a standalone group.
        let mut pm = child(2, 1);
        pm.tracker = NamedRef::new(9, "PM");
        let groups = group_issues(&[feature(1, 1), pm]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].parts.is_empty());
    }

    #[test]
    fn test_standalone_feature_retained() {
        let groups = group_issues(&[feature(1, 1)]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].parts.is_empty());
    }

    #[test]
    fn test_orphan_child_silently_dropped() {
        let groups = group_issues(&[feature(1, 1), child(2, 99)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].feature.id, 1);
        assert!(groups[0].parts.is_empty());
    }

    #[test]
    fn test_mid_level_parent_with_parts_is_kept() {
        // A supplemented parent may itself have a parent. Its group is kept
        // because it gathered parts, even though it is not top-level.
        let mut mid = feature(5, 2);
        mid.parent = Some(ParentRef {
            id: 1000,
            subject: None,
        });
        let groups = group_issues(&[mid, child(6, 5)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].feature.id, 5);
        assert_eq!(groups[0].parts.len(), 1);
    }

    #[test]
    fn test_mid_level_parent_without_parts_is_dropped() {
        let mut mid = feature(5, 2);
        mid.parent = Some(ParentRef {
            id: 1000,
            subject: None,
        });
        let mut pm = child(6, 5);
        pm.tracker = NamedRef::new(9, "PM");
        // The only child is PM-classified, so the transient group ends empty
        // and the non-top-level feature drops out entirely.
        let groups = group_issues(&[mid, pm]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_sort_recent_created_first() {
        let issues = vec![feature(1, 1), feature(2, 5), feature(3, 3)];
        let groups = group_issues(&issues);
        assert_eq!(
            groups.iter().map(|g| g.feature.id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_sort_tie_breaks_on_due_date_desc() {
        let mut a = feature(1, 1);
        a.due_date = NaiveDate::from_ymd_opt(2025, 4, 1);
        let mut b = feature(2, 1);
        b.due_date = NaiveDate::from_ymd_opt(2025, 4, 10);
        let mut c = feature(3, 1);
        c.due_date = None; // missing due date sorts as earliest -> last
        let groups = group_issues(&[a, b, c]);
        assert_eq!(
            groups.iter().map(|g| g.feature.id).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn test_missing_parent_ids() {
        let issues = vec![feature(1, 1), child(2, 1), child(3, 50), child(4, 60)];
        let missing = missing_parent_ids(&issues);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec![50, 60]);
    }

    #[test]
    fn test_missing_parent_ids_empty_when_resolved() {
        let issues = vec![feature(1, 1), child(2, 1)];
        assert!(missing_parent_ids(&issues).is_empty());
    }
}
