//! The load cycle: fetch, supplement parents, group.
//!
//! Per-project issue fetches are issued concurrently and joined
//! all-or-nothing; so is the supplementary fetch for parent issues the base
//! pages referenced but did not contain. Any single failure aborts the whole
//! cycle — no partial boards. The binary runs exactly one cycle per
//! invocation, so there is never a stale in-flight response to guard against.

use chrono::{Months, Utc};
use tracing::{debug, info};

use crate::api::{IssueQuery, TrackerClient};
use crate::error::Result;
use trackline_lib::model::{Group, Issue};
use trackline_lib::{group_issues, missing_parent_ids};

/// Fan a fallible job out over the inputs with scoped threads and join
/// all-or-nothing.
fn fan_out<T, I, F>(inputs: &[I], job: F) -> Result<Vec<T>>
where
    T: Send,
    I: Sync,
    F: Fn(&I) -> Result<T> + Sync,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(|| job(input)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

/// Fetch the working set for the selected projects: one page of recently
/// updated issues per project, plus any referenced parents missing from
/// those pages.
///
/// # Errors
///
/// Returns the first fetch error; nothing is returned from a partially
/// failed cycle.
pub fn load_issues<F, G>(project_ids: &[u64], fetch_page: F, fetch_issue: G) -> Result<Vec<Issue>>
where
    F: Fn(u64) -> Result<Vec<Issue>> + Sync,
    G: Fn(u64) -> Result<Issue> + Sync,
{
    let pages = fan_out(project_ids, |&id| fetch_page(id))?;
    let mut issues: Vec<Issue> = pages.into_iter().flatten().collect();

    let missing: Vec<u64> = missing_parent_ids(&issues).into_iter().collect();
    if !missing.is_empty() {
        debug!(count = missing.len(), "resolving parents outside the fetch");
        let parents = fan_out(&missing, |&id| fetch_issue(id))?;
        issues.extend(parents);
    }

    Ok(issues)
}

/// Run one full load cycle against the tracker and return the grouped board.
///
/// Issues are restricted to those updated in the trailing two months, the
/// same window the fetch API applies for the dashboard.
///
/// # Errors
///
/// Returns the first fetch error of the cycle.
pub fn load_groups(client: &TrackerClient, project_ids: &[u64]) -> Result<Vec<Group>> {
    let updated_since = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(2));

    let issues = load_issues(
        project_ids,
        |project_id| {
            client.issues(&IssueQuery {
                project_id: Some(project_id),
                updated_since,
                ..IssueQuery::default()
            })
        },
        |id| client.issue(id),
    )?;

    info!(issues = issues.len(), projects = project_ids.len(), "loaded");
    Ok(group_issues(&issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TracklineError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trackline_lib::model::ParentRef;

    fn issue(id: u64, parent: Option<u64>) -> Issue {
        Issue {
            id,
            subject: format!("issue-{id}"),
            parent: parent.map(|id| ParentRef { id, subject: None }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pages_joined_and_flattened() {
        let issues = load_issues(
            &[1, 2],
            |project_id| Ok(vec![issue(project_id * 10, None)]),
            |_| panic!("no parents to resolve"),
        )
        .unwrap();
        let mut ids: Vec<u64> = issues.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_missing_parents_supplemented() {
        let lookups = AtomicUsize::new(0);
        let issues = load_issues(
            &[1],
            |_| Ok(vec![issue(10, None), issue(11, Some(99))]),
            |id| {
                lookups.fetch_add(1, Ordering::SeqCst);
                Ok(issue(id, None))
            },
        )
        .unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert!(issues.iter().any(|i| i.id == 99));
    }

    #[test]
    fn test_present_parents_not_refetched() {
        load_issues(
            &[1],
            |_| Ok(vec![issue(10, None), issue(11, Some(10))]),
            |_| panic!("parent already in working set"),
        )
        .unwrap();
    }

    #[test]
    fn test_single_page_failure_aborts_cycle() {
        let result = load_issues(
            &[1, 2],
            |project_id| {
                if project_id == 2 {
                    Err(TracklineError::Api {
                        status: 503,
                        body: "down".to_string(),
                    })
                } else {
                    Ok(vec![issue(10, None)])
                }
            },
            |id| Ok(issue(id, None)),
        );
        assert!(matches!(result, Err(TracklineError::Api { status: 503, .. })));
    }

    #[test]
    fn test_parent_lookup_failure_aborts_cycle() {
        let result = load_issues(
            &[1],
            |_| Ok(vec![issue(11, Some(99))]),
            |_| {
                Err(TracklineError::Api {
                    status: 404,
                    body: "gone".to_string(),
                })
            },
        );
        assert!(result.is_err());
    }
}
