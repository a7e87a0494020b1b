//! Wire-level data types for the tracker API.
//!
//! Field names and shapes follow the upstream Redmine JSON exactly, so the
//! structs double as the deserialization targets for `/issues.json` and
//! `/projects.json` payloads. Issues are read-only snapshots: they are never
//! mutated locally and are superseded wholesale on every re-fetch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An id/name pair used for status, tracker, priority, author, assignee and
/// category references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

impl NamedRef {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Reference to a parent issue. The subject is only present on detail
/// responses, so only the id is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// A unit of work as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,

    pub subject: String,

    /// Body text. Omitted by some list endpoints.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub status: NamedRef,

    pub tracker: NamedRef,

    #[serde(default)]
    pub priority: NamedRef,

    #[serde(default)]
    pub author: NamedRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,

    /// Calendar date work begins; no time component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Calendar date work is due; no time component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Tracker-reported completion percentage, 0-100.
    #[serde(default)]
    pub done_ratio: u32,

    pub created_on: DateTime<Utc>,

    pub updated_on: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    /// Only present when the fetch asked for `include=spent_hours`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent_hours: Option<f64>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            id: 0,
            subject: String::new(),
            description: String::new(),
            status: NamedRef::default(),
            tracker: NamedRef::default(),
            priority: NamedRef::default(),
            author: NamedRef::default(),
            assigned_to: None,
            category: None,
            parent: None,
            start_date: None,
            due_date: None,
            done_ratio: 0,
            created_on: Utc::now(),
            updated_on: Utc::now(),
            estimated_hours: None,
            spent_hours: None,
        }
    }
}

impl Issue {
    /// Assignee display name, or the empty string when unassigned.
    #[must_use]
    pub fn assignee_name(&self) -> &str {
        self.assigned_to.as_ref().map_or("", |a| a.name.as_str())
    }

    /// Category display name, or the empty string when uncategorized.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("", |c| c.name.as_str())
    }

    /// Estimated hours, treating absent as zero.
    #[must_use]
    pub fn estimated(&self) -> f64 {
        self.estimated_hours.unwrap_or(0.0)
    }

    /// Spent hours, treating absent as zero.
    #[must_use]
    pub fn spent(&self) -> f64 {
        self.spent_hours.unwrap_or(0.0)
    }
}

/// A project container. Selection is a set of project ids held by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NamedRef>,
}

/// One feature issue (no parent) plus its ordered sub-task parts.
///
/// Derived data: groups are rebuilt from scratch on every raw-data change and
/// never persisted. Parts classified as PM are excluded at grouping time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub feature: Issue,
    pub parts: Vec<Issue>,
}

impl Group {
    #[must_use]
    pub fn new(feature: Issue) -> Self {
        Self {
            feature,
            parts: Vec::new(),
        }
    }
}
