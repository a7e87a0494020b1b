//! HTTP client for the tracker's REST API.
//!
//! Thin read-only wrapper over `reqwest::blocking` with the static
//! `X-Redmine-API-Key` header on every request. Raw-`Value` accessors back
//! the bridge server (which relays upstream payloads verbatim); typed
//! accessors back the dashboard. No retries: errors propagate to the load
//! boundary.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TracklineError};
use trackline_lib::model::{Issue, Project};

/// Header carrying the static API key.
const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Query options for issue fetches.
#[derive(Debug, Clone)]
pub struct IssueQuery {
    pub project_id: Option<u64>,
    pub status_id: Option<u64>,
    pub assigned_to_id: Option<u64>,
    /// Page size; the upstream caps this at 100.
    pub limit: u32,
    /// Restrict to issues updated on or after this date
    /// (`updated_on=>=YYYY-MM-DD`).
    pub updated_since: Option<NaiveDate>,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            project_id: None,
            status_id: None,
            assigned_to_id: None,
            limit: 100,
            updated_since: None,
        }
    }
}

impl IssueQuery {
    /// Query-string pairs for `/issues.json`. Spent hours are always
    /// included; the upstream omits the field without `include=spent_hours`.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("include".to_string(), "spent_hours".to_string()),
        ];
        if let Some(id) = self.project_id {
            params.push(("project_id".to_string(), id.to_string()));
        }
        if let Some(id) = self.status_id {
            params.push(("status_id".to_string(), id.to_string()));
        }
        if let Some(id) = self.assigned_to_id {
            params.push(("assigned_to_id".to_string(), id.to_string()));
        }
        if let Some(date) = self.updated_since {
            params.push((
                "updated_on".to_string(),
                format!(">={}", date.format("%Y-%m-%d")),
            ));
        }
        params
    }
}

/// Read-only view of the tracker, seamed as a trait so the bridge can be
/// exercised against a stub in tests.
pub trait Tracker: Sync {
    /// `GET /issues.json` — the raw `issues` array.
    fn issues_raw(&self, query: &IssueQuery) -> Result<Value>;

    /// `GET /projects.json?limit=100` — the raw `projects` array.
    fn projects_raw(&self) -> Result<Value>;

    /// `GET /projects/{id}/issues.json` — the raw `issues` array.
    fn project_issues_raw(&self, project_id: u64) -> Result<Value>;
}

/// Blocking HTTP client for one tracker instance.
pub struct TrackerClient {
    http: reqwest::blocking::Client,
    config: Config,
}

impl TrackerClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        let url = format!("{}/{path}", self.config.base_url);
        debug!(%url, "tracker request");
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(params)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(TracklineError::Api {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }
        Ok(resp.json()?)
    }

    fn section<T: DeserializeOwned>(&self, path: &str, value: Value, key: &str) -> Result<T> {
        let section = value
            .get(key)
            .cloned()
            .ok_or_else(|| TracklineError::payload(path, format!("missing `{key}` field")))?;
        serde_json::from_value(section)
            .map_err(|e| TracklineError::payload(path, e.to_string()))
    }

    /// Fetch the project list (one page, upstream cap of 100).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or an
    /// unexpected payload shape.
    pub fn projects(&self) -> Result<Vec<Project>> {
        let value = self.get_json("projects.json", &[("limit".to_string(), "100".to_string())])?;
        self.section("projects.json", value, "projects")
    }

    /// Fetch issues matching a query.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or an
    /// unexpected payload shape.
    pub fn issues(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        let value = self.get_json("issues.json", &query.params())?;
        self.section("issues.json", value, "issues")
    }

    /// Fetch a single issue by id, used to resolve parents missing from the
    /// primary fetch.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or an
    /// unexpected payload shape.
    pub fn issue(&self, id: u64) -> Result<Issue> {
        let path = format!("issues/{id}.json");
        let value = self.get_json(&path, &[])?;
        self.section(&path, value, "issue")
    }
}

impl Tracker for TrackerClient {
    fn issues_raw(&self, query: &IssueQuery) -> Result<Value> {
        let value = self.get_json("issues.json", &query.params())?;
        value
            .get("issues")
            .cloned()
            .ok_or_else(|| TracklineError::payload("issues.json", "missing `issues` field"))
    }

    fn projects_raw(&self) -> Result<Value> {
        let value = self.get_json("projects.json", &[("limit".to_string(), "100".to_string())])?;
        value
            .get("projects")
            .cloned()
            .ok_or_else(|| TracklineError::payload("projects.json", "missing `projects` field"))
    }

    fn project_issues_raw(&self, project_id: u64) -> Result<Value> {
        let path = format!("projects/{project_id}/issues.json");
        let value = self.get_json(
            &path,
            &[("include".to_string(), "spent_hours".to_string())],
        )?;
        value
            .get("issues")
            .cloned()
            .ok_or_else(|| TracklineError::payload(path, "missing `issues` field"))
    }
}

/// Bounded error-body excerpt for log/error messages.
fn snippet(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &body[..cut])
    }
}
