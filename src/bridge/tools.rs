//! Tool and resource dispatch for the bridge.
//!
//! Arguments are validated structurally before anything touches the network;
//! a bad `limit` or a missing `project_id` never costs an upstream call.

use serde_json::{json, Value};

use crate::api::{IssueQuery, Tracker};
use crate::error::{Result, TracklineError};

const DEFAULT_LIMIT: u32 = 25;
const MAX_LIMIT: u32 = 100;

pub(super) fn is_known_tool(name: &str) -> bool {
    matches!(name, "get_issues" | "get_projects" | "get_project_issues")
}

pub(super) fn tool_definitions() -> Value {
    json!([
        {
            "name": "get_issues",
            "description": "List issues from the tracker, optionally filtered by project, status or assignee",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "project_id": { "type": "number", "description": "Filter by project id" },
                    "status_id": { "type": "number", "description": "Filter by status id" },
                    "assigned_to_id": { "type": "number", "description": "Filter by assignee user id" },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of issues to return (1-100, default 25)"
                    }
                }
            }
        },
        {
            "name": "get_projects",
            "description": "List all projects visible to the configured API key",
            "inputSchema": { "type": "object", "properties": {} }
        },
        {
            "name": "get_project_issues",
            "description": "List issues belonging to one project",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "project_id": { "type": "number", "description": "Project id" }
                },
                "required": ["project_id"]
            }
        }
    ])
}

pub(super) fn resource_definitions() -> Value {
    json!([
        {
            "uri": "redmine://projects",
            "name": "Projects",
            "description": "All projects visible to the configured API key",
            "mimeType": "application/json"
        },
        {
            "uri": "redmine://issues",
            "name": "Issues",
            "description": "Recent issues across all projects",
            "mimeType": "application/json"
        }
    ])
}

fn opt_u64(args: &Value, key: &str) -> Result<Option<u64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            TracklineError::invalid_params(format!("`{key}` must be a positive integer"))
        }),
    }
}

fn required_u64(args: &Value, key: &str) -> Result<u64> {
    opt_u64(args, key)?
        .ok_or_else(|| TracklineError::invalid_params(format!("`{key}` is required")))
}

fn parse_limit(args: &Value) -> Result<u32> {
    let Some(limit) = opt_u64(args, "limit")? else {
        return Ok(DEFAULT_LIMIT);
    };
    let limit = u32::try_from(limit)
        .map_err(|_| TracklineError::invalid_params("`limit` must be between 1 and 100"))?;
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(TracklineError::invalid_params(
            "`limit` must be between 1 and 100",
        ));
    }
    Ok(limit)
}

/// Validate and run one tool call, returning the upstream payload.
pub(super) fn call_tool(tracker: &dyn Tracker, name: &str, args: &Value) -> Result<Value> {
    if !args.is_object() {
        return Err(TracklineError::invalid_params(
            "tool arguments must be an object",
        ));
    }

    match name {
        "get_issues" => {
            let query = IssueQuery {
                project_id: opt_u64(args, "project_id")?,
                status_id: opt_u64(args, "status_id")?,
                assigned_to_id: opt_u64(args, "assigned_to_id")?,
                limit: parse_limit(args)?,
                updated_since: None,
            };
            tracker.issues_raw(&query)
        }
        "get_projects" => tracker.projects_raw(),
        "get_project_issues" => {
            let project_id = required_u64(args, "project_id")?;
            tracker.project_issues_raw(project_id)
        }
        _ => Err(TracklineError::invalid_params(format!(
            "unknown tool: {name}"
        ))),
    }
}

/// Resolve a resource URI to its upstream payload.
pub(super) fn read_resource(tracker: &dyn Tracker, uri: &str) -> Result<Value> {
    match uri {
        "redmine://projects" => tracker.projects_raw(),
        "redmine://issues" => tracker.issues_raw(&IssueQuery::default()),
        _ => Err(TracklineError::invalid_params(format!(
            "unknown resource uri: {uri}"
        ))),
    }
}
