//! Protocol-bridge server: the tracker API exposed over stdio JSON-RPC.
//!
//! Speaks the MCP handshake (`initialize`, `notifications/initialized`,
//! `ping`) and serves three read-only tools plus a small resource surface.
//! The server is a pure request-to-response function over a [`Tracker`], so
//! the whole dispatch is testable without a transport; framing lives in
//! [`stdio`].
//!
//! Error split: structurally invalid arguments are rejected with JSON-RPC
//! `-32602` before any upstream call; upstream failures come back inside a
//! successful `tools/call` response as an `isError: true` text result, the
//! shape tool-calling clients surface to the model.

mod stdio;
mod tools;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::Tracker;
use crate::error::TracklineError;

pub use stdio::run_stdio;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "trackline-bridge";

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    #[serde(rename = "jsonrpc")]
    pub(crate) _jsonrpc: Option<String>,
    pub(crate) method: String,
    #[serde(default)]
    pub(crate) id: Option<Value>,
    #[serde(default)]
    pub(crate) params: Option<Value>,
}

pub(crate) fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub(crate) fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

fn tool_text_content(payload: &Value) -> Value {
    json!({
        "type": "text",
        "text": serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string()),
    })
}

/// One bridge session over a tracker.
pub struct BridgeServer<'a> {
    tracker: &'a dyn Tracker,
    initialized: bool,
}

impl<'a> BridgeServer<'a> {
    #[must_use]
    pub fn new(tracker: &'a dyn Tracker) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Dispatch one request. `None` means the request was a notification and
    /// no frame goes back on the wire.
    pub fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = !matches!(request.id.as_ref(), None | Some(Value::Null));
        debug!(method, "bridge request");

        if method == "initialize" {
            // Echo the client's declared protocol version; strict clients
            // reject a mismatch.
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(PROTOCOL_VERSION);

            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                    "capabilities": {
                        "tools": {},
                        "resources": {},
                    }
                }),
            ));
        }

        // The protocol says `notifications/initialized`; some clients send plain
        // `initialized`. Accept both, never respond.
        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        // Allow auto-initialization on the first real request to dodge
        // client startup races. Unknown methods fall through to the
        // method-not-found arm regardless of handshake state.
        if !self.initialized
            && matches!(
                method,
                "ping" | "tools/list" | "tools/call" | "resources/list" | "resources/read"
            )
        {
            self.initialized = true;
        }

        match method {
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            "tools/list" => Some(json_rpc_response(
                request.id,
                json!({ "tools": tools::tool_definitions() }),
            )),
            "tools/call" => Some(self.handle_tool_call(request.id, request.params)),
            "resources/list" => Some(json_rpc_response(
                request.id,
                json!({ "resources": tools::resource_definitions() }),
            )),
            "resources/read" => Some(self.handle_resource_read(request.id, request.params)),
            _ => {
                if expects_response {
                    Some(json_rpc_error(
                        request.id,
                        -32601,
                        &format!("Method not found: {method}"),
                    ))
                } else {
                    None
                }
            }
        }
    }

    fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> Value {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return json_rpc_error(id, -32602, "Missing tool name");
        };
        if !tools::is_known_tool(name) {
            return json_rpc_error(id, -32601, &format!("Unknown tool: {name}"));
        }
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match tools::call_tool(self.tracker, name, &arguments) {
            Ok(payload) => json_rpc_response(
                id,
                json!({ "content": [tool_text_content(&payload)] }),
            ),
            Err(TracklineError::InvalidParams { reason }) => {
                json_rpc_error(id, -32602, &reason)
            }
            // Upstream failure: a successful RPC frame carrying an error
            // result, so the client surfaces the text instead of aborting.
            Err(e) => json_rpc_response(
                id,
                json!({
                    "content": [{ "type": "text", "text": e.to_string() }],
                    "isError": true,
                }),
            ),
        }
    }

    fn handle_resource_read(&self, id: Option<Value>, params: Option<Value>) -> Value {
        let params = params.unwrap_or(Value::Null);
        let Some(uri) = params.get("uri").and_then(|v| v.as_str()) else {
            return json_rpc_error(id, -32602, "Missing resource uri");
        };

        match tools::read_resource(self.tracker, uri) {
            Ok(payload) => {
                let text = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| "[]".to_string());
                json_rpc_response(
                    id,
                    json!({
                        "contents": [{
                            "uri": uri,
                            "mimeType": "application/json",
                            "text": text,
                        }]
                    }),
                )
            }
            Err(TracklineError::InvalidParams { reason }) => {
                json_rpc_error(id, -32602, &reason)
            }
            // Read-resource results have no error shape of their own, so an
            // upstream failure becomes a JSON-RPC internal error.
            Err(e) => json_rpc_error(id, -32603, &e.to_string()),
        }
    }
}
