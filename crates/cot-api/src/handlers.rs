//! API Handlers
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use cot_core::{CotError, COT_VERSION};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::tools::{TextContent, Tool, ToolCall};
use crate::AppState;

/// `POST /v1/tools/{name}` with the arguments object as body
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Json<TextContent> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("tool", tool = %name, %request_id);

    let content = span.in_scope(|| match parse_body::<Value>(&body) {
        Ok(arguments) => state.toolbox.call_by_name(&name, &arguments),
        Err(err) => TextContent::error(&err),
    });

    tracing::info!(tool = %name, %request_id, error = content.is_error(), "tool call answered");
    Json(content)
}

/// `POST /v1/tools/call` with `{"name": ..., "arguments": {...}}`
pub async fn call(State(state): State<AppState>, body: Bytes) -> Json<TextContent> {
    let request_id = Uuid::new_v4();

    let content = match parse_body::<ToolCall>(&body) {
        Ok(call) => {
            let span = tracing::info_span!("tool", tool = %call.name, %request_id);
            span.in_scope(|| state.toolbox.call_by_name(&call.name, &call.arguments))
        }
        Err(err) => TextContent::error(&err),
    };

    tracing::info!(%request_id, error = content.is_error(), "tool call answered");
    Json(content)
}

pub async fn list_tools() -> (StatusCode, Json<Value>) {
    let tools: Vec<Value> = Tool::ALL
        .iter()
        .map(|t| json!({ "name": t.name(), "description": t.description() }))
        .collect();
    (StatusCode::OK, Json(json!({ "tools": tools })))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": COT_VERSION })))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain")],
            e.to_string(),
        ),
    }
}

/// An empty body is treated as an empty arguments object.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, CotError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) { &b"{}"[..] } else { body };
    serde_json::from_slice(body).map_err(|e| CotError::format(format!("invalid JSON body: {}", e)))
}
