use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::jira::JiraClient;
use crate::model::sprint::SprintState;

const SPRINT_FIELD_SCHEMA: &str = "com.pyxis.greenhopper.jira:gh-sprint";

#[derive(Clone)]
pub struct GatewayState {
    pub jira: Arc<JiraClient>,
    pub default_jql: String,
}

type ApiResult = Result<Json<Value>, ApiError>;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct IssuesQuery {
    jql: Option<String>,
}

pub async fn jira_issues(
    State(state): State<GatewayState>,
    Query(query): Query<IssuesQuery>,
) -> ApiResult {
    let jql = query
        .jql
        .filter(|j| !j.trim().is_empty())
        .unwrap_or_else(|| state.default_jql.clone());
    tracing::info!("Fetching issues with JQL: {jql}");

    state
        .jira
        .search_issues(&jql)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch issues", e))
}

pub async fn jira_fields(State(state): State<GatewayState>) -> ApiResult {
    tracing::info!("Fetching Jira field information");

    let fields = state
        .jira
        .fields()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch fields", e))?;
    let all: &[Value] = fields.as_array().map(Vec::as_slice).unwrap_or_default();
    let sprint_fields: Vec<&Value> = all.iter().filter(|f| is_sprint_field(f)).collect();

    Ok(Json(json!({
        "sprintFields": sprint_fields,
        "allFieldsCount": all.len(),
    })))
}

fn is_sprint_field(field: &Value) -> bool {
    let name = field.get("name").and_then(Value::as_str).unwrap_or_default();
    let id = field.get("id").and_then(Value::as_str).unwrap_or_default();
    let schema = field.get("schema");
    let custom_type = |key: &str| {
        schema
            .and_then(|s| s.get(key))
            .and_then(Value::as_str)
            == Some(SPRINT_FIELD_SCHEMA)
    };
    name.to_lowercase().contains("sprint")
        || id.contains("sprint")
        || custom_type("custom")
        || custom_type("customId")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintsQuery {
    board_id: Option<String>,
    sprint_name: Option<String>,
}

pub async fn jira_sprints(
    State(state): State<GatewayState>,
    Query(query): Query<SprintsQuery>,
) -> ApiResult {
    let Some(board_id) = query.board_id.filter(|b| !b.trim().is_empty()) else {
        return Err(ApiError::bad_request(
            "Board ID is required",
            "Please provide a boardId parameter",
        ));
    };
    let name_filter = query
        .sprint_name
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty());
    match &name_filter {
        Some(name) => tracing::info!("Fetching sprints for board {board_id} with name filter: {name}"),
        None => tracing::info!("Fetching sprints for board {board_id}"),
    }

    let mut response = state
        .jira
        .board_sprints(board_id.trim())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch sprints", e))?;

    if let Some(values) = response.get_mut("values").and_then(Value::as_array_mut) {
        if let Some(name) = &name_filter {
            values.retain(|sprint| {
                sprint
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|n| n.to_lowercase().contains(name.as_str()))
            });
        }
        values.sort_by_key(|sprint| {
            SprintState::parse(sprint.get("state").and_then(Value::as_str).unwrap_or_default())
                .rank()
        });
    }

    Ok(Json(response))
}

pub async fn sprint_detail(
    State(state): State<GatewayState>,
    Path(sprint_id): Path<String>,
) -> ApiResult {
    tracing::info!("Fetching sprint details for sprint {sprint_id}");

    state
        .jira
        .sprint(&sprint_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch sprint details", e))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardsQuery {
    #[serde(rename = "type")]
    board_type: Option<String>,
    max_results: Option<u32>,
}

pub async fn jira_boards(
    State(state): State<GatewayState>,
    query: Result<Query<BoardsQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request("Invalid query", e.body_text()))?;
    let board_type = query.board_type.as_deref().filter(|t| !t.is_empty());
    tracing::info!(?board_type, max_results = ?query.max_results, "Fetching boards");

    state
        .jira
        .boards(board_type, query.max_results)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch boards", e))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(&uri.to_string())
}
