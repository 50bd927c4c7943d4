//! Raw tracker JSON -> canonical records.
//!
//! Every function here is total: unexpected shapes degrade to defaults
//! (empty strings, `None`, skipped elements) and are logged, never raised.

use serde_json::{Map, Value};

use crate::model::issue::{Issue, Person, SprintRef};
use crate::model::sprint::{Board, Sprint, SprintState};
use crate::util::adf::description_text;

/// Field slots probed for sprint membership, in priority order.
pub const SPRINT_FIELD_SLOTS: [&str; 4] = [
    "sprint",
    "customfield_10020",
    "customfield_10010",
    "customfield_10014",
];

pub fn normalize_search(response: &Value) -> Vec<Issue> {
    match response.get("issues").and_then(Value::as_array) {
        Some(issues) => issues.iter().map(normalize_issue).collect(),
        None => {
            tracing::warn!("search response has no issues array");
            Vec::new()
        }
    }
}

pub fn normalize_issue(raw: &Value) -> Issue {
    let empty = Map::new();
    let fields = raw.get("fields").and_then(Value::as_object).unwrap_or(&empty);

    Issue {
        id: scalar_string(raw.get("id")),
        key: scalar_string(raw.get("key")),
        summary: str_field(fields, "summary"),
        description: fields
            .get("description")
            .map(description_text)
            .unwrap_or_default(),
        status: named(fields, "status"),
        priority: named(fields, "priority"),
        issue_type: named(fields, "issuetype"),
        assignee: fields
            .get("assignee")
            .and_then(Value::as_object)
            .map(person),
        reporter: fields
            .get("reporter")
            .and_then(Value::as_object)
            .map(person)
            .unwrap_or_default(),
        created: str_field(fields, "created"),
        updated: str_field(fields, "updated"),
        labels: fields
            .get("labels")
            .and_then(Value::as_array)
            .map(|ls| {
                ls.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        sprint: resolve_sprint(fields),
    }
}

/// Find the issue's sprint: known slots first, then any field that looks
/// like a sprint list. Arrays resolve to the active entry, else the last.
pub fn resolve_sprint(fields: &Map<String, Value>) -> Option<SprintRef> {
    let value = SPRINT_FIELD_SLOTS
        .iter()
        .filter_map(|slot| fields.get(*slot))
        .find(|v| is_present(v))
        .or_else(|| fields.values().find(|v| looks_like_sprint_list(v)))?;

    let chosen = match value {
        Value::Array(entries) => entries
            .iter()
            .find(|e| e.get("state").and_then(Value::as_str) == Some("active"))
            .or_else(|| entries.last())?,
        other => other,
    };

    match chosen.as_object() {
        Some(obj) => Some(SprintRef {
            id: obj.get("id").and_then(as_i64).unwrap_or_default(),
            name: str_field(obj, "name"),
            state: obj.get("state").and_then(Value::as_str).map(String::from),
        }),
        None => {
            tracing::debug!(?chosen, "ignoring sprint value with unexpected shape");
            None
        }
    }
}

pub fn normalize_sprints(response: &Value, board_id: i64) -> Vec<Sprint> {
    values(response)
        .iter()
        .filter_map(|raw| {
            let obj = raw.as_object()?;
            Some(Sprint {
                id: obj.get("id").and_then(as_i64)?,
                name: str_field(obj, "name"),
                state: SprintState::parse(
                    obj.get("state").and_then(Value::as_str).unwrap_or_default(),
                ),
                board_id: obj.get("originBoardId").and_then(as_i64).unwrap_or(board_id),
                start_date: opt_str(obj, "startDate"),
                end_date: opt_str(obj, "endDate"),
                complete_date: opt_str(obj, "completeDate"),
                goal: opt_str(obj, "goal").filter(|g| !g.is_empty()),
            })
        })
        .collect()
}

pub fn normalize_boards(response: &Value) -> Vec<Board> {
    values(response)
        .iter()
        .filter_map(|raw| match serde_json::from_value::<Board>(raw.clone()) {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::warn!("skipping malformed board: {e}");
                None
            }
        })
        .collect()
}

fn values(response: &Value) -> &[Value] {
    response
        .get("values")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Object(o) => !o.is_empty(),
        _ => true,
    }
}

fn looks_like_sprint_list(v: &Value) -> bool {
    v.as_array()
        .and_then(|a| a.first())
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("name") && first.contains_key("id"))
}

fn person(obj: &Map<String, Value>) -> Person {
    Person {
        display_name: str_field(obj, "displayName"),
        email_address: str_field(obj, "emailAddress"),
    }
}

fn named(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    opt_str(obj, key).unwrap_or_default()
}

fn opt_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn scalar_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}
