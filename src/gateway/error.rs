use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::jira::JiraError;

/// JSON error envelope returned by every failing gateway route.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
    /// `Some(Value::Null)` still serializes as `"details": null`;
    /// `None` leaves the key out.
    pub details: Option<Value>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl ApiError {
    /// A failed tracker call. `error` names the operation that failed.
    pub fn upstream(error: &str, source: JiraError) -> Self {
        let (status, details) = match &source {
            JiraError::Upstream { status, details, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                details.clone(),
            ),
            JiraError::NotConfigured | JiraError::Transport(_) | JiraError::Decode(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Value::Null)
            }
        };
        tracing::error!(status = status.as_u16(), "{error}: {source}");
        Self {
            status,
            error: error.to_string(),
            message: source.to_string(),
            details: Some(details),
        }
    }

    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.to_string(),
            message: message.into(),
            details: Some(Value::Null),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "Not found".into(),
            message: format!("Route {path} not found"),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Internal server error".into(),
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            error: &self.error,
            message: &self.message,
            details: self.details.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_status_is_mirrored() {
        let err = ApiError::upstream(
            "Failed to fetch issues",
            JiraError::Upstream {
                status: 401,
                message: "Unauthorized".into(),
                details: json!({"errorMessages": ["Unauthorized"]}),
            },
        );
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Unauthorized");
        assert_eq!(err.details, Some(json!({"errorMessages": ["Unauthorized"]})));
    }

    #[test]
    fn missing_credentials_is_a_server_error() {
        let err = ApiError::upstream("Failed to fetch sprints", JiraError::NotConfigured);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("not configured"));
        assert_eq!(err.details, Some(Value::Null));
    }

    #[test]
    fn not_found_envelope_has_no_details() {
        let body = serde_json::to_value(Envelope {
            error: "Not found",
            message: "Route /x not found",
            details: None,
        })
        .unwrap();
        assert_eq!(body, json!({"error": "Not found", "message": "Route /x not found"}));
    }
}
