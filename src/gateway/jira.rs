use base64::Engine;
use serde_json::Value;
use thiserror::Error;

use crate::config::Credentials;

/// Upper bound on records per tracker call; results are never paged.
pub const MAX_RESULTS: u32 = 1000;

pub const ISSUE_FIELDS: [&str; 14] = [
    "summary",
    "status",
    "priority",
    "assignee",
    "reporter",
    "created",
    "updated",
    "labels",
    "issuetype",
    "description",
    "sprint",
    "customfield_10020",
    "customfield_10010",
    "customfield_10014",
];

#[derive(Debug, Error)]
pub enum JiraError {
    #[error(
        "Jira credentials not configured. Set JIRA_BASE_URL, JIRA_EMAIL and JIRA_API_TOKEN \
         or the [jira] section of ~/.sprintdesk/config.toml"
    )]
    NotConfigured,
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response from Jira: {0}")]
    Decode(String),
}

pub struct JiraClient {
    credentials: Option<Credentials>,
    client: reqwest::Client,
}

impl JiraClient {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub async fn search_issues(&self, jql: &str) -> Result<Value, JiraError> {
        self.get(
            "/rest/api/3/search",
            &[
                ("jql", jql.to_string()),
                ("fields", ISSUE_FIELDS.join(",")),
                ("maxResults", MAX_RESULTS.to_string()),
                ("expand", "names".to_string()),
            ],
        )
        .await
    }

    pub async fn fields(&self) -> Result<Value, JiraError> {
        self.get("/rest/api/3/field", &[]).await
    }

    pub async fn board_sprints(&self, board_id: &str) -> Result<Value, JiraError> {
        let path = format!(
            "/rest/agile/1.0/board/{}/sprint",
            urlencoding::encode(board_id)
        );
        self.get(&path, &[("maxResults", MAX_RESULTS.to_string())])
            .await
    }

    pub async fn sprint(&self, sprint_id: &str) -> Result<Value, JiraError> {
        let path = format!("/rest/agile/1.0/sprint/{}", urlencoding::encode(sprint_id));
        self.get(&path, &[]).await
    }

    pub async fn boards(
        &self,
        board_type: Option<&str>,
        max_results: Option<u32>,
    ) -> Result<Value, JiraError> {
        let mut query = Vec::new();
        if let Some(t) = board_type {
            query.push(("type", t.to_string()));
        }
        if let Some(n) = max_results {
            query.push(("maxResults", n.to_string()));
        }
        self.get("/rest/agile/1.0/board", &query).await
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, JiraError> {
        let creds = self.credentials.as_ref().ok_or(JiraError::NotConfigured)?;
        let url = format!("{}{path}", creds.base_url);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", basic_auth(creds))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        let body: Option<Value> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            let details = body.unwrap_or_else(|| {
                let text = String::from_utf8_lossy(&bytes);
                if text.is_empty() {
                    Value::Null
                } else {
                    Value::String(text.into_owned())
                }
            });
            return Err(JiraError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status.as_u16(), &details),
                details,
            });
        }

        body.ok_or_else(|| JiraError::Decode(format!("{path} did not return JSON")))
    }
}

fn basic_auth(creds: &Credentials) -> String {
    let raw = format!("{}:{}", creds.email, creds.api_token);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw)
    )
}

/// The most specific human message an upstream error body offers.
pub fn upstream_message(status: u16, body: &Value) -> String {
    fn non_empty(v: &Value) -> Option<&str> {
        v.as_str().filter(|s| !s.trim().is_empty())
    }
    let first_error = body
        .get("errorMessages")
        .and_then(Value::as_array)
        .and_then(|msgs| msgs.first())
        .and_then(non_empty);
    let message = || body.get("message").and_then(non_empty);

    first_error
        .or_else(message)
        .map(String::from)
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_error_message_wins() {
        let body = json!({"errorMessages": ["Unauthorized", "second"], "message": "ignored"});
        assert_eq!(upstream_message(401, &body), "Unauthorized");
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let body = json!({"errorMessages": [], "errors": {"jql": "bad"}, "message": "top"});
        assert_eq!(upstream_message(400, &body), "top");
        assert_eq!(upstream_message(404, &json!({"message": "Board not found"})), "Board not found");
    }

    #[test]
    fn blank_entries_do_not_count() {
        let body = json!({"errorMessages": [""], "message": "  "});
        assert_eq!(upstream_message(400, &body), "Request failed with status code 400");
        let body = json!({"errorMessages": [""], "message": "Bad JQL"});
        assert_eq!(upstream_message(400, &body), "Bad JQL");
    }

    #[test]
    fn generic_message_when_body_is_opaque() {
        assert_eq!(
            upstream_message(502, &Value::String("<html>bad gateway</html>".into())),
            "Request failed with status code 502"
        );
    }

    #[test]
    fn basic_auth_encodes_email_and_token() {
        let creds = Credentials {
            base_url: "https://x".into(),
            email: "me@example.com".into(),
            api_token: "token".into(),
        };
        assert_eq!(basic_auth(&creds), "Basic bWVAZXhhbXBsZS5jb206dG9rZW4=");
    }

    #[tokio::test]
    async fn unconfigured_client_fails_before_any_request() {
        let client = JiraClient::new(None);
        assert!(!client.is_configured());
        let err = client.search_issues("project = X").await.unwrap_err();
        assert!(matches!(err, JiraError::NotConfigured));
        assert!(err.to_string().contains("JIRA_API_TOKEN"));
    }
}
