use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::DashboardApi;
use crate::model::issue::Issue;
use crate::model::sprint::{Board, Sprint};
use crate::normalize::{normalize_boards, normalize_search, normalize_sprints};

pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .with_context(|| format!("Gateway request to {path} failed"))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse gateway response from {path}"))?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            bail!("Gateway returned {status}: {message}");
        }
        Ok(body)
    }
}

#[async_trait]
impl DashboardApi for GatewayClient {
    async fn fetch_issues(&self, jql: &str) -> Result<Vec<Issue>> {
        let body = self
            .get_json("/api/jira-issues", &[("jql", jql.to_string())])
            .await?;
        Ok(normalize_search(&body))
    }

    async fn fetch_sprints(&self, board_id: i64, sprint_name: Option<&str>) -> Result<Vec<Sprint>> {
        let mut query = vec![("boardId", board_id.to_string())];
        if let Some(name) = sprint_name.map(str::trim).filter(|n| !n.is_empty()) {
            query.push(("sprintName", name.to_string()));
        }
        let body = self.get_json("/api/jira-sprints", &query).await?;
        Ok(normalize_sprints(&body, board_id))
    }

    async fn fetch_boards(&self) -> Result<Vec<Board>> {
        let body = self.get_json("/api/jira-boards", &[]).await?;
        Ok(normalize_boards(&body))
    }
}
