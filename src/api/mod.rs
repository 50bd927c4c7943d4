pub mod gateway_client;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::issue::Issue;
use crate::model::sprint::{Board, Sprint};

/// Data the dashboard reads. Implemented over HTTP by [`gateway_client::GatewayClient`].
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_issues(&self, jql: &str) -> Result<Vec<Issue>>;
    async fn fetch_sprints(&self, board_id: i64, sprint_name: Option<&str>) -> Result<Vec<Sprint>>;
    async fn fetch_boards(&self) -> Result<Vec<Board>>;
}

#[cfg(test)]
mod tests;
