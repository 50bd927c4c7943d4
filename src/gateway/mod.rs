//! HTTP proxy in front of the tracker. Holds the credential, forwards
//! parameterized queries and maps failures to one JSON error envelope.

pub mod error;
pub mod jira;
pub mod routes;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use error::ApiError;
use jira::JiraClient;
use routes::GatewayState;

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/jira-issues", get(routes::jira_issues))
        .route("/api/jira-fields", get(routes::jira_fields))
        .route("/api/jira-sprints", get(routes::jira_sprints))
        .route("/api/sprint/:sprint_id", get(routes::sprint_detail))
        .route("/api/jira-boards", get(routes::jira_boards))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    tracing::error!("Unhandled error: {message}");
    ApiError::internal(message).into_response()
}

pub async fn serve(config: &AppConfig, port: u16) -> Result<()> {
    let jira = JiraClient::new(config.jira.credentials());
    if !jira.is_configured() {
        tracing::warn!(
            "Jira credentials not configured. Set JIRA_BASE_URL, JIRA_EMAIL and JIRA_API_TOKEN; \
             tracker routes will answer 500 until then"
        );
    }

    let state = GatewayState {
        jira: Arc::new(jira),
        default_jql: config.default_jql(),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Jira gateway running on http://localhost:{port}");
    tracing::info!("Health check: http://localhost:{port}/health");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server failed")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
