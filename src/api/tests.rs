use mockito::Matcher;
use serde_json::json;

use super::gateway_client::GatewayClient;
use super::DashboardApi;
use crate::model::sprint::SprintState;

#[tokio::test]
async fn fetch_issues_normalizes_search_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/jira-issues")
        .match_query(Matcher::UrlEncoded("jql".into(), "project = POSC".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"issues": [{
                "id": "1",
                "key": "POSC-1",
                "fields": {
                    "summary": "Fix login",
                    "status": {"name": "Testing"},
                    "issuetype": {"name": "Story"},
                    "customfield_10020": [{"id": 9, "name": "Sprint 9", "state": "active"}]
                }
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = GatewayClient::new(server.url());
    let issues = client.fetch_issues("project = POSC").await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].status, "Testing");
    assert_eq!(issues[0].sprint_name(), Some("Sprint 9"));
    assert!(issues[0].approvals().pm_approval_required);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_sprints_omits_blank_name_and_keeps_gateway_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/jira-sprints")
        .match_query(Matcher::Exact("boardId=506".into()))
        .with_status(200)
        .with_body(
            json!({"values": [
                {"id": 1, "name": "Sprint 1", "state": "closed"},
                {"id": 3, "name": "Sprint 3", "state": "future"},
                {"id": 2, "name": "Sprint 2", "state": "active"},
                {"id": 4, "name": "Sprint 4", "state": "future"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = GatewayClient::new(format!("{}/", server.url()));
    let sprints = client.fetch_sprints(506, Some("   ")).await.unwrap();
    let ids: Vec<i64> = sprints.iter().map(|s| s.id).collect();
    // Ordering happens in the store, not the client.
    assert_eq!(ids, vec![1, 3, 2, 4]);
    assert!(sprints.iter().all(|s| s.board_id == 506));
    assert_eq!(sprints[2].state, SprintState::Active);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_sprints_sends_trimmed_name() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/jira-sprints")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("boardId".into(), "506".into()),
            Matcher::UrlEncoded("sprintName".into(), "Sprint 10".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"values":[]}"#)
        .create_async()
        .await;

    let client = GatewayClient::new(server.url());
    assert!(client
        .fetch_sprints(506, Some(" Sprint 10 "))
        .await
        .unwrap()
        .is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_boards_lists_every_board() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/jira-boards")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"values":[{"id":506,"name":"POSC board","type":"scrum"}]}"#)
        .create_async()
        .await;

    let client = GatewayClient::new(server.url());
    let boards = client.fetch_boards().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].board_type, "scrum");
    mock.assert_async().await;
}

#[tokio::test]
async fn gateway_error_envelope_becomes_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/jira-boards")
        .with_status(401)
        .with_body(r#"{"error":"Failed to fetch boards","message":"Unauthorized","details":null}"#)
        .create_async()
        .await;

    let client = GatewayClient::new(server.url());
    let err = client.fetch_boards().await.unwrap_err();
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn unreachable_gateway_is_an_error() {
    let client = GatewayClient::new("http://127.0.0.1:1");
    let err = client.fetch_issues("x").await.unwrap_err();
    assert!(err.to_string().contains("/api/jira-issues"));
}
