use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Action, App, InputTarget, ViewMode};
use crate::api::DashboardApi;
use crate::event::KeyAction;
use crate::model::issue::{test_issue, Issue};
use crate::model::sprint::{Board, Sprint, SprintState};
use crate::pipeline::sort::{SortColumn, SortDirection};
use crate::store::{DashboardStore, ISSUES_ERROR};
use crate::util::clipboard::Clipboard;

/// Canned responses plus a log of every call made.
#[derive(Default)]
struct MockApi {
    issues: Vec<Issue>,
    sprints: Vec<Sprint>,
    boards: Vec<Board>,
    should_fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn fetch_issues(&self, jql: &str) -> Result<Vec<Issue>> {
        self.calls.lock().unwrap().push(format!("issues:{jql}"));
        if self.should_fail {
            anyhow::bail!("Mock failure");
        }
        Ok(self.issues.clone())
    }

    async fn fetch_sprints(&self, board_id: i64, sprint_name: Option<&str>) -> Result<Vec<Sprint>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("sprints:{board_id}:{}", sprint_name.unwrap_or_default()));
        if self.should_fail {
            anyhow::bail!("Mock failure");
        }
        Ok(self.sprints.clone())
    }

    async fn fetch_boards(&self) -> Result<Vec<Board>> {
        self.calls.lock().unwrap().push("boards".into());
        if self.should_fail {
            anyhow::bail!("Mock failure");
        }
        Ok(self.boards.clone())
    }
}

struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn copy(&mut self, _text: &str) -> Result<()> {
        anyhow::bail!("terminal closed")
    }
}

fn make_app(
    api: MockApi,
    clipboard: Box<dyn Clipboard>,
) -> (App, mpsc::UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let store = DashboardStore::new("", 506, "https://example.atlassian.net");
    (App::new(store, Arc::new(api), clipboard, tx), rx)
}

fn recording() -> (Box<dyn Clipboard>, Arc<Mutex<Vec<String>>>) {
    let copied = Arc::new(Mutex::new(Vec::new()));
    (
        Box::new(RecordingClipboard {
            copied: Arc::clone(&copied),
        }),
        copied,
    )
}

fn load_issues(app: &mut App, issues: Vec<Issue>) {
    let seq = app.store.issues.begin();
    app.update(Action::IssuesLoaded {
        seq,
        result: Ok(issues),
    });
}

fn press(app: &mut App, key: KeyAction) {
    app.update(Action::Key(key));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyAction::Char(c));
    }
}

async fn settle(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Action>) {
    let action = rx.recv().await.expect("action channel closed");
    app.update(action);
}

fn with_status(key: &str, status: &str) -> Issue {
    let mut issue = test_issue(key);
    issue.status = status.into();
    issue
}

fn sprint(id: i64, state: SprintState) -> Sprint {
    Sprint {
        id,
        name: format!("Sprint {id}"),
        state,
        board_id: 7,
        start_date: None,
        end_date: None,
        complete_date: None,
        goal: None,
    }
}

#[tokio::test]
async fn fetch_issues_fills_the_store() {
    let api = MockApi {
        issues: vec![test_issue("POSC-1"), test_issue("POSC-2")],
        ..MockApi::default()
    };
    let calls = Arc::clone(&api.calls);
    let (mut app, mut rx) = make_app(api, Box::new(FailingClipboard));

    app.fetch_issues();
    assert!(app.store.issues.loading);
    settle(&mut app, &mut rx).await;

    assert!(!app.store.issues.loading);
    assert_eq!(app.store.issues.data.len(), 2);
    assert_eq!(app.store.export().lines().len(), 2);
    assert_eq!(calls.lock().unwrap().as_slice(), ["issues:"]);
}

#[tokio::test]
async fn fetch_failure_sets_error_slot_only() {
    let (mut app, mut rx) = make_app(MockApi::default().with_failure(), Box::new(FailingClipboard));

    app.fetch_issues();
    settle(&mut app, &mut rx).await;

    assert_eq!(app.store.issues.error.as_deref(), Some(ISSUES_ERROR));
    assert!(app.store.sprints.error.is_none());
    assert!(app.store.boards.error.is_none());

    // Still interactive after the failure.
    press(&mut app, KeyAction::Down);
    press(&mut app, KeyAction::Tab);
    assert_eq!(app.view_mode, ViewMode::Kanban);
    assert!(!app.should_quit);
}

#[tokio::test]
async fn retry_resubmits_the_same_query() {
    let api = MockApi::default().with_failure();
    let calls = Arc::clone(&api.calls);
    let (mut app, mut rx) = make_app(api, Box::new(FailingClipboard));
    app.store.jql = "project = DEMO".into();

    app.fetch_issues();
    settle(&mut app, &mut rx).await;
    press(&mut app, KeyAction::Char('r'));
    assert!(app.store.issues.error.is_none());
    settle(&mut app, &mut rx).await;

    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["issues:project = DEMO", "issues:project = DEMO"]
    );
}

#[test]
fn stale_issue_response_is_dropped() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    let first = app.store.issues.begin();
    let second = app.store.issues.begin();

    app.update(Action::IssuesLoaded {
        seq: second,
        result: Ok(vec![test_issue("NEW-1")]),
    });
    app.update(Action::IssuesLoaded {
        seq: first,
        result: Ok(vec![test_issue("OLD-1")]),
    });

    assert_eq!(app.store.issues.data[0].key, "NEW-1");
}

#[test]
fn q_quits_outside_inputs_only() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));

    press(&mut app, KeyAction::Char('/'));
    press(&mut app, KeyAction::Char('q'));
    assert!(!app.should_quit);
    assert_eq!(app.input.as_ref().map(|i| i.buffer.as_str()), Some("q"));

    press(&mut app, KeyAction::Select);
    assert!(app.input.is_none());
    press(&mut app, KeyAction::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn search_filters_live_and_escape_restores() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(&mut app, vec![test_issue("POSC-1"), test_issue("POSC-22")]);

    press(&mut app, KeyAction::Char('/'));
    assert_eq!(app.input.as_ref().map(|i| i.target), Some(InputTarget::Search));
    type_text(&mut app, "posc-22");
    assert_eq!(app.store.visible_issues().len(), 1);
    assert_eq!(app.store.export().lines().len(), 1);

    press(&mut app, KeyAction::Escape);
    assert_eq!(app.store.visible_issues().len(), 2);
    assert_eq!(app.store.filters().search_text, "");
}

#[tokio::test]
async fn committing_jql_fetches_with_it() {
    let api = MockApi::default();
    let calls = Arc::clone(&api.calls);
    let (mut app, mut rx) = make_app(api, Box::new(FailingClipboard));

    press(&mut app, KeyAction::Char('j'));
    type_text(&mut app, " project = DEMO ");
    press(&mut app, KeyAction::Select);
    settle(&mut app, &mut rx).await;

    assert_eq!(app.store.jql, "project = DEMO");
    assert_eq!(calls.lock().unwrap().as_slice(), ["issues:project = DEMO"]);
}

#[test]
fn digit_keys_sort_and_flip_direction() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(
        &mut app,
        vec![
            with_status("A-1", "Open"),
            with_status("A-2", "Resolved"),
            with_status("A-3", "Testing"),
        ],
    );

    press(&mut app, KeyAction::Char('3'));
    let sort = app.store.sort().unwrap();
    assert_eq!(sort.column, SortColumn::Status);
    assert_eq!(sort.direction, SortDirection::Asc);
    assert_eq!(app.selected_issue().map(|i| i.key.as_str()), Some("A-2"));

    press(&mut app, KeyAction::Char('3'));
    assert_eq!(app.store.sort().unwrap().direction, SortDirection::Desc);
    assert_eq!(app.selected_issue().map(|i| i.key.as_str()), Some("A-1"));
}

#[test]
fn filter_picker_toggles_options() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(
        &mut app,
        vec![with_status("A-1", "Open"), with_status("A-2", "In Progress")],
    );

    press(&mut app, KeyAction::Char('f'));
    assert!(app.picker.is_some());
    // Options are sorted: "In Progress", "Open".
    press(&mut app, KeyAction::Down);
    press(&mut app, KeyAction::Char(' '));
    press(&mut app, KeyAction::Escape);

    assert!(app.picker.is_none());
    let keys: Vec<&str> = app
        .store
        .visible_issues()
        .iter()
        .map(|i| i.key.as_str())
        .collect();
    assert_eq!(keys, vec!["A-1"]);

    press(&mut app, KeyAction::Char('c'));
    assert_eq!(app.store.visible_issues().len(), 2);
}

#[test]
fn copy_writes_only_selected_lines() {
    let (clipboard, copied) = recording();
    let (mut app, _rx) = make_app(MockApi::default(), clipboard);
    load_issues(&mut app, vec![test_issue("A-1"), test_issue("A-2")]);

    press(&mut app, KeyAction::BackTab);
    assert_eq!(app.view_mode, ViewMode::Export);
    press(&mut app, KeyAction::Char(' '));
    press(&mut app, KeyAction::Char('y'));

    let expected = app.store.export().lines()[1].text.clone();
    assert_eq!(copied.lock().unwrap().as_slice(), [expected]);
    let flash = app.flash_message.as_ref().map(|(m, _)| m.as_str());
    assert_eq!(flash, Some("Copied 1 lines to clipboard"));
}

#[test]
fn clipboard_failure_is_a_notification() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(&mut app, vec![test_issue("A-1")]);

    press(&mut app, KeyAction::BackTab);
    press(&mut app, KeyAction::Char('y'));

    let flash = app.flash_message.as_ref().map(|(m, _)| m.clone()).unwrap();
    assert!(flash.starts_with("Copy failed"));
    assert_eq!(app.view_mode, ViewMode::Export);
}

#[test]
fn export_field_keys_toggle_fields() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(&mut app, vec![test_issue("A-1")]);

    press(&mut app, KeyAction::BackTab);
    // '4' is Summary; switching it off drops it from the line.
    press(&mut app, KeyAction::Char('4'));
    assert!(!app.store.export().lines()[0].text.contains("Summary of A-1"));
    // '0' is the tenth field, Updated.
    press(&mut app, KeyAction::Char('0'));
    assert!(app.store.export().lines()[0].text.ends_with("Jan 01, 2024"));
}

#[tokio::test]
async fn selecting_a_board_loads_its_sprints() {
    let api = MockApi {
        boards: vec![Board {
            id: 7,
            name: "POSC board".into(),
            board_type: "scrum".into(),
            location: None,
        }],
        sprints: vec![sprint(1, SprintState::Closed), sprint(2, SprintState::Active)],
        ..MockApi::default()
    };
    let calls = Arc::clone(&api.calls);
    let (mut app, mut rx) = make_app(api, Box::new(FailingClipboard));

    // Issues -> Export -> Boards without passing through Sprints.
    press(&mut app, KeyAction::BackTab);
    press(&mut app, KeyAction::BackTab);
    assert_eq!(app.view_mode, ViewMode::Boards);
    settle(&mut app, &mut rx).await;
    assert_eq!(app.store.boards.data.len(), 1);

    press(&mut app, KeyAction::Select);
    assert_eq!(app.view_mode, ViewMode::Sprints);
    settle(&mut app, &mut rx).await;

    assert_eq!(app.store.board_id, "7");
    assert_eq!(app.store.sprints.data[0].id, 2);
    assert_eq!(calls.lock().unwrap().as_slice(), ["boards", "sprints:7:"]);

    // Coming back does not refetch.
    press(&mut app, KeyAction::Tab);
    press(&mut app, KeyAction::BackTab);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn sprint_name_search_is_sent() {
    let api = MockApi::default();
    let calls = Arc::clone(&api.calls);
    let (mut app, mut rx) = make_app(api, Box::new(FailingClipboard));
    app.view_mode = ViewMode::Sprints;

    press(&mut app, KeyAction::Char('n'));
    type_text(&mut app, "Sprint 10");
    press(&mut app, KeyAction::Select);
    settle(&mut app, &mut rx).await;

    assert_eq!(calls.lock().unwrap().as_slice(), ["sprints:506:Sprint 10"]);
}

#[test]
fn non_numeric_board_id_is_rejected_locally() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    app.view_mode = ViewMode::Sprints;

    press(&mut app, KeyAction::Char('b'));
    for _ in 0..3 {
        press(&mut app, KeyAction::Backspace);
    }
    type_text(&mut app, "abc");
    press(&mut app, KeyAction::Select);

    assert!(app.store.sprints.is_untouched());
    let flash = app.flash_message.as_ref().map(|(m, _)| m.as_str());
    assert_eq!(flash, Some("Board ID must be a number"));
}

#[test]
fn kanban_navigation_stays_in_bounds() {
    let (mut app, _rx) = make_app(MockApi::default(), Box::new(FailingClipboard));
    load_issues(
        &mut app,
        vec![with_status("A-1", "Open"), with_status("A-2", "Resolved")],
    );
    press(&mut app, KeyAction::Tab);
    assert_eq!(app.view_mode, ViewMode::Kanban);

    assert_eq!(app.selected_kanban_issue().map(|i| i.key.as_str()), Some("A-2"));
    press(&mut app, KeyAction::Right);
    press(&mut app, KeyAction::Down);
    press(&mut app, KeyAction::Down);
    assert_eq!(app.kanban_row, 0);
    assert_eq!(app.selected_kanban_issue().map(|i| i.key.as_str()), None);
}
