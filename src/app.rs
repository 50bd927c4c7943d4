use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::api::DashboardApi;
use crate::event::KeyAction;
use crate::model::issue::Issue;
use crate::model::sprint::{Board, Sprint};
use crate::pipeline::export::ExportField;
use crate::pipeline::filter::FilterCategory;
use crate::pipeline::sort::SortColumn;
use crate::store::DashboardStore;
use crate::util::clipboard::Clipboard;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    IssuesLoaded {
        seq: u64,
        result: Result<Vec<Issue>, String>,
    },
    SprintsLoaded {
        seq: u64,
        result: Result<Vec<Sprint>, String>,
    },
    BoardsLoaded {
        seq: u64,
        result: Result<Vec<Board>, String>,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Issues,
    Kanban,
    Sprints,
    Boards,
    Export,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Issues,
        ViewMode::Kanban,
        ViewMode::Sprints,
        ViewMode::Boards,
        ViewMode::Export,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Issues => "Issues",
            ViewMode::Kanban => "Kanban",
            ViewMode::Sprints => "Sprints",
            ViewMode::Boards => "Boards",
            ViewMode::Export => "Export",
        }
    }

    pub fn index(&self) -> usize {
        ViewMode::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    fn next(&self) -> ViewMode {
        ViewMode::ALL[(self.index() + 1) % ViewMode::ALL.len()]
    }

    fn prev(&self) -> ViewMode {
        let len = ViewMode::ALL.len();
        ViewMode::ALL[(self.index() + len - 1) % len]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Jql,
    Search,
    BoardId,
    SprintName,
}

impl InputTarget {
    pub fn title(&self) -> &'static str {
        match self {
            InputTarget::Jql => " JQL query ",
            InputTarget::Search => " Search key, summary or description ",
            InputTarget::BoardId => " Board ID ",
            InputTarget::SprintName => " Sprint name contains ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub target: InputTarget,
    pub buffer: String,
    original: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPicker {
    pub category: FilterCategory,
    pub cursor: usize,
}

pub struct App {
    pub store: DashboardStore,
    pub view_mode: ViewMode,
    pub selected_issue: usize,
    pub kanban_column: usize,
    pub kanban_row: usize,
    pub selected_sprint: usize,
    pub selected_board: usize,
    pub selected_line: usize,
    pub input: Option<InputState>,
    pub picker: Option<FilterPicker>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    api: Arc<dyn DashboardApi>,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(
        store: DashboardStore,
        api: Arc<dyn DashboardApi>,
        clipboard: Box<dyn Clipboard>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            store,
            view_mode: ViewMode::Issues,
            selected_issue: 0,
            kanban_column: 0,
            kanban_row: 0,
            selected_sprint: 0,
            selected_board: 0,
            selected_line: 0,
            input: None,
            picker: None,
            flash_message: None,
            should_quit: false,
            action_tx,
            api,
            clipboard,
        }
    }

    pub fn update(&mut self, action: Action) {
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Tick => {}
            Action::IssuesLoaded { seq, result } => {
                self.store.finish_issues(seq, result);
                self.clamp_selection();
            }
            Action::SprintsLoaded { seq, result } => {
                self.store.finish_sprints(seq, result);
                self.selected_sprint = clamp(self.selected_sprint, self.store.sprints.data.len());
            }
            Action::BoardsLoaded { seq, result } => {
                self.store.finish_boards(seq, result);
                self.selected_board = clamp(self.selected_board, self.store.boards.data.len());
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// The issue under the cursor in the issue table.
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.store.visible_issues().get(self.selected_issue).copied()
    }

    /// The issue under the cursor in the kanban view.
    pub fn selected_kanban_issue(&self) -> Option<&Issue> {
        let columns = self.store.kanban_columns();
        columns
            .get(self.kanban_column)
            .and_then(|c| c.issues.get(self.kanban_row))
            .copied()
    }

    pub fn fetch_issues(&mut self) {
        let seq = self.store.issues.begin();
        let jql = self.store.jql.clone();
        tracing::info!(seq, %jql, "Fetching issues");

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_issues(&jql).await.map_err(|e| format!("{e:#}"));
            let _ = tx.send(Action::IssuesLoaded { seq, result });
        });
    }

    pub fn fetch_sprints(&mut self) {
        let Some(board_id) = self.store.parsed_board_id() else {
            self.flash("Board ID must be a number");
            return;
        };
        let seq = self.store.sprints.begin();
        let name = self.store.sprint_name.clone();
        tracing::info!(seq, board_id, sprint_name = %name, "Fetching sprints");

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api
                .fetch_sprints(board_id, Some(name.as_str()))
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(Action::SprintsLoaded { seq, result });
        });
    }

    pub fn fetch_boards(&mut self) {
        let seq = self.store.boards.begin();
        tracing::info!(seq, "Fetching boards");

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api
                .fetch_boards()
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(Action::BoardsLoaded { seq, result });
        });
    }

    fn handle_key(&mut self, key: KeyAction) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }
        if self.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        match key {
            KeyAction::Tab => self.switch_view(self.view_mode.next()),
            KeyAction::BackTab => self.switch_view(self.view_mode.prev()),
            KeyAction::Char('q') => self.should_quit = true,
            _ => match self.view_mode {
                ViewMode::Issues => self.handle_issues_key(key),
                ViewMode::Kanban => self.handle_kanban_key(key),
                ViewMode::Sprints => self.handle_sprints_key(key),
                ViewMode::Boards => self.handle_boards_key(key),
                ViewMode::Export => self.handle_export_key(key),
            },
        }
    }

    fn switch_view(&mut self, view: ViewMode) {
        self.view_mode = view;
        match view {
            ViewMode::Sprints if self.store.sprints.is_untouched() => self.fetch_sprints(),
            ViewMode::Boards if self.store.boards.is_untouched() => self.fetch_boards(),
            _ => {}
        }
    }

    fn handle_issues_key(&mut self, key: KeyAction) {
        let len = self.store.visible_issues().len();
        match key {
            KeyAction::Up => self.selected_issue = self.selected_issue.saturating_sub(1),
            KeyAction::Down => self.selected_issue = step_down(self.selected_issue, len),
            KeyAction::Char('/') => self.open_input(InputTarget::Search),
            KeyAction::Char('j') => self.open_input(InputTarget::Jql),
            KeyAction::Char('f') => {
                self.picker = Some(FilterPicker {
                    category: FilterCategory::Status,
                    cursor: 0,
                })
            }
            KeyAction::Char('c') => {
                self.store.clear_filters();
                self.clamp_selection();
            }
            KeyAction::Char('r') => self.fetch_issues(),
            KeyAction::Char(d @ '1'..='9') => {
                if let Some(column) = digit_index(d).and_then(|i| SortColumn::ALL.get(i)) {
                    self.store.sort_by(*column);
                }
            }
            _ => {}
        }
    }

    fn handle_kanban_key(&mut self, key: KeyAction) {
        let columns = self.store.kanban_columns();
        let column_count = columns.len();
        let row_count = |col: usize| columns.get(col).map_or(0, |c| c.issues.len());
        match key {
            KeyAction::Left => {
                self.kanban_column = self.kanban_column.saturating_sub(1);
                self.kanban_row = clamp(self.kanban_row, row_count(self.kanban_column));
            }
            KeyAction::Right => {
                self.kanban_column = step_down(self.kanban_column, column_count);
                self.kanban_row = clamp(self.kanban_row, row_count(self.kanban_column));
            }
            KeyAction::Up => self.kanban_row = self.kanban_row.saturating_sub(1),
            KeyAction::Down => {
                self.kanban_row = step_down(self.kanban_row, row_count(self.kanban_column))
            }
            KeyAction::Char('r') => self.fetch_issues(),
            _ => {}
        }
    }

    fn handle_sprints_key(&mut self, key: KeyAction) {
        let len = self.store.sprints.data.len();
        match key {
            KeyAction::Up => self.selected_sprint = self.selected_sprint.saturating_sub(1),
            KeyAction::Down => self.selected_sprint = step_down(self.selected_sprint, len),
            KeyAction::Char('b') => self.open_input(InputTarget::BoardId),
            KeyAction::Char('n') => self.open_input(InputTarget::SprintName),
            KeyAction::Char('r') | KeyAction::Select => self.fetch_sprints(),
            _ => {}
        }
    }

    fn handle_boards_key(&mut self, key: KeyAction) {
        let len = self.store.boards.data.len();
        match key {
            KeyAction::Up => self.selected_board = self.selected_board.saturating_sub(1),
            KeyAction::Down => self.selected_board = step_down(self.selected_board, len),
            KeyAction::Char('r') => self.fetch_boards(),
            KeyAction::Select => {
                let Some(board) = self.store.boards.data.get(self.selected_board) else {
                    return;
                };
                let (id, name) = (board.id, board.name.clone());
                self.store.board_id = id.to_string();
                self.store.sprint_name.clear();
                self.flash(format!("Board: {name}"));
                self.view_mode = ViewMode::Sprints;
                self.selected_sprint = 0;
                self.fetch_sprints();
            }
            _ => {}
        }
    }

    fn handle_export_key(&mut self, key: KeyAction) {
        let len = self.store.export().lines().len();
        match key {
            KeyAction::Up => self.selected_line = self.selected_line.saturating_sub(1),
            KeyAction::Down => self.selected_line = step_down(self.selected_line, len),
            KeyAction::Char(' ') | KeyAction::Select => {
                self.store.toggle_export_line(self.selected_line)
            }
            KeyAction::Char('a') => self.store.toggle_export_all(),
            KeyAction::Char('y') => self.copy_export(),
            KeyAction::Char(d @ '0'..='9') => {
                // 1..9 are the first nine fields, 0 the tenth.
                let index = digit_index(d).unwrap_or(ExportField::ALL.len() - 1);
                if let Some(field) = ExportField::ALL.get(index) {
                    self.store.toggle_export_field(*field);
                }
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyAction) {
        let Some(mut picker) = self.picker else {
            return;
        };
        let options = self.store.filter_options(picker.category);
        match key {
            KeyAction::Escape | KeyAction::Char('f') | KeyAction::Char('q') => {
                self.picker = None;
                return;
            }
            KeyAction::Left => {
                picker.category = picker.category.prev();
                picker.cursor = 0;
            }
            KeyAction::Right | KeyAction::Tab => {
                picker.category = picker.category.next();
                picker.cursor = 0;
            }
            KeyAction::Up => picker.cursor = picker.cursor.saturating_sub(1),
            KeyAction::Down => picker.cursor = step_down(picker.cursor, options.len()),
            KeyAction::Char(' ') | KeyAction::Select => {
                if let Some(value) = options.get(picker.cursor) {
                    self.store.toggle_filter(picker.category, value);
                }
            }
            KeyAction::Char('x') => self.store.clear_filter_category(picker.category),
            _ => {}
        }
        self.picker = Some(picker);
        self.clamp_selection();
    }

    fn open_input(&mut self, target: InputTarget) {
        let current = match target {
            InputTarget::Jql => self.store.jql.clone(),
            InputTarget::Search => self.store.filters().search_text.clone(),
            InputTarget::BoardId => self.store.board_id.clone(),
            InputTarget::SprintName => self.store.sprint_name.clone(),
        };
        self.input = Some(InputState {
            target,
            buffer: current.clone(),
            original: current,
        });
    }

    fn handle_input_key(&mut self, key: KeyAction) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match key {
            KeyAction::Char(c) => input.buffer.push(c),
            KeyAction::Backspace => {
                input.buffer.pop();
            }
            KeyAction::Select => {
                if let Some(input) = self.input.take() {
                    self.commit_input(input);
                }
                return;
            }
            KeyAction::Escape => {
                if let Some(input) = self.input.take() {
                    if input.target == InputTarget::Search {
                        self.store.set_search_text(input.original);
                        self.clamp_selection();
                    }
                }
                return;
            }
            _ => return,
        }

        // Search filters as you type.
        if input.target == InputTarget::Search {
            let text = input.buffer.clone();
            self.store.set_search_text(text);
            self.clamp_selection();
        }
    }

    fn commit_input(&mut self, input: InputState) {
        let value = input.buffer.trim().to_string();
        match input.target {
            InputTarget::Search => {}
            InputTarget::Jql => {
                self.store.jql = value;
                self.selected_issue = 0;
                self.fetch_issues();
            }
            InputTarget::BoardId => {
                self.store.board_id = value;
                self.selected_sprint = 0;
                self.fetch_sprints();
            }
            InputTarget::SprintName => {
                self.store.sprint_name = value;
                self.selected_sprint = 0;
                self.fetch_sprints();
            }
        }
    }

    fn copy_export(&mut self) {
        let count = self.store.export().selected_count();
        if count == 0 {
            self.flash("Nothing selected to copy");
            return;
        }
        let text = self.store.export().clipboard_text();
        match self.clipboard.copy(&text) {
            Ok(()) => self.flash(format!("Copied {count} lines to clipboard")),
            Err(e) => {
                tracing::warn!("Clipboard write failed: {e:#}");
                self.flash(format!("Copy failed: {e}"));
            }
        }
    }

    fn clamp_selection(&mut self) {
        let visible = self.store.visible_issues().len();
        self.selected_issue = clamp(self.selected_issue, visible);
        self.selected_line = clamp(self.selected_line, self.store.export().lines().len());
        let columns = self.store.kanban_columns();
        self.kanban_column = clamp(self.kanban_column, columns.len());
        let rows = columns.get(self.kanban_column).map_or(0, |c| c.issues.len());
        self.kanban_row = clamp(self.kanban_row, rows);
    }

    fn flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }
}

fn step_down(current: usize, len: usize) -> usize {
    if current + 1 < len {
        current + 1
    } else {
        current
    }
}

fn clamp(current: usize, len: usize) -> usize {
    current.min(len.saturating_sub(1))
}

/// '1' is index 0. '0' has no index.
fn digit_index(d: char) -> Option<usize> {
    d.to_digit(10).filter(|&n| n > 0).map(|n| n as usize - 1)
}

#[cfg(test)]
mod tests;
