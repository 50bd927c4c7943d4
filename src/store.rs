//! Dashboard state container. One instance per session; owned by `App`
//! and mutated synchronously from the reducer.

use crate::model::approval::{summarize, ApprovalSummary};
use crate::model::issue::Issue;
use crate::model::sprint::{order_sprints, Board, Sprint};
use crate::pipeline::export::{ExportField, ExportSheet};
use crate::pipeline::filter::{filter_issues, options, FilterCategory, FilterState};
use crate::pipeline::group::{group_by_status, StatusColumn};
use crate::pipeline::sort::{sort_issues, SortColumn, SortState};

pub const ISSUES_ERROR: &str = "Failed to fetch issues. Please check your connection and try again.";
pub const SPRINTS_ERROR: &str = "Failed to fetch sprints. Please check your connection and try again.";
pub const BOARDS_ERROR: &str = "Failed to fetch boards. Please check your connection and try again.";

/// Loading/error state for one kind of request.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    latest: u64,
}

impl<T> RequestSlot<T> {
    /// Mark a new request in flight and return its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.loading = true;
        self.error = None;
        self.latest
    }

    /// Apply a completion. Returns false (and changes nothing) when a newer
    /// request has been started since `seq` was issued.
    pub fn finish(&mut self, seq: u64, result: Result<T, String>, failure: &str) -> bool {
        if seq != self.latest {
            tracing::debug!(seq, latest = self.latest, "Dropping stale response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(detail) => {
                tracing::warn!("{failure} ({detail})");
                self.error = Some(failure.to_string());
            }
        }
        true
    }

    /// True until the first request of this kind is issued.
    pub fn is_untouched(&self) -> bool {
        self.latest == 0
    }
}

pub struct DashboardStore {
    pub issues: RequestSlot<Vec<Issue>>,
    pub sprints: RequestSlot<Vec<Sprint>>,
    pub boards: RequestSlot<Vec<Board>>,
    pub jql: String,
    pub board_id: String,
    pub sprint_name: String,
    filters: FilterState,
    sort: Option<SortState>,
    export: ExportSheet,
    browse_base_url: String,
}

impl DashboardStore {
    pub fn new(jql: impl Into<String>, board_id: i64, browse_base_url: impl Into<String>) -> Self {
        let browse_base_url = browse_base_url.into();
        Self {
            issues: RequestSlot::default(),
            sprints: RequestSlot::default(),
            boards: RequestSlot::default(),
            jql: jql.into(),
            board_id: board_id.to_string(),
            sprint_name: String::new(),
            filters: FilterState::default(),
            sort: None,
            export: ExportSheet::new(browse_base_url.clone()),
            browse_base_url,
        }
    }

    pub fn browse_base_url(&self) -> &str {
        &self.browse_base_url
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn export(&self) -> &ExportSheet {
        &self.export
    }

    /// Filtered, then sorted. This is what the table, kanban and export see.
    pub fn visible_issues(&self) -> Vec<&Issue> {
        visible(&self.issues.data, &self.filters, self.sort)
    }

    /// Counts over the full fetched set, ignoring filters.
    pub fn approval_summary(&self) -> ApprovalSummary {
        summarize(&self.issues.data)
    }

    pub fn kanban_columns(&self) -> Vec<StatusColumn<'_>> {
        group_by_status(&self.visible_issues())
    }

    pub fn filter_options(&self, category: FilterCategory) -> Vec<String> {
        options(&self.issues.data, category)
    }

    pub fn finish_issues(&mut self, seq: u64, result: Result<Vec<Issue>, String>) {
        if self.issues.finish(seq, result, ISSUES_ERROR) {
            self.export
                .forget_except(self.issues.data.iter().map(|i| i.key.as_str()));
            self.sync_export();
        }
    }

    pub fn finish_sprints(&mut self, seq: u64, result: Result<Vec<Sprint>, String>) {
        let result = result.map(|mut sprints| {
            order_sprints(&mut sprints);
            sprints
        });
        self.sprints.finish(seq, result, SPRINTS_ERROR);
    }

    pub fn finish_boards(&mut self, seq: u64, result: Result<Vec<Board>, String>) {
        self.boards.finish(seq, result, BOARDS_ERROR);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
        self.sync_export();
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) {
        self.filters.toggle(category, value);
        self.sync_export();
    }

    pub fn clear_filter_category(&mut self, category: FilterCategory) {
        self.filters.clear_category(category);
        self.sync_export();
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.sync_export();
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = Some(SortState::toggle(self.sort, column));
        self.sync_export();
    }

    pub fn toggle_export_field(&mut self, field: ExportField) {
        let visible = visible(&self.issues.data, &self.filters, self.sort);
        self.export.toggle_field(field, &visible);
    }

    pub fn toggle_export_line(&mut self, index: usize) {
        self.export.toggle_line(index);
    }

    pub fn toggle_export_all(&mut self) {
        self.export.toggle_all();
    }

    /// Board id input parsed as a number, if it is one.
    pub fn parsed_board_id(&self) -> Option<i64> {
        self.board_id.trim().parse().ok()
    }

    fn sync_export(&mut self) {
        let visible = visible(&self.issues.data, &self.filters, self.sort);
        self.export.regenerate(&visible);
    }
}

fn visible<'a>(issues: &'a [Issue], filters: &FilterState, sort: Option<SortState>) -> Vec<&'a Issue> {
    let mut shown = filter_issues(issues, filters);
    sort_issues(&mut shown, sort);
    shown
}
