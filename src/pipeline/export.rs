//! Clipboard export: one configurable text line per issue, each line
//! individually selectable.

use std::collections::{BTreeSet, HashMap};

use crate::model::issue::{browse_url, Issue, NO_SPRINT};
use crate::util::time::format_date;

pub const DELIMITER: &str = ", ";
pub const NO_REMARKS: &str = "No remarks";
const REMARK_SEPARATOR: &str = " / ";

/// Exportable fields; declaration order is the fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportField {
    Key,
    Status,
    Assignee,
    Summary,
    Remarks,
    Priority,
    Sprint,
    IssueType,
    Created,
    Updated,
}

impl ExportField {
    pub const ALL: [ExportField; 10] = [
        ExportField::Key,
        ExportField::Status,
        ExportField::Assignee,
        ExportField::Summary,
        ExportField::Remarks,
        ExportField::Priority,
        ExportField::Sprint,
        ExportField::IssueType,
        ExportField::Created,
        ExportField::Updated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExportField::Key => "Key",
            ExportField::Status => "Status",
            ExportField::Assignee => "Assignee",
            ExportField::Summary => "Summary",
            ExportField::Remarks => "Remarks",
            ExportField::Priority => "Priority",
            ExportField::Sprint => "Sprint",
            ExportField::IssueType => "Type",
            ExportField::Created => "Created",
            ExportField::Updated => "Updated",
        }
    }

    fn render(&self, issue: &Issue, base_url: &str) -> String {
        match self {
            ExportField::Key => browse_url(base_url, &issue.key),
            ExportField::Status => issue.status.clone(),
            ExportField::Assignee => issue.assignee_name().to_string(),
            ExportField::Summary => issue.summary.clone(),
            ExportField::Remarks => {
                let remarks = issue.remarks();
                if remarks.is_empty() {
                    NO_REMARKS.to_string()
                } else {
                    remarks
                        .iter()
                        .map(|r| r.label())
                        .collect::<Vec<_>>()
                        .join(REMARK_SEPARATOR)
                }
            }
            ExportField::Priority => issue.priority.clone(),
            ExportField::Sprint => issue.sprint_name().unwrap_or(NO_SPRINT).to_string(),
            ExportField::IssueType => issue.issue_type.clone(),
            ExportField::Created => format_date(&issue.created),
            ExportField::Updated => format_date(&issue.updated),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    enabled: BTreeSet<ExportField>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::with_fields([
            ExportField::Key,
            ExportField::Status,
            ExportField::Assignee,
            ExportField::Summary,
            ExportField::Remarks,
        ])
    }
}

impl ExportConfig {
    pub fn with_fields(fields: impl IntoIterator<Item = ExportField>) -> Self {
        Self {
            enabled: fields.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, field: ExportField) -> bool {
        self.enabled.contains(&field)
    }

    pub fn toggle(&mut self, field: ExportField) {
        if !self.enabled.remove(&field) {
            self.enabled.insert(field);
        }
    }

    pub fn render_line(&self, issue: &Issue, base_url: &str) -> String {
        self.enabled
            .iter()
            .map(|field| field.render(issue, base_url))
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub key: String,
    pub text: String,
    pub selected: bool,
}

/// Export order is always assignee name ascending, whatever the table shows.
pub fn export_order<'a>(issues: &[&'a Issue]) -> Vec<&'a Issue> {
    let mut ordered = issues.to_vec();
    ordered.sort_by(|a, b| a.assignee_name().cmp(b.assignee_name()));
    ordered
}

#[derive(Debug, Clone)]
pub struct ExportSheet {
    pub config: ExportConfig,
    base_url: String,
    lines: Vec<ExportLine>,
    /// Selection by key, including keys currently filtered out of `lines`.
    selection: HashMap<String, bool>,
}

impl ExportSheet {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ExportConfig::default(),
            base_url: base_url.into(),
            lines: Vec::new(),
            selection: HashMap::new(),
        }
    }

    pub fn lines(&self) -> &[ExportLine] {
        &self.lines
    }

    /// Rebuild every line from `issues`, keeping the selection of any key
    /// seen before, even if a filter hid it in between. New keys start
    /// selected.
    pub fn regenerate(&mut self, issues: &[&Issue]) {
        for line in self.lines.drain(..) {
            self.selection.insert(line.key, line.selected);
        }

        self.lines = export_order(issues)
            .into_iter()
            .map(|issue| ExportLine {
                key: issue.key.clone(),
                text: self.config.render_line(issue, &self.base_url),
                selected: self.selection.get(&issue.key).copied().unwrap_or(true),
            })
            .collect();
    }

    /// Drop remembered selection for keys no longer in the fetched set.
    pub fn forget_except<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for line in &self.lines {
            self.selection.insert(line.key.clone(), line.selected);
        }
        let known: BTreeSet<&str> = keys.into_iter().collect();
        self.selection.retain(|key, _| known.contains(key.as_str()));
    }

    pub fn toggle_field(&mut self, field: ExportField, issues: &[&Issue]) {
        self.config.toggle(field);
        self.regenerate(issues);
    }

    pub fn toggle_line(&mut self, index: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            line.selected = !line.selected;
        }
    }

    pub fn set_all(&mut self, selected: bool) {
        self.lines.iter_mut().for_each(|l| l.selected = selected);
    }

    /// The "select all" checkbox state.
    pub fn all_selected(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.selected)
    }

    pub fn toggle_all(&mut self) {
        let target = !self.all_selected();
        self.set_all(target);
    }

    pub fn selected_count(&self) -> usize {
        self.lines.iter().filter(|l| l.selected).count()
    }

    pub fn clipboard_text(&self) -> String {
        self.lines
            .iter()
            .filter(|l| l.selected)
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
