use std::cmp::Ordering;

use crate::model::issue::Issue;
use crate::util::time::parse_timestamp;

/// Rank for statuses outside the table; sorts after every known one.
pub const UNRANKED: u32 = 99;

const STATUS_RANKS: [(&str, u32); 11] = [
    ("resolved", 1),
    ("regression testing", 2),
    ("test done", 3),
    ("testing", 4),
    ("ready to test", 5),
    ("review done", 6),
    ("in review", 7),
    ("in progress", 8),
    ("to do", 9),
    ("open", 10),
    ("cancelled", 11),
];

const PRIORITY_RANKS: [(&str, u32); 5] = [
    ("highest", 1),
    ("high", 2),
    ("medium", 3),
    ("low", 4),
    ("lowest", 5),
];

pub fn status_rank(status: &str) -> u32 {
    rank(&STATUS_RANKS, status)
}

pub fn priority_rank(priority: &str) -> u32 {
    rank(&PRIORITY_RANKS, priority)
}

fn rank(table: &[(&str, u32)], value: &str) -> u32 {
    let value = value.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map_or(UNRANKED, |(_, r)| *r)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Key,
    Summary,
    Status,
    Priority,
    Assignee,
    Sprint,
    IssueType,
    Created,
    Updated,
}

impl SortColumn {
    pub const ALL: [SortColumn; 9] = [
        SortColumn::Key,
        SortColumn::Summary,
        SortColumn::Status,
        SortColumn::Priority,
        SortColumn::Assignee,
        SortColumn::Sprint,
        SortColumn::IssueType,
        SortColumn::Created,
        SortColumn::Updated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Key => "Key",
            SortColumn::Summary => "Summary",
            SortColumn::Status => "Status",
            SortColumn::Priority => "Priority",
            SortColumn::Assignee => "Assignee",
            SortColumn::Sprint => "Sprint",
            SortColumn::IssueType => "Type",
            SortColumn::Created => "Created",
            SortColumn::Updated => "Updated",
        }
    }

    pub fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            SortColumn::Key => a.key.cmp(&b.key),
            SortColumn::Summary => a.summary.cmp(&b.summary),
            SortColumn::IssueType => a.issue_type.cmp(&b.issue_type),
            SortColumn::Status => status_rank(&a.status).cmp(&status_rank(&b.status)),
            SortColumn::Priority => priority_rank(&a.priority).cmp(&priority_rank(&b.priority)),
            SortColumn::Assignee => assignee_key(a).cmp(assignee_key(b)),
            SortColumn::Sprint => sprint_key(a).cmp(sprint_key(b)),
            SortColumn::Created => parse_timestamp(&a.created).cmp(&parse_timestamp(&b.created)),
            SortColumn::Updated => parse_timestamp(&a.updated).cmp(&parse_timestamp(&b.updated)),
        }
    }
}

fn assignee_key(issue: &Issue) -> &str {
    issue
        .assignee
        .as_ref()
        .map_or("", |a| a.display_name.as_str())
}

fn sprint_key(issue: &Issue) -> &str {
    issue.sprint_name().unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Selecting the current column flips direction; a new column starts ascending.
    pub fn toggle(current: Option<SortState>, column: SortColumn) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                direction: state.direction.flipped(),
            },
            _ => SortState {
                column,
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Stable in both directions: equal keys keep their incoming order.
/// `None` leaves the fetch order untouched.
pub fn sort_issues(issues: &mut [&Issue], sort: Option<SortState>) {
    let Some(SortState { column, direction }) = sort else {
        return;
    };
    issues.sort_by(|a, b| {
        let ord = column.compare(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
