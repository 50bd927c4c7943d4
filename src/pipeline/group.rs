use std::cmp::Reverse;

use crate::model::issue::Issue;
use crate::util::time::parse_timestamp;

/// Kanban columns, left to right.
pub const BOARD_COLUMNS: [&str; 9] = [
    "Resolved",
    "Regression Testing",
    "Test Done",
    "Testing",
    "Ready to Test",
    "Review Done",
    "In Review",
    "In Progress",
    "Open",
];

pub const OTHER_COLUMN: &str = "Other";

#[derive(Debug, Clone)]
pub struct StatusColumn<'a> {
    pub title: &'static str,
    pub issues: Vec<&'a Issue>,
}

/// Group issues into the fixed board columns. Unknown statuses land in a
/// trailing "Other" column, present only when non-empty. Each column lists
/// newest `created` first.
pub fn group_by_status<'a>(issues: &[&'a Issue]) -> Vec<StatusColumn<'a>> {
    let mut columns: Vec<StatusColumn<'a>> = BOARD_COLUMNS
        .iter()
        .map(|&title| StatusColumn {
            title,
            issues: Vec::new(),
        })
        .collect();
    let mut other = StatusColumn {
        title: OTHER_COLUMN,
        issues: Vec::new(),
    };

    for &issue in issues {
        match columns
            .iter_mut()
            .find(|c| c.title.eq_ignore_ascii_case(&issue.status))
        {
            Some(column) => column.issues.push(issue),
            None => other.issues.push(issue),
        }
    }

    if !other.issues.is_empty() {
        columns.push(other);
    }
    for column in &mut columns {
        column
            .issues
            .sort_by_key(|i| Reverse(parse_timestamp(&i.created)));
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::test_issue;

    fn issue(key: &str, status: &str, created: &str) -> Issue {
        let mut issue = test_issue(key);
        issue.status = status.into();
        issue.created = created.into();
        issue
    }

    #[test]
    fn fixed_columns_always_present() {
        let columns = group_by_status(&[]);
        assert_eq!(columns.len(), BOARD_COLUMNS.len());
        assert!(columns.iter().all(|c| c.issues.is_empty()));
    }

    #[test]
    fn unknown_status_goes_to_other() {
        let blocked = issue("A-1", "Blocked", "2024-01-01T00:00:00Z");
        let open = issue("A-2", "open", "2024-01-01T00:00:00Z");
        let columns = group_by_status(&[&blocked, &open]);
        assert_eq!(columns.last().unwrap().title, OTHER_COLUMN);
        assert_eq!(columns.last().unwrap().issues[0].key, "A-1");
        let open_col = columns.iter().find(|c| c.title == "Open").unwrap();
        assert_eq!(open_col.issues.len(), 1);
    }

    #[test]
    fn newest_first_within_column() {
        let old = issue("A-1", "Testing", "2024-01-01T00:00:00Z");
        let new = issue("A-2", "Testing", "2024-03-01T00:00:00Z");
        let columns = group_by_status(&[&old, &new]);
        let testing = columns.iter().find(|c| c.title == "Testing").unwrap();
        let keys: Vec<&str> = testing.issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["A-2", "A-1"]);
    }
}
