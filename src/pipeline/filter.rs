use std::collections::BTreeSet;

use crate::model::approval::Remark;
use crate::model::issue::{Issue, NO_SPRINT, UNASSIGNED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Status,
    Assignee,
    Sprint,
    Approval,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::Status,
        FilterCategory::Assignee,
        FilterCategory::Sprint,
        FilterCategory::Approval,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::Status => "Status",
            FilterCategory::Assignee => "Assignee",
            FilterCategory::Sprint => "Sprint",
            FilterCategory::Approval => "Approval",
        }
    }

    pub fn next(&self) -> FilterCategory {
        let idx = FilterCategory::ALL.iter().position(|c| c == self).unwrap_or(0);
        FilterCategory::ALL[(idx + 1) % FilterCategory::ALL.len()]
    }

    pub fn prev(&self) -> FilterCategory {
        let len = FilterCategory::ALL.len();
        let idx = FilterCategory::ALL.iter().position(|c| c == self).unwrap_or(0);
        FilterCategory::ALL[(idx + len - 1) % len]
    }
}

/// Conjunctive across categories, disjunctive within one. An empty
/// category matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub statuses: BTreeSet<String>,
    pub assignees: BTreeSet<String>,
    pub sprints: BTreeSet<String>,
    pub remarks: BTreeSet<Remark>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.statuses.is_empty()
            && self.assignees.is_empty()
            && self.sprints.is_empty()
            && self.remarks.is_empty()
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        match category {
            FilterCategory::Status => self.statuses.contains(value),
            FilterCategory::Assignee => self.assignees.contains(value),
            FilterCategory::Sprint => self.sprints.contains(value),
            FilterCategory::Approval => {
                Remark::from_label(value).is_some_and(|r| self.remarks.contains(&r))
            }
        }
    }

    pub fn selected_count(&self, category: FilterCategory) -> usize {
        match category {
            FilterCategory::Status => self.statuses.len(),
            FilterCategory::Assignee => self.assignees.len(),
            FilterCategory::Sprint => self.sprints.len(),
            FilterCategory::Approval => self.remarks.len(),
        }
    }

    /// Add the value to the category's selection, or remove it if present.
    pub fn toggle(&mut self, category: FilterCategory, value: &str) {
        fn flip(set: &mut BTreeSet<String>, value: &str) {
            if !set.remove(value) {
                set.insert(value.to_string());
            }
        }
        match category {
            FilterCategory::Status => flip(&mut self.statuses, value),
            FilterCategory::Assignee => flip(&mut self.assignees, value),
            FilterCategory::Sprint => flip(&mut self.sprints, value),
            FilterCategory::Approval => {
                if let Some(remark) = Remark::from_label(value) {
                    if !self.remarks.remove(&remark) {
                        self.remarks.insert(remark);
                    }
                }
            }
        }
    }

    pub fn clear_category(&mut self, category: FilterCategory) {
        match category {
            FilterCategory::Status => self.statuses.clear(),
            FilterCategory::Assignee => self.assignees.clear(),
            FilterCategory::Sprint => self.sprints.clear(),
            FilterCategory::Approval => self.remarks.clear(),
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_text(issue)
            && (self.statuses.is_empty() || self.statuses.contains(&issue.status))
            && (self.assignees.is_empty() || self.assignees.contains(issue.assignee_name()))
            && self.matches_sprint(issue)
            && (self.remarks.is_empty()
                || issue.remarks().iter().any(|r| self.remarks.contains(r)))
    }

    fn matches_text(&self, issue: &Issue) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&issue.key, &issue.summary, &issue.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_sprint(&self, issue: &Issue) -> bool {
        if self.sprints.is_empty() {
            return true;
        }
        match issue.sprint_name() {
            Some(name) => self.sprints.contains(name),
            None => self.sprints.contains(NO_SPRINT),
        }
    }
}

pub fn filter_issues<'a>(issues: &'a [Issue], filters: &FilterState) -> Vec<&'a Issue> {
    issues.iter().filter(|i| filters.matches(i)).collect()
}

/// Values a category can be filtered on, given the loaded issues.
pub fn options(issues: &[Issue], category: FilterCategory) -> Vec<String> {
    match category {
        FilterCategory::Status => distinct(issues.iter().map(|i| i.status.as_str())),
        FilterCategory::Assignee => {
            let mut names = distinct(
                issues
                    .iter()
                    .filter_map(|i| i.assignee.as_ref())
                    .map(|a| a.display_name.as_str()),
            );
            if issues.iter().any(|i| i.assignee.is_none()) {
                names.push(UNASSIGNED.to_string());
            }
            names
        }
        FilterCategory::Sprint => {
            let mut names = distinct(issues.iter().filter_map(Issue::sprint_name));
            names.push(NO_SPRINT.to_string());
            names
        }
        FilterCategory::Approval => Remark::ALL.iter().map(|r| r.label().to_string()).collect(),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
