use serde::{Deserialize, Serialize};

use super::approval::{approval_flags, ApprovalFlags, Remark};

/// Display value for an issue with no assignee. Never stored on the issue itself.
pub const UNASSIGNED: &str = "Unassigned";

/// Filter/display value for an issue that belongs to no sprint.
pub const NO_SPRINT: &str = "No Sprint";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub display_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintRef {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub issue_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Person>,
    pub reporter: Person,
    pub created: String,
    pub updated: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<SprintRef>,
}

impl Issue {
    /// Assignee display name, or "Unassigned".
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map_or(UNASSIGNED, |a| a.display_name.as_str())
    }

    pub fn sprint_name(&self) -> Option<&str> {
        self.sprint.as_ref().map(|s| s.name.as_str())
    }

    /// Approval flags, recomputed from type/status/labels on every call.
    pub fn approvals(&self) -> ApprovalFlags {
        approval_flags(self)
    }

    pub fn remarks(&self) -> Vec<Remark> {
        self.approvals().remarks()
    }

    pub fn browse_url(&self, base_url: &str) -> String {
        browse_url(base_url, &self.key)
    }
}

pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{key}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
pub(crate) fn test_issue(key: &str) -> Issue {
    Issue {
        id: key.trim_start_matches(|c: char| !c.is_ascii_digit()).to_string(),
        key: key.to_string(),
        summary: format!("Summary of {key}"),
        status: "Open".into(),
        priority: "Medium".into(),
        issue_type: "Task".into(),
        created: "2024-01-01T00:00:00.000+0000".into(),
        updated: "2024-01-01T00:00:00.000+0000".into(),
        ..Issue::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_is_display_only() {
        let mut issue = test_issue("PROJ-1");
        assert_eq!(issue.assignee_name(), UNASSIGNED);
        assert!(issue.assignee.is_none());

        issue.assignee = Some(Person {
            display_name: "Alice".into(),
            email_address: "alice@example.com".into(),
        });
        assert_eq!(issue.assignee_name(), "Alice");
    }

    #[test]
    fn browse_url_trims_trailing_slash() {
        let issue = test_issue("PROJ-123");
        assert_eq!(
            issue.browse_url("https://example.atlassian.net/"),
            "https://example.atlassian.net/browse/PROJ-123"
        );
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_assignee() {
        let issue = test_issue("PROJ-7");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"issueType\""));
        assert!(!json.contains("assignee"));
        assert!(!json.contains("sprint"));
    }
}
