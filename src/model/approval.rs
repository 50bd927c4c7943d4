//! Approval gaps derived from an issue's type, status and labels.
//!
//! Nothing here is stored: flags are recomputed from the source fields
//! every time they are read. Label matching is exact; type and status
//! matching is case-insensitive.

use std::fmt;

use serde::Serialize;

use super::issue::Issue;

pub const PM_APPROVED_LABEL: &str = "pm_approved";
pub const POST_CHECK_APPROVED_LABEL: &str = "post_check_approved";
pub const TEST_RESULT_APPROVED_LABEL: &str = "test_result_approved";

const PM_GATED_TYPES: [&str; 2] = ["story", "production bug"];
const CHECK_GATED_STATUSES: [&str; 2] = ["resolved", "testing"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Remark {
    PmApprove,
    PostCheck,
    TestResult,
}

impl Remark {
    pub const ALL: [Remark; 3] = [Remark::PmApprove, Remark::PostCheck, Remark::TestResult];

    pub fn label(&self) -> &'static str {
        match self {
            Remark::PmApprove => "Need PM Approve",
            Remark::PostCheck => "Need Post check",
            Remark::TestResult => "Need test result",
        }
    }

    pub fn from_label(label: &str) -> Option<Remark> {
        Remark::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalFlags {
    pub pm_approval_required: bool,
    pub post_check_approval_required: bool,
    pub test_result_approval_required: bool,
}

impl ApprovalFlags {
    pub fn compute(issue_type: &str, status: &str, labels: &[String]) -> Self {
        let has_label = |wanted: &str| labels.iter().any(|l| l == wanted);
        let pm_gated = PM_GATED_TYPES.contains(&issue_type.to_lowercase().as_str());
        let check_gated = CHECK_GATED_STATUSES.contains(&status.to_lowercase().as_str());

        Self {
            pm_approval_required: pm_gated && !has_label(PM_APPROVED_LABEL),
            post_check_approval_required: check_gated && !has_label(POST_CHECK_APPROVED_LABEL),
            test_result_approval_required: check_gated && !has_label(TEST_RESULT_APPROVED_LABEL),
        }
    }

    pub fn is_required(&self, remark: Remark) -> bool {
        match remark {
            Remark::PmApprove => self.pm_approval_required,
            Remark::PostCheck => self.post_check_approval_required,
            Remark::TestResult => self.test_result_approval_required,
        }
    }

    /// Outstanding remarks in their fixed display order.
    pub fn remarks(&self) -> Vec<Remark> {
        Remark::ALL
            .into_iter()
            .filter(|r| self.is_required(*r))
            .collect()
    }
}

pub fn approval_flags(issue: &Issue) -> ApprovalFlags {
    ApprovalFlags::compute(&issue.issue_type, &issue.status, &issue.labels)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalSummary {
    pub total: usize,
    pub pm_approval: usize,
    pub post_check: usize,
    pub test_result: usize,
}

pub fn summarize<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> ApprovalSummary {
    issues
        .into_iter()
        .fold(ApprovalSummary::default(), |mut acc, issue| {
            let flags = issue.approvals();
            acc.total += 1;
            acc.pm_approval += usize::from(flags.pm_approval_required);
            acc.post_check += usize::from(flags.post_check_approval_required);
            acc.test_result += usize::from(flags.test_result_approval_required);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::test_issue;

    fn labels(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn story_without_pm_label_needs_pm_approval() {
        let flags = ApprovalFlags::compute("Story", "Open", &[]);
        assert!(flags.pm_approval_required);
        assert!(!flags.post_check_approval_required);
        assert!(!flags.test_result_approval_required);
    }

    #[test]
    fn pm_label_clears_pm_flag() {
        let flags = ApprovalFlags::compute("Production Bug", "Open", &labels(&["pm_approved"]));
        assert!(!flags.pm_approval_required);
    }

    #[test]
    fn label_match_is_case_sensitive() {
        let flags = ApprovalFlags::compute("Story", "Open", &labels(&["PM_APPROVED"]));
        assert!(flags.pm_approval_required);
    }

    #[test]
    fn type_and_status_match_ignores_case() {
        let flags = ApprovalFlags::compute("story", "TESTING", &[]);
        assert!(flags.pm_approval_required);
        assert!(flags.post_check_approval_required);
        assert!(flags.test_result_approval_required);
    }

    #[test]
    fn resolved_needs_checks_until_labelled() {
        let flags = ApprovalFlags::compute(
            "Task",
            "Resolved",
            &labels(&["post_check_approved"]),
        );
        assert!(!flags.pm_approval_required);
        assert!(!flags.post_check_approval_required);
        assert!(flags.test_result_approval_required);
        assert_eq!(flags.remarks(), vec![Remark::TestResult]);
    }

    #[test]
    fn flags_are_idempotent() {
        let mut issue = test_issue("PROJ-1");
        issue.issue_type = "Story".into();
        issue.status = "Testing".into();
        assert_eq!(issue.approvals(), issue.approvals());
    }

    #[test]
    fn flags_follow_label_changes() {
        let mut issue = test_issue("PROJ-1");
        issue.issue_type = "Story".into();
        assert!(issue.approvals().pm_approval_required);
        issue.labels.push(PM_APPROVED_LABEL.into());
        assert!(!issue.approvals().pm_approval_required);
    }

    #[test]
    fn remarks_keep_fixed_order() {
        let flags = ApprovalFlags::compute("Story", "Resolved", &[]);
        let remarks: Vec<&str> = flags.remarks().iter().map(|r| r.label()).collect();
        assert_eq!(remarks, vec!["Need PM Approve", "Need Post check", "Need test result"]);
    }

    #[test]
    fn remark_label_round_trip() {
        for remark in Remark::ALL {
            assert_eq!(Remark::from_label(remark.label()), Some(remark));
        }
        assert_eq!(Remark::from_label("No remarks"), None);
    }

    #[test]
    fn summary_counts_each_flag() {
        let mut story = test_issue("PROJ-1");
        story.issue_type = "Story".into();
        let mut testing = test_issue("PROJ-2");
        testing.status = "Testing".into();
        testing.labels = labels(&["test_result_approved"]);
        let plain = test_issue("PROJ-3");

        let summary = summarize([&story, &testing, &plain]);
        assert_eq!(
            summary,
            ApprovalSummary {
                total: 3,
                pm_approval: 1,
                post_check: 1,
                test_result: 0,
            }
        );
    }
}
