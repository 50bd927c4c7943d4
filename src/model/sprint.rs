use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Active,
    Future,
    Closed,
    #[serde(other)]
    Unknown,
}

impl SprintState {
    pub fn parse(s: &str) -> SprintState {
        match s.to_lowercase().as_str() {
            "active" => SprintState::Active,
            "future" => SprintState::Future,
            "closed" => SprintState::Closed,
            _ => SprintState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SprintState::Active => "active",
            SprintState::Future => "future",
            SprintState::Closed => "closed",
            SprintState::Unknown => "unknown",
        }
    }

    /// Listing order: active, then future, then closed.
    pub fn rank(&self) -> u8 {
        match self {
            SprintState::Active => 0,
            SprintState::Future => 1,
            SprintState::Closed => 2,
            SprintState::Unknown => 3,
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    pub state: SprintState,
    pub board_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl Sprint {
    pub fn phase(&self) -> SprintPhase {
        SprintPhase::classify(&self.name, self.goal.as_deref().unwrap_or_default())
    }
}

/// Sorts by state (active, future, closed) and then newest id first.
pub fn order_sprints(sprints: &mut [Sprint]) {
    sprints.sort_by(|a, b| {
        a.state
            .rank()
            .cmp(&b.state.rank())
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Rough phase of a sprint guessed from its name and goal text.
///
/// Plain substring matching on free text; treat the answer as a hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintPhase {
    Resolve,
    Regression,
    Testing,
    Other,
}

impl SprintPhase {
    pub fn classify(name: &str, goal: &str) -> SprintPhase {
        let text = format!("{name} {goal}").to_lowercase();
        if text.contains("regression") {
            SprintPhase::Regression
        } else if text.contains("resolve") {
            SprintPhase::Resolve
        } else if text.contains("test") {
            SprintPhase::Testing
        } else {
            SprintPhase::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SprintPhase::Resolve => "resolve",
            SprintPhase::Regression => "regression",
            SprintPhase::Testing => "testing",
            SprintPhase::Other => "-",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub board_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<BoardLocation>,
}

/// Planning-view URL for a board, optionally focused on one sprint.
pub fn sprint_board_url(base_url: &str, board_id: i64, sprint_id: Option<i64>) -> String {
    let base = base_url.trim_end_matches('/');
    match sprint_id {
        Some(id) => format!(
            "{base}/secure/RapidBoard.jspa?rapidView={board_id}&view=planning&selectedSprint={id}"
        ),
        None => format!("{base}/secure/RapidBoard.jspa?rapidView={board_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprint(id: i64, state: SprintState) -> Sprint {
        Sprint {
            id,
            name: format!("Sprint {id}"),
            state,
            board_id: 506,
            start_date: None,
            end_date: None,
            complete_date: None,
            goal: None,
        }
    }

    #[test]
    fn unknown_state_deserializes_gracefully() {
        let state: SprintState = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(state, SprintState::Unknown);
        assert_eq!(SprintState::parse("ACTIVE"), SprintState::Active);
    }

    #[test]
    fn orders_active_future_closed_then_newest() {
        let mut sprints = vec![
            sprint(1, SprintState::Closed),
            sprint(5, SprintState::Future),
            sprint(3, SprintState::Active),
            sprint(9, SprintState::Closed),
            sprint(4, SprintState::Future),
        ];
        order_sprints(&mut sprints);
        let ids: Vec<i64> = sprints.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 5, 4, 9, 1]);
    }

    #[test]
    fn phase_heuristic_reads_name_and_goal() {
        assert_eq!(SprintPhase::classify("Sprint 10", "Regression run"), SprintPhase::Regression);
        assert_eq!(SprintPhase::classify("Resolve week", ""), SprintPhase::Resolve);
        assert_eq!(SprintPhase::classify("QA", "Testing payments"), SprintPhase::Testing);
        assert_eq!(SprintPhase::classify("Sprint 11", ""), SprintPhase::Other);
    }

    #[test]
    fn board_url_with_and_without_sprint() {
        assert_eq!(
            sprint_board_url("https://x.atlassian.net", 506, Some(42)),
            "https://x.atlassian.net/secure/RapidBoard.jspa?rapidView=506&view=planning&selectedSprint=42"
        );
        assert_eq!(
            sprint_board_url("https://x.atlassian.net/", 506, None),
            "https://x.atlassian.net/secure/RapidBoard.jspa?rapidView=506"
        );
    }

    #[test]
    fn board_type_field_is_renamed() {
        let board: Board =
            serde_json::from_str(r#"{"id":506,"name":"POSC board","type":"scrum"}"#).unwrap();
        assert_eq!(board.board_type, "scrum");
        assert!(board.location.is_none());
    }
}
