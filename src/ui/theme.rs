use ratatui::style::Color;

use crate::model::approval::Remark;
use crate::model::sprint::SprintState;

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const LINK: Color = Color::Blue;

pub fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "resolved" | "test done" => Color::Green,
        "regression testing" | "testing" | "ready to test" => Color::Magenta,
        "review done" | "in review" => Color::Cyan,
        "in progress" => Color::Yellow,
        "open" | "to do" => Color::Gray,
        "cancelled" => Color::DarkGray,
        _ => Color::White,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority.to_lowercase().as_str() {
        "highest" => Color::Red,
        "high" => Color::LightRed,
        "medium" => Color::Yellow,
        "low" => Color::Blue,
        "lowest" => Color::Gray,
        _ => Color::Gray,
    }
}

pub fn sprint_state_color(state: SprintState) -> Color {
    match state {
        SprintState::Active => Color::Green,
        SprintState::Future => Color::Blue,
        SprintState::Closed => Color::DarkGray,
        SprintState::Unknown => Color::Gray,
    }
}

pub fn remark_color(remark: Remark) -> Color {
    match remark {
        Remark::PmApprove => Color::LightRed,
        Remark::PostCheck => Color::Yellow,
        Remark::TestResult => Color::LightMagenta,
    }
}
