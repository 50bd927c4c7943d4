use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ViewMode};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.picker.is_some() {
        spans.push(hint("←→", "category"));
        spans.push(hint("↑↓", "navigate"));
        spans.push(hint("space", "toggle"));
        spans.push(hint("x", "clear"));
        spans.push(hint("esc", "close"));
    } else {
        match app.view_mode {
            ViewMode::Issues => {
                spans.push(hint("↑↓", "navigate"));
                spans.push(hint("1-9", "sort"));
                spans.push(hint("/", "search"));
                spans.push(hint("f", "filters"));
                spans.push(hint("c", "clear"));
                spans.push(hint("j", "jql"));
                spans.push(hint("r", "refresh"));
            }
            ViewMode::Kanban => {
                spans.push(hint("←→", "column"));
                spans.push(hint("↑↓", "navigate"));
                spans.push(hint("r", "refresh"));
            }
            ViewMode::Sprints => {
                spans.push(hint("↑↓", "navigate"));
                spans.push(hint("b", "board id"));
                spans.push(hint("n", "name"));
                spans.push(hint("r", "search"));
            }
            ViewMode::Boards => {
                spans.push(hint("↑↓", "navigate"));
                spans.push(hint("enter", "sprints"));
                spans.push(hint("r", "refresh"));
            }
            ViewMode::Export => {
                spans.push(hint("↑↓", "navigate"));
                spans.push(hint("space", "toggle"));
                spans.push(hint("a", "all"));
                spans.push(hint("0-9", "fields"));
                spans.push(hint("y", "copy"));
            }
        }
        spans.push(hint("tab", "view"));
        spans.push(hint("q", "quit"));
    }

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg,
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(ratatui::style::Color::DarkGray),
    )
}
