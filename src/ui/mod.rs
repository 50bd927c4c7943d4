pub mod board_list;
pub mod detail_panel;
pub mod export_panel;
pub mod filter_picker;
pub mod footer;
pub mod input_bar;
pub mod issue_table;
pub mod kanban;
pub mod sprint_list;
pub mod summary_panel;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, ViewMode};
use crate::store::RequestSlot;
use theme::{ACCENT, MUTED};

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    // Input bar (3) while typing, else footer (1)
    let bottom_height = if app.input.is_some() { 3 } else { 1 };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(bottom_height),
        ])
        .split(size);

    render_tabs(f, vertical[0], app);
    let main_area = vertical[1];

    match app.view_mode {
        ViewMode::Issues => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(main_area);
            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(6), Constraint::Length(7)])
                .split(horizontal[1]);

            issue_table::render(f, horizontal[0], app);
            detail_panel::render(f, side[0], app, app.selected_issue());
            summary_panel::render(f, side[1], app);
        }
        ViewMode::Kanban => {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(6), Constraint::Length(9)])
                .split(main_area);
            kanban::render(f, vertical[0], app);
            detail_panel::render(f, vertical[1], app, app.selected_kanban_issue());
        }
        ViewMode::Sprints => sprint_list::render(f, main_area, app),
        ViewMode::Boards => board_list::render(f, main_area, app),
        ViewMode::Export => export_panel::render(f, main_area, app),
    }

    if app.picker.is_some() {
        filter_picker::render(f, centered(main_area, 60, 70), app);
    }

    if app.input.is_some() {
        input_bar::render(f, vertical[2], app);
    } else {
        footer::render(f, vertical[2], app);
    }
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = ViewMode::ALL
        .iter()
        .map(|v| Line::from(format!(" {} ", v.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.view_mode.index())
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider("|");
    f.render_widget(tabs, area);
}

/// Block title for a panel backed by a request slot.
pub(crate) fn slot_title<T>(name: &str, slot: &RequestSlot<T>, count: usize) -> String {
    if slot.loading {
        format!(" {name} (loading...) ")
    } else {
        format!(" {name} ({count}) ")
    }
}

/// Renders the slot's error in place of the panel body. Returns true if it did.
pub(crate) fn render_slot_error<T>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    slot: &RequestSlot<T>,
) -> bool {
    let Some(error) = &slot.error else {
        return false;
    };
    let paragraph = Paragraph::new(vec![
        Line::styled(error.as_str(), Style::default().fg(ratatui::style::Color::Red)),
        Line::raw(""),
        Line::styled("Press r to retry", Style::default().fg(MUTED)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Red))
            .title(format!(" {title} ")),
    );
    f.render_widget(paragraph, area);
    true
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
