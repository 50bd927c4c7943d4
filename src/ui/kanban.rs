use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::ui::render_slot_error;
use crate::ui::theme::{priority_color, status_color, ACCENT, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if render_slot_error(f, area, "Kanban", &app.store.issues) {
        return;
    }

    let columns = app.store.kanban_columns();
    if columns.is_empty() {
        return;
    }
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns.iter().map(|_| Constraint::Ratio(1, columns.len() as u32)))
        .split(area);

    for (i, column) in columns.iter().enumerate() {
        let focused = i == app.kanban_column;
        let width = areas[i].width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = column
            .issues
            .iter()
            .map(|issue| {
                let summary: String = issue.summary.chars().take(width).collect();
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(issue.key.as_str(), Style::default().fg(ACCENT)),
                        Span::raw(" "),
                        Span::styled(
                            issue.priority.as_str(),
                            Style::default().fg(priority_color(&issue.priority)),
                        ),
                    ]),
                    Line::raw(summary),
                    Line::styled(issue.assignee_name(), Style::default().fg(MUTED)),
                ])
            })
            .collect();

        let border = if focused { ACCENT } else { MUTED };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(Span::styled(
                        format!(" {} ({}) ", column.title, column.issues.len()),
                        Style::default().fg(status_color(column.title)),
                    )),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        if focused {
            state.select(Some(app.kanban_row));
        }
        f.render_stateful_widget(list, areas[i], &mut state);
    }
}
