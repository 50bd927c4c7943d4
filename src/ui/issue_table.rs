use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::model::issue::{Issue, NO_SPRINT};
use crate::pipeline::sort::SortColumn;
use crate::ui::theme::{priority_color, remark_color, status_color, ACCENT, MUTED};
use crate::ui::{render_slot_error, slot_title};
use crate::util::time::format_date;

const WIDTHS: [Constraint; 9] = [
    Constraint::Length(11),
    Constraint::Min(20),
    Constraint::Length(14),
    Constraint::Length(8),
    Constraint::Length(16),
    Constraint::Length(14),
    Constraint::Length(8),
    Constraint::Length(12),
    Constraint::Length(12),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let slot = &app.store.issues;
    if render_slot_error(f, area, "Issues", slot) {
        return;
    }

    let sort = app.store.sort();
    let header = Row::new(SortColumn::ALL.iter().enumerate().map(|(i, column)| {
        let arrow = sort
            .filter(|s| s.column == *column)
            .map_or("", |s| s.direction.arrow());
        Cell::from(format!("{} {} {arrow}", i + 1, column.label()))
    }))
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let visible = app.store.visible_issues();
    let rows: Vec<Row> = visible.iter().map(|issue| issue_row(issue)).collect();

    let filters = app.store.filters();
    let mut title = slot_title("Issues", slot, visible.len());
    if !filters.is_empty() {
        title = format!("{title}of {} (filtered) ", slot.data.len());
    }

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(app.selected_issue));
    f.render_stateful_widget(table, area, &mut state);
}

fn issue_row(issue: &Issue) -> Row<'_> {
    let remarks: Vec<Span> = issue
        .remarks()
        .into_iter()
        .map(|r| Span::styled("● ", Style::default().fg(remark_color(r))))
        .collect();

    Row::new(vec![
        Cell::from(issue.key.as_str()),
        Cell::from(Line::from(
            [remarks, vec![Span::raw(issue.summary.as_str())]].concat(),
        )),
        Cell::from(issue.status.as_str()).style(Style::default().fg(status_color(&issue.status))),
        Cell::from(issue.priority.as_str())
            .style(Style::default().fg(priority_color(&issue.priority))),
        Cell::from(issue.assignee_name()),
        Cell::from(issue.sprint_name().unwrap_or(NO_SPRINT)).style(Style::default().fg(MUTED)),
        Cell::from(issue.issue_type.as_str()),
        Cell::from(format_date(&issue.created)),
        Cell::from(format_date(&issue.updated)),
    ])
}
