use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::pipeline::export::ExportField;
use crate::ui::theme::{ACCENT, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let sheet = app.store.export();

    let fields: Vec<Span> = ExportField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let key = (i + 1) % 10;
            let enabled = sheet.config.is_enabled(*field);
            let style = if enabled {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(MUTED)
            };
            Span::styled(format!("{} {key}:{}  ", checkbox(enabled), field.label()), style)
        })
        .collect();

    let fields_panel = Paragraph::new(Line::from(fields))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Fields "),
        );
    f.render_widget(fields_panel, vertical[0]);

    let items: Vec<ListItem> = sheet
        .lines()
        .iter()
        .map(|line| {
            let style = if line.selected {
                Style::default()
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", checkbox(line.selected))),
                Span::styled(line.text.as_str(), style),
            ]))
        })
        .collect();

    let title = format!(
        " Export {} all, {} of {} selected ",
        checkbox(sheet.all_selected()),
        sheet.selected_count(),
        sheet.lines().len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(app.selected_line));
    f.render_stateful_widget(list, vertical[1], &mut state);
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}
