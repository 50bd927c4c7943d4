use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::sprint::{sprint_board_url, SprintPhase};
use crate::ui::theme::{sprint_state_color, ACCENT, LINK, MUTED};
use crate::ui::{render_slot_error, slot_title};
use crate::util::time::format_date;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let store = &app.store;
    let name = if store.sprint_name.is_empty() {
        "(any)"
    } else {
        store.sprint_name.as_str()
    };
    let query = Paragraph::new(Line::from(vec![
        Span::styled("Board: ", Style::default().fg(MUTED)),
        Span::raw(store.board_id.as_str()),
        Span::styled("   Name: ", Style::default().fg(MUTED)),
        Span::raw(name),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" Sprint search "),
    );
    f.render_widget(query, vertical[0]);

    let slot = &store.sprints;
    if render_slot_error(f, vertical[1], "Sprints", slot) {
        return;
    }

    let base = store.browse_base_url();
    let items: Vec<ListItem> = slot
        .data
        .iter()
        .map(|sprint| {
            let mut header = vec![
                Span::styled(
                    format!("{:<7}", sprint.state.as_str()),
                    Style::default().fg(sprint_state_color(sprint.state)),
                ),
                Span::styled(format!("#{} ", sprint.id), Style::default().fg(MUTED)),
                Span::raw(sprint.name.as_str()),
            ];
            let phase = sprint.phase();
            if phase != SprintPhase::Other {
                header.push(Span::styled(
                    format!("  [{}]", phase.label()),
                    Style::default().fg(ACCENT),
                ));
            }

            let dates = match (&sprint.start_date, &sprint.end_date) {
                (Some(start), Some(end)) => format!("{} → {}", format_date(start), format_date(end)),
                (Some(start), None) => format!("from {}", format_date(start)),
                _ => "not scheduled".to_string(),
            };
            let mut lines = vec![
                Line::from(header),
                Line::styled(format!("    {dates}"), Style::default().fg(MUTED)),
            ];
            if let Some(goal) = &sprint.goal {
                lines.push(Line::raw(format!("    {goal}")));
            }
            if !base.is_empty() {
                lines.push(Line::styled(
                    format!("    {}", sprint_board_url(base, sprint.board_id, Some(sprint.id))),
                    Style::default().fg(LINK),
                ));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(slot_title("Sprints", slot, slot.data.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(app.selected_sprint));
    f.render_stateful_widget(list, vertical[1], &mut state);
}
