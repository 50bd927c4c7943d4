use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{ACCENT, MUTED};
use crate::ui::{render_slot_error, slot_title};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let slot = &app.store.boards;
    if render_slot_error(f, area, "Boards", slot) {
        return;
    }

    let items: Vec<ListItem> = slot
        .data
        .iter()
        .map(|board| {
            let project = board
                .location
                .as_ref()
                .and_then(|l| l.project_key.as_deref())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>6} ", board.id), Style::default().fg(MUTED)),
                Span::raw(board.name.as_str()),
                Span::styled(
                    format!("  {} {project}", board.board_type),
                    Style::default().fg(MUTED),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(slot_title("Boards", slot, slot.data.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(app.selected_board));
    f.render_stateful_widget(list, area, &mut state);
}
