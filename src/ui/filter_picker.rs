use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Tabs},
    Frame,
};

use crate::app::App;
use crate::pipeline::filter::FilterCategory;
use crate::ui::theme::{ACCENT, MUTED};

/// Multi-select popup over one filter category at a time.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(picker) = app.picker else {
        return;
    };
    let filters = app.store.filters();

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Filters ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let titles: Vec<Line> = FilterCategory::ALL
        .iter()
        .map(|c| match filters.selected_count(*c) {
            0 => Line::from(format!(" {} ", c.label())),
            n => Line::from(format!(" {} ({n}) ", c.label())),
        })
        .collect();
    let selected_tab = FilterCategory::ALL
        .iter()
        .position(|c| *c == picker.category)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, vertical[0]);

    let options = app.store.filter_options(picker.category);
    let items: Vec<ListItem> = options
        .iter()
        .map(|value| {
            let checked = filters.is_selected(picker.category, value);
            let mark = if checked { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(ACCENT)),
                Span::raw(value.as_str()),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(picker.cursor));
    f.render_stateful_widget(list, vertical[1], &mut state);
}
