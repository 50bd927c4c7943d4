use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &crate::app::App) {
    let Some(input) = &app.input else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow))
        .title(input.target.title());

    let paragraph = Paragraph::new(Line::raw(input.buffer.as_str())).block(block);
    f.render_widget(paragraph, area);

    // Cursor sits after the last character
    let x = area.x + 1 + input.buffer.chars().count() as u16;
    let y = area.y + 1;
    f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
}
