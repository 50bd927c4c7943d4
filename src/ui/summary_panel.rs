use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::approval::Remark;
use crate::ui::theme::{remark_color, ACCENT};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.store.approval_summary();
    let count_line = |remark: Remark, count: usize| {
        Line::from(vec![
            Span::styled(
                format!("{:<18}", remark.label()),
                Style::default().fg(remark_color(remark)),
            ),
            Span::raw(count.to_string()),
        ])
    };

    let lines = vec![
        Line::from(format!("{:<18}{}", "Total issues", summary.total)),
        count_line(Remark::PmApprove, summary.pm_approval),
        count_line(Remark::PostCheck, summary.post_check),
        count_line(Remark::TestResult, summary.test_result),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(" Summary "),
    );
    f.render_widget(paragraph, area);
}
