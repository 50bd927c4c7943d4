use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::model::issue::{Issue, NO_SPRINT};
use crate::ui::theme::{priority_color, remark_color, status_color, ACCENT, LINK};
use crate::util::time::format_date_time;

const DESCRIPTION_CHARS: usize = 600;

pub fn render(f: &mut Frame, area: Rect, app: &App, issue: Option<&Issue>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Details ");

    let Some(issue) = issue else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(issue.key.as_str(), Style::default().fg(ACCENT)),
            Span::raw(" "),
            Span::raw(issue.summary.as_str()),
        ]),
        field(
            "Status",
            Span::styled(issue.status.as_str(), Style::default().fg(status_color(&issue.status))),
        ),
        field(
            "Priority",
            Span::styled(
                issue.priority.as_str(),
                Style::default().fg(priority_color(&issue.priority)),
            ),
        ),
        field("Type", Span::raw(issue.issue_type.as_str())),
        field("Assignee", Span::raw(issue.assignee_name())),
        field("Reporter", Span::raw(issue.reporter.display_name.as_str())),
        field("Sprint", Span::raw(issue.sprint_name().unwrap_or(NO_SPRINT))),
        field("Created", Span::raw(format_date_time(&issue.created))),
        field("Updated", Span::raw(format_date_time(&issue.updated))),
    ];

    if !issue.labels.is_empty() {
        lines.push(field("Labels", Span::raw(issue.labels.join(", "))));
    }

    let remarks = issue.remarks();
    if !remarks.is_empty() {
        let mut spans = vec![label("Needs")];
        for remark in remarks {
            spans.push(Span::styled(
                format!("{} ", remark.label()),
                Style::default().fg(remark_color(remark)),
            ));
        }
        lines.push(Line::from(spans));
    }

    let base = app.store.browse_base_url();
    if !base.is_empty() {
        lines.push(field(
            "URL",
            Span::styled(issue.browse_url(base), Style::default().fg(LINK)),
        ));
    }

    if !issue.description.trim().is_empty() {
        lines.push(Line::raw(""));
        let truncated: String = issue.description.chars().take(DESCRIPTION_CHARS).collect();
        lines.extend(truncated.lines().map(|l| Line::raw(l.to_string())));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn label(name: &str) -> Span<'static> {
    Span::styled(format!("{name}: "), Style::default().fg(Color::Gray))
}

fn field<'a>(name: &str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![label(name), value])
}
