use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::MAX_TASKS;
use crate::tui::app::App;

/// Header row: app name, active task count and lifetime completions
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.screen.task_count();

    let count_color = if active >= MAX_TASKS {
        app.theme.yellow
    } else {
        app.theme.text
    };

    let line = Line::from(vec![
        Span::styled(
            " LevelUp ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(
            format!("{}/{} active", active, MAX_TASKS),
            Style::default().fg(count_color).bg(bg),
        ),
        Span::styled("   \u{1F3C6} ", Style::default().bg(bg)),
        Span::styled(
            format!("{} completed", app.screen.completed_count),
            Style::default().fg(app.theme.green).bg(bg),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
