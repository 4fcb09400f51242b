use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{progress_bar, slider_track};

const INDENT: &str = "    ";
const MAX_BAR_WIDTH: usize = 50;

/// Render one panel per task, scrolled so the selected panel is visible
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    if app.screen.tasks.is_empty() {
        let line = Line::from(Span::styled(
            " No tasks yet. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_span = (0, 0);
    for (idx, task) in app.screen.tasks.iter().enumerate() {
        let start = lines.len();
        let selected = idx == app.cursor;
        lines.push(header_line(app, task, selected, width));
        if app.is_expanded(task) {
            body_lines(app, task, width, &mut lines);
        }
        if selected {
            selected_span = (start, lines.len());
        }
        lines.push(Line::from(""));
    }

    adjust_scroll(app, selected_span, area.height as usize);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((app.scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Keep the selected panel on screen, preferring its header when it is taller
/// than the viewport
fn adjust_scroll(app: &mut App, (start, end): (usize, usize), height: usize) {
    if height == 0 {
        return;
    }
    if end > app.scroll + height {
        app.scroll = end - height;
    }
    if start < app.scroll {
        app.scroll = start;
    }
    if end - start > height {
        app.scroll = start;
    }
}

fn header_line(app: &App, task: &Task, selected: bool, width: usize) -> Line<'static> {
    let bg = if selected && app.mode == Mode::Navigate {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let marker = if selected { "\u{25B6}" } else { " " };
    let arrow = if app.is_expanded(task) {
        "\u{25BE}"
    } else {
        "\u{25B8}"
    };

    let suffix = format!(
        " \u{2014} {}%{}",
        task.progress,
        if task.waiting_on().is_some() {
            " \u{1F649}"
        } else {
            ""
        }
    );
    let prefix = format!("{} {} ", marker, arrow);
    let room = width
        .saturating_sub(unicode::display_width(&prefix))
        .saturating_sub(unicode::display_width(&suffix));
    let title = unicode::truncate_to_width(&task.title, room);

    let title_style = if task.is_complete() {
        Style::default()
            .fg(app.theme.green)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::styled(prefix, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(title, title_style),
        Span::styled(suffix, Style::default().fg(app.theme.text).bg(bg)),
    ])
}

fn body_lines(app: &App, task: &Task, width: usize, lines: &mut Vec<Line<'static>>) {
    let bg = app.theme.background;
    let inner = width.saturating_sub(INDENT.len() + 1);

    for text in task.description.lines() {
        lines.push(Line::from(Span::styled(
            format!("{}{}", INDENT, unicode::truncate_to_width(text, inner)),
            Style::default().fg(app.theme.text).bg(bg),
        )));
    }

    if let Some(wait_for) = task.waiting_on() {
        lines.push(Line::from(Span::styled(
            format!(
                "{}\u{26A0} Waiting on: {}",
                INDENT,
                unicode::truncate_to_width(wait_for, inner.saturating_sub(14))
            ),
            Style::default().fg(app.theme.yellow).bg(bg),
        )));
    }

    let bar_width = inner.min(MAX_BAR_WIDTH);
    lines.push(Line::from(vec![
        Span::styled(INDENT, Style::default().bg(bg)),
        Span::styled(
            slider_track(task.progress, bar_width),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
    ]));

    let (label, filled) = progress_bar(task.progress, bar_width);
    let split = label
        .char_indices()
        .nth(filled)
        .map_or(label.len(), |(i, _)| i);
    let (done, rest) = label.split_at(split);
    lines.push(Line::from(vec![
        Span::styled(INDENT, Style::default().bg(bg)),
        Span::styled(
            done.to_string(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.bar)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            rest.to_string(),
            Style::default().fg(app.theme.text).bg(app.theme.bar_track),
        ),
    ]));
}
