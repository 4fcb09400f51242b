use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, FormField, Mode};
use crate::tui::text_input::TextInput;
use crate::util::unicode;

/// Borders, three fields and the error line
pub const FORM_HEIGHT: u16 = 6;

const LABEL_WIDTH: usize = 14;

/// Render the add-task form
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.mode == Mode::Form;
    let border_color = if active {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(
            " \u{2795} Add task ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let form = &app.form;
    let mut lines = vec![
        field_line(app, "Title*", &form.title, FormField::Title, value_width),
        field_line(
            app,
            "Description",
            &form.description,
            FormField::Description,
            value_width,
        ),
        field_line(app, "Waiting on", &form.wait_for, FormField::WaitFor, value_width),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else if !active && app.show_key_hints {
        lines.push(Line::from(Span::styled(
            " press a to add a task",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}

fn field_line<'a>(
    app: &App,
    label: &str,
    input: &TextInput,
    field: FormField,
    width: usize,
) -> Line<'a> {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Form && app.form.field == field;

    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let label = format!(" {:<w$}", label, w = LABEL_WIDTH - 1);
    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(" ", Style::default().bg(bg)),
    ];

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    if focused {
        // Keep the cursor visible: show the tail when the text is too long
        let text = input.text();
        let cursor = input.cursor();
        let (before, after) = text.split_at(cursor);
        let (before, after) = (show_breaks(before), show_breaks(after));
        let before_width = unicode::display_width(&before);
        let shown_before = if before_width + 1 > width {
            tail_to_width(&before, width.saturating_sub(1))
        } else {
            before
        };
        let room = width.saturating_sub(unicode::display_width(&shown_before) + 1);
        spans.push(Span::styled(shown_before, text_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(unicode::truncate_to_width(&after, room), text_style));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(&show_breaks(input.text()), width),
            text_style,
        ));
    }
    Line::from(spans)
}

/// One-row rendering of a multi-line value
fn show_breaks(s: &str) -> String {
    s.replace('\n', "\u{21B5}")
}

/// The longest suffix of `s` that fits in `width` cells
fn tail_to_width(s: &str, width: usize) -> String {
    let mut taken = 0;
    let mut start = s.len();
    for (i, g) in s.grapheme_indices(true).rev() {
        let gw = unicode::display_width(g);
        if taken + gw > width {
            break;
        }
        taken += gw;
        start = i;
    }
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::{ch, key};
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    #[test]
    fn idle_form_shows_hint() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_tasks(tmp.path(), &[]);
        let out = render_to_string(60, 6, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("Add task"));
        assert!(out.contains("Title*"));
        assert!(out.contains("Waiting on"));
        assert!(out.contains("press a to add a task"));
    }

    #[test]
    fn typed_text_and_cursor() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        handle_key(&mut app, ch('a'));
        for c in "Write".chars() {
            handle_key(&mut app, ch(c));
        }
        let out = render_to_string(60, 6, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("Write\u{258C}"));
    }

    #[test]
    fn submit_error_is_shown_inline() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        handle_key(&mut app, ch('a'));
        handle_key(&mut app, key(KeyCode::Enter));
        let out = render_to_string(60, 6, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("Title cannot be empty."));
    }

    #[test]
    fn line_breaks_show_as_return_marks() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        app.form.description = TextInput::with_text("pack\nbook");
        let out = render_to_string(60, 6, |frame, area| render_add_form(frame, &app, area));
        assert!(out.contains("pack\u{21B5}book"));
    }

    #[test]
    fn tail_keeps_end_of_long_text() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("ab", 5), "ab");
    }
}
