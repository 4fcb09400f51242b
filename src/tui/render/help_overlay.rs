use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Select task", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Progress -1 / +1", key_style, desc_style);
    add_binding(&mut lines, " H/L", "Progress -10 / +10", key_style, desc_style);
    add_binding(&mut lines, " Home/End", "Progress 0% / 100%", key_style, desc_style);
    add_binding(&mut lines, " Enter/Space", "Expand or collapse", key_style, desc_style);
    add_binding(&mut lines, " x", "Remove task", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Add form", header_style)));
    add_binding(&mut lines, " a", "Open the form", key_style, desc_style);
    add_binding(&mut lines, " Tab/S-Tab", "Next / previous field", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Add the task", key_style, desc_style);
    add_binding(&mut lines, " Alt+Enter", "New line in description", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Back to the list", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Settings", header_style)));
    add_binding(&mut lines, " s", "Open / close the panel", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}\u{2192}", "Change surprise mode", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Edit / save a field", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q / Ctrl+C", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<width$}", key, width = 16);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with_tasks, render_to_string};
    use tempfile::TempDir;

    #[test]
    fn lists_bindings() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_tasks(tmp.path(), &[]);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Progress -10 / +10"));
        assert!(out.contains("Remove task"));
        assert!(out.contains("Toggle this help"));
    }
}
