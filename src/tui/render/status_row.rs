use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Confirm => {
            let title = app
                .pending_remove
                .as_deref()
                .and_then(|id| app.screen.tasks.iter().find(|t| t.id == id))
                .map(|t| t.title.as_str())
                .unwrap_or("task");
            Line::from(vec![
                Span::styled(
                    format!(
                        " Remove \"{}\"?",
                        unicode::truncate_to_width(title, width.saturating_sub(20))
                    ),
                    Style::default()
                        .fg(app.theme.yellow)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" y/n", Style::default().fg(app.theme.text_bright).bg(bg)),
            ])
        }
        mode if app.show_key_hints => {
            let hint = mode_hint(app, mode);
            let hint = unicode::truncate_to_width(hint, width.saturating_sub(1));
            Line::from(Span::styled(
                format!(" {}", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ))
        }
        _ => Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg))),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_hint(app: &App, mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "j/k move  h/l \u{00B1}1  H/L \u{00B1}10  Enter fold  a add  x remove  s settings  ? help  q quit"
        }
        Mode::Form => "Tab next field  Enter submit  Esc back",
        Mode::Settings if app.settings_panel.editing.is_some() => "Enter save  Esc cancel",
        Mode::Settings => "j/k select  \u{2190}/\u{2192} change mode  Enter edit  Esc close",
        Mode::Confirm => "y remove  n cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppConfig;
    use crate::ops::session::Session;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::ch;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use tempfile::TempDir;

    fn render(app: &App) -> String {
        render_to_string(100, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_hints() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_tasks(tmp.path(), &[]);
        let out = render(&app);
        assert!(out.starts_with(" j/k move"));
        assert!(out.contains("q quit"));
    }

    #[test]
    fn confirm_prompt_names_task() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &["Write report"]);
        handle_key(&mut app, ch('x'));
        assert_eq!(render(&app), " Remove \"Write report\"? y/n");
    }

    #[test]
    fn hints_can_be_turned_off() {
        let tmp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.ui.show_key_hints = false;
        let app = App::new(Session::open(tmp.path()).unwrap(), &config).unwrap();
        assert_eq!(render(&app), "");
    }
}
