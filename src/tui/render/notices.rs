use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::settings::Surprise;
use crate::tui::app::{App, Notice};

const CONFETTI: [char; 6] = ['*', '\u{2726}', '\u{2022}', '+', '\u{00B0}', '~'];

/// Rows needed for this cycle's feedback
pub fn notices_height(app: &App) -> u16 {
    let completion_rows = if app.completion.is_some() { 3 } else { 0 };
    (app.notices.len() + completion_rows) as u16
}

/// Success and error messages, then confetti and the surprise after a completion
pub fn render_notices(frame: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;
    let mut lines: Vec<Line> = Vec::new();

    for notice in &app.notices {
        let (text, color) = match notice {
            Notice::Success(text) => (text, app.theme.green),
            Notice::Error(text) => (text, app.theme.red),
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(color).bg(bg),
        )));
    }

    if let Some(completion) = &app.completion {
        let confetti = confetti_line(app, area.width as usize);
        lines.push(confetti.clone());
        lines.push(surprise_line(app, &completion.surprise));
        lines.push(confetti);
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// A row of colored confetti, shifted each tick
fn confetti_line(app: &App, width: usize) -> Line<'static> {
    let colors = app.theme.confetti_colors();
    let bg = app.theme.background;
    let spans: Vec<Span> = (0..width)
        .map(|i| {
            let n = i + app.tick;
            let glyph = if n % 3 == 0 {
                CONFETTI[(n / 3) % CONFETTI.len()]
            } else {
                ' '
            };
            Span::styled(
                glyph.to_string(),
                Style::default().fg(colors[(i / 3) % colors.len()]).bg(bg),
            )
        })
        .collect();
    Line::from(spans)
}

fn surprise_line(app: &App, surprise: &Surprise) -> Line<'static> {
    let bg = app.theme.background;
    let label_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let link_style = Style::default()
        .fg(app.theme.cyan)
        .bg(bg)
        .add_modifier(Modifier::UNDERLINED);

    match surprise {
        Surprise::Gif(url) => Line::from(vec![
            Span::styled(" \u{1F39E} GIF: ", label_style),
            Span::styled(url.clone(), link_style),
        ]),
        Surprise::Image(url) => Line::from(vec![
            Span::styled(" \u{1F5BC} Image: ", label_style),
            Span::styled(url.clone(), link_style),
        ]),
        Surprise::Banner(text) => Line::from(Span::styled(
            text.clone(),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::SettingsUpdate;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::key;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    fn render(app: &App) -> String {
        let h = notices_height(app).max(1);
        render_to_string(80, h, |frame, area| render_notices(frame, app, area))
    }

    #[test]
    fn nothing_without_feedback() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_tasks(tmp.path(), &[]);
        assert_eq!(notices_height(&app), 0);
    }

    #[test]
    fn messages_are_listed() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        app.notices.push(Notice::Success("saved".into()));
        app.notices.push(Notice::Error("broken".into()));
        let out = render(&app);
        assert_eq!(out, " saved\n broken");
    }

    #[test]
    fn completion_shows_gif_surprise() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &["A"]);
        handle_key(&mut app, key(KeyCode::End));
        assert_eq!(notices_height(&app), 4);
        let out = render(&app);
        assert!(out.contains("GIF:"));
        assert!(out.contains("https://media1.giphy.com/media/26tPplGWjN0xLybiU/giphy.gif"));
    }

    #[test]
    fn css_mode_shows_banner_text() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &["A"]);
        app.session
            .on_settings_change(SettingsUpdate {
                mode: Some("CSS".into()),
                ..Default::default()
            })
            .unwrap();
        handle_key(&mut app, key(KeyCode::End));
        let out = render(&app);
        assert!(out.contains("LEVEL UP! YOU DID IT!"));
        assert!(!out.contains("GIF:"));
    }
}
