use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Gap between repeats of the marquee emoji
const MARQUEE_GAP: &str = "   ";

pub fn celebration_height(app: &App) -> u16 {
    if app.screen.celebration.is_some() { 2 } else { 0 }
}

/// Banner for every fifth completion, with the marquee emoji scrolling by
pub fn render_celebration(frame: &mut Frame, app: &App, area: Rect) {
    let Some(celebration) = &app.screen.celebration else {
        return;
    };
    let bg = app.theme.background;
    let width = area.width as usize;

    let banner = Line::from(Span::styled(
        format!(
            "\u{2728} You have completed {} tasks! \u{2728}",
            celebration.completed_count
        ),
        Style::default()
            .fg(app.theme.yellow)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);

    let strip = marquee_text(&celebration.emoji);
    let marquee = Line::from(Span::styled(
        unicode::marquee_frame(&strip, width, app.tick),
        Style::default().fg(app.theme.text_bright).bg(bg),
    ));

    frame.render_widget(
        Paragraph::new(vec![banner, marquee]).style(Style::default().bg(bg)),
        area,
    );
}

/// The emoji repeated a few times so the strip reads as a parade
fn marquee_text(emoji: &str) -> String {
    [emoji; 5].join(MARQUEE_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::session::Celebration;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use tempfile::TempDir;

    #[test]
    fn hidden_without_token() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_tasks(tmp.path(), &[]);
        assert_eq!(celebration_height(&app), 0);
    }

    #[test]
    fn banner_and_marquee() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        app.screen.celebration = Some(Celebration {
            emoji: "\u{1F680}".into(),
            completed_count: 5,
        });
        assert_eq!(celebration_height(&app), 2);

        // Start of the cycle: the strip is still off screen
        app.tick = 0;
        let out = render_to_string(60, 2, |frame, area| render_celebration(frame, &app, area));
        assert!(out.contains("You have completed 5 tasks!"));
        assert!(!out.contains("\u{1F680}"));

        app.tick = 10;
        let out = render_to_string(60, 2, |frame, area| render_celebration(frame, &app, area));
        assert!(out.contains("\u{1F680}"));
    }

    #[test]
    fn marquee_repeats_emoji() {
        assert_eq!(marquee_text("x"), "x   x   x   x   x");
    }
}
