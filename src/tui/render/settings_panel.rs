use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::settings::SurpriseMode;
use crate::tui::app::{App, Mode, SettingsField};
use crate::util::unicode;

const LABEL_WIDTH: usize = 18;

pub fn settings_height(app: &App) -> u16 {
    if app.settings_panel.open {
        SettingsField::ALL.len() as u16 + 2
    } else {
        1
    }
}

/// Render the settings panel, or its collapsed one-line header
pub fn render_settings_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if !app.settings_panel.open {
        let line = Line::from(Span::styled(
            " \u{25B8} \u{2699} Settings",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            " \u{25BE} \u{2699} Settings ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let lines: Vec<Line> = SettingsField::ALL
        .iter()
        .map(|&field| field_line(app, field, value_width))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn field_line(app: &App, field: SettingsField, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let selected = app.mode == Mode::Settings && app.settings_panel.field == field;
    let row_bg = if selected { app.theme.selection_bg } else { bg };

    let label_style = if selected {
        Style::default()
            .fg(app.theme.highlight)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(row_bg)
    };
    let mut spans = vec![Span::styled(
        format!(" {:<w$}", field.label(), w = LABEL_WIDTH),
        label_style,
    )];

    let text_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
    let settings = &app.screen.settings;

    match (field, &app.settings_panel.editing) {
        (SettingsField::Mode, _) => {
            for mode in SurpriseMode::ALL {
                let style = if mode == settings.mode {
                    Style::default()
                        .fg(app.theme.background)
                        .bg(app.theme.highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(app.theme.text).bg(row_bg)
                };
                spans.push(Span::styled(format!(" {} ", mode), style));
                spans.push(Span::styled(" ", Style::default().bg(row_bg)));
            }
        }
        (_, Some(input)) if selected => {
            let (before, after) = input.text().split_at(input.cursor());
            spans.push(Span::styled(before.to_string(), text_style));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ));
            spans.push(Span::styled(after.to_string(), text_style));
        }
        _ => {
            let value = field.value(settings).unwrap_or_default();
            spans.push(Span::styled(
                unicode::truncate_to_width(value, width),
                text_style,
            ));
        }
    }
    Line::from(spans)
}
