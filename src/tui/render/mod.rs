pub mod add_form;
pub mod celebration;
pub mod help_overlay;
pub(super) mod helpers;
pub mod notices;
pub mod settings_panel;
pub mod status_row;
pub mod summary;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let notice_rows = notices::notices_height(app);
    let celebration_rows = celebration::celebration_height(app);
    let settings_rows = settings_panel::settings_height(app);

    // summary | form | notices | tasks | celebration | settings | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(add_form::FORM_HEIGHT),
            Constraint::Length(notice_rows),
            Constraint::Min(1),
            Constraint::Length(celebration_rows),
            Constraint::Length(settings_rows),
            Constraint::Length(1),
        ])
        .split(area);

    summary::render_summary(frame, app, chunks[0]);
    add_form::render_add_form(frame, app, chunks[1]);
    notices::render_notices(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3]);
    celebration::render_celebration(frame, app, chunks[4]);
    settings_panel::render_settings_panel(frame, app, chunks[5]);
    status_row::render_status_row(frame, app, chunks[6]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}
