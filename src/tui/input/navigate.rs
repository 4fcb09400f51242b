use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::MAX_PROGRESS;
use crate::tui::app::{App, Mode, Notice};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Enter | KeyCode::Char(' ') => toggle_expanded(app),

        KeyCode::Char('l') | KeyCode::Right => step_progress(app, 1),
        KeyCode::Char('h') | KeyCode::Left => step_progress(app, -1),
        KeyCode::Char('L') => step_progress(app, 10),
        KeyCode::Char('H') => step_progress(app, -10),
        KeyCode::Home => set_progress(app, 0),
        KeyCode::End => set_progress(app, MAX_PROGRESS),

        KeyCode::Char('a') => {
            app.form.error = None;
            app.mode = Mode::Form;
        }
        KeyCode::Char('s') => {
            app.settings_panel.open = true;
            app.mode = Mode::Settings;
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(task) = app.selected_task() {
                app.pending_remove = Some(task.id.clone());
                app.mode = Mode::Confirm;
            }
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.screen.tasks.len();
    if len == 0 {
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

fn toggle_expanded(app: &mut App) {
    let Some(id) = app.selected_task().map(|t| t.id.clone()) else {
        return;
    };
    if !app.collapsed.remove(&id) {
        app.collapsed.insert(id);
    }
}

fn step_progress(app: &mut App, delta: i16) {
    let Some(current) = selected_progress(app) else {
        return;
    };
    let value = (current as i16 + delta).clamp(0, MAX_PROGRESS as i16) as u8;
    set_progress(app, value);
}

/// Current progress of the selected task, if it can still be changed
fn selected_progress(app: &App) -> Option<u8> {
    let task = app.selected_task()?;
    // A finished task is only on screen for its final render
    if task.is_complete() {
        return None;
    }
    app.session.registry().find(&task.id).map(|t| t.progress)
}

fn set_progress(app: &mut App, value: u8) {
    let Some(current) = selected_progress(app) else {
        return;
    };
    if current == value {
        return;
    }
    let Some(id) = app.selected_task().map(|t| t.id.clone()) else {
        return;
    };

    app.begin_cycle();
    let result = app.session.on_progress_change(&id, value);
    if let Some(outcome) = app.check(result) {
        if let Some(message) = outcome.change.message() {
            app.notices.push(Notice::Success(message.to_string()));
        }
        app.completion = outcome.completion;
    }
    app.end_cycle();
}
