use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::MAX_TASKS;
use crate::ops::registry::{NewTask, TaskError};
use crate::ops::session::SessionError;
use crate::tui::app::{App, FormField, Mode, Notice};

/// Alt+Enter, or Ctrl+J where the terminal folds Alt away
fn is_newline_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => key.modifiers.contains(KeyModifiers::ALT),
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    if app.form.field == FormField::Description && is_newline_key(&key) {
        app.form.description.insert_str("\n");
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.form.error = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab | KeyCode::Down => app.form.field = app.form.field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.field = app.form.field.prev(),
        KeyCode::Enter => submit(app),
        _ => {
            let field = app.form.field;
            app.form.input_mut(field).handle_key(key);
        }
    }
}

/// Text shown under the form for a rejected submit
fn form_error_text(error: &SessionError) -> String {
    match error {
        SessionError::Task(TaskError::EmptyTitle) => "\u{274C} Title cannot be empty.".to_string(),
        SessionError::Task(TaskError::Capacity { .. }) => {
            format!("\u{274C} At most {} tasks allowed.", MAX_TASKS)
        }
        other => format!("\u{274C} {}", other),
    }
}

fn submit(app: &mut App) {
    app.begin_cycle();
    let wait_for = app.form.wait_for.text().trim();
    let new = NewTask {
        title: app.form.title.text().to_string(),
        description: app.form.description.text().to_string(),
        wait_for: (!wait_for.is_empty()).then(|| wait_for.to_string()),
    };

    match app.session.on_add_task(new) {
        Ok(id) => {
            app.form.clear();
            app.notices
                .push(Notice::Success("\u{1F680} New task added!".to_string()));
            app.end_cycle();
            if let Some(idx) = app.screen.tasks.iter().position(|t| t.id == id) {
                app.cursor = idx;
            }
        }
        Err(e) if e.is_fatal() => app.fail(e),
        Err(e) => {
            app.form.error = Some(form_error_text(&e));
            app.end_cycle();
        }
    }
}
