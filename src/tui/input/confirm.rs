use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, Notice};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let pending = app.pending_remove.take();
    app.mode = Mode::Navigate;

    let Some(id) = pending else {
        return;
    };
    if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        return;
    }

    app.begin_cycle();
    let result = app.session.on_remove_task(&id);
    if let Some(removed) = app.check(result) {
        let text = match removed {
            Some(task) => format!("\u{1F5D1} Removed \"{}\"", task.title),
            None => "Task was already gone".to_string(),
        };
        app.notices.push(Notice::Success(text));
        app.collapsed.remove(&id);
    }
    app.end_cycle();
}
