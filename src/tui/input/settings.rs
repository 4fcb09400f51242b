use crossterm::event::{KeyCode, KeyEvent};

use crate::model::settings::{SettingsUpdate, SurpriseMode};
use crate::tui::app::{App, Mode, Notice, SettingsField};
use crate::tui::text_input::TextInput;

pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    if app.settings_panel.editing.is_some() {
        handle_edit(app, key);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => {
            app.settings_panel.open = false;
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => move_field(app, 1),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => move_field(app, -1),
        KeyCode::Char('l') | KeyCode::Right if app.settings_panel.field == SettingsField::Mode => {
            cycle_mode(app, SurpriseMode::next)
        }
        KeyCode::Char('h') | KeyCode::Left if app.settings_panel.field == SettingsField::Mode => {
            cycle_mode(app, SurpriseMode::prev)
        }
        KeyCode::Enter => {
            let field = app.settings_panel.field;
            if let Some(value) = field.value(&app.screen.settings) {
                app.settings_panel.editing = Some(TextInput::with_text(value));
            }
        }
        _ => {}
    }
}

fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.settings_panel.editing = None,
        KeyCode::Enter => {
            let value = app
                .settings_panel
                .editing
                .take()
                .map(|mut input| input.take())
                .unwrap_or_default();
            let update = field_update(app.settings_panel.field, value);
            commit(app, update);
        }
        _ => {
            if let Some(input) = app.settings_panel.editing.as_mut() {
                input.handle_key(key);
            }
        }
    }
}

fn move_field(app: &mut App, delta: isize) {
    let all = SettingsField::ALL;
    let idx = all
        .iter()
        .position(|f| *f == app.settings_panel.field)
        .unwrap_or(0);
    let next = (idx as isize + delta).rem_euclid(all.len() as isize) as usize;
    app.settings_panel.field = all[next];
}

fn cycle_mode(app: &mut App, step: fn(SurpriseMode) -> SurpriseMode) {
    let mode = step(app.session.settings().mode);
    commit(
        app,
        SettingsUpdate {
            mode: Some(mode.as_str().to_string()),
            ..Default::default()
        },
    );
}

fn commit(app: &mut App, update: SettingsUpdate) {
    app.begin_cycle();
    let result = app.session.on_settings_change(update);
    if app.check(result).is_some() {
        app.notices
            .push(Notice::Success("\u{2699}\u{FE0F} Settings saved.".to_string()));
    }
    app.end_cycle();
}

fn field_update(field: SettingsField, value: String) -> SettingsUpdate {
    let mut update = SettingsUpdate::default();
    match field {
        SettingsField::Mode => update.mode = Some(value),
        SettingsField::Gif => update.gif_url = Some(value),
        SettingsField::Image => update.image_url = Some(value),
        SettingsField::Banner => update.banner_text = Some(value),
        SettingsField::Marquee => update.marquee_emoji = Some(value),
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::Settings;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::{ch, key};
    use crate::tui::render::test_helpers::app_with_tasks;
    use tempfile::TempDir;

    fn open_settings(app: &mut App) {
        handle_key(app, ch('s'));
        assert_eq!(app.mode, Mode::Settings);
    }

    #[test]
    fn arrows_cycle_mode_and_write_through() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);

        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.session.settings().mode, SurpriseMode::Image);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.screen.settings.mode, SurpriseMode::Css);
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.session.settings().mode, SurpriseMode::Image);

        let on_disk = std::fs::read_to_string(tmp.path().join("settings.json")).unwrap();
        assert!(on_disk.contains("\"mode\": \"Image\""));
    }

    #[test]
    fn edit_banner_text() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);
        for _ in 0..3 {
            handle_key(&mut app, ch('j'));
        }
        assert_eq!(app.settings_panel.field, SettingsField::Banner);

        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, crate::tui::input::test_keys::ctrl('u'));
        for c in "Nice!".chars() {
            handle_key(&mut app, ch(c));
        }
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.settings_panel.editing.is_none());
        assert_eq!(app.session.settings().banner_text, "Nice!");
        assert!(matches!(app.notices.as_slice(), [Notice::Success(_)]));
    }

    #[test]
    fn escape_cancels_edit() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, ch('x'));
        handle_key(&mut app, key(KeyCode::Esc));

        assert!(app.settings_panel.editing.is_none());
        assert_eq!(app.mode, Mode::Settings);
        assert_eq!(
            app.session.settings().gif_url,
            Settings::default().gif_url
        );
    }

    #[test]
    fn enter_on_mode_does_not_edit() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.settings_panel.editing.is_none());
    }

    #[test]
    fn field_selection_wraps() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);
        handle_key(&mut app, ch('k'));
        assert_eq!(app.settings_panel.field, SettingsField::Marquee);
        handle_key(&mut app, ch('j'));
        assert_eq!(app.settings_panel.field, SettingsField::Mode);
    }

    #[test]
    fn escape_closes_panel() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_tasks(tmp.path(), &[]);
        open_settings(&mut app);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(!app.settings_panel.open);
    }
}
