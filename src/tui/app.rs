use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::AppConfig;
use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::ops::progress::Completion;
use crate::ops::session::{RenderPass, Session, SessionError};

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;

/// How often the screen is redrawn while idle (drives the marquee)
const TICK: Duration = Duration::from_millis(120);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the add-task form
    Form,
    /// Moving through the settings panel
    Settings,
    /// Waiting for y/n on removing a task
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    WaitFor,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::WaitFor,
            FormField::WaitFor => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::WaitFor,
            FormField::Description => FormField::Title,
            FormField::WaitFor => FormField::Description,
        }
    }
}

/// The add-task form
#[derive(Debug, Clone)]
pub struct AddForm {
    pub title: TextInput,
    pub description: TextInput,
    pub wait_for: TextInput,
    pub field: FormField,
    /// Validation or capacity error from the last submit
    pub error: Option<String>,
}

impl Default for AddForm {
    fn default() -> Self {
        AddForm {
            title: TextInput::default(),
            description: TextInput::default(),
            wait_for: TextInput::default(),
            field: FormField::Title,
            error: None,
        }
    }
}

impl AddForm {
    pub fn input_mut(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::WaitFor => &mut self.wait_for,
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.wait_for.clear();
        self.field = FormField::Title;
        self.error = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Mode,
    Gif,
    Image,
    Banner,
    Marquee,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Mode,
        SettingsField::Gif,
        SettingsField::Image,
        SettingsField::Banner,
        SettingsField::Marquee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Mode => "Show surprise as",
            SettingsField::Gif => "GIF URL",
            SettingsField::Image => "Image URL",
            SettingsField::Banner => "Banner text",
            SettingsField::Marquee => "Marquee emoji",
        }
    }

    /// Current text of an editable field. The mode selector is not free text.
    pub fn value(self, settings: &Settings) -> Option<&str> {
        match self {
            SettingsField::Mode => None,
            SettingsField::Gif => Some(&settings.gif_url),
            SettingsField::Image => Some(&settings.image_url),
            SettingsField::Banner => Some(&settings.banner_text),
            SettingsField::Marquee => Some(&settings.marquee_emoji),
        }
    }
}

/// The collapsible settings panel
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    pub open: bool,
    pub field: SettingsField,
    /// Edit buffer while a text field is being changed
    pub editing: Option<TextInput>,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        SettingsPanel {
            open: false,
            field: SettingsField::Mode,
            editing: None,
        }
    }
}

/// Transient feedback shown until the next interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Main application state
pub struct App {
    pub session: Session,
    /// What the last render pass produced; drawn until the next interaction
    pub screen: RenderPass,
    pub mode: Mode,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Index into `screen.tasks`
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll: usize,
    /// IDs of task panels the user has collapsed
    pub collapsed: HashSet<String>,
    pub form: AddForm,
    pub settings_panel: SettingsPanel,
    pub notices: Vec<Notice>,
    /// Set when the last interaction finished a task (confetti + surprise)
    pub completion: Option<Completion>,
    /// Task awaiting remove confirmation
    pub pending_remove: Option<String>,
    pub show_help: bool,
    /// Animation counter, advanced while idle
    pub tick: usize,
    /// A store failure that ends the session
    pub fatal: Option<SessionError>,
}

impl App {
    pub fn new(mut session: Session, config: &AppConfig) -> Result<Self, SessionError> {
        let screen = session.render_pass()?;
        Ok(App {
            session,
            screen,
            mode: Mode::Navigate,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            cursor: 0,
            scroll: 0,
            collapsed: HashSet::new(),
            form: AddForm::default(),
            settings_panel: SettingsPanel::default(),
            notices: Vec::new(),
            completion: None,
            pending_remove: None,
            show_help: false,
            tick: 0,
            fatal: None,
        })
    }

    /// The task under the cursor, as last rendered
    pub fn selected_task(&self) -> Option<&Task> {
        self.screen.tasks.get(self.cursor)
    }

    pub fn is_expanded(&self, task: &Task) -> bool {
        !self.collapsed.contains(&task.id)
    }

    /// Start an interaction: feedback from the previous one goes away
    pub fn begin_cycle(&mut self) {
        self.notices.clear();
        self.completion = None;
    }

    /// Finish an interaction with a render pass
    pub fn end_cycle(&mut self) {
        if self.fatal.is_some() {
            return;
        }
        match self.session.render_pass() {
            Ok(pass) => {
                for id in &pass.removed {
                    self.collapsed.remove(id);
                }
                self.screen = pass;
                self.clamp_cursor();
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Unwrap a handler result. User errors become notices; store errors end
    /// the session.
    pub fn check<T>(&mut self, result: Result<T, SessionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_fatal() => {
                self.fail(e);
                None
            }
            Err(e) => {
                if !e.is_user_error() {
                    tracing::warn!(error = %e, "handler rejected a task reference");
                }
                self.notices.push(Notice::Error(format!("\u{274C} {}", e)));
                None
            }
        }
    }

    pub fn fail(&mut self, error: SessionError) {
        tracing::error!(error = %error, "store failure, ending session");
        self.fatal = Some(error);
        self.should_quit = true;
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.screen.tasks.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Run the TUI application against the data files in `data_dir`
pub fn run(data_dir: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(data_dir)?;
    let mut app = App::new(session, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if let Some(error) = app.fatal.take() {
        return Err(error.into());
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                input::handle_key(app, key);
            }
        } else {
            app.tick = app.tick.wrapping_add(1);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
