use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::io::recovery;
use crate::io::store::{Store, StoreError};
use crate::model::settings::{Settings, SettingsError, SettingsUpdate};
use crate::model::stats::Stats;
use crate::model::task::Task;
use crate::ops::progress::{self, CelebrationSlot, Completion, ProgressChange};
use crate::ops::registry::{NewTask, Registry, TaskError};

/// Error type for session command handlers
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Store failures end the session; everything else is shown and retried
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Store(_))
    }

    /// Rejected input, as opposed to a stale or unknown task reference
    pub fn is_user_error(&self) -> bool {
        match self {
            SessionError::Task(e) => e.is_user_error(),
            SessionError::Settings(_) => true,
            SessionError::Store(_) => false,
        }
    }
}

/// What a progress change did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOutcome {
    pub task_id: String,
    pub change: ProgressChange,
    /// Present when this change took the task to 100%
    pub completion: Option<Completion>,
}

/// A celebration banner for this render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub emoji: String,
    pub completed_count: u32,
}

/// Snapshot of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPass {
    /// Tasks as they stood when the pass began, finished ones included
    pub tasks: Vec<Task>,
    /// IDs of finished tasks dropped from the registry by this pass
    pub removed: Vec<String>,
    pub celebration: Option<Celebration>,
    pub completed_count: u32,
    pub settings: Settings,
}

impl RenderPass {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

/// All state of one tracker session: the store plus its in-memory copies.
///
/// Front ends call the `on_*` handlers for user actions and `render_pass`
/// once per interaction cycle.
pub struct Session {
    store: Store,
    registry: Registry,
    stats: Stats,
    settings: Settings,
    celebration: CelebrationSlot,
    rng: StdRng,
}

impl Session {
    /// Load all three documents from `dir`
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        Self::open_with_rng(dir, StdRng::from_os_rng())
    }

    /// Like [`Session::open`] with a caller-supplied RNG for message picks
    pub fn open_with_rng(dir: &Path, rng: StdRng) -> Result<Self, StoreError> {
        let store = Store::open(dir)?;
        let tasks = store.load_tasks()?;
        let stats = store.load_stats()?;
        let settings = store.load_settings()?;
        tracing::info!(
            dir = %dir.display(),
            tasks = tasks.len(),
            completed = stats.completed_count,
            "session opened"
        );
        Ok(Session {
            store,
            registry: Registry::new(tasks),
            stats,
            settings,
            celebration: CelebrationSlot::default(),
            rng,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.registry.tasks()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn celebration_pending(&self) -> bool {
        self.celebration.is_pending()
    }

    /// Add a task and persist the list. Returns the new ID.
    pub fn on_add_task(&mut self, new: NewTask) -> Result<String, SessionError> {
        let id = self.registry.add(new)?;
        self.store.save_tasks(self.registry.tasks())?;
        tracing::info!(task_id = %id, total = self.registry.len(), "task added");
        Ok(id)
    }

    /// Remove a task (no-op if absent) and persist the list
    pub fn on_remove_task(&mut self, id: &str) -> Result<Option<Task>, SessionError> {
        let removed = self.registry.remove(id);
        self.store.save_tasks(self.registry.tasks())?;
        if let Some(task) = &removed {
            let json = serde_json::to_string_pretty(task).unwrap_or_default();
            recovery::log_task_removal(self.store.dir(), &task.id, &json);
            tracing::info!(task_id = %task.id, "task removed");
        }
        Ok(removed)
    }

    /// Apply a slider change to a task
    pub fn on_progress_change(&mut self, id: &str, value: u8) -> Result<ProgressOutcome, SessionError> {
        let task = self
            .registry
            .find_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        let change = progress::apply_progress(task, value, &mut self.rng)?;

        let mut outcome = ProgressOutcome {
            task_id: id.to_string(),
            change,
            completion: None,
        };
        if outcome.change == ProgressChange::Unchanged {
            return Ok(outcome);
        }

        self.store.save_tasks(self.registry.tasks())?;
        tracing::debug!(task_id = %id, progress = value, "progress changed");

        if outcome.change.reached_completion() {
            let completion =
                progress::record_completion(&mut self.stats, &self.settings, &mut self.celebration);
            self.store.save_stats(&self.stats)?;
            tracing::info!(
                task_id = %id,
                completed = completion.completed_count,
                celebration = completion.celebration_queued,
                "task completed"
            );
            outcome.completion = Some(completion);
        }
        Ok(outcome)
    }

    /// Validate and apply a settings change. Written out by the next render pass.
    pub fn on_settings_change(&mut self, fields: SettingsUpdate) -> Result<(), SessionError> {
        self.settings.update(fields)?;
        tracing::debug!(mode = %self.settings.mode, "settings updated");
        Ok(())
    }

    /// Snapshot state for display, then drop finished tasks, drain the
    /// celebration slot and write the settings through.
    pub fn render_pass(&mut self) -> Result<RenderPass, StoreError> {
        let tasks = self.registry.tasks().to_vec();

        let removed: Vec<String> = self
            .registry
            .remove_completed()
            .into_iter()
            .map(|t| t.id)
            .collect();
        if !removed.is_empty() {
            self.store.save_tasks(self.registry.tasks())?;
            tracing::info!(count = removed.len(), "removed finished tasks");
        }

        let celebration = self.celebration.take().map(|emoji| Celebration {
            emoji,
            completed_count: self.stats.completed_count,
        });

        self.store.save_settings(&self.settings)?;

        Ok(RenderPass {
            tasks,
            removed,
            celebration,
            completed_count: self.stats.completed_count,
            settings: self.settings.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::Document;
    use crate::model::settings::{Surprise, SurpriseMode};
    use crate::model::task::MAX_TASKS;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn open(dir: &Path) -> Session {
        Session::open_with_rng(dir, StdRng::seed_from_u64(42)).unwrap()
    }

    fn titled(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn write_report_scenario() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        assert!(session.tasks().is_empty());

        let id = session.on_add_task(titled("Write report")).unwrap();
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.tasks()[0].progress, 0);

        let half = session.on_progress_change(&id, 50).unwrap();
        assert!(half.change.message().is_some());
        assert!(half.completion.is_none());
        assert_eq!(session.stats().completed_count, 0);
        session.render_pass().unwrap();
        assert_eq!(session.tasks().len(), 1);

        let done = session.on_progress_change(&id, 100).unwrap();
        assert_eq!(done.completion.as_ref().unwrap().completed_count, 1);
        assert_eq!(session.stats().completed_count, 1);

        let pass = session.render_pass().unwrap();
        assert_eq!(pass.tasks.len(), 1);
        assert_eq!(pass.tasks[0].progress, 100);
        assert_eq!(pass.removed, vec![id]);
        assert!(session.tasks().is_empty());

        // Everything made it to disk
        let reopened = open(tmp.path());
        assert!(reopened.tasks().is_empty());
        assert_eq!(reopened.stats().completed_count, 1);
    }

    #[test]
    fn same_progress_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let id = session.on_add_task(titled("A")).unwrap();
        session.on_progress_change(&id, 25).unwrap();
        let before = fs::read_to_string(session.store().path(Document::Tasks)).unwrap();
        fs::remove_file(session.store().path(Document::Tasks)).unwrap();

        let outcome = session.on_progress_change(&id, 25).unwrap();
        assert_eq!(outcome.change, ProgressChange::Unchanged);
        assert!(outcome.completion.is_none());
        assert!(!session.store().exists(Document::Tasks));
        assert!(before.contains("\"progress\": 25"));
    }

    #[test]
    fn capacity_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        for i in 0..MAX_TASKS {
            session.on_add_task(titled(&format!("Task {}", i))).unwrap();
        }
        let path = session.store().path(Document::Tasks);
        let before = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = session.on_add_task(titled("Eleventh")).unwrap_err();
        assert!(matches!(err, SessionError::Task(TaskError::Capacity { max: 10 })));
        assert!(!err.is_fatal());
        assert_eq!(session.tasks().len(), 10);
        assert!(!path.exists());
        assert_eq!(before.matches("\"title\"").count(), 10);
    }

    #[test]
    fn unknown_task_is_not_a_user_error() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let err = session.on_progress_change("missing", 10).unwrap_err();
        assert!(matches!(err, SessionError::Task(TaskError::NotFound(_))));
        assert!(!err.is_fatal());
        assert!(!err.is_user_error());

        let id = session.on_add_task(titled("A")).unwrap();
        let err = session.on_progress_change(&id, 101).unwrap_err();
        assert!(matches!(err, SessionError::Task(TaskError::ProgressOutOfRange(101))));
        assert!(err.is_user_error());
    }

    #[test]
    fn empty_title_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let err = session.on_add_task(titled("")).unwrap_err();
        assert!(matches!(err, SessionError::Task(TaskError::EmptyTitle)));
        assert!(!err.is_fatal());
        assert!(err.is_user_error());
        assert!(session.tasks().is_empty());
        assert!(!session.store().exists(Document::Tasks));
    }

    #[test]
    fn unknown_task_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        assert!(matches!(
            session.on_progress_change("missing", 10),
            Err(SessionError::Task(TaskError::NotFound(_)))
        ));
    }

    #[test]
    fn fifth_completion_celebrates_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("stats.json"), r#"{"completed": 4}"#).unwrap();
        let mut session = open(tmp.path());
        let id = session.on_add_task(titled("Fifth")).unwrap();

        let outcome = session.on_progress_change(&id, 100).unwrap();
        let completion = outcome.completion.unwrap();
        assert_eq!(completion.completed_count, 5);
        assert!(completion.celebration_queued);
        assert!(session.celebration_pending());

        let pass = session.render_pass().unwrap();
        assert_eq!(
            pass.celebration,
            Some(Celebration {
                emoji: "\u{1F680}".into(),
                completed_count: 5
            })
        );
        assert!(!session.celebration_pending());

        let next = session.render_pass().unwrap();
        assert_eq!(next.celebration, None);
    }

    #[test]
    fn lowering_progress_keeps_completed_count() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let id = session.on_add_task(titled("A")).unwrap();
        session.on_progress_change(&id, 80).unwrap();
        session.on_progress_change(&id, 20).unwrap();
        assert_eq!(session.stats().completed_count, 0);
        assert!(!session.store().exists(Document::Stats));
    }

    #[test]
    fn remove_persists_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let id = session.on_add_task(titled("Temp")).unwrap();
        assert!(session.on_remove_task(&id).unwrap().is_some());
        assert!(session.on_remove_task(&id).unwrap().is_none());
        assert!(open(tmp.path()).tasks().is_empty());
    }

    #[test]
    fn render_pass_writes_settings_through() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        session
            .on_settings_change(SettingsUpdate {
                mode: Some("CSS".into()),
                banner_text: Some("Nice!".into()),
                ..Default::default()
            })
            .unwrap();
        session.render_pass().unwrap();

        let reopened = open(tmp.path());
        assert_eq!(reopened.settings().mode, SurpriseMode::Css);
        assert_eq!(reopened.settings().surprise(), Surprise::Banner("Nice!".into()));
    }

    #[test]
    fn invalid_mode_leaves_settings_alone() {
        let tmp = TempDir::new().unwrap();
        let mut session = open(tmp.path());
        let err = session
            .on_settings_change(SettingsUpdate {
                mode: Some("Video".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::Settings(_)));
        assert_eq!(session.settings(), &Settings::default());
    }

    #[test]
    fn corrupt_document_fails_to_open() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tasks.json"), "{").unwrap();
        assert!(Session::open(tmp.path()).is_err());
    }
}
