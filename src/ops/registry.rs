use crate::model::task::{MAX_TASKS, Task};

/// Error type for task operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("at most {max} tasks allowed")]
    Capacity { max: usize },
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("ID prefix '{0}' matches more than one task")]
    AmbiguousId(String),
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u8),
}

impl TaskError {
    /// Validation and capacity failures: shown inline, nothing changed
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TaskError::EmptyTitle | TaskError::Capacity { .. } | TaskError::ProgressOutOfRange(_)
        )
    }
}

/// Fields of the add-task form
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub wait_for: Option<String>,
}

/// In-memory list of active tasks, capped at [`MAX_TASKS`].
///
/// Persistence is the caller's job: every `Ok` from a mutating method means
/// the list changed and should be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    tasks: Vec<Task>,
}

impl Registry {
    pub fn new(tasks: Vec<Task>) -> Self {
        Registry { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= MAX_TASKS
    }

    /// Validate and append a new task. Returns the new task's ID.
    pub fn add(&mut self, new: NewTask) -> Result<String, TaskError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if self.is_full() {
            return Err(TaskError::Capacity { max: MAX_TASKS });
        }

        let mut task = Task::new(title.to_string(), new.description, new.wait_for);
        while self.find(&task.id).is_some() {
            task.id = crate::model::task::new_task_id();
        }
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove a task by ID. Returns the removed task, or `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Resolve a full ID or a unique ID prefix to the task's full ID
    pub fn resolve(&self, prefix: &str) -> Result<String, TaskError> {
        if let Some(task) = self.find(prefix) {
            return Ok(task.id.clone());
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|t| !prefix.is_empty() && t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id.clone()),
            (Some(_), Some(_)) => Err(TaskError::AmbiguousId(prefix.to_string())),
            _ => Err(TaskError::NotFound(prefix.to_string())),
        }
    }

    /// Drop every task that has reached 100%, returning them in list order
    pub fn remove_completed(&mut self) -> Vec<Task> {
        let (done, active): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.tasks).into_iter().partition(Task::is_complete);
        self.tasks = active;
        done
    }
}
