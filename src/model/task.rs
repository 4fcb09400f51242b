use serde::{Deserialize, Deserializer, Serialize};

/// Most tasks the registry will hold at once
pub const MAX_TASKS: usize = 10;

/// Upper bound of the progress slider
pub const MAX_PROGRESS: u8 = 100;

/// A single tracked task, as stored in tasks.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique ID (UUID v4). Empty only for records that predate IDs
    /// and have not been backfilled yet.
    #[serde(default)]
    pub id: String,
    /// Task title, never empty for tasks created through the registry
    pub title: String,
    /// Free-form description
    #[serde(rename = "desc", default)]
    pub description: String,
    /// What the task is blocked on, if anything
    #[serde(default, deserialize_with = "empty_as_none")]
    pub wait_for: Option<String>,
    /// Completion percentage, 0..=100
    #[serde(default, deserialize_with = "bounded_progress")]
    pub progress: u8,
}

impl Task {
    /// Create a fresh task with a new ID and zero progress
    pub fn new(title: String, description: String, wait_for: Option<String>) -> Self {
        Task {
            id: new_task_id(),
            title,
            description,
            wait_for: wait_for
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty()),
            progress: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }

    /// The "waiting on" note, if one is set
    pub fn waiting_on(&self) -> Option<&str> {
        self.wait_for.as_deref()
    }

    /// First eight characters of the ID, enough to address a task by hand
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }
}

/// Generate a new opaque task ID
pub fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Older documents write `"wait_for": ""` for "no note"
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Progress beyond 100% means the document is corrupt
fn bounded_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value > MAX_PROGRESS {
        return Err(serde::de::Error::custom(format!(
            "progress {} is out of range 0..={}",
            value, MAX_PROGRESS
        )));
    }
    Ok(value)
}
