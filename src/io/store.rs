use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::settings::Settings;
use crate::model::stats::Stats;
use crate::model::task::{Task, new_task_id};

/// Error type for document I/O. Always fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data directory {0} does not exist")]
    MissingDir(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize {document}: {source}")]
    SerializeError {
        document: Document,
        source: serde_json::Error,
    },
}

/// The three persisted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Tasks,
    Stats,
    Settings,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Document::Tasks => "tasks.json",
            Document::Stats => "stats.json",
            Document::Settings => "settings.json",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Whole-file JSON store rooted at a data directory.
///
/// Every save rewrites the full document through a temp file + rename, so a
/// reader sees either the previous version or the new one.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store in an existing directory
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::MissingDir(dir.to_path_buf()));
        }
        Ok(Store {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, document: Document) -> PathBuf {
        self.dir.join(document.file_name())
    }

    pub fn exists(&self, document: Document) -> bool {
        self.path(document).exists()
    }

    /// Read and parse a document. `Ok(None)` when the file does not exist.
    pub fn load<T: DeserializeOwned>(&self, document: Document) -> Result<Option<T>, StoreError> {
        let path = self.path(document);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|source| StoreError::ReadError {
            path: path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&text).map_err(|source| StoreError::ParseError {
            path: path.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Overwrite a document with the pretty-printed JSON of `value`
    pub fn save<T: Serialize + ?Sized>(&self, document: Document, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::SerializeError { document, source })?;
        let path = self.path(document);

        if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
            recovery::log_recovery(
                &self.dir,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category: RecoveryCategory::Write,
                    description: format!("{} write failed", document),
                    fields: vec![
                        ("Target".to_string(), document.file_name().to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: content,
                },
            );
            return Err(StoreError::WriteError { path, source: e });
        }
        tracing::debug!(%document, bytes = content.len(), "saved document");
        Ok(())
    }

    /// Load the task list, giving a fresh ID to any record that lacks one or
    /// repeats an earlier record's ID. The corrected list is written back
    /// straight away.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.load(Document::Tasks)?.unwrap_or_default();

        let mut seen = HashSet::new();
        let mut backfilled = 0usize;
        for task in tasks.iter_mut() {
            if task.id.is_empty() || seen.contains(&task.id) {
                task.id = new_task_id();
                backfilled += 1;
            }
            seen.insert(task.id.clone());
        }
        if backfilled > 0 {
            tracing::info!(backfilled, "assigned IDs to tasks without a unique one");
            self.save_tasks(&tasks)?;
        }
        Ok(tasks)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(Document::Tasks, tasks)
    }

    pub fn load_stats(&self) -> Result<Stats, StoreError> {
        Ok(self.load(Document::Stats)?.unwrap_or_default())
    }

    pub fn save_stats(&self, stats: &Stats) -> Result<(), StoreError> {
        self.save(Document::Stats, stats)
    }

    /// Load settings, writing the default document first if none exists
    pub fn load_settings(&self) -> Result<Settings, StoreError> {
        if !self.exists(Document::Settings) {
            tracing::info!("no settings document, writing defaults");
            self.save_settings(&Settings::default())?;
        }
        Ok(self.load(Document::Settings)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.save(Document::Settings, settings)
    }
}
