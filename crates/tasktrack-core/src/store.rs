//! Task file storage with XDG path support.
//!
//! Tasks are persisted as a pretty-printed JSON array at
//! `~/.local/share/tt/tasks.json` (platform equivalents elsewhere). The store
//! does no locking; callers load, modify, and save within one process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::tasks::TaskList;

/// Default task filename.
const TASKS_FILENAME: &str = "tasks.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "tt";

/// Errors that can occur during task storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read task file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write task file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for task store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent storage for the task list.
///
/// # Example
///
/// ```no_run
/// use tasktrack_core::{TaskList, TaskStore};
///
/// let store = TaskStore::new()?;
///
/// // Load existing tasks or start with an empty list
/// let tasks = store.load_or_default()?;
///
/// store.save(&tasks)?;
/// # Ok::<(), tasktrack_core::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Path to the task file.
    path: PathBuf,
}

impl TaskStore {
    /// Creates a new `TaskStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `TaskStore` with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default XDG path for the task file.
    ///
    /// On Unix: `~/.local/share/tt/tasks.json`
    /// On macOS: `~/Library/Application Support/tt/tasks.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\tt\data\tasks.json`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(StoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(TASKS_FILENAME))
    }

    /// Returns the path to the task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the task list from disk.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file cannot be read (including
    ///   when it does not exist; see [`load_or_default`](Self::load_or_default)).
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<TaskList> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let tasks: TaskList = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Loads the task list, returning an empty list if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<TaskList> {
        match self.load() {
            Ok(tasks) => Ok(tasks),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "task file missing, starting empty");
                Ok(TaskList::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the task list to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist, writes to a
    /// temporary file and renames it over the task file.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StoreError::WriteError` if the file cannot be written.
    /// - Returns `StoreError::Json` if serialization fails.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(tasks)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Returns true if the task file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
