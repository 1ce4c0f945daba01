//! Command implementations for the tt CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod add;
pub mod completions;
pub mod config;
pub mod delete;
pub mod export;
pub mod list;
pub mod shell;
pub mod update;

use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tasktrack_core::{DateInputMode, TaskList, TaskStore};
use tracing::debug;

use crate::cli::Cli;
use config::Config;

/// Environment variable overriding the task file location.
pub const TASKS_FILE_ENV: &str = "TT_TASKS_FILE";

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Due-date token error.
    #[error("{0}")]
    Date(#[from] tasktrack_core::DateError),

    /// Filter criteria error.
    #[error("filter error: {0}")]
    Filter(#[from] tasktrack_core::FilterError),

    /// Task lookup error.
    #[error("{0}")]
    Task(#[from] tasktrack_core::TaskError),

    /// Task store error.
    #[error("storage error: {0}")]
    Store(#[from] tasktrack_core::StoreError),

    /// Export error.
    #[error("export error: {0}")]
    Archive(#[from] tasktrack_core::ArchiveError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed command usage.
    #[error("{0}")]
    Usage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }

    /// Applies the `[output] color` config setting.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self
    }
}

/// Loaded state shared by the task commands.
///
/// Tasks are loaded when the session opens and written back by
/// [`Session::save`].
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub store: TaskStore,
    pub tasks: TaskList,
    pub today: NaiveDate,
}

impl Session {
    /// Loads the config and task file.
    ///
    /// The task file is read from `TT_TASKS_FILE` when set, otherwise from
    /// the platform data directory.
    pub fn open() -> Result<Self> {
        let config = config::load_config()?;
        let store = match env::var_os(TASKS_FILE_ENV) {
            Some(path) => TaskStore::with_path(PathBuf::from(path)),
            None => TaskStore::new()?,
        };
        let tasks = store.load_or_default()?;
        let today = Local::now().date_naive();
        debug!(path = %store.path().display(), %today, "opened session");

        Ok(Self {
            config,
            store,
            tasks,
            today,
        })
    }

    /// The configured date input mode.
    pub fn mode(&self) -> DateInputMode {
        self.config.date_input_mode
    }

    /// Writes the task list to disk.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.tasks)?;
        Ok(())
    }
}
