//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tt CLI. The same
//! definitions parse lines typed into the interactive shell.

use clap::{Parser, Subcommand, ValueEnum};
use tasktrack_core::{Priority, Status};

/// tt - Track tasks with smart due dates
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    // None starts the interactive shell.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    #[command(alias = "a")]
    Add {
        /// Task name
        name: String,

        /// Due date: YYYYMMDD, or DD / MMDD in smart mode
        #[arg(short, long)]
        due: String,

        /// Task description
        #[arg(long, visible_alias = "description")]
        desc: Option<String>,

        /// Task tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Priority (high, normal, low)
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// List all tasks
    #[command(aliases = ["l", "ls"])]
    List,

    /// List tasks matching every given criterion
    #[command(alias = "f")]
    Filter {
        /// Due date, today/tdy, tomorrow/tmrw, overmorrow/dat, jan..dec, or a year
        #[arg(short, long)]
        due: Option<String>,

        /// Priority (high, normal, low)
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Name prefix (case-sensitive)
        #[arg(short = 'n', long = "name", visible_alias = "name-prefix")]
        name_prefix: Option<String>,

        /// Tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Text the description contains (case-insensitive)
        #[arg(short = 's', long = "desc", visible_alias = "desc-contains")]
        description: Option<String>,
    },

    /// Update fields of a task
    #[command(aliases = ["u", "edit"])]
    Update {
        /// Task ID
        id: u32,

        /// New status (not-started, in-progress/started, review, completed)
        #[arg(short, long)]
        status: Option<Status>,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New due date
        #[arg(short, long)]
        due: Option<String>,

        /// New description
        #[arg(long, visible_alias = "description")]
        desc: Option<String>,

        /// New tag
        #[arg(short, long)]
        tag: Option<String>,

        /// New priority (high, normal, low)
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Mark tasks as completed
    #[command(alias = "d")]
    Done {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// Delete tasks
    #[command(alias = "rm")]
    Delete {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// Export all tasks and remove completed ones
    Export,

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Start the interactive shell
    #[command(alias = "repl")]
    Shell,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
