//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/tt/config.toml.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use chrono::NaiveDate;
use dialoguer::Confirm;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tasktrack_core::date::parse_canonical;
use tasktrack_core::DateInputMode;
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TT_CONFIG";

/// Keys accepted by `tt config set`.
const VALID_KEYS: &str =
    "date_input_mode, auto_export, export_path, last_export_date, output.color";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# tt - Task Tracker Configuration

# Config schema version (do not modify)
version = 1

# How due dates are read: "strict" (YYYYMMDD only) or "smart" (DD, MMDD, YYYYMMDD)
date_input_mode = "strict"

# Export tasks weekly and remove completed ones
auto_export = false

# Directory for export files (default: current directory)
# export_path = "~/task-exports"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
"#;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// How due-date tokens are interpreted.
    #[serde(default)]
    pub date_input_mode: DateInputMode,

    /// Run the weekly export before task commands.
    #[serde(default)]
    pub auto_export: bool,

    /// Export directory (current directory when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,

    /// Date of the last automatic export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_export_date: Option<NaiveDate>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            date_input_mode: DateInputMode::default(),
            auto_export: false,
            export_path: None,
            last_export_date: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the directory exports are written to.
    pub fn export_dir(&self) -> Result<PathBuf> {
        match &self.export_path {
            Some(path) => Ok(path.clone()),
            None => Ok(env::current_dir()?),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/tt/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("tt"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("tt"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
pub fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    debug!(path = %path.display(), "saved config");
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;
    let export_dir = config.export_dir()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
            "export_dir": export_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        println!("  date_input_mode: {}", config.date_input_mode);
        println!("  auto_export: {}", config.auto_export);
        println!("  export_path: {}", export_dir.display());
        match config.last_export_date {
            Some(date) => println!("  last_export_date: {}", date),
            None => println!("  last_export_date: (never)"),
        }

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {}", color);
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    // Create default config if it doesn't exist
    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    // Get editor from environment
    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    if ctx.verbose {
        eprintln!("Opening {} with {}", path.display(), editor);
    }

    // Open editor (async to avoid blocking the tokio runtime)
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    let shown_value = apply_setting(&mut config, &opts.key, &opts.value, |dir| {
        confirm_create_dir(ctx, dir)
    })?;

    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": shown_value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, shown_value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Validates `value` and stores it under `key`.
///
/// `create_dir` is asked before a missing export directory is created; if
/// it returns false the config is left unchanged. Returns the value as
/// stored, for display.
fn apply_setting<F>(config: &mut Config, key: &str, value: &str, create_dir: F) -> Result<String>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    match key {
        "date_input_mode" => {
            let mode: DateInputMode = value
                .parse()
                .map_err(|e: tasktrack_core::ParseEnumError| CommandError::Config(e.to_string()))?;
            config.date_input_mode = mode;
            Ok(mode.to_string())
        }
        "auto_export" => {
            config.auto_export = parse_bool(value)?;
            Ok(config.auto_export.to_string())
        }
        "export_path" => {
            let dir = expand_tilde(value)?;
            if !dir.is_dir() {
                if !create_dir(&dir)? {
                    return Err(CommandError::Config(format!(
                        "Export path not set. Directory '{}' does not exist.",
                        dir.display()
                    )));
                }
                fs::create_dir_all(&dir)?;
            }
            let shown = dir.display().to_string();
            config.export_path = Some(dir);
            Ok(shown)
        }
        "last_export_date" => {
            if value.eq_ignore_ascii_case("none") {
                config.last_export_date = None;
                return Ok("none".to_string());
            }
            let date = parse_canonical(value).ok_or_else(|| {
                CommandError::Config(format!(
                    "Invalid last_export_date '{}'. Use YYYY-MM-DD or 'none'",
                    value
                ))
            })?;
            config.last_export_date = Some(date);
            Ok(date.to_string())
        }
        "output.color" => {
            let color = parse_bool(value)?;
            config.output.color = Some(color);
            Ok(color.to_string())
        }
        _ => Err(CommandError::Config(format!(
            "Unknown config key '{}'. Valid keys: {}",
            key, VALID_KEYS
        ))),
    }
}

/// Asks whether a missing export directory should be created.
fn confirm_create_dir(ctx: &CommandContext, dir: &Path) -> Result<bool> {
    if ctx.quiet || ctx.json_output {
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(format!(
            "Directory '{}' does not exist. Create it?",
            dir.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };

    let home = BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| CommandError::Config("Could not determine home directory".to_string()))?;

    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
