//! Task data model.
//!
//! These types are what gets persisted to the task file and what the date
//! resolver and filter evaluator operate on.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a user-supplied enum value cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Which kind of value was being parsed (e.g. "priority").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Human-readable list of accepted values.
    pub expected: &'static str,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// How ambiguous due-date tokens are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateInputMode {
    /// Only fully specified `YYYYMMDD` tokens are accepted.
    #[default]
    Strict,
    /// `DD` and `MMDD` tokens are accepted and completed by inference.
    Smart,
}

impl DateInputMode {
    /// Returns the config-file spelling of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateInputMode::Strict => "strict",
            DateInputMode::Smart => "smart",
        }
    }
}

impl fmt::Display for DateInputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateInputMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(DateInputMode::Strict),
            "smart" => Ok(DateInputMode::Smart),
            _ => Err(ParseEnumError::new("date input mode", s, "smart, strict")),
        }
    }
}

/// Task priority.
///
/// Variants are declared from most to least urgent so that the derived
/// ordering sorts high-priority tasks first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    /// The lowercase name used in storage and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(ParseEnumError::new("priority", s, "high, normal, low")),
        }
    }
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "completed")]
    Completed,
}

impl Status {
    /// The lowercase name used in storage and output, e.g. `in progress`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not started",
            Status::InProgress => "in progress",
            Status::Review => "review",
            Status::Completed => "completed",
        }
    }

    /// Returns true for statuses that mean work is underway but not done.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::InProgress | Status::Review)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    /// Accepts `-` and `_` in place of spaces, and `started` as a synonym
    /// for `in progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "not started" => Ok(Status::NotStarted),
            "in progress" | "started" => Ok(Status::InProgress),
            "review" => Ok(Status::Review),
            "completed" => Ok(Status::Completed),
            _ => Err(ParseEnumError::new(
                "status",
                s,
                "not-started, in-progress, review, completed",
            )),
        }
    }
}

/// A tracked task.
///
/// `due_date` is serialized in canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, monotonically assigned identifier (starts at 1).
    pub id: u32,

    pub name: String,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tag: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,
}

impl Task {
    /// Creates a task with default description, tag, priority and status.
    pub fn new(id: u32, name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            due_date,
            description: String::new(),
            tag: String::new(),
            priority: Priority::default(),
            status: Status::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
