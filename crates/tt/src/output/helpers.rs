//! Common helper functions for output formatting.

use chrono::{Days, NaiveDate};
use owo_colors::OwoColorize;
use tasktrack_core::{Priority, Task};

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// How a task line is highlighted.
///
/// Chosen by status first, then due date, then priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStyle {
    Completed,
    InProgress,
    Due,
    DueTomorrow,
    HighPriority,
    LowPriority,
    Plain,
}

impl TaskStyle {
    /// Picks the style for `task` as of `today`.
    pub fn for_task(task: &Task, today: NaiveDate) -> Self {
        if task.is_completed() {
            return Self::Completed;
        }
        if task.status.is_active() {
            return Self::InProgress;
        }
        if task.due_date <= today {
            return Self::Due;
        }
        if today.checked_add_days(Days::new(1)) == Some(task.due_date) {
            return Self::DueTomorrow;
        }
        match task.priority {
            Priority::High => Self::HighPriority,
            Priority::Low => Self::LowPriority,
            Priority::Normal => Self::Plain,
        }
    }

    /// Applies the style to `text`.
    pub fn paint(self, text: &str, use_colors: bool) -> String {
        if !use_colors {
            return text.to_string();
        }
        match self {
            Self::Completed => text.green().to_string(),
            Self::InProgress => text.yellow().to_string(),
            Self::Due => text.red().to_string(),
            Self::DueTomorrow => text.bright_red().to_string(),
            Self::HighPriority => text.magenta().bold().to_string(),
            Self::LowPriority => text.dimmed().to_string(),
            Self::Plain => text.to_string(),
        }
    }
}

/// Orders tasks for display: earliest due date first, then high to low priority.
///
/// The sort is stable, so tasks that tie keep their stored order.
pub fn sort_for_display(tasks: &mut [&Task]) {
    tasks.sort_by_key(|task| (task.due_date, task.priority));
}
