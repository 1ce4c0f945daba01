//! Output formatting utilities for the tt CLI.
//!
//! This module provides functions for formatting tasks as tables or JSON.
//!
//! - [`tasks`] - Task output formatting (list, filter, add, update, delete)
//! - [`helpers`] - Common formatting utilities (truncation, highlighting, ordering)

pub mod helpers;
mod tasks;

pub use tasks::{
    format_deleted_json, format_task_details, format_task_json, format_tasks_json,
    format_tasks_table,
};
