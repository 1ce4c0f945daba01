//! Task output formatting.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;
use tasktrack_core::{Priority, Status, Task};

use super::helpers::{truncate_str, TaskStyle};

/// Widest tag shown in the table before truncation.
const TAG_WIDTH: usize = 12;

/// JSON output structure for list and filter commands.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub tasks: Vec<TaskOutput<'a>>,
    pub count: usize,
}

/// JSON output structure for a single task.
#[derive(Serialize)]
pub struct TaskOutput<'a> {
    pub id: u32,
    pub name: &'a str,
    pub due_date: NaiveDate,
    pub description: &'a str,
    pub tag: &'a str,
    pub priority: Priority,
    pub status: Status,
}

impl<'a> From<&'a Task> for TaskOutput<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            name: &task.name,
            due_date: task.due_date,
            description: &task.description,
            tag: &task.tag,
            priority: task.priority,
            status: task.status,
        }
    }
}

/// JSON output structure for deleted tasks.
#[derive(Serialize)]
pub struct DeletedOutput<'a> {
    pub deleted: Vec<TaskOutput<'a>>,
}

/// Formats tasks as JSON.
pub fn format_tasks_json(tasks: &[&Task]) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        tasks: tasks.iter().map(|task| TaskOutput::from(*task)).collect(),
        count: tasks.len(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a single task as JSON.
pub fn format_task_json(task: &Task) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TaskOutput::from(task))
}

/// Formats deleted tasks as JSON.
pub fn format_deleted_json(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let output = DeletedOutput {
        deleted: tasks.iter().map(TaskOutput::from).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats tasks as a table, one highlighted line per task.
///
/// Descriptions are printed indented below their task.
pub fn format_tasks_table(tasks: &[&Task], today: NaiveDate, use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<5} {:<10} {:<8} {:<12} {:<12} {}",
        "ID", "Due", "Priority", "Status", "Tag", "Name"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        let line = format!(
            "{:<5} {:<10} {:<8} {:<12} {:<12} {}",
            task.id,
            task.due_date.to_string(),
            task.priority.as_str(),
            task.status.as_str(),
            truncate_str(&task.tag, TAG_WIDTH),
            task.name
        );
        let style = TaskStyle::for_task(task, today);
        output.push_str(&style.paint(&line, use_colors));
        output.push('\n');

        if !task.description.is_empty() {
            for desc_line in task.description.lines() {
                output.push_str(&format!("      {desc_line}\n"));
            }
        }
    }

    output
}

/// Formats a task's details for display after add or update.
pub fn format_task_details(task: &Task, today: NaiveDate, use_colors: bool) -> String {
    let mut output = String::new();

    let name_label = if use_colors {
        "Task:".bold().to_string()
    } else {
        "Task:".to_string()
    };
    let style = TaskStyle::for_task(task, today);
    output.push_str(&format!(
        "{} {}\n",
        name_label,
        style.paint(&task.name, use_colors)
    ));
    output.push_str(&format!("ID: {}\n", task.id));
    output.push_str(&format!("Due: {}\n", task.due_date));
    output.push_str(&format!("Priority: {}\n", task.priority));
    output.push_str(&format!("Status: {}\n", task.status));
    if !task.tag.is_empty() {
        output.push_str(&format!("Tag: {}\n", task.tag));
    }
    if !task.description.is_empty() {
        output.push_str("Description:\n");
        for line in task.description.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}
