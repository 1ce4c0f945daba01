//! Add command implementation.
//!
//! Resolves the due-date token with the configured input mode and appends
//! the task to the task file.

use tasktrack_core::{NewTask, Priority};

use super::{CommandContext, Result, Session};
use crate::output::{format_task_details, format_task_json};

/// Options for the add command.
#[derive(Debug)]
pub struct AddOptions {
    /// Task name.
    pub name: String,
    /// Raw due-date token.
    pub due: String,
    /// Task description.
    pub description: Option<String>,
    /// Task tag.
    pub tag: Option<String>,
    /// Task priority.
    pub priority: Option<Priority>,
}

/// Executes the add command.
///
/// # Errors
///
/// Returns an error if the due token is rejected or the task file cannot be
/// written. A rejected token leaves the task file untouched.
pub fn execute(ctx: &CommandContext, opts: &AddOptions, session: &mut Session) -> Result<()> {
    let mode = session.mode();
    let today = session.today;
    let new = NewTask {
        name: opts.name.clone(),
        due: opts.due.clone(),
        description: opts.description.clone(),
        tag: opts.tag.clone(),
        priority: opts.priority,
    };

    let task = session.tasks.add(new, mode, today)?.clone();
    session.save()?;

    if ctx.json_output {
        println!("{}", format_task_json(&task)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        if ctx.use_colors {
            println!("{}", "Task added successfully!".green());
        } else {
            println!("Task added successfully!");
        }
        if ctx.verbose {
            print!("{}", format_task_details(&task, today, ctx.use_colors));
        } else {
            println!("{} (ID {}) due {}", task.name, task.id, task.due_date);
        }
    }

    Ok(())
}
