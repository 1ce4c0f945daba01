//! Update and done command implementations.

use tasktrack_core::{Status, Task, TaskUpdate};

use super::{CommandContext, CommandError, Result, Session};
use crate::output::{format_task_details, format_task_json, format_tasks_json};

/// Executes the update command.
///
/// # Errors
///
/// Returns an error if nothing would change, the task does not exist, or a
/// new due token is rejected. Nothing is written on error.
pub fn execute(
    ctx: &CommandContext,
    id: u32,
    update: TaskUpdate,
    session: &mut Session,
) -> Result<()> {
    if update.is_empty() {
        return Err(CommandError::Usage(
            "Nothing to update. Pass at least one of --status, --name, --due, --desc, --tag, --priority"
                .to_string(),
        ));
    }

    let mode = session.mode();
    let today = session.today;
    let task = session.tasks.update(id, update, mode, today)?.clone();
    session.save()?;

    if ctx.json_output {
        println!("{}", format_task_json(&task)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        if ctx.use_colors {
            println!("{}", "Task updated!".green());
        } else {
            println!("Task updated!");
        }
        if ctx.verbose {
            print!("{}", format_task_details(&task, today, ctx.use_colors));
        }
    }

    Ok(())
}

/// Executes the done command, marking each task completed.
///
/// # Errors
///
/// Fails on the first unknown ID before anything is written.
pub fn execute_done(ctx: &CommandContext, ids: &[u32], session: &mut Session) -> Result<()> {
    for id in ids {
        if session.tasks.get(*id).is_none() {
            return Err(tasktrack_core::TaskError::NotFound { id: *id }.into());
        }
    }

    let mut done: Vec<Task> = Vec::with_capacity(ids.len());
    for id in ids {
        done.push(session.tasks.set_status(*id, Status::Completed)?.clone());
    }
    session.save()?;

    if ctx.json_output {
        let refs: Vec<&Task> = done.iter().collect();
        println!("{}", format_tasks_json(&refs)?);
    } else if !ctx.quiet {
        for task in &done {
            println!("Completed: {} (ID {})", task.name, task.id);
        }
    }

    Ok(())
}
