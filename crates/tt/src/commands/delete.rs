//! Delete command implementation.

use tasktrack_core::{Task, TaskError};

use super::{CommandContext, Result, Session};
use crate::output::format_deleted_json;

/// Executes the delete command.
///
/// Every ID is checked before any task is removed, so an unknown ID leaves
/// the task file unchanged.
///
/// # Errors
///
/// Returns [`TaskError::NotFound`] for the first unknown ID.
pub fn execute(ctx: &CommandContext, ids: &[u32], session: &mut Session) -> Result<()> {
    if let Some(missing) = ids.iter().find(|id| session.tasks.get(**id).is_none()) {
        return Err(TaskError::NotFound { id: *missing }.into());
    }

    let mut deleted: Vec<Task> = Vec::with_capacity(ids.len());
    for id in ids {
        // Repeated IDs were already removed on their first occurrence.
        if session.tasks.get(*id).is_some() {
            deleted.push(session.tasks.remove(*id)?);
        }
    }
    session.save()?;

    if ctx.json_output {
        println!("{}", format_deleted_json(&deleted)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        for task in &deleted {
            let message = format!("Task ID {} deleted successfully!", task.id);
            if ctx.use_colors {
                println!("{}", message.green());
            } else {
                println!("{message}");
            }
        }
        if ctx.verbose && deleted.len() > 1 {
            println!("\n{} deleted", deleted.len());
        }
    }

    Ok(())
}
