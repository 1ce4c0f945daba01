//! List and filter command implementations.
//!
//! Both print tasks ordered by due date and then priority; `filter` first
//! keeps only the tasks matching every supplied criterion.

use tasktrack_core::filter::FilterEvaluator;
use tasktrack_core::{FilterCriteria, Task};
use tracing::debug;

use super::{CommandContext, Result, Session};
use crate::output::helpers::sort_for_display;
use crate::output::{format_tasks_json, format_tasks_table};

/// Executes the list command.
pub fn execute_list(ctx: &CommandContext, session: &Session) -> Result<()> {
    let tasks: Vec<&Task> = session.tasks.iter().collect();
    print_tasks(ctx, session, tasks)
}

/// Executes the filter command.
///
/// # Errors
///
/// Returns an error if the due token cannot be resolved.
pub fn execute_filter(
    ctx: &CommandContext,
    criteria: &FilterCriteria,
    session: &Session,
) -> Result<()> {
    let evaluator = FilterEvaluator::resolve(criteria, session.mode(), session.today)?;
    if let Some(range) = evaluator.range() {
        debug!(start = %range.start(), end = %range.end(), "resolved due filter");
    }

    let tasks = evaluator.filter_tasks(session.tasks.tasks());
    print_tasks(ctx, session, tasks)
}

fn print_tasks(ctx: &CommandContext, session: &Session, mut tasks: Vec<&Task>) -> Result<()> {
    sort_for_display(&mut tasks);

    if ctx.json_output {
        println!("{}", format_tasks_json(&tasks)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_tasks_table(&tasks, session.today, ctx.use_colors)
        );
    }

    Ok(())
}
