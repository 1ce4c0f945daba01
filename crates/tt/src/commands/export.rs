//! Export command implementation.
//!
//! Writes every task to `tasks_export_<date>.json` in the configured export
//! directory and drops completed tasks from the active list. The automatic
//! weekly variant runs before task commands when `auto_export` is enabled.

use chrono::NaiveDate;
use serde::Serialize;
use tasktrack_core::archive::due_export_dates;
use tasktrack_core::{ExportSummary, Exporter};
use tracing::debug;

use super::config::save_config;
use super::{CommandContext, Result, Session};

/// JSON output structure for an export.
#[derive(Serialize)]
struct ExportOutput {
    date: NaiveDate,
    path: String,
    exported: usize,
    removed: usize,
    automatic: bool,
}

/// Executes the export command.
///
/// A manual export is dated today and does not move `last_export_date`.
pub fn execute(ctx: &CommandContext, session: &mut Session) -> Result<()> {
    let exporter = Exporter::new(session.config.export_dir()?);
    let summary = exporter.export(&mut session.tasks, session.today)?;
    session.save()?;

    report(ctx, &summary, session.today, false)
}

/// Runs the weekly exports owed since `last_export_date`.
///
/// Does nothing unless `auto_export` is enabled. Tasks and config are saved
/// after each export so an interrupted catch-up resumes where it stopped.
pub fn run_auto_export(ctx: &CommandContext, session: &mut Session) -> Result<()> {
    if !session.config.auto_export {
        return Ok(());
    }

    let exporter = Exporter::new(session.config.export_dir()?);
    let dates = due_export_dates(session.config.last_export_date, session.today);
    debug!(
        last = ?session.config.last_export_date,
        pending = dates.len(),
        dir = %exporter.dir().display(),
        "checking automatic export"
    );

    for date in dates {
        let summary = exporter.export(&mut session.tasks, date)?;
        session.save()?;
        session.config.last_export_date = Some(date);
        save_config(&session.config)?;
        report(ctx, &summary, date, true)?;
    }
    Ok(())
}

fn report(
    ctx: &CommandContext,
    summary: &ExportSummary,
    date: NaiveDate,
    automatic: bool,
) -> Result<()> {
    if ctx.json_output {
        let output = ExportOutput {
            date,
            path: summary.path.display().to_string(),
            exported: summary.exported,
            removed: summary.removed,
            automatic,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let message = format!("Tasks exported to {}", summary.path.display());
        let removed = format!(
            "{} completed task(s) removed from the task list.",
            summary.removed
        );
        if ctx.use_colors {
            println!("{}", message.green());
            println!("{}", removed.green());
        } else {
            println!("{message}");
            println!("{removed}");
        }
    }
    Ok(())
}
