use clap::Parser;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::{Cli, Commands};
use commands::{CommandContext, CommandError};
use tasktrack_core::TaskError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e, cli.json);
            error_exit_code(&e)
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        None | Some(Commands::Shell) => commands::shell::run(&ctx).await,
        Some(_) => dispatch::execute(cli, &ctx).await,
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over
/// the default level.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints an error to stderr, as JSON when requested.
pub(crate) fn print_error(e: &CommandError, json: bool) {
    if json {
        let error_json = serde_json::json!({
            "error": {
                "code": error_code(e),
                "message": e.to_string(),
            }
        });
        match serde_json::to_string_pretty(&error_json) {
            Ok(s) => eprintln!("{s}"),
            Err(_) => eprintln!("{error_json}"),
        }
    } else {
        eprintln!("Error: {e}");
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Date(_) => "DATE_ERROR",
        CommandError::Task(TaskError::Date(_)) => "DATE_ERROR",
        CommandError::Task(TaskError::NotFound { .. }) => "NOT_FOUND",
        CommandError::Task(TaskError::IdExhausted { .. }) => "ID_EXHAUSTED",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Archive(_) => "EXPORT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Date(_) => 1,
        CommandError::Filter(_) => 1,
        CommandError::Task(TaskError::Date(_)) => 1,
        CommandError::Task(TaskError::NotFound { .. }) => 4,
        CommandError::Task(TaskError::IdExhausted { .. }) => 5,
        CommandError::Store(_) => 5,
        CommandError::Archive(_) => 3,
        CommandError::Config(_) => 5,
        CommandError::Usage(_) => 2,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}
