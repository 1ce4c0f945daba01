//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Standalone commands (config, completions) never touch the task file.
//! Task commands run against a [`Session`], after any due automatic export.

use tasktrack_core::{FilterCriteria, Priority, Status, TaskUpdate};

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::{self, CommandContext, CommandError, Result, Session};

/// Trait for commands that run without loading the task file.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that operate on the loaded task list.
pub trait TaskCommand {
    /// Execute the command against an open session.
    fn execute(&self, ctx: &CommandContext, session: &mut Session) -> Result<()>;
}

/// Commands that don't load the task file.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a crate::cli::Shell),
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None for task commands and for `config edit`.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => None,
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
        }
    }
}

/// Dispatch the synchronous config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => Err(CommandError::Config(
            "edit requires async context".into(),
        )),
    }
}

/// Commands that operate on tasks.
pub enum TaskDispatch<'a> {
    Add {
        name: &'a str,
        due: &'a str,
        desc: &'a Option<String>,
        tag: &'a Option<String>,
        priority: Option<Priority>,
    },
    List,
    Filter(FilterCriteria),
    Update {
        id: u32,
        status: Option<Status>,
        name: &'a Option<String>,
        due: &'a Option<String>,
        desc: &'a Option<String>,
        tag: &'a Option<String>,
        priority: Option<Priority>,
    },
    Done(&'a [u32]),
    Delete(&'a [u32]),
    Export,
}

impl<'a> TaskDispatch<'a> {
    /// Create a task dispatch from the CLI command.
    /// Returns None for standalone commands and the interactive shell.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Add {
                name,
                due,
                desc,
                tag,
                priority,
            }) => Some(Self::Add {
                name,
                due,
                desc,
                tag,
                priority: *priority,
            }),
            Some(Commands::List) => Some(Self::List),
            Some(Commands::Filter {
                due,
                priority,
                name_prefix,
                tag,
                description,
            }) => Some(Self::Filter(FilterCriteria {
                due: due.clone(),
                priority: *priority,
                name_prefix: name_prefix.clone(),
                tag: tag.clone(),
                description: description.clone(),
            })),
            Some(Commands::Update {
                id,
                status,
                name,
                due,
                desc,
                tag,
                priority,
            }) => Some(Self::Update {
                id: *id,
                status: *status,
                name,
                due,
                desc,
                tag,
                priority: *priority,
            }),
            Some(Commands::Done { ids }) => Some(Self::Done(ids)),
            Some(Commands::Delete { ids }) => Some(Self::Delete(ids)),
            Some(Commands::Export) => Some(Self::Export),
            Some(Commands::Config { .. })
            | Some(Commands::Completions { .. })
            | Some(Commands::Shell)
            | None => None,
        }
    }
}

impl TaskCommand for TaskDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, session: &mut Session) -> Result<()> {
        match self {
            Self::Add {
                name,
                due,
                desc,
                tag,
                priority,
            } => {
                let opts = commands::add::AddOptions {
                    name: (*name).to_string(),
                    due: (*due).to_string(),
                    description: (*desc).clone(),
                    tag: (*tag).clone(),
                    priority: *priority,
                };
                commands::add::execute(ctx, &opts, session)
            }
            Self::List => commands::list::execute_list(ctx, session),
            Self::Filter(criteria) => commands::list::execute_filter(ctx, criteria, session),
            Self::Update {
                id,
                status,
                name,
                due,
                desc,
                tag,
                priority,
            } => {
                let update = TaskUpdate {
                    name: (*name).clone(),
                    due: (*due).clone(),
                    description: (*desc).clone(),
                    tag: (*tag).clone(),
                    priority: *priority,
                    status: *status,
                };
                commands::update::execute(ctx, *id, update, session)
            }
            Self::Done(ids) => commands::update::execute_done(ctx, ids, session),
            Self::Delete(ids) => commands::delete::execute(ctx, ids, session),
            Self::Export => commands::export::execute(ctx, session),
        }
    }
}

/// Runs a parsed command line.
///
/// Used both for the process arguments and for each interactive shell line.
pub async fn execute(cli: &Cli, ctx: &CommandContext) -> Result<()> {
    if matches!(
        &cli.command,
        Some(Commands::Config {
            command: Some(ConfigCommands::Edit)
        })
    ) {
        return commands::config::execute_edit(ctx).await;
    }

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(ctx);
    }

    if let Some(dispatch) = TaskDispatch::from_cli(cli) {
        let mut session = Session::open()?;
        let ctx = ctx.clone().with_config(&session.config);
        commands::export::run_auto_export(&ctx, &mut session)?;
        return dispatch.execute(&ctx, &mut session);
    }

    // The interactive shell is started by the caller.
    Ok(())
}
