//! Interactive shell.
//!
//! Reads command lines at a `>>` prompt and runs each one exactly as if it
//! had been passed to `tt` on the command line. When stdin is not a
//! terminal, lines are read from it without prompting so the shell can be
//! scripted.

use std::io::{self, IsTerminal};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dialoguer::console::Term;
use dialoguer::Input;
use strsim::levenshtein;
use tracing::debug;

use super::{CommandContext, CommandError, Result};
use crate::cli::{Cli, Commands};
use crate::dispatch;

const PROMPT: &str = ">>";

/// Maximum Levenshtein distance to consider a word as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Words handled by the shell itself rather than by the CLI parser.
const BUILTINS: &[&str] = &["help", "clear", "exit", "quit"];

/// A classified line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellLine {
    Empty,
    Exit,
    Help,
    Clear,
    Command(Vec<String>),
}

/// Splits a line into words and classifies it.
///
/// # Errors
///
/// Returns an error if the line has unbalanced quotes.
pub fn parse_line(line: &str) -> Result<ShellLine> {
    let words = shlex::split(line)
        .ok_or_else(|| CommandError::Usage(format!("Unbalanced quotes in '{}'", line.trim())))?;

    let line = match words.first().map(String::as_str) {
        None => ShellLine::Empty,
        Some("exit" | "quit") => ShellLine::Exit,
        Some("help") if words.len() == 1 => ShellLine::Help,
        Some("clear") => ShellLine::Clear,
        Some(_) => ShellLine::Command(words),
    };
    Ok(line)
}

/// Returns the closest known command to `word`, if it is close enough.
pub fn suggest_command(word: &str) -> Option<String> {
    let cmd = Cli::command();
    let query = word.to_lowercase();

    let (best, distance) = cmd
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .chain(BUILTINS.iter().map(|b| (*b).to_string()))
        .map(|name| {
            let distance = levenshtein(&query, &name);
            (name, distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE && distance < query.chars().count() {
        Some(best)
    } else {
        None
    }
}

/// Runs the shell until `exit`, `quit`, or end of input.
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    if interactive && !ctx.quiet {
        println!(
            "Entering interactive mode. Type 'help' for commands, 'clear' to clear the screen, or 'exit' to quit."
        );
    }

    while let Some(line) = read_line(interactive)? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                crate::print_error(&e, ctx.json_output);
                continue;
            }
        };

        match parsed {
            ShellLine::Empty => {}
            ShellLine::Exit => {
                if !ctx.quiet {
                    println!("Exiting...");
                }
                return Ok(());
            }
            ShellLine::Help => print_help()?,
            ShellLine::Clear => {
                if interactive {
                    Term::stdout().clear_screen()?;
                }
            }
            ShellLine::Command(words) => run_line(ctx, words).await,
        }
    }

    Ok(())
}

fn read_line(interactive: bool) -> Result<Option<String>> {
    if interactive {
        let line = Input::<String>::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;
        return Ok(Some(line));
    }

    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

fn print_help() -> Result<()> {
    println!("Shell commands:");
    println!("  help    Show this help");
    println!("  clear   Clear the screen");
    println!("  exit    Leave the shell (also: quit)");
    println!();
    let mut cmd = Cli::command();
    println!("{}", cmd.render_help());
    Ok(())
}

/// Parses and runs one command line. Errors are reported and swallowed so
/// the shell keeps going.
async fn run_line(outer: &CommandContext, words: Vec<String>) {
    let first = words.first().cloned().unwrap_or_default();
    debug!(?words, "shell command");

    let args = std::iter::once("tt".to_string()).chain(words);
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => print!("{e}"),
                ErrorKind::InvalidSubcommand => {
                    eprintln!("Unknown command '{first}'.");
                    if let Some(suggestion) = suggest_command(&first) {
                        eprintln!("Did you mean '{suggestion}'?");
                    }
                }
                _ => eprint!("{}", e.render()),
            }
            return;
        }
    };

    if matches!(cli.command, None | Some(Commands::Shell)) {
        println!("Already in interactive mode.");
        return;
    }

    let ctx = line_context(outer, &cli);
    if let Err(e) = dispatch::execute(&cli, &ctx).await {
        crate::print_error(&e, ctx.json_output);
    }
}

/// Combines the shell's own flags with those given on the line.
fn line_context(outer: &CommandContext, cli: &Cli) -> CommandContext {
    let inner = CommandContext::from_cli(cli);
    let quiet = outer.quiet || inner.quiet;
    CommandContext {
        json_output: outer.json_output || inner.json_output,
        use_colors: outer.use_colors && inner.use_colors,
        quiet,
        verbose: (outer.verbose || inner.verbose) && !quiet,
    }
}
