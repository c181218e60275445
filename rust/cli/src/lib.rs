//! # handscope CLI Library
//!
//! Command-line surface over `handscope-engine`: split room exports into
//! hands, parse them, replay them step by step, verify that every chip is
//! accounted for, and estimate all-in equity.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a command handler and returns the
//! process exit code. Output streams are injected so tests can capture them.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handscope", "verify", "--input", "hands.txt"];
//! let code = handscope_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `split`: Count hands and list where each starts
//! - `parse`: Print a summary per hand, or JSON
//! - `replay`: Print every snapshot of one or all hands
//! - `verify`: Replay all hands and report failures by error code
//! - `equity`: Monte Carlo equity between two holdings
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HandscopeCli};
use commands::{
    EquityArgs, handle_cfg_command, handle_equity_command, handle_parse_command,
    handle_replay_command, handle_split_command, handle_verify_command,
};

pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` on any error, including usage errors.
///
/// ```
/// use std::io;
/// let args = vec!["handscope", "equity", "--hero", "AhKh", "--villain", "9s9d",
///                 "--board", "2h7hTcJdQh"];
/// let mut out = Vec::new();
/// let code = handscope_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandscopeCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Split { input } => handle_split_command(&input, out, err),
        Commands::Parse { input, json } => handle_parse_command(&input, json, out, err),
        Commands::Replay { input, hand, json } => {
            handle_replay_command(&input, hand, json, out, err)
        }
        Commands::Verify { input } => handle_verify_command(&input, out, err),
        Commands::Equity {
            hero,
            villain,
            board,
            iterations,
            seed,
            json,
        } => {
            let args = EquityArgs {
                hero,
                villain,
                board,
                iterations,
                seed,
                json,
            };
            handle_equity_command(&args, out)
        }
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed.
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }

    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "Usage: handscope <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in Commands::NAMES {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: handscope --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, err) = run_capture(&["handscope", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("replay"));
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_capture(&["handscope", "play"]);
        assert_eq!(code, 2);
        for c in Commands::NAMES {
            assert!(err.contains(&format!("  {}", c)), "missing {}", c);
        }
    }

    #[test]
    fn bad_cards_are_reported_as_invalid_input() {
        let (code, out, err) =
            run_capture(&["handscope", "equity", "--hero", "AhAh", "--villain", "KsKd"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Invalid input: --hero"));
    }

    #[test]
    fn missing_file_fails_cleanly() {
        let (code, _, err) = run_capture(&["handscope", "split", "--input", "/no/such/file.txt"]);
        assert_eq!(code, 2);
        assert!(err.contains("/no/such/file.txt"));
    }
}
