//! Command handler modules for the handscope CLI.
//!
//! Every command follows the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in so tests can capture them
//! - Errors propagated through [`CliError`]

mod cfg;
mod equity;
mod parse;
mod replay;
mod split;
mod verify;

pub use cfg::handle_cfg_command;
pub use equity::{EquityArgs, handle_equity_command};
pub use parse::handle_parse_command;
pub use replay::handle_replay_command;
pub use split::handle_split_command;
pub use verify::handle_verify_command;

use std::io::Write;

use handscope_engine::errors::{HandError, ParseWarning};
use handscope_engine::splitter::{Split, split_hands};

use crate::error::CliError;
use crate::io_utils::read_input;
use crate::ui;

/// Reads `--input`, with `-` meaning stdin.
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    read_input(input, &mut std::io::stdin()).map_err(CliError::InvalidInput)
}

/// Splits the input and prints what the splitter skipped.
pub(crate) fn split_reporting<'a>(
    text: &'a str,
    err: &mut dyn Write,
) -> Result<Split<'a>, CliError> {
    let split = split_hands(text).map_err(HandError::from)?;
    for warning in &split.warnings {
        ui::display_warning(err, &warning.to_string())?;
    }
    Ok(split)
}

pub(crate) fn report_parse_warnings(
    err: &mut dyn Write,
    hand: usize,
    warnings: &[ParseWarning],
) -> Result<(), CliError> {
    for w in warnings {
        ui::display_warning(err, &format!("hand {} {}", hand, w))?;
    }
    Ok(())
}
