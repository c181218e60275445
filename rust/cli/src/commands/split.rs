//! The `split` command: counts the hands in an export and lists where each
//! one starts.

use std::io::Write;

use handscope_engine::parser::SiteGrammar;

use super::{load_input, split_reporting};
use crate::error::CliError;

pub fn handle_split_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = load_input(input)?;
    let split = split_reporting(&text, err)?;

    writeln!(
        out,
        "Split: {} hand(s), {} skipped",
        split.hands.len(),
        split.warnings.len()
    )?;
    for (i, hand) in split.hands.iter().enumerate() {
        let site = SiteGrammar::sniff(hand)
            .map(|g| g.site().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let header = hand.lines().next().unwrap_or_default().trim();
        writeln!(out, "  {:>3}  {:<10}  {}", i + 1, site, header)?;
    }
    Ok(())
}
