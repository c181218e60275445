//! The `parse` command: one summary line block per hand, or the normalised
//! hands as a JSON array.

use std::io::Write;

use handscope_engine::errors::HandError;
use handscope_engine::model::HandHistory;
use handscope_engine::parser::parse_hand;

use super::{load_input, report_parse_warnings, split_reporting};
use crate::error::{BatchValidationError, CliError};
use crate::formatters::{format_board, format_card};

pub fn handle_parse_command(
    input: &str,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = load_input(input)?;
    let split = split_reporting(&text, err)?;

    let mut hands = Vec::with_capacity(split.hands.len());
    let mut failures: Vec<BatchValidationError<usize>> = Vec::new();
    for (i, chunk) in split.hands.iter().enumerate() {
        match parse_hand(chunk) {
            Ok(parsed) => {
                report_parse_warnings(err, i + 1, &parsed.warnings)?;
                hands.push(parsed.value);
            }
            Err(e) => failures.push(BatchValidationError {
                item_context: i + 1,
                message: CliError::from(HandError::from(e)).to_string(),
            }),
        }
    }

    if json {
        let body = serde_json::to_string_pretty(&hands).map_err(std::io::Error::other)?;
        writeln!(out, "{}", body)?;
    } else {
        for hand in &hands {
            write_summary(out, hand)?;
        }
    }

    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        writeln!(err, "Hand {}", failure)?;
    }
    Err(CliError::InvalidInput(format!(
        "{} of {} hand(s) could not be parsed",
        failures.len(),
        split.hands.len()
    )))
}

fn write_summary(out: &mut dyn Write, hand: &HandHistory) -> Result<(), CliError> {
    let unit = hand.context.unit();
    let kind = if hand.context.is_tournament {
        "tournament"
    } else {
        "cash"
    };
    writeln!(out, "Hand #{} ({} {})", hand.id, hand.site, kind)?;
    if let Some(table) = &hand.table_name {
        writeln!(out, "  Table: {}", table)?;
    }
    writeln!(
        out,
        "  Blinds: {}/{}",
        unit.format(hand.stakes.small_blind),
        unit.format(hand.stakes.big_blind)
    )?;
    for p in &hand.players {
        let cards = p
            .hole_cards
            .as_deref()
            .map(|c| {
                let shown: Vec<String> = c.iter().map(format_card).collect();
                format!(" [{}]", shown.join(" "))
            })
            .unwrap_or_default();
        let hero = if p.is_hero { " (hero)" } else { "" };
        writeln!(
            out,
            "  Seat {}: {} {}{}{}",
            p.seat,
            p.name,
            unit.format(p.stack),
            hero,
            cards
        )?;
    }
    writeln!(out, "  Board: {}", format_board(&hand.board()))?;
    if let Some(total) = hand.total_pot() {
        writeln!(
            out,
            "  Pot: {} (rake {})",
            unit.format(total),
            unit.format(hand.rake())
        )?;
    }
    if let Some(summary) = &hand.summary {
        for name in hand.winners() {
            let won = summary.winnings.get(name).copied().unwrap_or(0);
            writeln!(out, "  {} wins {}", name, unit.format(won))?;
        }
    }
    Ok(())
}
