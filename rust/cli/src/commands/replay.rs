//! The `replay` command: prints the table state after every event, or the
//! snapshot list as JSON for an external renderer.

use std::io::Write;

use handscope_engine::model::HandHistory;
use handscope_engine::snapshot::{FrameKind, Snapshot};

use super::{load_input, report_parse_warnings, split_reporting};
use crate::error::{BatchValidationError, CliError};
use crate::formatters::{format_action, format_board};
use crate::validation::hand_index;

pub fn handle_replay_command(
    input: &str,
    hand: Option<usize>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let text = load_input(input)?;
    let split = split_reporting(&text, err)?;

    let selected: Vec<usize> = match hand {
        Some(n) => vec![hand_index(n, split.hands.len()).map_err(CliError::InvalidInput)?],
        None => (0..split.hands.len()).collect(),
    };

    let mut replays = Vec::new();
    let mut failures: Vec<BatchValidationError<usize>> = Vec::new();
    for i in selected {
        match handscope_engine::replay(split.hands[i]) {
            Ok((parsed, frames)) => {
                report_parse_warnings(err, i + 1, &parsed.warnings)?;
                replays.push((parsed.value, frames));
            }
            Err(e) => failures.push(BatchValidationError {
                item_context: i + 1,
                message: CliError::from(e).to_string(),
            }),
        }
    }

    if json {
        let body: Vec<serde_json::Value> = replays
            .iter()
            .map(|(hand, frames)| {
                serde_json::json!({
                    "id": hand.id,
                    "site": hand.site,
                    "snapshots": frames,
                })
            })
            .collect();
        let body = serde_json::to_string_pretty(&body).map_err(std::io::Error::other)?;
        writeln!(out, "{}", body)?;
    } else {
        for (hand, frames) in &replays {
            write_replay(out, hand, frames)?;
        }
    }

    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        writeln!(err, "Hand {}", failure)?;
    }
    Err(CliError::InvalidInput(format!(
        "{} hand(s) could not be replayed",
        failures.len()
    )))
}

fn write_replay(out: &mut dyn Write, hand: &HandHistory, frames: &[Snapshot]) -> Result<(), CliError> {
    writeln!(out, "Hand #{} ({})", hand.id, hand.site)?;
    for frame in frames {
        writeln!(
            out,
            "  [{:>2}] {:<40} pot {}",
            frame.index,
            describe(frame),
            frame.display(frame.total_pot)
        )?;
        if frame.kind == FrameKind::Showdown {
            write_showdown(out, frame)?;
        }
    }
    let Some(last) = frames.last() else {
        return Ok(());
    };
    let stacks: Vec<String> = hand
        .players
        .iter()
        .filter_map(|p| {
            last.stacks
                .get(&p.name)
                .map(|s| format!("{} {}", p.name, last.display(*s)))
        })
        .collect();
    writeln!(out, "  Final stacks: {}", stacks.join(", "))?;
    writeln!(out)?;
    Ok(())
}

fn describe(frame: &Snapshot) -> String {
    match frame.kind {
        FrameKind::Start => "start".to_string(),
        FrameKind::Action => match &frame.action {
            Some(action) => format!("{:<8} {}", frame.street.to_string(), format_action(action, frame.unit)),
            None => frame.street.to_string(),
        },
        FrameKind::StreetBegins => format!("*** {} {} ***", frame.street, format_board(&frame.board)),
        FrameKind::Showdown => "showdown".to_string(),
    }
}

fn write_showdown(out: &mut dyn Write, frame: &Snapshot) -> Result<(), CliError> {
    for (i, pot) in frame.pots.iter().enumerate() {
        let label = if pot.is_main {
            "main pot".to_string()
        } else {
            format!("side pot {}", i)
        };
        writeln!(
            out,
            "       {}: {} (rake {}) [{}]",
            label,
            frame.display(pot.value),
            frame.display(pot.rake),
            pot.eligible.join(", ")
        )?;
    }
    for (name, cards) in &frame.revealed {
        writeln!(out, "       {} shows {}", name, format_board(cards))?;
    }
    for name in &frame.winners {
        let won = frame.payouts.get(name).copied().unwrap_or(0);
        writeln!(out, "       {} wins {}", name, frame.display(won))?;
    }
    Ok(())
}
