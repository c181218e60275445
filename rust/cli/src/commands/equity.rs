//! The `equity` command.

use std::io::Write;

use handscope_engine::equity::calculate_equity_with;

use crate::config;
use crate::error::CliError;
use crate::validation::{ensure_distinct, parse_board, parse_hole_cards};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityArgs {
    pub hero: String,
    pub villain: String,
    pub board: String,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn handle_equity_command(
    args: &EquityArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hero = parse_hole_cards("hero", &args.hero).map_err(CliError::InvalidInput)?;
    let villain = parse_hole_cards("villain", &args.villain).map_err(CliError::InvalidInput)?;
    let board = parse_board(&args.board).map_err(CliError::InvalidInput)?;
    ensure_distinct(&[&hero, &villain, &board]).map_err(CliError::InvalidInput)?;
    if args.iterations == Some(0) {
        return Err(CliError::InvalidInput(
            "--iterations must be at least 1".into(),
        ));
    }

    let cfg = config::load()?.equity(args.iterations, args.seed);
    let result = calculate_equity_with(&args.hero, &args.villain, &args.board, &cfg)
        .ok_or_else(|| CliError::InvalidInput("cards do not form a valid matchup".into()))?;

    if args.json {
        let body = serde_json::json!({
            "hero_win": result.hero_win,
            "villain_win": result.villain_win,
            "tie": result.tie,
            "hero_equity": result.hero_equity(),
            "villain_equity": result.villain_equity(),
            "street": result.street,
            "hero": result.hero,
            "villain": result.villain,
            "board": result.board,
            "iterations": result.iterations,
        });
        let body = serde_json::to_string_pretty(&body).map_err(std::io::Error::other)?;
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} vs {} on {} ({}, {} trials)",
        result.hero,
        result.villain,
        if result.board.is_empty() { "-" } else { &result.board },
        result.street,
        result.iterations
    )?;
    writeln!(
        out,
        "  Hero:    win {:>6.2}%  equity {:>6.2}%",
        result.hero_win,
        result.hero_equity()
    )?;
    writeln!(
        out,
        "  Villain: win {:>6.2}%  equity {:>6.2}%",
        result.villain_win,
        result.villain_equity()
    )?;
    writeln!(out, "  Tie:         {:>6.2}%", result.tie)?;
    Ok(())
}
