//! Monte Carlo equity for one hand against another.
//!
//! Trials run in fixed-size batches spread over the rayon pool. Every batch
//! owns a deck seeded from `(seed, batch_index)`, so a seeded run gives the
//! same answer whatever the thread count. A complete board needs no sampling
//! and is scored exactly once.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{format_cards, parse_cards, Card};
use crate::deck::Deck;
use crate::hand::best_of_seven;
use crate::model::{HandHistory, Street};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityConfig {
    pub iterations: usize,
    /// Hard cap applied to `iterations`.
    pub max_iterations: usize,
    pub seed: Option<u64>,
    /// Batches that would start after this much wall time are skipped.
    pub deadline: Option<Duration>,
    pub batch_size: usize,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            max_iterations: 1_000_000,
            seed: None,
            deadline: None,
            batch_size: 1_000,
        }
    }
}

impl EquityConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }
}

/// Win/tie percentages, each rounded to two decimals and summing to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub hero_win: f64,
    pub villain_win: f64,
    pub tie: f64,
    pub street: Street,
    pub hero: String,
    pub villain: String,
    pub board: String,
    /// Trials actually scored.
    pub iterations: usize,
}

impl EquityResult {
    /// Share of the pot hero expects to take, counting ties as half.
    pub fn hero_equity(&self) -> f64 {
        round2(self.hero_win + self.tie / 2.0)
    }

    pub fn villain_equity(&self) -> f64 {
        round2(self.villain_win + self.tie / 2.0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    hero: u64,
    villain: u64,
    tie: u64,
}

impl Tally {
    fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.hero += 1,
            Ordering::Less => self.villain += 1,
            Ordering::Equal => self.tie += 1,
        }
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            hero: self.hero + other.hero,
            villain: self.villain + other.villain,
            tie: self.tie + other.tie,
        }
    }

    fn total(&self) -> u64 {
        self.hero + self.villain + self.tie
    }
}

pub fn calculate_equity(
    hero: &str,
    villain: &str,
    board: &str,
    iterations: usize,
) -> Option<EquityResult> {
    calculate_equity_with(hero, villain, board, &EquityConfig::with_iterations(iterations))
}

/// Returns `None` for malformed cards, a card used twice, a board that is not
/// 0, 3, 4 or 5 cards long, or when zero iterations remain after the cap.
pub fn calculate_equity_with(
    hero: &str,
    villain: &str,
    board: &str,
    cfg: &EquityConfig,
) -> Option<EquityResult> {
    let hero_cards = hole_cards(hero)?;
    let villain_cards = hole_cards(villain)?;
    let board_cards = parse_cards(board).ok()?;
    equity_of_cards(hero_cards, villain_cards, &board_cards, cfg)
}

/// Equity of the hero against `villain` with the board as it stood on `street`.
///
/// Villain cards come from the deal or from the summary when they were only
/// shown there.
pub fn equity_at(
    hand: &HandHistory,
    villain: &str,
    street: Street,
    cfg: &EquityConfig,
) -> Option<EquityResult> {
    let hero_cards = hand.hero()?.hole_cards.as_deref()?;
    let villain_cards = hand
        .player(villain)?
        .hole_cards
        .as_deref()
        .or_else(|| hand.summary.as_ref()?.shown.get(villain).map(Vec::as_slice))?;
    let board = hand.board_at(street);
    equity_of_cards(
        hero_cards.try_into().ok()?,
        villain_cards.try_into().ok()?,
        &board,
        cfg,
    )
}

fn hole_cards(s: &str) -> Option<[Card; 2]> {
    parse_cards(s).ok()?.try_into().ok()
}

fn equity_of_cards(
    hero: [Card; 2],
    villain: [Card; 2],
    board: &[Card],
    cfg: &EquityConfig,
) -> Option<EquityResult> {
    let street = Street::from_board_len(board.len())?;
    let mut dead: Vec<Card> = hero.iter().chain(&villain).chain(board).copied().collect();
    let unique: HashSet<Card> = dead.iter().copied().collect();
    if unique.len() != dead.len() || cfg.iterations.min(cfg.max_iterations) == 0 {
        return None;
    }
    dead.sort();

    let tally = if board.len() == 5 {
        let mut t = Tally::default();
        t.record(showdown(&hero, &villain, board));
        t
    } else {
        simulate(&hero, &villain, board, &dead, cfg)
    };

    if tally.total() == 0 {
        return None;
    }
    let total = tally.total() as f64;
    let hero_win = round2(tally.hero as f64 / total * 100.0);
    let villain_win = round2(tally.villain as f64 / total * 100.0);
    Some(EquityResult {
        hero_win,
        villain_win,
        tie: round2(100.0 - hero_win - villain_win),
        street,
        hero: format_cards(&hero),
        villain: format_cards(&villain),
        board: format_cards(board),
        iterations: tally.total() as usize,
    })
}

fn simulate(
    hero: &[Card; 2],
    villain: &[Card; 2],
    board: &[Card],
    dead: &[Card],
    cfg: &EquityConfig,
) -> Tally {
    let iterations = cfg.iterations.min(cfg.max_iterations);
    let batch_size = cfg.batch_size.max(1);
    let batches = iterations.div_ceil(batch_size);
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let started = Instant::now();
    debug!(iterations, batches, seed, "scheduling equity batches");

    (0..batches)
        .into_par_iter()
        .map(|batch| {
            // The first batch always runs so a result is never empty.
            if batch > 0 && cfg.deadline.is_some_and(|d| started.elapsed() >= d) {
                return Tally::default();
            }
            let trials = batch_size.min(iterations - batch * batch_size);
            let mut deck = Deck::without(dead, batch_seed(seed, batch));
            let mut full_board = [hero[0]; 5];
            full_board[..board.len()].copy_from_slice(board);
            let mut tally = Tally::default();
            for _ in 0..trials {
                let runout = deck.draw_random(5 - board.len());
                full_board[board.len()..].copy_from_slice(runout);
                tally.record(showdown(hero, villain, &full_board));
            }
            tally
        })
        .reduce(Tally::default, Tally::merge)
}

fn showdown(hero: &[Card; 2], villain: &[Card; 2], board: &[Card]) -> Ordering {
    let seven = |hole: &[Card; 2]| -> [Card; 7] {
        [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]]
    };
    best_of_seven(&seven(hero)).cmp(&best_of_seven(&seven(villain)))
}

fn batch_seed(seed: u64, batch: usize) -> u64 {
    seed ^ (batch as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
