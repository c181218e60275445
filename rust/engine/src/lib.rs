//! # handscope-engine: Hand History Replay Core
//!
//! Reads raw hand histories exported by online poker rooms, turns them into a
//! normalised [`model::HandHistory`], replays the chips street by street and
//! estimates all-in equity with a seeded Monte Carlo sampler.
//!
//! ## Core Modules
//!
//! - [`splitter`] - Finds hand boundaries in a blob of many hands
//! - [`parser`] - Site detection and per-room grammars
//! - [`model`] - The normalised hand record every grammar produces
//! - [`snapshot`] - Step-by-step table states with side pots and rake
//! - [`equity`] - Parallel Monte Carlo equity between two holdings
//! - [`hand`] - Seven-card hand evaluation
//! - [`cards`] / [`deck`] - Card parsing and seeded decks
//! - [`amount`] - Money parsing in integer minor units
//! - [`errors`] - Typed errors with stable codes
//!
//! ## Quick Start
//!
//! ```rust
//! use handscope_engine::cards::parse_cards;
//! use handscope_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let seven: [_; 7] = cards.try_into().unwrap();
//! assert_eq!(evaluate_hand(&seven).category, Category::StraightFlush);
//! ```
//!
//! ## Reproducible Equity
//!
//! A seeded run gives the same numbers on any thread count:
//!
//! ```rust
//! use handscope_engine::equity::{calculate_equity_with, EquityConfig};
//!
//! let cfg = EquityConfig {
//!     seed: Some(7),
//!     ..EquityConfig::with_iterations(2_000)
//! };
//! let a = calculate_equity_with("Ah Ks", "Qd Qc", "", &cfg).unwrap();
//! let b = calculate_equity_with("Ah Ks", "Qd Qc", "", &cfg).unwrap();
//! assert_eq!(a, b);
//! ```

#[macro_use]
mod macros;

pub mod amount;
pub mod cards;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod hand;
pub mod model;
pub mod parser;
pub mod snapshot;
pub mod splitter;

use errors::HandError;
use model::HandHistory;
use parser::Parsed;
use snapshot::Snapshot;

/// Parses one hand and replays it.
pub fn replay(text: &str) -> Result<(Parsed<HandHistory>, Vec<Snapshot>), HandError> {
    let parsed = parser::parse_single(text)?;
    let frames = snapshot::build(&parsed.value)?;
    Ok((parsed, frames))
}
