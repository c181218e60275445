//! Card, board, and action formatters for terminal display.
//!
//! Suits render as ♥ ♦ ♣ ♠ where the terminal can show them and fall back
//! to `h d c s` elsewhere. Amounts are printed in the hand's own unit, so a
//! cash hand shows `1.50` where a tournament hand shows `150`.
//!
//! ## Example
//!
//! ```rust
//! use handscope_engine::cards::{Card, Rank, Suit};
//! use handscope_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let board = vec![ace_spades];
//! assert!(format_board(&board).starts_with("[A"));
//! ```

use handscope_engine::amount::MoneyUnit;
use handscope_engine::cards::{Card, Suit};
use handscope_engine::model::{Action, ActionKind};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). On Unix-like systems,
/// assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.to_char().to_string()
    }
}

/// Format a Card as a string combining rank and suit, like "A♠" or "As".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.to_char(), format_suit(&card.suit))
}

/// Format a board as "[A♠ K♥ Q♦]", or "[]" if empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted_cards.join(" "))
}

/// Format an action as logged, e.g. `Hero raise 1.50 to 4.50 (all-in)`.
///
/// ```rust
/// use handscope_engine::amount::MoneyUnit;
/// use handscope_engine::model::{Action, ActionKind};
/// # use handscope_cli::formatters::format_action;
///
/// let call = Action::with_amount("Hero", ActionKind::Call, 150);
/// assert_eq!(format_action(&call, MoneyUnit::Cents), "Hero calls 1.50");
/// assert_eq!(format_action(&Action::new("Villain", ActionKind::Fold), MoneyUnit::Chips), "Villain folds");
/// ```
pub fn format_action(action: &Action, unit: MoneyUnit) -> String {
    let verb = match action.kind {
        ActionKind::Fold => "folds",
        ActionKind::Check => "checks",
        ActionKind::Call => "calls",
        ActionKind::Bet => "bets",
        ActionKind::Raise => "raises",
        ActionKind::AllIn => "is all-in",
        ActionKind::PostBlind => "posts blind",
        ActionKind::PostAnte => "posts ante",
        ActionKind::UncalledReturn => "takes back uncalled",
    };
    let mut line = format!("{} {}", action.player, verb);
    if let Some(amount) = action.amount {
        line.push(' ');
        line.push_str(&unit.format(amount));
    }
    if let Some(to) = action.raise_to {
        line.push_str(" to ");
        line.push_str(&unit.format(to));
    }
    if action.all_in && action.kind != ActionKind::AllIn {
        line.push_str(" (all-in)");
    }
    line
}
