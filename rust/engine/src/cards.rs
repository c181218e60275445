use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Parses the single-letter suit code used by every supported room.
    /// Upper-case letters are tolerated.
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Rank {
        match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Ace,
        }
    }

    /// Rank letters are case-insensitive (`a`, `K`, `t`...).
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are the fundamental unit of every board, hand and deck in the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("invalid card token `{0}`")]
    InvalidToken(String),
    #[error("card {0} appears more than once")]
    Duplicate(Card),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts `"Ah"`, `"td"` and the `"10h"` spelling some rooms use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || CardParseError::InvalidToken(token.to_string());
        let mut chars = token.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None, None) => (rank, suit),
            (Some('1'), Some('0'), Some(suit), None) => ('T', suit),
            _ => return Err(invalid()),
        };
        let rank = Rank::from_char(rank).ok_or_else(invalid)?;
        let suit = Suit::from_char(suit).ok_or_else(invalid)?;
        Ok(Card { suit, rank })
    }
}

/// Parses a run of card codes such as `"AhKs"`, `"Ah Ks"` or `"[ 2h, 7h, Tc ]"`.
///
/// Fails on any malformed token or if the same card appears twice.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    let compact: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '[' | ']'))
        .collect();
    let mut cards = Vec::with_capacity(compact.len() / 2);
    let mut seen = HashSet::new();
    let mut i = 0;
    while i < compact.len() {
        let width = if compact[i] == '1' && compact.get(i + 1) == Some(&'0') {
            3
        } else {
            2
        };
        let end = (i + width).min(compact.len());
        let token: String = compact[i..end].iter().collect();
        let card: Card = token.parse()?;
        if !seen.insert(card) {
            return Err(CardParseError::Duplicate(card));
        }
        cards.push(card);
        i = end;
    }
    Ok(cards)
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
