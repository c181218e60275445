use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::amount::{Amount, MoneyUnit};
use crate::cards::Card;

/// Poker room a hand history was exported from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Site {
    PokerStars,
    GgPoker,
    PartyPoker,
    Ignition,
    Pacific888,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Site::PokerStars => "PokerStars",
            Site::GgPoker => "GGPoker",
            Site::PartyPoker => "PartyPoker",
            Site::Ignition => "Ignition",
            Site::Pacific888 => "888poker",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameKind {
    Holdem,
    Omaha,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum LimitKind {
    NoLimit,
    PotLimit,
    FixedLimit,
}

/// A betting round, plus the terminal showdown phase.
/// Ordered so that `Preflop < Flop < Turn < River < Showdown`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Hands are shown and the pot is awarded
    Showdown,
}

impl Street {
    /// Street reached once `board_len` community cards are out.
    pub fn from_board_len(board_len: usize) -> Option<Street> {
        match board_len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    PostBlind,
    PostAnte,
    /// Part of a bet nobody called, handed back to the aggressor.
    UncalledReturn,
}

impl ActionKind {
    /// Kinds that move chips from the stack into the current street.
    pub fn commits_chips(self) -> bool {
        matches!(
            self,
            ActionKind::Call
                | ActionKind::Bet
                | ActionKind::Raise
                | ActionKind::AllIn
                | ActionKind::PostBlind
        )
    }
}

/// One decision point, as logged by the room.
///
/// `amount` is the number the room printed; `raise_to` is the player's street
/// total when the room also reports it (`raises 400 to 600`).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
    pub amount: Option<Amount>,
    pub raise_to: Option<Amount>,
    #[serde(default)]
    pub all_in: bool,
}

impl Action {
    pub fn new(player: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
            amount: None,
            raise_to: None,
            all_in: false,
        }
    }

    pub fn with_amount(player: impl Into<String>, kind: ActionKind, amount: Amount) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(player, kind)
        }
    }
}

/// Static description of a seat, fixed once the hand is parsed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub seat: u8,
    pub stack: Amount,
    pub position: Option<String>,
    pub is_hero: bool,
    pub hole_cards: Option<Vec<Card>>,
    pub bounty: Option<String>,
    #[serde(default)]
    pub sitting_out: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stakes {
    pub small_blind: Amount,
    pub big_blind: Amount,
    pub ante: Option<Amount>,
}

/// How amounts in this hand are to be read.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub is_tournament: bool,
    pub currency: Option<String>,
    /// Amounts are cents of `currency` and need scaling before display.
    pub conversion_needed: bool,
}

impl GameContext {
    pub fn unit(&self) -> MoneyUnit {
        if self.conversion_needed {
            MoneyUnit::Cents
        } else {
            MoneyUnit::Chips
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentInfo {
    pub id: String,
    pub buy_in: Option<String>,
    pub level: Option<String>,
}

/// Community cards revealed at the start of `street` and the actions taken on it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StreetLog {
    pub street: Street,
    pub cards: Vec<Card>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BountyAward {
    pub winner: String,
    pub eliminated: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TopUpKind {
    Rebuy,
    AddOn,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopUp {
    pub player: String,
    pub kind: TopUpKind,
    pub chips: Amount,
    pub cost: Option<String>,
}

/// Outcome section of a hand: who collected what, and what the house kept.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownSummary {
    pub total_pot: Option<Amount>,
    pub rake: Option<Amount>,
    pub side_pots: Vec<Amount>,
    pub winnings: BTreeMap<String, Amount>,
    /// Cards revealed in the summary, including mucked hands shown anyway.
    pub shown: BTreeMap<String, Vec<Card>>,
}

impl ShowdownSummary {
    pub fn pot_won(&self) -> Amount {
        self.winnings.values().sum()
    }

    pub fn add_winnings(&mut self, player: &str, amount: Amount) {
        *self.winnings.entry(player.to_string()).or_insert(0) += amount;
    }
}

/// Canonical, site-agnostic record of one played hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandHistory {
    pub id: String,
    pub site: Site,
    pub game: GameKind,
    pub limit: LimitKind,
    pub stakes: Stakes,
    pub context: GameContext,
    pub tournament: Option<TournamentInfo>,
    pub timestamp: Option<NaiveDateTime>,
    pub table_name: Option<String>,
    pub max_seats: Option<u8>,
    pub button_seat: Option<u8>,
    pub players: Vec<Player>,
    pub antes: Vec<Action>,
    pub blinds: Vec<Action>,
    pub streets: Vec<StreetLog>,
    pub summary: Option<ShowdownSummary>,
    pub bounties: Vec<BountyAward>,
    pub top_ups: Vec<TopUp>,
}

impl HandHistory {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_hero)
    }

    /// Total pot as reported by the room, or the sum of winnings if the
    /// room does not print one.
    pub fn total_pot(&self) -> Option<Amount> {
        let summary = self.summary.as_ref()?;
        summary.total_pot.or_else(|| Some(summary.pot_won()))
    }

    pub fn rake(&self) -> Amount {
        self.summary.as_ref().and_then(|s| s.rake).unwrap_or(0)
    }

    pub fn winners(&self) -> Vec<&str> {
        let Some(summary) = &self.summary else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|p| summary.winnings.get(&p.name).is_some_and(|w| *w > 0))
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn is_winner(&self, name: &str) -> bool {
        self.winners().contains(&name)
    }

    /// Board cards in dealing order.
    pub fn board(&self) -> Vec<Card> {
        self.streets.iter().flat_map(|s| s.cards.iter().copied()).collect()
    }

    pub fn board_at(&self, street: Street) -> Vec<Card> {
        self.streets
            .iter()
            .filter(|s| s.street <= street)
            .flat_map(|s| s.cards.iter().copied())
            .collect()
    }

    pub fn actions_on(&self, street: Street) -> &[Action] {
        self.streets
            .iter()
            .find(|s| s.street == street)
            .map(|s| s.actions.as_slice())
            .unwrap_or(&[])
    }
}
