//! Replays a parsed hand into an ordered list of table states.
//!
//! Each [`Snapshot`] is derived from the previous one and a single [`Event`]
//! by [`Snapshot::apply`]. Every frame is checked before it is accepted:
//!
//! - no stack goes negative
//! - `sum(pots) + sum(pending) == total_pot`
//! - chips on the table plus chips in the middle equal the starting chips
//!
//! At showdown the summary is the source of truth for who won. The builder
//! only checks that payouts and rake account for every committed chip.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::{Amount, MoneyUnit};
use crate::cards::Card;
use crate::errors::SnapshotError;
use crate::model::{Action, ActionKind, HandHistory, Street};

/// One step of the replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Action { street: Street, action: Action },
    StreetBegins { street: Street, cards: Vec<Card> },
    Showdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Start,
    Action,
    StreetBegins,
    Showdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub value: Amount,
    /// Per-player contribution needed to be eligible for this pot.
    pub threshold: Amount,
    pub eligible: Vec<String>,
    pub is_main: bool,
    /// House share taken from this pot at showdown.
    pub rake: Amount,
}

/// Table state after a given event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub index: usize,
    pub action_index: usize,
    pub kind: FrameKind,
    pub street: Street,
    pub action: Option<Action>,
    pub pots: Vec<Pot>,
    /// Chips bet on the current street, not yet swept into a pot.
    pub pending: BTreeMap<String, Amount>,
    /// Chips each player has put in over the whole hand, antes excluded.
    pub committed: BTreeMap<String, Amount>,
    /// Antes, which belong to the main pot and to nobody's contribution.
    pub dead_money: Amount,
    pub stacks: BTreeMap<String, Amount>,
    pub folded: BTreeSet<String>,
    pub board: Vec<Card>,
    pub total_pot: Amount,
    pub unit: MoneyUnit,
    pub revealed: BTreeMap<String, Vec<Card>>,
    pub winners: Vec<String>,
    pub payouts: BTreeMap<String, Amount>,
    pub rake: Amount,
}

impl Snapshot {
    /// The table before any chips move.
    pub fn initial(hand: &HandHistory) -> Result<Snapshot, SnapshotError> {
        let mut stacks = BTreeMap::new();
        for p in &hand.players {
            if p.stack < 0 {
                return Err(SnapshotError::NegativeStack {
                    player: p.name.clone(),
                    stack: p.stack,
                    action_index: 0,
                });
            }
            stacks.insert(p.name.clone(), p.stack);
        }
        Ok(Snapshot {
            index: 0,
            action_index: 0,
            kind: FrameKind::Start,
            street: Street::Preflop,
            action: None,
            pots: Vec::new(),
            pending: BTreeMap::new(),
            committed: BTreeMap::new(),
            dead_money: 0,
            stacks,
            folded: BTreeSet::new(),
            board: Vec::new(),
            total_pot: 0,
            unit: hand.context.unit(),
            revealed: BTreeMap::new(),
            winners: Vec::new(),
            payouts: BTreeMap::new(),
            rake: 0,
        })
    }

    /// The next frame: this one with `event` applied.
    pub fn apply(&self, event: &Event, hand: &HandHistory) -> Result<Snapshot, SnapshotError> {
        let mut next = self.clone();
        next.index += 1;
        next.action_index += 1;
        next.action = None;

        match event {
            Event::Action { street, action } => {
                next.kind = FrameKind::Action;
                next.street = *street;
                next.act(action)?;
                next.action = Some(action.clone());
            }
            Event::StreetBegins { street, cards } => {
                next.kind = FrameKind::StreetBegins;
                next.street = *street;
                next.pending.clear();
                next.board.extend(cards.iter().copied());
            }
            Event::Showdown => {
                next.kind = FrameKind::Showdown;
                next.street = Street::Showdown;
                next.pending.clear();
            }
        }
        next.pots = next.layer_pots(hand);
        if *event == Event::Showdown {
            next.settle(hand)?;
        }
        next.check(hand)?;
        Ok(next)
    }

    fn stack_mut(&mut self, player: &str) -> Result<&mut Amount, SnapshotError> {
        self.stacks
            .get_mut(player)
            .ok_or_else(|| SnapshotError::MissingPlayer(player.to_string()))
    }

    fn act(&mut self, action: &Action) -> Result<(), SnapshotError> {
        let player = action.player.as_str();
        let action_index = self.action_index;
        let stack = *self.stack_mut(player)?;
        let pending = self.pending.get(player).copied().unwrap_or(0);

        match action.kind {
            ActionKind::Fold => {
                self.folded.insert(player.to_string());
            }
            ActionKind::Check => {}
            ActionKind::PostAnte => {
                let ante = action.amount.unwrap_or(0);
                if ante > stack {
                    return Err(SnapshotError::AnteExceedsStack {
                        player: player.to_string(),
                        ante,
                        stack,
                    });
                }
                *self.stack_mut(player)? -= ante;
                self.dead_money += ante;
                self.total_pot += ante;
            }
            ActionKind::UncalledReturn => {
                let amount = action.amount.unwrap_or(0);
                if amount > pending {
                    return Err(SnapshotError::InvalidPot {
                        action_index,
                        reason: format!(
                            "{} gets back {} but only has {} in front",
                            player, amount, pending
                        ),
                    });
                }
                *self.stack_mut(player)? += amount;
                self.move_in(player, -amount);
            }
            ActionKind::Call
            | ActionKind::Bet
            | ActionKind::Raise
            | ActionKind::AllIn
            | ActionKind::PostBlind => {
                let delta = match action.raise_to {
                    Some(to) => to - pending,
                    None => action.amount.unwrap_or(0),
                };
                if delta < 0 {
                    return Err(SnapshotError::InvalidPot {
                        action_index,
                        reason: format!("{} raises to less than already in front", player),
                    });
                }
                let remaining = stack - delta;
                if remaining < 0 {
                    return Err(SnapshotError::NegativeStack {
                        player: player.to_string(),
                        stack: remaining,
                        action_index,
                    });
                }
                *self.stack_mut(player)? = remaining;
                self.move_in(player, delta);
            }
        }
        Ok(())
    }

    fn move_in(&mut self, player: &str, delta: Amount) {
        *self.pending.entry(player.to_string()).or_insert(0) += delta;
        *self.committed.entry(player.to_string()).or_insert(0) += delta;
        self.total_pot += delta;
    }

    /// Splits swept contributions into a main pot and side pots at every
    /// all-in level. Antes go to the main pot.
    fn layer_pots(&self, hand: &HandHistory) -> Vec<Pot> {
        // Seat order keeps pot eligibility stable for renderers.
        let swept: Vec<(&str, Amount)> = hand
            .players
            .iter()
            .map(|p| {
                let name = p.name.as_str();
                let committed = self.committed.get(name).copied().unwrap_or(0);
                let pending = self.pending.get(name).copied().unwrap_or(0);
                (name, committed - pending)
            })
            .collect();

        let mut levels: Vec<Amount> = swept
            .iter()
            .filter(|(name, c)| *c > 0 && self.stacks.get(*name).copied().unwrap_or(0) == 0)
            .map(|(_, c)| *c)
            .collect();
        levels.extend(swept.iter().map(|(_, c)| *c).max().filter(|m| *m > 0));
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut floor = 0;
        for level in levels {
            let value: Amount = swept
                .iter()
                .map(|(_, c)| (*c).min(level) - (*c).min(floor))
                .sum();
            floor = level;
            if value == 0 {
                continue;
            }
            let eligible: Vec<String> = swept
                .iter()
                .filter(|(name, c)| *c >= level && !self.folded.contains(*name))
                .map(|(name, _)| name.to_string())
                .collect();
            match pots.last_mut() {
                // Nobody left to win this layer: it stays with the pot below.
                Some(last) if eligible.is_empty() => last.value += value,
                _ => pots.push(Pot {
                    value,
                    threshold: level,
                    eligible,
                    is_main: pots.is_empty(),
                    rake: 0,
                }),
            }
        }

        if self.dead_money > 0 {
            match pots.first_mut() {
                Some(main) => main.value += self.dead_money,
                None => pots.push(Pot {
                    value: self.dead_money,
                    threshold: 0,
                    eligible: hand
                        .players
                        .iter()
                        .filter(|p| !self.folded.contains(&p.name))
                        .map(|p| p.name.clone())
                        .collect(),
                    is_main: true,
                    rake: 0,
                }),
            }
        }
        pots
    }

    /// Applies the summary: payouts, rake and revealed hands.
    fn settle(&mut self, hand: &HandHistory) -> Result<(), SnapshotError> {
        let Some(summary) = &hand.summary else {
            return Ok(());
        };
        if let Some(reported) = summary.total_pot {
            if reported != self.total_pot {
                return Err(SnapshotError::PotMismatch {
                    what: "reported total pot",
                    expected: reported,
                    actual: self.total_pot,
                });
            }
        }
        let rake = summary.rake.unwrap_or(0);
        let paid = summary.pot_won();
        if paid != self.total_pot - rake {
            return Err(SnapshotError::PotMismatch {
                what: "payouts against pot less rake",
                expected: self.total_pot - rake,
                actual: paid,
            });
        }
        self.rake = rake;
        allocate_rake(&mut self.pots, rake);

        for (name, amount) in &summary.winnings {
            *self.stack_mut(name)? += *amount;
        }
        self.payouts = summary.winnings.clone();
        self.winners = hand
            .players
            .iter()
            .filter(|p| summary.winnings.get(&p.name).is_some_and(|w| *w > 0))
            .map(|p| p.name.clone())
            .collect();

        for p in &hand.players {
            let shown = summary.shown.get(&p.name);
            let cards = if self.folded.contains(&p.name) {
                shown
            } else {
                p.hole_cards.as_ref().or(shown)
            };
            if let Some(cards) = cards {
                self.revealed.insert(p.name.clone(), cards.clone());
            }
        }
        Ok(())
    }

    fn check(&self, hand: &HandHistory) -> Result<(), SnapshotError> {
        let action_index = self.action_index;
        if let Some((player, stack)) = self.stacks.iter().find(|(_, s)| **s < 0) {
            return Err(SnapshotError::NegativeStack {
                player: player.clone(),
                stack: *stack,
                action_index,
            });
        }

        let in_pots: Amount = self.pots.iter().map(|p| p.value).sum();
        let in_front: Amount = self.pending.values().sum();
        if in_pots + in_front != self.total_pot {
            return Err(SnapshotError::InvalidPot {
                action_index,
                reason: format!(
                    "pots {} plus pending {} do not make the total {}",
                    in_pots, in_front, self.total_pot
                ),
            });
        }

        let started: Amount = hand.players.iter().map(|p| p.stack).sum();
        let behind: Amount = self.stacks.values().sum();
        let accounted = if self.kind == FrameKind::Showdown {
            behind + self.rake
        } else {
            behind + self.total_pot
        };
        if accounted != started {
            return Err(SnapshotError::InconsistentStacks {
                action_index,
                expected: started,
                actual: accounted,
            });
        }
        Ok(())
    }

    pub fn pot_total(&self) -> Amount {
        self.pots.iter().map(|p| p.value).sum()
    }

    pub fn is_all_in(&self, player: &str) -> bool {
        self.stacks.get(player) == Some(&0) && self.committed.get(player).is_some_and(|c| *c > 0)
    }

    /// Formats an amount in this hand's display unit.
    pub fn display(&self, amount: Amount) -> String {
        self.unit.format(amount)
    }
}

/// The replay events of a hand, in table order.
pub fn events(hand: &HandHistory) -> Vec<Event> {
    let mut events: Vec<Event> = hand
        .antes
        .iter()
        .chain(&hand.blinds)
        .map(|a| Event::Action {
            street: Street::Preflop,
            action: a.clone(),
        })
        .collect();
    for log in &hand.streets {
        if log.street != Street::Preflop {
            events.push(Event::StreetBegins {
                street: log.street,
                cards: log.cards.clone(),
            });
        }
        events.extend(log.actions.iter().map(|a| Event::Action {
            street: log.street,
            action: a.clone(),
        }));
    }
    if hand.summary.is_some() {
        events.push(Event::Showdown);
    }
    events
}

/// Builds the full snapshot sequence, or the first bookkeeping error met.
pub fn build(hand: &HandHistory) -> Result<Vec<Snapshot>, SnapshotError> {
    let events = events(hand);
    let mut frames = Vec::with_capacity(events.len() + 1);
    let mut current = Snapshot::initial(hand)?;
    for event in &events {
        let next = current.apply(event, hand)?;
        frames.push(std::mem::replace(&mut current, next));
    }
    frames.push(current);
    debug!(hand = %hand.id, frames = frames.len(), "built snapshots");
    Ok(frames)
}

/// Splits `rake` across pots in proportion to their value, handing leftover
/// units to the largest remainders so the shares sum exactly.
fn allocate_rake(pots: &mut [Pot], rake: Amount) {
    let total: i128 = pots.iter().map(|p| p.value as i128).sum();
    if total == 0 || rake == 0 {
        return;
    }
    let mut shares: Vec<(usize, Amount, i128)> = pots
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let scaled = rake as i128 * p.value as i128;
            (i, (scaled / total) as Amount, scaled % total)
        })
        .collect();
    let mut left = rake - shares.iter().map(|s| s.1).sum::<Amount>();
    shares.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    for share in shares.iter_mut() {
        if left == 0 {
            break;
        }
        share.1 += 1;
        left -= 1;
    }
    for (i, share, _) in shares {
        pots[i].rake = share;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pot(value: Amount) -> Pot {
        Pot {
            value,
            threshold: 0,
            eligible: Vec::new(),
            is_main: false,
            rake: 0,
        }
    }

    #[test]
    fn rake_split_is_exact() {
        let mut pots = vec![pot(6_000), pot(16_000)];
        allocate_rake(&mut pots, 300);
        assert_eq!(pots[0].rake, 82);
        assert_eq!(pots[1].rake, 218);
    }

    #[test]
    fn rake_ties_go_to_earlier_pots() {
        let mut pots = vec![pot(100), pot(100), pot(100)];
        allocate_rake(&mut pots, 2);
        let shares: Vec<_> = pots.iter().map(|p| p.rake).collect();
        assert_eq!(shares, vec![1, 1, 0]);
    }
}
