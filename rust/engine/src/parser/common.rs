//! State shared by every grammar while a hand is being read.
//!
//! Grammars only recognise lines. Everything they learn is pushed into a
//! [`Draft`], which owns name resolution, warnings, money units and the final
//! validation of mandatory sections.

use chrono::{Month, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::amount::{detect_currency, parse_amount, Amount, MoneyUnit};
use crate::cards::{parse_cards, Card};
use crate::errors::{ParseError, ParseWarning};
use crate::model::{
    Action, ActionKind, BountyAward, GameContext, GameKind, HandHistory, LimitKind, Player,
    ShowdownSummary, Site, Stakes, Street, StreetLog, TopUp, TournamentInfo,
};
use crate::parser::Parsed;

static_regex!(
    STAKES,
    r"([$€£]?\s?[\d,]*\.?\d+)\s*/\s*([$€£]?\s?[\d,]*\.?\d+)"
);
static_regex!(
    YMD_TIME,
    r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})[ T]+(\d{1,2}):(\d{2}):(\d{2})"
);
static_regex!(
    DMY_TIME,
    r"(\d{1,2}) (\d{1,2}) (\d{4}) (\d{1,2}):(\d{2}):(\d{2})"
);
static_regex!(
    WORDY_TIME,
    r"[A-Za-z]+, ([A-Za-z]+) (\d{1,2}), (\d{1,2}):(\d{2}):(\d{2}) \w+ (\d{4})"
);
static_regex!(TOURNAMENT_ID, r"(?i)\bTourn(?:ament|ey)\s*(?:ID\s*)?#?\s*(\d+)");
static_regex!(
    BUY_IN,
    r"(?i)(?:Tournament #\d+,\s*(.+?)\s+(?:Hold'?em|Omaha)|Buy-?in:?\s*(\S+))"
);
static_regex!(LEVEL, r"(?i)\bLevel:?\s*([IVXLC\d]+)");
static_regex!(POT_LIMIT, r"(?i)pot limit|\bPLO?\b");
static_regex!(FIXED_LIMIT, r"(?i)fixed limit|\bFL\b|\blimit\b");
static_regex!(NO_LIMIT, r"(?i)no limit|\bNL\b");
static_regex!(BUTTON, r"Seat #?(\d+) is the button");

/// Which part of the text the grammar is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Header,
    Body,
    Summary,
}

/// A seated name found at the start of a line, with what follows it.
pub(crate) struct Resolved<'t> {
    pub name: String,
    pub rest: &'t str,
    /// The name was followed by a colon (`Hero: folds`).
    pub colon: bool,
}

#[derive(Debug)]
pub(crate) struct Draft {
    site: Site,
    pub id: Option<String>,
    pub line: usize,
    pub section: Section,
    header: String,
    settled: bool,
    pub is_tournament: bool,
    pub currency: Option<String>,
    unit: MoneyUnit,
    stakes: Option<(Amount, Amount)>,
    pub tournament: Option<TournamentInfo>,
    pub timestamp: Option<NaiveDateTime>,
    pub table_name: Option<String>,
    pub max_seats: Option<u8>,
    pub button_seat: Option<u8>,
    players: Vec<Player>,
    antes: Vec<Action>,
    blinds: Vec<Action>,
    streets: Vec<StreetLog>,
    summary: Option<ShowdownSummary>,
    bounties: Vec<BountyAward>,
    top_ups: Vec<TopUp>,
    warnings: Vec<ParseWarning>,
}

impl Draft {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            id: None,
            line: 0,
            section: Section::Header,
            header: String::new(),
            settled: false,
            is_tournament: false,
            currency: None,
            unit: MoneyUnit::Chips,
            stakes: None,
            tournament: None,
            timestamp: None,
            table_name: None,
            max_seats: None,
            button_seat: None,
            players: Vec::new(),
            antes: Vec::new(),
            blinds: Vec::new(),
            streets: Vec::new(),
            summary: None,
            bounties: Vec::new(),
            top_ups: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records a recoverable problem against the current line.
    pub fn warn(&mut self, error: ParseError) {
        let warning = ParseWarning {
            line: self.line,
            error,
        };
        warn!(site = %self.site, %warning, "skipped hand history line");
        self.warnings.push(warning);
    }

    /// Keeps a pre-seat line for header interpretation and picks up the
    /// button if the line announces it.
    pub fn header_line(&mut self, line: &str) {
        if let Some(caps) = BUTTON.captures(line) {
            self.button_seat = caps[1].parse().ok();
        }
        self.header.push_str(line);
        self.header.push('\n');
    }

    /// Derives stakes, money unit, game and timestamp from the header text.
    /// Runs once, before the first amount of the hand is read.
    pub fn settle(&mut self) {
        if self.settled {
            return;
        }
        self.settled = true;
        let header = std::mem::take(&mut self.header);

        if let Some(caps) = TOURNAMENT_ID.captures(&header) {
            self.is_tournament = true;
            let buy_in = BUY_IN
                .captures(&header)
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().trim().to_string());
            let level = LEVEL.captures(&header).map(|c| c[1].to_string());
            self.tournament = Some(TournamentInfo {
                id: caps[1].to_string(),
                buy_in,
                level,
            });
        }
        let stakes_text = STAKES.captures(&header);
        if self.currency.is_none() {
            self.currency = stakes_text
                .as_ref()
                .and_then(|c| detect_currency(&c[0]))
                .or_else(|| detect_currency(&header));
        }
        self.unit = if !self.is_tournament && self.currency.is_some() {
            MoneyUnit::Cents
        } else {
            MoneyUnit::Chips
        };
        if let Some(caps) = stakes_text {
            match (
                parse_amount(&caps[1], self.unit),
                parse_amount(&caps[2], self.unit),
            ) {
                (Ok(sb), Ok(bb)) => self.stakes = Some((sb, bb)),
                _ => self.warn(ParseError::InvalidAmount(caps[0].to_string())),
            }
        }
        self.timestamp = parse_timestamp(&header);
        self.header = header;
    }

    /// Parses an amount in the hand's unit, warning and returning `None` on failure.
    pub fn amount(&mut self, text: &str) -> Option<Amount> {
        self.settle();
        match parse_amount(text, self.unit) {
            Ok(a) => Some(a),
            Err(e) => {
                self.warn(e);
                None
            }
        }
    }

    pub fn cards(&mut self, text: &str) -> Option<Vec<Card>> {
        match parse_cards(text) {
            Ok(cards) => Some(cards),
            Err(e) => {
                self.warn(e.into());
                None
            }
        }
    }

    pub fn seat(&mut self, seat: u8, name: &str, stack_text: &str) -> Option<&mut Player> {
        self.settle();
        self.section = Section::Body;
        let name = name.trim();
        if self.players.iter().any(|p| p.name == name) {
            self.warn(ParseError::UnexpectedLine(format!("Seat {}: {}", seat, name)));
            return None;
        }
        let stack = self.amount(stack_text)?;
        self.players.push(Player {
            name: name.to_string(),
            seat,
            stack,
            position: None,
            is_hero: false,
            hole_cards: None,
            bounty: None,
            sitting_out: false,
        });
        self.players.last_mut()
    }

    pub fn is_seated(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Longest seated name that starts `line` and is followed by a colon,
    /// a space or the end of the line.
    pub fn resolve<'t>(&self, line: &'t str) -> Option<Resolved<'t>> {
        let player = self
            .players
            .iter()
            .filter(|p| {
                line.starts_with(p.name.as_str()) && {
                    let rest = &line[p.name.len()..];
                    rest.is_empty() || rest.starts_with(':') || rest.starts_with(' ')
                }
            })
            .max_by_key(|p| p.name.len())?;
        let rest = &line[player.name.len()..];
        let colon = rest.starts_with(':');
        Some(Resolved {
            name: player.name.clone(),
            rest: rest.trim_start_matches(':').trim(),
            colon,
        })
    }

    /// The first player dealt visible hole cards is the hero.
    pub fn set_hero(&mut self, name: &str, cards: Vec<Card>) {
        let hero_known = self.players.iter().any(|p| p.is_hero);
        if let Some(p) = self.player_mut(name) {
            p.is_hero |= !hero_known;
            p.hole_cards = Some(cards);
        }
    }

    pub fn deal(&mut self, name: &str, cards: Vec<Card>) {
        if let Some(p) = self.players.iter_mut().find(|p| p.name == name) {
            p.hole_cards = Some(cards);
        }
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Cards shown at showdown or in the summary, including mucked hands
    /// the room printed anyway.
    pub fn reveal(&mut self, name: &str, cards: Vec<Card>) {
        if let Some(p) = self.players.iter_mut().find(|p| p.name == name) {
            if p.hole_cards.is_none() {
                p.hole_cards = Some(cards.clone());
            }
        }
        self.summary_mut().shown.insert(name.to_string(), cards);
    }

    pub fn begin_street(&mut self, street: Street, cards: Vec<Card>) {
        self.section = Section::Body;
        if street == Street::Showdown {
            return;
        }
        if let Some(log) = self.streets.iter_mut().find(|s| s.street == street) {
            log.cards.extend(cards);
            return;
        }
        self.streets.push(StreetLog {
            street,
            cards,
            actions: Vec::new(),
        });
    }

    /// Files an action under antes, blinds or the street being played.
    pub fn push_action(&mut self, action: Action) {
        match action.kind {
            ActionKind::PostAnte => self.antes.push(action),
            ActionKind::PostBlind if self.streets.is_empty() => self.blinds.push(action),
            _ => {
                if self.streets.is_empty() {
                    self.begin_street(Street::Preflop, Vec::new());
                }
                if let Some(log) = self.streets.last_mut() {
                    log.actions.push(action);
                }
            }
        }
    }

    pub fn summary_mut(&mut self) -> &mut ShowdownSummary {
        self.summary.get_or_insert_with(ShowdownSummary::default)
    }

    pub fn win(&mut self, name: &str, amount: Amount) {
        self.summary_mut().add_winnings(name, amount);
    }

    pub fn bounty(&mut self, award: BountyAward) {
        self.bounties.push(award);
    }

    pub fn top_up(&mut self, top_up: TopUp) {
        self.top_ups.push(top_up);
    }

    /// Validates mandatory sections and assembles the hand.
    pub fn finish(mut self) -> Result<Parsed<HandHistory>, ParseError> {
        let id = self
            .id
            .take()
            .ok_or_else(|| ParseError::InvalidHeader("missing hand id".to_string()))?;
        if self.players.is_empty() {
            return Err(ParseError::MissingSeats);
        }
        if self.blinds.is_empty() && self.antes.is_empty() {
            return Err(ParseError::MissingBlinds);
        }
        let (small_blind, big_blind) = match self.stakes {
            Some(stakes) => stakes,
            None => self.stakes_from_posts().ok_or(ParseError::MissingBlinds)?,
        };
        let ante = self.antes.iter().filter_map(|a| a.amount).max();

        assign_positions(&mut self.players, self.button_seat);
        let game = if self.header.contains("Omaha") {
            GameKind::Omaha
        } else {
            GameKind::Holdem
        };
        let limit = if NO_LIMIT.is_match(&self.header) {
            LimitKind::NoLimit
        } else if POT_LIMIT.is_match(&self.header) {
            LimitKind::PotLimit
        } else if FIXED_LIMIT.is_match(&self.header) {
            LimitKind::FixedLimit
        } else {
            LimitKind::NoLimit
        };

        let hand = HandHistory {
            id,
            site: self.site,
            game,
            limit,
            stakes: Stakes {
                small_blind,
                big_blind,
                ante,
            },
            context: GameContext {
                is_tournament: self.is_tournament,
                currency: self.currency,
                conversion_needed: self.unit == MoneyUnit::Cents,
            },
            tournament: self.tournament,
            timestamp: self.timestamp,
            table_name: self.table_name,
            max_seats: self.max_seats,
            button_seat: self.button_seat,
            players: self.players,
            antes: self.antes,
            blinds: self.blinds,
            streets: self.streets,
            summary: self.summary,
            bounties: self.bounties,
            top_ups: self.top_ups,
        };
        Ok(Parsed {
            value: hand,
            warnings: self.warnings,
        })
    }

    fn stakes_from_posts(&self) -> Option<(Amount, Amount)> {
        let posts: Vec<Amount> = self.blinds.iter().filter_map(|a| a.amount).collect();
        let big = posts.iter().copied().max()?;
        let small = posts.iter().copied().filter(|a| *a < big).max().unwrap_or(big / 2);
        Some((small, big))
    }
}

/// Text lines with their 1-based numbers, trimmed, blanks skipped.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim().trim_start_matches('\u{feff}')))
        .filter(|(_, l)| !l.is_empty())
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let num = |s: &str| s.parse::<u32>().ok();
    let build = |y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32| {
        NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(h, mi, s)
    };
    if let Some(c) = YMD_TIME.captures(text) {
        return build(
            c[1].parse().ok()?,
            num(&c[2])?,
            num(&c[3])?,
            num(&c[4])?,
            num(&c[5])?,
            num(&c[6])?,
        );
    }
    if let Some(c) = DMY_TIME.captures(text) {
        return build(
            c[3].parse().ok()?,
            num(&c[2])?,
            num(&c[1])?,
            num(&c[4])?,
            num(&c[5])?,
            num(&c[6])?,
        );
    }
    let c = WORDY_TIME.captures(text)?;
    let month = c[1].parse::<Month>().ok()?.number_from_month();
    build(
        c[6].parse().ok()?,
        month,
        num(&c[2])?,
        num(&c[3])?,
        num(&c[4])?,
        num(&c[5])?,
    )
}

// Labels for the seats between the big blind and the button, by how many there are.
const MIDDLE_POSITIONS: [&[&str]; 8] = [
    &[],
    &["UTG"],
    &["UTG", "CO"],
    &["UTG", "HJ", "CO"],
    &["UTG", "MP", "HJ", "CO"],
    &["UTG", "UTG+1", "MP", "HJ", "CO"],
    &["UTG", "UTG+1", "UTG+2", "MP", "HJ", "CO"],
    &["UTG", "UTG+1", "UTG+2", "MP", "MP+1", "HJ", "CO"],
];

fn assign_positions(players: &mut [Player], button: Option<u8>) {
    let Some(button) = button else {
        return;
    };
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by_key(|&i| players[i].seat);
    let start = order
        .iter()
        .position(|&i| players[i].seat >= button)
        .unwrap_or(0);
    order.rotate_left(start);

    let labels: Vec<&str> = match order.len() {
        0 | 1 => Vec::new(),
        2 => vec!["BTN", "BB"],
        n => {
            let middle = MIDDLE_POSITIONS.get(n - 3).copied().unwrap_or(&[]);
            ["BTN", "SB", "BB"]
                .into_iter()
                .chain(middle.iter().copied())
                .collect()
        }
    };
    for (slot, &i) in order.iter().enumerate() {
        players[i].position = labels.get(slot).map(|l| l.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_in_three_layouts() {
        let ymd = parse_timestamp("Level III (100/200) - 2021/03/14 20:15:32 ET").unwrap();
        assert_eq!(ymd.to_string(), "2021-03-14 20:15:32");
        let dmy = parse_timestamp("$0.05/$0.10 Blinds No Limit Holdem - *** 06 03 2023 19:45:12").unwrap();
        assert_eq!(dmy.to_string(), "2023-03-06 19:45:12");
        let wordy = parse_timestamp("Blinds 50/100 - Monday, March 06, 19:45:12 CET 2023").unwrap();
        assert_eq!(wordy.to_string(), "2023-03-06 19:45:12");
    }

    #[test]
    fn longest_name_wins() {
        let mut draft = Draft::new(Site::PokerStars);
        draft.seat(1, "Big", "100");
        draft.seat(2, "Big Fish", "100");
        let r = draft.resolve("Big Fish: calls 10").unwrap();
        assert_eq!(r.name, "Big Fish");
        assert_eq!(r.rest, "calls 10");
        assert!(r.colon);
        assert!(draft.resolve("Bigger: folds").is_none());
    }

    #[test]
    fn positions_follow_the_button() {
        let mut players: Vec<Player> = (1..=6)
            .map(|seat| Player {
                name: format!("p{}", seat),
                seat,
                stack: 100,
                position: None,
                is_hero: false,
                hole_cards: None,
                bounty: None,
                sitting_out: false,
            })
            .collect();
        assign_positions(&mut players, Some(5));
        let labels: Vec<_> = players.iter().map(|p| p.position.clone().unwrap()).collect();
        assert_eq!(labels, ["BB", "UTG", "HJ", "CO", "BTN", "SB"]);
    }
}
