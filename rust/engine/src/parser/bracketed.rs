//! Body grammar shared by PartyPoker and 888poker, which both print amounts
//! and cards in square brackets and never put a colon after the player name.
//!
//! A logged raise amount is the number of chips the player added, not the
//! street total, so raises carry no `raise_to`.

use regex::Regex;

use crate::errors::ParseError;
use crate::model::{Action, ActionKind, HandHistory, Site, Street};
use crate::parser::common::{lines, Draft, Section};
use crate::parser::Parsed;

static_regex!(SEAT, r"^Seat (\d+): (.+?) \(\s*([^()]+?)\s*\)\s*$");
static_regex!(
    TABLE,
    r"^Table (.+?)(?:\s+(\d+) Max)?\s*(?:\((?:Real|Play) Money\))?$"
);
static_regex!(PLAYERS, r"^Total number of players\s*:\s*\d+(?:\s*/\s*(\d+))?");
static_regex!(DEAL_SECTION, r"(?i)^\*\* ?Dealing (down cards|flop|turn|river) ?\*\*\s*(.*)$");
static_regex!(SUMMARY_SECTION, r"(?i)^\*\* ?Summary ?\*\*");
static_regex!(DEALT, r"^Dealt to (.+?) \[\s*([^\]]+?)\s*\]");
static_regex!(BRACKET, r"\[\s*([^\]]+?)\s*\]");
static_regex!(
    WINS,
    r"^wins (\S+)(?: chips)?(?: USD| EUR| GBP)?(?: from the (?:main|side) pot(?: \d+)?)?"
);
static_regex!(COLLECTED, r"^collected \[\s*([^\]]+?)\s*\]");
static_regex!(UNCALLED, r"^(?:Uncalled bet|Return uncalled bet) \[?\(?\s*([^)\]]+?)\s*\)?\]? returned to (.+)$");
static_regex!(
    UNKNOWN_ACTOR,
    r"^(.+?) (?:folds|checks|calls|bets|raises|posts|is all-in)\b"
);
static_regex!(
    NOISE,
    r"(?i)(has joined the table|has left the table|is sitting out|has been disconnected|will be using|did not respond|is connected|timed out|finished|has been reconnected|is the button|^Game #|^Trny:|^Level:|^Tourney|^\*\*\*\*\*)"
);

/// Reads a hand whose first line matches `header`, with the hand id in the
/// first or second capture group and any trailing text in the third.
pub(super) fn parse(
    text: &str,
    site: Site,
    header: &Regex,
) -> Result<Parsed<HandHistory>, ParseError> {
    let mut draft = Draft::new(site);
    for (n, line) in lines(text) {
        draft.line = n;
        if draft.id.is_none() {
            let caps = header
                .captures(line)
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            let id = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            draft.id = id.map(str::to_string);
            draft.header_line(caps.get(3).map_or("", |m| m.as_str()));
            continue;
        }
        body_line(&mut draft, line);
    }
    draft.finish()
}

fn body_line(draft: &mut Draft, line: &str) {
    if let Some(caps) = SEAT.captures(line) {
        if draft.section != Section::Summary {
            match caps[1].parse::<u8>() {
                Ok(seat) => {
                    draft.seat(seat, &caps[2], &caps[3]);
                }
                Err(_) => draft.warn(ParseError::UnexpectedLine(line.to_string())),
            }
            return;
        }
    }
    if draft.section == Section::Header {
        if let Some(caps) = TABLE.captures(line) {
            draft.table_name = Some(caps[1].trim().to_string());
            if let Some(max) = caps.get(2) {
                draft.max_seats = max.as_str().parse().ok();
            }
        } else if let Some(caps) = PLAYERS.captures(line) {
            if let Some(max) = caps.get(1) {
                draft.max_seats = max.as_str().parse().ok();
            }
        }
        draft.header_line(line);
        return;
    }
    if let Some(caps) = DEAL_SECTION.captures(line) {
        let street = match caps[1].to_ascii_lowercase().as_str() {
            "flop" => Street::Flop,
            "turn" => Street::Turn,
            "river" => Street::River,
            _ => Street::Preflop,
        };
        let cards = match BRACKET.captures(&caps[2]) {
            Some(c) if street != Street::Preflop => draft.cards(&c[1]).unwrap_or_default(),
            _ => Vec::new(),
        };
        draft.begin_street(street, cards);
        return;
    }
    if SUMMARY_SECTION.is_match(line) {
        draft.section = Section::Summary;
        return;
    }
    if let Some(caps) = DEALT.captures(line) {
        let name = caps[1].to_string();
        if let Some(cards) = draft.cards(&caps[2]) {
            if draft.is_seated(&name) {
                draft.set_hero(&name, cards);
            } else {
                draft.warn(ParseError::MissingPlayer(name));
            }
        }
        return;
    }
    if let Some(caps) = UNCALLED.captures(line) {
        let name = caps[2].trim().to_string();
        if !draft.is_seated(&name) {
            draft.warn(ParseError::MissingPlayer(name));
        } else if let Some(amount) = draft.amount(&caps[1]) {
            draft.push_action(Action::with_amount(name, ActionKind::UncalledReturn, amount));
        }
        return;
    }

    let Some(resolved) = draft.resolve(line) else {
        if !NOISE.is_match(line) {
            match UNKNOWN_ACTOR.captures(line) {
                Some(caps) => draft.warn(ParseError::MissingPlayer(caps[1].to_string())),
                None if draft.section != Section::Summary => {
                    draft.warn(ParseError::UnexpectedLine(line.to_string()))
                }
                None => {}
            }
        }
        return;
    };
    let name = resolved.name;
    let rest = resolved.rest;
    player_line(draft, &name, rest, line);
}

fn player_line(draft: &mut Draft, name: &str, rest: &str, line: &str) {
    let lower = rest.to_ascii_lowercase();
    let bracket = BRACKET.captures(rest).map(|c| c[1].to_string());
    let chips = |draft: &mut Draft| bracket.as_deref().and_then(|b| draft.amount(b));

    let action = if lower.starts_with("folds") {
        Some(Action::new(name, ActionKind::Fold))
    } else if lower.starts_with("checks") {
        Some(Action::new(name, ActionKind::Check))
    } else if lower.starts_with("calls") {
        chips(draft).map(|a| Action::with_amount(name, ActionKind::Call, a))
    } else if lower.starts_with("bets") {
        chips(draft).map(|a| Action::with_amount(name, ActionKind::Bet, a))
    } else if lower.starts_with("raises") {
        chips(draft).map(|a| Action::with_amount(name, ActionKind::Raise, a))
    } else if lower.starts_with("is all-in") {
        chips(draft).map(|a| Action {
            all_in: true,
            ..Action::with_amount(name, ActionKind::AllIn, a)
        })
    } else if lower.starts_with("posts ante") || lower.starts_with("posts the ante") {
        chips(draft).map(|a| Action::with_amount(name, ActionKind::PostAnte, a))
    } else if lower.starts_with("posts") {
        chips(draft).map(|a| Action::with_amount(name, ActionKind::PostBlind, a))
    } else if lower.starts_with("shows")
        || lower.starts_with("mucks")
        || lower.starts_with("doesn't show")
    {
        if let Some(cards) = bracket.as_deref().and_then(|b| draft.cards(b)) {
            draft.reveal(name, cards);
        }
        return;
    } else if let Some(caps) = WINS.captures(rest) {
        if let Some(amount) = draft.amount(&caps[1]) {
            draft.win(name, amount);
        }
        return;
    } else if let Some(caps) = COLLECTED.captures(rest) {
        if let Some(amount) = draft.amount(&caps[1]) {
            draft.win(name, amount);
        }
        return;
    } else if NOISE.is_match(rest) || lower.starts_with("does not show") {
        return;
    } else {
        draft.warn(ParseError::MalformedAction(line.to_string()));
        return;
    };

    match action {
        Some(action) => draft.push_action(action),
        None if bracket.is_none() => draft.warn(ParseError::MalformedAction(line.to_string())),
        None => {}
    }
}
