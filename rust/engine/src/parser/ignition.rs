//! Ignition (Bovada) grammar.
//!
//! Players are anonymised and named by their position at the start of the
//! hand (`Big Blind`, `UTG+1`, `Dealer`); `[ME]` marks the hero. Every event
//! line reads `<name> : <event>`. Cash amounts are always dollars.

use crate::errors::ParseError;
use crate::model::{Action, ActionKind, HandHistory, Site, Street};
use crate::parser::common::{lines, Draft, Section};
use crate::parser::Parsed;

static_regex!(
    HEADER,
    r"^(?:Ignition|Bovada|Bodog) Hand #(\d+)\s*(?:TBL#(\d+))?\s*(.*)$"
);
static_regex!(SEAT, r"^Seat\s*\+?\s*(\d+):\s*(.+?)\s*\(\s*([^()]+?)\s+in chips\s*\)");
static_regex!(SECTION, r"^\*\*\* ?([A-Z ]+?) ?\*\*\*(.*)$");
static_regex!(LAST_BRACKET, r"\[([^\]]+)\]\s*$");
static_regex!(TOTAL_POT, r"^Total Pot\s*\(\s*([^)]+?)\s*\)");
static_regex!(AMOUNT_TO, r"^(\S+)\s+to\s+(\S+)");

const HERO_MARK: &str = "[ME]";

pub(super) fn parse(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    let mut draft = Draft::new(Site::Ignition);
    for (n, line) in lines(text) {
        draft.line = n;
        if draft.id.is_none() {
            let caps = HEADER
                .captures(line)
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            draft.id = Some(caps[1].to_string());
            draft.table_name = caps.get(2).map(|m| m.as_str().to_string());
            let rest = &caps[3];
            if !rest.to_ascii_lowercase().contains("tournament") {
                draft.currency = Some("USD".to_string());
            }
            draft.header_line(rest);
            continue;
        }
        body_line(&mut draft, line);
    }
    draft.finish()
}

fn body_line(draft: &mut Draft, line: &str) {
    if let Some(caps) = SEAT.captures(line) {
        if draft.section != Section::Summary {
            seat_line(draft, &caps);
        }
        return;
    }
    if let Some(caps) = SECTION.captures(line) {
        let street = match caps[1].trim() {
            "HOLE CARDS" => Street::Preflop,
            "FLOP" => Street::Flop,
            "TURN" => Street::Turn,
            "RIVER" => Street::River,
            "SHOW DOWN" | "SHOWDOWN" => Street::Showdown,
            "SUMMARY" => {
                draft.section = Section::Summary;
                return;
            }
            other => {
                draft.warn(ParseError::UnexpectedLine(format!("*** {} ***", other)));
                return;
            }
        };
        let cards = match LAST_BRACKET.captures(&caps[2]) {
            Some(c) if street != Street::Preflop => draft.cards(&c[1]).unwrap_or_default(),
            _ => Vec::new(),
        };
        draft.begin_street(street, cards);
        return;
    }
    if let Some(caps) = TOTAL_POT.captures(line) {
        if let Some(total) = draft.amount(&caps[1]) {
            draft.summary_mut().total_pot = Some(total);
        }
        return;
    }
    if draft.section == Section::Summary {
        return;
    }

    let Some((who, event)) = line.split_once(" : ") else {
        draft.warn(ParseError::UnexpectedLine(line.to_string()));
        return;
    };
    let (name, is_hero) = player_name(who);
    event_line(draft, &name, is_hero, event.trim(), line);
}

/// Strips the `[ME]` marker and the padding Ignition puts around names.
fn player_name(raw: &str) -> (String, bool) {
    let is_hero = raw.contains(HERO_MARK);
    let name = raw.replace(HERO_MARK, "");
    (name.split_whitespace().collect::<Vec<_>>().join(" "), is_hero)
}

fn seat_line(draft: &mut Draft, caps: &regex::Captures<'_>) {
    let Ok(seat) = caps[1].parse::<u8>() else {
        draft.warn(ParseError::UnexpectedLine(caps[0].to_string()));
        return;
    };
    let (name, is_hero) = player_name(&caps[2]);
    if let Some(player) = draft.seat(seat, &name, &caps[3]) {
        player.is_hero = is_hero;
    }
}

fn event_line(draft: &mut Draft, name: &str, is_hero: bool, event: &str, line: &str) {
    let lower = event.to_ascii_lowercase();

    if let Some(seat) = lower.strip_prefix("set dealer") {
        draft.button_seat = seat
            .trim()
            .trim_matches(|c| c == '[' || c == ']')
            .parse()
            .ok();
        return;
    }
    if IGNORED_EVENTS.iter().any(|e| lower.starts_with(e)) {
        return;
    }
    if !draft.is_seated(name) {
        draft.warn(ParseError::MissingPlayer(name.to_string()));
        return;
    }

    if lower.starts_with("card dealt to a spot") {
        if let Some(cards) = LAST_BRACKET
            .captures(event)
            .and_then(|c| draft.cards(&c[1]))
        {
            if is_hero {
                draft.set_hero(name, cards);
            } else {
                draft.deal(name, cards);
            }
        }
        return;
    }
    if lower.starts_with("showdown") || lower.starts_with("mucks") || lower.starts_with("does not show") {
        if let Some(cards) = LAST_BRACKET
            .captures(event)
            .and_then(|c| draft.cards(&c[1]))
        {
            draft.reveal(name, cards);
        }
        return;
    }
    if let Some(rest) = strip_prefix_ci(event, "hand result-side pot")
        .or_else(|| strip_prefix_ci(event, "hand result"))
    {
        if let Some(amount) = draft.amount(rest.trim()) {
            draft.win(name, amount);
        }
        return;
    }

    let (kind, all_in, rest) = if let Some(rest) = strip_prefix_ci(event, "all-in(raise)") {
        (ActionKind::AllIn, true, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "all-in") {
        (ActionKind::AllIn, true, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "return uncalled portion of bet") {
        (ActionKind::UncalledReturn, false, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "small blind")
        .or_else(|| strip_prefix_ci(event, "big blind"))
        .or_else(|| strip_prefix_ci(event, "posts chip"))
        .or_else(|| strip_prefix_ci(event, "posts dead chip"))
    {
        (ActionKind::PostBlind, false, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "ante chip") {
        (ActionKind::PostAnte, false, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "raises") {
        (ActionKind::Raise, false, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "bets") {
        (ActionKind::Bet, false, rest)
    } else if let Some(rest) = strip_prefix_ci(event, "calls") {
        (ActionKind::Call, false, rest)
    } else if lower.starts_with("fold") {
        draft.push_action(Action::new(name, ActionKind::Fold));
        return;
    } else if lower.starts_with("check") {
        draft.push_action(Action::new(name, ActionKind::Check));
        return;
    } else {
        draft.warn(ParseError::MalformedAction(line.to_string()));
        return;
    };

    let rest = rest.trim();
    let (amount_text, to_text) = match AMOUNT_TO.captures(rest) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        ),
        None => (rest, None),
    };
    let Some(amount) = draft.amount(amount_text) else {
        return;
    };
    let raise_to = match to_text {
        Some(to) => match draft.amount(to) {
            Some(t) => Some(t),
            None => return,
        },
        None => None,
    };
    draft.push_action(Action {
        raise_to,
        all_in,
        ..Action::with_amount(name, kind, amount)
    });
}

// Table housekeeping that carries no chips or cards.
const IGNORED_EVENTS: [&str; 12] = [
    "seat sit down",
    "seat stand",
    "seat re-join",
    "table enter user",
    "table leave user",
    "table deposit",
    "sitout",
    "sit out",
    "enter(auto)",
    "leave(auto)",
    "re-join",
    "ranking",
];

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
