//! PokerStars grammar. GGPoker exports the same body, so [`body_line`] is
//! shared with the GGPoker header reader.

use crate::errors::ParseError;
use crate::model::{
    Action, ActionKind, BountyAward, HandHistory, Site, Street, TopUp, TopUpKind,
};
use crate::parser::common::{lines, Draft, Section};
use crate::parser::Parsed;

static_regex!(HEADER, r"^PokerStars (?:Zoom )?(?:Hand|Game) #(\d+):?\s*(.*)$");
static_regex!(TABLE, r"^Table '([^']+)'\s+(?:(\d+)-max\s+)?");
static_regex!(
    SEAT,
    r"^Seat (\d+): (.+?) \(([^()]*?) in chips(?:, (.+?) bounty)?\)(.*)$"
);
static_regex!(SECTION, r"^\*\*\* ?([A-Z ]+?) ?\*\*\*(.*)$");
static_regex!(DEALT, r"^Dealt to (.+?)(?: \[([^\]]+)\])?(?: \[([^\]]+)\])?$");
static_regex!(UNCALLED, r"^Uncalled bet \(([^)]+)\) returned to (.+)$");
static_regex!(TOTAL_POT, r"^Total pot (\S+)(.*)$");
static_regex!(POT_PART, r"(?:Main|Side) pot(?:-\d+)? (\S+?)\.?(?:\s|$)");
static_regex!(HOUSE_CUT, r"\|\s*(?:Rake|Jackpot|Bingo|Fortune|Tax|Fee) (\S+)");
static_regex!(SUMMARY_SEAT, r"^Seat \d+: (.+?) (?:showed|mucked) \[([^\]]+)\]");
static_regex!(LAST_BRACKET, r"\[([^\]]+)\]\s*$");
static_regex!(FIRST_BRACKET, r"\[([^\]]+)\]");
static_regex!(COLLECTED, r"^collected (\S+) from (?:the )?(?:main |side )?pot");
static_regex!(REBUY, r"^re-buys and receives (\S+) chips(?: for (\S+))?");
static_regex!(ADD_ON, r"^takes the add-on and receives (\S+) chips(?: for (\S+))?");
static_regex!(BOUNTY, r"^wins (?:the )?(\S+) (?:bounty )?for eliminating (.+?)(?: and .*)?$");
static_regex!(
    UNKNOWN_ACTOR,
    r"^(.+?): (?:folds|checks|calls|bets|raises|posts|shows|mucks)\b"
);
static_regex!(
    NOISE,
    r#"(?i)(said, "|is connected|is disconnected|has timed out|joins the table|leaves the table|has returned|will be allowed to play|is sitting out|sits out|was removed from the table|finished the tournament|wins the tournament|doesn't show hand|mucks hand)"#
);

pub(super) fn parse(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    let mut draft = Draft::new(Site::PokerStars);
    for (n, line) in lines(text) {
        draft.line = n;
        if draft.id.is_none() {
            let caps = HEADER
                .captures(line)
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            draft.id = Some(caps[1].to_string());
            draft.header_line(&caps[2]);
            continue;
        }
        body_line(&mut draft, line);
    }
    draft.finish()
}

/// Everything after the header line: table, seats, streets and summary.
pub(super) fn body_line(draft: &mut Draft, line: &str) {
    if let Some(caps) = SEAT.captures(line) {
        if draft.section != Section::Summary {
            seat_line(draft, &caps);
            return;
        }
    }
    if draft.section == Section::Header {
        if let Some(caps) = TABLE.captures(line) {
            draft.table_name = Some(caps[1].to_string());
            draft.max_seats = caps.get(2).and_then(|m| m.as_str().parse().ok());
        }
        draft.header_line(line);
        return;
    }
    if let Some(caps) = SECTION.captures(line) {
        section_line(draft, &caps[1], &caps[2]);
        return;
    }
    if let Some(caps) = DEALT.captures(line) {
        if let Some(cards_text) = caps.get(3).or_else(|| caps.get(2)) {
            let name = caps[1].to_string();
            if let Some(cards) = draft.cards(cards_text.as_str()) {
                if draft.is_seated(&name) {
                    draft.set_hero(&name, cards);
                } else {
                    draft.warn(ParseError::MissingPlayer(name));
                }
            }
        }
        return;
    }
    if let Some(caps) = UNCALLED.captures(line) {
        let name = caps[2].trim().to_string();
        if !draft.is_seated(&name) {
            draft.warn(ParseError::MissingPlayer(name));
            return;
        }
        if let Some(amount) = draft.amount(&caps[1]) {
            draft.push_action(Action::with_amount(name, ActionKind::UncalledReturn, amount));
        }
        return;
    }
    if let Some(caps) = TOTAL_POT.captures(line) {
        total_pot_line(draft, &caps[1], &caps[2]);
        return;
    }
    if draft.section == Section::Summary {
        if let Some(caps) = SUMMARY_SEAT.captures(line) {
            let seat_text = caps[1].to_string();
            let cards_text = caps[2].to_string();
            // Summary names carry a trailing "(button)" or "(big blind)" tag.
            if let Some(resolved) = draft.resolve(&seat_text) {
                let name = resolved.name;
                if let Some(cards) = draft.cards(&cards_text) {
                    draft.reveal(&name, cards);
                }
            }
        }
        return;
    }

    match draft.resolve(line) {
        Some(resolved) if resolved.colon => {
            let name = resolved.name;
            action_line(draft, &name, resolved.rest, line);
        }
        Some(resolved) => {
            let name = resolved.name;
            result_line(draft, &name, resolved.rest, line);
        }
        None => {
            if NOISE.is_match(line) {
                return;
            }
            match UNKNOWN_ACTOR.captures(line) {
                Some(caps) => draft.warn(ParseError::MissingPlayer(caps[1].to_string())),
                None => draft.warn(ParseError::UnexpectedLine(line.to_string())),
            }
        }
    }
}

fn seat_line(draft: &mut Draft, caps: &regex::Captures<'_>) {
    let Ok(seat) = caps[1].parse::<u8>() else {
        draft.warn(ParseError::UnexpectedLine(caps[0].to_string()));
        return;
    };
    let bounty = caps.get(4).map(|m| m.as_str().to_string());
    let sitting_out = caps[5].contains("sitting out");
    if let Some(player) = draft.seat(seat, &caps[2], &caps[3]) {
        player.bounty = bounty;
        player.sitting_out = sitting_out;
    }
}

fn section_line(draft: &mut Draft, name: &str, rest: &str) {
    let street = match name.trim() {
        "HOLE CARDS" | "DEALING HANDS" => Street::Preflop,
        "FLOP" | "FIRST FLOP" => Street::Flop,
        "TURN" | "FIRST TURN" => Street::Turn,
        "RIVER" | "FIRST RIVER" => Street::River,
        "SHOW DOWN" | "SHOWDOWN" | "FIRST SHOW DOWN" => Street::Showdown,
        "SUMMARY" => {
            draft.section = Section::Summary;
            return;
        }
        _ => {
            draft.warn(ParseError::UnexpectedLine(format!("*** {} ***", name)));
            return;
        }
    };
    let cards = match LAST_BRACKET.captures(rest) {
        Some(caps) if street != Street::Preflop => draft.cards(&caps[1]).unwrap_or_default(),
        _ => Vec::new(),
    };
    draft.begin_street(street, cards);
}

fn total_pot_line(draft: &mut Draft, total: &str, rest: &str) {
    let Some(total) = draft.amount(total) else {
        return;
    };
    let mut pots = Vec::new();
    for caps in POT_PART.captures_iter(rest) {
        pots.extend(draft.amount(&caps[1]));
    }
    let mut rake = None;
    for caps in HOUSE_CUT.captures_iter(rest) {
        if let Some(cut) = draft.amount(&caps[1]) {
            rake = Some(rake.unwrap_or(0) + cut);
        }
    }
    let summary = draft.summary_mut();
    summary.total_pot = Some(total);
    summary.side_pots = pots;
    summary.rake = rake;
}

fn action_line(draft: &mut Draft, name: &str, rest: &str, line: &str) {
    let all_in = rest.ends_with("and is all-in");
    let rest = rest.trim_end_matches("and is all-in").trim();
    let mut words = rest.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let action = match (verb, args.as_slice()) {
        ("folds", _) => Some(Action::new(name, ActionKind::Fold)),
        ("checks", _) => Some(Action::new(name, ActionKind::Check)),
        ("calls", [amount, ..]) => bet(draft, name, ActionKind::Call, amount, None),
        ("bets", [amount, ..]) => bet(draft, name, ActionKind::Bet, amount, None),
        ("raises", [amount, "to", to, ..]) => {
            bet(draft, name, ActionKind::Raise, amount, Some(*to))
        }
        ("posts", ["small", "blind", amount, ..])
        | ("posts", ["big", "blind", amount, ..])
        | ("posts", ["small", "&", "big", "blinds", amount, ..])
        | ("posts", ["straddle", amount, ..]) => {
            bet(draft, name, ActionKind::PostBlind, amount, None)
        }
        ("posts", ["the", "ante", amount, ..]) | ("posts", ["ante", amount, ..]) => {
            bet(draft, name, ActionKind::PostAnte, amount, None)
        }
        ("shows", _) => {
            if let Some(caps) = FIRST_BRACKET.captures(rest) {
                if let Some(cards) = draft.cards(&caps[1]) {
                    draft.reveal(name, cards);
                }
            }
            return;
        }
        ("mucks", _) | ("doesn't", _) | ("is", _) | ("sits", _) | ("has", _) => return,
        _ => {
            draft.warn(ParseError::MalformedAction(line.to_string()));
            return;
        }
    };
    if let Some(mut action) = action {
        action.all_in = all_in;
        draft.push_action(action);
    }
}

fn bet(
    draft: &mut Draft,
    name: &str,
    kind: ActionKind,
    amount: &str,
    to: Option<&str>,
) -> Option<Action> {
    let amount = draft.amount(amount)?;
    let raise_to = match to {
        Some(to) => Some(draft.amount(to)?),
        None => None,
    };
    Some(Action {
        raise_to,
        ..Action::with_amount(name, kind, amount)
    })
}

/// Lines where a seated name is followed by a result rather than a colon.
fn result_line(draft: &mut Draft, name: &str, rest: &str, line: &str) {
    if let Some(caps) = COLLECTED.captures(rest) {
        if let Some(amount) = draft.amount(&caps[1]) {
            draft.win(name, amount);
        }
    } else if let Some(caps) = REBUY.captures(rest) {
        top_up(draft, name, TopUpKind::Rebuy, &caps);
    } else if let Some(caps) = ADD_ON.captures(rest) {
        top_up(draft, name, TopUpKind::AddOn, &caps);
    } else if let Some(caps) = BOUNTY.captures(rest) {
        draft.bounty(BountyAward {
            winner: name.to_string(),
            eliminated: caps[2].to_string(),
            amount: caps[1].to_string(),
        });
    } else if !NOISE.is_match(rest) {
        draft.warn(ParseError::UnexpectedLine(line.to_string()));
    }
}

fn top_up(draft: &mut Draft, name: &str, kind: TopUpKind, caps: &regex::Captures<'_>) {
    if let Some(chips) = draft.amount(&caps[1]) {
        draft.top_up(TopUp {
            player: name.to_string(),
            kind,
            chips,
            cost: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
}
