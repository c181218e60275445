//! Site grammars and the dispatch layer in front of them.
//!
//! The grammar is chosen once, from the first non-blank line of a hand, and
//! the whole hand is then read by that grammar alone.

mod bracketed;
mod common;
mod ggpoker;
mod ignition;
mod pacific;
mod partypoker;
mod pokerstars;

use tracing::debug;

use crate::errors::{HandError, ParseError, ParseWarning, ValidationError};
use crate::model::{HandHistory, Site};
use crate::splitter::split_hands;

static_regex!(POKERSTARS_HEADER, r"^PokerStars (?:Zoom )?(?:Hand|Game) #\d+");
static_regex!(GGPOKER_HEADER, r"^(?:Poker Hand #\w+:|Game ID: \S+)");
static_regex!(
    PARTYPOKER_HEADER,
    r"^(?:\*{5} Hand History [Ff]or Game \d+|PartyPoker Hand #\d+)"
);
static_regex!(IGNITION_HEADER, r"^(?:Ignition|Bovada|Bodog) Hand #\d+");
static_regex!(
    PACIFIC_HEADER,
    r"^(?:#Game No\s*:\s*\d+|\*{5} 888poker Hand History for Game \d+)"
);

/// A value together with the recoverable problems met while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

/// One grammar per supported room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteGrammar {
    PokerStars,
    GgPoker,
    PartyPoker,
    Ignition,
    Pacific888,
}

impl SiteGrammar {
    pub const ALL: [SiteGrammar; 5] = [
        SiteGrammar::PokerStars,
        SiteGrammar::GgPoker,
        SiteGrammar::PartyPoker,
        SiteGrammar::Ignition,
        SiteGrammar::Pacific888,
    ];

    /// Grammar whose hand header this line is, if any.
    pub fn from_header_line(line: &str) -> Option<SiteGrammar> {
        let line = line.trim().trim_start_matches('\u{feff}');
        Self::ALL.into_iter().find(|g| g.header().is_match(line))
    }

    /// Picks the grammar from the first non-blank line of `text`.
    pub fn sniff(text: &str) -> Option<SiteGrammar> {
        let first = text
            .lines()
            .map(|l| l.trim().trim_start_matches('\u{feff}'))
            .find(|l| !l.is_empty())?;
        Self::from_header_line(first)
    }

    pub fn site(self) -> Site {
        match self {
            SiteGrammar::PokerStars => Site::PokerStars,
            SiteGrammar::GgPoker => Site::GgPoker,
            SiteGrammar::PartyPoker => Site::PartyPoker,
            SiteGrammar::Ignition => Site::Ignition,
            SiteGrammar::Pacific888 => Site::Pacific888,
        }
    }

    fn header(self) -> &'static regex::Regex {
        match self {
            SiteGrammar::PokerStars => &POKERSTARS_HEADER,
            SiteGrammar::GgPoker => &GGPOKER_HEADER,
            SiteGrammar::PartyPoker => &PARTYPOKER_HEADER,
            SiteGrammar::Ignition => &IGNITION_HEADER,
            SiteGrammar::Pacific888 => &PACIFIC_HEADER,
        }
    }

    /// Reads one hand's text with this grammar.
    pub fn parse(self, text: &str) -> Result<Parsed<HandHistory>, ParseError> {
        match self {
            SiteGrammar::PokerStars => pokerstars::parse(text),
            SiteGrammar::GgPoker => ggpoker::parse(text),
            SiteGrammar::PartyPoker => partypoker::parse(text),
            SiteGrammar::Ignition => ignition::parse(text),
            SiteGrammar::Pacific888 => pacific::parse(text),
        }
    }
}

/// Parses one hand, choosing the grammar from its header.
pub fn parse_hand(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    let grammar = SiteGrammar::sniff(text).ok_or(ParseError::UnknownSite)?;
    debug!(site = %grammar.site(), "detected hand history site");
    grammar.parse(text)
}

/// Parses text that must hold exactly one hand.
pub fn parse_single(text: &str) -> Result<Parsed<HandHistory>, HandError> {
    let split = split_hands(text)?;
    if split.hands.len() != 1 {
        return Err(ValidationError::MultipleHands {
            found: split.hands.len(),
        }
        .into());
    }
    Ok(parse_hand(split.hands[0])?)
}
