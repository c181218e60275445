//! Finds hand boundaries inside a pasted blob of many hand histories.
//!
//! A new hand starts at every recognised header line. The one exception is
//! the 888poker banner that follows a `#Game No` line for the same game id,
//! which belongs to the hand it repeats. Trailing or garbled fragments that never reach a seat
//! list and a result are dropped with a warning instead of being handed to a
//! grammar.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ValidationError;
use crate::model::Site;
use crate::parser::SiteGrammar;

static_regex!(SEAT_LINE, r"^Seat\s*\+?\s*#?\d+\s*:");
static_regex!(
    RESULT_LINE,
    r"(?i)(\*\*\*\s*summary\s*\*\*\*|\*\*\s*summary\s*\*\*|\bcollected\b|\bwins\b|hand result|total pot)"
);
static_regex!(PACIFIC_GAME_NO, r"^#Game No\s*:\s*(\d+)");
static_regex!(PACIFIC_BANNER, r"^\*{5} 888poker Hand History for Game (\d+)");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// Text before the first recognised header.
    Preamble { line: usize },
    /// A hand that starts at `line` but never became complete.
    Incomplete {
        line: usize,
        site: Site,
        reason: &'static str,
    },
}

impl SplitWarning {
    pub fn line(&self) -> usize {
        match self {
            SplitWarning::Preamble { line } | SplitWarning::Incomplete { line, .. } => *line,
        }
    }
}

impl fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitWarning::Preamble { line } => {
                write!(f, "line {}: text before the first hand was ignored", line)
            }
            SplitWarning::Incomplete { line, site, reason } => {
                write!(f, "line {}: discarded incomplete {} hand ({})", line, site, reason)
            }
        }
    }
}

/// Hands found in a blob, in input order, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    pub hands: Vec<&'a str>,
    pub warnings: Vec<SplitWarning>,
}

struct Chunk {
    start: usize,
    end: usize,
    first_line: usize,
    site: Site,
    /// Game id from an 888poker `#Game No` line still waiting for its banner.
    pending_banner: Option<String>,
    seats: bool,
    result: bool,
}

impl Chunk {
    fn open(grammar: SiteGrammar, line: &str, start: usize, end: usize, line_no: usize) -> Self {
        let pending_banner = PACIFIC_GAME_NO
            .captures(line)
            .map(|caps| caps[1].to_string());
        Chunk {
            start,
            end,
            first_line: line_no,
            site: grammar.site(),
            pending_banner,
            seats: false,
            result: false,
        }
    }

    /// True when `line` is the 888poker banner repeating this chunk's game id.
    fn takes_banner(&self, line: &str) -> bool {
        match (&self.pending_banner, PACIFIC_BANNER.captures(line)) {
            (Some(id), Some(caps)) => &caps[1] == id.as_str(),
            _ => false,
        }
    }

    fn close<'a>(self, text: &'a str, split: &mut Split<'a>) {
        let reason = match (self.seats, self.result) {
            (true, true) => {
                debug!(line = self.first_line, site = %self.site, "hand boundary");
                split.hands.push(text[self.start..self.end].trim());
                return;
            }
            (false, _) => "no seat list",
            (true, false) => "no result section",
        };
        let warning = SplitWarning::Incomplete {
            line: self.first_line,
            site: self.site,
            reason,
        };
        warn!(%warning, "splitter discarded a chunk");
        split.warnings.push(warning);
    }
}

/// Splits `text` into single-hand substrings.
///
/// Fails with [`ValidationError::EmptyInput`] on blank input and
/// [`ValidationError::InvalidFormat`] when no complete hand is found.
pub fn split_hands(text: &str) -> Result<Split<'_>, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let mut split = Split {
        hands: Vec::new(),
        warnings: Vec::new(),
    };
    let mut current: Option<Chunk> = None;
    let mut preamble_reported = false;
    let mut offset = 0;
    let mut line_count = 0;

    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        line_count = line_no;
        let line_start = offset;
        offset += raw.len();
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }

        if let Some(grammar) = SiteGrammar::from_header_line(line) {
            let continues_header = current.as_ref().is_some_and(|c| c.takes_banner(line));
            if !continues_header {
                if let Some(done) = current.take() {
                    done.close(text, &mut split);
                }
                current = Some(Chunk::open(grammar, line, line_start, offset, line_no));
                continue;
            }
        }

        match current.as_mut() {
            Some(chunk) => {
                chunk.end = offset;
                chunk.pending_banner = None;
                chunk.seats |= SEAT_LINE.is_match(line);
                chunk.result |= RESULT_LINE.is_match(line);
            }
            None if !preamble_reported => {
                preamble_reported = true;
                let warning = SplitWarning::Preamble { line: line_no };
                warn!(%warning, "splitter ignored preamble");
                split.warnings.push(warning);
            }
            None => {}
        }
    }
    if let Some(done) = current.take() {
        done.close(text, &mut split);
    }

    if split.hands.is_empty() {
        return Err(ValidationError::InvalidFormat { lines: line_count });
    }
    Ok(split)
}
