//! GGPoker header reader. The body is PokerStars-compatible; house cuts
//! (rake, jackpot, bingo, fortune, tax) are summed into the rake by the
//! shared summary reader.

use crate::errors::ParseError;
use crate::model::{HandHistory, Site};
use crate::parser::common::{lines, Draft};
use crate::parser::pokerstars::body_line;
use crate::parser::Parsed;

static_regex!(HEADER, r"^Poker Hand #(\w+):\s*(.*)$");
static_regex!(GAME_ID, r"^Game ID: (\S+)\s*(.*)$");

pub(super) fn parse(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    let mut draft = Draft::new(Site::GgPoker);
    for (n, line) in lines(text) {
        draft.line = n;
        if draft.id.is_none() {
            let caps = HEADER
                .captures(line)
                .or_else(|| GAME_ID.captures(line))
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            draft.id = Some(caps[1].to_string());
            draft.header_line(&caps[2]);
            continue;
        }
        body_line(&mut draft, line);
    }
    draft.finish()
}
