//! PartyPoker header reader over the bracketed body grammar.

use crate::errors::ParseError;
use crate::model::{HandHistory, Site};
use crate::parser::bracketed;
use crate::parser::Parsed;

static_regex!(
    HEADER,
    r"^(?:\*{5} Hand History [Ff]or Game (\d+) \*{5}|PartyPoker Hand #(\d+):?)\s*(.*)$"
);

pub(super) fn parse(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    bracketed::parse(text, Site::PartyPoker, &HEADER)
}
