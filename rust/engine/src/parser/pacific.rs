//! 888poker header reader over the bracketed body grammar.
//!
//! 888 opens each hand with a `#Game No` line followed by a banner that
//! repeats the id; either one is accepted as the first line.

use crate::errors::ParseError;
use crate::model::{HandHistory, Site};
use crate::parser::bracketed;
use crate::parser::Parsed;

static_regex!(
    HEADER,
    r"^(?:#Game No\s*:\s*(\d+)|\*{5} 888poker Hand History for Game (\d+) \*{5})\s*(.*)$"
);

pub(super) fn parse(text: &str) -> Result<Parsed<HandHistory>, ParseError> {
    bracketed::parse(text, Site::Pacific888, &HEADER)
}
