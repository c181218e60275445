//! Typed errors for every stage of the pipeline.
//!
//! Each component owns one enum and every variant carries a stable
//! machine-readable code. Callers decide how to render a failure from
//! [`Diagnostic::code`] and [`Diagnostic::severity`] without matching on
//! message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::Amount;
use crate::cards::CardParseError;

/// How bad a failure is. Only `Warning` is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Stable code, severity and recoverability shared by all engine errors.
pub trait Diagnostic: std::error::Error {
    fn code(&self) -> &'static str;
    fn severity(&self) -> Severity;

    fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

/// Caller-facing input problems, reported before any grammar runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input is empty")]
    EmptyInput,
    #[error("expected exactly one hand, found {found}")]
    MultipleHands { found: usize },
    #[error("no hand history header recognised in {lines} line(s) of input")]
    InvalidFormat { lines: usize },
}

impl Diagnostic for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "VALIDATION_EMPTY_INPUT",
            ValidationError::MultipleHands { .. } => "VALIDATION_MULTIPLE_HANDS",
            ValidationError::InvalidFormat { .. } => "VALIDATION_INVALID_FORMAT",
        }
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("seat list is missing or unreadable")]
    MissingSeats,
    #[error("player `{0}` is not seated at this table")]
    MissingPlayer(String),
    #[error("unrecognised hand history site")]
    UnknownSite,
    #[error("malformed action line `{0}`")]
    MalformedAction(String),
    #[error(transparent)]
    InvalidCard(#[from] CardParseError),
    #[error("no blinds or antes were posted")]
    MissingBlinds,
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("unexpected line `{0}`")]
    UnexpectedLine(String),
}

impl Diagnostic for ParseError {
    fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidHeader(_) => "PARSE_INVALID_HEADER",
            ParseError::MissingSeats => "PARSE_MISSING_SEATS",
            ParseError::MissingPlayer(_) => "PARSE_MISSING_PLAYER",
            ParseError::UnknownSite => "PARSE_UNKNOWN_SITE",
            ParseError::MalformedAction(_) => "PARSE_MALFORMED_ACTION",
            ParseError::InvalidCard(_) => "PARSE_INVALID_CARD",
            ParseError::MissingBlinds => "PARSE_MISSING_BLINDS",
            ParseError::InvalidAmount(_) => "PARSE_INVALID_AMOUNT",
            ParseError::UnexpectedLine(_) => "PARSE_UNEXPECTED_LINE",
        }
    }

    // Line-level problems are skipped; only a broken mandatory section aborts.
    fn severity(&self) -> Severity {
        match self {
            ParseError::InvalidHeader(_)
            | ParseError::MissingSeats
            | ParseError::UnknownSite
            | ParseError::MissingBlinds => Severity::Error,
            ParseError::MissingPlayer(_)
            | ParseError::MalformedAction(_)
            | ParseError::InvalidCard(_)
            | ParseError::InvalidAmount(_)
            | ParseError::UnexpectedLine(_) => Severity::Warning,
        }
    }
}

/// A recoverable parse problem tied to the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub error: ParseError,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line, self.error.code(), self.error)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("chips not conserved at step {action_index}: expected {expected}, found {actual}")]
    InconsistentStacks {
        action_index: usize,
        expected: Amount,
        actual: Amount,
    },
    #[error("invalid pot state at step {action_index}: {reason}")]
    InvalidPot { action_index: usize, reason: String },
    #[error("action references `{0}`, who is not in the seat list")]
    MissingPlayer(String),
    #[error("{player} would have a negative stack ({stack}) at step {action_index}")]
    NegativeStack {
        player: String,
        stack: Amount,
        action_index: usize,
    },
    #[error("{what}: expected {expected}, found {actual}")]
    PotMismatch {
        what: &'static str,
        expected: Amount,
        actual: Amount,
    },
    #[error("{player} posts an ante of {ante} with only {stack} behind")]
    AnteExceedsStack {
        player: String,
        ante: Amount,
        stack: Amount,
    },
}

impl Diagnostic for SnapshotError {
    fn code(&self) -> &'static str {
        match self {
            SnapshotError::InconsistentStacks { .. } => "SNAPSHOT_INCONSISTENT_STACKS",
            SnapshotError::InvalidPot { .. } => "SNAPSHOT_INVALID_POT",
            SnapshotError::MissingPlayer(_) => "SNAPSHOT_MISSING_PLAYER",
            SnapshotError::NegativeStack { .. } => "SNAPSHOT_NEGATIVE_STACK",
            SnapshotError::PotMismatch { .. } => "SNAPSHOT_POT_MISMATCH",
            SnapshotError::AnteExceedsStack { .. } => "SNAPSHOT_ANTE_EXCEEDS_STACK",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            SnapshotError::MissingPlayer(_) | SnapshotError::AnteExceedsStack { .. } => {
                Severity::Error
            }
            _ => Severity::Critical,
        }
    }
}

/// Any failure of the split → parse → build pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl Diagnostic for HandError {
    fn code(&self) -> &'static str {
        match self {
            HandError::Validation(e) => e.code(),
            HandError::Parse(e) => e.code(),
            HandError::Snapshot(e) => e.code(),
        }
    }

    fn severity(&self) -> Severity {
        match self {
            HandError::Validation(e) => e.severity(),
            HandError::Parse(e) => e.severity(),
            HandError::Snapshot(e) => e.severity(),
        }
    }
}
