//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` is used by `verify` to report every hand that
//! failed together with the hand it belongs to.

use std::fmt;

use handscope_engine::errors::{Diagnostic, HandError};

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// A hand could not be split, parsed or replayed
    Engine { code: &'static str, message: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine { code, message } => write!(f, "[{}] {}", code, message),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<HandError> for CliError {
    fn from(error: HandError) -> Self {
        CliError::Engine {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Generic error type for batch validation operations.
///
/// # Examples
///
/// ```rust
/// use handscope_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "[SNAPSHOT_POT_MISMATCH] reported total pot: expected 9, found 4".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "5: [SNAPSHOT_POT_MISMATCH] reported total pot: expected 9, found 4"
/// );
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscope_engine::errors::{ParseError, ValidationError};

    #[test]
    fn test_batch_validation_error_with_usize() {
        let error = BatchValidationError {
            item_context: 42,
            message: "Test error".to_string(),
        };
        assert_eq!(error.to_string(), "42: Test error");
    }

    #[test]
    fn engine_errors_keep_their_code() {
        let err = CliError::from(HandError::from(ParseError::MissingSeats));
        assert_eq!(
            err.to_string(),
            "[PARSE_MISSING_SEATS] seat list is missing or unreadable"
        );
        let err = CliError::from(HandError::from(ValidationError::EmptyInput));
        assert!(matches!(err, CliError::Engine { code: "VALIDATION_EMPTY_INPUT", .. }));
    }

    #[test]
    fn config_errors_are_wrapped() {
        let err = CliError::from(ConfigError::Invalid("Invalid seed".into()));
        assert_eq!(err.to_string(), "Configuration error: Invalid seed");
    }
}
