//! The `verify` command: parses and replays every hand in an export and
//! reports each failure with its stable error code.
//!
//! With `strict` set in the configuration, a hand that parsed with skipped
//! lines counts as a failure too.

use std::collections::BTreeMap;
use std::io::Write;

use handscope_engine::errors::Diagnostic;
use tracing::debug;

use super::{load_input, split_reporting};
use crate::config;
use crate::error::{BatchValidationError, CliError};

/// The `usize` context is the 1-based hand number within the input.
type VerifyError = BatchValidationError<usize>;

pub fn handle_verify_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let strict = config::load()?.strict;
    let text = load_input(input)?;
    let split = split_reporting(&text, err)?;

    let mut errors: Vec<VerifyError> = Vec::new();
    let mut codes: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut warnings = 0usize;

    for (i, chunk) in split.hands.iter().enumerate() {
        let hand = i + 1;
        match handscope_engine::replay(chunk) {
            Ok((parsed, _)) => {
                warnings += parsed.warnings.len();
                if strict {
                    for w in &parsed.warnings {
                        *codes.entry(w.error.code()).or_default() += 1;
                        errors.push(VerifyError {
                            item_context: hand,
                            message: w.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                debug!(hand, code = e.code(), "hand failed verification");
                *codes.entry(e.code()).or_default() += 1;
                errors.push(VerifyError {
                    item_context: hand,
                    message: format!("[{}] {}", e.code(), e),
                });
            }
        }
    }

    let hands = split.hands.len();
    if errors.is_empty() {
        writeln!(
            out,
            "Verify: OK (hands={}, warnings={}, skipped={})",
            hands,
            warnings,
            split.warnings.len()
        )?;
        return Ok(());
    }

    writeln!(out, "Verify: FAIL (hands={})", hands)?;
    writeln!(err)?;
    writeln!(err, "Errors found:")?;
    for error in &errors {
        writeln!(err, "  Hand {}", error)?;
    }
    writeln!(err)?;
    let mut invalid: Vec<usize> = errors.iter().map(|e| e.item_context).collect();
    invalid.dedup();
    let by_code: Vec<String> = codes.iter().map(|(c, n)| format!("{}={}", c, n)).collect();
    writeln!(
        err,
        "Summary: {} error(s) in {} hands ({} invalid hands; {})",
        errors.len(),
        hands,
        invalid.len(),
        by_code.join(", ")
    )?;
    Err(CliError::InvalidInput(format!(
        "{} validation errors found",
        errors.len()
    )))
}
