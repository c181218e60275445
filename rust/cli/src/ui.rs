//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_prefixed() {
        let mut err = Vec::new();
        display_warning(&mut err, "text before the first hand was ignored").unwrap();
        assert!(String::from_utf8(err).unwrap().starts_with("WARNING: "));
    }
}
