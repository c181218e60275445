//! Helper macros shared by the text grammars.

/// Declares a lazily compiled, process-wide regular expression.
///
/// Patterns are string literals checked by the grammar tests, so a compile
/// failure is a programming error rather than an input error.
///
/// # Examples
///
/// ```ignore
/// static_regex!(SEAT, r"^Seat (\d+): (.+)$");
/// let caps = SEAT.captures(line);
/// ```
macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
            regex::Regex::new($pattern).expect("static pattern compiles")
        });
    };
}
