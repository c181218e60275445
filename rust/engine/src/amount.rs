//! Exact money handling.
//!
//! Every amount in the engine is an integer count of the hand's minor unit:
//! whole chips for tournaments and play chips, cents for cash hands quoted in
//! a currency. Parsing never goes through floating point.

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

pub type Amount = i64;

/// The minor unit a hand's amounts are counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyUnit {
    Chips,
    Cents,
}

impl MoneyUnit {
    pub fn divisor(self) -> Amount {
        match self {
            MoneyUnit::Chips => 1,
            MoneyUnit::Cents => 100,
        }
    }

    /// Value in the room's display unit (dollars, euros or chips).
    pub fn to_major(self, amount: Amount) -> f64 {
        amount as f64 / self.divisor() as f64
    }

    pub fn format(self, amount: Amount) -> String {
        match self {
            MoneyUnit::Chips => amount.to_string(),
            MoneyUnit::Cents => {
                let sign = if amount < 0 { "-" } else { "" };
                let abs = amount.abs();
                format!("{}{}.{:02}", sign, abs / 100, abs % 100)
            }
        }
    }
}

const CURRENCY_CODES: [&str; 5] = ["USD", "EUR", "GBP", "CAD", "CNY"];

/// Maps a currency symbol or code found in stakes text to an ISO code.
pub fn detect_currency(text: &str) -> Option<String> {
    if text.contains('$') {
        return Some("USD".to_string());
    }
    if text.contains('€') {
        return Some("EUR".to_string());
    }
    if text.contains('£') {
        return Some("GBP".to_string());
    }
    CURRENCY_CODES
        .iter()
        .find(|code| text.contains(*code))
        .map(|code| code.to_string())
}

/// Parses a room-formatted amount (`"$1,234.5"`, `"1,500"`, `"€0.02 EUR"`)
/// into minor units.
pub fn parse_amount(text: &str, unit: MoneyUnit) -> Result<Amount, ParseError> {
    let invalid = || ParseError::InvalidAmount(text.trim().to_string());
    let mut cleaned: String = text
        .trim()
        .trim_matches(|c| c == '[' || c == ']' || c == '(' || c == ')')
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | ' '))
        .collect();
    for code in CURRENCY_CODES {
        if let Some(stripped) = cleaned.strip_suffix(code) {
            cleaned = stripped.to_string();
        }
    }
    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return Err(invalid());
    }

    let (whole, frac) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned, ""),
    };
    let whole_digits = if whole.is_empty() { "0" } else { whole };
    if !whole_digits.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    let whole_value: Amount = whole_digits.parse().map_err(|_| invalid())?;

    match unit {
        MoneyUnit::Chips => {
            if frac.chars().any(|c| c != '0') {
                return Err(invalid());
            }
            Ok(whole_value)
        }
        MoneyUnit::Cents => {
            let significant = frac.trim_end_matches('0');
            if significant.len() > 2 {
                return Err(invalid());
            }
            let cents = match significant.len() {
                0 => 0,
                1 => significant.parse::<Amount>().map_err(|_| invalid())? * 10,
                _ => significant.parse::<Amount>().map_err(|_| invalid())?,
            };
            whole_value
                .checked_mul(100)
                .and_then(|v| v.checked_add(cents))
                .ok_or_else(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_amounts_are_exact_cents() {
        assert_eq!(parse_amount("$0.02", MoneyUnit::Cents), Ok(2));
        assert_eq!(parse_amount("$1,234.5", MoneyUnit::Cents), Ok(123_450));
        assert_eq!(parse_amount("$20", MoneyUnit::Cents), Ok(2_000));
        assert_eq!(parse_amount("[$0.05 USD]", MoneyUnit::Cents), Ok(5));
        assert_eq!(parse_amount("€.50", MoneyUnit::Cents), Ok(50));
    }

    #[test]
    fn chip_amounts_reject_fractions() {
        assert_eq!(parse_amount("1,500", MoneyUnit::Chips), Ok(1_500));
        assert_eq!(parse_amount("200.00", MoneyUnit::Chips), Ok(200));
        assert!(parse_amount("200.5", MoneyUnit::Chips).is_err());
        assert!(parse_amount("abc", MoneyUnit::Chips).is_err());
        assert!(parse_amount("$", MoneyUnit::Cents).is_err());
    }

    #[test]
    fn formats_by_unit() {
        assert_eq!(MoneyUnit::Cents.format(532), "5.32");
        assert_eq!(MoneyUnit::Cents.format(-5), "-0.05");
        assert_eq!(MoneyUnit::Chips.format(8100), "8100");
        assert!((MoneyUnit::Cents.to_major(250) - 2.5).abs() < f64::EPSILON);
    }
}
