//! Argument checks that run before the engine is called, so a bad card or
//! hand number gets a message naming the argument.

use std::collections::HashSet;

use handscope_engine::cards::{parse_cards, Card};

/// Parses exactly two hole cards.
pub fn parse_hole_cards(flag: &str, text: &str) -> Result<Vec<Card>, String> {
    let cards = parse_cards(text).map_err(|e| format!("--{}: {}", flag, e))?;
    if cards.len() != 2 {
        return Err(format!(
            "--{}: expected 2 cards, got {}",
            flag,
            cards.len()
        ));
    }
    Ok(cards)
}

/// Parses a board of 0, 3, 4 or 5 cards.
pub fn parse_board(text: &str) -> Result<Vec<Card>, String> {
    let cards = parse_cards(text).map_err(|e| format!("--board: {}", e))?;
    if !matches!(cards.len(), 0 | 3 | 4 | 5) {
        return Err(format!(
            "--board: expected 0, 3, 4 or 5 cards, got {}",
            cards.len()
        ));
    }
    Ok(cards)
}

pub fn ensure_distinct(groups: &[&[Card]]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for card in groups.iter().flat_map(|g| g.iter()) {
        if !seen.insert(*card) {
            return Err(format!("card {} is used more than once", card));
        }
    }
    Ok(())
}

/// Converts a 1-based `--hand` into an index into `total` hands.
pub fn hand_index(hand: usize, total: usize) -> Result<usize, String> {
    if hand == 0 || hand > total {
        return Err(format!(
            "--hand {} is out of range (input holds {} hand(s))",
            hand, total
        ));
    }
    Ok(hand - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_cards_need_two() {
        assert_eq!(parse_hole_cards("hero", "AhKs").unwrap().len(), 2);
        let err = parse_hole_cards("hero", "AhKsQd").unwrap_err();
        assert!(err.contains("expected 2 cards, got 3"));
        assert!(parse_hole_cards("villain", "Zz9c").unwrap_err().starts_with("--villain"));
    }

    #[test]
    fn boards_come_in_street_sizes() {
        assert!(parse_board("").unwrap().is_empty());
        assert_eq!(parse_board("9c 2d 3h 4s").unwrap().len(), 4);
        assert!(parse_board("9c 2d").is_err());
    }

    #[test]
    fn duplicates_are_named() {
        let hero = parse_hole_cards("hero", "AhKs").unwrap();
        let board = parse_board("Ah 2d 3c").unwrap();
        let err = ensure_distinct(&[&hero, &board]).unwrap_err();
        assert_eq!(err, "card Ah is used more than once");
    }

    #[test]
    fn hand_numbers_are_one_based() {
        assert_eq!(hand_index(1, 3), Ok(0));
        assert_eq!(hand_index(3, 3), Ok(2));
        assert!(hand_index(0, 3).is_err());
        assert!(hand_index(4, 3).is_err());
    }
}
