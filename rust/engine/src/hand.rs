use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    fn from_u32(v: u32) -> Category {
        match v {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::ThreeOfAKind,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOfAKind,
            _ => Category::StraightFlush,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Decodes a score produced by [`score_five`].
    pub fn from_score(score: u32) -> Self {
        let mut kickers = [0u8; 5];
        for (i, k) in kickers.iter_mut().enumerate() {
            *k = ((score >> (16 - 4 * i as u32)) & 0xF) as u8;
        }
        Self {
            category: Category::from_u32(score >> CATEGORY_SHIFT),
            kickers,
        }
    }
}

// Each kicker takes one nibble (ranks top out at 14), the category sits above them.
const CATEGORY_SHIFT: u32 = 20;

/// Scores a 5-card hand as a single integer; a higher score is a better hand.
///
/// The wheel (A-2-3-4-5) scores as a five-high straight.
pub fn score_five(cards: &[Card; 5]) -> u32 {
    let mut rank_counts = [0u8; 15];
    for c in cards {
        rank_counts[c.rank as usize] += 1;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // (count, rank) groups, biggest group first then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let straight_high = if groups.len() == 5 {
        let high = groups[0].1;
        let low = groups[4].1;
        if high - low == 4 {
            Some(high)
        } else if high == 14 && groups[1].1 == 5 {
            Some(5)
        } else {
            None
        }
    } else {
        None
    };

    let mut kickers = [0u8; 5];
    let category = match (straight_high, flush) {
        (Some(high), true) => {
            kickers[0] = high;
            Category::StraightFlush
        }
        (Some(high), false) => {
            kickers[0] = high;
            Category::Straight
        }
        _ => {
            for (k, (_, r)) in kickers.iter_mut().zip(&groups) {
                *k = *r;
            }
            match (groups[0].0, groups.get(1).map(|g| g.0)) {
                (4, _) => Category::FourOfAKind,
                (3, Some(2)) => Category::FullHouse,
                _ if flush => Category::Flush,
                (3, _) => Category::ThreeOfAKind,
                (2, Some(2)) => Category::TwoPair,
                (2, _) => Category::OnePair,
                _ => Category::HighCard,
            }
        }
    };

    let mut score = (category as u32) << CATEGORY_SHIFT;
    for (i, &k) in kickers.iter().enumerate() {
        score |= (k as u32) << (16 - 4 * i as u32);
    }
    score
}

/// Best 5-card score among all 21 five-card subsets of seven cards.
pub fn best_of_seven(cards: &[Card; 7]) -> u32 {
    let mut best = 0;
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut five = [cards[0]; 5];
            let mut n = 0;
            for (i, c) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[n] = *c;
                    n += 1;
                }
            }
            best = best.max(score_five(&five));
        }
    }
    best
}

pub fn evaluate_hand(cards: &[Card; 7]) -> HandStrength {
    HandStrength::from_score(best_of_seven(cards))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}
