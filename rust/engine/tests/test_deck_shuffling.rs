use std::collections::HashSet;

use handscope_engine::cards::{parse_cards, Card};
use handscope_engine::deck::Deck;

#[test]
fn fresh_deck_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.deal_card().is_none(), "after 52 cards, deck should be empty");
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_ne!(a, b, "different seeds should produce different orders (high probability)");
}

#[test]
fn random_draws_never_touch_dead_cards() {
    let dead = parse_cards("Ah Ks Qd Qc 2h 7h Tc").unwrap();
    let mut deck = Deck::without(&dead, 99);
    assert_eq!(deck.remaining(), 45);
    for _ in 0..200 {
        let drawn = deck.draw_random(2).to_vec();
        assert_eq!(drawn.len(), 2);
        assert_ne!(drawn[0], drawn[1]);
        assert!(drawn.iter().all(|c| !dead.contains(c)));
    }
}

#[test]
fn short_deck_draws_what_is_left() {
    let all = handscope_engine::cards::full_deck();
    let mut deck = Deck::without(&all[..50], 3);
    assert_eq!(deck.draw_random(5).len(), 2);
}
