use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The live cards of a 52-card deck once some have been committed to hands
/// or the board.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::without(&[], seed)
    }

    /// A deck holding every card except `dead`. Order is kept until a shuffle.
    pub fn without(dead: &[Card], seed: u64) -> Self {
        let cards = full_deck()
            .into_iter()
            .filter(|c| !dead.contains(c))
            .collect();
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Draws `n` uniformly random cards without reshuffling the whole deck.
    /// Returns fewer when the deck runs short.
    pub fn draw_random(&mut self, n: usize) -> &[Card] {
        let n = n.min(self.cards.len());
        let (picked, _) = self.cards.partial_shuffle(&mut self.rng, n);
        picked
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
