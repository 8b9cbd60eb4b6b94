//! Draw and discard piles for the four card decks. Shuffling is driven by
//! a caller-supplied RNG so the whole game stays replayable from a seed.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::data::{BIG_DEALS, DOODADS, MARKET_CARDS, SMALL_DEALS};
use crate::card::{DealCard, DoodadCard, MarketCard};

/// A face-down draw pile with its discard pile. Cards are drawn from the
/// back of `draw`; when it runs dry the discards are shuffled back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck<T> {
    draw: Vec<T>,
    discard: Vec<T>,
}

impl<T: Clone> Deck<T> {
    pub fn new(cards: &[T], rng: &mut impl Rng) -> Self {
        let mut draw = cards.to_vec();
        draw.shuffle(rng);
        Deck {
            draw,
            discard: Vec::new(),
        }
    }

    /// Draws the top card, reshuffling the discard pile first if the draw
    /// pile is empty. Returns `None` only when both piles are empty.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<T> {
        if self.draw.is_empty() && !self.discard.is_empty() {
            self.draw.append(&mut self.discard);
            self.draw.shuffle(rng);
        }
        self.draw.pop()
    }

    pub fn discard(&mut self, card: T) {
        self.discard.push(card);
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn discarded(&self) -> usize {
        self.discard.len()
    }
}

/// All four decks of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSet {
    pub small_deals: Deck<DealCard>,
    pub big_deals: Deck<DealCard>,
    pub market: Deck<MarketCard>,
    pub doodads: Deck<DoodadCard>,
}

impl DeckSet {
    pub fn new(rng: &mut impl Rng) -> Self {
        DeckSet {
            small_deals: Deck::new(&SMALL_DEALS, rng),
            big_deals: Deck::new(&BIG_DEALS, rng),
            market: Deck::new(&MARKET_CARDS, rng),
            doodads: Deck::new(&DOODADS, rng),
        }
    }
}
