use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::discard::DiscardPile;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{Level, event};

pub const STANDARD_DECK_SIZE: usize = 108;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("no card left in the deck or the discard pile")]
    EmptySource,
}

/// Draw stock. The end of the vector is the top of the deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    reshuffles: usize,
    recycled: usize,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for color in Color::ALL.iter().copied() {
            for rank in Rank::COLORED.iter().copied() {
                for _ in 0..rank.copies() {
                    cards.push(Card::new(color, rank));
                }
            }
        }
        for rank in Rank::WILD.iter().copied() {
            for _ in 0..rank.copies() {
                cards.push(Card::wild(rank));
            }
        }
        Self {
            cards,
            reshuffles: 0,
            recycled: 0,
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            reshuffles: 0,
            recycled: 0,
        }
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn peek(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn reshuffles(&self) -> usize {
        self.reshuffles
    }

    /// Total cards moved back from the discard pile over the deck's life.
    pub fn recycled(&self) -> usize {
        self.recycled
    }

    /// Pops the top card without touching the discard pile.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop().map(Card::reset)
    }

    /// Puts a card back on top of the deck.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card.reset());
    }

    /// Draws the top card, refilling from the discard pile when empty.
    pub fn draw<R: rand::Rng + ?Sized>(
        &mut self,
        discard: &mut DiscardPile,
        rng: &mut R,
    ) -> Result<Card, DrawError> {
        if self.cards.is_empty() {
            self.refill_from(discard, rng)?;
        }
        self.pop().ok_or(DrawError::EmptySource)
    }

    /// Moves all but the discard pile's top card into the deck and shuffles.
    /// Fails without side effects when the pile holds one card or fewer.
    pub fn refill_from<R: rand::Rng + ?Sized>(
        &mut self,
        discard: &mut DiscardPile,
        rng: &mut R,
    ) -> Result<usize, DrawError> {
        let recycled = discard.take_all_but_top().ok_or(DrawError::EmptySource)?;
        let count = recycled.len();
        self.cards.extend(recycled.into_iter().map(Card::reset));
        self.shuffle_in_place(rng);
        self.reshuffles += 1;
        self.recycled += count;
        event!(
            target: "uno_core::deck",
            Level::INFO,
            recycled = count,
            reshuffles = self.reshuffles,
            "discard pile reshuffled into deck"
        );
        Ok(count)
    }
}
