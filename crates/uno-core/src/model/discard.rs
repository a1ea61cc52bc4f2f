use crate::model::card::Card;
use crate::model::deck::{Deck, DrawError};
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Starts a pile from the deck. Wild cards are put back and the deck is
    /// reshuffled until a colored card turns up.
    pub fn seeded_from<R: Rng + ?Sized>(deck: &mut Deck, rng: &mut R) -> Result<Self, DrawError> {
        if !deck.cards().iter().any(|card| !card.is_wild()) {
            return Err(DrawError::EmptySource);
        }
        loop {
            let card = deck.pop().ok_or(DrawError::EmptySource)?;
            if !card.is_wild() {
                return Ok(Self { cards: vec![card] });
            }
            deck.push(card);
            deck.shuffle_in_place(rng);
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Removes everything below the top card. `None` when there is nothing to
    /// recycle.
    pub fn take_all_but_top(&mut self) -> Option<Vec<Card>> {
        if self.cards.len() <= 1 {
            return None;
        }
        let top = self.cards.pop()?;
        let rest = std::mem::replace(&mut self.cards, vec![top]);
        Some(rest)
    }
}
