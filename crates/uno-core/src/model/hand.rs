use crate::model::card::Card;
use crate::model::color::Color;
use std::cmp::Ordering;
use std::vec::Vec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const EMPTY: Hand = Hand { cards: Vec::new() };

    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card.reset());
        self.sort();
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards.into_iter().map(Card::reset));
        self.sort();
    }

    /// Removes one instance of `card`.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.cards
            .iter()
            .filter(|card| card.current_color() == Some(color))
            .count()
    }

    /// Stable sort: colored cards by colour name then rank index, wilds last.
    pub fn sort(&mut self) {
        self.cards.sort_by(display_order);
    }
}

fn display_order(a: &Card, b: &Card) -> Ordering {
    a.is_wild()
        .cmp(&b.is_wild())
        .then_with(|| {
            let name_a = a.current_color().map(Color::name).unwrap_or("");
            let name_b = b.current_color().map(Color::name).unwrap_or("");
            name_a.cmp(name_b)
        })
        .then_with(|| a.rank().index().cmp(&b.rank().index()))
}
