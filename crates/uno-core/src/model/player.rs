use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::discard::DiscardPile;
use crate::model::hand::Hand;
use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STARTING_HAND_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Computer(Difficulty),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(Card),
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hand: Hand::new(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn computer(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::new(name, PlayerKind::Computer(difficulty))
    }

    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = hand;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.kind {
            PlayerKind::Computer(difficulty) => Some(difficulty),
            PlayerKind::Human => None,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Draws up to `count` cards. Failed draws are skipped; returns how many
    /// cards actually arrived.
    pub fn draw_n<R: Rng + ?Sized>(
        &mut self,
        deck: &mut Deck,
        discard: &mut DiscardPile,
        rng: &mut R,
        count: usize,
    ) -> usize {
        let drawn: Vec<Card> = (0..count)
            .filter_map(|_| deck.draw(discard, rng).ok())
            .collect();
        let received = drawn.len();
        self.hand.extend(drawn);
        received
    }

    pub fn play(&mut self, card: Card) -> Result<Card, HandError> {
        if self.hand.remove(card) {
            Ok(card)
        } else {
            Err(HandError::CardNotInHand(card))
        }
    }

    /// `1 - cards_in_all_hands / (players * 7)`. Not clamped: extra draws can
    /// push it below zero.
    pub fn estimate_progress(&self, players: &[Player]) -> f64 {
        let sizes: Vec<usize> = players.iter().map(|p| p.hand.len()).collect();
        progress_from_sizes(&sizes)
    }
}

pub fn progress_from_sizes(hand_sizes: &[usize]) -> f64 {
    if hand_sizes.is_empty() {
        return 0.0;
    }
    let total: usize = hand_sizes.iter().sum();
    1.0 - total as f64 / (hand_sizes.len() * STARTING_HAND_SIZE) as f64
}
