//! Legality and special-card effects.
//!
//! Both functions are pure: [`resolve_effect`] only describes the draw
//! penalty, the orchestrator applies it to the players.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat `steps` places away from `from`, wrapping around the table.
    pub fn advance(self, from: usize, steps: usize, player_count: usize) -> usize {
        if player_count == 0 {
            return 0;
        }
        let offset = self.step() * steps as isize;
        (from as isize + offset).rem_euclid(player_count as isize) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("{card} cannot be played on {top}")]
    IllegalPlay { card: Card, top: Card },
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(Card),
}

/// Wilds always match; otherwise colour or rank must match the top card.
pub fn is_legal_play(card: Card, top: Card) -> bool {
    if card.is_wild() {
        return true;
    }
    card.current_color() == top.current_color() || card.rank() == top.rank()
}

pub fn check_play(card: Card, top: Card) -> Result<(), PlayError> {
    if is_legal_play(card, top) {
        Ok(())
    } else {
        Err(PlayError::IllegalPlay { card, top })
    }
}

/// Cards in `hand` that may be played on `top`, in hand order.
pub fn legal_cards(hand: &Hand, top: Card) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&card| is_legal_play(card, top))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPenalty {
    pub target: usize,
    pub cards: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub next: usize,
    pub direction: Direction,
    pub skipped: Option<usize>,
    pub penalty: Option<DrawPenalty>,
}

impl Effect {
    pub fn reversed(&self, before: Direction) -> bool {
        self.direction != before
    }
}

/// Next seat and direction after `rank` is played from `current`.
pub fn resolve_effect(
    rank: Rank,
    current: usize,
    direction: Direction,
    player_count: usize,
) -> Effect {
    let following = direction.advance(current, 1, player_count);
    match rank {
        Rank::Reverse => {
            let direction = direction.reversed();
            Effect {
                next: direction.advance(current, 1, player_count),
                direction,
                skipped: None,
                penalty: None,
            }
        }
        Rank::Skip => Effect {
            next: direction.advance(current, 2, player_count),
            direction,
            skipped: Some(following),
            penalty: None,
        },
        Rank::DrawTwo | Rank::WildDrawFour => Effect {
            next: direction.advance(current, 2, player_count),
            direction,
            skipped: Some(following),
            penalty: rank.draw_penalty().map(|cards| DrawPenalty {
                target: following,
                cards,
            }),
        },
        _ => Effect {
            next: following,
            direction,
            skipped: None,
            penalty: None,
        },
    }
}
