use crate::model::card::Card;
use crate::model::color::Color;
use serde::Serialize;

/// Something that happened during a turn, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Played {
        seat: usize,
        card: Card,
        from_draw: bool,
    },
    Drew {
        seat: usize,
        card: Card,
        playable: bool,
    },
    DrawFailed {
        seat: usize,
    },
    ColorChosen {
        seat: usize,
        color: Color,
    },
    UnoCalled {
        seat: usize,
    },
    UnoPenalty {
        seat: usize,
        drawn: usize,
    },
    DirectionReversed,
    Skipped {
        seat: usize,
    },
    DrawPenalty {
        seat: usize,
        cards: usize,
        drawn: usize,
    },
    Reshuffled {
        recycled: usize,
    },
    Won {
        seat: usize,
    },
}

/// Outcome of the move step of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "card", rename_all = "snake_case")]
pub enum TurnResult {
    /// A card from the hand was discarded (wilds carry their chosen colour).
    Played(Card),
    /// A card was drawn and kept.
    Drew,
    /// A card was drawn and immediately played.
    DrewAndPlayed(Card),
    /// A draw was requested but no card was available.
    NoOp,
}

impl TurnResult {
    pub fn played_card(self) -> Option<Card> {
        match self {
            TurnResult::Played(card) | TurnResult::DrewAndPlayed(card) => Some(card),
            TurnResult::Drew | TurnResult::NoOp => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GamePhase {
    AwaitingMove { seat: usize },
    GameOver { winner: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub seat: usize,
    pub result: TurnResult,
    pub events: Vec<GameEvent>,
    pub phase: GamePhase,
}

impl TurnReport {
    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            GamePhase::AwaitingMove { .. } => None,
        }
    }
}
