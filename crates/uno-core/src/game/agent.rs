use crate::game::rules::{self, Direction};
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::hand::Hand;
use crate::model::player::{Player, progress_from_sizes};
use rand::RngCore;
use thiserror::Error;

/// A move chosen by an agent at the start of its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Play `card` from the hand. `wild_color` pre-selects the colour for a
    /// wild; when absent the orchestrator asks [`TurnAgent::choose_color`].
    Play {
        card: Card,
        wild_color: Option<Color>,
    },
    Draw,
}

impl Move {
    pub const fn play(card: Card) -> Self {
        Move::Play {
            card,
            wild_color: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("input closed before a decision was made")]
    InputClosed,
    #[error("i/o failure while asking for a decision: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only view of the table handed to an agent.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    seat: usize,
    top: Card,
    state: &'a GameState,
}

impl<'a> TurnContext<'a> {
    pub fn new(state: &'a GameState, seat: usize, top: Card) -> Self {
        Self { seat, top, state }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn top_card(&self) -> Card {
        self.top
    }

    pub fn state(&self) -> &'a GameState {
        self.state
    }

    pub fn player(&self) -> Option<&'a Player> {
        self.state.player(self.seat)
    }

    pub fn hand(&self) -> &'a Hand {
        static EMPTY: Hand = Hand::EMPTY;
        self.player().map(Player::hand).unwrap_or(&EMPTY)
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.state.hand_sizes()
    }

    pub fn progress(&self) -> f64 {
        progress_from_sizes(&self.hand_sizes())
    }

    pub fn legal_cards(&self) -> Vec<Card> {
        rules::legal_cards(self.hand(), self.top)
    }
}

/// Source of decisions for one seat. Computer and human players both sit
/// behind this trait.
pub trait TurnAgent {
    fn choose_move(
        &mut self,
        ctx: &TurnContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError>;

    /// Asked only when the card just drawn is legal.
    fn play_drawn(&mut self, ctx: &TurnContext<'_>, card: Card) -> Result<bool, AgentError>;

    /// Colour for a wild that was played without one.
    fn choose_color(&mut self, ctx: &TurnContext<'_>) -> Result<Color, AgentError>;

    /// Asked when the hand is down to a single card.
    fn call_uno(&mut self, ctx: &TurnContext<'_>) -> Result<bool, AgentError>;
}
