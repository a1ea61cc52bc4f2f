//! Turn state machine.
//!
//! One call to [`Orchestrator::play_turn`] walks a seat through
//! awaiting-move, effect resolution, the win check and turn advance, and
//! reports what happened as a [`TurnReport`].

use crate::game::agent::{AgentError, Move, TurnAgent, TurnContext};
use crate::game::event::{GameEvent, GamePhase, TurnReport, TurnResult};
use crate::game::rules::{self, PlayError};
use crate::game::state::{GameState, SetupError};
use crate::game::view::TableView;
use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::deck::DrawError;
use crate::model::player::{HandError, Player};
use rand::RngCore;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{Level, event};

/// Cards taken for failing to call UNO.
pub const UNO_PENALTY: usize = 2;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("the game is already over (seat {winner} won)")]
    GameOver { winner: usize },
    #[error("expected {expected} agents, got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },
    #[error("the discard pile is empty")]
    EmptyDiscard,
    #[error("seat {0} has no player")]
    SeatOutOfRange(usize),
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl From<HandError> for TurnError {
    fn from(err: HandError) -> Self {
        match err {
            HandError::CardNotInHand(card) => TurnError::Play(PlayError::CardNotInHand(card)),
        }
    }
}

pub struct Orchestrator<R: RngCore = StdRng> {
    state: GameState,
    rng: R,
    turns: u64,
}

impl<R: RngCore> Orchestrator<R> {
    /// Deals a new game for `players` using `rng` for every random decision.
    pub fn new(players: Vec<Player>, mut rng: R) -> Result<Self, SetupError> {
        let state = GameState::deal(players, &mut rng)?;
        event!(
            target: "uno_core::turn",
            Level::INFO,
            starting_seat = state.current(),
            top = %state.top_card().map(|c| c.to_string()).unwrap_or_default(),
            deck = state.deck().len(),
            "game dealt"
        );
        Ok(Self::from_state(state, rng))
    }

    pub fn from_state(state: GameState, rng: R) -> Self {
        Self {
            state,
            rng,
            turns: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> TableView {
        TableView::capture(&self.state)
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn play_turn(
        &mut self,
        agents: &mut [Box<dyn TurnAgent>],
    ) -> Result<TurnReport, TurnError> {
        let seat = match self.state.phase() {
            GamePhase::AwaitingMove { seat } => seat,
            GamePhase::GameOver { winner } => return Err(TurnError::GameOver { winner }),
        };
        if agents.len() != self.state.player_count() {
            return Err(TurnError::AgentCountMismatch {
                expected: self.state.player_count(),
                actual: agents.len(),
            });
        }
        let top = self.state.top_card().ok_or(TurnError::EmptyDiscard)?;
        self.player(seat)?;
        let agent = agents[seat].as_mut();

        let chosen = {
            let ctx = TurnContext::new(&self.state, seat, top);
            agent.choose_move(&ctx, &mut self.rng)?
        };

        let result = match chosen {
            Move::Play { card, wild_color } => {
                if !self.player(seat)?.hand().contains(card) {
                    return Err(PlayError::CardNotInHand(card).into());
                }
                rules::check_play(card, top)?;
                self.take_from_hand(seat, card)?;
                let placed = self.resolve_color(agent, seat, top, card, wild_color)?;
                TurnResult::Played(placed)
            }
            Move::Draw => self.draw_step(agent, seat, top)?,
        };

        self.turns += 1;
        let Some(card) = result.played_card() else {
            let next = self
                .state
                .direction()
                .advance(seat, 1, self.state.player_count());
            self.state.set_turn(next, self.state.direction());
            return Ok(self.report(seat, result));
        };

        self.state.discard_card(card);
        self.state.record(GameEvent::Played {
            seat,
            card,
            from_draw: matches!(result, TurnResult::DrewAndPlayed(_)),
        });
        if let Some(color) = card.current_color().filter(|_| card.is_wild()) {
            self.state.record(GameEvent::ColorChosen { seat, color });
        }

        let remaining = self.player(seat)?.hand().len();
        if remaining == 1 {
            let called = {
                let ctx = TurnContext::new(&self.state, seat, card);
                agent.call_uno(&ctx)?
            };
            if called {
                self.state.record(GameEvent::UnoCalled { seat });
            } else {
                let drawn = self.state.give_cards(seat, UNO_PENALTY, &mut self.rng);
                self.state.record(GameEvent::UnoPenalty { seat, drawn });
            }
        }

        if remaining == 0 {
            self.state.finish(seat);
            self.state.record(GameEvent::Won { seat });
            event!(
                target: "uno_core::turn",
                Level::INFO,
                seat,
                turns = self.turns,
                "game won"
            );
            return Ok(self.report(seat, result));
        }

        let direction = self.state.direction();
        let effect =
            rules::resolve_effect(card.rank(), seat, direction, self.state.player_count());
        if effect.reversed(direction) {
            self.state.record(GameEvent::DirectionReversed);
        }
        if let Some(penalty) = effect.penalty {
            let drawn = self
                .state
                .give_cards(penalty.target, penalty.cards, &mut self.rng);
            self.state.record(GameEvent::DrawPenalty {
                seat: penalty.target,
                cards: penalty.cards,
                drawn,
            });
        } else if let Some(skipped) = effect.skipped {
            self.state.record(GameEvent::Skipped { seat: skipped });
        }
        self.state.set_turn(effect.next, effect.direction);
        Ok(self.report(seat, result))
    }

    fn player(&self, seat: usize) -> Result<&Player, TurnError> {
        self.state.player(seat).ok_or(TurnError::SeatOutOfRange(seat))
    }

    fn take_from_hand(&mut self, seat: usize, card: Card) -> Result<Card, TurnError> {
        let player = self
            .state
            .player_mut(seat)
            .ok_or(TurnError::SeatOutOfRange(seat))?;
        Ok(player.play(card)?)
    }

    fn draw_step(
        &mut self,
        agent: &mut dyn TurnAgent,
        seat: usize,
        top: Card,
    ) -> Result<TurnResult, TurnError> {
        let card = match self.state.draw_card(&mut self.rng) {
            Ok(card) => card,
            Err(DrawError::EmptySource) => {
                self.state.record(GameEvent::DrawFailed { seat });
                return Ok(TurnResult::NoOp);
            }
        };
        if let Some(player) = self.state.player_mut(seat) {
            player.hand_mut().add(card);
        }
        let playable = rules::is_legal_play(card, top);
        self.state.record(GameEvent::Drew {
            seat,
            card,
            playable,
        });
        if !playable {
            return Ok(TurnResult::Drew);
        }

        let accepted = {
            let ctx = TurnContext::new(&self.state, seat, top);
            agent.play_drawn(&ctx, card)?
        };
        if !accepted {
            return Ok(TurnResult::Drew);
        }
        self.take_from_hand(seat, card)?;
        let placed = self.resolve_color(agent, seat, top, card, None)?;
        Ok(TurnResult::DrewAndPlayed(placed))
    }

    fn resolve_color(
        &mut self,
        agent: &mut dyn TurnAgent,
        seat: usize,
        top: Card,
        card: Card,
        preselected: Option<Color>,
    ) -> Result<Card, TurnError> {
        if !card.is_wild() {
            return Ok(card);
        }
        let color = match preselected {
            Some(color) => color,
            None => {
                let ctx = TurnContext::new(&self.state, seat, top);
                agent.choose_color(&ctx)?
            }
        };
        Ok(card.with_color(color))
    }

    fn report(&mut self, seat: usize, result: TurnResult) -> TurnReport {
        let events = self.state.drain_events();
        event!(
            target: "uno_core::turn",
            Level::DEBUG,
            seat,
            turn = self.turns,
            result = ?result,
            events = events.len(),
            hand_sizes = ?self.state.hand_sizes(),
        );
        TurnReport {
            seat,
            result,
            events,
            phase: self.state.phase(),
        }
    }
}
