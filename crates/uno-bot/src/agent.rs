use crate::policy::{Decision, Policy, TieredPolicy, majority_color};
use rand::RngCore;
use uno_core::game::agent::{AgentError, Move, TurnAgent, TurnContext};
use uno_core::model::card::Card;
use uno_core::model::color::Color;
use uno_core::model::player::Difficulty;

/// Seat driven by a [`Policy`]. Always plays a legal drawn card, always calls
/// UNO and picks the colour it holds most of.
pub struct ComputerAgent<P: Policy = TieredPolicy> {
    policy: P,
}

impl ComputerAgent<TieredPolicy> {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(TieredPolicy::new(difficulty))
    }
}

impl<P: Policy> ComputerAgent<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: Policy> TurnAgent for ComputerAgent<P> {
    fn choose_move(
        &mut self,
        ctx: &TurnContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError> {
        Ok(match self.policy.decide(ctx, rng) {
            Decision::Play { card, wild_color } => Move::Play { card, wild_color },
            Decision::Draw => Move::Draw,
        })
    }

    fn play_drawn(&mut self, _ctx: &TurnContext<'_>, _card: Card) -> Result<bool, AgentError> {
        Ok(true)
    }

    fn choose_color(&mut self, ctx: &TurnContext<'_>) -> Result<Color, AgentError> {
        Ok(majority_color(ctx.hand()))
    }

    fn call_uno(&mut self, _ctx: &TurnContext<'_>) -> Result<bool, AgentError> {
        Ok(true)
    }
}
