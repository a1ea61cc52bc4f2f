use crate::game::event::GamePhase;
use crate::game::rules::Direction;
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::player::PlayerKind;
use serde::Serialize;

/// Read-only snapshot of the table for renderers and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub seats: Vec<SeatView>,
    pub current: usize,
    pub direction: Direction,
    pub phase: GamePhase,
    pub top_card: Option<Card>,
    pub deck_len: usize,
    pub deck_top: Option<Card>,
    pub discard_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Vec<Card>,
}

impl SeatView {
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }
}

impl TableView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            seats: state
                .players()
                .iter()
                .map(|player| SeatView {
                    name: player.name().to_string(),
                    kind: player.kind(),
                    hand: player.hand().cards().to_vec(),
                })
                .collect(),
            current: state.current(),
            direction: state.direction(),
            phase: state.phase(),
            top_card: state.top_card(),
            deck_len: state.deck().len(),
            deck_top: state.deck().peek(),
            discard_len: state.discard().len(),
        }
    }

    pub fn seat_name(&self, seat: usize) -> &str {
        self.seats.get(seat).map(|s| s.name.as_str()).unwrap_or("?")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
