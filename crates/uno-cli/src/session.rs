//! Interactive loop: draw the board, play a turn, narrate what happened.

use crate::console::{CONTINUE_PROMPT, SharedConsole};
use anyhow::Result;
use rand::RngCore;
use tracing::{Level, event};
use uno_core::game::agent::{AgentError, TurnAgent};
use uno_core::game::event::{GameEvent, TurnReport};
use uno_core::game::orchestrator::{Orchestrator, TurnError};
use uno_core::game::view::TableView;

const BEGIN_PROMPT: &str = "Press Enter to begin...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ending {
    Won { seat: usize, name: String },
    TurnLimit,
    InputClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub ending: Ending,
    pub turns: u64,
}

pub struct Session<R: RngCore> {
    game: Orchestrator<R>,
    agents: Vec<Box<dyn TurnAgent>>,
    console: SharedConsole,
    max_turns: Option<u64>,
    interactive_seat: Option<usize>,
}

impl<R: RngCore> Session<R> {
    pub fn new(
        game: Orchestrator<R>,
        agents: Vec<Box<dyn TurnAgent>>,
        console: SharedConsole,
    ) -> Self {
        Self {
            game,
            agents,
            console,
            max_turns: None,
            interactive_seat: None,
        }
    }

    /// Stop without a winner once this many turns have been played.
    pub fn with_max_turns(mut self, max_turns: Option<u64>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Seat whose own prompts already echo draws, so narration skips them.
    pub fn with_interactive_seat(mut self, seat: Option<usize>) -> Self {
        self.interactive_seat = seat;
        self
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        let ending = match self.play() {
            Ok(ending) => ending,
            Err(TurnError::Agent(AgentError::InputClosed)) => Ending::InputClosed,
            Err(err) => return Err(err.into()),
        };
        let turns = self.game.turns();
        match &ending {
            Ending::Won { .. } => {}
            Ending::TurnLimit => self
                .console
                .borrow_mut()
                .say(format_args!("Turn limit reached after {turns} turns without a winner."))?,
            Ending::InputClosed => self.console.borrow_mut().say("\nInput closed; leaving the table.")?,
        }
        self.log_final_board(&ending);
        Ok(SessionOutcome { ending, turns })
    }

    fn play(&mut self) -> Result<Ending, TurnError> {
        let starter = self.game.view().seat_name(self.game.state().current()).to_string();
        {
            let mut console = self.console.borrow_mut();
            console.say(format_args!("{starter} will start the game!")).map_err(AgentError::from)?;
            console.pause(BEGIN_PROMPT)?;
        }

        loop {
            if let Some(limit) = self.max_turns.filter(|&limit| self.game.turns() >= limit) {
                event!(target: "uno_cli::session", Level::WARN, limit, "turn limit reached");
                return Ok(Ending::TurnLimit);
            }

            self.console.borrow_mut().show(&self.game.view())?;
            let report = self.game.play_turn(&mut self.agents)?;
            self.narrate(&report)?;

            if let Some(seat) = report.winner() {
                let view = self.game.view();
                let name = view.seat_name(seat).to_string();
                let mut console = self.console.borrow_mut();
                console.show(&view)?;
                console.say(format_args!("{name} wins!")).map_err(AgentError::from)?;
                return Ok(Ending::Won { seat, name });
            }

            let mut console = self.console.borrow_mut();
            if !console.debug() {
                console.pause(CONTINUE_PROMPT)?;
            }
        }
    }

    fn narrate(&self, report: &TurnReport) -> Result<(), AgentError> {
        let view = self.game.view();
        let interactive = self.interactive_seat == Some(report.seat);
        let mut console = self.console.borrow_mut();
        for event in &report.events {
            for line in describe(event, &view, interactive) {
                console.say(line)?;
            }
        }
        Ok(())
    }

    fn log_final_board(&self, ending: &Ending) {
        match self.game.view().to_json() {
            Ok(board) => event!(
                target: "uno_cli::session",
                Level::INFO,
                ending = ?ending,
                turns = self.game.turns(),
                board = %board,
                "final board"
            ),
            Err(err) => event!(
                target: "uno_cli::session",
                Level::WARN,
                error = %err,
                "failed to serialise final board"
            ),
        }
    }
}

/// Narration lines for one event. `interactive` marks the seat typing at this
/// console, whose draw prompts have already shown the drawn card.
pub fn describe(event: &GameEvent, view: &TableView, interactive: bool) -> Vec<String> {
    let name = |seat: usize| view.seat_name(seat).to_string();
    match *event {
        GameEvent::Played {
            seat,
            card,
            from_draw: true,
        } if !interactive => vec![format!("{} plays the drawn card: {card}", name(seat))],
        GameEvent::Played { seat, card, .. } => vec![format!("{} played {card}", name(seat))],
        GameEvent::Drew { card, playable, .. } if interactive => {
            if playable {
                Vec::new()
            } else {
                vec![
                    format!("You drew: {card}"),
                    "This card cannot be played.".to_string(),
                ]
            }
        }
        GameEvent::Drew { seat, playable, .. } => {
            let mut lines = vec![format!("{} draws a card.", name(seat))];
            if !playable {
                lines.push(format!("{} cannot play the drawn card.", name(seat)));
            }
            lines
        }
        GameEvent::DrawFailed { .. } if interactive => vec!["No cards left to draw.".to_string()],
        GameEvent::DrawFailed { seat } => vec![format!("No cards left for {} to draw.", name(seat))],
        GameEvent::ColorChosen { seat, color } => {
            vec![format!("{} changes the color to {color}", name(seat))]
        }
        GameEvent::UnoCalled { seat } => vec![format!("{} calls UNO!", name(seat))],
        GameEvent::UnoPenalty { seat, drawn } => vec![format!(
            "{} forgot to call UNO! Drawing {drawn} cards as penalty.",
            name(seat)
        )],
        GameEvent::DirectionReversed => vec!["Direction reversed!".to_string()],
        GameEvent::Skipped { seat } => vec![format!("{} is skipped!", name(seat))],
        GameEvent::DrawPenalty { seat, cards, .. } => {
            vec![format!("{} draws {cards} cards and is skipped!", name(seat))]
        }
        GameEvent::Reshuffled { recycled } => vec![format!(
            "The discard pile is shuffled back into the deck ({recycled} cards)."
        )],
        GameEvent::Won { .. } => Vec::new(),
    }
}
