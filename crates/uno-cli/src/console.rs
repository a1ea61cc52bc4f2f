use crate::input::{Command, parse_color, parse_command, parse_yes_no};
use crate::render::{Board, CLEAR_SCREEN};
use rand::RngCore;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use uno_core::game::agent::{AgentError, Move, TurnAgent, TurnContext};
use uno_core::game::rules;
use uno_core::game::view::TableView;
use uno_core::model::card::Card;
use uno_core::model::color::Color;

pub const MOVE_PROMPT: &str =
    "Choose a card to play (number), 'd' to draw, or 'debug' to toggle debug mode: ";
pub const PLAY_DRAWN_PROMPT: &str = "Do you want to play this card? (y/n): ";
pub const COLOR_PROMPT: &str = "Choose a color (Red/Blue/Green/Yellow): ";
pub const UNO_PROMPT: &str = "Do you want to call UNO? (y/n): ";
pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub debug: bool,
    pub pause: bool,
    pub clear_screen: bool,
}

/// Terminal shared by the session loop and the human seat.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    settings: ConsoleSettings,
}

pub type SharedConsole = Rc<RefCell<Console>>;

impl Console {
    pub fn new(
        input: impl BufRead + 'static,
        output: impl Write + 'static,
        settings: ConsoleSettings,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            settings,
        }
    }

    pub fn stdio(settings: ConsoleSettings) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), settings)
    }

    pub fn into_shared(self) -> SharedConsole {
        Rc::new(RefCell::new(self))
    }

    pub fn debug(&self) -> bool {
        self.settings.debug
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.settings.debug = !self.settings.debug;
        self.settings.debug
    }

    pub fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints `question` and returns the next line without its terminator.
    pub fn ask(&mut self, question: &str) -> Result<String, AgentError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AgentError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Waits for Enter when pacing is on.
    pub fn pause(&mut self, prompt: &str) -> Result<(), AgentError> {
        if self.settings.pause {
            self.ask(prompt)?;
        }
        Ok(())
    }

    /// Draws the board. In debug mode the extra information stays on screen
    /// until Enter is pressed.
    pub fn show(&mut self, view: &TableView) -> Result<(), AgentError> {
        if self.settings.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        let debug = self.settings.debug;
        write!(self.output, "{}", Board::new(view, debug))?;
        self.output.flush()?;
        if debug {
            writeln!(self.output)?;
            self.pause(CONTINUE_PROMPT)?;
        }
        Ok(())
    }
}

/// The human seat: asks on the console and re-prompts until the answer is
/// usable.
pub struct ConsoleAgent {
    console: SharedConsole,
}

impl ConsoleAgent {
    pub fn new(console: SharedConsole) -> Self {
        Self { console }
    }
}

impl TurnAgent for ConsoleAgent {
    fn choose_move(
        &mut self,
        ctx: &TurnContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError> {
        let mut console = self.console.borrow_mut();
        let hand = ctx.hand();
        loop {
            let answer = console.ask(MOVE_PROMPT)?;
            match parse_command(&answer, hand.len()) {
                Ok(Command::Draw) => return Ok(Move::Draw),
                Ok(Command::ToggleDebug) => {
                    let enabled = console.toggle_debug();
                    console.show(&TableView::capture(ctx.state()))?;
                    console.say(format_args!(
                        "Debug mode {}",
                        if enabled { "enabled" } else { "disabled" }
                    ))?;
                }
                Ok(Command::Play(index)) => match hand.get(index) {
                    Some(card) if rules::is_legal_play(card, ctx.top_card()) => {
                        return Ok(Move::play(card));
                    }
                    _ => console.say("Invalid play. Try again.")?,
                },
                Err(_) => console.say("Invalid input. Try again.")?,
            }
        }
    }

    fn play_drawn(&mut self, _ctx: &TurnContext<'_>, card: Card) -> Result<bool, AgentError> {
        let mut console = self.console.borrow_mut();
        console.say(format_args!("You drew: {card}"))?;
        let accepted = parse_yes_no(&console.ask(PLAY_DRAWN_PROMPT)?);
        if !accepted {
            console.say("You chose not to play the drawn card.")?;
        }
        Ok(accepted)
    }

    fn choose_color(&mut self, _ctx: &TurnContext<'_>) -> Result<Color, AgentError> {
        let mut console = self.console.borrow_mut();
        loop {
            match parse_color(&console.ask(COLOR_PROMPT)?) {
                Ok(color) => return Ok(color),
                Err(err) => console.say(err)?,
            }
        }
    }

    fn call_uno(&mut self, _ctx: &TurnContext<'_>) -> Result<bool, AgentError> {
        let mut console = self.console.borrow_mut();
        Ok(parse_yes_no(&console.ask(UNO_PROMPT)?))
    }
}
