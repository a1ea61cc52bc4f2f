//! Parsing of the human player's typed answers.

use thiserror::Error;
use uno_core::model::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based index into the displayed hand.
    Play(usize),
    Draw,
    ToggleDebug,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("card number {given} is not in a hand of {hand_len}")]
    InvalidHandIndex { given: usize, hand_len: usize },
    #[error("unrecognised command '{0}'")]
    InvalidCommand(String),
    #[error("'{0}' is not one of Red, Blue, Green or Yellow")]
    InvalidColorChoice(String),
}

/// Parses a move prompt answer. Card numbers are 1-based as displayed.
pub fn parse_command(line: &str, hand_len: usize) -> Result<Command, InputError> {
    let answer = line.trim().to_ascii_lowercase();
    match answer.as_str() {
        "d" | "draw" => return Ok(Command::Draw),
        "debug" => return Ok(Command::ToggleDebug),
        _ => {}
    }
    let number: usize = answer
        .parse()
        .map_err(|_| InputError::InvalidCommand(line.trim().to_string()))?;
    if number == 0 || number > hand_len {
        return Err(InputError::InvalidHandIndex {
            given: number,
            hand_len,
        });
    }
    Ok(Command::Play(number - 1))
}

pub fn parse_color(line: &str) -> Result<Color, InputError> {
    line.trim()
        .parse()
        .map_err(|_| InputError::InvalidColorChoice(line.trim().to_string()))
}

/// Only an explicit `y`/`yes` counts as agreement.
pub fn parse_yes_no(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
