//! ASCII table: seat 2 across the top, seats 1 and 3 as side stacks, the top
//! card in the middle with direction arrows, and the local hand at the bottom.

use std::fmt;
use uno_core::game::rules::Direction;
use uno_core::game::view::TableView;
use uno_core::model::card::Card;
use uno_core::model::color::Color;

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const BOARD_WIDTH: usize = 80;
const CARD_MARGIN: usize = 35;
const CARD_WIDTH: usize = 13;
const SIDE_WIDTH: usize = 5;
const SIDE_GAP: usize = 26;
const ARROW_ROW: usize = 3;
const LOCAL_SEAT: usize = 0;

/// The seven text rows of one card.
pub fn card_rows(card: Card) -> [String; 7] {
    let (code, shade) = match card.current_color() {
        Some(color) => (color.initial(), shade(color)),
        None => ('✧', '✧'),
    };
    let label = card.rank().short_label();
    [
        "┌───────────┐".to_string(),
        format!("│{code} {shade}        │"),
        format!("│{shade}{shade}{shade}        │"),
        format!("│   {label:^5}   │"),
        format!("│        {shade}{shade}{shade}│"),
        format!("│        {shade} {code}│"),
        "└───────────┘".to_string(),
    ]
}

fn shade(color: Color) -> char {
    match color {
        Color::Red => '░',
        Color::Blue => '▒',
        Color::Green => '▓',
        Color::Yellow => ' ',
    }
}

/// Face-down hand seen from across the table, e.g. `[]]]`.
pub fn horizontal_stack(count: usize) -> String {
    match count {
        0 => String::new(),
        n => format!("[{}]", "]".repeat(n - 1)),
    }
}

/// Face-down hand seen from the side: a cap and one row per card.
pub fn vertical_stack(count: usize) -> Vec<String> {
    if count == 0 {
        return vec![String::new()];
    }
    let mut rows = Vec::with_capacity(count + 1);
    rows.push("⎴".to_string());
    rows.extend(std::iter::repeat_n("⎵".to_string(), count));
    rows
}

struct Arrows {
    top: char,
    left: char,
    right: char,
    bottom: char,
}

fn arrows(direction: Direction) -> Arrows {
    match direction {
        Direction::Clockwise => Arrows {
            top: '→',
            left: '↑',
            right: '↓',
            bottom: '←',
        },
        Direction::CounterClockwise => Arrows {
            top: '←',
            left: '↓',
            right: '↑',
            bottom: '→',
        },
    }
}

/// Renders a [`TableView`]; `debug` adds every computer hand and the deck top.
pub struct Board<'a> {
    view: &'a TableView,
    debug: bool,
}

impl<'a> Board<'a> {
    pub fn new(view: &'a TableView, debug: bool) -> Self {
        Self { view, debug }
    }

    fn card_count(&self, seat: usize) -> usize {
        self.view.seats.get(seat).map_or(0, |s| s.card_count())
    }

    fn write_middle(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrows = arrows(self.view.direction);
        let mut left = vertical_stack(self.card_count(1));
        let mut right = vertical_stack(self.card_count(3));
        let mut card: Vec<String> = match self.view.top_card {
            Some(top) => card_rows(top).into_iter().collect(),
            None => Vec::new(),
        };
        let height = left.len().max(right.len()).max(card.len());
        left.resize(height, String::new());
        right.resize(height, String::new());
        card.resize(height, " ".repeat(CARD_WIDTH));

        let pad = " ".repeat(CARD_MARGIN);
        writeln!(f, "{pad}{:^CARD_WIDTH$}", arrows.top)?;
        for row in 0..height {
            let (l, r) = if row == ARROW_ROW {
                (arrows.left, arrows.right)
            } else {
                (' ', ' ')
            };
            writeln!(
                f,
                "{:<SIDE_WIDTH$}{}{l} {} {r}{}{}",
                left[row],
                " ".repeat(CARD_MARGIN - SIDE_WIDTH),
                card[row],
                " ".repeat(SIDE_GAP),
                right[row],
            )?;
        }
        writeln!(f, "{pad}{:^CARD_WIDTH$}", arrows.bottom)
    }

    fn write_hand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(seat) = self.view.seats.get(LOCAL_SEAT) else {
            return Ok(());
        };
        writeln!(f, "{:^BOARD_WIDTH$}", seat.name)?;
        writeln!(f, "Your hand:")?;
        let rows: Vec<[String; 7]> = seat.hand.iter().copied().map(card_rows).collect();
        for line in 0..7 {
            let joined: String = rows.iter().map(|r| r[line].as_str()).collect();
            writeln!(f, "{joined}")?;
        }
        for index in 1..=rows.len() {
            write!(f, "{index:^CARD_WIDTH$}")?;
        }
        writeln!(f)
    }

    fn write_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "DEBUG INFO:")?;
        for (seat, view) in self.view.seats.iter().enumerate() {
            if seat == LOCAL_SEAT {
                continue;
            }
            let cards: Vec<String> = view.hand.iter().map(Card::to_string).collect();
            writeln!(f, "{}: {}", view.name, cards.join(", "))?;
        }
        writeln!(f, "Cards left in deck: {}", self.view.deck_len)?;
        if let Some(top) = self.view.deck_top {
            writeln!(f, "Top card of deck: {top}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:^BOARD_WIDTH$}", self.view.seat_name(2))?;
        writeln!(
            f,
            "{}{:^11}",
            " ".repeat(CARD_MARGIN),
            horizontal_stack(self.card_count(2))
        )?;
        writeln!(f)?;
        self.write_middle(f)?;
        writeln!(
            f,
            "{:<20}{}{:>20}",
            self.view.seat_name(1),
            " ".repeat(40),
            self.view.seat_name(3)
        )?;
        writeln!(f)?;
        self.write_hand(f)?;
        writeln!(f)?;
        writeln!(f, "Current player: {}", self.view.seat_name(self.view.current))?;
        if self.debug {
            self.write_debug(f)?;
        }
        Ok(())
    }
}
