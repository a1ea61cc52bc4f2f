use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Skip = 10,
    Reverse = 11,
    DrawTwo = 12,
    Wild = 13,
    WildDrawFour = 14,
}

impl Rank {
    /// Colored ranks in rank-index order.
    pub const COLORED: [Rank; 13] = [
        Rank::Zero,
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Skip,
        Rank::Reverse,
        Rank::DrawTwo,
    ];

    pub const WILD: [Rank; 2] = [Rank::Wild, Rank::WildDrawFour];

    /// Action ranks in ascending priority.
    pub const ACTIONS: [Rank; 3] = [Rank::Skip, Rank::Reverse, Rank::DrawTwo];

    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }

    pub const fn is_action(self) -> bool {
        matches!(self, Rank::Skip | Rank::Reverse | Rank::DrawTwo)
    }

    /// Position in the colored ordering; wild ranks sort after every colored rank.
    pub fn index(self) -> usize {
        Self::COLORED
            .iter()
            .position(|&rank| rank == self)
            .unwrap_or(Self::COLORED.len())
    }

    /// Position among the action ranks, if this is one.
    pub fn action_priority(self) -> Option<usize> {
        Self::ACTIONS.iter().position(|&rank| rank == self)
    }

    /// Copies of this rank per colour (or in total for wilds) in a standard deck.
    pub const fn copies(self) -> usize {
        match self {
            Rank::Zero => 1,
            Rank::Wild | Rank::WildDrawFour => 4,
            _ => 2,
        }
    }

    /// Cards the next player must take when this rank is played.
    pub const fn draw_penalty(self) -> Option<usize> {
        match self {
            Rank::DrawTwo => Some(2),
            Rank::WildDrawFour => Some(4),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rank::Zero => "0",
            Rank::One => "1",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Skip => "Skip",
            Rank::Reverse => "Reverse",
            Rank::DrawTwo => "+2",
            Rank::Wild => "Wild",
            Rank::WildDrawFour => "+4",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Rank::Reverse => "Rev",
            other => other.label(),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
