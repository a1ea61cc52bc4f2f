use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Immutable card value.
///
/// A colored card's current colour always equals its printed colour. A
/// wild-family card has no printed colour; its current colour is `None` until
/// it is played, at which point a colored copy is produced with
/// [`Card::with_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    original_color: Option<Color>,
    current_color: Option<Color>,
    rank: Rank,
}

impl Card {
    /// A colored card. Wild ranks ignore the colour and come out unresolved.
    pub const fn new(color: Color, rank: Rank) -> Self {
        if rank.is_wild() {
            Self::wild(rank)
        } else {
            Self {
                original_color: Some(color),
                current_color: Some(color),
                rank,
            }
        }
    }

    pub const fn wild(rank: Rank) -> Self {
        Self {
            original_color: None,
            current_color: None,
            rank,
        }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn original_color(self) -> Option<Color> {
        self.original_color
    }

    pub const fn current_color(self) -> Option<Color> {
        self.current_color
    }

    pub const fn is_wild(self) -> bool {
        self.rank.is_wild()
    }

    /// Copy of this card carrying `color`. Colored cards are returned unchanged.
    pub const fn with_color(self, color: Color) -> Self {
        if self.rank.is_wild() {
            Self {
                original_color: None,
                current_color: Some(color),
                rank: self.rank,
            }
        } else {
            self
        }
    }

    /// Copy with any chosen wild colour cleared.
    pub const fn reset(self) -> Self {
        if self.rank.is_wild() {
            Self::wild(self.rank)
        } else {
            self
        }
    }

    /// Printed identity, independent of any colour chosen in play.
    pub const fn identity(self) -> (Option<Color>, Rank) {
        (self.original_color, self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current_color {
            Some(color) => write!(f, "{}{}", color.initial(), self.rank.short_label()),
            None => f.write_str(self.rank.short_label()),
        }
    }
}
