pub mod card;
pub mod color;
pub mod deck;
pub mod discard;
pub mod hand;
pub mod player;
pub mod rank;
