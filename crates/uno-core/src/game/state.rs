use crate::game::event::{GameEvent, GamePhase};
use crate::game::rules::Direction;
use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::deck::{Deck, DrawError};
use crate::model::discard::DiscardPile;
use crate::model::player::{Player, STARTING_HAND_SIZE};
use crate::model::rank::Rank;
use rand::Rng;
use thiserror::Error;

pub const PLAYER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs exactly {PLAYER_COUNT} players, got {0}")]
    PlayerCount(usize),
    #[error("could not seed the discard pile: {0}")]
    Draw(#[from] DrawError),
    #[error("starting seat {seat} is out of range for {players} players")]
    StartingSeat { seat: usize, players: usize },
}

/// Everything on the table: players, deck, discard pile, turn and direction.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    deck: Deck,
    discard: DiscardPile,
    direction: Direction,
    phase: GamePhase,
    pending: Vec<GameEvent>,
}

impl GameState {
    /// Shuffles a fresh deck, seeds the discard pile, deals seven cards each
    /// and picks a random starting seat.
    pub fn deal<R: Rng + ?Sized>(players: Vec<Player>, rng: &mut R) -> Result<Self, SetupError> {
        if players.len() != PLAYER_COUNT {
            return Err(SetupError::PlayerCount(players.len()));
        }
        let mut deck = Deck::shuffled(rng);
        let mut discard = DiscardPile::seeded_from(&mut deck, rng)?;
        let mut players = players;
        for player in players.iter_mut() {
            player.draw_n(&mut deck, &mut discard, rng, STARTING_HAND_SIZE);
        }
        let starting = rng.gen_range(0..PLAYER_COUNT);
        Ok(Self {
            players,
            deck,
            discard,
            direction: Direction::Clockwise,
            phase: GamePhase::AwaitingMove { seat: starting },
            pending: Vec::new(),
        })
    }

    /// Builds a table from explicit parts.
    pub fn from_parts(
        players: Vec<Player>,
        deck: Deck,
        discard: DiscardPile,
        current: usize,
        direction: Direction,
    ) -> Result<Self, SetupError> {
        if players.len() != PLAYER_COUNT {
            return Err(SetupError::PlayerCount(players.len()));
        }
        if current >= players.len() {
            return Err(SetupError::StartingSeat {
                seat: current,
                players: players.len(),
            });
        }
        Ok(Self {
            players,
            deck,
            discard,
            direction,
            phase: GamePhase::AwaitingMove { seat: current },
            pending: Vec::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard.top()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Seat whose turn it is, or the winner once the game is over.
    pub fn current(&self) -> usize {
        match self.phase {
            GamePhase::AwaitingMove { seat } => seat,
            GamePhase::GameOver { winner } => winner,
        }
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            GamePhase::AwaitingMove { .. } => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.hand().len()).collect()
    }

    /// Printed identities of every card in the deck, the hands and the pile.
    pub fn card_identities(&self) -> Vec<(Option<Color>, Rank)> {
        self.deck
            .cards()
            .iter()
            .chain(self.players.iter().flat_map(|p| p.hand().iter()))
            .chain(self.discard.cards().iter())
            .map(|card| card.identity())
            .collect()
    }

    pub(crate) fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    /// Draws one card for `seat` without adding it to the hand.
    pub(crate) fn draw_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DrawError> {
        let before = self.deck.recycled();
        let result = self.deck.draw(&mut self.discard, rng);
        self.note_reshuffle(before);
        result
    }

    /// Gives up to `count` cards to `seat`, returning how many arrived.
    pub(crate) fn give_cards<R: Rng + ?Sized>(
        &mut self,
        seat: usize,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let before = self.deck.recycled();
        let Some(player) = self.players.get_mut(seat) else {
            return 0;
        };
        let received = player.draw_n(&mut self.deck, &mut self.discard, rng, count);
        self.note_reshuffle(before);
        received
    }

    pub(crate) fn discard_card(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub(crate) fn set_turn(&mut self, seat: usize, direction: Direction) {
        self.direction = direction;
        self.phase = GamePhase::AwaitingMove { seat };
    }

    pub(crate) fn finish(&mut self, winner: usize) {
        self.phase = GamePhase::GameOver { winner };
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    fn note_reshuffle(&mut self, recycled_before: usize) {
        let recycled = self.deck.recycled() - recycled_before;
        if recycled > 0 {
            self.pending.push(GameEvent::Reshuffled { recycled });
        }
    }
}
