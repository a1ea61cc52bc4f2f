use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uno_core::game::agent::{AgentError, Move, TurnAgent, TurnContext};
use uno_core::game::event::{GameEvent, GamePhase, TurnResult};
use uno_core::game::orchestrator::{Orchestrator, TurnError};
use uno_core::game::rules::{Direction, PlayError};
use uno_core::game::state::GameState;
use uno_core::model::card::Card;
use uno_core::model::color::Color;
use uno_core::model::deck::Deck;
use uno_core::model::discard::DiscardPile;
use uno_core::model::hand::Hand;
use uno_core::model::player::{Difficulty, Player};
use uno_core::model::rank::Rank;

/// Plays the first legal card, otherwise draws. Always accepts drawn cards,
/// picks red for wilds and calls UNO when configured to.
struct FirstLegal {
    calls_uno: bool,
}

impl TurnAgent for FirstLegal {
    fn choose_move(
        &mut self,
        ctx: &TurnContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError> {
        Ok(ctx
            .legal_cards()
            .first()
            .map(|&card| Move::play(card))
            .unwrap_or(Move::Draw))
    }

    fn play_drawn(&mut self, _ctx: &TurnContext<'_>, _card: Card) -> Result<bool, AgentError> {
        Ok(true)
    }

    fn choose_color(&mut self, _ctx: &TurnContext<'_>) -> Result<Color, AgentError> {
        Ok(Color::Red)
    }

    fn call_uno(&mut self, _ctx: &TurnContext<'_>) -> Result<bool, AgentError> {
        Ok(self.calls_uno)
    }
}

/// Replays a fixed move; panics if asked anything it was not scripted for.
struct Scripted {
    next: Option<Move>,
    accept_drawn: bool,
    color: Option<Color>,
    uno: Option<bool>,
}

impl Scripted {
    fn moving(mv: Move) -> Self {
        Self {
            next: Some(mv),
            accept_drawn: false,
            color: None,
            uno: None,
        }
    }
}

impl TurnAgent for Scripted {
    fn choose_move(
        &mut self,
        _ctx: &TurnContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError> {
        self.next.take().ok_or(AgentError::InputClosed)
    }

    fn play_drawn(&mut self, _ctx: &TurnContext<'_>, _card: Card) -> Result<bool, AgentError> {
        Ok(self.accept_drawn)
    }

    fn choose_color(&mut self, _ctx: &TurnContext<'_>) -> Result<Color, AgentError> {
        Ok(self.color.expect("colour was not expected"))
    }

    fn call_uno(&mut self, _ctx: &TurnContext<'_>) -> Result<bool, AgentError> {
        Ok(self.uno.expect("uno call was not expected"))
    }
}

fn idle() -> Box<dyn TurnAgent> {
    Box::new(FirstLegal { calls_uno: true })
}

fn c(color: Color, rank: Rank) -> Card {
    Card::new(color, rank)
}

fn filler() -> Hand {
    Hand::with_cards(vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)])
}

fn table(first_hand: Vec<Card>, top: Card, deck: Vec<Card>) -> Orchestrator<StdRng> {
    let players = vec![
        Player::human("You").with_hand(Hand::with_cards(first_hand)),
        Player::computer("AI 1", Difficulty::Easy).with_hand(filler()),
        Player::computer("AI 2", Difficulty::Medium).with_hand(filler()),
        Player::computer("AI 3", Difficulty::Hard).with_hand(filler()),
    ];
    let mut discard = DiscardPile::new();
    discard.push(top);
    let state = GameState::from_parts(
        players,
        Deck::from_cards(deck),
        discard,
        0,
        Direction::Clockwise,
    )
    .expect("valid table");
    Orchestrator::from_state(state, StdRng::seed_from_u64(0))
}

fn agents(first: Box<dyn TurnAgent>) -> Vec<Box<dyn TurnAgent>> {
    vec![first, idle(), idle(), idle()]
}

fn plenty() -> Vec<Card> {
    vec![c(Color::Green, Rank::Nine); 10]
}

#[test]
fn skip_from_seat_zero_passes_to_seat_two() {
    let skip = c(Color::Red, Rank::Skip);
    let mut game = table(vec![skip, c(Color::Red, Rank::One), c(Color::Red, Rank::Two)], c(Color::Red, Rank::Five), plenty());
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(skip)))))
        .expect("turn");
    assert_eq!(report.result, TurnResult::Played(skip));
    assert!(report.events.contains(&GameEvent::Skipped { seat: 1 }));
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 2 });
    assert_eq!(game.state().top_card(), Some(skip));
}

#[test]
fn reverse_from_seat_zero_passes_to_seat_three() {
    let reverse = c(Color::Red, Rank::Reverse);
    let mut game = table(vec![reverse, c(Color::Red, Rank::One), c(Color::Red, Rank::Two)], c(Color::Red, Rank::Five), plenty());
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(reverse)))))
        .expect("turn");
    assert!(report.events.contains(&GameEvent::DirectionReversed));
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 3 });
    assert_eq!(game.state().direction(), Direction::CounterClockwise);
}

#[test]
fn draw_two_feeds_next_seat_and_skips_it() {
    let draw_two = c(Color::Red, Rank::DrawTwo);
    let mut game = table(vec![draw_two, c(Color::Red, Rank::One), c(Color::Red, Rank::Two)], c(Color::Red, Rank::Five), plenty());
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(draw_two)))))
        .expect("turn");
    assert!(report.events.contains(&GameEvent::DrawPenalty { seat: 1, cards: 2, drawn: 2 }));
    assert_eq!(game.state().hand_sizes(), vec![2, 4, 2, 2]);
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 2 });
}

#[test]
fn wild_draw_four_uses_agent_color() {
    let wild = Card::wild(Rank::WildDrawFour);
    let mut scripted = Scripted::moving(Move::play(wild));
    scripted.color = Some(Color::Yellow);
    let mut game = table(vec![wild, c(Color::Red, Rank::One), c(Color::Red, Rank::Two)], c(Color::Blue, Rank::Five), plenty());
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    let placed = wild.with_color(Color::Yellow);
    assert_eq!(report.result, TurnResult::Played(placed));
    assert_eq!(game.state().top_card(), Some(placed));
    assert!(report.events.contains(&GameEvent::ColorChosen { seat: 0, color: Color::Yellow }));
    assert_eq!(game.state().hand_sizes()[1], 6);
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 2 });
}

#[test]
fn preselected_wild_color_skips_the_prompt() {
    let wild = Card::wild(Rank::Wild);
    let scripted = Scripted::moving(Move::Play { card: wild, wild_color: Some(Color::Green) });
    let mut game = table(vec![wild, c(Color::Red, Rank::One), c(Color::Red, Rank::Two)], c(Color::Blue, Rank::Five), plenty());
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    assert_eq!(report.result, TurnResult::Played(wild.with_color(Color::Green)));
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 1 });
}

#[test]
fn emptying_the_hand_wins_without_uno_check() {
    let last = c(Color::Red, Rank::Seven);
    let mut game = table(vec![last], c(Color::Red, Rank::Five), plenty());
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(last)))))
        .expect("turn");
    assert_eq!(report.winner(), Some(0));
    assert!(report.events.contains(&GameEvent::Won { seat: 0 }));
    assert!(!report.events.iter().any(|e| matches!(e, GameEvent::UnoPenalty { .. } | GameEvent::UnoCalled { .. })));
    assert!(matches!(
        game.play_turn(&mut agents(idle())),
        Err(TurnError::GameOver { winner: 0 })
    ));
}

#[test]
fn winning_with_draw_two_does_not_feed_next_seat() {
    let last = c(Color::Red, Rank::DrawTwo);
    let mut game = table(vec![last], c(Color::Red, Rank::Five), plenty());
    game.play_turn(&mut agents(Box::new(Scripted::moving(Move::play(last)))))
        .expect("turn");
    assert_eq!(game.state().hand_sizes(), vec![0, 2, 2, 2]);
}

#[test]
fn forgetting_uno_costs_two_cards() {
    let play = c(Color::Red, Rank::Seven);
    let mut scripted = Scripted::moving(Move::play(play));
    scripted.uno = Some(false);
    let mut game = table(vec![play, c(Color::Blue, Rank::Three)], c(Color::Red, Rank::Five), plenty());
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    assert!(report.events.contains(&GameEvent::UnoPenalty { seat: 0, drawn: 2 }));
    assert_eq!(game.state().hand_sizes()[0], 3);
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 1 });
}

#[test]
fn calling_uno_keeps_the_single_card() {
    let play = c(Color::Red, Rank::Seven);
    let mut scripted = Scripted::moving(Move::play(play));
    scripted.uno = Some(true);
    let mut game = table(vec![play, c(Color::Blue, Rank::Three)], c(Color::Red, Rank::Five), plenty());
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    assert!(report.events.contains(&GameEvent::UnoCalled { seat: 0 }));
    assert_eq!(game.state().hand_sizes()[0], 1);
}

#[test]
fn drawn_playable_card_can_be_played() {
    let drawn = c(Color::Red, Rank::Eight);
    let mut scripted = Scripted::moving(Move::Draw);
    scripted.accept_drawn = true;
    let hand = vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), vec![drawn]);
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    assert_eq!(report.result, TurnResult::DrewAndPlayed(drawn));
    assert!(report.events.contains(&GameEvent::Drew { seat: 0, card: drawn, playable: true }));
    assert!(report.events.contains(&GameEvent::Played { seat: 0, card: drawn, from_draw: true }));
    assert_eq!(game.state().hand_sizes()[0], 2);
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 1 });
}

#[test]
fn declined_drawn_card_stays_in_hand() {
    let drawn = c(Color::Red, Rank::Eight);
    let hand = vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), vec![drawn]);
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::Draw))))
        .expect("turn");
    assert_eq!(report.result, TurnResult::Drew);
    assert!(game.state().players()[0].hand().contains(drawn));
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 1 });
}

#[test]
fn unplayable_drawn_card_is_kept_without_asking() {
    let drawn = c(Color::Green, Rank::Eight);
    let mut scripted = Scripted::moving(Move::Draw);
    scripted.accept_drawn = true;
    let hand = vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), vec![drawn]);
    let report = game.play_turn(&mut agents(Box::new(scripted))).expect("turn");
    assert_eq!(report.result, TurnResult::Drew);
    assert_eq!(game.state().hand_sizes()[0], 3);
}

#[test]
fn failed_draw_is_a_no_op_that_advances_the_turn() {
    let hand = vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), Vec::new());
    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::Draw))))
        .expect("turn");
    assert_eq!(report.result, TurnResult::NoOp);
    assert!(report.events.contains(&GameEvent::DrawFailed { seat: 0 }));
    assert_eq!(report.phase, GamePhase::AwaitingMove { seat: 1 });
    assert_eq!(game.state().hand_sizes()[0], 2);
}

#[test]
fn illegal_play_is_rejected_before_any_change() {
    let wrong = c(Color::Blue, Rank::One);
    let hand = vec![wrong, c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), plenty());
    let err = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(wrong)))))
        .unwrap_err();
    assert!(matches!(err, TurnError::Play(PlayError::IllegalPlay { .. })));
    assert_eq!(game.state().hand_sizes()[0], 2);
    assert_eq!(game.state().phase(), GamePhase::AwaitingMove { seat: 0 });
}

#[test]
fn card_outside_the_hand_is_rejected() {
    let ghost = c(Color::Red, Rank::Nine);
    let hand = vec![c(Color::Blue, Rank::One), c(Color::Blue, Rank::Two)];
    let mut game = table(hand, c(Color::Red, Rank::Five), plenty());
    let err = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::play(ghost)))))
        .unwrap_err();
    assert!(matches!(err, TurnError::Play(PlayError::CardNotInHand(card)) if card == ghost));
}

#[test]
fn agent_count_must_match_seats() {
    let mut game = table(vec![c(Color::Red, Rank::One)], c(Color::Red, Rank::Five), plenty());
    let mut short: Vec<Box<dyn TurnAgent>> = vec![idle()];
    assert!(matches!(
        game.play_turn(&mut short),
        Err(TurnError::AgentCountMismatch { expected: 4, actual: 1 })
    ));
}

#[test]
fn reshuffle_is_reported_when_deck_runs_dry() {
    let players = vec![
        Player::human("You").with_hand(filler()),
        Player::computer("AI 1", Difficulty::Easy).with_hand(filler()),
        Player::computer("AI 2", Difficulty::Medium).with_hand(filler()),
        Player::computer("AI 3", Difficulty::Hard).with_hand(filler()),
    ];
    let mut discard = DiscardPile::new();
    discard.push(c(Color::Green, Rank::Two));
    discard.push(Card::wild(Rank::Wild).with_color(Color::Green));
    discard.push(c(Color::Red, Rank::Five));
    let state = GameState::from_parts(players, Deck::from_cards(Vec::new()), discard, 0, Direction::Clockwise)
        .expect("valid table");
    let mut game = Orchestrator::from_state(state, StdRng::seed_from_u64(4));

    let report = game
        .play_turn(&mut agents(Box::new(Scripted::moving(Move::Draw))))
        .expect("turn");
    assert_eq!(report.events[0], GameEvent::Reshuffled { recycled: 2 });
    assert!(matches!(report.events[1], GameEvent::Drew { seat: 0, .. }));
    assert_eq!(game.state().discard().len(), 1);
    assert_eq!(game.state().deck().len(), 1);
    assert_eq!(game.state().hand_sizes()[0], 3);
}
