use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uno_core::game::agent::{AgentError, Move, TurnAgent, TurnContext};
use uno_core::game::orchestrator::Orchestrator;
use uno_core::model::card::Card;
use uno_core::model::color::Color;
use uno_core::model::deck::{Deck, STANDARD_DECK_SIZE};
use uno_core::model::player::{Difficulty, Player};

/// Random legal card or a draw; random colours; occasionally forgets UNO.
struct Wanderer;

impl TurnAgent for Wanderer {
    fn choose_move(
        &mut self,
        ctx: &TurnContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Move, AgentError> {
        let legal = ctx.legal_cards();
        if legal.is_empty() || rng.next_u32() % 5 == 0 {
            return Ok(Move::Draw);
        }
        let index = rng.next_u32() as usize % legal.len();
        Ok(Move::play(legal[index]))
    }

    fn play_drawn(&mut self, _ctx: &TurnContext<'_>, card: Card) -> Result<bool, AgentError> {
        Ok(!card.is_wild())
    }

    fn choose_color(&mut self, ctx: &TurnContext<'_>) -> Result<Color, AgentError> {
        Ok(Color::ALL[ctx.hand().len() % Color::ALL.len()])
    }

    fn call_uno(&mut self, ctx: &TurnContext<'_>) -> Result<bool, AgentError> {
        Ok(ctx.seat() % 2 == 0)
    }
}

fn sorted_identities(cards: impl Iterator<Item = Card>) -> Vec<(Option<usize>, u8)> {
    let mut ids: Vec<_> = cards
        .map(|card| {
            let (color, rank) = card.identity();
            (color.map(|c| c.index()), rank as u8)
        })
        .collect();
    ids.sort();
    ids
}

#[test]
fn every_card_is_accounted_for_throughout_whole_games() {
    let expected = sorted_identities(Deck::standard().cards().iter().copied());
    for seed in 0..12u64 {
        let players = vec![
            Player::human("You"),
            Player::computer("AI 1", Difficulty::Easy),
            Player::computer("AI 2", Difficulty::Medium),
            Player::computer("AI 3", Difficulty::Hard),
        ];
        let mut game = Orchestrator::new(players, StdRng::seed_from_u64(seed)).expect("deal");
        let mut agents: Vec<Box<dyn TurnAgent>> = (0..4)
            .map(|_| Box::new(Wanderer) as Box<dyn TurnAgent>)
            .collect();

        for _ in 0..1_500 {
            if game.is_over() {
                break;
            }
            game.play_turn(&mut agents).expect("turn succeeds");
            let state = game.state();
            let all = state
                .deck()
                .cards()
                .iter()
                .chain(state.players().iter().flat_map(|p| p.hand().iter()))
                .chain(state.discard().cards().iter())
                .copied();
            assert_eq!(sorted_identities(all), expected, "seed {seed}");
            assert_eq!(state.card_identities().len(), STANDARD_DECK_SIZE);
            let top = state.top_card().expect("pile never empties");
            if top.is_wild() {
                assert!(top.current_color().is_some(), "wilds on the pile carry a colour");
            }
        }
    }
}

#[test]
fn fresh_game_scenario_counts() {
    let players = vec![
        Player::human("You"),
        Player::computer("AI 1", Difficulty::Hard),
        Player::computer("AI 2", Difficulty::Hard),
        Player::computer("AI 3", Difficulty::Hard),
    ];
    let game = Orchestrator::new(players, StdRng::seed_from_u64(77)).expect("deal");
    let sizes = game.state().hand_sizes();
    assert!(sizes.iter().all(|&n| n == 7));
    assert_eq!(sizes.iter().sum::<usize>(), 28);
    assert_eq!(game.state().deck().len(), 79);
    assert_eq!(game.turns(), 0);
}

#[test]
fn same_seed_deals_the_same_table() {
    let build = || {
        let players = vec![
            Player::human("You"),
            Player::computer("AI 1", Difficulty::Easy),
            Player::computer("AI 2", Difficulty::Easy),
            Player::computer("AI 3", Difficulty::Easy),
        ];
        Orchestrator::new(players, StdRng::seed_from_u64(2024)).expect("deal")
    };
    assert_eq!(build().view(), build().view());
}
