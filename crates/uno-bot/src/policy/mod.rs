mod easy;
mod hard;
mod medium;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{Level, event};
use uno_core::game::agent::TurnContext;
use uno_core::model::card::Card;
use uno_core::model::color::Color;
use uno_core::model::hand::Hand;
use uno_core::model::player::Difficulty;

/// What a policy wants to do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Play {
        card: Card,
        wild_color: Option<Color>,
    },
    Draw,
}

impl Decision {
    pub const fn play(card: Card) -> Self {
        Decision::Play {
            card,
            wild_color: None,
        }
    }

    pub fn card(self) -> Option<Card> {
        match self {
            Decision::Play { card, .. } => Some(card),
            Decision::Draw => None,
        }
    }
}

/// Facts every rule reads, computed once per decision.
#[derive(Debug, Clone)]
pub(crate) struct Candidates {
    pub top: Card,
    pub legal: Vec<Card>,
    pub progress: f64,
    pub hand_len: usize,
}

impl Candidates {
    pub fn gather(ctx: &TurnContext<'_>) -> Self {
        Self {
            top: ctx.top_card(),
            legal: ctx.legal_cards(),
            progress: ctx.progress(),
            hand_len: ctx.hand().len(),
        }
    }

    pub fn non_wild(&self) -> Vec<Card> {
        self.legal.iter().copied().filter(|c| !c.is_wild()).collect()
    }

    pub fn wild(&self) -> Vec<Card> {
        self.legal.iter().copied().filter(|c| c.is_wild()).collect()
    }
}

/// One step of a tier's decision list. `None` means "not applicable, try the
/// next rule"; `Some(Decision::Draw)` is a deliberate choice to draw.
pub(crate) struct Rule {
    pub name: &'static str,
    pub apply: fn(&TurnContext<'_>, &Candidates, &mut dyn RngCore) -> Option<Decision>,
}

pub(crate) fn run_rules(
    rules: &[Rule],
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> (Decision, &'static str) {
    for rule in rules {
        if let Some(decision) = (rule.apply)(ctx, candidates, rng) {
            return (decision, rule.name);
        }
    }
    (Decision::Draw, "exhausted")
}

/// Uniform pick among `cards`, or a draw when there is nothing to pick.
pub(crate) fn random_pick(cards: &[Card], rng: &mut dyn RngCore) -> Decision {
    cards
        .choose(rng)
        .copied()
        .map(Decision::play)
        .unwrap_or(Decision::Draw)
}

pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    rng.gen_bool(p)
}

/// Largest element by `key`; the earliest one wins ties.
pub(crate) fn first_max_by_key<K: PartialOrd>(
    cards: &[Card],
    key: impl Fn(&Card) -> K,
) -> Option<Card> {
    let mut best: Option<(Card, K)> = None;
    for &card in cards {
        let k = key(&card);
        let better = match &best {
            Some((_, best_key)) => k > *best_key,
            None => true,
        };
        if better {
            best = Some((card, k));
        }
    }
    best.map(|(card, _)| card)
}

/// Colour the hand holds most of; ties resolve in Red, Blue, Green, Yellow order.
pub fn majority_color(hand: &Hand) -> Color {
    let mut best = Color::ALL[0];
    let mut best_count = hand.count_color(best);
    for color in Color::ALL.iter().copied().skip(1) {
        let count = hand.count_color(color);
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

/// Unified interface for computer decision-making.
pub trait Policy {
    fn decide(&mut self, ctx: &TurnContext<'_>, rng: &mut dyn RngCore) -> Decision;
}

/// Dispatches to the rule list of a fixed difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieredPolicy {
    difficulty: Difficulty,
}

impl TieredPolicy {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Policy for TieredPolicy {
    fn decide(&mut self, ctx: &TurnContext<'_>, rng: &mut dyn RngCore) -> Decision {
        let candidates = Candidates::gather(ctx);
        let (decision, reason) = match self.difficulty {
            Difficulty::Easy => easy::decide(ctx, &candidates, rng),
            Difficulty::Medium => medium::decide(ctx, &candidates, rng),
            Difficulty::Hard => hard::decide(ctx, &candidates, rng),
        };
        log_decision(ctx, self.difficulty, &candidates, decision, reason);
        decision
    }
}

fn log_decision(
    ctx: &TurnContext<'_>,
    difficulty: Difficulty,
    candidates: &Candidates,
    decision: Decision,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let chosen = match decision {
        Decision::Play { card, .. } => card.to_string(),
        Decision::Draw => "draw".to_string(),
    };
    let legal_preview = if candidates.legal.len() <= 6 {
        candidates
            .legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", candidates.legal.len())
    };

    event!(
        target: "uno_bot::play",
        Level::INFO,
        seat = ctx.seat(),
        difficulty = ?difficulty,
        progress = candidates.progress,
        top = %candidates.top,
        legal_count = candidates.legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        reason,
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use uno_core::game::rules::Direction;
    use uno_core::game::state::GameState;
    use uno_core::model::card::Card;
    use uno_core::model::color::Color;
    use uno_core::model::deck::Deck;
    use uno_core::model::discard::DiscardPile;
    use uno_core::model::hand::Hand;
    use uno_core::model::player::{Difficulty, Player};
    use uno_core::model::rank::Rank;

    /// Table with `hand` at seat 0, `top` on the pile and the other hands
    /// padded so the total card count is `total_cards`.
    pub fn table(hand: Vec<Card>, top: Card, total_cards: usize) -> GameState {
        let own = hand.len();
        let rest = total_cards.saturating_sub(own);
        let filler = Card::new(Color::Yellow, Rank::Zero);
        let share = |i: usize| rest / 3 + usize::from(i < rest % 3);
        let players = vec![
            Player::computer("AI 0", Difficulty::Hard).with_hand(Hand::with_cards(hand)),
            Player::computer("AI 1", Difficulty::Hard).with_hand(Hand::with_cards(vec![filler; share(0)])),
            Player::computer("AI 2", Difficulty::Hard).with_hand(Hand::with_cards(vec![filler; share(1)])),
            Player::computer("AI 3", Difficulty::Hard).with_hand(Hand::with_cards(vec![filler; share(2)])),
        ];
        let mut discard = DiscardPile::new();
        discard.push(top);
        GameState::from_parts(players, Deck::standard(), discard, 0, Direction::Clockwise)
            .expect("valid table")
    }

    pub fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::{chance, first_max_by_key, majority_color, random_pick, Decision};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use uno_core::model::card::Card;
    use uno_core::model::color::Color;
    use uno_core::model::hand::Hand;
    use uno_core::model::rank::Rank;

    #[test]
    fn majority_color_breaks_ties_in_fixed_order() {
        let hand = Hand::with_cards(vec![
            Card::new(Color::Yellow, Rank::One),
            Card::new(Color::Green, Rank::Two),
            Card::wild(Rank::Wild),
        ]);
        assert_eq!(majority_color(&hand), Color::Green);
        assert_eq!(majority_color(&Hand::new()), Color::Red);

        let hand = Hand::with_cards(vec![
            Card::new(Color::Yellow, Rank::One),
            Card::new(Color::Yellow, Rank::Two),
            Card::new(Color::Blue, Rank::Two),
        ]);
        assert_eq!(majority_color(&hand), Color::Yellow);
    }

    #[test]
    fn first_max_keeps_the_earliest_tie() {
        let a = Card::new(Color::Red, Rank::Skip);
        let b = Card::new(Color::Blue, Rank::Skip);
        assert_eq!(first_max_by_key(&[a, b], |c| c.rank().index()), Some(a));
        assert_eq!(first_max_by_key(&[], |c: &Card| c.rank().index()), None);
    }

    #[test]
    fn random_pick_draws_on_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_pick(&[], &mut rng), Decision::Draw);
        let card = Card::new(Color::Red, Rank::One);
        assert_eq!(random_pick(&[card], &mut rng), Decision::play(card));
    }

    #[test]
    fn chance_respects_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| !chance(&mut rng, 0.0)));
        assert!((0..100).all(|_| chance(&mut rng, 1.0)));
    }
}
