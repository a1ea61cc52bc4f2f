use super::{Candidates, Decision, Rule, chance, random_pick, run_rules};
use rand::RngCore;
use uno_core::game::agent::TurnContext;

pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "easy_coin_flip_random",
        apply: coin_flip_random,
    },
    Rule {
        name: "easy_match_top",
        apply: match_top,
    },
    Rule {
        name: "easy_first_legal",
        apply: first_legal,
    },
];

pub(crate) fn decide(
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> (Decision, &'static str) {
    run_rules(RULES, ctx, candidates, rng)
}

fn coin_flip_random(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> Option<Decision> {
    chance(rng, 0.5).then(|| random_pick(&candidates.legal, rng))
}

fn match_top(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    let top = candidates.top;
    candidates
        .legal
        .iter()
        .copied()
        .find(|card| card.current_color() == top.current_color() || card.rank() == top.rank())
        .map(Decision::play)
}

fn first_legal(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    Some(
        candidates
            .legal
            .first()
            .copied()
            .map(Decision::play)
            .unwrap_or(Decision::Draw),
    )
}
