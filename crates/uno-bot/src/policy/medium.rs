use super::{Candidates, Decision, Rule, chance, hard, random_pick, run_rules};
use rand::RngCore;
use uno_core::game::agent::TurnContext;

/// Below this progress the medium tier plays any colored card at random.
pub(crate) const OPENING_UNTIL: f64 = 0.5;

pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "medium_opening_random_colored",
        apply: opening_random_colored,
    },
    Rule {
        name: "medium_coin_flip_random",
        apply: coin_flip_random,
    },
    Rule {
        name: "medium_defer_to_hard",
        apply: defer_to_hard,
    },
];

pub(crate) fn decide(
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> (Decision, &'static str) {
    run_rules(RULES, ctx, candidates, rng)
}

fn opening_random_colored(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> Option<Decision> {
    if candidates.progress >= OPENING_UNTIL {
        return None;
    }
    let colored = candidates.non_wild();
    (!colored.is_empty()).then(|| random_pick(&colored, rng))
}

fn coin_flip_random(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> Option<Decision> {
    chance(rng, 0.25).then(|| random_pick(&candidates.legal, rng))
}

fn defer_to_hard(
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> Option<Decision> {
    Some(hard::decide(ctx, candidates, rng).0)
}
