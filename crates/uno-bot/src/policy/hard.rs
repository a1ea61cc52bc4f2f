//! Hard tier: hold wilds early, spend action cards first, dump wilds late.

use super::{Candidates, Decision, Rule, first_max_by_key, majority_color, run_rules};
use rand::RngCore;
use uno_core::game::agent::TurnContext;

/// Below this progress the hard tier keeps its wilds.
pub(crate) const CONSERVE_UNTIL: f64 = 0.7;

pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "hard_early_action",
        apply: early_action,
    },
    Rule {
        name: "hard_early_color_match",
        apply: early_color_match,
    },
    Rule {
        name: "hard_early_highest_colored",
        apply: early_highest_colored,
    },
    Rule {
        name: "hard_conserve_wilds",
        apply: conserve_wilds,
    },
    Rule {
        name: "hard_wild_majority_color",
        apply: wild_with_majority_color,
    },
    Rule {
        name: "hard_highest_legal",
        apply: highest_legal,
    },
];

pub(crate) fn decide(
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    rng: &mut dyn RngCore,
) -> (Decision, &'static str) {
    run_rules(RULES, ctx, candidates, rng)
}

fn early(candidates: &Candidates) -> bool {
    candidates.progress < CONSERVE_UNTIL
}

fn early_action(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    if !early(candidates) {
        return None;
    }
    let actions: Vec<_> = candidates
        .non_wild()
        .into_iter()
        .filter(|card| card.rank().is_action())
        .collect();
    first_max_by_key(&actions, |card| card.rank().action_priority()).map(Decision::play)
}

fn early_color_match(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    if !early(candidates) {
        return None;
    }
    let matches: Vec<_> = candidates
        .non_wild()
        .into_iter()
        .filter(|card| card.current_color() == candidates.top.current_color())
        .collect();
    first_max_by_key(&matches, |card| card.rank().index()).map(Decision::play)
}

fn early_highest_colored(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    if !early(candidates) {
        return None;
    }
    first_max_by_key(&candidates.non_wild(), |card| card.rank().index()).map(Decision::play)
}

fn conserve_wilds(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    (early(candidates) && candidates.hand_len > 1).then_some(Decision::Draw)
}

fn wild_with_majority_color(
    ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    let wild = first_max_by_key(&candidates.wild(), |card| card.rank().label())?;
    Some(Decision::Play {
        card: wild,
        wild_color: Some(majority_color(ctx.hand())),
    })
}

fn highest_legal(
    _ctx: &TurnContext<'_>,
    candidates: &Candidates,
    _rng: &mut dyn RngCore,
) -> Option<Decision> {
    Some(
        first_max_by_key(&candidates.legal, |card| card.rank().index())
            .map(Decision::play)
            .unwrap_or(Decision::Draw),
    )
}
