//! Heuristic and table-backed action weighting
//!
//! Callers seed the weight vector (typically 1.0 per feasible action
//! and 0.0 for anything infeasible); the weighting pass then adjusts it
//! multiplicatively. A zero weight excludes the action outright.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::actions::{Action, ACTION_COUNT};
use crate::config::GameContext;
use crate::effects::{Effect, INNER_QUIET_CAP};
use crate::state::GameState;
use crate::weight_table::WeightTable;

/// Applies the configured weighting back-end on top of `weights`.
///
/// The table back-end is used when the context asks for it and a table
/// is supplied; otherwise the manual rules run.
pub fn assign_action_weights(
    ctx: &GameContext,
    table: Option<&WeightTable>,
    state: &GameState,
    weights: &mut [f32; ACTION_COUNT],
) {
    match table {
        Some(table) if ctx.use_weight_table => assign_weights_from_table(table, state, weights),
        _ => assign_weights_manual(ctx, state, weights),
    }
}

/// Seeds the opening move: only Muscle Memory and Reflect are worth
/// taking on step 0.
fn seed_first_step(weights: &mut [f32; ACTION_COUNT]) {
    weights.fill(0.0);
    weights[Action::MuscleMemory.index()] = 1.0;
    weights[Action::Reflect.index()] = 1.0;
}

/// The manual heuristic rules.
pub fn assign_weights_manual(
    ctx: &GameContext,
    state: &GameState,
    weights: &mut [f32; ACTION_COUNT],
) {
    if state.step == 0 {
        seed_first_step(weights);
    }

    // Of the two mends, only the cheaper CP-per-durability one is
    // worth considering.
    let masters_mend_rate = Action::MastersMend.def().cp_cost as f32 / 30.0;
    let immaculate_mend_rate =
        Action::ImmaculateMend.def().cp_cost as f32 / (ctx.max_durability - 10) as f32;
    if masters_mend_rate < immaculate_mend_rate {
        weights[Action::ImmaculateMend.index()] = 0.0;
    } else {
        weights[Action::MastersMend.index()] = 0.0;
    }

    if state.trained_perfection_charges > 0 {
        weights[Action::TrainedPerfection.index()] *= 1.5;
    } else {
        weights[Action::TrainedPerfection.index()] = 0.0;
    }

    // This solver never plays Final Appraisal.
    weights[Action::FinalAppraisal.index()] = 0.0;

    if state.used_action == Some(Action::BasicTouch) {
        weights[Action::StandardTouch.index()] *= 2.0;
        weights[Action::BasicTouch.index()] = 0.0;
    }
    if matches!(
        state.used_action,
        Some(Action::Observe) | Some(Action::StandardTouch)
    ) {
        weights[Action::AdvancedTouch.index()] *= 2.0;
        weights[Action::StandardTouch.index()] = 0.0;
        weights[Action::Observe.index()] = 0.0;
    }

    let missing_durability = ctx.max_durability - state.durability;
    if missing_durability <= 30 || state.durability > 15 {
        weights[Action::ImmaculateMend.index()] = 0.0;
    }
    if missing_durability < 30 {
        weights[Action::MastersMend.index()] = 0.0;
    }

    if state.charges(Effect::WasteNot) > 0 {
        weights[Action::WasteNot.index()] = 0.0;
        weights[Action::WasteNotII.index()] = 0.0;
    }

    if state.stacks(Effect::InnerQuiet) >= INNER_QUIET_CAP {
        weights[Action::GreatStrides.index()] *= 1.5;
        weights[Action::ByregotsBlessing.index()] *= 1.5;
    } else {
        weights[Action::ByregotsBlessing.index()] = 0.0;
    }

    if state.charges(Effect::Veneration) > 0 {
        weights[Action::Veneration.index()] = 0.0;
        weights[Action::Innovation.index()] = 0.0;
        for action in Action::ALL {
            if action.def().is_synthesis() {
                weights[action.index()] *= 1.5;
            }
        }
    }
    if state.charges(Effect::GreatStrides) > 0 {
        weights[Action::ByregotsBlessing.index()] *= 1.5;
    }
    if state.charges(Effect::Innovation) > 0 {
        weights[Action::Innovation.index()] = 0.0;
        weights[Action::Veneration.index()] = 0.0;
        weights[Action::ByregotsBlessing.index()] *= 1.3;
        for action in Action::ALL {
            let def = action.def();
            if def.is_touch() || def.quality_efficiency > 0.0 {
                weights[action.index()] *= 1.5;
            }
        }
    }
    if state.charges(Effect::MuscleMemory) > 0 {
        weights[Action::Veneration.index()] *= 1.5;
        weights[Action::Groundwork.index()] *= 1.5;
    }
    if state.stacks(Effect::TrainedPerfection) > 0 {
        weights[Action::Groundwork.index()] *= 1.5;
        weights[Action::PreparatoryTouch.index()] *= 1.5;
    }
}

/// The table-backed weighting: each candidate is scaled by the learned
/// weight of the `(previous, candidate)` transition.
pub fn assign_weights_from_table(
    table: &WeightTable,
    state: &GameState,
    weights: &mut [f32; ACTION_COUNT],
) {
    if state.step == 0 {
        seed_first_step(weights);
        return;
    }
    let Some(prev) = state.used_action else {
        return;
    };
    for action in Action::ALL {
        weights[action.index()] *= table.get(prev, action);
    }
}

/// Draws one action from the discrete distribution over `weights`.
/// Returns `None` when every weight is zero.
pub fn select_random_action<R: Rng>(
    rng: &mut R,
    weights: &[f32; ACTION_COUNT],
) -> Option<Action> {
    let dist = WeightedIndex::new(weights.iter().copied()).ok()?;
    Some(Action::ALL[dist.sample(rng)])
}

/// The highest-weighted action, or `None` when every weight is zero.
pub fn select_best_action(weights: &[f32; ACTION_COUNT]) -> Option<Action> {
    let mut best = 0;
    for (index, &weight) in weights.iter().enumerate() {
        if weight > weights[best] {
            best = index;
        }
    }
    if weights[best] < f32::EPSILON {
        return None;
    }
    Some(Action::ALL[best])
}
