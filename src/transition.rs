//! The per-turn state transition
//!
//! [`execute_action`] takes a parent node and an action and produces a
//! child node in the arena with every multiplier, effect tick and
//! accounting rule applied, or reports the action inapplicable by
//! returning `None`. The same function also answers feasibility probes:
//! callers trial-execute an action and free the child again.
//!
//! Turn ordering, which several rules depend on:
//!
//! 1. gates (terminal parent, action gate, CP),
//! 2. the action's own progress/quality with the multipliers read from
//!    the pre-tick effect state,
//! 3. Muscle Memory / Great Strides / Final Appraisal resolution,
//! 4. wasted-durability accounting,
//! 5. durability and CP deduction,
//! 6. Manipulation regeneration and the uniform charge tick,
//! 7. the executed action's own effect grant and Inner Quiet bump.

use crate::actions::Action;
use crate::arena::{StateArena, StateHandle};
use crate::config::GameContext;
use crate::effects::Effect;

/// Executes `action` on the state at `parent`, returning the handle of
/// the resulting child node.
///
/// Returns `None` when the parent is terminal, the action's gate
/// rejects the state, CP is insufficient, or the arena is exhausted.
/// The parent is never modified.
pub fn execute_action(
    ctx: &GameContext,
    arena: &mut StateArena,
    parent: StateHandle,
    action: Action,
) -> Option<StateHandle> {
    let def = action.def();
    {
        let state = arena.get(parent);
        if state.is_terminal(ctx) {
            return None;
        }
        if !(def.gate)(ctx, state) {
            return None;
        }
        if state.cp < def.cp_cost {
            return None;
        }
    }

    let child = arena.create_from(parent, false)?;
    let state = arena.get_mut(child);
    state.parent = Some(parent);
    state.step += 1;

    // Multipliers read before the charge tick. `used_action` still
    // holds the previous action here, so combo hooks see it.
    let veneration_bonus: f32 = if state.charges(Effect::Veneration) > 0 {
        0.5
    } else {
        0.0
    };
    let muscle_memory_bonus: f32 = if state.charges(Effect::MuscleMemory) > 0 {
        1.0
    } else {
        0.0
    };
    let inner_quiet_factor = 1.0 + 0.1 * state.stacks(Effect::InnerQuiet) as f32;
    let great_strides_bonus: f32 = if state.charges(Effect::GreatStrides) > 0 {
        1.0
    } else {
        0.0
    };
    let innovation_factor: f32 = if state.charges(Effect::Innovation) > 0 {
        1.5
    } else {
        1.0
    };

    let result = (def.execute)(ctx, def, state);

    let progress_delta = (result.progress_increase
        + result.progress_increase * veneration_bonus
        + result.progress_increase * muscle_memory_bonus) as i32;
    let quality_delta = (result.quality_increase * inner_quiet_factor * innovation_factor
        + result.quality_increase * inner_quiet_factor * great_strides_bonus)
        as i32;
    state.progress += progress_delta;
    state.quality += quality_delta;

    if result.progress_increase > 0.0 {
        state.effects[Effect::MuscleMemory as usize].charges = 0;
    }
    if result.quality_increase > 0.0 {
        state.effects[Effect::GreatStrides as usize].charges = 0;
    }

    // Final Appraisal holds the craft one short of completion.
    if state.charges(Effect::FinalAppraisal) > 0 && state.progress >= ctx.target_progress {
        state.progress = ctx.target_progress - 1;
        state.effects[Effect::FinalAppraisal as usize].charges = 0;
    }

    let mut wasted = 0;
    if action == Action::ImmaculateMend {
        let missing = ctx.max_durability - state.durability;
        wasted += ((ctx.max_durability - 5) - missing).max(0);
    }
    if action == Action::MastersMend {
        let missing = ctx.max_durability - state.durability;
        wasted += (30 - missing).max(0);
    }
    if result.durability_decrease == 0 && state.charges(Effect::WasteNot) > 0 {
        // Commonly 5; 10 only when the sole alternative costs 20.
        wasted += 5;
    }
    state.wasted_durability += wasted;

    let mut durability_decrease = 0;
    if result.durability_decrease < 0 {
        state.durability =
            (state.durability - result.durability_decrease).min(ctx.max_durability);
    } else if state.stacks(Effect::TrainedPerfection) > 0 && result.durability_decrease > 0 {
        state.effects[Effect::TrainedPerfection as usize].stacks -= 1;
    } else if state.charges(Effect::WasteNot) > 0 {
        durability_decrease = result.durability_decrease / 2;
    } else {
        durability_decrease = result.durability_decrease;
    }
    state.durability -= durability_decrease;
    state.cp -= result.cp_cost;

    if result.progress_increase > 0.0 && result.quality_increase == 0.0 {
        state.cp_used_on_progress += result.cp_cost;
        state.durability_used_on_progress += durability_decrease;
    }
    if result.quality_increase > 0.0 && result.progress_increase == 0.0 {
        state.cp_used_on_quality += result.cp_cost;
        state.durability_used_on_quality += durability_decrease;
    }

    state.used_action = Some(action);

    // Durability ran out: the craft is dead, no effect handling.
    if state.durability <= 0 {
        return Some(child);
    }

    // Manipulation does not regenerate on the turn it is applied.
    if state.charges(Effect::Manipulation) > 0 && def.effect != Some(Effect::Manipulation) {
        state.durability = (state.durability + 5).min(ctx.max_durability);
    }

    if def.effect != Some(Effect::FinalAppraisal) {
        for slot in state.effects.iter_mut() {
            if slot.charges > 0 {
                slot.charges -= 1;
            }
        }
    }

    if let Some(effect) = def.effect {
        state.apply_effect(effect, def.effect_charges, def.effect_stacks);
    }

    if def.is_touch() {
        state.add_inner_quiet();
    }

    Some(child)
}

/// Executes a fixed action list in order from `start`, linking each
/// state to the previous one.
///
/// Stops at the step cap, at the first inapplicable action, or when the
/// craft ends. Returns the last state reached, or `None` when not a
/// single action applied.
pub fn execute_sequence(
    ctx: &GameContext,
    arena: &mut StateArena,
    start: StateHandle,
    sequence: &[Action],
    max_steps: i32,
) -> Option<StateHandle> {
    if arena.get(start).is_terminal(ctx) {
        return None;
    }

    let mut head: Option<StateHandle> = None;
    let mut current = start;
    for &action in sequence {
        if arena.get(current).step >= max_steps {
            break;
        }
        let Some(next) = execute_action(ctx, arena, current, action) else {
            break;
        };
        head = Some(next);
        if arena.get(next).is_terminal(ctx) {
            break;
        }
        current = next;
    }

    head
}
