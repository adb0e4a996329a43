//! Weighted-random playouts
//!
//! A playout extends a frontier node with randomly drawn actions until
//! the craft ends, the step cap is hit, or no action remains playable.
//! Playout nodes are real arena nodes linked into the tree: each one is
//! recorded in its parent's `children` and `actions_expanded`, so later
//! selection passes can descend into and prune them like any other
//! node.

use rand::Rng;

use crate::actions::{Action, ACTION_COUNT};
use crate::arena::{StateArena, StateHandle};
use crate::config::GameContext;
use crate::policy::weights::{assign_action_weights, select_random_action};
use crate::transition::execute_action;
use crate::weight_table::WeightTable;

/// Plays random weighted actions from `start` until the craft ends or
/// `max_steps` is reached. Returns the final node of the playout, or
/// `None` when not a single action could be taken.
pub fn run_playout<R: Rng>(
    ctx: &GameContext,
    arena: &mut StateArena,
    table: Option<&WeightTable>,
    rng: &mut R,
    start: StateHandle,
    max_steps: i32,
) -> Option<StateHandle> {
    if arena.get(start).is_terminal(ctx) {
        return None;
    }

    let mut head: Option<StateHandle> = None;
    let mut current = start;

    loop {
        {
            let state = arena.get(current);
            if state.step >= max_steps || state.is_terminal(ctx) {
                break;
            }
        }

        // Feasibility probe: trial-execute every action, zero the ones
        // the transition rejects.
        let mut weights = [1.0f32; ACTION_COUNT];
        for action in Action::ALL {
            match execute_action(ctx, arena, current, action) {
                Some(trial) => arena.free(trial),
                None => weights[action.index()] = 0.0,
            }
        }
        assign_action_weights(ctx, table, arena.get(current), &mut weights);

        let Some(action) = select_random_action(rng, &weights) else {
            break;
        };
        let Some(next) = execute_action(ctx, arena, current, action) else {
            break;
        };

        let parent = arena.get_mut(current);
        parent.children.push(next);
        parent.actions_expanded.insert(action);

        head = Some(next);
        current = next;
    }

    head
}
