//! Terminal-state scoring
//!
//! Maps a terminal or cut-off state to the scalar figure of merit used
//! by backpropagation and the best-leaf tracker. The scorer is pure:
//! equal states always score equally.

use crate::actions::Action;
use crate::config::GameContext;
use crate::state::GameState;

/// The cheaper CP price of one point of durability, via Master's Mend
/// or Immaculate Mend.
pub fn effective_cp_per_durability(ctx: &GameContext) -> f64 {
    let masters_mend = Action::MastersMend.def().cp_cost as f64 / 30.0;
    let immaculate_mend =
        Action::ImmaculateMend.def().cp_cost as f64 / (ctx.max_durability - 10) as f64;
    masters_mend.min(immaculate_mend)
}

/// Scores a playout outcome.
///
/// Unfinished crafts score zero. Among finished crafts, quality
/// dominates (squared), with progress-per-CP efficiency as the
/// tie-breaker: durability spent on progress is converted to virtual CP
/// at the cheaper mend rate, and the achieved progress-per-CP is
/// normalized against the worst acceptable ratio
/// `target_progress / max_cp`.
pub fn score_state(ctx: &GameContext, state: &GameState) -> f64 {
    let durability_cp_value = effective_cp_per_durability(ctx);

    let virtual_cp_on_progress = state.cp_used_on_progress as f64
        + durability_cp_value * state.durability_used_on_progress as f64;
    let capped_progress = state.progress.min(ctx.target_progress) as f64;
    let progress_per_cp = if virtual_cp_on_progress == 0.0 {
        0.0
    } else {
        capped_progress / virtual_cp_on_progress
    };
    let worst_progress_per_cp = ctx.target_progress as f64 / ctx.max_cp as f64;
    let ppcp_ratio = progress_per_cp / worst_progress_per_cp;

    let q_score = (state.quality as f64 / ctx.target_quality as f64).min(1.0);
    let finish_bonus = if state.progress >= ctx.target_progress {
        1.0
    } else {
        0.0
    };

    q_score * q_score * ppcp_ratio * finish_bonus
}
