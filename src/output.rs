//! Rendering search results as text
//!
//! Produces the in-game macro block, the plain action list, the numeric
//! state summary and the progress bar printed during long runs.

use std::fmt::Write;

use crate::arena::{StateArena, StateHandle};
use crate::config::GameContext;
use crate::effects::Effect;
use crate::state::GameState;

/// In-game macros hold at most this many action lines per part.
pub const MACRO_LINES_PER_PART: usize = 14;

/// Renders the action chain ending at `leaf` as an in-game macro:
/// one `/ac` line per action, split into numbered parts of
/// [`MACRO_LINES_PER_PART`] lines.
pub fn render_macro(arena: &StateArena, leaf: StateHandle) -> String {
    let sequence = arena.path_actions(leaf);
    if sequence.is_empty() {
        return "No successful paths\n".to_string();
    }

    let mut out = String::new();
    let mut lines_in_part = 0;
    let mut part = 1;
    for action in sequence {
        if lines_in_part == MACRO_LINES_PER_PART {
            let _ = writeln!(out, "/e Part {part} complete <se.8>");
            let _ = writeln!(out);
            part += 1;
            lines_in_part = 0;
        }
        let _ = writeln!(out, "/ac \"{}\" <wait.3>", action.name());
        lines_in_part += 1;
    }
    out
}

/// Renders the action chain as a plain list, one name per line.
pub fn render_action_list(arena: &StateArena, leaf: StateHandle) -> String {
    let mut out = String::new();
    for action in arena.path_actions(leaf) {
        let _ = writeln!(out, "  {}", action.name());
    }
    out
}

fn ratio(numerator: i32, denominator: i32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Active effects as a compact `[Name:count, ...]` tag, stack counts
/// for the stackable effects and turn charges for the rest.
pub fn render_active_effects(state: &GameState) -> String {
    let mut out = String::from("[");
    let mut first = true;
    for effect in Effect::ALL {
        let slot = state.effects[effect as usize];
        let count = if effect.is_stackable() {
            slot.stacks
        } else {
            slot.charges
        };
        if count == 0 {
            continue;
        }
        if !first {
            out.push_str(", ");
        }
        let _ = write!(out, "{}:{}", effect.name(), count);
        first = false;
    }
    out.push(']');
    out
}

/// Numeric summary of a state: resources against their caps, search
/// statistics and the per-CP / per-durability efficiency ratios.
pub fn render_summary(ctx: &GameContext, arena: &StateArena, handle: StateHandle) -> String {
    let node = arena.get(handle);
    let action = node
        .used_action
        .map(|a| a.name())
        .unwrap_or("initial state");
    let mut out = String::new();
    let _ = writeln!(
        out,
        "step {}: [{}] p: {}/{}, q: {}/{}, d: {}/{}, cp: {}/{},",
        node.step,
        action,
        node.progress,
        ctx.target_progress,
        node.quality,
        ctx.target_quality,
        node.durability,
        ctx.max_durability,
        node.cp,
        ctx.max_cp,
    );
    let _ = writeln!(
        out,
        "\teffects: {}",
        render_active_effects(node)
    );
    let _ = writeln!(
        out,
        "\tvisits: {}, score: {:.6}, max_score: {:.6}, wd: {},",
        node.n_visits, node.score, node.max_score, node.wasted_durability,
    );
    let _ = writeln!(
        out,
        "\tp/cp: {:.3}, p/d: {:.3}, q/cp: {:.3}, q/d: {:.3}",
        ratio(node.progress, node.cp_used_on_progress),
        ratio(node.progress, node.durability_used_on_progress),
        ratio(node.quality, node.cp_used_on_quality),
        ratio(node.quality, node.durability_used_on_quality),
    );
    out
}

/// A 50-block progress bar with a percentage and absolute counts.
pub fn render_progress_bar(value: usize, total: usize) -> String {
    const BLOCKS: usize = 50;
    let ratio = if total == 0 {
        0.0
    } else {
        value as f64 / total as f64
    };
    let filled = (ratio * BLOCKS as f64) as usize;
    let mut out = String::with_capacity(BLOCKS + 24);
    out.push('[');
    for i in 0..BLOCKS {
        out.push(if i < filled { '#' } else { ' ' });
    }
    let _ = write!(out, "] {}%, {}/{}", (ratio * 100.0) as usize, value, total);
    out
}
