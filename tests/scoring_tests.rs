use macroforge::best::BestLeaf;
use macroforge::score::{effective_cp_per_durability, score_state};
use macroforge::{GameContext, GameState, StateArena};

fn reference_ctx() -> GameContext {
    GameContext::reference()
}

fn finished_state(ctx: &GameContext, quality: i32, step: i32) -> GameState {
    GameState {
        progress: ctx.target_progress,
        quality,
        durability: 5,
        cp: 40,
        step,
        cp_used_on_progress: 200,
        durability_used_on_progress: 30,
        cp_used_on_quality: 250,
        durability_used_on_quality: 60,
        ..GameState::default()
    }
}

#[test]
fn test_durability_is_priced_at_the_cheaper_mend() {
    let ctx = reference_ctx();
    // 112 CP / 60 durability beats 88 CP / 30 durability.
    let expected = 112.0 / 60.0;
    assert!((effective_cp_per_durability(&ctx) - expected).abs() < 1e-12);
}

#[test]
fn test_unfinished_states_score_zero() {
    let ctx = reference_ctx();
    let mut state = finished_state(&ctx, 16500, 20);
    state.progress = ctx.target_progress - 1;

    assert_eq!(score_state(&ctx, &state), 0.0);
}

#[test]
fn test_score_matches_intended_formula() {
    let ctx = reference_ctx();
    let state = finished_state(&ctx, 8250, 20);

    let virtual_cp = 200.0 + (112.0 / 60.0) * 30.0;
    let ppcp_ratio = (7500.0 / virtual_cp) / (7500.0 / 598.0);
    let q_score: f64 = 8250.0 / 16500.0;
    let expected = q_score * q_score * ppcp_ratio;

    assert!((score_state(&ctx, &state) - expected).abs() < 1e-9);
}

#[test]
fn test_quality_accounting_does_not_change_the_score() {
    // Regression for the intended formula: only the progress-side
    // efficiency enters the score, so quality-side CP accounting must
    // not move it.
    let ctx = reference_ctx();
    let a = finished_state(&ctx, 8250, 20);
    let mut b = finished_state(&ctx, 8250, 20);
    b.cp_used_on_quality = 0;
    b.durability_used_on_quality = 0;

    assert_eq!(score_state(&ctx, &a), score_state(&ctx, &b));
}

#[test]
fn test_quality_dominates_the_score() {
    let ctx = reference_ctx();
    let low = finished_state(&ctx, 8000, 20);
    let high = finished_state(&ctx, 12000, 20);

    assert!(score_state(&ctx, &high) > score_state(&ctx, &low));
}

#[test]
fn test_quality_is_capped_at_the_target() {
    let ctx = reference_ctx();
    let capped = finished_state(&ctx, ctx.target_quality, 20);
    let over = finished_state(&ctx, ctx.target_quality + 4000, 20);

    assert_eq!(score_state(&ctx, &capped), score_state(&ctx, &over));
}

#[test]
fn test_cheaper_progress_scores_higher() {
    let ctx = reference_ctx();
    let expensive = finished_state(&ctx, 8250, 20);
    let mut cheap = finished_state(&ctx, 8250, 20);
    cheap.cp_used_on_progress = 100;

    assert!(score_state(&ctx, &cheap) > score_state(&ctx, &expensive));
}

#[test]
fn test_scorer_is_pure() {
    let ctx = reference_ctx();
    let state = finished_state(&ctx, 9000, 18);
    assert_eq!(score_state(&ctx, &state), score_state(&ctx, &state));
}

#[test]
fn test_best_leaf_prefers_finished_over_progress() {
    let ctx = reference_ctx();
    let mut arena = StateArena::with_capacity(64);
    let mut best = BestLeaf::new();

    let mut unfinished = finished_state(&ctx, 0, 10);
    unfinished.progress = 4000;
    let unfinished = arena.create_root(unfinished).unwrap();
    assert!(best.offer(&mut arena, &ctx, unfinished));

    // More progress replaces an unfinished incumbent.
    let mut further = finished_state(&ctx, 0, 11);
    further.progress = 5000;
    let further = arena.create_root(further).unwrap();
    assert!(best.offer(&mut arena, &ctx, further));

    // Less progress does not.
    let mut less = finished_state(&ctx, 0, 9);
    less.progress = 3000;
    let less = arena.create_root(less).unwrap();
    assert!(!best.offer(&mut arena, &ctx, less));

    // A finished craft always replaces an unfinished one.
    let finished = arena.create_root(finished_state(&ctx, 100, 20)).unwrap();
    assert!(best.offer(&mut arena, &ctx, finished));

    // And an unfinished craft never replaces a finished one.
    let mut late = finished_state(&ctx, 12000, 8);
    late.progress = 7000;
    let late = arena.create_root(late).unwrap();
    assert!(!best.offer(&mut arena, &ctx, late));
}

#[test]
fn test_best_leaf_prefers_quality_then_fewer_steps() {
    let ctx = reference_ctx();
    let mut arena = StateArena::with_capacity(64);
    let mut best = BestLeaf::new();

    let base = arena.create_root(finished_state(&ctx, 9000, 22)).unwrap();
    assert!(best.offer(&mut arena, &ctx, base));

    let better = arena.create_root(finished_state(&ctx, 9500, 23)).unwrap();
    assert!(best.offer(&mut arena, &ctx, better));

    let worse = arena.create_root(finished_state(&ctx, 9200, 12)).unwrap();
    assert!(!best.offer(&mut arena, &ctx, worse));

    // Equal quality: the shorter sequence wins.
    let shorter = arena.create_root(finished_state(&ctx, 9500, 21)).unwrap();
    assert!(best.offer(&mut arena, &ctx, shorter));
    let longer = arena.create_root(finished_state(&ctx, 9500, 24)).unwrap();
    assert!(!best.offer(&mut arena, &ctx, longer));
}

#[test]
fn test_best_leaf_owns_an_isolated_copy() {
    let ctx = reference_ctx();
    let mut arena = StateArena::with_capacity(64);
    let mut best = BestLeaf::new();

    let candidate = arena.create_root(finished_state(&ctx, 9000, 22)).unwrap();
    assert!(best.offer(&mut arena, &ctx, candidate));

    let tracked = best.handle().unwrap();
    assert_ne!(tracked, candidate);

    // Mutating the original candidate leaves the record untouched.
    arena.get_mut(candidate).quality = 0;
    assert_eq!(arena.get(tracked).quality, 9000);
    assert_eq!(best.finished_quality(&arena, &ctx), Some(9000));
}
