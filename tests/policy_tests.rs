use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use macroforge::policy::weights::{
    assign_action_weights, assign_weights_manual, select_best_action, select_random_action,
};
use macroforge::{Action, Effect, GameContext, GameState, WeightTable, ACTION_COUNT};

fn reference_ctx() -> GameContext {
    GameContext::reference()
}

fn uniform_weights() -> [f32; ACTION_COUNT] {
    [1.0; ACTION_COUNT]
}

#[test]
fn test_first_step_allows_only_muscle_memory_and_reflect() {
    let ctx = reference_ctx();
    let state = GameState::new_root(&ctx);
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    for action in Action::ALL {
        let weight = weights[action.index()];
        if action == Action::MuscleMemory || action == Action::Reflect {
            assert!(weight > 0.0, "{} should stay playable", action.name());
        } else {
            assert_eq!(weight, 0.0, "{} should be zeroed on step 0", action.name());
        }
    }
}

#[test]
fn test_final_appraisal_is_never_weighted() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 5;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::FinalAppraisal.index()], 0.0);
}

#[test]
fn test_only_the_cheaper_mend_is_weighted() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 5;
    state.durability = 10;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    // For 70 durability, Immaculate Mend (112/60) beats Master's Mend
    // (88/30) and Master's Mend is dropped; with 60 missing and current
    // durability under 16 Immaculate Mend stays live.
    assert_eq!(weights[Action::MastersMend.index()], 0.0);
    assert!(weights[Action::ImmaculateMend.index()] > 0.0);
}

#[test]
fn test_basic_touch_combo_boosts_standard_touch() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 3;
    state.used_action = Some(Action::BasicTouch);
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::BasicTouch.index()], 0.0);
    assert_eq!(weights[Action::StandardTouch.index()], 2.0);
}

#[test]
fn test_standard_touch_combo_boosts_advanced_touch() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 4;
    state.used_action = Some(Action::StandardTouch);
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::AdvancedTouch.index()], 2.0);
    assert_eq!(weights[Action::StandardTouch.index()], 0.0);
    assert_eq!(weights[Action::Observe.index()], 0.0);
}

#[test]
fn test_waste_not_active_zeroes_both_waste_nots() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 2;
    state.effects[Effect::WasteNot as usize].charges = 3;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::WasteNot.index()], 0.0);
    assert_eq!(weights[Action::WasteNotII.index()], 0.0);
}

#[test]
fn test_byregots_blessing_needs_full_inner_quiet() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 6;
    state.effects[Effect::InnerQuiet as usize].stacks = 9;
    let mut weights = uniform_weights();
    assign_weights_manual(&ctx, &state, &mut weights);
    assert_eq!(weights[Action::ByregotsBlessing.index()], 0.0);

    state.effects[Effect::InnerQuiet as usize].stacks = 10;
    let mut weights = uniform_weights();
    assign_weights_manual(&ctx, &state, &mut weights);
    assert_eq!(weights[Action::ByregotsBlessing.index()], 1.5);
    assert_eq!(weights[Action::GreatStrides.index()], 1.5);
}

#[test]
fn test_veneration_boosts_synthesis_and_suppresses_buff_stacking() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 2;
    state.effects[Effect::Veneration as usize].charges = 3;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::Veneration.index()], 0.0);
    assert_eq!(weights[Action::Innovation.index()], 0.0);
    assert_eq!(weights[Action::Groundwork.index()], 1.5);
    assert_eq!(weights[Action::CarefulSynthesis.index()], 1.5);
    assert_eq!(weights[Action::BasicTouch.index()], 1.0);
}

#[test]
fn test_innovation_boosts_quality_actions() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 8;
    state.effects[Effect::Innovation as usize].charges = 3;
    state.effects[Effect::InnerQuiet as usize].stacks = 10;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::Innovation.index()], 0.0);
    assert_eq!(weights[Action::Veneration.index()], 0.0);
    assert_eq!(weights[Action::BasicTouch.index()], 1.5);
    assert_eq!(weights[Action::TrainedFinesse.index()], 1.5);
    assert_eq!(weights[Action::DelicateSynthesis.index()], 1.5);
    assert_eq!(weights[Action::BasicSynthesis.index()], 1.0);
    // Byregot's gets its own 1.3, on top of the full-stack 1.5.
    let byregot = weights[Action::ByregotsBlessing.index()];
    assert!((byregot - 1.5 * 1.3).abs() < 1e-6);
}

#[test]
fn test_muscle_memory_boosts_veneration_and_groundwork() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 1;
    state.effects[Effect::MuscleMemory as usize].charges = 4;
    let mut weights = uniform_weights();

    assign_weights_manual(&ctx, &state, &mut weights);

    assert_eq!(weights[Action::Veneration.index()], 1.5);
    assert_eq!(weights[Action::Groundwork.index()], 1.5);
}

#[test]
fn test_trained_perfection_weighting() {
    let ctx = reference_ctx();
    let mut state = GameState::new_root(&ctx);
    state.step = 2;
    let mut weights = uniform_weights();
    assign_weights_manual(&ctx, &state, &mut weights);
    assert_eq!(weights[Action::TrainedPerfection.index()], 1.5);

    state.trained_perfection_charges = 0;
    let mut weights = uniform_weights();
    assign_weights_manual(&ctx, &state, &mut weights);
    assert_eq!(weights[Action::TrainedPerfection.index()], 0.0);

    // While the free-durability charge is armed, the heavy hitters get
    // a boost.
    state.trained_perfection_charges = 0;
    state.effects[Effect::TrainedPerfection as usize].stacks = 1;
    let mut weights = uniform_weights();
    assign_weights_manual(&ctx, &state, &mut weights);
    assert_eq!(weights[Action::Groundwork.index()], 1.5);
    assert_eq!(weights[Action::PreparatoryTouch.index()], 1.5);
}

#[test]
fn test_select_best_action_prefers_highest_weight() {
    let mut weights = [0.0f32; ACTION_COUNT];
    weights[Action::Groundwork.index()] = 0.5;
    weights[Action::BasicTouch.index()] = 2.0;

    assert_eq!(select_best_action(&weights), Some(Action::BasicTouch));
}

#[test]
fn test_selectors_return_none_on_all_zero() {
    let weights = [0.0f32; ACTION_COUNT];
    assert_eq!(select_best_action(&weights), None);

    let mut rng = XorShiftRng::seed_from_u64(1);
    assert_eq!(select_random_action(&mut rng, &weights), None);
}

#[test]
fn test_random_selection_respects_zero_weights() {
    let mut weights = [0.0f32; ACTION_COUNT];
    weights[Action::MuscleMemory.index()] = 1.0;
    weights[Action::Reflect.index()] = 1.0;

    let mut rng = XorShiftRng::seed_from_u64(99);
    for _ in 0..64 {
        let drawn = select_random_action(&mut rng, &weights).unwrap();
        assert!(drawn == Action::MuscleMemory || drawn == Action::Reflect);
    }
}

#[test]
fn test_table_backend_scales_by_previous_action() {
    let mut ctx = reference_ctx();
    ctx.use_weight_table = true;

    let mut table = WeightTable::new();
    table.set(Action::BasicSynthesis, Action::CarefulSynthesis, 2.0);

    let mut state = GameState::new_root(&ctx);
    state.step = 1;
    state.used_action = Some(Action::BasicSynthesis);

    let mut weights = uniform_weights();
    assign_action_weights(&ctx, Some(&table), &state, &mut weights);

    for action in Action::ALL {
        let expected = if action == Action::CarefulSynthesis {
            2.0
        } else {
            0.0
        };
        assert_eq!(weights[action.index()], expected, "{}", action.name());
    }
}

#[test]
fn test_table_backend_seeds_first_step() {
    let mut ctx = reference_ctx();
    ctx.use_weight_table = true;

    let table = WeightTable::new();
    let state = GameState::new_root(&ctx);
    let mut weights = uniform_weights();
    assign_action_weights(&ctx, Some(&table), &state, &mut weights);

    assert_eq!(weights[Action::MuscleMemory.index()], 1.0);
    assert_eq!(weights[Action::Reflect.index()], 1.0);
    assert_eq!(weights[Action::BasicSynthesis.index()], 0.0);
}
