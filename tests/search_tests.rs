use macroforge::{output, Action, GameContext, Search, SearchConfig};

/// A short recipe the rollouts can finish quickly: two or three
/// synthesis actions complete it.
fn easy_ctx() -> GameContext {
    GameContext {
        target_progress: 1500,
        ..GameContext::reference()
    }
}

fn small_config() -> SearchConfig {
    SearchConfig::default()
        .with_arena_capacity(200_000)
        .with_iterations(2_000)
        .with_max_steps(12)
        .with_seed(7)
}

#[test]
fn test_search_finds_a_finished_craft() {
    let mut search = Search::new(easy_ctx(), small_config()).unwrap();
    let outcome = search.run().unwrap();

    let best = outcome.best_leaf.expect("an easy craft should finish");
    let node = search.arena().get(best);
    assert!(node.progress >= easy_ctx().target_progress);
    assert!(node.step as usize == search.arena().branch_len(best) - 1);
}

#[test]
fn test_chosen_path_starts_with_an_opening_move() {
    let mut search = Search::new(easy_ctx(), small_config()).unwrap();
    let outcome = search.run().unwrap();

    let path = search.arena().path_actions(outcome.chosen_leaf);
    assert!(!path.is_empty());
    assert!(path[0] == Action::MuscleMemory || path[0] == Action::Reflect);
    assert!(path.len() <= 12);
}

#[test]
fn test_search_is_reproducible_for_a_fixed_seed() {
    let mut first = Search::new(easy_ctx(), small_config()).unwrap();
    let first_outcome = first.run().unwrap();

    let mut second = Search::new(easy_ctx(), small_config()).unwrap();
    let second_outcome = second.run().unwrap();

    assert_eq!(
        first.arena().path_actions(first_outcome.chosen_leaf),
        second.arena().path_actions(second_outcome.chosen_leaf)
    );
    let first_best = first_outcome.best_leaf.map(|h| first.arena().get(h).quality);
    let second_best = second_outcome
        .best_leaf
        .map(|h| second.arena().get(h).quality);
    assert_eq!(first_best, second_best);
}

#[test]
fn test_different_seeds_may_search_differently_but_stay_valid() {
    let mut search = Search::new(easy_ctx(), small_config().with_seed(1234)).unwrap();
    let outcome = search.run().unwrap();

    // Whatever the rollouts did, every emitted invariant must hold.
    let path = search.arena().path_actions(outcome.chosen_leaf);
    assert!(path.len() <= 12);
    if let Some(best) = outcome.best_leaf {
        assert!(search.arena().get(best).progress >= easy_ctx().target_progress);
    }
}

#[test]
fn test_stats_are_collected() {
    let mut search = Search::new(easy_ctx(), small_config()).unwrap();
    let outcome = search.run().unwrap();

    assert!(outcome.stats.iterations > 0);
    assert!(outcome.stats.iterations <= 2_000);
    assert!(outcome.stats.playouts > 0);
    assert!(outcome.stats.live_states > 0);
    assert!(outcome.stats.useless_selection_ratio() <= 1.0);
    assert!(!outcome.stats.summary().is_empty());
}

#[test]
fn test_children_record_their_expanding_action() {
    let mut search = Search::new(easy_ctx(), small_config().with_iterations(200)).unwrap();
    let outcome = search.run().unwrap();

    // Walk the chosen chain: every node must be registered in its
    // parent's expanded-action set.
    let arena = search.arena();
    let mut cursor = Some(outcome.chosen_leaf);
    while let Some(handle) = cursor {
        let node = arena.get(handle);
        if let (Some(parent), Some(action)) = (node.parent, node.used_action) {
            assert!(arena.get(parent).actions_expanded.contains(action));
            assert!(arena.get(parent).children.contains(&handle));
        }
        cursor = node.parent;
    }
}

#[test]
fn test_writing_the_weight_table_records_transitions() {
    let ctx = GameContext {
        write_weight_table: true,
        ..easy_ctx()
    };
    let mut search = Search::new(ctx, small_config()).unwrap();
    search.run().unwrap();

    let mut total = 0.0f32;
    for prev in Action::ALL {
        for next in Action::ALL {
            total += search.weight_table().get(prev, next);
        }
    }
    assert!(total > 0.0, "finished playouts should have scored edges");
}

#[test]
fn test_macro_rendering_matches_the_game_format() {
    let mut search = Search::new(easy_ctx(), small_config()).unwrap();
    let outcome = search.run().unwrap();

    let text = output::render_macro(search.arena(), outcome.chosen_leaf);
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("/ac \""));
    assert!(first.ends_with("<wait.3>"));

    let summary = output::render_summary(search.context(), search.arena(), outcome.chosen_leaf);
    assert!(summary.contains("step"));
    assert!(summary.contains("visits"));
}

#[test]
fn test_invalid_configurations_are_rejected() {
    let err = Search::new(easy_ctx(), small_config().with_arena_capacity(0));
    assert!(err.is_err());

    let err = Search::new(easy_ctx(), small_config().with_max_steps(0));
    assert!(err.is_err());
}
