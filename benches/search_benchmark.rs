#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion};

use macroforge::{
    execute_action, Action, GameContext, GameState, Search, SearchConfig, StateArena,
};

fn bench_transition(c: &mut Criterion) {
    let ctx = GameContext::reference();

    c.bench_function("execute_action", |b| {
        let mut arena = StateArena::with_capacity(1 << 20);
        let root = arena.create_root(GameState::new_root(&ctx)).unwrap();
        b.iter(|| {
            let child = execute_action(&ctx, &mut arena, root, black_box(Action::MuscleMemory))
                .unwrap();
            arena.free(child);
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let ctx = GameContext {
        target_progress: 1500,
        ..GameContext::reference()
    };

    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for iterations in [500usize, 2_000] {
        let config = SearchConfig::default()
            .with_arena_capacity(1 << 20)
            .with_iterations(iterations)
            .with_max_steps(12)
            .with_seed(7);

        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut search = Search::new(ctx, config.clone()).unwrap();
                    black_box(search.run().unwrap());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_transition, bench_search);
criterion_main!(benches);
