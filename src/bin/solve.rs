//! Command-line entrypoint: solve a recipe and print the macro.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use macroforge::{output, GameContext, Search, SearchConfig};

#[derive(Parser, Debug)]
#[command(
    name = "solve",
    about = "Search for a crafting macro that completes a recipe and maximizes quality"
)]
struct Args {
    /// Progress added by a 100%-efficiency progress action.
    #[arg(long, default_value_t = 259)]
    base_progress: i32,

    /// Quality added by a 100%-efficiency quality action.
    #[arg(long, default_value_t = 256)]
    base_quality: i32,

    /// Crafting Points budget.
    #[arg(long, default_value_t = 598)]
    max_cp: i32,

    /// Progress required to complete the craft.
    #[arg(long, default_value_t = 7500)]
    target_progress: i32,

    /// Quality ceiling for score normalization.
    #[arg(long, default_value_t = 16500)]
    target_quality: i32,

    /// Starting and maximum durability.
    #[arg(long, default_value_t = 70)]
    max_durability: i32,

    /// Search iteration budget.
    #[arg(long, default_value_t = 200_000)]
    iterations: usize,

    /// Maximum number of actions in the emitted sequence.
    #[arg(long, default_value_t = 26)]
    max_steps: i32,

    /// Number of pre-allocated state slots.
    #[arg(long, default_value_t = 8_000_000)]
    arena_capacity: usize,

    /// UCT exploration constant.
    #[arg(long, default_value_t = 3.0)]
    exploration: f64,

    /// Blend weight of the best rollout score in the exploitation term.
    #[arg(long, default_value_t = 0.3)]
    max_score_weight: f64,

    /// Rollout seed; rerunning with the same seed reproduces the search.
    #[arg(long, default_value_t = 0xF1F0_CAFE)]
    seed: u64,

    /// Action-pair weight table file to load before the search (and to
    /// save to with --write-weight-table).
    #[arg(long)]
    weight_table: Option<PathBuf>,

    /// Drive rollouts with the loaded weight table instead of the
    /// manual heuristic.
    #[arg(long)]
    use_weight_table: bool,

    /// Record transition scores into the table during the search and
    /// save it afterwards.
    #[arg(long)]
    write_weight_table: bool,
}

fn run(args: Args) -> macroforge::Result<()> {
    let ctx = GameContext {
        base_progress_increase: args.base_progress,
        base_quality_increase: args.base_quality,
        max_cp: args.max_cp,
        target_progress: args.target_progress,
        target_quality: args.target_quality,
        max_durability: args.max_durability,
        use_weight_table: args.use_weight_table,
        write_weight_table: args.write_weight_table,
    };
    let config = SearchConfig::default()
        .with_arena_capacity(args.arena_capacity)
        .with_iterations(args.iterations)
        .with_max_steps(args.max_steps)
        .with_exploration_constant(args.exploration)
        .with_max_score_weight(args.max_score_weight)
        .with_seed(args.seed);

    let mut search = Search::new(ctx, config)?;

    if let Some(path) = &args.weight_table {
        if search.weight_table_mut().load(path)? {
            info!("loaded weight table from {}", path.display());
        } else {
            info!("no weight table at {}, starting blank", path.display());
        }
    }

    let outcome = search.run()?;

    println!("================ chosen path ================");
    println!("{}", output::render_macro(search.arena(), outcome.chosen_leaf));
    print!(
        "{}",
        output::render_summary(search.context(), search.arena(), outcome.chosen_leaf)
    );

    if let Some(best) = outcome.best_leaf {
        println!("================ best finished craft ================");
        println!("{}", output::render_macro(search.arena(), best));
        print!(
            "{}",
            output::render_summary(search.context(), search.arena(), best)
        );
    }

    println!();
    println!("{}", outcome.stats.summary());

    if args.write_weight_table {
        if let Some(path) = &args.weight_table {
            search.weight_table().save(path)?;
            info!("saved weight table to {}", path.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
