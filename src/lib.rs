//! # macroforge
//!
//! A Monte Carlo Tree Search solver that forges crafting macros: given
//! a recipe context (progress and quality targets, CP and durability
//! budgets, per-action base increments) it searches for a bounded
//! action sequence that completes the craft and maximizes final
//! quality.
//!
//! The search runs over a deterministic game-state tree held in a
//! fixed-capacity arena. Each iteration selects a frontier node by a
//! UCT score extended with a max-score term, expands one heuristically
//! chosen child, simulates one weighted-random playout and
//! backpropagates the playout score up the parent chain; subtrees
//! proven unable to beat the best recorded leaf are pruned.
//!
//! ## Basic usage
//!
//! ```no_run
//! use macroforge::{output, GameContext, Search, SearchConfig};
//!
//! fn main() -> macroforge::Result<()> {
//!     let ctx = GameContext::reference();
//!     let config = SearchConfig::default()
//!         .with_iterations(100_000)
//!         .with_seed(7);
//!
//!     let mut search = Search::new(ctx, config)?;
//!     let outcome = search.run()?;
//!
//!     println!("{}", output::render_macro(search.arena(), outcome.chosen_leaf));
//!     println!("{}", outcome.stats.summary());
//!     Ok(())
//! }
//! ```
//!
//! Rollouts are driven either by the built-in heuristic weighting rules
//! or by a learned action-pair table
//! ([`WeightTable`]) that can be persisted between runs. Identical
//! context, configuration and seed reproduce a search exactly.

pub mod actions;
pub mod arena;
pub mod best;
pub mod config;
pub mod effects;
pub mod mcts;
pub mod output;
pub mod policy;
pub mod score;
pub mod state;
pub mod stats;
pub mod transition;
pub mod weight_table;

pub use actions::{Action, ActionDef, ActionResult, ACTION_COUNT};
pub use arena::{StateArena, StateHandle};
pub use config::{GameContext, SearchConfig};
pub use effects::{Effect, EffectState};
pub use mcts::{Search, SearchOutcome};
pub use score::score_state;
pub use state::GameState;
pub use stats::SearchStats;
pub use transition::{execute_action, execute_sequence};
pub use weight_table::WeightTable;

/// Error type for solver sessions.
#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    /// The state arena ran out of slots where one was required.
    #[error("state arena exhausted")]
    ArenaExhausted,

    /// A configuration parameter was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Weight-table file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
