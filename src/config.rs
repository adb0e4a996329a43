//! Configuration for a solver session
//!
//! [`GameContext`] describes the recipe being solved and never changes
//! during a search. [`SearchConfig`] carries the tunable search
//! parameters; use the builder methods to customize it.

/// The recipe context: targets, caps and per-action base increments.
///
/// Created once before the search and referenced read-only throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameContext {
    /// Progress added by a 100%-efficiency progress action.
    pub base_progress_increase: i32,
    /// Quality added by a 100%-efficiency quality action.
    pub base_quality_increase: i32,

    /// Crafting Points budget.
    pub max_cp: i32,
    /// Progress at which the craft completes.
    pub target_progress: i32,
    /// Quality ceiling used for score normalization.
    pub target_quality: i32,
    /// Starting and maximum durability.
    pub max_durability: i32,

    /// Weight rollouts with the learned action-pair table instead of the
    /// manual heuristic rules.
    pub use_weight_table: bool,
    /// Record max-score-seen-on-transition updates into the action-pair
    /// table during backpropagation.
    pub write_weight_table: bool,
}

impl GameContext {
    /// Context for the reference recipe (Grade 2 Gemdraught of Intelligence).
    pub fn reference() -> Self {
        GameContext {
            base_progress_increase: 259,
            base_quality_increase: 256,
            max_cp: 598,
            target_progress: 7500,
            target_quality: 16500,
            max_durability: 70,
            use_weight_table: false,
            write_weight_table: false,
        }
    }
}

/// Parameters controlling the Monte Carlo tree search.
///
/// # Example
///
/// ```
/// use macroforge::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_iterations(500_000)
///     .with_exploration_constant(2.5)
///     .with_max_score_weight(0.5)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of state slots pre-allocated in the arena. The search never
    /// allocates past this; an exhausted arena fails expansions instead.
    pub arena_capacity: usize,

    /// Iteration budget: one select/expand/simulate/backpropagate round
    /// per iteration.
    pub iterations: usize,

    /// Hard cap on the number of actions in any sequence, matching the
    /// in-game macro length the caller is willing to execute.
    pub max_steps: i32,

    /// Exploration constant `C` in the UCT formula. Higher values favor
    /// less-visited subtrees.
    pub exploration_constant: f64,

    /// Blend factor in `[0, 1]` between a child's best rollout score
    /// (weight 1) and its mean rollout score (weight 0) in the
    /// exploitation term.
    pub max_score_weight: f64,

    /// `D` constant of the optional single-player variance term. `None`
    /// leaves the term out of the UCT score.
    pub single_player_bias: Option<f64>,

    /// Seed for the rollout generator. Identical context, budget, policy
    /// and seed reproduce the search exactly.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            arena_capacity: 8_000_000,
            iterations: 200_000,
            max_steps: 26,
            exploration_constant: 3.0,
            max_score_weight: 0.3,
            single_player_bias: None,
            seed: 0xF1F0_CAFE,
        }
    }
}

impl SearchConfig {
    /// Sets the arena capacity.
    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the step cap.
    pub fn with_max_steps(mut self, max_steps: i32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the exploration constant.
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the max-score blend weight, clamped to `[0, 1]`.
    pub fn with_max_score_weight(mut self, weight: f64) -> Self {
        self.max_score_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Enables the single-player variance term with the given `D`.
    pub fn with_single_player_bias(mut self, bias: f64) -> Self {
        self.single_player_bias = Some(bias);
        self
    }

    /// Sets the rollout seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
