//! The Monte Carlo tree search driver
//!
//! [`Search`] owns every shared resource of one solver session: the
//! state arena, the recipe context, the action-pair weight table, the
//! best-leaf tracker, the rollout generator and the statistics. Each
//! iteration runs the classic four phases — select a frontier node by
//! UCT, expand exactly one heuristically chosen child, simulate one
//! weighted-random playout, backpropagate the playout score up the
//! parent chain — and prunes subtrees proven unable to beat the best
//! recorded leaf.

use std::time::{Duration, Instant};

use log::{info, warn};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::actions::{Action, ACTION_COUNT};
use crate::arena::{StateArena, StateHandle};
use crate::best::BestLeaf;
use crate::config::{GameContext, SearchConfig};
use crate::output;
use crate::policy::rollout::run_playout;
use crate::policy::weights::{assign_action_weights, select_best_action};
use crate::score::score_state;
use crate::state::GameState;
use crate::stats::SearchStats;
use crate::transition::execute_action;
use crate::weight_table::WeightTable;
use crate::{Result, SolverError};

/// Result of a finished search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Leaf reached by the final exploitation-only descent from the
    /// root; the emitted macro follows its parent chain.
    pub chosen_leaf: StateHandle,

    /// The best-leaf tracker's record, if any playout finished the
    /// craft.
    pub best_leaf: Option<StateHandle>,

    /// Counters and timing for the run.
    pub stats: SearchStats,
}

/// One solver session over a fixed recipe context.
pub struct Search {
    ctx: GameContext,
    config: SearchConfig,
    arena: StateArena,
    table: WeightTable,
    best: BestLeaf,
    rng: XorShiftRng,
    stats: SearchStats,
    root: StateHandle,
}

impl Search {
    /// Creates a session with a fresh root state.
    pub fn new(ctx: GameContext, config: SearchConfig) -> Result<Self> {
        if config.arena_capacity == 0 {
            return Err(SolverError::InvalidConfiguration(
                "arena capacity must be positive".into(),
            ));
        }
        if config.max_steps <= 0 {
            return Err(SolverError::InvalidConfiguration(
                "step cap must be positive".into(),
            ));
        }
        let mut arena = StateArena::with_capacity(config.arena_capacity);
        let root = arena
            .create_root(GameState::new_root(&ctx))
            .ok_or(SolverError::ArenaExhausted)?;
        Ok(Search {
            rng: XorShiftRng::seed_from_u64(config.seed),
            ctx,
            config,
            arena,
            table: WeightTable::new(),
            best: BestLeaf::new(),
            stats: SearchStats::new(),
            root,
        })
    }

    /// The recipe context of this session.
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Read access to the node pool, for rendering results.
    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    /// The action-pair weight table, for loading a learned table before
    /// the run or saving it afterwards.
    pub fn weight_table(&self) -> &WeightTable {
        &self.table
    }

    pub fn weight_table_mut(&mut self) -> &mut WeightTable {
        &mut self.table
    }

    /// Runs the search for the configured iteration budget and emits
    /// the best path found.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        let start = Instant::now();
        let mut last_report = Instant::now();

        for iteration in 0..self.config.iterations {
            self.stats.iterations = iteration + 1;

            let Some(selected) = self.select(self.root) else {
                warn!(
                    "search space exhausted after {} iterations",
                    self.stats.iterations
                );
                break;
            };

            if last_report.elapsed() >= Duration::from_secs(1) {
                last_report = Instant::now();
                self.report_progress(iteration, selected);
            }

            if self.arena.get(selected).durability <= 0 {
                self.stats.useless_selections += 1;
                continue;
            }

            if !self.expand_and_simulate(selected) {
                self.stats.useless_selections += 1;
            }
        }

        self.stats.total_time = start.elapsed();
        self.stats.live_states = self.arena.live_count();
        info!(
            "search done: {} iterations, {} playouts, {} live states",
            self.stats.iterations, self.stats.playouts, self.stats.live_states
        );

        let chosen_leaf = self.exploit_descent();
        Ok(SearchOutcome {
            chosen_leaf,
            best_leaf: self.best.handle(),
            stats: self.stats.clone(),
        })
    }

    /// UCT score of `child` under `parent`.
    ///
    /// The exploitation term blends the child's best rollout score with
    /// its mean by `max_score_weight`; the exploration term is the
    /// UCB1 bonus scaled by `exploration`. While exploring, an
    /// unvisited child always wins.
    fn uct(&self, parent: StateHandle, child: StateHandle, exploration: f64, max_weight: f64) -> f64 {
        let parent = self.arena.get(parent);
        let child = self.arena.get(child);

        if child.n_visits == 0 && exploration > 0.0 {
            return f64::INFINITY;
        }

        let average = if child.n_visits == 0 {
            0.0
        } else {
            child.score / child.n_visits as f64
        };
        let exploitation = max_weight * child.max_score + (1.0 - max_weight) * average;
        let explore = if exploration > 0.0 {
            exploration * ((parent.n_visits as f64).ln() / child.n_visits as f64).sqrt()
        } else {
            0.0
        };
        let mut uct = exploitation + explore;

        if let Some(bias) = self.config.single_player_bias {
            let n = child.n_visits as f64;
            let spread =
                (child.sum_of_squared_score - n * child.max_score * child.max_score) / n + bias;
            uct += spread.max(0.0).sqrt();
        }

        uct
    }

    /// Descends from `handle` to a frontier node worth expanding.
    ///
    /// Children are tried in UCT order; a subtree that surfaces no
    /// useful leaf is removed from its parent and freed. A leaf is
    /// useless when it is fully expanded and either failed the craft or
    /// finished below the best recorded quality. Returns `None` when
    /// the whole subtree under `handle` is useless.
    fn select(&mut self, handle: StateHandle) -> Option<StateHandle> {
        self.arena.get_mut(handle).n_visits += 1;

        let node = self.arena.get(handle);
        if node.children.is_empty() && node.n_possible_moves == Some(0) {
            if node.progress < self.ctx.target_progress {
                return None;
            }
            if let Some(best_quality) = self.best.finished_quality(&self.arena, &self.ctx) {
                let node = self.arena.get(handle);
                if node.quality < best_quality {
                    return None;
                }
            }
        }

        let node = self.arena.get(handle);
        if node.children.is_empty() || node.n_possible_moves != Some(0) {
            return Some(handle);
        }

        let mut ranked: Vec<(f64, StateHandle)> = node
            .children
            .iter()
            .map(|&child| (0.0, child))
            .collect();
        for entry in ranked.iter_mut() {
            entry.0 = self.uct(
                handle,
                entry.1,
                self.config.exploration_constant,
                self.config.max_score_weight,
            );
        }
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, child) in ranked {
            if let Some(selected) = self.select(child) {
                return Some(selected);
            }
            let node = self.arena.get_mut(handle);
            if let Some(position) = node.children.iter().position(|&c| c == child) {
                node.children.remove(position);
            }
            self.arena.free(child);
            self.stats.pruned_nodes += 1;
        }

        None
    }

    /// Expands one child of `handle` by the heuristic argmax and
    /// simulates one playout from it. Returns whether an expansion
    /// happened.
    fn expand_and_simulate(&mut self, handle: StateHandle) -> bool {
        if self.arena.get(handle).step >= self.config.max_steps {
            self.arena.get_mut(handle).n_possible_moves = Some(0);
            return false;
        }

        // Candidate weights: 1.0, minus already-expanded actions,
        // infeasible transitions and transitions that kill the craft.
        let mut weights = [1.0f32; ACTION_COUNT];
        for action in Action::ALL {
            if self.arena.get(handle).actions_expanded.contains(action) {
                weights[action.index()] = 0.0;
                continue;
            }
            match execute_action(&self.ctx, &mut self.arena, handle, action) {
                None => weights[action.index()] = 0.0,
                Some(trial) => {
                    let state = self.arena.get(trial);
                    if state.durability <= 0 && state.progress < self.ctx.target_progress {
                        weights[action.index()] = 0.0;
                    }
                    self.arena.free(trial);
                }
            }
        }
        let table = self.ctx.use_weight_table.then_some(&self.table);
        assign_action_weights(&self.ctx, table, self.arena.get(handle), &mut weights);

        let Some(action) = select_best_action(&weights) else {
            self.arena.get_mut(handle).n_possible_moves = Some(0);
            return false;
        };
        let possible = weights.iter().filter(|&&w| w > 0.0).count() as u32;

        let Some(child) = execute_action(&self.ctx, &mut self.arena, handle, action) else {
            // Feasibility held a moment ago, so this is arena
            // exhaustion; give up on the action without a child.
            let node = self.arena.get_mut(handle);
            node.actions_expanded.insert(action);
            node.n_possible_moves = Some(possible.saturating_sub(1));
            return false;
        };

        let node = self.arena.get_mut(handle);
        node.children.push(child);
        node.actions_expanded.insert(action);
        node.n_possible_moves = Some(possible.saturating_sub(1));

        if self.arena.get(child).is_finished(&self.ctx) {
            self.best.offer(&mut self.arena, &self.ctx, child);
        }

        self.simulate(child);
        true
    }

    /// Runs one playout from the fresh child, scores its terminal and
    /// backpropagates the score along the whole chain.
    fn simulate(&mut self, child: StateHandle) {
        let table = self.ctx.use_weight_table.then_some(&self.table);
        let head = run_playout(
            &self.ctx,
            &mut self.arena,
            table,
            &mut self.rng,
            child,
            self.config.max_steps,
        );
        self.stats.playouts += 1;

        let Some(head) = head else {
            return;
        };

        let score = score_state(&self.ctx, self.arena.get(head));
        if self.arena.get(head).is_finished(&self.ctx) {
            self.best.offer(&mut self.arena, &self.ctx, head);
        }
        self.backpropagate(head, score, score, 0);
        self.arena.get_mut(child).n_visits += 1;
    }

    /// Accumulates a playout score on every node from `leaf` to the
    /// root, and records table updates along each edge when the
    /// write switch is on.
    fn backpropagate(&mut self, leaf: StateHandle, eval: f64, max_eval: f64, visits: u64) {
        let mut cursor = Some(leaf);
        while let Some(handle) = cursor {
            let node = self.arena.get_mut(handle);
            node.score += eval;
            if max_eval > node.max_score {
                node.max_score = max_eval;
            }
            node.sum_of_squared_score += eval * eval;
            node.n_visits += visits;

            let node_max = node.max_score;
            let used_action = node.used_action;
            let parent = node.parent;
            if self.ctx.write_weight_table {
                if let (Some(parent), Some(action)) = (parent, used_action) {
                    if let Some(prev) = self.arena.get(parent).used_action {
                        self.table.raise(prev, action, node_max as f32);
                    }
                }
            }
            cursor = parent;
        }
    }

    /// The final exploitation-only descent: no exploration term, pure
    /// max-score ranking, no pruning.
    fn exploit_descent(&mut self) -> StateHandle {
        let mut current = self.root;
        loop {
            self.arena.get_mut(current).n_visits += 1;
            let node = self.arena.get(current);
            if node.children.is_empty() || node.n_possible_moves != Some(0) {
                return current;
            }
            let children = node.children.clone();
            let mut best = children[0];
            let mut best_uct = f64::NEG_INFINITY;
            for child in children {
                let uct = self.uct(current, child, 0.0, 1.0);
                if uct >= best_uct {
                    best_uct = uct;
                    best = child;
                }
            }
            current = best;
        }
    }

    fn report_progress(&self, iteration: usize, selected: StateHandle) {
        println!(
            "{}",
            output::render_progress_bar(iteration, self.config.iterations)
        );
        let node = self.arena.get(selected);
        println!(
            "step {}: p: {}/{}, q: {}/{}, d: {}/{}, cp: {}/{}",
            node.step,
            node.progress,
            self.ctx.target_progress,
            node.quality,
            self.ctx.target_quality,
            node.durability,
            self.ctx.max_durability,
            node.cp,
            self.ctx.max_cp,
        );
    }
}
