//! Game-state tree nodes
//!
//! [`GameState`] is both a snapshot of the craft after some action
//! sequence and a node of the search tree: it carries the resource
//! counters, the active effects, the cost-accounting fields feeding the
//! scorer, and the visit/score statistics used by the tree search.
//! Nodes live in the [`StateArena`](crate::arena::StateArena) and link
//! to their parent by handle.

use crate::actions::Action;
use crate::arena::StateHandle;
use crate::config::GameContext;
use crate::effects::{Effect, EffectState, EFFECT_COUNT, INNER_QUIET_CAP};

/// Set of catalog actions, packed into a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u32);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0 |= 1 << action.index();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & (1 << action.index()) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// One node of the search tree.
#[derive(Debug)]
pub struct GameState {
    /// Handle of the parent node; `None` at the root.
    pub parent: Option<StateHandle>,

    pub progress: i32,
    pub quality: i32,
    /// May dip below zero on the craft-ending action.
    pub durability: i32,
    pub cp: i32,

    /// Number of actions taken from the root to reach this state.
    pub step: i32,
    /// The action that produced this state; `None` at the root.
    pub used_action: Option<Action>,

    /// Charge/stack counters, indexed by `Effect as usize`.
    pub effects: [EffectState; EFFECT_COUNT],
    /// Trained Perfection is usable once per craft.
    pub trained_perfection_charges: i32,

    /// CP spent on progress-only actions along this branch.
    pub cp_used_on_progress: i32,
    /// Durability spent on progress-only actions along this branch.
    pub durability_used_on_progress: i32,
    pub cp_used_on_quality: i32,
    pub durability_used_on_quality: i32,
    /// Durability restored past the cap or burned under Waste Not,
    /// tracked as an advisory score input.
    pub wasted_durability: i32,

    /// Sum of rollout scores backpropagated through this node.
    pub score: f64,
    /// Best single rollout score seen in this subtree.
    pub max_score: f64,
    pub sum_of_squared_score: f64,
    pub n_visits: u64,

    /// Child handles, in expansion order.
    pub children: Vec<StateHandle>,
    /// Actions that have ever produced a child of this node.
    pub actions_expanded: ActionSet,
    /// Remaining legal unexpanded actions; `None` until first counted.
    pub n_possible_moves: Option<u32>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            parent: None,
            progress: 0,
            quality: 0,
            durability: 0,
            cp: 0,
            step: 0,
            used_action: None,
            effects: [EffectState::default(); EFFECT_COUNT],
            trained_perfection_charges: 1,
            cp_used_on_progress: 0,
            durability_used_on_progress: 0,
            cp_used_on_quality: 0,
            durability_used_on_quality: 0,
            wasted_durability: 0,
            score: 0.0,
            max_score: 0.0,
            sum_of_squared_score: 0.0,
            n_visits: 0,
            children: Vec::new(),
            actions_expanded: ActionSet::default(),
            n_possible_moves: None,
        }
    }
}

impl GameState {
    /// The initial craft state for a recipe context.
    pub fn new_root(ctx: &GameContext) -> Self {
        GameState {
            durability: ctx.max_durability,
            cp: ctx.max_cp,
            ..GameState::default()
        }
    }

    /// Copy of the craft and accounting fields with fresh tree links.
    ///
    /// Search statistics are carried over so the arena can decide
    /// whether to keep them; `children` is left empty without cloning
    /// the source's allocation.
    pub fn detached_copy(&self) -> Self {
        GameState {
            parent: None,
            progress: self.progress,
            quality: self.quality,
            durability: self.durability,
            cp: self.cp,
            step: self.step,
            used_action: self.used_action,
            effects: self.effects,
            trained_perfection_charges: self.trained_perfection_charges,
            cp_used_on_progress: self.cp_used_on_progress,
            durability_used_on_progress: self.durability_used_on_progress,
            cp_used_on_quality: self.cp_used_on_quality,
            durability_used_on_quality: self.durability_used_on_quality,
            wasted_durability: self.wasted_durability,
            score: self.score,
            max_score: self.max_score,
            sum_of_squared_score: self.sum_of_squared_score,
            n_visits: self.n_visits,
            children: Vec::new(),
            actions_expanded: ActionSet::default(),
            n_possible_moves: None,
        }
    }

    /// Overwrites this slot with a copy of `other`, resetting all tree
    /// links and, unless `keep_score`, the search statistics. The
    /// existing `children` allocation is retained.
    pub fn inherit_from(&mut self, other: &GameState, keep_score: bool) {
        self.parent = None;
        self.progress = other.progress;
        self.quality = other.quality;
        self.durability = other.durability;
        self.cp = other.cp;
        self.step = other.step;
        self.used_action = other.used_action;
        self.effects = other.effects;
        self.trained_perfection_charges = other.trained_perfection_charges;
        self.cp_used_on_progress = other.cp_used_on_progress;
        self.durability_used_on_progress = other.durability_used_on_progress;
        self.cp_used_on_quality = other.cp_used_on_quality;
        self.durability_used_on_quality = other.durability_used_on_quality;
        self.wasted_durability = other.wasted_durability;
        if keep_score {
            self.score = other.score;
            self.max_score = other.max_score;
            self.sum_of_squared_score = other.sum_of_squared_score;
            self.n_visits = other.n_visits;
        } else {
            self.score = 0.0;
            self.max_score = 0.0;
            self.sum_of_squared_score = 0.0;
            self.n_visits = 0;
        }
        self.children.clear();
        self.actions_expanded.clear();
        self.n_possible_moves = None;
    }

    /// Remaining turns the effect is active.
    pub fn charges(&self, effect: Effect) -> u16 {
        self.effects[effect as usize].charges
    }

    /// Current stack count of the effect.
    pub fn stacks(&self, effect: Effect) -> u16 {
        self.effects[effect as usize].stacks
    }

    pub fn set_stacks(&mut self, effect: Effect, stacks: u16) {
        self.effects[effect as usize].stacks = stacks;
    }

    /// Adds one Inner Quiet stack, saturating at the cap.
    pub fn add_inner_quiet(&mut self) {
        let slot = &mut self.effects[Effect::InnerQuiet as usize];
        slot.stacks = (slot.stacks + 1).min(INNER_QUIET_CAP);
    }

    /// Applies an action's effect grant. Inner Quiet always increments
    /// its stack count instead of overwriting the slot.
    pub fn apply_effect(&mut self, effect: Effect, charges: u16, stacks: u16) {
        if effect == Effect::InnerQuiet {
            self.add_inner_quiet();
        } else {
            let slot = &mut self.effects[effect as usize];
            slot.charges = charges;
            slot.stacks = stacks;
        }
    }

    /// The craft is over: completed, or failed by running out of
    /// durability.
    pub fn is_terminal(&self, ctx: &GameContext) -> bool {
        self.durability <= 0 || self.progress >= ctx.target_progress
    }

    /// Progress target reached.
    pub fn is_finished(&self, ctx: &GameContext) -> bool {
        self.progress >= ctx.target_progress
    }
}
