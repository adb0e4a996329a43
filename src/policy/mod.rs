//! Action-weighting and playout policies
//!
//! The rollout policy assigns a non-negative weight to every catalog
//! action for a given state, then either draws a weighted random sample
//! (playouts) or takes the argmax (expansion). Two weighting back-ends
//! exist: the manual heuristic rules and the learned action-pair table.

pub mod rollout;
pub mod weights;

pub use rollout::run_playout;
pub use weights::{assign_action_weights, select_best_action, select_random_action};
