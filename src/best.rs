//! Best-leaf tracking
//!
//! A single record of the best terminal sequence discovered so far.
//! The tracker owns an isolated deep copy of the winning branch so it
//! survives subtree pruning; only strict improvements under the
//! preference order replace it.

use log::{debug, error};

use crate::arena::{StateArena, StateHandle};
use crate::config::GameContext;

/// The best terminal state seen so far, with its full action chain.
#[derive(Debug, Default)]
pub struct BestLeaf {
    handle: Option<StateHandle>,
}

impl BestLeaf {
    pub fn new() -> Self {
        BestLeaf { handle: None }
    }

    /// Handle of the tracked leaf copy, if any terminal was recorded.
    pub fn handle(&self) -> Option<StateHandle> {
        self.handle
    }

    /// Quality of the incumbent, provided it finished the craft.
    pub fn finished_quality(&self, arena: &StateArena, ctx: &GameContext) -> Option<i32> {
        let node = arena.get(self.handle?);
        node.is_finished(ctx).then_some(node.quality)
    }

    /// Offers a candidate terminal. The candidate replaces the
    /// incumbent only on a strict improvement, in order of preference:
    ///
    /// 1. an unfinished incumbent loses to more progress (a finished
    ///    candidate always has more),
    /// 2. among finished crafts, higher quality wins,
    /// 3. at equal quality, fewer steps win.
    ///
    /// Returns whether the candidate was adopted.
    pub fn offer(
        &mut self,
        arena: &mut StateArena,
        ctx: &GameContext,
        candidate: StateHandle,
    ) -> bool {
        let replace = match self.handle {
            None => true,
            Some(incumbent) => {
                let (b_progress, b_quality, b_step) = {
                    let node = arena.get(incumbent);
                    (node.progress, node.quality, node.step)
                };
                let cand = arena.get(candidate);
                if b_progress < ctx.target_progress {
                    cand.progress > b_progress || cand.progress >= ctx.target_progress
                } else if cand.progress < ctx.target_progress {
                    false
                } else if cand.quality != b_quality {
                    cand.quality > b_quality
                } else {
                    cand.step < b_step
                }
            }
        };
        if !replace {
            return false;
        }

        if let Some(incumbent) = self.handle.take() {
            arena.free_branch(incumbent);
        }
        self.handle = arena.copy_branch(candidate, true);
        match self.handle {
            Some(handle) => {
                let node = arena.get(handle);
                debug!(
                    "best leaf: step {} progress {} quality {} durability {} cp {}",
                    node.step, node.progress, node.quality, node.durability, node.cp
                );
                true
            }
            None => {
                error!("arena exhausted while copying the best branch; record lost");
                false
            }
        }
    }
}
