//! Fixed-capacity state pool
//!
//! All tree nodes live in one flat arena and are addressed by dense
//! [`StateHandle`] indices. Freed slots go onto a free list and are
//! reused before the high-water mark advances. The arena never grows
//! past its initial capacity: when it is exhausted, node creation
//! returns `None` and the caller treats that as an action failure.
//!
//! The arena does not own the tree shape. Freeing a node does not free
//! its children; the search driver prunes subtrees explicitly, and the
//! branch helpers here only walk parent chains.

use crate::actions::Action;
use crate::state::GameState;

/// Dense index of a node in the arena.
///
/// Two handles are equal exactly when they index the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHandle(u32);

impl StateHandle {
    /// Slot index of this handle.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Flat pool of [`GameState`] nodes with free-list reuse.
pub struct StateArena {
    nodes: Vec<GameState>,
    free: Vec<StateHandle>,
    live: usize,
}

impl StateArena {
    /// Creates an arena that can hold up to `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        StateArena {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    fn take_slot(&mut self) -> Option<StateHandle> {
        if let Some(handle) = self.free.pop() {
            return Some(handle);
        }
        if self.nodes.len() == self.nodes.capacity() {
            return None;
        }
        self.nodes.push(GameState::default());
        Some(StateHandle(self.nodes.len() as u32 - 1))
    }

    /// Places `state` into a fresh slot. Used for the root node.
    pub fn create_root(&mut self, state: GameState) -> Option<StateHandle> {
        let handle = self.take_slot()?;
        self.nodes[handle.index()] = state;
        self.live += 1;
        Some(handle)
    }

    /// Allocates a copy of `src` with fresh tree links, preferring the
    /// free list. Search statistics are carried over only when
    /// `keep_score` is set. Returns `None` when the arena is exhausted.
    pub fn create_from(&mut self, src: StateHandle, keep_score: bool) -> Option<StateHandle> {
        let template = self.nodes[src.index()].detached_copy();
        let handle = self.take_slot()?;
        self.nodes[handle.index()].inherit_from(&template, keep_score);
        self.live += 1;
        Some(handle)
    }

    /// Returns the slot to the free list. Children are not touched.
    pub fn free(&mut self, handle: StateHandle) {
        debug_assert!(handle.index() < self.nodes.len());
        self.live -= 1;
        self.free.push(handle);
    }

    /// Number of nodes currently allocated.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn get(&self, handle: StateHandle) -> &GameState {
        &self.nodes[handle.index()]
    }

    pub fn get_mut(&mut self, handle: StateHandle) -> &mut GameState {
        &mut self.nodes[handle.index()]
    }

    /// Frees every node on the parent chain from `leaf` to the root of
    /// its branch.
    pub fn free_branch(&mut self, leaf: StateHandle) {
        let mut cursor = Some(leaf);
        while let Some(handle) = cursor {
            cursor = self.get(handle).parent;
            self.free(handle);
        }
    }

    /// Deep-copies the parent chain from `leaf` up to its root into an
    /// isolated branch (no children, no links into the source tree) and
    /// returns the handle of the leaf copy.
    ///
    /// On arena exhaustion the partial copy is freed and `None` is
    /// returned.
    pub fn copy_branch(&mut self, leaf: StateHandle, keep_score: bool) -> Option<StateHandle> {
        let mut source = Some(leaf);
        let mut head: Option<StateHandle> = None;
        let mut prev_copy: Option<StateHandle> = None;
        while let Some(src) = source {
            let next = self.get(src).parent;
            let Some(copy) = self.create_from(src, keep_score) else {
                if let Some(head) = head {
                    self.free_branch(head);
                }
                return None;
            };
            match prev_copy {
                Some(prev) => self.get_mut(prev).parent = Some(copy),
                None => head = Some(copy),
            }
            prev_copy = Some(copy);
            source = next;
        }
        head
    }

    /// The action sequence from the branch root to `leaf`.
    pub fn path_actions(&self, leaf: StateHandle) -> Vec<Action> {
        let mut sequence = Vec::new();
        let mut cursor = Some(leaf);
        while let Some(handle) = cursor {
            let node = self.get(handle);
            if let Some(action) = node.used_action {
                sequence.push(action);
            }
            cursor = node.parent;
        }
        sequence.reverse();
        sequence
    }

    /// Number of nodes on the parent chain from `leaf` to its root.
    pub fn branch_len(&self, leaf: StateHandle) -> usize {
        let mut count = 0;
        let mut cursor = Some(leaf);
        while let Some(handle) = cursor {
            count += 1;
            cursor = self.get(handle).parent;
        }
        count
    }
}
