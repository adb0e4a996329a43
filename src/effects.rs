//! Active-craft effects and their per-state bookkeeping
//!
//! Effects are timed or stacked modifiers on the craft in progress. The
//! enum only identifies them; the mutable charge/stack counters live on
//! each [`GameState`](crate::state::GameState), and the once-per-turn
//! charge decrement happens uniformly inside the transition function.

/// Identifier for an active-craft effect.
///
/// The discriminants are dense so the per-state effect table can be a
/// plain fixed-size array indexed by `effect as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Effect {
    /// Stacking quality amplifier, one stack per touch action, capped at 10.
    InnerQuiet = 0,
    /// Halves durability costs while charged. Waste Not II refreshes the
    /// same slot with more charges.
    WasteNot,
    /// +50% progress while charged.
    Veneration,
    /// +100% quality on the next quality action, then cleared.
    GreatStrides,
    /// +50% quality while charged.
    Innovation,
    /// Caps progress at one short of the target while charged.
    FinalAppraisal,
    /// +100% progress on the next progress action, then cleared.
    MuscleMemory,
    /// Restores 5 durability at the end of every other action.
    Manipulation,
    /// The next durability-costing action is free.
    TrainedPerfection,
}

/// Number of effect slots on every game state.
pub const EFFECT_COUNT: usize = 9;

/// Inner Quiet never stacks past this.
pub const INNER_QUIET_CAP: u16 = 10;

impl Effect {
    /// All effects, in slot order.
    pub const ALL: [Effect; EFFECT_COUNT] = [
        Effect::InnerQuiet,
        Effect::WasteNot,
        Effect::Veneration,
        Effect::GreatStrides,
        Effect::Innovation,
        Effect::FinalAppraisal,
        Effect::MuscleMemory,
        Effect::Manipulation,
        Effect::TrainedPerfection,
    ];

    /// Display name, as it appears in game tooltips.
    pub fn name(self) -> &'static str {
        match self {
            Effect::InnerQuiet => "Inner Quiet",
            Effect::WasteNot => "Waste Not",
            Effect::Veneration => "Veneration",
            Effect::GreatStrides => "Great Strides",
            Effect::Innovation => "Innovation",
            Effect::FinalAppraisal => "Final Appraisal",
            Effect::MuscleMemory => "Muscle Memory",
            Effect::Manipulation => "Manipulation",
            Effect::TrainedPerfection => "Trained Perfection",
        }
    }

    /// Whether the effect counts stacks rather than turn charges.
    pub fn is_stackable(self) -> bool {
        matches!(self, Effect::InnerQuiet | Effect::TrainedPerfection)
    }
}

/// Charge and stack counters for one effect slot.
///
/// `charges` is the number of remaining turns the effect is active;
/// `stacks` is a counter with a per-effect cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectState {
    pub stacks: u16,
    pub charges: u16,
}
