//! The static action catalog
//!
//! Every action the solver may schedule lives in one constant table,
//! indexed by the dense [`Action`] enum. An entry carries the static
//! costs and efficiencies plus two behavior hooks: a gate deciding
//! whether the action applies in a given state, and an execute hook
//! producing the raw [`ActionResult`] before the transition function
//! applies effect multipliers and durability rules. The hooks are plain
//! function pointers so the whole catalog stays a `static` table.

use crate::config::GameContext;
use crate::effects::Effect;
use crate::state::GameState;

/// Flag bit: the action advances progress.
pub const ACTION_FLAG_SYNTHESIS: u32 = 0x01;
/// Flag bit: the action advances quality and feeds Inner Quiet.
pub const ACTION_FLAG_TOUCH: u32 = 0x02;
/// Flag bit: the action is a direct working action rather than a buff.
pub const ACTION_FLAG_ACTION: u32 = 0x04;

/// Dense identifier for every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Action {
    BasicSynthesis = 0,
    BasicTouch,
    MastersMend,
    Observe,
    WasteNot,
    Veneration,
    StandardTouch,
    GreatStrides,
    Innovation,
    FinalAppraisal,
    WasteNotII,
    ByregotsBlessing,
    MuscleMemory,
    CarefulSynthesis,
    Manipulation,
    PrudentTouch,
    AdvancedTouch,
    Reflect,
    PreparatoryTouch,
    Groundwork,
    DelicateSynthesis,
    PrudentSynthesis,
    TrainedFinesse,
    RefinedTouch,
    ImmaculateMend,
    TrainedPerfection,
}

/// Number of catalog entries.
pub const ACTION_COUNT: usize = 26;

impl Action {
    /// All actions in catalog order.
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::BasicSynthesis,
        Action::BasicTouch,
        Action::MastersMend,
        Action::Observe,
        Action::WasteNot,
        Action::Veneration,
        Action::StandardTouch,
        Action::GreatStrides,
        Action::Innovation,
        Action::FinalAppraisal,
        Action::WasteNotII,
        Action::ByregotsBlessing,
        Action::MuscleMemory,
        Action::CarefulSynthesis,
        Action::Manipulation,
        Action::PrudentTouch,
        Action::AdvancedTouch,
        Action::Reflect,
        Action::PreparatoryTouch,
        Action::Groundwork,
        Action::DelicateSynthesis,
        Action::PrudentSynthesis,
        Action::TrainedFinesse,
        Action::RefinedTouch,
        Action::ImmaculateMend,
        Action::TrainedPerfection,
    ];

    /// Catalog index of this action.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action for a catalog index, if in range.
    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }

    /// The catalog entry for this action.
    pub fn def(self) -> &'static ActionDef {
        &ACTIONS[self as usize]
    }

    /// Display name, as used in macro lines.
    pub fn name(self) -> &'static str {
        self.def().name
    }
}

/// Raw outcome of an action's execute hook, before the transition
/// function applies effect multipliers and durability modifiers.
///
/// A negative `durability_decrease` restores durability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionResult {
    pub progress_increase: f32,
    pub quality_increase: f32,
    pub durability_decrease: i32,
    pub cp_cost: i32,
}

/// Gate hook: can this action be taken from `state`?
///
/// Evaluated against the parent state, before any child is allocated.
pub type GateFn = fn(&GameContext, &GameState) -> bool;

/// Execute hook: compute the raw action result.
///
/// Receives the freshly copied child state (step already advanced,
/// `used_action` still the previous action, so combo checks read it
/// directly) and may mutate it for stack bookkeeping such as Byregot's
/// Blessing consuming Inner Quiet.
pub type ExecuteFn = fn(&GameContext, &ActionDef, &mut GameState) -> ActionResult;

/// One catalog entry.
pub struct ActionDef {
    pub name: &'static str,

    pub cp_cost: i32,
    pub durability_cost: i32,

    pub progress_efficiency: f32,
    pub quality_efficiency: f32,

    pub flags: u32,

    pub effect: Option<Effect>,
    pub effect_charges: u16,
    pub effect_stacks: u16,

    pub gate: GateFn,
    pub execute: ExecuteFn,
}

impl ActionDef {
    const fn new(
        name: &'static str,
        flags: u32,
        cp_cost: i32,
        durability_cost: i32,
        progress_efficiency: f32,
        quality_efficiency: f32,
    ) -> Self {
        ActionDef {
            name,
            cp_cost,
            durability_cost,
            progress_efficiency,
            quality_efficiency,
            flags,
            effect: None,
            effect_charges: 0,
            effect_stacks: 0,
            gate: gate_always,
            execute: execute_default,
        }
    }

    const fn with_effect(mut self, effect: Effect, charges: u16, stacks: u16) -> Self {
        self.effect = Some(effect);
        self.effect_charges = charges;
        self.effect_stacks = stacks;
        self
    }

    const fn with_gate(mut self, gate: GateFn) -> Self {
        self.gate = gate;
        self
    }

    const fn with_execute(mut self, execute: ExecuteFn) -> Self {
        self.execute = execute;
        self
    }

    pub fn is_synthesis(&self) -> bool {
        self.flags & ACTION_FLAG_SYNTHESIS != 0
    }

    pub fn is_touch(&self) -> bool {
        self.flags & ACTION_FLAG_TOUCH != 0
    }

    pub fn is_action(&self) -> bool {
        self.flags & ACTION_FLAG_ACTION != 0
    }
}

fn gate_always(_ctx: &GameContext, _state: &GameState) -> bool {
    true
}

fn execute_default(ctx: &GameContext, def: &ActionDef, _state: &mut GameState) -> ActionResult {
    ActionResult {
        progress_increase: ctx.base_progress_increase as f32 * def.progress_efficiency,
        quality_increase: ctx.base_quality_increase as f32 * def.quality_efficiency,
        durability_decrease: def.durability_cost,
        cp_cost: def.cp_cost,
    }
}

fn gate_first_step(_ctx: &GameContext, state: &GameState) -> bool {
    state.step == 0
}

fn gate_missing_durability(ctx: &GameContext, state: &GameState) -> bool {
    state.durability < ctx.max_durability
}

fn gate_waste_not_inactive(_ctx: &GameContext, state: &GameState) -> bool {
    state.charges(Effect::WasteNot) == 0
}

fn gate_inner_quiet_any(_ctx: &GameContext, state: &GameState) -> bool {
    state.stacks(Effect::InnerQuiet) > 0
}

fn gate_inner_quiet_full(_ctx: &GameContext, state: &GameState) -> bool {
    state.stacks(Effect::InnerQuiet) == 10
}

fn gate_trained_perfection_unused(_ctx: &GameContext, state: &GameState) -> bool {
    state.trained_perfection_charges > 0
}

fn gate_deep_missing_durability(ctx: &GameContext, state: &GameState) -> bool {
    ctx.max_durability - state.durability > 30
}

/// Standard Touch combos from Basic Touch for a discounted 18 CP.
fn execute_standard_touch(ctx: &GameContext, def: &ActionDef, state: &mut GameState) -> ActionResult {
    let cp_cost = if state.used_action == Some(Action::BasicTouch) {
        18
    } else {
        def.cp_cost
    };
    ActionResult {
        cp_cost,
        ..execute_default(ctx, def, state)
    }
}

/// Advanced Touch combos from Standard Touch or Observe for 18 CP.
fn execute_advanced_touch(ctx: &GameContext, def: &ActionDef, state: &mut GameState) -> ActionResult {
    let cp_cost = if matches!(
        state.used_action,
        Some(Action::StandardTouch) | Some(Action::Observe)
    ) {
        18
    } else {
        def.cp_cost
    };
    ActionResult {
        cp_cost,
        ..execute_default(ctx, def, state)
    }
}

/// Byregot's Blessing: 20% more quality per Inner Quiet stack, then all
/// stacks are consumed.
fn execute_byregots_blessing(
    ctx: &GameContext,
    def: &ActionDef,
    state: &mut GameState,
) -> ActionResult {
    let stacks = state.stacks(Effect::InnerQuiet);
    state.set_stacks(Effect::InnerQuiet, 0);
    ActionResult {
        progress_increase: 0.0,
        quality_increase: ctx.base_quality_increase as f32 * (1.0 + 0.2 * stacks as f32),
        durability_decrease: def.durability_cost,
        cp_cost: def.cp_cost,
    }
}

/// Groundwork costs half durability under Waste Not, and loses
/// efficiency proportionally when remaining durability cannot cover the
/// cost.
fn execute_groundwork(ctx: &GameContext, def: &ActionDef, state: &mut GameState) -> ActionResult {
    let mut durability_cost = def.durability_cost;
    if state.charges(Effect::WasteNot) > 0 {
        durability_cost /= 2;
    }
    let efficiency_mul = durability_cost.min(state.durability) as f32 / durability_cost as f32;
    ActionResult {
        progress_increase: ctx.base_progress_increase as f32
            * def.progress_efficiency
            * efficiency_mul,
        quality_increase: 0.0,
        durability_decrease: def.durability_cost,
        cp_cost: def.cp_cost,
    }
}

/// Refined Touch grants an extra Inner Quiet stack when comboed from
/// Basic Touch.
fn execute_refined_touch(ctx: &GameContext, def: &ActionDef, state: &mut GameState) -> ActionResult {
    if state.used_action == Some(Action::BasicTouch) {
        state.add_inner_quiet();
    }
    execute_default(ctx, def, state)
}

/// Immaculate Mend restores durability to full.
fn execute_immaculate_mend(
    ctx: &GameContext,
    def: &ActionDef,
    state: &mut GameState,
) -> ActionResult {
    ActionResult {
        progress_increase: 0.0,
        quality_increase: 0.0,
        durability_decrease: -(ctx.max_durability - state.durability),
        cp_cost: def.cp_cost,
    }
}

/// Trained Perfection spends its once-per-craft charge.
fn execute_trained_perfection(
    _ctx: &GameContext,
    def: &ActionDef,
    state: &mut GameState,
) -> ActionResult {
    state.trained_perfection_charges -= 1;
    ActionResult {
        progress_increase: 0.0,
        quality_increase: 0.0,
        durability_decrease: 0,
        cp_cost: def.cp_cost,
    }
}

/// The catalog, in [`Action`] order.
pub static ACTIONS: [ActionDef; ACTION_COUNT] = [
    ActionDef::new(
        "Basic Synthesis",
        ACTION_FLAG_ACTION | ACTION_FLAG_SYNTHESIS,
        0,
        10,
        1.2,
        0.0,
    ),
    ActionDef::new(
        "Basic Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        18,
        10,
        0.0,
        1.0,
    ),
    ActionDef::new("Master's Mend", 0, 88, -30, 0.0, 0.0).with_gate(gate_missing_durability),
    ActionDef::new("Observe", 0, 7, 0, 0.0, 0.0),
    ActionDef::new("Waste Not", 0, 56, 0, 0.0, 0.0).with_effect(Effect::WasteNot, 4, 0),
    ActionDef::new("Veneration", 0, 18, 0, 0.0, 0.0).with_effect(Effect::Veneration, 4, 0),
    ActionDef::new(
        "Standard Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        32,
        10,
        0.0,
        1.25,
    )
    .with_execute(execute_standard_touch),
    ActionDef::new("Great Strides", 0, 32, 0, 0.0, 0.0).with_effect(Effect::GreatStrides, 3, 0),
    ActionDef::new("Innovation", 0, 18, 0, 0.0, 0.0).with_effect(Effect::Innovation, 4, 0),
    ActionDef::new("Final Appraisal", 0, 1, 0, 0.0, 0.0).with_effect(Effect::FinalAppraisal, 5, 0),
    ActionDef::new("Waste Not II", 0, 98, 0, 0.0, 0.0).with_effect(Effect::WasteNot, 8, 0),
    ActionDef::new("Byregot's Blessing", ACTION_FLAG_ACTION, 24, 10, 0.0, 0.0)
        .with_gate(gate_inner_quiet_any)
        .with_execute(execute_byregots_blessing),
    ActionDef::new(
        "Muscle Memory",
        ACTION_FLAG_ACTION | ACTION_FLAG_SYNTHESIS,
        6,
        10,
        3.0,
        0.0,
    )
    .with_effect(Effect::MuscleMemory, 5, 0)
    .with_gate(gate_first_step),
    ActionDef::new(
        "Careful Synthesis",
        ACTION_FLAG_ACTION | ACTION_FLAG_SYNTHESIS,
        7,
        10,
        1.8,
        0.0,
    ),
    ActionDef::new("Manipulation", 0, 96, 0, 0.0, 0.0).with_effect(Effect::Manipulation, 8, 0),
    ActionDef::new(
        "Prudent Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        25,
        5,
        0.0,
        1.0,
    )
    .with_gate(gate_waste_not_inactive),
    ActionDef::new(
        "Advanced Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        46,
        10,
        0.0,
        1.5,
    )
    .with_execute(execute_advanced_touch),
    ActionDef::new(
        "Reflect",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        6,
        10,
        0.0,
        3.0,
    )
    .with_effect(Effect::InnerQuiet, 0, 1)
    .with_gate(gate_first_step),
    ActionDef::new(
        "Preparatory Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        40,
        20,
        0.0,
        2.0,
    )
    .with_effect(Effect::InnerQuiet, 0, 1),
    ActionDef::new(
        "Groundwork",
        ACTION_FLAG_ACTION | ACTION_FLAG_SYNTHESIS,
        18,
        20,
        3.6,
        0.0,
    )
    .with_execute(execute_groundwork),
    ActionDef::new(
        "Delicate Synthesis",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH | ACTION_FLAG_SYNTHESIS,
        32,
        10,
        1.5,
        1.0,
    ),
    ActionDef::new(
        "Prudent Synthesis",
        ACTION_FLAG_ACTION | ACTION_FLAG_SYNTHESIS,
        18,
        10,
        1.8,
        0.0,
    )
    .with_gate(gate_waste_not_inactive),
    ActionDef::new("Trained Finesse", ACTION_FLAG_ACTION, 32, 0, 0.0, 1.0)
        .with_gate(gate_inner_quiet_full),
    ActionDef::new(
        "Refined Touch",
        ACTION_FLAG_ACTION | ACTION_FLAG_TOUCH,
        24,
        10,
        0.0,
        1.0,
    )
    .with_execute(execute_refined_touch),
    ActionDef::new("Immaculate Mend", 0, 112, 0, 0.0, 0.0)
        .with_gate(gate_deep_missing_durability)
        .with_execute(execute_immaculate_mend),
    ActionDef::new("Trained Perfection", 0, 0, 0, 0.0, 0.0)
        .with_effect(Effect::TrainedPerfection, 0, 1)
        .with_gate(gate_trained_perfection_unused)
        .with_execute(execute_trained_perfection),
];
