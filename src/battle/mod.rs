//! Battle system - turn resolution and orchestration
//!
//! Each action: validate -> damage -> apply to the defender's team ->
//! cooldowns -> log -> victory check.
//!
//! Key properties:
//! - Every update produces a new state; a rejected action changes nothing
//! - Characters are addressed by side and id, never across teams
//! - Autoplay is a step machine; pacing and pause/stop sit on top of it

pub mod action;
pub mod ai;
pub mod autoplay;
pub mod resolution;
pub mod session;
pub mod state;
pub mod store;

// Re-exports for convenient access
pub use action::{ActionKind, BattleAction};
pub use ai::{choose_ability, choose_target, BattleAi, RandomAi};
pub use autoplay::{
    run_autoplay, AutoplayControls, BattleObserver, InstantPacer, LogRecorder, Pacer, TokioPacer,
};
pub use resolution::{resolve_action, Resolution};
pub use session::{BattleSession, StepOutcome};
pub use state::{check_battle_end, start_battle, BattlePhase, BattleState, BattleSummary, Survivor};
pub use store::{apply_damage, decrement_all_cooldowns, replace_member, set_cooldown};
