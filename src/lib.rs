//! Team Battle - turn-based combat resolution for two teams of characters
//!
//! The engine is pure state transitions: damage, type advantage, cooldowns,
//! health and victory checks. Presentation lives outside and drives it through
//! [`battle::start_battle`], [`battle::resolve_action`] and [`battle::run_autoplay`].

pub mod battle;
pub mod combat;
pub mod core;
pub mod roster;
