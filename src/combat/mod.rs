//! Combatants and the pure damage math between them
//!
//! Nothing here knows about turns or battles. Characters and teams are plain
//! values; damage is a deterministic function of two characters, their team
//! leaders' skills and an optional special ability.

pub mod character;
pub mod constants;
pub mod damage;
pub mod elements;
pub mod team;

pub use character::{Character, Skill, SkillEffect, SpecialAbility, Stats};
pub use damage::{calculate_damage, damage_breakdown, DamageBreakdown};
pub use elements::{type_advantage, CharacterType};
pub use team::Team;
