//! Characters, their abilities and skills
//!
//! A character is built once from roster data and then only ever replaced by
//! updated copies (damage taken, cooldowns changed). It is never removed from
//! its team: a defeated character stays with `current_health == 0`.

use serde::{Deserialize, Serialize};

use crate::combat::constants::NEUTRAL_MULTIPLIER;
use crate::combat::elements::CharacterType;
use crate::core::error::{BattleError, Result};
use crate::core::types::CharacterId;

/// Base stats from the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub speed: u32,
}

impl Stats {
    pub fn new(attack: u32, defense: u32, max_health: u32) -> Self {
        Self {
            attack,
            defense,
            max_health,
            speed: 100,
        }
    }
}

fn neutral() -> f64 {
    NEUTRAL_MULTIPLIER
}

/// Stat multipliers granted by a skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillEffect {
    #[serde(default = "neutral")]
    pub attack: f64,
    #[serde(default = "neutral")]
    pub defense: f64,
    /// Carried from roster data; the engine does not scale health
    #[serde(default = "neutral")]
    pub health: f64,
}

impl Default for SkillEffect {
    fn default() -> Self {
        Self {
            attack: NEUTRAL_MULTIPLIER,
            defense: NEUTRAL_MULTIPLIER,
            health: NEUTRAL_MULTIPLIER,
        }
    }
}

/// A leader or passive skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: SkillEffect,
}

impl Skill {
    pub fn new(name: impl Into<String>, attack: f64, defense: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            effect: SkillEffect {
                attack,
                defense,
                health: NEUTRAL_MULTIPLIER,
            },
        }
    }

    fn validate(&self, owner: &CharacterId) -> Result<()> {
        for (label, value) in [
            ("attack", self.effect.attack),
            ("defense", self.effect.defense),
            ("health", self.effect.health),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BattleError::configuration(format!(
                    "skill '{}' of '{}' has invalid {} multiplier {}",
                    self.name, owner, label, value
                )));
            }
        }
        Ok(())
    }
}

/// A special ability with a cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub damage_multiplier: f64,
    /// Rounds the ability stays unusable after being cast
    pub cooldown: u32,
    #[serde(default)]
    pub current_cooldown: u32,
}

impl SpecialAbility {
    pub fn new(name: impl Into<String>, damage_multiplier: f64, cooldown: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            damage_multiplier,
            cooldown,
            current_cooldown: 0,
        }
    }

    /// Can the ability be used right now?
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// A combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(rename = "type")]
    pub character_type: CharacterType,
    pub stats: Stats,
    pub current_health: u32,
    #[serde(default)]
    pub abilities: Vec<SpecialAbility>,
    #[serde(default)]
    pub leader_skill: Option<Skill>,
    #[serde(default)]
    pub passive_skill: Option<Skill>,
}

impl Character {
    /// Create a character at full health with no abilities or skills
    pub fn new(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        character_type: CharacterType,
        stats: Stats,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            character_type,
            stats,
            current_health: stats.max_health,
            abilities: Vec::new(),
            leader_skill: None,
            passive_skill: None,
        }
    }

    pub fn with_ability(mut self, ability: SpecialAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_leader_skill(mut self, skill: Skill) -> Self {
        self.leader_skill = Some(skill);
        self
    }

    pub fn with_passive_skill(mut self, skill: Skill) -> Self {
        self.passive_skill = Some(skill);
        self
    }

    pub fn with_health(mut self, current_health: u32) -> Self {
        self.current_health = current_health;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Indices of abilities that are off cooldown
    pub fn ready_abilities(&self) -> Vec<usize> {
        self.abilities
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_ready())
            .map(|(i, _)| i)
            .collect()
    }

    /// Check roster data for values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.current_health > self.stats.max_health {
            return Err(BattleError::configuration(format!(
                "'{}' has current health {} above max health {}",
                self.id, self.current_health, self.stats.max_health
            )));
        }

        for ability in &self.abilities {
            if !ability.damage_multiplier.is_finite() || ability.damage_multiplier <= 0.0 {
                return Err(BattleError::configuration(format!(
                    "ability '{}' of '{}' has invalid damage multiplier {}",
                    ability.name, self.id, ability.damage_multiplier
                )));
            }
            if ability.current_cooldown > ability.cooldown {
                return Err(BattleError::configuration(format!(
                    "ability '{}' of '{}' has current cooldown {} above its cooldown {}",
                    ability.name, self.id, ability.current_cooldown, ability.cooldown
                )));
            }
        }

        if let Some(skill) = &self.leader_skill {
            skill.validate(&self.id)?;
        }
        if let Some(skill) = &self.passive_skill {
            skill.validate(&self.id)?;
        }

        Ok(())
    }

    /// Test character: plain STR fighter
    #[cfg(test)]
    pub fn test_fighter(id: &str) -> Self {
        Self::new(id, id, CharacterType::Str, Stats::new(100, 10, 200))
            .with_ability(SpecialAbility::new("Heavy Blow", 2.0, 3))
    }
}
