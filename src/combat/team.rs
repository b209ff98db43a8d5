//! Teams: an ordered line-up of characters under one leader

use serde::{Deserialize, Serialize};

use crate::combat::character::{Character, Skill};
use crate::core::error::{BattleError, Result};
use crate::core::types::{CharacterId, Side};

/// One side's line-up
///
/// The leader is stored by id, so replacing a member never leaves a stale
/// copy of the leader behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub side: Side,
    pub characters: Vec<Character>,
    pub leader: CharacterId,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        side: Side,
        characters: Vec<Character>,
        leader: impl Into<CharacterId>,
    ) -> Self {
        Self {
            id: id.into(),
            side,
            characters,
            leader: leader.into(),
        }
    }

    /// Team led by its first member
    pub fn led_by_first(id: impl Into<String>, side: Side, characters: Vec<Character>) -> Self {
        let leader = characters
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| CharacterId::new(""));
        Self::new(id, side, characters, leader)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn leader_character(&self) -> Option<&Character> {
        self.get(&self.leader)
    }

    /// Leader skill that applies to every member of this team
    pub fn leader_skill(&self) -> Option<&Skill> {
        self.leader_character().and_then(|c| c.leader_skill.as_ref())
    }

    /// Members still standing, in roster order
    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| c.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    /// A team is defeated when every member is at zero health
    pub fn is_defeated(&self) -> bool {
        self.characters.iter().all(|c| !c.is_alive())
    }

    /// Check the line-up before a battle starts
    pub fn validate(&self) -> Result<()> {
        if self.characters.is_empty() {
            return Err(BattleError::configuration(format!(
                "{} team '{}' has no characters",
                self.side, self.id
            )));
        }

        if self.get(&self.leader).is_none() {
            return Err(BattleError::configuration(format!(
                "leader '{}' is not a member of {} team '{}'",
                self.leader, self.side, self.id
            )));
        }

        for (i, character) in self.characters.iter().enumerate() {
            if self.characters[..i].iter().any(|c| c.id == character.id) {
                return Err(BattleError::configuration(format!(
                    "{} team '{}' lists '{}' more than once",
                    self.side, self.id, character.id
                )));
            }
            character.validate()?;
        }

        Ok(())
    }
}
