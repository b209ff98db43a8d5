//! Battle actions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, Side};

/// What the attacker does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    Basic,
    Special { ability_index: usize },
}

/// One attack, chosen by a player or by the AI
///
/// The attacker is looked up on `side`, the defender on the opposing side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleAction {
    pub side: Side,
    pub attacker: CharacterId,
    pub defender: CharacterId,
    pub kind: ActionKind,
}

impl BattleAction {
    pub fn basic(side: Side, attacker: impl Into<CharacterId>, defender: impl Into<CharacterId>) -> Self {
        Self {
            side,
            attacker: attacker.into(),
            defender: defender.into(),
            kind: ActionKind::Basic,
        }
    }

    pub fn special(
        side: Side,
        attacker: impl Into<CharacterId>,
        defender: impl Into<CharacterId>,
        ability_index: usize,
    ) -> Self {
        Self {
            side,
            attacker: attacker.into(),
            defender: defender.into(),
            kind: ActionKind::Special { ability_index },
        }
    }

    pub fn ability_index(&self) -> Option<usize> {
        match self.kind {
            ActionKind::Basic => None,
            ActionKind::Special { ability_index } => Some(ability_index),
        }
    }
}

impl fmt::Display for BattleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Basic => write!(f, "{} {} -> {} (basic)", self.side, self.attacker, self.defender),
            ActionKind::Special { ability_index } => write!(
                f,
                "{} {} -> {} (special #{})",
                self.side, self.attacker, self.defender, ability_index
            ),
        }
    }
}
