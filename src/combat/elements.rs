//! Character types and the type-advantage cycle
//!
//! Canonical cycle: STR -> PHY -> INT -> TEQ -> AGL -> STR.
//! A type beats the two types that follow it in the cycle and loses to the
//! two that precede it, so every ordered pair of distinct types has a winner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{ADVANTAGE_NEUTRAL, ADVANTAGE_STRONG, ADVANTAGE_WEAK};

/// The five elemental character types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterType {
    #[serde(rename = "STR")]
    Str,
    #[serde(rename = "AGL")]
    Agl,
    #[serde(rename = "TEQ")]
    Teq,
    #[serde(rename = "INT")]
    Int,
    #[serde(rename = "PHY")]
    Phy,
}

impl CharacterType {
    /// All types in cycle order
    pub const CYCLE: [CharacterType; 5] = [
        CharacterType::Str,
        CharacterType::Phy,
        CharacterType::Int,
        CharacterType::Teq,
        CharacterType::Agl,
    ];

    fn cycle_index(self) -> usize {
        match self {
            CharacterType::Str => 0,
            CharacterType::Phy => 1,
            CharacterType::Int => 2,
            CharacterType::Teq => 3,
            CharacterType::Agl => 4,
        }
    }

    /// Does this type have the advantage over `other`?
    pub fn beats(self, other: CharacterType) -> bool {
        let len = Self::CYCLE.len();
        let offset = (other.cycle_index() + len - self.cycle_index()) % len;
        offset == 1 || offset == 2
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CharacterType::Str => "STR",
            CharacterType::Agl => "AGL",
            CharacterType::Teq => "TEQ",
            CharacterType::Int => "INT",
            CharacterType::Phy => "PHY",
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STR" => Ok(CharacterType::Str),
            "AGL" => Ok(CharacterType::Agl),
            "TEQ" => Ok(CharacterType::Teq),
            "INT" => Ok(CharacterType::Int),
            "PHY" => Ok(CharacterType::Phy),
            other => Err(format!("unknown character type '{}'", other)),
        }
    }
}

/// Damage multiplier for `attacker` hitting `defender`
///
/// Returns 1.5 when the attacker has the advantage, 0.5 when the defender
/// does, 1.0 for the same type.
pub fn type_advantage(attacker: CharacterType, defender: CharacterType) -> f64 {
    if attacker == defender {
        ADVANTAGE_NEUTRAL
    } else if attacker.beats(defender) {
        ADVANTAGE_STRONG
    } else {
        ADVANTAGE_WEAK
    }
}
