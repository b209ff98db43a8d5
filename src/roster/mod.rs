//! Roster data loaded from TOML
//!
//! Stands in for the external roster provider: character definitions plus
//! prebuilt team line-ups. Files live under `data/rosters/{name}.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::combat::{Character, CharacterType, Skill, SpecialAbility, Stats, Team};
use crate::core::error::{BattleError, Result};
use crate::core::types::{CharacterId, Side};

/// Character as written in a roster file
///
/// `current_health` is optional and defaults to full health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: String,
    #[serde(rename = "type")]
    pub character_type: CharacterType,
    pub stats: Stats,
    #[serde(default)]
    pub current_health: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<SpecialAbility>,
    #[serde(default)]
    pub leader_skill: Option<Skill>,
    #[serde(default)]
    pub passive_skill: Option<Skill>,
}

impl CharacterDef {
    fn build(self) -> Character {
        let current_health = self.current_health.unwrap_or(self.stats.max_health);
        Character {
            id: self.id,
            name: self.name,
            character_type: self.character_type,
            stats: self.stats,
            current_health,
            abilities: self.abilities,
            leader_skill: self.leader_skill,
            passive_skill: self.passive_skill,
        }
    }
}

/// Prebuilt team line-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDef {
    pub id: String,
    pub side: Side,
    pub members: Vec<CharacterId>,
    pub leader: CharacterId,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    characters: Vec<CharacterDef>,
    #[serde(default)]
    teams: Vec<TeamDef>,
}

/// All known characters and team line-ups
#[derive(Debug, Clone)]
pub struct Roster {
    characters: Vec<Character>,
    teams: Vec<TeamDef>,
}

impl Roster {
    /// Parse and validate a roster
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: RosterFile = toml::from_str(contents)?;
        let characters: Vec<Character> = file.characters.into_iter().map(CharacterDef::build).collect();

        for (i, character) in characters.iter().enumerate() {
            if characters[..i].iter().any(|c| c.id == character.id) {
                return Err(BattleError::configuration(format!(
                    "roster defines '{}' more than once",
                    character.id
                )));
            }
            character.validate()?;
        }

        let roster = Self {
            characters,
            teams: file.teams,
        };

        // Every prebuilt line-up must resolve
        for def in &roster.teams {
            roster.build_team(def)?;
        }

        Ok(roster)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    fn build_team(&self, def: &TeamDef) -> Result<Team> {
        let characters = def
            .members
            .iter()
            .map(|id| {
                self.character(id).cloned().ok_or_else(|| {
                    BattleError::configuration(format!(
                        "team '{}' lists unknown character '{}'",
                        def.id, id
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let team = Team::new(def.id.clone(), def.side, characters, def.leader.clone());
        team.validate()?;
        Ok(team)
    }

    /// Build the prebuilt team with this id
    pub fn team(&self, id: &str) -> Result<Team> {
        let def = self
            .teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| BattleError::configuration(format!("roster has no team '{}'", id)))?;
        self.build_team(def)
    }

    /// Build the first prebuilt team fighting on `side`
    pub fn team_for(&self, side: Side) -> Result<Team> {
        let def = self
            .teams
            .iter()
            .find(|t| t.side == side)
            .ok_or_else(|| BattleError::configuration(format!("roster has no {} team", side)))?;
        self.build_team(def)
    }

    /// Build a team from hand-picked members; the first pick leads
    pub fn select_team(&self, id: &str, side: Side, members: &[CharacterId]) -> Result<Team> {
        let leader = members
            .first()
            .cloned()
            .ok_or_else(|| BattleError::configuration(format!("team '{}' has no characters", id)))?;
        let def = TeamDef {
            id: id.to_string(),
            side,
            members: members.to_vec(),
            leader,
        };
        self.build_team(&def)
    }
}

/// Load roster from TOML file
///
/// Loads from `data/rosters/{name}.toml`
pub fn load_roster(name: &str) -> Result<Roster> {
    load_roster_file(roster_path(name))
}

/// Load a roster from an explicit path
pub fn load_roster_file(path: impl AsRef<Path>) -> Result<Roster> {
    let contents = fs::read_to_string(path.as_ref())?;
    Roster::from_toml_str(&contents)
}

/// Get path to roster file
fn roster_path(name: &str) -> PathBuf {
    PathBuf::from("data/rosters").join(format!("{}.toml", name))
}
