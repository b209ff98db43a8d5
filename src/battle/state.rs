//! Battle state: both teams, the phase, the turn counter and the log

use serde::{Deserialize, Serialize};

use crate::combat::{Character, Team};
use crate::core::error::{BattleError, Result};
use crate::core::types::{CharacterId, Side, Turn};

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    NotStarted,
    InProgress,
    PlayerWon,
    EnemyWon,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::PlayerWon | BattlePhase::EnemyWon)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattlePhase::PlayerWon => Some(Side::Player),
            BattlePhase::EnemyWon => Some(Side::Enemy),
            _ => None,
        }
    }

    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Player => BattlePhase::PlayerWon,
            Side::Enemy => BattlePhase::EnemyWon,
        }
    }
}

/// Complete battle state
///
/// Produced anew after every action; the orchestrator holds the only copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub player: Team,
    pub enemy: Team,
    pub phase: BattlePhase,
    pub turn: Turn,
    pub log: Vec<String>,
}

impl BattleState {
    /// Unstarted battle between two line-ups
    pub fn new(player: Team, enemy: Team) -> Self {
        Self {
            player,
            enemy,
            phase: BattlePhase::NotStarted,
            turn: 1,
            log: Vec::new(),
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Look a character up on one side only
    pub fn character(&self, side: Side, id: &CharacterId) -> Option<&Character> {
        self.team(side).get(id)
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.phase.winner()
    }

    /// Log a battle event
    pub fn log_event(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Record the outcome and the victory line
    pub(crate) fn end_battle(&mut self, winner: Side) -> String {
        self.phase = BattlePhase::won_by(winner);
        let line = format!("The {} team is victorious!", winner);
        self.log.push(line.clone());
        line
    }

    /// Summary of a finished battle
    pub fn summary(&self) -> Option<BattleSummary> {
        let winner = self.winner()?;
        let survivors = self
            .team(winner)
            .living()
            .map(|c| Survivor {
                id: c.id.clone(),
                name: c.name.clone(),
                current_health: c.current_health,
                max_health: c.stats.max_health,
            })
            .collect();

        Some(BattleSummary {
            winner,
            loser: winner.opponent(),
            winning_team: self.team(winner).id.clone(),
            turns: self.turn,
            survivors,
            log: self.log.clone(),
        })
    }
}

/// A character left standing on the winning side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survivor {
    pub id: CharacterId,
    pub name: String,
    pub current_health: u32,
    pub max_health: u32,
}

/// Result record of a finished battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub winner: Side,
    pub loser: Side,
    pub winning_team: String,
    pub turns: Turn,
    pub survivors: Vec<Survivor>,
    pub log: Vec<String>,
}

/// Check whether either team has been wiped out
///
/// Returns the winning side. The player side is checked first, so a state in
/// which both teams are down reports the enemy as winner; the resolver can
/// only ever defeat one team per action.
pub fn check_battle_end(state: &BattleState) -> Option<Side> {
    if state.player.is_defeated() {
        return Some(Side::Enemy);
    }

    if state.enemy.is_defeated() {
        return Some(Side::Player);
    }

    None
}

/// Validate both line-ups and open the battle
///
/// The log is seeded with the introductory lines. A team with no living
/// members is a legal starting point; the first orchestrator step ends
/// such a battle immediately.
pub fn start_battle(player: Team, enemy: Team) -> Result<BattleState> {
    if player.side != Side::Player {
        return Err(BattleError::configuration(format!(
            "team '{}' is tagged {} but was supplied as the player team",
            player.id, player.side
        )));
    }
    if enemy.side != Side::Enemy {
        return Err(BattleError::configuration(format!(
            "team '{}' is tagged {} but was supplied as the enemy team",
            enemy.id, enemy.side
        )));
    }

    player.validate()?;
    enemy.validate()?;

    let mut state = BattleState::new(player, enemy);
    state.phase = BattlePhase::InProgress;

    let player_leader = leader_name(&state.player);
    let enemy_leader = leader_name(&state.enemy);
    state.log_event("The battle has begun!");
    state.log_event(format!("Player team leader: {}", player_leader));
    state.log_event(format!("Enemy team leader: {}", enemy_leader));
    state.log_event("-------------------");

    tracing::info!(
        player_team = %state.player.id,
        enemy_team = %state.enemy.id,
        "battle started"
    );

    Ok(state)
}

fn leader_name(team: &Team) -> String {
    team.leader_character()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| team.leader.to_string())
}
