//! Battle session: the orchestrator owning one battle
//!
//! Manual play resolves one action per call. Autoplay is an explicit step
//! machine: every [`BattleSession::step`] call performs exactly one discrete
//! step (one character's action or the end of a round), so it can be driven
//! synchronously in tests or paced by [`crate::battle::run_autoplay`].

use crate::battle::action::BattleAction;
use crate::battle::ai::{BattleAi, RandomAi};
use crate::battle::autoplay::AutoplayControls;
use crate::battle::resolution::{resolve_teams, Resolved};
use crate::battle::state::{check_battle_end, start_battle, BattlePhase, BattleState, BattleSummary};
use crate::battle::store::decrement_all_cooldowns;
use crate::combat::Team;
use crate::core::config::{config, BattleConfig};
use crate::core::error::{BattleError, Result};
use crate::core::types::{BattleId, CharacterId, Side, Turn};

/// Side that acts first in every autoplay round
const FIRST_SIDE: Side = Side::Player;

/// Where the autoplay round currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RoundCursor {
    side: Side,
    next_index: usize,
}

impl RoundCursor {
    fn start() -> Self {
        Self {
            side: FIRST_SIDE,
            next_index: 0,
        }
    }
}

/// Result of one autoplay step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// One character acted
    Acted {
        side: Side,
        attacker: CharacterId,
        lines: Vec<String>,
    },
    /// Both sides acted; cooldowns ticked and the turn advanced
    RoundEnded { turn: Turn, lines: Vec<String> },
    /// The battle is over
    Finished { winner: Side, lines: Vec<String> },
}

impl StepOutcome {
    /// Log lines produced by this step
    pub fn lines(&self) -> &[String] {
        match self {
            StepOutcome::Acted { lines, .. }
            | StepOutcome::RoundEnded { lines, .. }
            | StepOutcome::Finished { lines, .. } => lines,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, StepOutcome::Finished { .. })
    }
}

/// One battle and everything needed to drive it
pub struct BattleSession {
    id: BattleId,
    state: BattleState,
    config: BattleConfig,
    ai: Box<dyn BattleAi + Send>,
    cursor: RoundCursor,
    controls: AutoplayControls,
}

impl BattleSession {
    /// Start a battle with the global config and an entropy-seeded AI
    pub fn new(player: Team, enemy: Team) -> Result<Self> {
        let config = config().clone();
        let ai = RandomAi::from_entropy(config.special_ability_chance);
        Self::with_ai(player, enemy, config, Box::new(ai))
    }

    /// Start a battle with an explicit config and an entropy-seeded AI
    pub fn with_config(player: Team, enemy: Team, config: BattleConfig) -> Result<Self> {
        let ai = RandomAi::from_entropy(config.special_ability_chance);
        Self::with_ai(player, enemy, config, Box::new(ai))
    }

    /// Start a battle with an explicit config and a seeded AI
    pub fn with_seed(player: Team, enemy: Team, config: BattleConfig, seed: u64) -> Result<Self> {
        let ai = RandomAi::with_seed(seed, config.special_ability_chance);
        Self::with_ai(player, enemy, config, Box::new(ai))
    }

    pub fn with_ai(
        player: Team,
        enemy: Team,
        config: BattleConfig,
        ai: Box<dyn BattleAi + Send>,
    ) -> Result<Self> {
        config.validate()?;
        let state = start_battle(player, enemy)?;
        Ok(Self {
            id: BattleId::new(),
            state,
            config,
            ai,
            cursor: RoundCursor::start(),
            controls: AutoplayControls::new(),
        })
    }

    /// Replace the AI used for automated turns
    pub fn set_ai(&mut self, ai: Box<dyn BattleAi + Send>) {
        self.ai = ai;
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Handle for pausing, resuming or stopping autoplay
    pub fn controls(&self) -> AutoplayControls {
        self.controls.clone()
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn summary(&self) -> Option<BattleSummary> {
        self.state.summary()
    }

    /// Append a line to the battle log
    pub fn record(&mut self, line: impl Into<String>) {
        self.state.log_event(line);
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.state.phase {
            BattlePhase::InProgress => Ok(()),
            BattlePhase::NotStarted => Err(BattleError::invalid("the battle has not started")),
            BattlePhase::PlayerWon | BattlePhase::EnemyWon => {
                Err(BattleError::invalid("the battle is already over"))
            }
        }
    }

    /// End the battle if a team is wiped out; returns the victory line
    fn settle(&mut self) -> Option<(Side, String)> {
        let winner = check_battle_end(&self.state)?;
        let line = self.state.end_battle(winner);
        tracing::info!(
            battle = %self.id,
            winner = %winner,
            turn = self.state.turn,
            "battle finished"
        );
        Some((winner, line))
    }

    /// Manual mode: resolve exactly one action
    ///
    /// Returns the log lines the action produced, including the victory line
    /// when it ended the battle. A battle in which a team already has nobody
    /// standing is settled instead and only the victory line is returned.
    /// A rejected action leaves the state unchanged.
    pub fn act(&mut self, action: &BattleAction) -> Result<Vec<String>> {
        self.ensure_in_progress()?;

        if let Some((_, line)) = self.settle() {
            return Ok(vec![line]);
        }

        let resolved = self.validate(action)?;
        Ok(self.commit(action, resolved))
    }

    fn validate(&self, action: &BattleAction) -> Result<Resolved> {
        resolve_teams(action, &self.state).map_err(|err| {
            tracing::warn!(battle = %self.id, action = %action, error = %err, "action rejected");
            err
        })
    }

    /// Apply a validated action, then check for victory
    fn commit(&mut self, action: &BattleAction, resolved: Resolved) -> Vec<String> {
        let mut lines = resolved.apply_to(&mut self.state, action.side);
        if let Some((_, line)) = self.settle() {
            lines.push(line);
        }
        lines
    }

    /// Close the current turn: cooldowns tick for both teams, turn advances
    pub fn end_turn(&mut self) -> Result<Vec<String>> {
        self.ensure_in_progress()?;

        let player = decrement_all_cooldowns(&self.state.player);
        let enemy = decrement_all_cooldowns(&self.state.enemy);
        self.state.player = player;
        self.state.enemy = enemy;

        let line = format!("Turn {} has ended.", self.state.turn);
        self.state.log_event(line.clone());
        self.state.turn += 1;
        self.cursor = RoundCursor::start();

        Ok(vec![line])
    }

    /// Manual mode with an automated opponent
    ///
    /// The player's action, then one reply from the first living enemy with
    /// an AI-chosen target and ability, then the end of the turn.
    pub fn play_turn(&mut self, action: &BattleAction) -> Result<Vec<String>> {
        if action.side != Side::Player {
            return Err(BattleError::invalid("play_turn expects a player-side action"));
        }

        let mut lines = self.act(action)?;
        if self.is_finished() {
            return Ok(lines);
        }

        let responder = self.state.enemy.living().next().map(|c| c.id.clone());
        if let Some(responder) = responder {
            if let Some(reply) = self.ai.choose_action(&self.state, Side::Enemy, &responder) {
                lines.extend(self.act(&reply)?);
            }
        }

        if !self.is_finished() {
            lines.extend(self.end_turn()?);
        }
        Ok(lines)
    }

    /// Autoplay: advance by exactly one discrete step
    ///
    /// Within a round the first side's living characters act in roster
    /// order, then the other side's; then the round ends. The battle ends
    /// the moment a team is wiped out, even mid-round, and a battle in which
    /// a team has nobody standing ends before anyone acts.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if let Some(winner) = self.state.winner() {
            return Ok(StepOutcome::Finished {
                winner,
                lines: Vec::new(),
            });
        }
        self.ensure_in_progress()?;

        if let Some((winner, line)) = self.settle() {
            return Ok(StepOutcome::Finished {
                winner,
                lines: vec![line],
            });
        }

        loop {
            let side = self.cursor.side;
            let next = self
                .state
                .team(side)
                .characters
                .iter()
                .enumerate()
                .skip(self.cursor.next_index)
                .find(|(_, c)| c.is_alive())
                .map(|(i, c)| (i, c.id.clone()));

            match next {
                Some((index, attacker)) => {
                    let outcome = self.auto_act(side, attacker)?;
                    self.cursor.next_index = index + 1;
                    return Ok(outcome);
                }
                None if side == FIRST_SIDE => {
                    self.cursor = RoundCursor {
                        side: side.opponent(),
                        next_index: 0,
                    };
                }
                None => {
                    let turn = self.state.turn;
                    let lines = self.end_turn()?;
                    return Ok(StepOutcome::RoundEnded { turn, lines });
                }
            }
        }
    }

    fn auto_act(&mut self, side: Side, attacker: CharacterId) -> Result<StepOutcome> {
        let Some(action) = self.ai.choose_action(&self.state, side, &attacker) else {
            // No living target: the opposing team is down
            let (winner, line) = self
                .settle()
                .ok_or_else(|| BattleError::invalid(format!("{} found no action to take", attacker)))?;
            return Ok(StepOutcome::Finished {
                winner,
                lines: vec![line],
            });
        };

        let resolved = self.validate(&action)?;

        let attacker_name = self.name_of(side, &action.attacker);
        let target_name = self.name_of(side.opponent(), &action.defender);
        let mut lines = vec![
            format!("{} readies an action.", attacker_name),
            format!("{} takes aim at {}.", attacker_name, target_name),
        ];
        for line in &lines {
            self.state.log_event(line.clone());
        }

        lines.extend(self.commit(&action, resolved));

        if let Some(winner) = self.state.winner() {
            return Ok(StepOutcome::Finished { winner, lines });
        }
        Ok(StepOutcome::Acted {
            side,
            attacker,
            lines,
        })
    }

    fn name_of(&self, side: Side, id: &CharacterId) -> String {
        self.state
            .character(side, id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Run autoplay to completion without pacing
    pub fn run_to_end(&mut self) -> Result<Side> {
        loop {
            if let StepOutcome::Finished { winner, .. } = self.step()? {
                return Ok(winner);
            }
        }
    }
}
