//! Automated action selection
//!
//! The stock AI is deliberately simple: a uniformly random living target and
//! an occasional special ability. Anything smarter plugs in through
//! [`BattleAi`].

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::battle::action::BattleAction;
use crate::battle::state::BattleState;
use crate::combat::{Character, Team};
use crate::core::types::{CharacterId, Side};

/// Trait for battle AI implementations
pub trait BattleAi {
    /// Choose what `attacker` on `side` does this turn
    ///
    /// Returns `None` when the attacker cannot act or there is nothing left
    /// to attack.
    fn choose_action(
        &mut self,
        state: &BattleState,
        side: Side,
        attacker: &CharacterId,
    ) -> Option<BattleAction>;
}

/// Pick a target uniformly among the living members of `team`
pub fn choose_target<'a, R: Rng + ?Sized>(team: &'a Team, rng: &mut R) -> Option<&'a Character> {
    let living: Vec<&Character> = team.living().collect();
    living.choose(rng).copied()
}

/// Decide whether to use a special ability, and which one
///
/// The chance is rolled first; on success one of the off-cooldown abilities
/// is picked uniformly. Returns the ability index.
pub fn choose_ability<R: Rng + ?Sized>(
    attacker: &Character,
    special_ability_chance: f64,
    rng: &mut R,
) -> Option<usize> {
    let roll: f64 = rng.gen();
    if roll >= special_ability_chance {
        return None;
    }
    attacker.ready_abilities().choose(rng).copied()
}

/// Random target, occasional special ability
pub struct RandomAi {
    rng: ChaCha8Rng,
    special_ability_chance: f64,
}

impl RandomAi {
    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(seed: u64, special_ability_chance: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            special_ability_chance,
        }
    }

    /// Create with an entropy-seeded RNG
    pub fn from_entropy(special_ability_chance: f64) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            special_ability_chance,
        }
    }
}

impl BattleAi for RandomAi {
    fn choose_action(
        &mut self,
        state: &BattleState,
        side: Side,
        attacker: &CharacterId,
    ) -> Option<BattleAction> {
        let attacker = state.character(side, attacker).filter(|c| c.is_alive())?;
        let target = choose_target(state.team(side.opponent()), &mut self.rng)?;

        let action = match choose_ability(attacker, self.special_ability_chance, &mut self.rng) {
            Some(index) => BattleAction::special(side, attacker.id.clone(), target.id.clone(), index),
            None => BattleAction::basic(side, attacker.id.clone(), target.id.clone()),
        };
        Some(action)
    }
}
