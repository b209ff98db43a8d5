//! Action resolution
//!
//! validate -> damage -> apply to defender's team -> cooldown -> log.
//! The input state is never modified; a rejected action leaves it exactly
//! as it was.

use crate::battle::action::{ActionKind, BattleAction};
use crate::battle::state::BattleState;
use crate::battle::store::{apply_damage, replace_member, set_cooldown};
use crate::combat::{damage_breakdown, Character, Team};
use crate::core::error::{BattleError, Result};
use crate::core::types::Side;

/// Outcome of one resolved action
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// State after the action, log lines already appended
    pub state: BattleState,
    /// Lines this action added to the log
    pub log: Vec<String>,
    pub damage: u32,
    pub defender_defeated: bool,
}

fn find_living<'a>(team: &'a Team, action: &BattleAction, attacker: bool) -> Result<&'a Character> {
    let id = if attacker { &action.attacker } else { &action.defender };
    let character = team.get(id).ok_or_else(|| {
        BattleError::invalid(format!("the {} team has no character '{}'", team.side, id))
    })?;

    if !character.is_alive() {
        let reason = if attacker {
            format!("{} is down and cannot act", character.name)
        } else {
            format!("{} is already down", character.name)
        };
        return Err(BattleError::invalid(reason));
    }

    Ok(character)
}

/// Updated teams and log lines for one action, before they are applied
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved {
    pub attackers: Team,
    pub defenders: Team,
    pub log: Vec<String>,
    pub damage: u32,
    pub defender_defeated: bool,
}

impl Resolved {
    /// Write the result into `state`, log lines included
    pub(crate) fn apply_to(self, state: &mut BattleState, side: Side) -> Vec<String> {
        *state.team_mut(side) = self.attackers;
        *state.team_mut(side.opponent()) = self.defenders;
        state.log.extend(self.log.iter().cloned());
        self.log
    }
}

/// Validate and compute one action; only the two teams are copied
pub(crate) fn resolve_teams(action: &BattleAction, state: &BattleState) -> Result<Resolved> {
    let attacking_team = state.team(action.side);
    let defending_team = state.team(action.side.opponent());

    let attacker = find_living(attacking_team, action, true)?;
    let defender = find_living(defending_team, action, false)?;

    let ability = match action.kind {
        ActionKind::Basic => None,
        ActionKind::Special { ability_index } => {
            let ability = attacker.abilities.get(ability_index).ok_or_else(|| {
                BattleError::invalid(format!(
                    "{} has no ability #{} ({} known)",
                    attacker.name,
                    ability_index,
                    attacker.abilities.len()
                ))
            })?;
            if !ability.is_ready() {
                return Err(BattleError::invalid(format!(
                    "{} is on cooldown for {} more turn(s)",
                    ability.name, ability.current_cooldown
                )));
            }
            Some(ability)
        }
    };

    let breakdown = damage_breakdown(
        attacker,
        attacking_team.leader_skill(),
        defender,
        defending_team.leader_skill(),
        ability,
    );
    let damage = breakdown.damage;

    // Defender's team only
    let hit = apply_damage(defender, damage);
    let defender_defeated = !hit.is_alive();
    let defenders = replace_member(defending_team, hit);

    // Attacker's team only
    let attackers = match (action.kind, ability) {
        (ActionKind::Special { ability_index }, Some(used)) => {
            let cooled = set_cooldown(attacker, ability_index, used.cooldown)?;
            replace_member(attacking_team, cooled)
        }
        _ => attacking_team.clone(),
    };

    let move_name = ability.map_or("basic attack", |a| a.name.as_str());
    let mut log = vec![format!(
        "{} hits {} with {} for {} damage!",
        attacker.name, defender.name, move_name, damage
    )];
    if defender_defeated {
        log.push(format!("{} has fallen!", defender.name));
    }

    tracing::debug!(
        action = %action,
        damage,
        defender_defeated,
        "action resolved"
    );

    Ok(Resolved {
        attackers,
        defenders,
        log,
        damage,
        defender_defeated,
    })
}

/// Resolve one action against a state
pub fn resolve_action(action: &BattleAction, state: &BattleState) -> Result<Resolution> {
    let resolved = resolve_teams(action, state)?;
    let (damage, defender_defeated) = (resolved.damage, resolved.defender_defeated);

    let mut next = state.clone();
    let log = resolved.apply_to(&mut next, action.side);

    Ok(Resolution {
        state: next,
        log,
        damage,
        defender_defeated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::start_battle;
    use crate::combat::{CharacterType, SpecialAbility, Stats};

    fn duel_state() -> BattleState {
        let hero = Character::new("hero", "Hero", CharacterType::Str, Stats::new(50, 10, 100))
            .with_ability(SpecialAbility::new("Smash", 2.0, 2));
        let foe = Character::new("foe", "Foe", CharacterType::Str, Stats::new(50, 10, 100));
        start_battle(
            Team::led_by_first("p", Side::Player, vec![hero]),
            Team::led_by_first("e", Side::Enemy, vec![foe]),
        )
        .unwrap()
    }

    #[test]
    fn test_basic_attack_damages_defender_only() {
        let state = duel_state();
        let action = BattleAction::basic(Side::Player, "hero", "foe");

        let res = resolve_action(&action, &state).unwrap();

        assert_eq!(res.damage, 5);
        assert_eq!(res.state.enemy.characters[0].current_health, 95);
        assert_eq!(res.state.player, state.player);
        assert_eq!(res.log, vec!["Hero hits Foe with basic attack for 5 damage!".to_string()]);
        assert_eq!(res.state.log.len(), state.log.len() + 1);
    }

    #[test]
    fn test_special_sets_cooldown() {
        let state = duel_state();
        let action = BattleAction::special(Side::Player, "hero", "foe", 0);

        let res = resolve_action(&action, &state).unwrap();

        assert_eq!(res.damage, 10);
        assert_eq!(res.state.player.characters[0].abilities[0].current_cooldown, 2);
        assert!(res.log[0].contains("Smash"));
    }

    #[test]
    fn test_ability_on_cooldown_rejected() {
        let state = duel_state();
        let action = BattleAction::special(Side::Player, "hero", "foe", 0);
        let after_first = resolve_action(&action, &state).unwrap().state;

        let err = resolve_action(&action, &after_first).unwrap_err();
        assert!(err.is_invalid_action());
    }

    #[test]
    fn test_ability_index_out_of_range_rejected() {
        let state = duel_state();
        let before = state.clone();
        let action = BattleAction::special(Side::Player, "hero", "foe", 3);

        assert!(resolve_action(&action, &state).unwrap_err().is_invalid_action());
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_participants_rejected() {
        let state = duel_state();
        let ghost_attacker = BattleAction::basic(Side::Player, "ghost", "foe");
        let ghost_target = BattleAction::basic(Side::Player, "hero", "ghost");
        // Defender must be on the opposing side
        let friendly_fire = BattleAction::basic(Side::Player, "hero", "hero");

        assert!(resolve_action(&ghost_attacker, &state).is_err());
        assert!(resolve_action(&ghost_target, &state).is_err());
        assert!(resolve_action(&friendly_fire, &state).is_err());
    }

    #[test]
    fn test_dead_participants_rejected() {
        let mut state = duel_state();
        state.enemy.characters[0].current_health = 0;
        let before = state.clone();

        let at_corpse = BattleAction::basic(Side::Player, "hero", "foe");
        let from_corpse = BattleAction::basic(Side::Enemy, "foe", "hero");

        assert!(resolve_action(&at_corpse, &state).unwrap_err().is_invalid_action());
        assert!(resolve_action(&from_corpse, &state).unwrap_err().is_invalid_action());
        assert_eq!(state, before);
    }

    #[test]
    fn test_fatal_hit_logs_fall() {
        let mut state = duel_state();
        state.enemy.characters[0].current_health = 3;

        let res = resolve_action(&BattleAction::basic(Side::Player, "hero", "foe"), &state).unwrap();

        assert!(res.defender_defeated);
        assert_eq!(res.state.enemy.characters[0].current_health, 0);
        assert_eq!(res.log.last().unwrap(), "Foe has fallen!");
    }

    #[test]
    fn test_leader_skill_applies_to_whole_team() {
        let leader = Character::new("lead", "Lead", CharacterType::Str, Stats::new(10, 10, 100))
            .with_leader_skill(crate::combat::Skill::new("Rally", 2.0, 1.0));
        let striker = Character::new("striker", "Striker", CharacterType::Str, Stats::new(50, 10, 100));
        let foe = Character::new("foe", "Foe", CharacterType::Str, Stats::new(50, 10, 100));
        let state = start_battle(
            Team::new("p", Side::Player, vec![leader, striker], "lead"),
            Team::led_by_first("e", Side::Enemy, vec![foe]),
        )
        .unwrap();

        let res = resolve_action(&BattleAction::basic(Side::Player, "striker", "foe"), &state).unwrap();

        // floor(50 * 2.0 / 10) = 10
        assert_eq!(res.damage, 10);
    }
}
