//! Combatant state updates
//!
//! Every operation takes a value and returns an updated copy. Team updates
//! match members by id within that one team's list, so the same roster
//! character fighting on the other side is never touched.

use crate::combat::{Character, Team};
use crate::core::error::{BattleError, Result};

/// Subtract health, flooring at zero
pub fn apply_damage(character: &Character, amount: u32) -> Character {
    let mut updated = character.clone();
    updated.current_health = character.current_health.saturating_sub(amount);
    updated
}

/// Set one ability's current cooldown (clamped to its configured cooldown)
pub fn set_cooldown(character: &Character, ability_index: usize, value: u32) -> Result<Character> {
    let mut updated = character.clone();
    let ability = updated.abilities.get_mut(ability_index).ok_or_else(|| {
        BattleError::invalid(format!(
            "{} has no ability #{} ({} known)",
            character.name,
            ability_index,
            character.abilities.len()
        ))
    })?;
    ability.current_cooldown = value.min(ability.cooldown);
    Ok(updated)
}

/// One elapsed round: every ability of every member cools down by 1
pub fn decrement_all_cooldowns(team: &Team) -> Team {
    let mut updated = team.clone();
    for character in &mut updated.characters {
        for ability in &mut character.abilities {
            ability.current_cooldown = ability.current_cooldown.saturating_sub(1);
        }
    }
    updated
}

/// Replace the member with the same id, inside this team only
///
/// A character id unknown to the team leaves the team unchanged.
pub fn replace_member(team: &Team, character: Character) -> Team {
    let mut updated = team.clone();
    if let Some(slot) = updated.characters.iter_mut().find(|c| c.id == character.id) {
        *slot = character;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Side;
    use proptest::prelude::*;

    #[test]
    fn test_apply_damage_floors_at_zero() {
        let c = Character::test_fighter("a");
        let hit = apply_damage(&c, 150);
        assert_eq!(hit.current_health, 50);

        let dead = apply_damage(&hit, 1000);
        assert_eq!(dead.current_health, 0);
        assert!(!dead.is_alive());

        // Input untouched
        assert_eq!(c.current_health, 200);
    }

    #[test]
    fn test_cooldown_set_then_decremented() {
        let c = Character::test_fighter("a");
        let cooldown = c.abilities[0].cooldown;

        let used = set_cooldown(&c, 0, cooldown).unwrap();
        assert_eq!(used.abilities[0].current_cooldown, cooldown);

        let team = Team::led_by_first("t", Side::Player, vec![used]);
        let team = decrement_all_cooldowns(&team);
        assert_eq!(team.characters[0].abilities[0].current_cooldown, cooldown - 1);

        let mut team = team;
        for _ in 0..10 {
            team = decrement_all_cooldowns(&team);
        }
        assert_eq!(team.characters[0].abilities[0].current_cooldown, 0);
    }

    #[test]
    fn test_set_cooldown_clamps_and_validates_index() {
        let c = Character::test_fighter("a");
        let clamped = set_cooldown(&c, 0, 99).unwrap();
        assert_eq!(clamped.abilities[0].current_cooldown, clamped.abilities[0].cooldown);

        assert!(set_cooldown(&c, 5, 1).unwrap_err().is_invalid_action());
    }

    #[test]
    fn test_replace_member_stays_in_team() {
        let player = Team::led_by_first("p", Side::Player, vec![Character::test_fighter("a")]);
        let enemy = Team::led_by_first("e", Side::Enemy, vec![Character::test_fighter("a")]);

        let hurt = apply_damage(&enemy.characters[0], 120);
        let enemy = replace_member(&enemy, hurt);

        assert_eq!(enemy.characters[0].current_health, 80);
        assert_eq!(player.characters[0].current_health, 200);
    }

    #[test]
    fn test_replace_unknown_member_is_noop() {
        let team = Team::led_by_first("p", Side::Player, vec![Character::test_fighter("a")]);
        let stranger = apply_damage(&Character::test_fighter("z"), 10);
        assert_eq!(replace_member(&team, stranger), team);
    }

    proptest! {
        #[test]
        fn prop_health_never_negative(hits in prop::collection::vec(any::<u32>(), 0..20)) {
            let mut c = Character::test_fighter("a");
            for amount in hits {
                let before = c.current_health;
                c = apply_damage(&c, amount);
                prop_assert!(c.current_health <= before);
                prop_assert!(c.current_health <= c.stats.max_health);
            }
        }
    }
}
