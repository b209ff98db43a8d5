//! Damage calculation
//!
//! damage = max(1, floor(floor(ATK * mult / DEF) * advantage))
//!
//! ATK and DEF are base stats scaled by the team leader's skill and the
//! character's own passive skill. Absent skills scale by 1.0.

use serde::{Deserialize, Serialize};

use crate::combat::character::{Character, Skill, SpecialAbility};
use crate::combat::constants::{MIN_DAMAGE, MIN_EFFECTIVE_DEFENSE, NEUTRAL_MULTIPLIER};
use crate::combat::elements::type_advantage;

/// Every intermediate value of one damage calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub effective_attack: f64,
    pub effective_defense: f64,
    pub ability_multiplier: f64,
    /// floor(effective_attack * ability_multiplier / effective_defense)
    pub raw: u32,
    pub type_multiplier: f64,
    pub damage: u32,
}

fn attack_multiplier(skill: Option<&Skill>) -> f64 {
    skill.map_or(NEUTRAL_MULTIPLIER, |s| s.effect.attack)
}

fn defense_multiplier(skill: Option<&Skill>) -> f64 {
    skill.map_or(NEUTRAL_MULTIPLIER, |s| s.effect.defense)
}

/// Run the damage formula and keep its intermediate values
///
/// # Arguments
/// * `attacker_leader` - leader skill of the attacker's team, if any
/// * `defender_leader` - leader skill of the defender's team, if any
/// * `ability` - the special ability used, `None` for a basic attack
pub fn damage_breakdown(
    attacker: &Character,
    attacker_leader: Option<&Skill>,
    defender: &Character,
    defender_leader: Option<&Skill>,
    ability: Option<&SpecialAbility>,
) -> DamageBreakdown {
    // 1. Effective attack
    let effective_attack = attacker.stats.attack as f64
        * attack_multiplier(attacker_leader)
        * attack_multiplier(attacker.passive_skill.as_ref());

    // 2. Effective defense, never below 1
    let effective_defense = (defender.stats.defense as f64
        * defense_multiplier(defender_leader)
        * defense_multiplier(defender.passive_skill.as_ref()))
    .max(MIN_EFFECTIVE_DEFENSE);

    // 3. Ability multiplier
    let ability_multiplier = ability.map_or(NEUTRAL_MULTIPLIER, |a| a.damage_multiplier);

    // 4. Raw damage (float -> int casts saturate, NaN becomes 0)
    let raw = (effective_attack * ability_multiplier / effective_defense).floor() as u32;

    // 5. Type advantage and the damage floor
    let type_multiplier = type_advantage(attacker.character_type, defender.character_type);
    let damage = ((raw as f64 * type_multiplier).floor() as u32).max(MIN_DAMAGE);

    let breakdown = DamageBreakdown {
        effective_attack,
        effective_defense,
        ability_multiplier,
        raw,
        type_multiplier,
        damage,
    };

    tracing::debug!(
        attacker = %attacker.id,
        defender = %defender.id,
        effective_attack,
        effective_defense,
        ability_multiplier,
        raw,
        type_multiplier,
        damage,
        "damage calculated"
    );

    breakdown
}

/// Final damage of one hit, always at least 1
pub fn calculate_damage(
    attacker: &Character,
    attacker_leader: Option<&Skill>,
    defender: &Character,
    defender_leader: Option<&Skill>,
    ability: Option<&SpecialAbility>,
) -> u32 {
    damage_breakdown(attacker, attacker_leader, defender, defender_leader, ability).damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::character::Stats;
    use crate::combat::elements::CharacterType;
    use proptest::prelude::*;

    fn fighter(ct: CharacterType, attack: u32, defense: u32) -> Character {
        Character::new("x", "X", ct, Stats::new(attack, defense, 1000))
    }

    #[test]
    fn test_str_vs_phy_floors_before_advantage() {
        // raw = floor(12000 / 8000) = 1, final = floor(1 * 1.5) = 1
        let attacker = fighter(CharacterType::Str, 12000, 8000);
        let defender = fighter(CharacterType::Phy, 11000, 8000);

        let b = damage_breakdown(&attacker, None, &defender, None, None);

        assert_eq!(b.type_multiplier, 1.5);
        assert_eq!(b.raw, 1);
        assert_eq!(b.damage, 1);
    }

    #[test]
    fn test_same_type_plain_division() {
        let attacker = fighter(CharacterType::Teq, 50, 10);
        let defender = fighter(CharacterType::Teq, 50, 10);
        assert_eq!(calculate_damage(&attacker, None, &defender, None, None), 5);
    }

    #[test]
    fn test_ability_multiplier_applies_before_floor() {
        // floor(100 * 2.5 / 40) = floor(6.25) = 6
        let attacker = fighter(CharacterType::Int, 100, 10);
        let defender = fighter(CharacterType::Int, 10, 40);
        let ability = SpecialAbility::new("Beam", 2.5, 2);

        assert_eq!(calculate_damage(&attacker, None, &defender, None, Some(&ability)), 6);
    }

    #[test]
    fn test_advantage_and_disadvantage() {
        // raw = floor(100 / 10) = 10
        let str_fighter = fighter(CharacterType::Str, 100, 10);
        let phy_fighter = fighter(CharacterType::Phy, 100, 10);

        assert_eq!(calculate_damage(&str_fighter, None, &phy_fighter, None, None), 15);
        assert_eq!(calculate_damage(&phy_fighter, None, &str_fighter, None, None), 5);
    }

    #[test]
    fn test_leader_and_passive_skills_stack() {
        // ATK = 100 * 1.5 * 2.0 = 300, DEF = 10 * 1.0 * 1.0 = 10, raw = 30
        let attacker = fighter(CharacterType::Agl, 100, 10)
            .with_passive_skill(Skill::new("Focus", 2.0, 1.0));
        let defender = fighter(CharacterType::Agl, 100, 10);
        let leader = Skill::new("Rally", 1.5, 1.0);

        assert_eq!(calculate_damage(&attacker, Some(&leader), &defender, None, None), 30);
    }

    #[test]
    fn test_defender_skills_raise_defense() {
        // DEF = 10 * 2.0 * 2.5 = 50, raw = floor(100 / 50) = 2
        let attacker = fighter(CharacterType::Agl, 100, 10);
        let defender = fighter(CharacterType::Agl, 100, 10)
            .with_passive_skill(Skill::new("Guard", 1.0, 2.5));
        let leader = Skill::new("Wall", 1.0, 2.0);

        let b = damage_breakdown(&attacker, None, &defender, Some(&leader), None);
        assert_eq!(b.effective_defense, 50.0);
        assert_eq!(b.damage, 2);
    }

    #[test]
    fn test_zero_defense_treated_as_one() {
        let attacker = fighter(CharacterType::Str, 7, 0);
        let defender = fighter(CharacterType::Str, 7, 0);

        let b = damage_breakdown(&attacker, None, &defender, None, None);
        assert_eq!(b.effective_defense, 1.0);
        assert_eq!(b.damage, 7);
    }

    #[test]
    fn test_minimum_one_damage() {
        let attacker = fighter(CharacterType::Phy, 1, 1);
        let defender = fighter(CharacterType::Str, 1, u32::MAX);
        assert_eq!(calculate_damage(&attacker, None, &defender, None, None), 1);
    }

    #[test]
    fn test_huge_attack_saturates() {
        let attacker = fighter(CharacterType::Str, u32::MAX, 1)
            .with_passive_skill(Skill::new("Overdrive", 1e12, 1.0));
        let defender = fighter(CharacterType::Phy, 1, 0);
        assert_eq!(calculate_damage(&attacker, None, &defender, None, None), u32::MAX);
    }

    fn any_type() -> impl Strategy<Value = CharacterType> {
        prop::sample::select(CharacterType::CYCLE.to_vec())
    }

    proptest! {
        #[test]
        fn prop_damage_at_least_one(
            atk_type in any_type(),
            def_type in any_type(),
            attack in any::<u32>(),
            defense in any::<u32>(),
            multiplier in 0.01f64..100.0,
            use_ability in any::<bool>(),
        ) {
            let attacker = fighter(atk_type, attack, 0);
            let defender = fighter(def_type, 0, defense);
            let ability = SpecialAbility::new("Any", multiplier, 1);
            let ability = if use_ability { Some(&ability) } else { None };

            let damage = calculate_damage(&attacker, None, &defender, None, ability);
            prop_assert!(damage >= 1);
        }

        #[test]
        fn prop_deterministic(attack in 0u32..100_000, defense in 0u32..100_000) {
            let attacker = fighter(CharacterType::Int, attack, 0);
            let defender = fighter(CharacterType::Teq, 0, defense);
            let first = calculate_damage(&attacker, None, &defender, None, None);
            let second = calculate_damage(&attacker, None, &defender, None, None);
            prop_assert_eq!(first, second);
        }
    }
}
