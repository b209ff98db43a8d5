//! Benchmarks for damage calculation and action resolution.
//!
//! Run with:
//!   cargo bench --bench damage_calc

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use team_battle::battle::{resolve_action, start_battle, BattleAction, BattleSession, BattleState};
use team_battle::combat::{calculate_damage, Character, CharacterType, Skill, SpecialAbility, Stats, Team};
use team_battle::core::config::BattleConfig;
use team_battle::core::types::Side;

fn fighter(id: &str, kind: CharacterType) -> Character {
    Character::new(id, id, kind, Stats::new(12000, 8000, 15000))
        .with_ability(SpecialAbility::new("Beam", 2.5, 3))
        .with_leader_skill(Skill::new("Rally", 1.3, 1.3))
}

fn line_up(prefix: &str, side: Side, size: usize) -> Team {
    let kinds = [
        CharacterType::Str,
        CharacterType::Agl,
        CharacterType::Teq,
        CharacterType::Int,
        CharacterType::Phy,
    ];
    let characters = (0..size)
        .map(|i| fighter(&format!("{}{}", prefix, i), kinds[i % kinds.len()]))
        .collect();
    Team::led_by_first(prefix, side, characters)
}

fn duel() -> BattleState {
    start_battle(line_up("p", Side::Player, 3), line_up("e", Side::Enemy, 3)).expect("valid teams")
}

fn bench_single_damage_calc(c: &mut Criterion) {
    let attacker = fighter("a", CharacterType::Str);
    let defender = fighter("d", CharacterType::Phy);
    let leader = Skill::new("Rally", 1.3, 1.3);

    c.bench_function("damage_calc_single", |b| {
        b.iter(|| {
            calculate_damage(
                black_box(&attacker),
                black_box(Some(&leader)),
                black_box(&defender),
                black_box(Some(&leader)),
                black_box(attacker.abilities.first()),
            )
        })
    });
}

fn bench_resolve_action(c: &mut Criterion) {
    let state = duel();
    let action = BattleAction::special(Side::Player, "p0", "e1", 0);

    c.bench_function("resolve_action_special", |b| {
        b.iter(|| resolve_action(black_box(&action), black_box(&state)))
    });
}

fn bench_full_battle(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_battle");

    for size in [1usize, 3, 6] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut session = BattleSession::with_seed(
                    line_up("p", Side::Player, size),
                    line_up("e", Side::Enemy, size),
                    BattleConfig::headless(),
                    7,
                )
                .expect("valid teams");
                session.run_to_end()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_damage_calc,
    bench_resolve_action,
    bench_full_battle
);
criterion_main!(benches);
