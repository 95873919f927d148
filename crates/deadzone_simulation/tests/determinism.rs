//! Тесты детерминизма
//!
//! Одинаковый seed + одинаковые команды → идентичный мир
//! (spread, wander, зона, loadout SWAT идут через DeterministicRng)

use bevy::prelude::*;
use deadzone_simulation::*;

const TICK_MS: f64 = 1000.0 / 60.0;

/// Прогон боя: игрок с AK-47 против трёх врагов, возвращает snapshot
fn run_battle(seed: u64, ticks: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut sim = CombatSimulation::new(SimulationConfig {
        seed,
        ..Default::default()
    })
    .expect("valid config");

    let center = Vec2::new(2500.0, 2500.0);
    let player = sim.spawn_player(center, Some(Weapon::ak47()));
    let enemies = [
        sim.spawn_enemy(Archetype::Junkie, center + Vec2::new(450.0, 0.0)),
        sim.spawn_enemy(Archetype::Police, center + Vec2::new(0.0, 650.0)),
        sim.spawn_enemy(Archetype::Swat, center + Vec2::new(-700.0, 0.0)),
    ];
    sim.set_target_for_all_enemies(player);

    for tick in 0..ticks {
        // Игрок стреляет по первому живому врагу
        if tick % 10 == 0 {
            let aim = enemies
                .iter()
                .find_map(|&e| sim.combatant_status(e).map(|s| s.position));
            if let Some(aim) = aim {
                sim.fire(player, aim);
            }
        }
        sim.step(TICK_MS);
    }

    let world = sim.world_mut();
    (
        world_snapshot::<Position>(world),
        world_snapshot::<Health>(world),
        world_snapshot::<AiBrain>(world),
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_battle(SEED, 600);
    let second = run_battle(SEED, 600);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_battle(SEED, 300)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_zone_target_is_seeded() {
    let zone_after = |seed: u64| {
        let mut sim = CombatSimulation::new(SimulationConfig {
            seed,
            ..Default::default()
        })
        .expect("valid config");
        // wait 10s + shrink 20s + часть следующего цикла
        sim.run(3100, TICK_MS);
        sim.zone_status()
    };

    assert_eq!(zone_after(7), zone_after(7));
}

#[test]
fn test_headless_app_builds() {
    let mut app = create_headless_app(42);
    app.update();

    let world = app.world();
    assert_eq!(world.resource::<DeterministicRng>().seed, 42);
    assert!(world.get_resource::<ZoneController>().is_some());
    assert!(world.get_resource::<ScheduledActions>().is_some());
}
