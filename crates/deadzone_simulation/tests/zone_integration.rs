//! Zone + AI integration test
//!
//! Урон вне зоны по таймеру, смена фаз, переходы Junkie wander ↔ chase
//! при движении цели.

use bevy::prelude::*;
use deadzone_simulation::*;

const TICK_MS: f64 = 16.0;
const CENTER: Vec2 = Vec2::new(2500.0, 2500.0);

fn create_sim() -> CombatSimulation {
    CombatSimulation::new(SimulationConfig::default()).expect("valid config")
}

/// Test: 2500ms вне зоны → ровно 2 проверки урона
#[test]
fn test_outside_zone_takes_damage_per_check() {
    let mut sim = create_sim();
    let outside = sim.spawn_player(CENTER, None);
    let inside = sim.spawn_player(CENTER, None);

    // стартовый круг: центр карты, r = 5000
    sim.set_position(outside, CENTER + Vec2::new(5100.0, 0.0));

    // 156 × 16 = 2496ms
    sim.run(156, TICK_MS);

    let zone_hits: Vec<_> = sim
        .drain_events::<DamageDealt>()
        .into_iter()
        .filter(|d| d.source == DamageSource::Zone)
        .collect();
    assert_eq!(zone_hits.len(), 2);
    assert!(zone_hits.iter().all(|d| d.target == outside && d.applied == 5.0));

    assert_eq!(sim.combatant_status(outside).map(|s| s.hp), Some(90.0));
    assert_eq!(sim.combatant_status(inside).map(|s| s.hp), Some(100.0));
}

/// Test: Waiting → Shrinking → Waiting, live круг доходит до target
#[test]
fn test_zone_phase_cycle() {
    let mut sim = create_sim();

    let status = sim.zone_status();
    assert_eq!(status.phase, ZonePhase::Waiting);
    assert_eq!(status.current, ZoneCircle::new(CENTER, 5000.0));

    // wait 10s
    sim.run(626, TICK_MS);
    let changes = sim.drain_events::<ZonePhaseChanged>();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].phase, ZonePhase::Shrinking);
    assert!((changes[0].target.radius - 3500.0).abs() < 0.01);
    // новый центр в пределах старого круга
    assert!(changes[0].target.center.distance(CENTER) <= 1500.0 + 0.01);

    let target = changes[0].target;
    assert!(sim.zone_status().current.radius < 5000.0);

    // shrink 20s
    sim.run(1250, TICK_MS);
    let changes = sim.drain_events::<ZonePhaseChanged>();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].phase, ZonePhase::Waiting);
    assert_eq!(changes[0].current, target);

    // live круг встал ровно на target, следующий target уже выбран
    let status = sim.zone_status();
    assert_eq!(status.current, target);
    assert!((status.target.radius - 2450.0).abs() < 0.01);
}

/// Test: Junkie бродит, цель подходит ближе 500 → chase, уходит → снова wander
///
/// После chase wander продолжается со старым направлением, без мгновенного re-roll.
#[test]
fn test_junkie_wander_chase_wander() {
    let mut sim = create_sim();
    let player = sim.spawn_player(CENTER + Vec2::new(600.0, 0.0), None);
    let junkie = sim.spawn_enemy(Archetype::Junkie, CENTER);
    sim.set_target(junkie, Some(player));

    sim.step(TICK_MS);
    let state = |sim: &CombatSimulation| sim.world().get::<AiBrain>(junkie).map(|b| b.state);
    let velocity = |sim: &CombatSimulation| sim.world().get::<Velocity>(junkie).map(|v| v.0);
    let junkie_position = |sim: &CombatSimulation| {
        sim.combatant_status(junkie).map(|s| s.position).expect("junkie alive")
    };

    assert_eq!(state(&sim), Some(AiState::Wander));
    let wander_velocity = velocity(&sim).expect("junkie has velocity");
    assert!((wander_velocity.length() - 300.0).abs() < 0.01);

    // Цель в 400 units → chase на полной скорости
    let near = junkie_position(&sim) + Vec2::new(400.0, 0.0);
    sim.set_position(player, near);
    sim.step(TICK_MS);
    assert_eq!(state(&sim), Some(AiState::Chase));
    let chase_velocity = velocity(&sim).expect("junkie has velocity");
    assert!((chase_velocity - Vec2::new(500.0, 0.0)).length() < 0.01);

    // Цель снова далеко
    let far = junkie_position(&sim) + Vec2::new(900.0, 0.0);
    sim.set_position(player, far);
    sim.step(TICK_MS);
    assert_eq!(state(&sim), Some(AiState::Wander));
    assert_eq!(velocity(&sim), Some(wander_velocity));

    let transitions: Vec<_> = sim
        .drain_events::<AiStateChanged>()
        .into_iter()
        .map(|e| (e.from, e.to))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (AiState::Wander, AiState::Chase),
            (AiState::Chase, AiState::Wander)
        ]
    );
}
