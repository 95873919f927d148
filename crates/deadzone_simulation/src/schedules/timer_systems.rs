//! Timer systems для CombatTick
//!
//! Оба драйвера (host step и FixedUpdate) сходятся в `step_world`.

use bevy::prelude::{Fixed, Time, World};
use super::CombatTick;
use crate::clock::GameClock;

/// Продвинуть GameClock на `delta_ms` и выполнить один CombatTick
pub fn step_world(world: &mut World, delta_ms: f64) {
    world.resource_mut::<GameClock>().advance(delta_ms);
    world.run_schedule(CombatTick);
}

/// System: один CombatTick на каждый FixedUpdate
///
/// Exclusive system (требует &mut World для run_schedule).
/// Delta берётся из `Time<Fixed>`.
pub fn run_combat_tick(world: &mut World) {
    let delta_ms = world.resource::<Time<Fixed>>().delta_secs_f64() * 1000.0;
    step_world(world, delta_ms);
}
