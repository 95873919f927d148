//! Shrinking safe zone (battle royale pressure)
//!
//! ZoneController: чистая state machine (Resource).
//! update_zone: продвигает её раз в tick и генерирует DamageRequest для
//! всех живых бойцов вне live круга.

use bevy::prelude::*;
use crate::clock::GameClock;
use crate::combat::{DamageRequest, DamageSource, Dead};
use crate::components::{Combatant, Position};
use crate::schedules::{CombatTick, SimSet};
use crate::DeterministicRng;

pub mod controller;
pub mod events;

#[cfg(test)]
mod controller_tests;

pub use controller::{ZoneCircle, ZoneController, ZonePhase};
pub use events::ZonePhaseChanged;

/// System: zone tick + урон вне зоны
pub fn update_zone(
    clock: Res<GameClock>,
    mut rng: ResMut<DeterministicRng>,
    mut zone: ResMut<ZoneController>,
    combatants: Query<(Entity, &Position), (With<Combatant>, Without<Dead>)>,
    mut phase_events: EventWriter<ZonePhaseChanged>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    if let Some(phase) = zone.advance(clock.delta_ms, &mut rng.rng) {
        phase_events.write(ZonePhaseChanged {
            phase,
            current: zone.current(),
            target: zone.target(),
        });

        crate::log(&format!(
            "Zone → {:?}: live r={:.0}, target r={:.0} at {:?}",
            phase,
            zone.current().radius,
            zone.target().radius,
            zone.target().center
        ));
    }

    if !zone.take_damage_check(clock.now_ms) {
        return;
    }

    let damage = zone.damage_per_check();
    for (entity, position) in combatants.iter() {
        if zone.is_outside(position.0) {
            damage_requests.write(DamageRequest::new(entity, damage, DamageSource::Zone));
        }
    }
}

/// Zone Plugin
///
/// ZoneController создаётся из SimulationConfig + DeterministicRng (FromWorld).
pub struct ZonePlugin;

impl Plugin for ZonePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ZonePhaseChanged>()
            .init_resource::<ZoneController>();

        app.add_systems(CombatTick, update_zone.in_set(SimSet::Zone));
    }
}
