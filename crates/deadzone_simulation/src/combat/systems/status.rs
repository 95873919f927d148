//! Status effect systems (poison).

use bevy::prelude::*;
use crate::clock::GameClock;
use crate::combat::{DamageRequest, DamageSource, Dead, PoisonStatus};
use crate::components::Combatant;

/// System: tick poison у всех живых бойцов
///
/// Урон poison идёт мимо armor.
pub fn tick_poison(
    clock: Res<GameClock>,
    mut statuses: Query<(Entity, &mut PoisonStatus), (With<Combatant>, Without<Dead>)>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    for (entity, mut status) in statuses.iter_mut() {
        if !status.is_active() {
            continue;
        }

        if let Some(damage) = status.tick(clock.delta_ms) {
            damage_requests.write(
                DamageRequest::new(entity, damage, DamageSource::Poison).ignoring_armor(),
            );
        }
    }
}
