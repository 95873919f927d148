//! Projectile systems (полёт + resolve).

use bevy::prelude::*;
use crate::clock::GameClock;
use crate::combat::{
    DamageRequest, DamageSource, Dead, HitCandidate, Projectile, ProjectileMissed, ProjectileStep,
};
use crate::components::{Combatant, Hitbox, Position};

/// System: продвинуть все projectile на один tick
///
/// Hit → DamageRequest (+ poison payload), despawn.
/// Miss → ProjectileMissed (если есть drop-on-miss item), despawn.
pub fn advance_projectiles(
    mut commands: Commands,
    clock: Res<GameClock>,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    combatants: Query<(Entity, &Position, &Hitbox), (With<Combatant>, Without<Dead>)>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut missed_events: EventWriter<ProjectileMissed>,
) {
    let mut candidates: Vec<HitCandidate> = combatants
        .iter()
        .map(|(entity, position, hitbox)| HitCandidate {
            entity,
            center: position.0,
            radius: hitbox.radius,
        })
        .collect();
    // Стабильный порядок для равных t
    candidates.sort_by_key(|c| c.entity.index());

    let delta_secs = clock.delta_secs();

    for (entity, mut projectile) in projectiles.iter_mut() {
        match projectile.advance(delta_secs, &candidates) {
            ProjectileStep::Traveling => {}
            ProjectileStep::Hit { target, .. } => {
                damage_requests.write(
                    DamageRequest::new(target, projectile.damage, DamageSource::Projectile)
                        .from_attacker(projectile.source)
                        .with_poison(projectile.poison),
                );
                commands.entity(entity).despawn();
            }
            ProjectileStep::Miss { point } => {
                if let Some(item_id) = projectile.drop_on_miss.clone() {
                    missed_events.write(ProjectileMissed {
                        item_id,
                        position: point,
                    });
                }
                commands.entity(entity).despawn();
            }
        }
    }
}
