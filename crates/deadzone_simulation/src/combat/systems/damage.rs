//! Damage systems (resolve + death + cleanup).

use bevy::prelude::*;
use crate::clock::{DeferredAction, GameClock, ScheduledActions};
use crate::combat::damage::{effective_damage, HIT_FLASH_MS};
use crate::combat::{DamageDealt, DamageRequest, Dead, EntityDied, HitFlash, PoisonStatus};
use crate::components::{Armor, Combatant, Health, Position, Velocity};

/// System: resolve всех DamageRequest этого tick
///
/// 1. Мёртвая/пропавшая цель → no-op
/// 2. Armor mitigation (кроме ignore_armor)
/// 3. Health −= effective, poison payload → PoisonStatus
/// 4. DamageDealt + hit flash на 100ms от последнего попадания
/// 5. HP == 0 → velocity 0, Dead, EntityDied
pub fn resolve_damage_requests(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    clock: Res<GameClock>,
    mut actions: ResMut<ScheduledActions>,
    mut targets: Query<
        (&Combatant, &Position, &Armor, &mut Health, &mut PoisonStatus, &mut Velocity),
        Without<Dead>,
    >,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok((combatant, position, armor, mut health, mut poison, mut velocity)) =
            targets.get_mut(request.target)
        else {
            continue;
        };

        // Dead вставляется через Commands, поэтому второй запрос в том же tick
        // видит цель без маркера
        if !health.is_alive() {
            continue;
        }

        let effective = effective_damage(request.amount, armor.value, request.ignore_armor);
        let applied = health.take_damage(effective);

        if let Some(spec) = request.poison {
            poison.apply_spec(&spec);
        }

        let killed = !health.is_alive();

        damage_dealt_events.write(DamageDealt {
            target: request.target,
            attacker: request.attacker,
            source: request.source,
            raw: request.amount,
            applied,
            remaining_hp: health.current,
            killed,
        });

        if killed {
            velocity.0 = Vec2::ZERO;
            commands.entity(request.target).insert(Dead).remove::<HitFlash>();
            entity_died_events.write(EntityDied {
                entity: request.target,
                kind: combatant.kind,
                position: position.0,
                killer: request.attacker,
            });

            crate::log_info(&format!(
                "{:?} ({:?}) killed by {:?} via {:?}",
                request.target, combatant.kind, request.attacker, request.source
            ));
            continue;
        }

        if applied > 0.0 {
            // Каждое попадание продлевает flash на полные 100ms
            commands.entity(request.target).insert(HitFlash);
            actions.reschedule(
                request.target,
                clock.now_ms + HIT_FLASH_MS,
                DeferredAction::ClearHitFlash,
            );
        }
    }
}

/// System: удалить мёртвых бойцов
///
/// Отложенные действия (reload, hit flash) отменяются до despawn.
pub fn despawn_dead(
    mut commands: Commands,
    mut actions: ResMut<ScheduledActions>,
    dead: Query<Entity, With<Dead>>,
) {
    for entity in dead.iter() {
        let cancelled = actions.cancel_owner(entity);
        commands.entity(entity).despawn();

        crate::log(&format!(
            "Despawned dead {:?} ({} pending actions cancelled)",
            entity, cancelled
        ));
    }
}
