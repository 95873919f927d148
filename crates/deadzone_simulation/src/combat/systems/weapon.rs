//! Weapon systems (fire/reload commands + deferred actions).

use bevy::prelude::*;
use crate::clock::{DeferredAction, GameClock, ScheduledActions};
use crate::combat::{
    DamageRequest, DamageSource, Dead, FireCommand, HitFlash, HolsteredWeapon, MeleeStrike,
    Projectile, ReloadCommand, ReloadCompleted, ReloadStarted, Shot, SwitchWeaponCommand, Weapon,
    WeaponFired, WeaponSwitched,
};
use crate::components::{Combatant, Heading, Hitbox, Knockback, Position};
use crate::DeterministicRng;

/// System: выполнить due отложенные действия
///
/// Действия мёртвых уже отменены в cleanup; если owner пропал: действие просто теряется.
pub fn run_scheduled_actions(
    mut commands: Commands,
    clock: Res<GameClock>,
    mut actions: ResMut<ScheduledActions>,
    mut weapons: Query<&mut Weapon, Without<Dead>>,
    mut completed_events: EventWriter<ReloadCompleted>,
) {
    for pending in actions.take_due(clock.now_ms) {
        match pending.action {
            DeferredAction::CompleteReload => {
                let Ok(mut weapon) = weapons.get_mut(pending.owner) else {
                    continue;
                };

                let loaded = weapon.complete_reload();
                completed_events.write(ReloadCompleted {
                    entity: pending.owner,
                    loaded,
                    magazine: weapon.magazine(),
                    reserve: weapon.reserve(),
                });

                crate::log(&format!(
                    "Reload complete: {:?} {} +{} ({}/{})",
                    pending.owner,
                    weapon.name(),
                    loaded,
                    weapon.magazine(),
                    weapon.reserve()
                ));
            }
            DeferredAction::ClearHitFlash => {
                if let Ok(mut entity_commands) = commands.get_entity(pending.owner) {
                    entity_commands.remove::<HitFlash>();
                }
            }
        }
    }
}

/// System: обработка SwitchWeaponCommand
///
/// Активный Weapon и HolsteredWeapon меняются местами. Идущая перезарядка
/// прерывается вместе с её CompleteReload. Без второго слота: no-op.
pub fn process_switch_commands(
    mut switch_commands: EventReader<SwitchWeaponCommand>,
    mut actions: ResMut<ScheduledActions>,
    mut loadouts: Query<(&mut Weapon, &mut HolsteredWeapon), Without<Dead>>,
    mut switched_events: EventWriter<WeaponSwitched>,
) {
    for command in switch_commands.read() {
        let Ok((mut active, mut holstered)) = loadouts.get_mut(command.entity) else {
            continue;
        };

        let reload_cancelled = active.cancel_reload();
        if reload_cancelled {
            actions.cancel(command.entity, DeferredAction::CompleteReload);
        }

        std::mem::swap(&mut *active, &mut holstered.0);

        switched_events.write(WeaponSwitched {
            entity: command.entity,
            active: active.name().to_string(),
            holstered: holstered.0.name().to_string(),
            reload_cancelled,
        });

        crate::log(&format!(
            "Weapon switched: {:?} {} → {}",
            command.entity,
            holstered.0.name(),
            active.name()
        ));
    }
}

/// System: обработка ReloadCommand
///
/// No-op если уже перезаряжается, магазин полон, запас пуст или оружия нет.
pub fn process_reload_commands(
    mut reload_commands: EventReader<ReloadCommand>,
    clock: Res<GameClock>,
    mut actions: ResMut<ScheduledActions>,
    mut weapons: Query<&mut Weapon, Without<Dead>>,
    mut started_events: EventWriter<ReloadStarted>,
) {
    for command in reload_commands.read() {
        let Ok(mut weapon) = weapons.get_mut(command.entity) else {
            continue;
        };

        let Some(duration_ms) = weapon.begin_reload() else {
            continue;
        };

        actions.schedule(
            command.entity,
            clock.now_ms + duration_ms,
            DeferredAction::CompleteReload,
        );
        started_events.write(ReloadStarted {
            entity: command.entity,
            duration_ms,
        });

        crate::log(&format!(
            "Reload started: {:?} {} ({} ms)",
            command.entity,
            weapon.name(),
            duration_ms
        ));
    }
}

/// System: обработка FireCommand
///
/// Ranged → spawn Projectile entity. Melee → мгновенный hit-test по всем
/// живым бойцам кроме стрелка, урон через DamageRequest + разовый Knockback.
pub fn process_fire_commands(
    mut commands: Commands,
    mut fire_commands: EventReader<FireCommand>,
    clock: Res<GameClock>,
    mut rng: ResMut<DeterministicRng>,
    mut shooters: Query<(&Position, &Heading, &mut Weapon), Without<Dead>>,
    mut targets: Query<(Entity, &Position, &Hitbox, &mut Knockback), (With<Combatant>, Without<Dead>)>,
    mut fired_events: EventWriter<WeaponFired>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    for command in fire_commands.read() {
        let Ok((position, heading, mut weapon)) = shooters.get_mut(command.shooter) else {
            continue;
        };

        let origin = position.0;
        let Some(shot) = weapon.shoot(origin, heading.0, command.target, clock.now_ms, &mut rng.rng)
        else {
            continue;
        };

        let angle = match &shot {
            Shot::Projectile(launch) => launch.angle,
            Shot::Melee(strike) => strike.angle,
        };

        fired_events.write(WeaponFired {
            shooter: command.shooter,
            weapon: weapon.name().to_string(),
            origin,
            angle,
            magazine_left: weapon.magazine(),
        });

        match shot {
            Shot::Projectile(launch) => {
                commands.spawn(Projectile::from_launch(command.shooter, launch));
            }
            Shot::Melee(strike) => {
                resolve_melee_strike(command.shooter, &strike, &mut targets, &mut damage_requests);
            }
        }
    }
}

fn resolve_melee_strike(
    attacker: Entity,
    strike: &MeleeStrike,
    targets: &mut Query<(Entity, &Position, &Hitbox, &mut Knockback), (With<Combatant>, Without<Dead>)>,
    damage_requests: &mut EventWriter<DamageRequest>,
) {
    let knockback = Vec2::from_angle(strike.angle) * strike.knockback;

    for (entity, position, hitbox, mut impulse) in targets.iter_mut() {
        if entity == attacker {
            continue;
        }

        if position.0.distance(strike.center) > strike.radius + hitbox.radius {
            continue;
        }

        damage_requests.write(
            DamageRequest::new(entity, strike.damage, DamageSource::Melee).from_attacker(attacker),
        );
        impulse.0 += knockback;
    }
}
