//! FSM AI systems (decide → velocity/heading + fire/reload commands).

use bevy::prelude::*;
use crate::ai::{AiBrain, AiContext, AiStateChanged, AiTarget, Enemy};
use crate::clock::GameClock;
use crate::combat::{Dead, FireCommand, ReloadCommand, Weapon};
use crate::components::{Combatant, Heading, MovementSpeed, Position, Velocity};
use crate::DeterministicRng;

/// Система: AI FSM для всех живых врагов
///
/// Порядок на врага:
/// 1. Пустой магазин → ReloadCommand
/// 2. Нет цели → ничего (цель пропала → сброс цели и остановка)
/// 3. `AiBrain::think` → velocity, heading, AiStateChanged
/// 4. fire_at + оружие готово → FireCommand
pub fn update_enemy_ai(
    clock: Res<GameClock>,
    mut rng: ResMut<DeterministicRng>,
    mut enemies: Query<
        (
            Entity,
            &Enemy,
            &mut AiBrain,
            &mut AiTarget,
            &Position,
            &MovementSpeed,
            &mut Velocity,
            &mut Heading,
            Option<&Weapon>,
        ),
        Without<Dead>,
    >,
    targets: Query<&Position, (With<Combatant>, Without<Dead>)>,
    mut fire_commands: EventWriter<FireCommand>,
    mut reload_commands: EventWriter<ReloadCommand>,
    mut state_events: EventWriter<AiStateChanged>,
) {
    for (entity, enemy, mut brain, mut target, position, speed, mut velocity, mut heading, weapon) in
        enemies.iter_mut()
    {
        if weapon.is_some_and(Weapon::needs_reload) {
            reload_commands.write(ReloadCommand { entity });
        }

        let Some(target_entity) = target.0 else {
            continue;
        };

        let Ok(target_position) = targets.get(target_entity) else {
            crate::log(&format!(
                "AI: {:?} lost target {:?}, stopping",
                entity, target_entity
            ));
            target.0 = None;
            velocity.0 = Vec2::ZERO;
            continue;
        };

        let profile = enemy.archetype.profile();
        let ctx = AiContext {
            position: position.0,
            target: target_position.0,
            speed: speed.speed,
            delta_ms: clock.delta_ms,
        };

        let decision = brain.think(&profile, &ctx, &mut rng.rng);

        if decision.changed() {
            state_events.write(AiStateChanged {
                entity,
                from: decision.previous,
                to: decision.state,
            });
        }

        velocity.0 = decision.velocity;
        if let Some(angle) = decision.heading {
            heading.0 = angle;
        }

        let Some(aim) = decision.fire_at else {
            continue;
        };

        if weapon.is_some_and(|w| w.can_fire(clock.now_ms)) {
            fire_commands.write(FireCommand {
                shooter: entity,
                target: aim,
            });
        }
    }
}
