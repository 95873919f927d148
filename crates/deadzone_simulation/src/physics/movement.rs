//! Kinematic движение бойцов
//!
//! Архитектура:
//! - Velocity пишут AI (враги) и host (игрок)
//! - Knockback: разовый импульс, живёт ровно один tick
//! - Интеграция velocity (+ knockback) → Position раз в tick
//! - Без коллизий между бойцами; только clamp по WorldBounds
//!
//! Детерминизм: delta берётся из GameClock, не из wall clock.

use bevy::prelude::*;
use crate::clock::GameClock;
use crate::combat::Dead;
use crate::components::{Combatant, Knockback, Position, Velocity, WorldBounds};

/// Система интеграции velocity → Position
///
/// position += (velocity + knockback) * dt, затем clamp по WorldBounds.
/// Knockback после применения обнуляется.
pub fn integrate_velocity(
    clock: Res<GameClock>,
    bounds: Res<WorldBounds>,
    mut query: Query<
        (&Velocity, &mut Knockback, &mut Position),
        (With<Combatant>, Without<Dead>),
    >,
) {
    let delta = clock.delta_secs();

    for (velocity, mut knockback, mut position) in query.iter_mut() {
        let motion = velocity.0 + knockback.0;
        if knockback.0 != Vec2::ZERO {
            knockback.0 = Vec2::ZERO;
        }

        if motion == Vec2::ZERO {
            continue;
        }

        position.0 = bounds.clamp(position.0 + motion * delta);
    }
}

/// Plugin движения
///
/// Регистрирует интеграцию в CombatTick (SimSet::Motion): после AI и
/// knockback, до полёта projectile.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        use crate::schedules::{CombatTick, SimSet};

        app.add_systems(CombatTick, integrate_velocity.in_set(SimSet::Motion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::run_system_once;

    fn world_with_clock(delta_ms: f64) -> World {
        let mut world = World::new();
        let mut clock = GameClock::default();
        clock.advance(delta_ms);
        world.insert_resource(clock);
        world.insert_resource(WorldBounds::from_size(Vec2::new(1000.0, 1000.0)));
        world
    }

    #[test]
    fn test_velocity_integration() {
        let mut world = world_with_clock(500.0);
        let entity = world
            .spawn((
                Combatant::default(),
                Position(Vec2::new(100.0, 100.0)),
                Velocity(Vec2::new(200.0, -100.0)),
            ))
            .id();

        run_system_once(&mut world, integrate_velocity);

        let position = world.get::<Position>(entity).map(|p| p.0);
        assert_eq!(position, Some(Vec2::new(200.0, 50.0)));
    }

    #[test]
    fn test_clamped_to_world_bounds() {
        let mut world = world_with_clock(1000.0);
        let entity = world
            .spawn((
                Combatant::default(),
                Position(Vec2::new(950.0, 10.0)),
                Velocity(Vec2::new(500.0, -500.0)),
            ))
            .id();

        run_system_once(&mut world, integrate_velocity);

        let position = world.get::<Position>(entity).map(|p| p.0);
        assert_eq!(position, Some(Vec2::new(1000.0, 0.0)));
    }

    #[test]
    fn test_dead_do_not_move() {
        let mut world = world_with_clock(1000.0);
        let entity = world
            .spawn((
                Combatant::default(),
                Dead,
                Position(Vec2::new(10.0, 10.0)),
                Velocity(Vec2::new(100.0, 0.0)),
            ))
            .id();

        run_system_once(&mut world, integrate_velocity);

        let position = world.get::<Position>(entity).map(|p| p.0);
        assert_eq!(position, Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_knockback_applies_once() {
        let mut world = world_with_clock(100.0);
        let entity = world
            .spawn((
                Combatant::default(),
                Position(Vec2::new(100.0, 100.0)),
                Knockback(Vec2::new(200.0, 0.0)),
            ))
            .id();

        run_system_once(&mut world, integrate_velocity);
        assert_eq!(world.get::<Position>(entity).map(|p| p.0), Some(Vec2::new(120.0, 100.0)));
        assert_eq!(world.get::<Knockback>(entity).map(|k| k.0), Some(Vec2::ZERO));
        assert_eq!(world.get::<Velocity>(entity).map(|v| v.0), Some(Vec2::ZERO));

        // Второй tick: толчок уже израсходован
        run_system_once(&mut world, integrate_velocity);
        assert_eq!(world.get::<Position>(entity).map(|p| p.0), Some(Vec2::new(120.0, 100.0)));
    }
}
