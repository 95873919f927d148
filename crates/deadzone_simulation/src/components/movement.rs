//! Movement компоненты: скорость, направление, velocity

use bevy::prelude::*;

/// Velocity (world units / sec)
///
/// AI пишет сюда желаемое движение, `integrate_velocity` переносит в Position.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Направление взгляда (радианы, 0 = +X)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Heading(pub f32);

/// Разовый толчок (units/sec), поверх Velocity
///
/// Melee knockback копится здесь; `integrate_velocity` применяет его ровно
/// один tick и обнуляет. Velocity бойца при этом не меняется.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Knockback(pub Vec2);

/// Скорость движения бойца (world units / sec)
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 200.0 } // скорость игрока
    }
}
