//! World positioning: Position, WorldBounds

use bevy::prelude::*;

/// Позиция на карте (world units, top-down 2D)
///
/// Host (movement/input) может писать сюда напрямую перед tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

/// Границы мира (clamp движения)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: size,
        }
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp() {
        let bounds = WorldBounds::from_size(Vec2::new(100.0, 50.0));
        assert_eq!(bounds.clamp(Vec2::new(-10.0, 70.0)), Vec2::new(0.0, 50.0));
        assert_eq!(bounds.clamp(Vec2::new(100.0, 0.0)), Vec2::new(100.0, 0.0));
        assert_eq!(bounds.clamp(Vec2::new(100.1, 25.0)), Vec2::new(100.0, 25.0));
    }
}
