//! Базовые компоненты бойцов: Combatant, Health, Armor, Hitbox

use bevy::prelude::*;
use crate::ai::Archetype;
use crate::combat::PoisonStatus;
use crate::components::{Heading, Knockback, MovementSpeed, Position, Velocity};

/// Кто это: игрок или враг определённого archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CombatantKind {
    #[default]
    Player,
    Enemy(Archetype),
}

/// Боец (игрок или враг): всё что имеет HP, armor и получает урон
///
/// Автоматически добавляет Health, Armor, Hitbox, позицию/скорость/knockback и PoisonStatus через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    Armor,
    Hitbox,
    Position,
    Heading,
    Velocity,
    Knockback,
    MovementSpeed,
    PoisonStatus
)]
pub struct Combatant {
    pub kind: CombatantKind,
}

/// Маркер игрока
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Вычесть урон (clamp на 0). Возвращает реально снятое HP.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        before - self.current
    }
}

/// Броня: mitigation = min(value / 200, 0.8)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Armor {
    pub value: f32,
}

impl Armor {
    pub fn new(value: f32) -> Self {
        Self { value: value.max(0.0) }
    }
}

/// Круглый hitbox бойца (world units)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hitbox {
    pub radius: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self { radius: 16.0 } // спрайт 32×32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100.0);
        assert_eq!(health.current, 100.0);

        assert_eq!(health.take_damage(30.0), 30.0);
        assert_eq!(health.current, 70.0);
        assert!(health.is_alive());

        // Clamp на 0
        assert_eq!(health.take_damage(100.0), 70.0);
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut health = Health::new(100.0);
        assert_eq!(health.take_damage(-20.0), 0.0);
        assert_eq!(health.current, 100.0);
    }
}
