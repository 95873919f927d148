//! Damage calculation
//!
//! Формула:
//! - mitigation = min(armor / 200, 0.8)
//! - effective = raw × (1 − mitigation)
//! - ignore_armor (poison) → effective = raw
//!
//! Применение к Health и death transition: в `systems::damage`.

use bevy::prelude::*;

/// Делитель armor (armor 200 → максимум без cap)
pub const ARMOR_DIVISOR: f32 = 200.0;
/// Максимальная доля поглощаемого урона
pub const MAX_MITIGATION: f32 = 0.8;
/// Сколько держится hit flash после урона (ms)
pub const HIT_FLASH_MS: f64 = 100.0;

/// Компонент-маркер: entity мертв (Health <= 0)
///
/// Мёртвые не двигаются, не стреляют и не участвуют в hit-test.
/// Cleanup удаляет их в конце того же tick.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Компонент-маркер: недавно получил урон (визуальный flash у host)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HitFlash;

/// Доля урона, которую поглощает armor
pub fn mitigation(armor: f32) -> f32 {
    (armor.max(0.0) / ARMOR_DIVISOR).min(MAX_MITIGATION)
}

/// Урон после armor
pub fn effective_damage(raw: f32, armor: f32, ignore_armor: bool) -> f32 {
    let raw = raw.max(0.0);
    if ignore_armor {
        raw
    } else {
        raw * (1.0 - mitigation(armor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_mitigation_at_100_armor() {
        assert_eq!(mitigation(100.0), 0.5);
        assert_eq!(effective_damage(100.0, 100.0, false), 50.0);
    }

    #[test]
    fn test_mitigation_is_capped() {
        assert_eq!(mitigation(1000.0), MAX_MITIGATION);
        assert!((effective_damage(100.0, 1000.0, false) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_armor_full_damage() {
        assert_eq!(effective_damage(25.0, 0.0, false), 25.0);
    }

    #[test]
    fn test_ignore_armor() {
        assert_eq!(effective_damage(4.0, 1000.0, true), 4.0);
    }

    #[test]
    fn test_negative_raw_is_zero() {
        assert_eq!(effective_damage(-10.0, 0.0, false), 0.0);
    }
}
