//! Weapon stats (immutable per weapon instance)
//!
//! Architecture:
//! - `WeaponStats`: неизменяемые параметры, валидируются при создании
//! - `WeaponKind`: Ranged (projectile) / Melee (мгновенный hit-test)
//! - `ProjectilePayload`: опциональный груз пули (poison, drop-on-miss, speed)
//! - Presets: Glock, AK-47, Shotgun, Knife, Needle

use bevy::prelude::*;
use thiserror::Error;

/// Скорость projectile по умолчанию (units/sec)
pub const DEFAULT_PROJECTILE_SPEED: f32 = 1000.0;

/// Тип оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WeaponKind {
    /// Стреляет projectile
    Ranged,
    /// Мгновенный удар перед бойцом, патроны не тратит
    Melee,
}

/// Тип патронов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AmmoKind {
    Nine,
    SevenSixTwo,
    Shell,
    None,
}

/// Параметры poison, которые несёт projectile
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PoisonSpec {
    /// Длительность (ms)
    pub duration_ms: f64,
    /// Урон за один tick poison
    pub damage: f32,
    /// Задержка до первого tick (ms)
    pub interval_ms: f64,
}

/// Опциональный груз projectile
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct ProjectilePayload {
    pub poison: Option<PoisonSpec>,
    /// Item id, который выпадает в точке промаха
    pub drop_on_miss: Option<String>,
    /// Override скорости projectile
    pub speed: Option<f32>,
}

/// Ошибки валидации weapon config (fail fast при создании)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeaponConfigError {
    #[error("weapon `{name}`: fire rate interval must be positive (got {value} ms)")]
    NonPositiveFireRate { name: String, value: f64 },

    #[error("weapon `{name}`: damage must not be negative (got {value})")]
    NegativeDamage { name: String, value: f32 },

    #[error("weapon `{name}`: magazine size {magazine} exceeds reserve max {reserve}")]
    MagazineExceedsReserve {
        name: String,
        magazine: u32,
        reserve: u32,
    },

    #[error("weapon `{name}`: {field} must be finite and non-negative (got {value})")]
    InvalidNumber {
        name: String,
        field: &'static str,
        value: f64,
    },
}

/// Weapon stats (immutable)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct WeaponStats {
    pub name: String,
    pub kind: WeaponKind,
    /// Урон за попадание (до armor)
    pub damage: f32,
    /// Дальность (units)
    pub range: f32,
    /// Минимальный интервал между выстрелами (ms)
    pub fire_rate_ms: f64,
    pub ammo_kind: AmmoKind,
    pub magazine_size: u32,
    pub reserve_max: u32,
    /// Длительность перезарядки (ms)
    pub reload_ms: f64,
    /// Полный угол разброса (градусы)
    pub spread_degrees: f32,
    pub automatic: bool,
    pub payload: Option<ProjectilePayload>,
}

impl WeaponStats {
    /// Проверка инвариантов. Вызывается из `Weapon::new`.
    pub fn validate(&self) -> Result<(), WeaponConfigError> {
        if !(self.fire_rate_ms > 0.0) {
            return Err(WeaponConfigError::NonPositiveFireRate {
                name: self.name.clone(),
                value: self.fire_rate_ms,
            });
        }

        if self.damage < 0.0 {
            return Err(WeaponConfigError::NegativeDamage {
                name: self.name.clone(),
                value: self.damage,
            });
        }

        if self.magazine_size > self.reserve_max {
            return Err(WeaponConfigError::MagazineExceedsReserve {
                name: self.name.clone(),
                magazine: self.magazine_size,
                reserve: self.reserve_max,
            });
        }

        self.check_number("damage", self.damage as f64)?;
        self.check_number("range", self.range as f64)?;
        self.check_number("reload_ms", self.reload_ms)?;
        self.check_number("spread_degrees", self.spread_degrees as f64)?;

        if let Some(payload) = &self.payload {
            if let Some(speed) = payload.speed {
                self.check_number("payload.speed", speed as f64)?;
            }
            if let Some(poison) = &payload.poison {
                self.check_number("payload.poison.duration_ms", poison.duration_ms)?;
                self.check_number("payload.poison.damage", poison.damage as f64)?;
                self.check_number("payload.poison.interval_ms", poison.interval_ms)?;
            }
        }

        Ok(())
    }

    fn check_number(&self, field: &'static str, value: f64) -> Result<(), WeaponConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(WeaponConfigError::InvalidNumber {
                name: self.name.clone(),
                field,
                value,
            })
        }
    }

    pub fn is_melee(&self) -> bool {
        self.kind == WeaponKind::Melee
    }

    pub fn is_ranged(&self) -> bool {
        self.kind == WeaponKind::Ranged
    }

    /// Скорость projectile (override из payload или default)
    pub fn projectile_speed(&self) -> f32 {
        self.payload
            .as_ref()
            .and_then(|p| p.speed)
            .unwrap_or(DEFAULT_PROJECTILE_SPEED)
    }

    /// Пистолет: 9mm, 12/60, полуавтомат
    pub fn glock() -> Self {
        Self {
            name: "Glock".to_string(),
            kind: WeaponKind::Ranged,
            damage: 15.0,
            range: 600.0,
            fire_rate_ms: 300.0,
            ammo_kind: AmmoKind::Nine,
            magazine_size: 12,
            reserve_max: 60,
            reload_ms: 1500.0,
            spread_degrees: 5.0,
            automatic: false,
            payload: None,
        }
    }

    /// Автомат: 7.62mm, 600 RPM
    pub fn ak47() -> Self {
        Self {
            name: "AK-47".to_string(),
            kind: WeaponKind::Ranged,
            damage: 25.0,
            range: 800.0,
            fire_rate_ms: 100.0,
            ammo_kind: AmmoKind::SevenSixTwo,
            magazine_size: 30,
            reserve_max: 90,
            reload_ms: 2500.0,
            spread_degrees: 8.0,
            automatic: true,
            payload: None,
        }
    }

    /// Дробовик: один тяжёлый заряд с широким разбросом
    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun".to_string(),
            kind: WeaponKind::Ranged,
            damage: 40.0,
            range: 400.0,
            fire_rate_ms: 900.0,
            ammo_kind: AmmoKind::Shell,
            magazine_size: 6,
            reserve_max: 30,
            reload_ms: 2500.0,
            spread_degrees: 20.0,
            automatic: false,
            payload: None,
        }
    }

    pub fn knife() -> Self {
        Self {
            name: "Knife".to_string(),
            kind: WeaponKind::Melee,
            damage: 30.0,
            range: 50.0,
            fire_rate_ms: 500.0,
            ammo_kind: AmmoKind::None,
            magazine_size: 0,
            reserve_max: 0,
            reload_ms: 0.0,
            spread_degrees: 0.0,
            automatic: false,
            payload: None,
        }
    }

    /// Игла Junkie: короткий бросок с poison, промах оставляет иглу на земле
    pub fn needle() -> Self {
        Self {
            name: "Needle".to_string(),
            kind: WeaponKind::Ranged,
            damage: 5.0,
            range: 120.0,
            fire_rate_ms: 800.0,
            ammo_kind: AmmoKind::None,
            magazine_size: 5,
            reserve_max: 20,
            reload_ms: 1000.0,
            spread_degrees: 10.0,
            automatic: false,
            payload: Some(ProjectilePayload {
                poison: Some(PoisonSpec {
                    duration_ms: 5000.0,
                    damage: 2.0,
                    interval_ms: 1000.0,
                }),
                drop_on_miss: Some("needle".to_string()),
                speed: Some(600.0),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for stats in [
            WeaponStats::glock(),
            WeaponStats::ak47(),
            WeaponStats::shotgun(),
            WeaponStats::knife(),
            WeaponStats::needle(),
        ] {
            assert_eq!(stats.validate(), Ok(()), "preset {} invalid", stats.name);
        }
    }

    #[test]
    fn test_zero_fire_rate_rejected() {
        let mut stats = WeaponStats::glock();
        stats.fire_rate_ms = 0.0;
        assert!(matches!(
            stats.validate(),
            Err(WeaponConfigError::NonPositiveFireRate { .. })
        ));
    }

    #[test]
    fn test_negative_damage_rejected() {
        let mut stats = WeaponStats::ak47();
        stats.damage = -1.0;
        assert!(matches!(
            stats.validate(),
            Err(WeaponConfigError::NegativeDamage { .. })
        ));
    }

    #[test]
    fn test_magazine_larger_than_reserve_rejected() {
        let mut stats = WeaponStats::glock();
        stats.magazine_size = 100;
        assert_eq!(
            stats.validate(),
            Err(WeaponConfigError::MagazineExceedsReserve {
                name: "Glock".to_string(),
                magazine: 100,
                reserve: 60,
            })
        );
    }

    #[test]
    fn test_nan_range_rejected() {
        let mut stats = WeaponStats::glock();
        stats.range = f32::NAN;
        assert!(matches!(
            stats.validate(),
            Err(WeaponConfigError::InvalidNumber { field: "range", .. })
        ));
    }

    #[test]
    fn test_projectile_speed_override() {
        assert_eq!(WeaponStats::glock().projectile_speed(), DEFAULT_PROJECTILE_SPEED);
        assert_eq!(WeaponStats::needle().projectile_speed(), 600.0);
        assert!(WeaponStats::knife().is_melee());
        assert!(WeaponStats::needle().is_ranged());
    }
}
