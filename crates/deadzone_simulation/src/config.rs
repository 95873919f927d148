//! Simulation config (map size, zone timings, seed)
//!
//! Дефолты: tile 100, карта 50×50 тайлов,
//! зона: 10s ожидание, 20s сжатие, 5 урона раз в секунду).
//! Загружается из RON; отсутствующие поля берутся из `Default`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in {range} (got {value})")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f64,
    },
}

/// Параметры shrinking zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Длительность фазы Waiting (ms)
    pub wait_duration_ms: f64,
    /// Длительность фазы Shrinking (ms)
    pub shrink_duration_ms: f64,
    /// Радиус следующего круга = radius × shrink_factor
    pub shrink_factor: f32,
    /// Доля пути к target за один tick во время Shrinking
    pub smoothing_per_tick: f32,
    /// Урон за одну проверку вне зоны (через armor)
    pub damage_per_check: f32,
    /// Минимальный интервал между проверками урона (ms)
    pub damage_interval_ms: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            wait_duration_ms: 10_000.0,
            shrink_duration_ms: 20_000.0,
            shrink_factor: 0.7,
            smoothing_per_tick: 0.05,
            damage_per_check: 5.0,
            damage_interval_ms: 1_000.0,
        }
    }
}

/// Корневой конфиг симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Размер тайла карты (world units)
    pub tile_size: f32,
    pub map_width_tiles: u32,
    pub map_height_tiles: u32,
    pub zone: ZoneConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tile_size: 100.0,
            map_width_tiles: 50,
            map_height_tiles: 50,
            zone: ZoneConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Парсит RON и валидирует результат
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tile_size", self.tile_size as f64)?;
        positive("map_width_tiles", self.map_width_tiles as f64)?;
        positive("map_height_tiles", self.map_height_tiles as f64)?;
        positive("zone.wait_duration_ms", self.zone.wait_duration_ms)?;
        positive("zone.shrink_duration_ms", self.zone.shrink_duration_ms)?;
        positive("zone.damage_interval_ms", self.zone.damage_interval_ms)?;

        let factor = self.zone.shrink_factor;
        if !(factor > 0.0 && factor < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "zone.shrink_factor",
                range: "(0, 1)",
                value: factor as f64,
            });
        }

        let smoothing = self.zone.smoothing_per_tick;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "zone.smoothing_per_tick",
                range: "(0, 1]",
                value: smoothing as f64,
            });
        }

        if !(self.zone.damage_per_check >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "zone.damage_per_check",
                range: "[0, inf)",
                value: self.zone.damage_per_check as f64,
            });
        }

        Ok(())
    }

    /// Размер карты в world units
    pub fn map_size(&self) -> Vec2 {
        Vec2::new(
            self.map_width_tiles as f32 * self.tile_size,
            self.map_height_tiles as f32 * self.tile_size,
        )
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN тоже отсекается (сравнение false)
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
