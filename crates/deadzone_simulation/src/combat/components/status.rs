//! Poison status (stacking damage over time)
//!
//! Правило:
//! - apply на неактивный → Active(duration, interval, damage)
//! - apply на активный → damage_per_tick += damage, duration = новая, interval тикает дальше
//! - tick: interval ≤ 0 → урон (мимо armor), interval = 1000ms; duration ≤ 0 → Inactive
//!
//! Один активный экземпляр на бойца.

use bevy::prelude::*;
use crate::combat::weapon_stats::PoisonSpec;

/// Интервал между tick урона после первого (ms)
pub const POISON_TICK_INTERVAL_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum PoisonState {
    #[default]
    Inactive,
    Active {
        duration_remaining_ms: f64,
        interval_remaining_ms: f64,
        damage_per_tick: f32,
    },
}

/// Poison tracker бойца
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PoisonStatus {
    pub state: PoisonState,
}

impl PoisonStatus {
    pub fn is_active(&self) -> bool {
        matches!(self.state, PoisonState::Active { .. })
    }

    pub fn damage_per_tick(&self) -> f32 {
        match self.state {
            PoisonState::Active { damage_per_tick, .. } => damage_per_tick,
            PoisonState::Inactive => 0.0,
        }
    }

    pub fn duration_remaining_ms(&self) -> f64 {
        match self.state {
            PoisonState::Active { duration_remaining_ms, .. } => duration_remaining_ms,
            PoisonState::Inactive => 0.0,
        }
    }

    pub fn apply(&mut self, duration_ms: f64, damage: f32, interval_ms: f64) {
        self.state = match self.state {
            PoisonState::Inactive => PoisonState::Active {
                duration_remaining_ms: duration_ms,
                interval_remaining_ms: interval_ms,
                damage_per_tick: damage,
            },
            PoisonState::Active {
                interval_remaining_ms,
                damage_per_tick,
                ..
            } => PoisonState::Active {
                duration_remaining_ms: duration_ms,
                interval_remaining_ms,
                damage_per_tick: damage_per_tick + damage,
            },
        };
    }

    pub fn apply_spec(&mut self, spec: &PoisonSpec) {
        self.apply(spec.duration_ms, spec.damage, spec.interval_ms);
    }

    /// Продвинуть таймеры. Возвращает урон, если в этом tick сработал interval.
    pub fn tick(&mut self, delta_ms: f64) -> Option<f32> {
        let PoisonState::Active {
            duration_remaining_ms,
            interval_remaining_ms,
            damage_per_tick,
        } = self.state
        else {
            return None;
        };

        let duration = duration_remaining_ms - delta_ms;
        let mut interval = interval_remaining_ms - delta_ms;
        let mut damage = None;

        if interval <= 0.0 {
            damage = Some(damage_per_tick);
            interval = POISON_TICK_INTERVAL_MS;
        }

        self.state = if duration <= 0.0 {
            PoisonState::Inactive
        } else {
            PoisonState::Active {
                duration_remaining_ms: duration,
                interval_remaining_ms: interval,
                damage_per_tick,
            }
        };

        damage
    }
}
