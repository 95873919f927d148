//! Custom schedule: один tick симуляции
//!
//! # Архитектура
//!
//! **CombatTick** запускается вручную (`CombatSimulation::step`) или из
//! FixedUpdate (`FixedTickDriverPlugin`). Внутри: строгий порядок SimSet:
//!
//! Timers → Decide → Act → Motion → Projectiles → Status → Zone → Damage → Cleanup
//!
//! Перед запуском `GameClock` продвигается на delta tick, все системы читают
//! время только из него.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

pub mod timer_systems;

pub use timer_systems::{run_combat_tick, step_world};

/// Custom schedule: CombatTick (один шаг симуляции)
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatTick;

/// Фазы tick (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Due отложенные действия (reload completion, hit flash)
    Timers,
    /// AI решения
    Decide,
    /// Fire/reload команды
    Act,
    /// velocity → position, clamp по WorldBounds
    Motion,
    Projectiles,
    /// Poison
    Status,
    Zone,
    /// Resolve всех DamageRequest
    Damage,
    /// Despawn мёртвых
    Cleanup,
}

/// Регистрация CombatTick + порядок SimSet
pub fn register_schedules(app: &mut App) {
    app.init_schedule(CombatTick);

    app.configure_sets(
        CombatTick,
        (
            SimSet::Timers,
            SimSet::Decide,
            SimSet::Act,
            SimSet::Motion,
            SimSet::Projectiles,
            SimSet::Status,
            SimSet::Zone,
            SimSet::Damage,
            SimSet::Cleanup,
        )
            .chain(),
    );
}
