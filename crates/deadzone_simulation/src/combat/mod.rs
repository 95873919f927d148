//! Combat system module
//!
//! ECS ответственность:
//! - Weapon state: ammo, reload, fire rate gating
//! - Projectile lifecycle: полёт, hit/miss resolve
//! - Damage: armor mitigation, HP, death transition
//! - Status: poison (stacking, мимо armor)
//!
//! Host ответственность: позиции игрока, loot drop по EntityDied/ProjectileMissed,
//! визуальный hit flash.

use bevy::prelude::*;
use crate::schedules::{CombatTick, SimSet};

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;
pub mod weapon_stats;

// Re-export основных типов
pub use components::*;
pub use damage::{effective_damage, mitigation, Dead, HitFlash};
pub use events::*;
pub use weapon_stats::{
    AmmoKind, PoisonSpec, ProjectilePayload, WeaponConfigError, WeaponKind, WeaponStats,
};

/// Combat Plugin
///
/// Регистрирует combat системы в CombatTick.
///
/// Порядок выполнения (по SimSet):
/// 1. Timers: run_scheduled_actions (reload completion, hit flash clear)
/// 2. Act: process_switch_commands → process_reload_commands → process_fire_commands
/// 3. Projectiles: advance_projectiles
/// 4. Status: tick_poison
/// 5. Damage: resolve_damage_requests
/// 6. Cleanup: despawn_dead
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<FireCommand>()
            .add_event::<ReloadCommand>()
            .add_event::<SwitchWeaponCommand>()
            .add_event::<WeaponSwitched>()
            .add_event::<WeaponFired>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadCompleted>()
            .add_event::<ProjectileMissed>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            CombatTick,
            (
                systems::run_scheduled_actions.in_set(SimSet::Timers),
                (
                    systems::process_switch_commands,
                    systems::process_reload_commands,
                    systems::process_fire_commands,
                )
                    .chain()
                    .in_set(SimSet::Act),
                systems::advance_projectiles.in_set(SimSet::Projectiles),
                systems::tick_poison.in_set(SimSet::Status),
                systems::resolve_damage_requests.in_set(SimSet::Damage),
                systems::despawn_dead.in_set(SimSet::Cleanup),
            ),
        );
    }
}
