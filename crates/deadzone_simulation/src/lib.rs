//! Deadzone Simulation Core
//!
//! ECS-симуляция боя на Bevy 0.16 (top-down survival shooter)
//!
//! Ядро: оружие (fire rate, ammo, reload), projectile, armor mitigation,
//! poison, AI трёх архетипов, shrinking zone.
//! Рендер, ввод, генерация карты, HUD: снаружи (host читает статус и события).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod host;
pub mod logger;
pub mod physics;
pub mod schedules;
pub mod zone;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export базовых компонентов для удобства
pub use actor::{spawn_enemy, spawn_enemy_with_weapon, spawn_player};
pub use ai::{AIPlugin, AiBrain, AiState, AiStateChanged, AiTarget, Archetype, Enemy};
pub use clock::{GameClock, ScheduledActions};
pub use combat::{
    effective_damage, mitigation, AmmoKind, CombatPlugin, DamageDealt, DamageRequest,
    DamageSource, Dead, EntityDied, FireCommand, HolsteredWeapon, PoisonStatus, Projectile,
    ProjectileMissed, ReloadCommand, ReloadCompleted, ReloadStarted, SwitchWeaponCommand, Weapon,
    WeaponConfigError, WeaponFired, WeaponStats, WeaponSwitched,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig, ZoneConfig};
pub use host::{CombatSimulation, CombatantStatus, ZoneStatus, NOTIFICATION_RETENTION_MS};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::MotionPlugin;
pub use schedules::{CombatTick, SimSet};
pub use zone::{ZoneCircle, ZoneController, ZonePhase, ZonePhaseChanged, ZonePlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Сам по себе tick не запускает: `CombatSimulation::step` или
/// `FixedTickDriverPlugin`.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        schedules::register_schedules(app);

        app
            // Детерминистичный RNG (seed из config)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(WorldBounds::from_size(self.config.map_size()))
            .insert_resource(self.config.clone())
            .init_resource::<GameClock>()
            .init_resource::<ScheduledActions>()
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin, MotionPlugin, ZonePlugin));
    }
}

/// Запуск CombatTick из FixedUpdate (для host с собственным Bevy App loop)
///
/// Частота: `Time<Fixed>` (по умолчанию 60Hz).
pub struct FixedTickDriverPlugin;

impl Plugin for FixedTickDriverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, schedules::run_combat_tick);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// MinimalPlugins + SimulationPlugin + FixedTickDriverPlugin: каждый
/// `app.update()` прогоняет столько CombatTick, сколько накопил Time<Fixed>.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin {
            config: SimulationConfig {
                seed,
                ..Default::default()
            },
        })
        .add_plugins(FixedTickDriverPlugin)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
