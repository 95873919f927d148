//! Headless host: владеет App, двигает время, отдаёт статус и события
//!
//! Использование:
//! ```ignore
//! let mut sim = CombatSimulation::new(SimulationConfig::default())?;
//! let player = sim.spawn_player(Vec2::new(2500.0, 2500.0), Some(Weapon::glock()));
//! let junkie = sim.spawn_enemy(Archetype::Junkie, Vec2::new(2900.0, 2500.0));
//! sim.set_target(junkie, Some(player));
//! sim.step(16.0);
//! for died in sim.drain_events::<EntityDied>() { /* loot */ }
//! ```
//!
//! Внутренние буферы (команды, DamageRequest) свапаются каждый step.
//! Notification события ждут `drain_events` не меньше NOTIFICATION_RETENTION_MS
//! игрового времени (и не больше двух окон), потом отбрасываются.

use bevy::prelude::*;
use crate::ai::{AiStateChanged, AiTarget, Archetype, Enemy};
use crate::clock::GameClock;
use crate::combat::{
    route_ammo, AmmoKind, DamageDealt, DamageRequest, Dead, EntityDied, FireCommand,
    HolsteredWeapon, PoisonStatus, ProjectileMissed, ReloadCommand, ReloadCompleted,
    ReloadStarted, SwitchWeaponCommand, Weapon, WeaponFired, WeaponSwitched,
};
use crate::components::{Combatant, Heading, Health, Position, Velocity};
use crate::config::{ConfigError, SimulationConfig};
use crate::schedules::step_world;
use crate::zone::{ZoneCircle, ZoneController, ZonePhase, ZonePhaseChanged};
use crate::SimulationPlugin;

/// Окно хранения недренированных notification событий (ms игрового времени)
pub const NOTIFICATION_RETENTION_MS: f64 = 10_000.0;

/// Read-only статус бойца для HUD
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantStatus {
    pub hp: f32,
    pub max_hp: f32,
    pub position: Vec2,
    pub weapon: Option<String>,
    /// Второй слот loadout
    pub holstered: Option<String>,
    pub magazine: u32,
    pub reserve: u32,
    pub reloading: bool,
    pub poisoned: bool,
}

/// Read-only статус зоны для HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStatus {
    pub phase: ZonePhase,
    pub time_remaining_ms: f64,
    pub current: ZoneCircle,
    pub target: ZoneCircle,
}

/// Headless симуляция боя
pub struct CombatSimulation {
    app: App,
    /// Момент последнего свапа notification буферов
    notifications_swapped_ms: f64,
}

impl CombatSimulation {
    /// Валидирует config и собирает App с SimulationPlugin
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut app = App::new();
        app.add_plugins(SimulationPlugin { config });

        Ok(Self {
            app,
            notifications_swapped_ms: 0.0,
        })
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn now_ms(&self) -> f64 {
        self.world().resource::<GameClock>().now_ms
    }

    /// Один tick на `delta_ms` игрового времени
    pub fn step(&mut self, delta_ms: f64) {
        let world = self.app.world_mut();
        swap_internal_event_buffers(world);

        let now_ms = world.resource::<GameClock>().now_ms;
        if now_ms - self.notifications_swapped_ms >= NOTIFICATION_RETENTION_MS {
            swap_notification_buffers(world);
            self.notifications_swapped_ms = now_ms;
        }

        step_world(world, delta_ms);
    }

    /// `ticks` одинаковых tick
    pub fn run(&mut self, ticks: usize, delta_ms: f64) {
        for _ in 0..ticks {
            self.step(delta_ms);
        }
    }

    pub fn spawn_player(&mut self, position: Vec2, weapon: Option<Weapon>) -> Entity {
        crate::actor::spawn_player(self.world_mut(), position, weapon)
    }

    pub fn spawn_enemy(&mut self, archetype: Archetype, position: Vec2) -> Entity {
        crate::actor::spawn_enemy(self.world_mut(), archetype, position)
    }

    /// Назначить цель врагу (None: снять). Не-враг → false.
    pub fn set_target(&mut self, enemy: Entity, target: Option<Entity>) -> bool {
        let Some(mut ai_target) = self.world_mut().get_mut::<AiTarget>(enemy) else {
            return false;
        };
        ai_target.0 = target;
        true
    }

    /// Цель для всех живых врагов (обычно: игрок)
    pub fn set_target_for_all_enemies(&mut self, target: Entity) {
        let world = self.world_mut();
        let mut query = world.query_filtered::<&mut AiTarget, With<Enemy>>();
        for mut ai_target in query.iter_mut(world) {
            ai_target.0 = Some(target);
        }
    }

    /// Host пишет позицию (движение игрока снаружи)
    pub fn set_position(&mut self, entity: Entity, position: Vec2) {
        if let Some(mut current) = self.world_mut().get_mut::<Position>(entity) {
            current.0 = position;
        }
    }

    pub fn set_heading(&mut self, entity: Entity, angle: f32) {
        if let Some(mut heading) = self.world_mut().get_mut::<Heading>(entity) {
            heading.0 = angle;
        }
    }

    pub fn set_velocity(&mut self, entity: Entity, velocity: Vec2) {
        if let Some(mut current) = self.world_mut().get_mut::<Velocity>(entity) {
            current.0 = velocity;
        }
    }

    /// Выстрел в следующем tick
    pub fn fire(&mut self, shooter: Entity, target: Vec2) {
        self.world_mut().send_event(FireCommand { shooter, target });
    }

    /// Перезарядка в следующем tick
    pub fn reload(&mut self, entity: Entity) {
        self.world_mut().send_event(ReloadCommand { entity });
    }

    /// Смена оружия (активное ↔ второй слот) в следующем tick
    pub fn switch_weapon(&mut self, entity: Entity) {
        self.world_mut().send_event(SwitchWeaponCommand { entity });
    }

    /// Положить оружие во второй слот (заменяет прежнее). Не боец → false.
    pub fn holster_weapon(&mut self, entity: Entity, weapon: Weapon) -> bool {
        let world = self.world_mut();
        if world.get::<Combatant>(entity).is_none() {
            return false;
        }
        world.entity_mut(entity).insert(HolsteredWeapon(weapon));
        true
    }

    /// Подобранные патроны: в первое подходящее оружие (активное, потом второй слот)
    ///
    /// Возвращает сколько реально добавлено (clamp по reserve_max).
    /// Ни одно оружие не принимает `kind` или боец мёртв → 0, патроны теряются.
    pub fn add_ammo(&mut self, entity: Entity, kind: AmmoKind, amount: u32) -> u32 {
        let world = self.world_mut();
        let mut query = world.query_filtered::<
            (Option<&mut Weapon>, Option<&mut HolsteredWeapon>),
            (With<Combatant>, Without<Dead>),
        >();
        let Ok((mut active, mut holstered)) = query.get_mut(world, entity) else {
            return 0;
        };

        let added = route_ammo(
            active.as_deref_mut(),
            holstered.as_deref_mut(),
            kind,
            amount,
        );
        if added == 0 {
            crate::log(&format!("Ammo discarded: {:?} {:?} x{}", entity, kind, amount));
        }
        added
    }

    /// Забрать все накопленные события типа `E`
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.world_mut()
            .get_resource_mut::<Events<E>>()
            .map(|mut events| events.drain().collect())
            .unwrap_or_default()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world()
            .get::<Health>(entity)
            .is_some_and(Health::is_alive)
    }

    pub fn combatant_status(&self, entity: Entity) -> Option<CombatantStatus> {
        let world = self.world();
        world.get::<Combatant>(entity)?;

        let health = world.get::<Health>(entity)?;
        let position = world.get::<Position>(entity)?;
        let weapon = world.get::<Weapon>(entity);
        let holstered = world.get::<HolsteredWeapon>(entity);
        let poisoned = world
            .get::<PoisonStatus>(entity)
            .is_some_and(PoisonStatus::is_active);

        Some(CombatantStatus {
            hp: health.current,
            max_hp: health.max,
            position: position.0,
            weapon: weapon.map(|w| w.name().to_string()),
            holstered: holstered.map(|h| h.0.name().to_string()),
            magazine: weapon.map_or(0, Weapon::magazine),
            reserve: weapon.map_or(0, Weapon::reserve),
            reloading: weapon.is_some_and(Weapon::is_reloading),
            poisoned,
        })
    }

    pub fn zone_status(&self) -> ZoneStatus {
        let zone = self.world().resource::<ZoneController>();
        ZoneStatus {
            phase: zone.phase(),
            time_remaining_ms: zone.time_remaining_ms(),
            current: zone.current(),
            target: zone.target(),
        }
    }

    /// Количество живых врагов
    pub fn enemy_count(&mut self) -> usize {
        let world = self.world_mut();
        world
            .query_filtered::<&Health, With<Enemy>>()
            .iter(world)
            .filter(|health| health.is_alive())
            .count()
    }
}

/// Свап double buffer у событий, которые host не дренирует
fn swap_internal_event_buffers(world: &mut World) {
    world.resource_mut::<Events<FireCommand>>().update();
    world.resource_mut::<Events<ReloadCommand>>().update();
    world.resource_mut::<Events<SwitchWeaponCommand>>().update();
    world.resource_mut::<Events<DamageRequest>>().update();
}

/// Свап notification буферов: всё старше двух окон отбрасывается
fn swap_notification_buffers(world: &mut World) {
    world.resource_mut::<Events<WeaponFired>>().update();
    world.resource_mut::<Events<WeaponSwitched>>().update();
    world.resource_mut::<Events<ReloadStarted>>().update();
    world.resource_mut::<Events<ReloadCompleted>>().update();
    world.resource_mut::<Events<ProjectileMissed>>().update();
    world.resource_mut::<Events<DamageDealt>>().update();
    world.resource_mut::<Events<EntityDied>>().update();
    world.resource_mut::<Events<AiStateChanged>>().update();
    world.resource_mut::<Events<ZonePhaseChanged>>().update();
}
