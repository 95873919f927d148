//! Combat events
//!
//! Commands (host/AI → ECS): FireCommand, ReloadCommand, SwitchWeaponCommand.
//! Internal: DamageRequest (все источники урона идут через один resolver).
//! Notifications (ECS → host): WeaponFired, ReloadStarted, ReloadCompleted,
//! WeaponSwitched, ProjectileMissed, DamageDealt, EntityDied.

use bevy::prelude::*;
use crate::combat::weapon_stats::PoisonSpec;
use crate::components::CombatantKind;

/// Команда: выстрелить в точку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireCommand {
    pub shooter: Entity,
    pub target: Vec2,
}

/// Команда: начать перезарядку
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCommand {
    pub entity: Entity,
}

/// Команда: поменять активное оружие с убранным
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchWeaponCommand {
    pub entity: Entity,
}

/// Смена оружия состоялась
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct WeaponSwitched {
    pub entity: Entity,
    pub active: String,
    pub holstered: String,
    /// Перезарядка убранного оружия прервана
    pub reload_cancelled: bool,
}

/// Выстрел состоялся (projectile заспавнен или melee удар нанесён)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub weapon: String,
    pub origin: Vec2,
    pub angle: f32,
    pub magazine_left: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadStarted {
    pub entity: Entity,
    pub duration_ms: f64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCompleted {
    pub entity: Entity,
    pub loaded: u32,
    pub magazine: u32,
    pub reserve: u32,
}

/// Projectile улетел за max range и несёт drop-on-miss item
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileMissed {
    pub item_id: String,
    pub position: Vec2,
}

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageSource {
    Projectile,
    Melee,
    Poison,
    Zone,
}

/// Запрос на урон (resolve в SimSet::Damage)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub attacker: Option<Entity>,
    pub amount: f32,
    pub ignore_armor: bool,
    pub source: DamageSource,
    /// Poison, который регистрируется на цели вместе с уроном
    pub poison: Option<PoisonSpec>,
}

impl DamageRequest {
    pub fn new(target: Entity, amount: f32, source: DamageSource) -> Self {
        Self {
            target,
            attacker: None,
            amount,
            ignore_armor: false,
            source,
            poison: None,
        }
    }

    pub fn from_attacker(mut self, attacker: Entity) -> Self {
        self.attacker = Some(attacker);
        self
    }

    pub fn ignoring_armor(mut self) -> Self {
        self.ignore_armor = true;
        self
    }

    pub fn with_poison(mut self, poison: Option<PoisonSpec>) -> Self {
        self.poison = poison;
        self
    }
}

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub attacker: Option<Entity>,
    pub source: DamageSource,
    /// Урон до armor
    pub raw: f32,
    /// Реально снятое HP
    pub applied: f32,
    pub remaining_hp: f32,
    pub killed: bool,
}

/// Событие: entity умер (health <= 0)
///
/// Host использует для loot drop и счётчиков.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub kind: CombatantKind,
    pub position: Vec2,
    pub killer: Option<Entity>,
}
