//! Weapon component: stats + mutable ammo/reload/fire-rate state
//!
//! Инварианты:
//! - 0 ≤ magazine ≤ magazine_size
//! - 0 ≤ reserve ≤ reserve_max
//! - reloading и стрельба взаимоисключающие (can_fire == false во время reload)
//!
//! Каждый Weapon принадлежит ровно одному бойцу, патроны не шарятся.
//! Второй слот (HolsteredWeapon) хранит своё состояние, пока оружие убрано.

use bevy::prelude::*;
use rand::Rng;
use crate::combat::weapon_stats::{AmmoKind, PoisonSpec, WeaponConfigError, WeaponStats};

/// Смещение точки спавна projectile от центра стрелка ("ствол")
pub const MUZZLE_OFFSET: f32 = 30.0;
/// Центр melee hitbox перед бойцом
pub const MELEE_REACH: f32 = 40.0;
/// Радиус melee hitbox
pub const MELEE_RADIUS: f32 = 20.0;
/// Knockback импульс melee удара (units/sec)
pub const MELEE_KNOCKBACK: f32 = 200.0;

/// Оружие бойца
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    stats: WeaponStats,
    /// Патроны в магазине
    magazine: u32,
    /// Запасные патроны
    reserve: u32,
    /// Время последнего выстрела (None: ещё не стрелял)
    last_fired_ms: Option<f64>,
    reloading: bool,
}

/// Второй слот loadout: убранное оружие со своими патронами
///
/// `SwitchWeaponCommand` меняет его местами с активным `Weapon`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HolsteredWeapon(pub Weapon);

/// Подобранные патроны `kind` → сначала активное оружие, потом убранное.
///
/// Возвращает сколько реально добавлено; 0 если ни одно оружие не подходит
/// (патроны теряются).
pub fn route_ammo(
    active: Option<&mut Weapon>,
    holstered: Option<&mut HolsteredWeapon>,
    kind: AmmoKind,
    amount: u32,
) -> u32 {
    if let Some(weapon) = active.filter(|w| w.accepts_ammo(kind)) {
        return weapon.add_reserve_ammo(amount);
    }
    match holstered {
        Some(HolsteredWeapon(weapon)) if weapon.accepts_ammo(kind) => {
            weapon.add_reserve_ammo(amount)
        }
        _ => 0,
    }
}

/// Параметры нового projectile (spawn делает система)
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileLaunch {
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub damage: f32,
    pub max_range: f32,
    pub poison: Option<PoisonSpec>,
    pub drop_on_miss: Option<String>,
}

/// Параметры melee удара (hit-test делает система)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeStrike {
    pub center: Vec2,
    pub radius: f32,
    /// Направление удара (радианы), по нему же knockback
    pub angle: f32,
    pub damage: f32,
    pub knockback: f32,
}

/// Результат успешного выстрела
#[derive(Debug, Clone, PartialEq)]
pub enum Shot {
    Projectile(ProjectileLaunch),
    Melee(MeleeStrike),
}

impl Weapon {
    /// Создать оружие с полным магазином и полным запасом.
    ///
    /// Невалидный config отклоняется сразу.
    pub fn new(stats: WeaponStats) -> Result<Self, WeaponConfigError> {
        stats.validate()?;
        Ok(Self::from_validated(stats))
    }

    fn from_validated(stats: WeaponStats) -> Self {
        Self {
            magazine: stats.magazine_size,
            reserve: stats.reserve_max,
            stats,
            last_fired_ms: None,
            reloading: false,
        }
    }

    pub fn glock() -> Self {
        Self::from_validated(WeaponStats::glock())
    }

    pub fn ak47() -> Self {
        Self::from_validated(WeaponStats::ak47())
    }

    pub fn shotgun() -> Self {
        Self::from_validated(WeaponStats::shotgun())
    }

    pub fn knife() -> Self {
        Self::from_validated(WeaponStats::knife())
    }

    pub fn needle() -> Self {
        Self::from_validated(WeaponStats::needle())
    }

    /// Задать текущие патроны (clamp по инвариантам)
    pub fn with_ammo(mut self, magazine: u32, reserve: u32) -> Self {
        self.magazine = magazine.min(self.stats.magazine_size);
        self.reserve = reserve.min(self.stats.reserve_max);
        self
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn last_fired_ms(&self) -> Option<f64> {
        self.last_fired_ms
    }

    /// Может ли оружие выстрелить в момент `now_ms` (без side effects)
    pub fn can_fire(&self, now_ms: f64) -> bool {
        if self.reloading {
            return false;
        }

        // Melee патроны не тратит
        if self.stats.is_ranged() && self.magazine == 0 {
            return false;
        }

        match self.last_fired_ms {
            Some(last) => now_ms > last + self.stats.fire_rate_ms,
            None => true,
        }
    }

    /// Выстрел из `origin` в сторону `target`.
    ///
    /// Не готово (cooldown, reload, пустой магазин) → `None`, без изменений.
    /// Ranged: угол к цели ± half spread, projectile спавнится на MUZZLE_OFFSET.
    /// Melee: hitbox перед бойцом по `heading`, цель не используется.
    pub fn shoot(
        &mut self,
        origin: Vec2,
        heading: f32,
        target: Vec2,
        now_ms: f64,
        rng: &mut impl Rng,
    ) -> Option<Shot> {
        if !self.can_fire(now_ms) {
            return None;
        }

        self.last_fired_ms = Some(now_ms);

        if self.stats.is_melee() {
            let direction = Vec2::from_angle(heading);
            return Some(Shot::Melee(MeleeStrike {
                center: origin + direction * MELEE_REACH,
                radius: MELEE_RADIUS,
                angle: heading,
                damage: self.stats.damage,
                knockback: MELEE_KNOCKBACK,
            }));
        }

        self.magazine -= 1;

        let to_target = target - origin;
        let aim = to_target.y.atan2(to_target.x);
        let half_spread = self.stats.spread_degrees.to_radians() * 0.5;
        let offset = if half_spread > 0.0 {
            rng.gen_range(-half_spread..=half_spread)
        } else {
            0.0
        };
        let angle = aim + offset;

        let payload = self.stats.payload.as_ref();
        Some(Shot::Projectile(ProjectileLaunch {
            position: origin + Vec2::from_angle(angle) * MUZZLE_OFFSET,
            angle,
            speed: self.stats.projectile_speed(),
            damage: self.stats.damage,
            max_range: self.stats.range,
            poison: payload.and_then(|p| p.poison),
            drop_on_miss: payload.and_then(|p| p.drop_on_miss.clone()),
        }))
    }

    /// Начать перезарядку.
    ///
    /// No-op (None) если уже перезаряжается, магазин полон или запас пуст.
    /// Иначе возвращает длительность (ms): caller планирует `complete_reload`.
    pub fn begin_reload(&mut self) -> Option<f64> {
        if self.reloading
            || self.magazine == self.stats.magazine_size
            || self.reserve == 0
        {
            return None;
        }

        self.reloading = true;
        Some(self.stats.reload_ms)
    }

    /// Завершить перезарядку: min(свободное место, запас) из reserve в magazine.
    ///
    /// Возвращает число перенесённых патронов (0 если reload не шёл).
    pub fn complete_reload(&mut self) -> u32 {
        if !self.reloading {
            return 0;
        }

        let needed = self.stats.magazine_size - self.magazine;
        let moved = needed.min(self.reserve);
        self.magazine += moved;
        self.reserve -= moved;
        self.reloading = false;
        moved
    }

    /// Подобрали патроны: добавить в запас (clamp по reserve_max).
    ///
    /// Возвращает сколько реально добавлено.
    pub fn add_reserve_ammo(&mut self, amount: u32) -> u32 {
        let space = self.stats.reserve_max - self.reserve;
        let added = amount.min(space);
        self.reserve += added;
        added
    }

    /// Принимает ли оружие патроны `kind` (AmmoKind::None не подходит никому)
    pub fn accepts_ammo(&self, kind: AmmoKind) -> bool {
        kind != AmmoKind::None && self.stats.ammo_kind == kind
    }

    /// Прервать перезарядку (смена оружия). Патроны не переносятся.
    ///
    /// Возвращает true если reload шёл.
    pub fn cancel_reload(&mut self) -> bool {
        std::mem::replace(&mut self.reloading, false)
    }

    /// Магазин пуст и есть из чего перезарядиться
    pub fn needs_reload(&self) -> bool {
        self.stats.is_ranged() && !self.reloading && self.magazine == 0 && self.reserve > 0
    }
}
