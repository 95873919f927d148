//! Projectile component + геометрия полёта
//!
//! Lifecycle: Traveling → {Hit, Miss} → despawn.
//! Дистанция = прямая от точки спавна. Попадание проверяется по отрезку,
//! пройденному за tick (без туннелирования на высокой скорости).
//! Максимум одно разрешение: без пробития и рикошетов.

use bevy::prelude::*;
use crate::combat::components::weapon::ProjectileLaunch;
use crate::combat::weapon_stats::PoisonSpec;

/// Радиус самого projectile (для overlap с hitbox)
pub const PROJECTILE_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectileState {
    Traveling,
    Hit,
    Miss,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Кто выстрелил (в него самого не попадаем)
    pub source: Entity,
    pub origin: Vec2,
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub damage: f32,
    pub max_range: f32,
    pub traveled: f32,
    pub poison: Option<PoisonSpec>,
    pub drop_on_miss: Option<String>,
    pub state: ProjectileState,
}

/// Кандидат на попадание (living combatant кроме source)
#[derive(Debug, Clone, Copy)]
pub struct HitCandidate {
    pub entity: Entity,
    pub center: Vec2,
    pub radius: f32,
}

/// Чем закончился tick полёта
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileStep {
    Traveling,
    Hit { target: Entity, point: Vec2 },
    Miss { point: Vec2 },
}

impl Projectile {
    pub fn from_launch(source: Entity, launch: ProjectileLaunch) -> Self {
        Self {
            source,
            origin: launch.position,
            position: launch.position,
            angle: launch.angle,
            speed: launch.speed,
            damage: launch.damage,
            max_range: launch.max_range,
            traveled: 0.0,
            poison: launch.poison,
            drop_on_miss: launch.drop_on_miss,
            state: ProjectileState::Traveling,
        }
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Один tick полёта.
    ///
    /// Отрезок этого tick обрезается на max_range; ближайший по пути кандидат = Hit.
    /// Без попадания и за пределами max_range → Miss в точке max_range.
    /// Уже разрешённый projectile ничего не делает.
    pub fn advance(&mut self, delta_secs: f32, candidates: &[HitCandidate]) -> ProjectileStep {
        if self.state != ProjectileState::Traveling {
            return ProjectileStep::Traveling;
        }

        let direction = self.direction();
        let start = self.position;
        let start_distance = self.traveled;

        self.position += direction * self.speed * delta_secs.max(0.0);
        self.traveled = self.origin.distance(self.position);

        let swept_end = if self.traveled > self.max_range {
            self.origin + direction * self.max_range
        } else {
            self.position
        };

        let nearest = candidates
            .iter()
            .filter(|c| c.entity != self.source)
            .filter_map(|c| {
                segment_circle_entry(start, swept_end, c.center, c.radius + PROJECTILE_RADIUS)
                    .map(|t| (t, c.entity))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        if let Some((t, target)) = nearest {
            self.state = ProjectileState::Hit;
            let point = start + (swept_end - start) * t;
            self.position = point;
            self.traveled = start_distance + start.distance(point);
            return ProjectileStep::Hit { target, point };
        }

        if self.traveled > self.max_range {
            self.state = ProjectileState::Miss;
            self.position = swept_end;
            return ProjectileStep::Miss { point: swept_end };
        }

        ProjectileStep::Traveling
    }
}

/// Параметр t ∈ [0, 1] первой точки отрезка a→b внутри круга; None если не пересекает.
pub fn segment_circle_entry(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    // уже внутри в начале отрезка
    if a.distance_squared(center) <= radius * radius {
        return Some(0.0);
    }

    let d = b - a;
    let len_sq = d.length_squared();
    if len_sq <= f32::EPSILON {
        return None;
    }

    let f = a - center;
    let b_coef = 2.0 * f.dot(d);
    let c_coef = f.length_squared() - radius * radius;
    let discriminant = b_coef * b_coef - 4.0 * len_sq * c_coef;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b_coef - discriminant.sqrt()) / (2.0 * len_sq);
    (0.0..=1.0).contains(&t).then_some(t)
}
