//! Shrinking zone controller (pure state machine)
//!
//! Фазы: Waiting (геометрия заморожена) → Shrinking (live круг тянется к target
//! на `smoothing_per_tick` за tick) → snap к target, новый target → Waiting.
//!
//! Инварианты:
//! - target.radius = 0.7 × R, или 0 если меньше одного тайла
//! - |target.center − center| ≤ R − target.radius (новый круг внутри старого)
//! - радиус target не растёт между фазами

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use crate::clock::GameClock;
use crate::config::{SimulationConfig, ZoneConfig};
use crate::DeterministicRng;

/// Круг зоны
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ZoneCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl ZoneCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Строго снаружи (на границе: внутри)
    pub fn is_outside(&self, point: Vec2) -> bool {
        point.distance(self.center) > self.radius
    }

    fn lerp(&self, target: &ZoneCircle, t: f32) -> ZoneCircle {
        ZoneCircle::new(
            self.center.lerp(target.center, t),
            self.radius + (target.radius - self.radius) * t,
        )
    }
}

/// Фаза зоны
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ZonePhase {
    Waiting,
    Shrinking,
}

/// Controller зоны (Resource)
#[derive(Resource, Debug, Clone)]
pub struct ZoneController {
    config: ZoneConfig,
    tile_size: f32,
    phase: ZonePhase,
    phase_remaining_ms: f64,
    current: ZoneCircle,
    target: ZoneCircle,
    next_damage_check_ms: f64,
}

impl ZoneController {
    /// Начальный круг: центр карты, радиус max(W, H)·tile. Сразу Waiting с первым target.
    pub fn new(config: &SimulationConfig, now_ms: f64, rng: &mut impl Rng) -> Self {
        let map_size = config.map_size();
        let current = ZoneCircle::new(map_size * 0.5, map_size.max_element());

        let mut controller = Self {
            config: config.zone.clone(),
            tile_size: config.tile_size,
            phase: ZonePhase::Waiting,
            phase_remaining_ms: config.zone.wait_duration_ms,
            current,
            target: current,
            next_damage_check_ms: now_ms + config.zone.damage_interval_ms,
        };
        controller.target = controller.next_target(rng);
        controller
    }

    pub fn phase(&self) -> ZonePhase {
        self.phase
    }

    /// Live круг
    pub fn current(&self) -> ZoneCircle {
        self.current
    }

    /// Круг, к которому сожмётся зона
    pub fn target(&self) -> ZoneCircle {
        self.target
    }

    pub fn time_remaining_ms(&self) -> f64 {
        self.phase_remaining_ms.max(0.0)
    }

    pub fn damage_per_check(&self) -> f32 {
        self.config.damage_per_check
    }

    pub fn is_outside(&self, point: Vec2) -> bool {
        self.current.is_outside(point)
    }

    /// Следующий target внутри текущего live круга
    fn next_target(&self, rng: &mut impl Rng) -> ZoneCircle {
        let radius = self.current.radius;
        let mut next_radius = radius * self.config.shrink_factor;
        if next_radius < self.tile_size {
            next_radius = 0.0; // финальная точка
        }

        let max_offset = (radius - next_radius).max(0.0);
        let angle = rng.gen_range(0.0..TAU);
        let distance = if max_offset > 0.0 {
            rng.gen_range(0.0..=max_offset)
        } else {
            0.0
        };

        ZoneCircle::new(
            self.current.center + Vec2::from_angle(angle) * distance,
            next_radius,
        )
    }

    /// Один tick state machine. Возвращает новую фазу, если она сменилась.
    pub fn advance(&mut self, delta_ms: f64, rng: &mut impl Rng) -> Option<ZonePhase> {
        self.phase_remaining_ms -= delta_ms;

        match self.phase {
            ZonePhase::Waiting => {
                if self.phase_remaining_ms > 0.0 {
                    return None;
                }

                self.phase = ZonePhase::Shrinking;
                self.phase_remaining_ms = self.config.shrink_duration_ms;
                Some(ZonePhase::Shrinking)
            }
            ZonePhase::Shrinking => {
                self.current = self.current.lerp(&self.target, self.config.smoothing_per_tick);

                if self.phase_remaining_ms > 0.0 {
                    return None;
                }

                self.current = self.target;
                self.target = self.next_target(rng);
                self.phase = ZonePhase::Waiting;
                self.phase_remaining_ms = self.config.wait_duration_ms;
                Some(ZonePhase::Waiting)
            }
        }
    }

    /// Пора ли проверять урон вне зоны (раз в `damage_interval_ms` игрового времени)
    pub fn take_damage_check(&mut self, now_ms: f64) -> bool {
        if now_ms < self.next_damage_check_ms {
            return false;
        }

        self.next_damage_check_ms += self.config.damage_interval_ms;
        if self.next_damage_check_ms <= now_ms {
            // Догонять пропущенные проверки не нужно
            self.next_damage_check_ms = now_ms + self.config.damage_interval_ms;
        }
        true
    }
}

impl FromWorld for ZoneController {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();
        let now_ms = world.get_resource::<GameClock>().map_or(0.0, |clock| clock.now_ms);
        let mut rng = world.get_resource_or_insert_with(|| DeterministicRng::new(config.seed));

        Self::new(&config, now_ms, &mut rng.rng)
    }
}
