//! FSM AI components (archetype table, brain, target).
//!
//! Одна state machine, параметризованная `ArchetypeProfile`:
//! - Junkie: Wander ↔ Chase (быстрый, бьёт вплотную)
//! - Police: Wander ↔ Attack (патруль, стреляет издалека)
//! - Swat: Idle ↔ Attack (стоит на месте)

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Архетип врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Archetype {
    /// Быстрый melee
    Junkie,
    /// Ranged патруль
    Police,
    /// Стационарный тяжёлый
    Swat,
}

/// AI FSM состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AiState {
    /// Стоит на месте, цели нет рядом
    #[default]
    Idle,
    /// Случайное направление, смена каждые `reroll_ms`
    Wander,
    /// Бежит к цели
    Chase,
    /// Стреляет по цели
    Attack,
}

/// Как двигаться, когда цель в зоне engage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    /// Всегда к цели с множителем скорости
    Always { speed_factor: f32 },
    /// К цели только если дальше `distance`, иначе стоит
    Beyond { distance: f32, speed_factor: f32 },
    /// Не двигается
    Hold,
}

/// Поведение вне зоны engage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disengaged {
    Idle,
    Wander { reroll_ms: f64, speed_factor: f32 },
}

/// Параметры архетипа (таблица поведения + базовые статы)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub max_hp: f32,
    pub speed: f32,
    pub armor: f32,
    /// Дистанция < engage_distance → engaged state
    pub engage_distance: f32,
    pub engaged_state: AiState,
    pub approach: Approach,
    /// Стрелять только ближе этой дистанции (None: всегда в engaged state)
    pub fire_within: Option<f32>,
    pub disengaged: Disengaged,
}

impl ArchetypeProfile {
    pub fn disengaged_state(&self) -> AiState {
        match self.disengaged {
            Disengaged::Idle => AiState::Idle,
            Disengaged::Wander { .. } => AiState::Wander,
        }
    }
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Junkie, Archetype::Police, Archetype::Swat];

    pub fn profile(&self) -> ArchetypeProfile {
        match self {
            Archetype::Junkie => ArchetypeProfile {
                max_hp: 50.0,
                speed: 500.0,
                armor: 0.0,
                engage_distance: 500.0,
                engaged_state: AiState::Chase,
                approach: Approach::Always { speed_factor: 1.0 },
                fire_within: Some(60.0),
                disengaged: Disengaged::Wander {
                    reroll_ms: 1000.0,
                    speed_factor: 0.6,
                },
            },
            Archetype::Police => ArchetypeProfile {
                max_hp: 100.0,
                speed: 400.0,
                armor: 50.0,
                engage_distance: 700.0,
                engaged_state: AiState::Attack,
                approach: Approach::Beyond {
                    distance: 300.0,
                    speed_factor: 0.5,
                },
                fire_within: None,
                disengaged: Disengaged::Wander {
                    reroll_ms: 2000.0,
                    speed_factor: 0.5,
                },
            },
            Archetype::Swat => ArchetypeProfile {
                max_hp: 100.0,
                speed: 250.0,
                armor: 100.0,
                engage_distance: 800.0,
                engaged_state: AiState::Attack,
                approach: Approach::Hold,
                fire_within: None,
                disengaged: Disengaged::Idle,
            },
        }
    }
}

/// Компонент-маркер врага
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(AiBrain, AiTarget)]
pub struct Enemy {
    pub archetype: Archetype,
}

/// Цель врага (назначается host через `set_target`)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AiTarget(pub Option<Entity>);

/// Состояние FSM одного врага
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AiBrain {
    pub state: AiState,
    /// Время до следующей смены wander направления (тикает только в Wander)
    pub reroll_timer_ms: f64,
    /// Последнее wander направление (радианы)
    pub wander_heading: Option<f32>,
}

impl AiBrain {
    pub fn for_profile(profile: &ArchetypeProfile) -> Self {
        Self {
            state: profile.disengaged_state(),
            reroll_timer_ms: 0.0,
            wander_heading: None,
        }
    }
}

/// Что видит AI в этом tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiContext {
    pub position: Vec2,
    pub target: Vec2,
    pub speed: f32,
    pub delta_ms: f64,
}

/// Решение AI на этот tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub previous: AiState,
    pub state: AiState,
    pub velocity: Vec2,
    /// Новый heading (None: не менять)
    pub heading: Option<f32>,
    /// Выстрелить в точку (если оружие готово)
    pub fire_at: Option<Vec2>,
}

impl AiDecision {
    pub fn changed(&self) -> bool {
        self.previous != self.state
    }
}

impl AiBrain {
    /// Один шаг FSM (pure, без ECS)
    ///
    /// 1. Transition по дистанции до цели
    /// 2. Поведение нового state → velocity/heading/fire
    pub fn think(
        &mut self,
        profile: &ArchetypeProfile,
        ctx: &AiContext,
        rng: &mut impl Rng,
    ) -> AiDecision {
        let previous = self.state;
        let to_target = ctx.target - ctx.position;
        let distance = to_target.length();

        self.state = if distance < profile.engage_distance {
            profile.engaged_state
        } else {
            profile.disengaged_state()
        };

        let mut decision = AiDecision {
            previous,
            state: self.state,
            velocity: Vec2::ZERO,
            heading: None,
            fire_at: None,
        };

        if self.state == profile.engaged_state {
            let direction = to_target.normalize_or_zero();
            let speed_factor = match profile.approach {
                Approach::Always { speed_factor } => speed_factor,
                Approach::Beyond {
                    distance: hold_within,
                    speed_factor,
                } if distance > hold_within => speed_factor,
                Approach::Beyond { .. } | Approach::Hold => 0.0,
            };

            decision.velocity = direction * ctx.speed * speed_factor;
            if direction != Vec2::ZERO {
                decision.heading = Some(direction.y.atan2(direction.x));
            }

            let in_range = profile.fire_within.is_none_or(|range| distance < range);
            if in_range {
                decision.fire_at = Some(ctx.target);
            }

            return decision;
        }

        match profile.disengaged {
            Disengaged::Idle => {}
            Disengaged::Wander {
                reroll_ms,
                speed_factor,
            } => {
                self.reroll_timer_ms -= ctx.delta_ms;
                if self.reroll_timer_ms <= 0.0 || self.wander_heading.is_none() {
                    self.reroll_timer_ms = reroll_ms;
                    self.wander_heading = Some(rng.gen_range(0.0..TAU));
                }

                if let Some(angle) = self.wander_heading {
                    decision.velocity = Vec2::from_angle(angle) * ctx.speed * speed_factor;
                    decision.heading = Some(angle);
                }
            }
        }

        decision
    }
}
