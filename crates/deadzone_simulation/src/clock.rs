//! Game clock + отложенные действия (reload completion, hit flash)
//!
//! Архитектура:
//! - `GameClock`: единственный монотонный счётчик времени (ms), host двигает его раз в tick
//! - `ScheduledActions`: очередь действий "выполнить не раньше due_ms"
//! - Действие выполняется на первом tick где `now_ms >= due_ms`
//! - Смерть/удаление owner → все его действия отменяются

use bevy::prelude::*;

/// Монотонные игровые часы (миллисекунды)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct GameClock {
    /// Текущее время (ms от старта симуляции)
    pub now_ms: f64,
    /// Delta последнего tick (ms)
    pub delta_ms: f64,
    /// Номер tick
    pub tick: u64,
}

impl GameClock {
    /// Продвинуть часы на delta (отрицательная delta игнорируется: часы монотонные)
    pub fn advance(&mut self, delta_ms: f64) {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.delta_ms = delta_ms;
        self.now_ms += delta_ms;
        self.tick += 1;
    }

    /// Delta в секундах (для интеграции скоростей)
    pub fn delta_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}

/// Тип отложенного действия
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Перезарядка оружия owner завершена
    CompleteReload,
    /// Убрать HitFlash у owner
    ClearHitFlash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub owner: Entity,
    pub due_ms: f64,
    pub action: DeferredAction,
}

/// Очередь отложенных действий
///
/// Порядок выполнения между разными owner не гарантирован.
#[derive(Resource, Debug, Default)]
pub struct ScheduledActions {
    pending: Vec<PendingAction>,
}

impl ScheduledActions {
    pub fn schedule(&mut self, owner: Entity, due_ms: f64, action: DeferredAction) {
        self.pending.push(PendingAction {
            owner,
            due_ms,
            action,
        });
    }

    /// Заменить все действия `action` у owner одним с новым due_ms
    pub fn reschedule(&mut self, owner: Entity, due_ms: f64, action: DeferredAction) {
        self.cancel(owner, action);
        self.schedule(owner, due_ms, action);
    }

    /// Отменить действия `action` у owner. true если что-то было.
    pub fn cancel(&mut self, owner: Entity, action: DeferredAction) -> bool {
        let before = self.pending.len();
        self.pending
            .retain(|p| !(p.owner == owner && p.action == action));
        before != self.pending.len()
    }

    /// Отменить все действия owner. Возвращает число отменённых.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.owner != owner);
        before - self.pending.len()
    }

    /// Забрать все действия с `due_ms <= now_ms`
    pub fn take_due(&mut self, now_ms: f64) -> Vec<PendingAction> {
        let (due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due
    }

    #[cfg(test)]
    pub fn has_pending(&self, owner: Entity, action: DeferredAction) -> bool {
        self.pending
            .iter()
            .any(|p| p.owner == owner && p.action == action)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
