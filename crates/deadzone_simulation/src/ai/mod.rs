//! AI decision-making module
//!
//! Table-driven FSM: три архетипа (Junkie, Police, Swat) с общим lifecycle.
//! Цель назначает host (`AiTarget`), AI только двигает врага и генерирует
//! FireCommand/ReloadCommand.

use bevy::prelude::*;
use crate::schedules::{CombatTick, SimSet};

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::AiStateChanged;

/// AI Plugin
///
/// Регистрирует AI системы в CombatTick (SimSet::Decide), до обработки
/// fire/reload команд.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AiStateChanged>();

        app.add_systems(CombatTick, systems::update_enemy_ai.in_set(SimSet::Decide));
    }
}
