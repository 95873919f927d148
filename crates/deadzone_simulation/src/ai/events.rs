//! AI Events
//!
//! AI FSM → host (анимации, звуки, debug overlay).

use bevy::prelude::*;
use crate::ai::AiState;

/// Враг сменил состояние FSM
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiStateChanged {
    pub entity: Entity,
    pub from: AiState,
    pub to: AiState,
}
