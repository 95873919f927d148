//! Zone events

use bevy::prelude::*;
use crate::zone::{ZoneCircle, ZonePhase};

/// Зона сменила фазу
///
/// Waiting → новый target уже выбран (host рисует следующий круг).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ZonePhaseChanged {
    pub phase: ZonePhase,
    pub current: ZoneCircle,
    pub target: ZoneCircle,
}
