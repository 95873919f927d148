//! Actor domain: spawn бойцов и стартовые loadout
//!
//! Содержит:
//! - spawn_player (игрок, оружие опционально)
//! - spawn_enemy (статы и оружие из ArchetypeProfile)
//! - default_loadout (SWAT: AK-47 или Shotgun по seeded монетке)

pub mod spawn;

// Re-export all helpers
pub use spawn::*;
