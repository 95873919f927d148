//! ECS Components для бойцов
//!
//! Организация по доменам:
//! - actor: Combatant, Player, Health, Armor, Hitbox
//! - movement: Velocity, Heading, MovementSpeed
//! - world: Position, WorldBounds

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
