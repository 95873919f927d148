//! Combat components

pub mod projectile;
pub mod status;
pub mod weapon;

#[cfg(test)]
mod status_tests;

// Re-export all components
pub use projectile::*;
pub use status::*;
pub use weapon::*;
