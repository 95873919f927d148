//! Combat systems

pub mod damage;
pub mod projectile;
pub mod status;
pub mod weapon;


// Re-export all systems
pub use damage::*;
pub use projectile::*;
pub use status::*;
pub use weapon::*;
