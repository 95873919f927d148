//! Physics simulation module
//!
//! Kinematic движение в плоскости карты (без коллизий, clamp по границам).

pub mod movement;

// Re-export основных типов
pub use movement::{integrate_velocity, MotionPlugin};
