//! Utility modules

pub mod math;
pub mod time;

pub use glam::Vec3;
pub use math::{horizontal_distance, horizontal_length, Aabb};
