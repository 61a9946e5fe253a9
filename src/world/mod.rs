//! World query provider - the geometry the simulation reads every frame
//!
//! The world owns its colliders, explosive props and hazard volumes. The
//! simulation core only reads collider bounds, casts rays, and asks the world
//! to detonate props or animate the elevator doors.

pub mod arena;

pub use arena::ArenaWorld;

use serde::{Deserialize, Serialize};

use crate::util::{Aabb, Vec3};

pub type ColliderId = u32;
pub type PropId = u32;

/// What a collider represents in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderTag {
    Wall,
    Prop,
    Door,
    Elevator,
}

/// Static or world-animated blocking box
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub aabb: Aabb,
    pub tag: ColliderTag,
    /// Disabled colliders are ignored by movement (e.g. an open door)
    pub disabled: bool,
}

/// What a ray ended on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RayTarget {
    Geometry(ColliderId),
    Prop(PropId),
}

/// Nearest world hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub target: RayTarget,
}

/// Timed area that damages anything standing inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardVolume {
    pub aabb: Aabb,
    pub damage_per_second: f32,
}

/// Geometry and hazard provider consumed by the match simulation
pub trait World {
    /// All colliders in provider order (resolution order follows this)
    fn colliders(&self) -> &[Collider];

    /// Nearest blocking geometry or prop along the ray, if any
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Detonate a prop. Returns the blast position the first time only.
    fn trigger_prop_explosion(&mut self, prop: PropId) -> Option<Vec3>;

    /// Currently active hazard volumes with their effective damage rate
    fn hazards(&self) -> Vec<HazardVolume>;

    /// Advance world-owned timers (hazard lifetimes)
    fn tick(&mut self, _dt: f32) {}

    /// Elevator door opening amount in `[0, 1]`
    fn set_door_open(&mut self, _amount: f32) {}

    /// Restore props and doors and clear hazards for a new round
    fn reset_round(&mut self) {}
}
