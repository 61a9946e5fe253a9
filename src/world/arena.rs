//! In-memory arena: walls, cover, two elevator doors and explosive barrels

use tracing::debug;

use crate::util::{Aabb, Vec3};

use super::{Collider, ColliderId, ColliderTag, HazardVolume, PropId, RayHit, RayTarget, World};

/// Door is slid far enough to walk through past this opening amount
pub const DOOR_PASSABLE_AT: f32 = 0.6;
/// Distance a door slides sideways when fully open
pub const DOOR_SLIDE_DISTANCE: f32 = 3.2;

/// Hazard templates spawned by one explosion: (half extent, dps, lifetime)
const EXPLOSION_HAZARDS: [(f32, f32, f32); 2] = [
    // initial blast
    (3.0, 60.0, 0.5),
    // burning pool
    (2.0, 15.0, 6.0),
];

#[derive(Debug, Clone)]
struct ExplosiveProp {
    id: PropId,
    collider: ColliderId,
    aabb: Aabb,
    exploded: bool,
}

#[derive(Debug, Clone)]
struct ActiveHazard {
    aabb: Aabb,
    base_dps: f32,
    remaining: f32,
}

#[derive(Debug, Clone)]
struct SlidingDoor {
    collider: ColliderId,
    closed: Aabb,
    slide_dir: f32,
}

/// Default world provider used by the harness and tests
#[derive(Debug, Clone)]
pub struct ArenaWorld {
    colliders: Vec<Collider>,
    props: Vec<ExplosiveProp>,
    hazards: Vec<ActiveHazard>,
    doors: Vec<SlidingDoor>,
    door_open: f32,
    hazard_scale: f32,
}

impl ArenaWorld {
    /// Empty world: no geometry, every ray misses
    pub fn empty() -> Self {
        Self {
            colliders: Vec::new(),
            props: Vec::new(),
            hazards: Vec::new(),
            doors: Vec::new(),
            door_open: 0.0,
            hazard_scale: 1.0,
        }
    }

    /// The standard duel arena
    pub fn standard() -> Self {
        let mut world = Self::empty();

        // Perimeter
        world.add_collider(box_at(0.0, -21.0, 16.0, 1.0, 3.0), ColliderTag::Wall);
        world.add_collider(box_at(0.0, 21.0, 16.0, 1.0, 3.0), ColliderTag::Wall);
        world.add_collider(box_at(-16.0, 0.0, 1.0, 21.0, 3.0), ColliderTag::Wall);
        world.add_collider(box_at(16.0, 0.0, 1.0, 21.0, 3.0), ColliderTag::Wall);

        // Cover
        world.add_collider(box_at(0.0, 0.0, 2.0, 1.0, 1.2), ColliderTag::Wall);
        world.add_collider(box_at(-8.0, 7.0, 1.0, 2.5, 1.5), ColliderTag::Wall);
        world.add_collider(box_at(8.0, -7.0, 1.0, 2.5, 1.5), ColliderTag::Wall);

        // Elevator shafts (side walls) and sliding doors, one per end
        for side in [1.0_f32, -1.0] {
            world.add_collider(box_at(-1.8, side * 18.0, 0.2, 2.5, 3.0), ColliderTag::Elevator);
            world.add_collider(box_at(1.8, side * 18.0, 0.2, 2.5, 3.0), ColliderTag::Elevator);
            let door = box_at(0.0, side * 15.5, 1.6, 0.2, 3.0);
            let id = world.add_collider(door, ColliderTag::Door);
            world.doors.push(SlidingDoor {
                collider: id,
                closed: door,
                slide_dir: side,
            });
        }

        // Explosive barrels
        world.add_prop(Vec3::new(6.0, 0.0, 4.0));
        world.add_prop(Vec3::new(-6.0, 0.0, -4.0));

        world
    }

    /// Append a collider and return its id
    pub fn add_collider(&mut self, aabb: Aabb, tag: ColliderTag) -> ColliderId {
        let id = self.colliders.len() as ColliderId;
        self.colliders.push(Collider {
            id,
            aabb,
            tag,
            disabled: false,
        });
        id
    }

    /// Place an explosive barrel standing on the ground at `base`
    pub fn add_prop(&mut self, base: Vec3) -> PropId {
        let aabb = Aabb::new(
            Vec3::new(base.x - 0.4, base.y, base.z - 0.4),
            Vec3::new(base.x + 0.4, base.y + 1.1, base.z + 0.4),
        );
        let collider = self.add_collider(aabb, ColliderTag::Prop);
        let id = self.props.len() as PropId;
        self.props.push(ExplosiveProp {
            id,
            collider,
            aabb,
            exploded: false,
        });
        id
    }

    /// Multiplier applied to hazard damage (zero during calm visual states)
    pub fn set_hazard_scale(&mut self, scale: f32) {
        self.hazard_scale = scale.max(0.0);
    }

    pub fn door_open(&self) -> f32 {
        self.door_open
    }

    pub fn is_prop_exploded(&self, prop: PropId) -> bool {
        self.props
            .iter()
            .find(|p| p.id == prop)
            .map(|p| p.exploded)
            .unwrap_or(false)
    }

    pub fn active_hazard_count(&self) -> usize {
        self.hazards.len()
    }

    fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.iter_mut().find(|c| c.id == id)
    }
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::standard()
    }
}

impl World for ArenaWorld {
    fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let mut best: Option<(f32, RayTarget)> = None;

        // Props are ray targets in their own right, not plain geometry
        for c in &self.colliders {
            if c.disabled || c.tag == ColliderTag::Prop {
                continue;
            }
            if let Some(t) = c.aabb.ray_distance(origin, direction, max_distance) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, RayTarget::Geometry(c.id)));
                }
            }
        }

        for p in &self.props {
            if p.exploded {
                continue;
            }
            if let Some(t) = p.aabb.ray_distance(origin, direction, max_distance) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, RayTarget::Prop(p.id)));
                }
            }
        }

        best.map(|(distance, target)| RayHit {
            point: origin + direction * distance,
            distance,
            target,
        })
    }

    fn trigger_prop_explosion(&mut self, prop: PropId) -> Option<Vec3> {
        let (collider, center) = {
            let p = self.props.iter_mut().find(|p| p.id == prop)?;
            if p.exploded {
                return None;
            }
            p.exploded = true;
            (p.collider, p.aabb.center())
        };

        if let Some(c) = self.collider_mut(collider) {
            c.disabled = true;
        }

        for (half, dps, lifetime) in EXPLOSION_HAZARDS {
            let ground = Vec3::new(center.x, 0.0, center.z);
            self.hazards.push(ActiveHazard {
                aabb: Aabb::new(
                    ground - Vec3::new(half, 0.0, half),
                    ground + Vec3::new(half, 2.0, half),
                ),
                base_dps: dps,
                remaining: lifetime,
            });
        }

        debug!(prop, "Prop exploded");
        Some(center)
    }

    fn hazards(&self) -> Vec<HazardVolume> {
        self.hazards
            .iter()
            .map(|h| HazardVolume {
                aabb: h.aabb,
                damage_per_second: h.base_dps * self.hazard_scale,
            })
            .collect()
    }

    fn tick(&mut self, dt: f32) {
        for h in &mut self.hazards {
            h.remaining -= dt;
        }
        self.hazards.retain(|h| h.remaining > 0.0);
    }

    fn set_door_open(&mut self, amount: f32) {
        let amount = amount.clamp(0.0, 1.0);
        self.door_open = amount;
        let doors = self.doors.clone();
        for door in doors {
            let offset = Vec3::new(door.slide_dir * amount * DOOR_SLIDE_DISTANCE, 0.0, 0.0);
            if let Some(c) = self.collider_mut(door.collider) {
                c.aabb = Aabb::new(door.closed.min + offset, door.closed.max + offset);
                c.disabled = amount > DOOR_PASSABLE_AT;
            }
        }
    }

    fn reset_round(&mut self) {
        self.hazards.clear();
        let restored: Vec<ColliderId> = self
            .props
            .iter_mut()
            .map(|p| {
                p.exploded = false;
                p.collider
            })
            .collect();
        for id in restored {
            if let Some(c) = self.collider_mut(id) {
                c.disabled = false;
            }
        }
        self.set_door_open(0.0);
    }
}

/// Box standing on the ground, centered at (x, z) with half extents
fn box_at(x: f32, z: f32, half_x: f32, half_z: f32, height: f32) -> Aabb {
    Aabb::new(
        Vec3::new(x - half_x, 0.0, z - half_z),
        Vec3::new(x + half_x, height, z + half_z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_rays_miss() {
        let world = ArenaWorld::empty();
        assert!(world
            .cast_ray(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 0.0, -1.0), 100.0)
            .is_none());
    }

    #[test]
    fn ray_reports_nearest_target() {
        let mut world = ArenaWorld::empty();
        let far = world.add_collider(box_at(0.0, -10.0, 1.0, 0.5, 3.0), ColliderTag::Wall);
        let prop = world.add_prop(Vec3::new(0.0, 0.0, -5.0));
        let hit = world
            .cast_ray(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0), 100.0)
            .unwrap();
        assert_eq!(hit.target, RayTarget::Prop(prop));

        world.trigger_prop_explosion(prop);
        let hit = world
            .cast_ray(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0), 100.0)
            .unwrap();
        assert_eq!(hit.target, RayTarget::Geometry(far));
    }

    #[test]
    fn prop_explodes_once() {
        let mut world = ArenaWorld::empty();
        let prop = world.add_prop(Vec3::new(3.0, 0.0, 3.0));
        assert!(world.trigger_prop_explosion(prop).is_some());
        let spawned = world.active_hazard_count();
        assert!(spawned > 0);
        assert!(world.trigger_prop_explosion(prop).is_none());
        assert_eq!(world.active_hazard_count(), spawned);
    }

    #[test]
    fn hazards_expire_and_scale() {
        let mut world = ArenaWorld::empty();
        let prop = world.add_prop(Vec3::ZERO);
        world.trigger_prop_explosion(prop);
        world.set_hazard_scale(0.0);
        assert!(world.hazards().iter().all(|h| h.damage_per_second == 0.0));
        world.tick(1.0);
        assert_eq!(world.active_hazard_count(), 1);
        world.tick(10.0);
        assert_eq!(world.active_hazard_count(), 0);
    }

    #[test]
    fn doors_disable_once_mostly_open() {
        let mut world = ArenaWorld::standard();
        world.set_door_open(0.5);
        assert!(world
            .colliders()
            .iter()
            .filter(|c| c.tag == ColliderTag::Door)
            .all(|c| !c.disabled));
        world.set_door_open(0.7);
        assert!(world
            .colliders()
            .iter()
            .filter(|c| c.tag == ColliderTag::Door)
            .all(|c| c.disabled));
        world.reset_round();
        assert_eq!(world.door_open(), 0.0);
    }
}
