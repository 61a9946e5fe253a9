//! Box math shared by collision and raycasts

use glam::{Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box from a center point and half extents
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on all three axes (touching faces do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
    }

    /// Ray vs box using the slab method.
    /// Returns the entry distance along `dir` when it lies within `[0, max_distance]`.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = max_distance;
        for i in 0..3 {
            let s = origin[i];
            let d = dir[i];
            let lo = self.min[i];
            let hi = self.max[i];
            if d.abs() < 1e-8 {
                // Parallel to the slab: must already be inside it
                if s < lo || s > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo - s) * inv;
            let mut t1 = (hi - s) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Length of the XZ (ground plane) part of `v`
pub fn horizontal_length(v: Vec3) -> f32 {
    v.xz().length()
}

/// Ground-plane distance between two points, ignoring height
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal_length(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_box_in_front() {
        let b = Aabb::from_center(Vec3::new(0.0, 1.0, -10.0), Vec3::ONE);
        let d = b
            .ray_distance(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 100.0)
            .unwrap();
        assert!((d - 9.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_box_behind_or_out_of_range() {
        let b = Aabb::from_center(Vec3::new(0.0, 1.0, -10.0), Vec3::ONE);
        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(b.ray_distance(origin, Vec3::Z, 100.0).is_none());
        assert!(b.ray_distance(origin, Vec3::NEG_Z, 5.0).is_none());
    }

    #[test]
    fn ray_starting_inside_box_hits_at_zero() {
        let b = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        let d = b.ray_distance(Vec3::ZERO, Vec3::X, 10.0).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&b));
        let c = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(2.0, 2.0, 2.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn horizontal_distance_ignores_height() {
        let a = Vec3::new(3.0, 10.0, 0.0);
        let b = Vec3::new(0.0, -2.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-5);
        assert!((horizontal_length(Vec3::new(0.0, 7.0, 0.0))).abs() < 1e-6);
    }
}
