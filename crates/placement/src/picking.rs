//! Ray queries against level planes and object colliders.
//!
//! There is no physics engine in the loop: the cursor ray is intersected with
//! the active level's floor plane for placement, and with collider boxes kept
//! in the `ObjectRegistry` for demolition.

use bevy::prelude::*;

use crate::grid::GridLevel;

/// Where the ray crosses the horizontal plane of `level`, if the level is
/// active and the crossing lies in front of the ray origin.
pub fn pick_level_plane(ray: Ray3d, level: &GridLevel) -> Option<Vec3> {
    if !level.is_active() {
        return None;
    }
    ray_plane_y(ray, level.origin().y)
}

/// Intersection with the plane `y = height`.
pub fn ray_plane_y(ray: Ray3d, height: f32) -> Option<Vec3> {
    let dir = *ray.direction;
    if dir.y.abs() <= 0.001 {
        return None;
    }
    let t = (height - ray.origin.y) / dir.y;
    if t <= 0.0 {
        return None;
    }
    Some(ray.origin + dir * t)
}

/// Slab test. Returns the entry distance along the ray, or 0 when the origin
/// is already inside the box.
pub fn ray_aabb(ray: Ray3d, min: Vec3, max: Vec3) -> Option<f32> {
    let dir = *ray.direction;
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let d = dir[axis];
        if d.abs() < f32::EPSILON {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
