//! Overlap tests and the shockwave push
//!
//! All predicates are pure and allocation free. The tick only calls them for
//! the kind pairs a variant cares about, so a tick stays linear in entity count.

use glam::Vec2;

use super::entity::Entity;
use super::math::normalize_or_zero;
use crate::map_range;

/// Circles overlap iff the distance between centres is below the sum of radii
#[inline]
pub fn circle_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Axis-aligned boxes (centre, half extents) overlap iff their projections
/// overlap on both axes. Touching edges count as overlap.
#[inline]
pub fn aabb_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let d = (a - b).abs();
    let reach = a_half + b_half;
    d.x <= reach.x && d.y <= reach.y
}

/// Circle test between two entities
#[inline]
pub fn entities_touch(a: &Entity, b: &Entity) -> bool {
    circle_overlap(a.pos, a.radius, b.pos, b.radius)
}

/// Box test between two entities
#[inline]
pub fn boxes_touch(a: &Entity, b: &Entity) -> bool {
    aabb_overlap(a.pos, a.half_extents(), b.pos, b.half_extents())
}

/// Velocity kick a ring of `ring_radius` centred at `center` gives a body at
/// `pos`: directed away from the centre, `force_near` at the centre falling
/// linearly to `force_far` at the ring. `None` outside the ring or exactly
/// at the centre.
pub fn radial_impulse(
    center: Vec2,
    ring_radius: f32,
    pos: Vec2,
    force_near: f32,
    force_far: f32,
) -> Option<Vec2> {
    let offset = pos - center;
    let d = offset.length();
    if d < ring_radius && d > 0.0 {
        let force = map_range(d, 0.0, ring_radius, force_near, force_far);
        Some(normalize_or_zero(offset) * force)
    } else {
        None
    }
}

/// Apply a shockwave's push to one entity, returns whether it was inside
pub fn apply_radial_impulse(
    shock: &Entity,
    target: &mut Entity,
    force_near: f32,
    force_far: f32,
) -> bool {
    match radial_impulse(shock.pos, shock.radius, target.pos, force_near, force_far) {
        Some(kick) => {
            target.vel += kick;
            true
        }
        None => false,
    }
}
