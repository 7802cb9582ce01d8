//! Vector helpers on top of `glam::Vec2`
//!
//! glam covers add/sub/scale/length. The pieces here pin down the edge cases
//! the simulation relies on: normalizing a near-zero vector yields zero, and
//! random headings come from the session RNG only.

use glam::Vec2;
use rand::Rng;

use crate::consts::NORMALIZE_EPSILON;

/// Unit vector in the direction of `v`, or zero when `|v| < ε`
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < NORMALIZE_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Direction used to steer toward a target: unit length when the target is
/// more than one pixel away, the raw offset otherwise
#[inline]
pub fn steer_direction(from: Vec2, to: Vec2) -> Vec2 {
    let offset = to - from;
    if offset.length() > 1.0 {
        normalize_or_zero(offset)
    } else {
        offset
    }
}

/// Linear interpolation between two vectors, `t` clamped to [0, 1]
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Unit vector with a uniformly random heading
pub fn random_heading<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

/// Reflect one axis of a bouncing body: flips the velocity sign and clamps
/// the coordinate into `[radius, extent - radius]` when it left that interval
#[inline]
pub fn reflect_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) {
    if *pos < radius || *pos > extent - radius {
        *vel = -*vel;
        *pos = pos.clamp(radius, extent - radius);
    }
}

/// Wrap one axis: leaving past `-radius` re-enters at `extent + radius` and
/// vice versa
#[inline]
pub fn wrap_axis(pos: &mut f32, radius: f32, extent: f32) {
    if *pos < -radius {
        *pos = extent + radius;
    } else if *pos > extent + radius {
        *pos = -radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(normalize_or_zero(Vec2::new(1e-9, -1e-9)), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize_or_zero(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_steer_direction_short_offset_not_normalized() {
        let d = steer_direction(Vec2::new(10.0, 10.0), Vec2::new(10.5, 10.0));
        assert!((d.x - 0.5).abs() < 1e-6);
        let d = steer_direction(Vec2::ZERO, Vec2::new(0.0, 100.0));
        assert!((d.y - 1.0).abs() < 1e-6);
        assert_eq!(steer_direction(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_lerp_vec_clamps_t() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(lerp_vec(a, b, 0.5), Vec2::new(5.0, 10.0));
        assert_eq!(lerp_vec(a, b, 2.0), b);
        assert_eq!(lerp_vec(a, b, -1.0), a);
    }

    #[test]
    fn test_reflect_axis() {
        let (mut pos, mut vel) = (-3.0, -2.0);
        reflect_axis(&mut pos, &mut vel, 10.0, 600.0);
        assert_eq!(pos, 10.0);
        assert_eq!(vel, 2.0);

        let (mut pos, mut vel) = (300.0, 2.0);
        reflect_axis(&mut pos, &mut vel, 10.0, 600.0);
        assert_eq!((pos, vel), (300.0, 2.0));
    }

    #[test]
    fn test_wrap_axis() {
        let mut pos = -15.0;
        wrap_axis(&mut pos, 14.0, 800.0);
        assert_eq!(pos, 814.0);
        let mut pos = 815.0;
        wrap_axis(&mut pos, 14.0, 800.0);
        assert_eq!(pos, -14.0);
    }

    #[test]
    fn test_random_heading_is_unit() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            assert!((random_heading(&mut rng).length() - 1.0).abs() < 1e-5);
        }
    }
}
