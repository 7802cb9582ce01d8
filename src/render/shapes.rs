//! Shape generation for 2D primitives
//!
//! Everything that is not a plain circle, line or label is emitted as a
//! convex polygon in canvas coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::{Color, DrawCmd, PresentationSink};
use crate::config::Bounds;

/// Segments used to approximate ellipses
const ELLIPSE_SEGMENTS: u32 = 24;

/// Segments per rounded corner
const CORNER_SEGMENTS: u32 = 6;

/// Height of one gradient band in pixels
pub const GRADIENT_BAND: f32 = 4.0;

pub fn circle(center: Vec2, radius: f32, color: Color) -> DrawCmd {
    DrawCmd::Circle {
        center,
        radius,
        color,
        stroke: None,
    }
}

pub fn ring(center: Vec2, radius: f32, color: Color, width: f32) -> DrawCmd {
    DrawCmd::Circle {
        center,
        radius,
        color,
        stroke: Some(width),
    }
}

/// Axis-aligned ellipse with the given half axes
pub fn ellipse(center: Vec2, half_axes: Vec2, color: Color) -> DrawCmd {
    let points = (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * half_axes
        })
        .collect();
    DrawCmd::Polygon { points, color }
}

/// Rectangle centred on `center`
pub fn rect(center: Vec2, half_extents: Vec2, color: Color) -> DrawCmd {
    let (min, max) = (center - half_extents, center + half_extents);
    DrawCmd::Polygon {
        points: vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    }
}

/// Rectangle centred on `center` with circular corners
pub fn rounded_rect(center: Vec2, half_extents: Vec2, corner: f32, color: Color) -> DrawCmd {
    let corner = corner.min(half_extents.x).min(half_extents.y).max(0.0);
    let inner = half_extents - Vec2::splat(corner);
    // Corner centres clockwise from bottom-right, each sweeping a quarter turn
    let corners = [
        (Vec2::new(inner.x, inner.y), 0.0),
        (Vec2::new(-inner.x, inner.y), 0.25),
        (Vec2::new(-inner.x, -inner.y), 0.5),
        (Vec2::new(inner.x, -inner.y), 0.75),
    ];
    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS as usize + 1));
    for (offset, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let theta = (start + i as f32 / CORNER_SEGMENTS as f32 * 0.25) * TAU;
            points.push(center + offset + Vec2::new(theta.cos(), theta.sin()) * corner);
        }
    }
    DrawCmd::Polygon { points, color }
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: Color) -> DrawCmd {
    DrawCmd::Polygon {
        points: vec![a, b, c],
        color,
    }
}

/// Triangle given in local coordinates, rotated by `angle` then moved to `origin`
pub fn rotated_triangle(origin: Vec2, angle: f32, local: [Vec2; 3], color: Color) -> DrawCmd {
    let rot = Vec2::from_angle(angle);
    let [a, b, c] = local.map(|p| origin + rot.rotate(p));
    triangle(a, b, c, color)
}

/// Vertical gradient from `top` to `bottom`, drawn as horizontal line bands
pub fn vertical_gradient(
    bounds: &Bounds,
    top: Color,
    bottom: Color,
    sink: &mut dyn PresentationSink,
) {
    let bands = (bounds.height / GRADIENT_BAND).ceil().max(1.0) as u32;
    for i in 0..bands {
        let y = (i as f32 + 0.5) * GRADIENT_BAND;
        let t = crate::map_range(y, 0.0, bounds.height, 0.0, 1.0);
        sink.draw(DrawCmd::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(bounds.width, y),
            color: top.lerp(bottom, t),
            width: GRADIENT_BAND,
        });
    }
}
