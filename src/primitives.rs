//! Exact signed distance primitives.
//!
//! Every function takes the query point in the primitive's local frame. Move a
//! primitive by subtracting its center from `p` before calling in, or wrap it in
//! [`Translate`](crate::combinators::Translate).

use crate::{
    types::{Point, Value, Vector, Vector2},
    utils::{abs, max_zero},
};

/// Plane through `-h * n` with unit normal `n`.
///
/// `n` must be normalized. This is not checked: a non-unit normal scales the
/// result and the field stops being a distance.
#[inline]
pub fn plane(p: Point, n: Vector, h: Value) -> Value {
    p.coords.dot(&n) + h
}

/// Sphere of `radius` centred on the origin.
#[inline]
pub fn sphere(p: Point, radius: Value) -> Value {
    p.coords.norm() - radius
}

/// Axis-aligned box with the given half-extents.
///
/// ```text
/// d = |p| - b
/// inside:  max(d.x, d.y, d.z)      (≤ 0)
/// outside: |max(d, 0)|
/// ```
#[inline]
pub fn cuboid(p: Point, half_extents: Vector) -> Value {
    let d = abs(p) - half_extents;
    d.max().min(0.0) + max_zero(d).norm()
}

/// Axis-aligned rectangle with the given half-extents.
#[inline]
pub fn box2d(p: Vector2, half_extents: Vector2) -> Value {
    let d = p.abs() - half_extents;
    d.sup(&Vector2::zeros()).norm() + d.x.max(d.y).min(0.0)
}

/// Three infinite square bars of half-width `thickness`, one along each axis.
///
/// This is the void carved at every level of the Menger sponge.
pub fn cross(p: Point, thickness: Value) -> Value {
    let b = Vector2::new(thickness, thickness);
    let da = box2d(Vector2::new(p.x, p.y), b);
    let db = box2d(Vector2::new(p.y, p.z), b);
    let dc = box2d(Vector2::new(p.z, p.x), b);
    da.min(db.min(dc))
}
