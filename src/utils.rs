use bevy::math::Vec3;

use crate::types::{Point, Value, Vector};

/// Componentwise absolute value, reflecting a point into the positive octant.
#[inline]
pub fn abs(p: Point) -> Vector {
    p.coords.abs()
}

/// Componentwise `max(v, 0)`.
#[inline]
pub fn max_zero(v: Vector) -> Vector {
    v.sup(&Vector::zeros())
}

/// Rotates `p` about the Y axis by `degrees`.
///
/// ```text
/// x' = cos·x − sin·z
/// z' = sin·x + cos·z
/// ```
#[inline]
pub fn rotate_y(p: Point, degrees: Value) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(cos * p.x - sin * p.z, p.y, sin * p.x + cos * p.z)
}

/// Converts a Bevy translation into a field-space [`Point`].
#[inline]
pub fn to_point(v: Vec3) -> Point {
    Point::new(v.x, v.y, v.z)
}

/// Converts a field-space [`Vector`] into a Bevy [`Vec3`].
#[inline]
pub fn to_vec3(v: Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
