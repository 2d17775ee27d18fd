//! Operators on distance values.
//!
//! These combine already-evaluated distances. For composing whole fields see
//! [`combinators`](crate::combinators), which are built on top of these.

use crate::{
    interp::{floor_mod, lerp},
    types::Value,
};

/// Union: `min(d1, d2)`.
#[inline]
pub fn union(d1: Value, d2: Value) -> Value {
    d1.min(d2)
}

/// Smooth union with blend width `k`.
///
/// ```text
/// h = clamp(0.5 + 0.5 (d2 − d1) / k, 0, 1)
/// d = lerp(d2, d1, h) − k h (1 − h)
/// ```
///
/// `k` must be positive. The operator is not associative, so chained unions must
/// always be folded in the same order.
#[inline]
pub fn smooth_union(d1: Value, d2: Value, k: Value) -> Value {
    debug_assert!(k > 0.0, "smooth_union blend width must be positive, got {k}");
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    lerp(d2, d1, h) - k * h * (1.0 - h)
}

/// Subtraction: removes shape 1 from shape 2, `max(−d1, d2)`.
#[inline]
pub fn subtraction(d1: Value, d2: Value) -> Value {
    (-d1).max(d2)
}

/// Intersection: `max(d1, d2)`.
#[inline]
pub fn intersection(d1: Value, d2: Value) -> Value {
    d1.max(d2)
}

/// Folds a single coordinate into a periodic cell of width `size`, centred on zero.
///
/// For every `size > 0` the result lies in `[−size/2, size/2)`.
#[inline]
pub fn mod_axis(p: Value, size: Value) -> Value {
    let half = size * 0.5;
    floor_mod(p + half, size) - half
}
