use crate::types::Value;

// Linear interpolation
#[inline]
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    a + (b - a) * t
}

// Floor modulo: the remainder always has the sign of `m`, so for m > 0 it lies in [0, m).
// `rem_euclid` can round up to exactly `m` for tiny negative inputs; fold that back to 0.
#[inline]
pub fn floor_mod(x: Value, m: Value) -> Value {
    let r = x.rem_euclid(m);
    if r >= m { r - m } else { r }
}
