//! Iterative fractal distance estimators.
//!
//! Unlike the [primitives](crate::primitives), these are not exact distance fields.
//! They return a heuristic bound whose error grows with iteration depth and near the
//! fractal's fine structure, so a raymarcher or resolver stepping by the returned
//! value may need a few extra steps to converge.

use std::f32::consts::FRAC_PI_2;

use crate::{
    interp::floor_mod,
    primitives::{cross, cuboid},
    types::{Point, Value, Vector},
    utils::abs,
};

/// Azimuth of `z` in the half-range form `atan(y / x)`.
///
/// On the `x == 0` plane (either zero sign) the quotient is undefined, so the
/// angle is pinned to `+π/2` for `y > 0`, `-π/2` for `y < 0` and `0` on the axis.
#[inline]
fn azimuth(x: Value, y: Value) -> Value {
    if x == 0.0 {
        if y > 0.0 {
            FRAC_PI_2
        } else if y < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        (y / x).atan()
    }
}

/// Mandelbulb distance estimate.
///
/// Iterates `z ← z^power + p` in spherical coordinates while tracking the running
/// derivative `dr`, then returns `0.5 · ln(r) · r / dr`:
///
/// ```text
/// r     = |z|                       (stop once r > bailout)
/// θ     = acos(z.z / r) · power
/// φ     = atan(z.y / z.x) · power
/// dr    = r^(power-1) · power · dr + 1
/// z     = r^power · (sin θ cos φ, sin φ sin θ, cos θ) + p
/// ```
///
/// Points that never escape get the estimate from the last `r`/`dr`, which tends
/// towards zero deep inside the set. With `iterations == 0` that is `|p|` with
/// `dr = 1`. When the final radius is zero the estimate is `0`, the limit of
/// `r · ln r`.
///
/// `bailout` must be finite.
pub fn mandelbulb(p: Point, iterations: u32, bailout: Value, power: Value) -> Value {
    let mut z = p.coords;
    let mut dr: Value = 1.0;
    let mut r = z.norm();

    for _ in 0..iterations {
        r = z.norm();
        if r > bailout {
            break;
        }

        let theta = if r == 0.0 {
            0.0
        } else {
            (z.z / r).clamp(-1.0, 1.0).acos()
        };
        let phi = azimuth(z.x, z.y);
        dr = r.powf(power - 1.0) * power * dr + 1.0;

        let zr = r.powf(power);
        let theta = theta * power;
        let phi = phi * power;

        z = zr
            * Vector::new(
                theta.sin() * phi.cos(),
                phi.sin() * theta.sin(),
                theta.cos(),
            )
            + p.coords;
    }

    if r == 0.0 {
        return 0.0;
    }
    0.5 * r.ln() * r / dr
}

/// Menger sponge of half-extent `half_extent` centred on the origin.
///
/// Starts from the solid box and, for each iteration, removes a [`cross`] at three
/// times the previous frequency by folding space into a periodic cell:
///
/// ```text
/// a = ((p · s) mod 2) − 1
/// s = s · 3
/// r = |1 − 3|a||
/// d = max(d, cross(r, 1) / s)
/// ```
///
/// The modulo is a floor modulo. Past about six iterations the holes are finer
/// than anything an `f32` can resolve, but the loop still runs every iteration.
pub fn menger_sponge(p: Point, half_extent: Value, iterations: u32) -> Value {
    let p = abs(p);
    let mut d = cuboid(Point::from(p), Vector::repeat(half_extent));
    let mut s = 1.0 / half_extent;

    for _ in 0..iterations {
        let a = (p * s).map(|c| floor_mod(c, 2.0) - 1.0);
        s *= 3.0;
        let r = a.map(|c| (1.0 - 3.0 * c.abs()).abs());
        let c = cross(Point::from(r), 1.0) / s;
        d = d.max(c);
    }

    d
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn azimuth_tie_break_on_x_zero() {
        assert_eq!(azimuth(0.0, 1.0), FRAC_PI_2);
        assert_eq!(azimuth(-0.0, 1.0), FRAC_PI_2);
        assert_eq!(azimuth(0.0, -2.0), -FRAC_PI_2);
        assert_eq!(azimuth(0.0, 0.0), 0.0);
        assert_relative_eq!(azimuth(1.0, 1.0), std::f32::consts::FRAC_PI_4);
    }

    #[test]
    fn mandelbulb_escaped_point_uses_first_radius() {
        // Already past the bailout: one radius evaluation, dr untouched.
        let p = Point::new(3.0, 0.0, 0.0);
        let expected = 0.5 * 3.0_f32.ln() * 3.0;
        assert_relative_eq!(mandelbulb(p, 16, 2.0, 8.0), expected);
    }

    #[test]
    fn mandelbulb_origin_is_on_the_set() {
        assert_eq!(mandelbulb(Point::origin(), 16, 2.0, 8.0), 0.0);
        assert_eq!(mandelbulb(Point::origin(), 0, 2.0, 8.0), 0.0);
    }

    #[test]
    fn mandelbulb_without_iterations_uses_the_point_radius() {
        let far = mandelbulb(Point::new(100.0, 0.0, 0.0), 0, 2.0, 8.0);
        assert_relative_eq!(far, 0.5 * 100.0_f32.ln() * 100.0);
        assert!(mandelbulb(Point::new(0.0, 0.5, 0.0), 0, 2.0, 8.0) < 0.0);
    }

    #[test]
    fn mandelbulb_is_finite_on_singular_planes() {
        for p in [
            Point::new(0.0, 0.5, 0.2),
            Point::new(0.0, -0.5, 0.2),
            Point::new(0.0, 0.0, 0.7),
            Point::new(0.0, 0.0, -0.7),
            Point::new(0.3, 0.0, 0.0),
        ] {
            let d = mandelbulb(p, 12, 2.0, 8.0);
            assert!(d.is_finite(), "{p:?} -> {d}");
        }
    }

    #[test]
    fn mandelbulb_far_point_is_positive() {
        assert!(mandelbulb(Point::new(0.0, 0.0, 5.0), 12, 4.0, 8.0) > 0.0);
    }

    #[test]
    fn menger_without_iterations_is_the_box() {
        let p = Point::new(2.0, 0.5, -0.25);
        assert_relative_eq!(menger_sponge(p, 1.0, 0), cuboid(p, Vector::repeat(1.0)));
    }

    #[test]
    fn menger_first_iteration_hollows_the_centre() {
        // The centre of the solid box is carved out by the first cross.
        assert!(menger_sponge(Point::origin(), 1.0, 0) < 0.0);
        assert!(menger_sponge(Point::origin(), 1.0, 1) > 0.0);
        // Close to the corner, solid at every level up to four.
        let corner = Point::new(0.99, 0.99, 0.99);
        assert_relative_eq!(menger_sponge(corner, 1.0, 4), -0.01, epsilon = 1e-5);
    }

    #[test]
    fn menger_third_iteration_carves_finer_holes() {
        // (0.9 + 1) / 2 = 0.95 has base-3 digits 2, 2, 1 on every axis.
        let p = Point::new(0.9, 0.9, 0.9);
        assert!(menger_sponge(p, 1.0, 2) < 0.0);
        assert!(menger_sponge(p, 1.0, 3) > 0.0);
        assert_relative_eq!(menger_sponge(p, 1.0, 4), menger_sponge(p, 1.0, 3));
    }

    #[test]
    fn menger_is_symmetric_across_octants() {
        let p = Point::new(0.4, -0.7, 0.1);
        let mirrored = Point::new(-0.4, 0.7, -0.1);
        assert_eq!(menger_sponge(p, 1.0, 3), menger_sponge(mirrored, 1.0, 3));
    }
}
