//! Shape parameter structs that implement [`Field`].
//!
//! Each struct holds the parameters of one primitive or fractal and forwards to the
//! matching free function. They are `Copy` and never change during evaluation.

use crate::{
    fractal::{mandelbulb, menger_sponge},
    primitives::{cross, cuboid, plane, sphere},
    types::{Field, Point, Value, Vector},
};

/// Infinite plane `dot(p, normal) + offset`. `normal` must be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector,
    pub offset: Value,
}

impl Plane {
    pub fn new(normal: Vector, offset: Value) -> Self {
        Self { normal, offset }
    }

    /// The `y = 0` ground plane, solid below.
    pub fn ground() -> Self {
        Self::new(Vector::y(), 0.0)
    }
}

impl Field for Plane {
    fn distance(&self, p: Point) -> Value {
        plane(p, self.normal, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: Value,
}

impl Sphere {
    pub fn new(radius: Value) -> Self {
        Self { radius }
    }
}

impl Field for Sphere {
    fn distance(&self, p: Point) -> Value {
        sphere(p, self.radius)
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub half_extents: Vector,
}

impl Cuboid {
    pub fn new(half_extents: Vector) -> Self {
        Self { half_extents }
    }

    pub fn cube(half_extent: Value) -> Self {
        Self::new(Vector::repeat(half_extent))
    }
}

impl Field for Cuboid {
    fn distance(&self, p: Point) -> Value {
        cuboid(p, self.half_extents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cross {
    pub thickness: Value,
}

impl Cross {
    pub fn new(thickness: Value) -> Self {
        Self { thickness }
    }
}

impl Field for Cross {
    fn distance(&self, p: Point) -> Value {
        cross(p, self.thickness)
    }
}

/// Mandelbulb estimator parameters. See [`mandelbulb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mandelbulb {
    pub iterations: u32,
    pub bailout: Value,
    pub power: Value,
}

impl Default for Mandelbulb {
    fn default() -> Self {
        Self {
            iterations: 16,
            bailout: 2.0,
            power: 8.0,
        }
    }
}

impl Field for Mandelbulb {
    fn distance(&self, p: Point) -> Value {
        mandelbulb(p, self.iterations, self.bailout, self.power)
    }
}

/// Menger sponge parameters. See [`menger_sponge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MengerSponge {
    pub half_extent: Value,
    pub iterations: u32,
}

impl Default for MengerSponge {
    fn default() -> Self {
        Self {
            half_extent: 1.0,
            iterations: 4,
        }
    }
}

impl Field for MengerSponge {
    fn distance(&self, p: Point) -> Value {
        menger_sponge(p, self.half_extent, self.iterations)
    }
}
