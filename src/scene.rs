//! Ready-made scene fields.
//!
//! Scenes receive all of their parameters up front. Nothing here looks up shared
//! state at evaluation time, so a scene can be handed to the resolver, a sampling
//! grid and a renderer at once and all of them see the same surface.

use crate::{
    fractal::menger_sponge,
    ops::smooth_union,
    primitives::{plane, sphere},
    types::{Field, Point, Value, Vector},
    utils::rotate_y,
};

/// Left-to-right smooth union of `values` with blend width `k`.
///
/// Returns `None` for an empty input.
pub fn smooth_union_fold<I>(values: I, k: Value) -> Option<Value>
where
    I: IntoIterator<Item = Value>,
{
    values.into_iter().reduce(|acc, d| smooth_union(acc, d, k))
}

/// A ring of spheres blended into the ground plane.
///
/// Copy `i` of the sphere is evaluated at the query point rotated about Y by
/// `i · step_degrees`, so the copies fan out around the world Y axis. The spheres
/// are folded first, copy 0 to the last, then blended with the `y = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereRing {
    pub center: Vector,
    pub radius: Value,
    pub copies: u32,
    pub step_degrees: Value,
    pub smoothness: Value,
}

impl Default for SphereRing {
    fn default() -> Self {
        Self {
            center: Vector::new(0.0, 1.0, 4.0),
            radius: 1.0,
            copies: 8,
            step_degrees: 45.0,
            smoothness: 0.5,
        }
    }
}

impl Field for SphereRing {
    fn distance(&self, p: Point) -> Value {
        let ground = plane(p, Vector::y(), 0.0);
        let spheres = (0..self.copies).map(|i| {
            let q = rotate_y(p, self.step_degrees * i as Value);
            sphere(q - self.center, self.radius)
        });

        match smooth_union_fold(spheres, self.smoothness) {
            Some(ring) => smooth_union(ring, ground, self.smoothness),
            None => ground,
        }
    }
}

/// A Menger sponge placed at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MengerScene {
    pub position: Vector,
    pub half_extent: Value,
    pub iterations: u32,
}

impl Default for MengerScene {
    fn default() -> Self {
        Self {
            position: Vector::zeros(),
            half_extent: 1.0,
            iterations: 4,
        }
    }
}

impl Field for MengerScene {
    fn distance(&self, p: Point) -> Value {
        menger_sponge(p - self.position, self.half_extent, self.iterations)
    }
}
