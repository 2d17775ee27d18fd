//! Field combinators: boolean operators and domain transforms over whole fields.
//!
//! ```rust
//! use sdf_collide::{combinators::FieldExt, shapes::Sphere, types::{Field, Point, Vector}};
//!
//! let pair = Sphere::new(1.0).union(Sphere::new(1.0).translate(Vector::new(3.0, 0.0, 0.0)));
//! assert_eq!(pair.distance(Point::new(1.5, 0.0, 0.0)), 0.5);
//! ```

use crate::{
    ops::{intersection, mod_axis, smooth_union, subtraction, union},
    types::{Field, Point, Value, Vector},
    utils::rotate_y,
};

/// Union of two fields, `min(a, b)`.
#[derive(Debug, Clone, Copy)]
pub struct Union<A, B> {
    a: A,
    b: B,
}

impl<A: Field, B: Field> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Field, B: Field> Field for Union<A, B> {
    fn distance(&self, p: Point) -> Value {
        union(self.a.distance(p), self.b.distance(p))
    }
}

/// Smooth union of two fields with blend width `k`.
///
/// `a` is always the first operand, so nesting `SmoothUnion`s fixes the fold order.
#[derive(Debug, Clone, Copy)]
pub struct SmoothUnion<A, B> {
    a: A,
    b: B,
    k: Value,
}

impl<A: Field, B: Field> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, k: Value) -> Self {
        Self { a, b, k }
    }
}

impl<A: Field, B: Field> Field for SmoothUnion<A, B> {
    fn distance(&self, p: Point) -> Value {
        smooth_union(self.a.distance(p), self.b.distance(p), self.k)
    }
}

/// `cutter` removed from `base`.
#[derive(Debug, Clone, Copy)]
pub struct Subtraction<A, B> {
    cutter: A,
    base: B,
}

impl<A: Field, B: Field> Subtraction<A, B> {
    pub fn new(cutter: A, base: B) -> Self {
        Self { cutter, base }
    }
}

impl<A: Field, B: Field> Field for Subtraction<A, B> {
    fn distance(&self, p: Point) -> Value {
        subtraction(self.cutter.distance(p), self.base.distance(p))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Intersection<A, B> {
    a: A,
    b: B,
}

impl<A: Field, B: Field> Intersection<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Field, B: Field> Field for Intersection<A, B> {
    fn distance(&self, p: Point) -> Value {
        intersection(self.a.distance(p), self.b.distance(p))
    }
}

/// Moves a field so its origin sits at `offset`.
#[derive(Debug, Clone, Copy)]
pub struct Translate<F> {
    field: F,
    offset: Vector,
}

impl<F: Field> Translate<F> {
    pub fn new(field: F, offset: Vector) -> Self {
        Self { field, offset }
    }
}

impl<F: Field> Field for Translate<F> {
    fn distance(&self, p: Point) -> Value {
        self.field.distance(p - self.offset)
    }
}

/// Evaluates a field at the query point rotated about Y by `degrees`.
#[derive(Debug, Clone, Copy)]
pub struct RotateY<F> {
    field: F,
    degrees: Value,
}

impl<F: Field> RotateY<F> {
    pub fn new(field: F, degrees: Value) -> Self {
        Self { field, degrees }
    }
}

impl<F: Field> Field for RotateY<F> {
    fn distance(&self, p: Point) -> Value {
        self.field.distance(rotate_y(p, self.degrees))
    }
}

/// Infinite repetition of a field with the given per-axis period.
///
/// Axes whose period is not positive are left unrepeated. The repeated field is
/// only a true distance if the repeated shape fits inside a single cell.
#[derive(Debug, Clone, Copy)]
pub struct Repeat<F> {
    field: F,
    period: Vector,
}

impl<F: Field> Repeat<F> {
    pub fn new(field: F, period: Vector) -> Self {
        Self { field, period }
    }
}

impl<F: Field> Field for Repeat<F> {
    fn distance(&self, p: Point) -> Value {
        let folded = p.coords.zip_map(&self.period, |c, size| {
            if size > 0.0 { mod_axis(c, size) } else { c }
        });
        self.field.distance(Point::from(folded))
    }
}

/// Builder methods for composing fields.
pub trait FieldExt: Field + Sized {
    fn union<B: Field>(self, other: B) -> Union<Self, B> {
        Union::new(self, other)
    }

    fn smooth_union<B: Field>(self, other: B, k: Value) -> SmoothUnion<Self, B> {
        SmoothUnion::new(self, other, k)
    }

    /// Removes `self` from `base`.
    fn subtract_from<B: Field>(self, base: B) -> Subtraction<Self, B> {
        Subtraction::new(self, base)
    }

    fn intersect<B: Field>(self, other: B) -> Intersection<Self, B> {
        Intersection::new(self, other)
    }

    fn translate(self, offset: Vector) -> Translate<Self> {
        Translate::new(self, offset)
    }

    fn rotate_y(self, degrees: Value) -> RotateY<Self> {
        RotateY::new(self, degrees)
    }

    fn repeat(self, period: Vector) -> Repeat<Self> {
        Repeat::new(self, period)
    }
}

impl<F: Field> FieldExt for F {}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shapes::{Cuboid, Sphere};

    #[test]
    fn union_of_spheres_at_midpoint() {
        let right = Sphere::new(1.0).translate(Vector::new(3.0, 0.0, 0.0));
        let field = Sphere::new(1.0).union(right);
        assert_eq!(field.distance(Point::new(1.5, 0.0, 0.0)), 0.5);
    }

    #[test]
    fn subtraction_carves_a_hole() {
        let field = Sphere::new(0.5).subtract_from(Cuboid::cube(1.0));
        assert!(field.distance(Point::origin()) > 0.0);
        assert!(field.distance(Point::new(0.8, 0.0, 0.0)) < 0.0);
    }

    #[test]
    fn intersection_keeps_the_overlap() {
        let shifted = Sphere::new(1.0).translate(Vector::new(1.0, 0.0, 0.0));
        let field = Sphere::new(1.0).intersect(shifted);
        assert!(field.distance(Point::new(0.5, 0.0, 0.0)) < 0.0);
        assert!(field.distance(Point::new(-0.5, 0.0, 0.0)) > 0.0);
    }

    #[test]
    fn rotate_y_moves_the_shape_the_other_way() {
        // Query points are rotated, so the shape appears rotated by -degrees.
        let field = Sphere::new(0.5).translate(Vector::new(2.0, 0.0, 0.0)).rotate_y(90.0);
        assert_relative_eq!(field.distance(Point::new(0.0, 0.0, -2.0)), -0.5, epsilon = 1e-5);
    }

    #[test]
    fn repeat_tiles_space() {
        let field = Sphere::new(0.25).repeat(Vector::new(2.0, 0.0, 2.0));
        assert_relative_eq!(field.distance(Point::new(4.0, 0.0, -6.0)), -0.25);
        // Y is not repeated.
        assert_relative_eq!(field.distance(Point::new(0.0, 2.0, 0.0)), 1.75);
    }

    #[test]
    fn closures_compose_with_shapes() {
        let floor = |p: Point| p.y;
        let field = floor.union(Sphere::new(1.0).translate(Vector::new(0.0, 3.0, 0.0)));
        assert_eq!(field.distance(Point::new(0.0, 3.0, 0.0)), -1.0);
        assert_eq!(field.distance(Point::new(10.0, 0.5, 0.0)), 0.5);
    }
}
