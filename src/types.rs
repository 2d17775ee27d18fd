use nalgebra::{Point3, Vector2 as NVector2, Vector3};

/// Scalar field value at a point in space.
pub type Value = f32;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// A 2D vector with [`Value`] components, used by planar building blocks.
pub type Vector2 = NVector2<Value>;

/// A signed distance field: maps a [`Point`] to a [`Value`].
///
/// - Negative: inside the surface
/// - Zero: on the surface
/// - Positive: outside the surface
///
/// The magnitude is an upper bound on the true distance. It is exact for the
/// plain primitives and only an estimate for composite or fractal fields.
///
/// Any `Fn(Point) -> Value` closure is a field, so ad-hoc scenes can be written inline:
///
/// ```rust
/// use sdf_collide::{primitives::sphere, types::{Field, Point, Vector}};
///
/// let field = |p: Point| sphere(p - Vector::new(0.0, 0.0, 5.0), 2.0);
/// assert_eq!(field.distance(Point::origin()), 3.0);
/// ```
pub trait Field: Send + Sync {
    fn distance(&self, p: Point) -> Value;
}

impl<F> Field for F
where
    F: Fn(Point) -> Value + Send + Sync,
{
    #[inline]
    fn distance(&self, p: Point) -> Value {
        self(p)
    }
}
