//! Penetration resolution against a distance field.
//!
//! Each step the resolver samples the field at the body's position. If the body is
//! closer to the surface than its radius it is pushed out along the estimated
//! surface normal, in one move, to exactly `radius` from the surface (as far as the
//! field is exact), and the normal is reported as an impulse for the caller's
//! integrator to apply.
//!
//! ```text
//! d = field(position)
//! d ≥ radius   →  Clear
//! d < radius   →  n = normalize(∇field)       (central differences)
//!                 position += n · (radius − d)
//!                 impulse   = n
//! ```

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    error::{Result, SdfError},
    types::{Field, Point, Value, Vector},
};

/// Default finite-difference probe offset.
pub const DEFAULT_PROBE_OFFSET: Value = 0.01;

/// Resolver tuning. Only constructible with a positive, finite probe offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    probe_offset: Value,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            probe_offset: DEFAULT_PROBE_OFFSET,
        }
    }
}

impl ResolverConfig {
    /// Returns [`SdfError::InvalidProbeOffset`] unless `probe_offset` is positive and finite.
    pub fn new(probe_offset: Value) -> Result<Self> {
        if !(probe_offset.is_finite() && probe_offset > 0.0) {
            return Err(SdfError::InvalidProbeOffset(probe_offset));
        }
        Ok(Self { probe_offset })
    }

    /// Distance along each axis at which the field is probed to estimate its
    /// gradient. Features with curvature finer than this are smoothed over.
    /// Default: `0.01`.
    pub fn probe_offset(&self) -> Value {
        self.probe_offset
    }
}

/// A sphere of `radius` around `position` that collides with a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    pub position: Point,
    pub radius: Value,
}

impl CollisionBody {
    pub fn new(position: Point, radius: Value) -> Self {
        Self { position, radius }
    }
}

/// Contact state of a body at the start of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactState {
    #[default]
    Clear,
    Penetrating,
}

/// Outcome of a single resolution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The body was at least `radius` from the surface. Nothing moved.
    Clear { distance: Value },
    /// The body was penetrating and has been pushed out along `impulse`.
    Resolved {
        distance: Value,
        /// Unit surface normal at the body's old position.
        impulse: Vector,
        /// Displacement applied to the body, `impulse · (radius − distance)`.
        correction: Vector,
    },
    /// The body was penetrating but the field gradient had no usable direction
    /// (zero length or non-finite). Nothing moved and the impulse is zero.
    Degenerate { distance: Value },
}

impl Resolution {
    /// Field value at the body's position before the step.
    pub fn distance(&self) -> Value {
        match *self {
            Resolution::Clear { distance }
            | Resolution::Resolved { distance, .. }
            | Resolution::Degenerate { distance } => distance,
        }
    }

    pub fn state(&self) -> ContactState {
        match self {
            Resolution::Clear { .. } => ContactState::Clear,
            Resolution::Resolved { .. } | Resolution::Degenerate { .. } => {
                ContactState::Penetrating
            }
        }
    }

    /// Impulse to hand to the integrator. Zero unless the step resolved a contact.
    pub fn impulse(&self) -> Vector {
        match self {
            Resolution::Resolved { impulse, .. } => *impulse,
            _ => Vector::zeros(),
        }
    }
}

/// Estimates the unit surface normal of `field` at `p` by central differences.
///
/// Only the magnitude of `offset` is used. Returns `None` when the offset is zero
/// or non-finite, or when the difference vector is zero or non-finite.
pub fn estimate_normal<F>(field: &F, p: Point, offset: Value) -> Option<Vector>
where
    F: Field + ?Sized,
{
    let offset = offset.abs();
    if !(offset.is_finite() && offset > 0.0) {
        return None;
    }

    let probe = |axis: Vector| {
        let h = axis * offset;
        field.distance(p + h) - field.distance(p - h)
    };
    let n = Vector::new(probe(Vector::x()), probe(Vector::y()), probe(Vector::z()));

    if !n.iter().all(|c| c.is_finite()) {
        return None;
    }
    n.try_normalize(0.0)
}

/// Stateless penetration resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    pub config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Runs one resolution step for `body` against `field`.
    pub fn resolve<F>(&self, body: &mut CollisionBody, field: &F) -> Resolution
    where
        F: Field + ?Sized,
    {
        let distance = field.distance(body.position);
        if distance >= body.radius {
            return Resolution::Clear { distance };
        }

        let Some(normal) = estimate_normal(field, body.position, self.config.probe_offset()) else {
            debug!(
                position = ?body.position,
                distance, "degenerate field gradient, skipping correction"
            );
            return Resolution::Degenerate { distance };
        };

        let correction = normal * (body.radius - distance);
        body.position += correction;
        trace!(impulse = ?normal, distance, "resolved penetration");

        Resolution::Resolved {
            distance,
            impulse: normal,
            correction,
        }
    }

    /// Resolves every body against the same field.
    ///
    /// Bodies are independent, so the work is spread over Rayon's pool with each
    /// body written by exactly one task. Results are in input order.
    pub fn resolve_all<F>(&self, bodies: &mut [CollisionBody], field: &F) -> Vec<Resolution>
    where
        F: Field + ?Sized,
    {
        bodies
            .par_iter_mut()
            .map(|body| self.resolve(body, field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::primitives::sphere;

    fn offset_sphere(p: Point) -> Value {
        sphere(p - Vector::new(0.0, 0.0, 5.0), 2.0)
    }

    #[test]
    fn config_rejects_bad_offsets() {
        assert_eq!(ResolverConfig::new(0.0), Err(SdfError::InvalidProbeOffset(0.0)));
        assert!(ResolverConfig::new(-0.1).is_err());
        assert!(ResolverConfig::new(Value::NAN).is_err());
        assert!(ResolverConfig::new(Value::INFINITY).is_err());
        assert_eq!(ResolverConfig::new(0.05).map(|c| c.probe_offset()), Ok(0.05));
        assert_eq!(ResolverConfig::default().probe_offset(), 0.01);
    }

    #[test]
    fn clear_body_is_untouched() {
        let mut body = CollisionBody::new(Point::origin(), 1.0);
        let res = Resolver::default().resolve(&mut body, &offset_sphere);
        assert_eq!(res, Resolution::Clear { distance: 3.0 });
        assert_eq!(res.state(), ContactState::Clear);
        assert_eq!(res.impulse(), Vector::zeros());
        assert_eq!(body.position, Point::origin());
    }

    #[test]
    fn penetrating_body_is_pushed_out() {
        let mut body = CollisionBody::new(Point::new(0.0, 0.0, 4.0), 1.0);
        let res = Resolver::default().resolve(&mut body, &offset_sphere);

        assert_eq!(res.state(), ContactState::Penetrating);
        assert_relative_eq!(res.distance(), -1.0);
        assert_relative_eq!(res.impulse(), Vector::new(0.0, 0.0, -1.0), epsilon = 1e-4);
        assert_relative_eq!(body.position, Point::new(0.0, 0.0, 2.0), epsilon = 1e-3);
    }

    #[test]
    fn normal_of_sphere_points_away_from_centre() {
        let n = estimate_normal(&|p: Point| sphere(p, 1.0), Point::new(1.0, 1.0, 0.0), 0.01);
        let expected = Vector::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(n.unwrap(), expected, epsilon = 1e-4);
    }

    #[test]
    fn gradient_vanishes_at_sphere_centre() {
        let field = |p: Point| sphere(p, 1.0);
        assert!(estimate_normal(&field, Point::new(0.0, 0.0, 0.5), 0.01).is_some());
        assert!(estimate_normal(&field, Point::origin(), 0.01).is_none());
    }

    #[test]
    fn degenerate_gradient_skips_correction() {
        // Constant field: every difference is zero, so there is no normal. The chosen
        // policy is a no-op step reporting a zero impulse.
        let mut body = CollisionBody::new(Point::new(1.0, 2.0, 3.0), 1.0);
        let res = Resolver::default().resolve(&mut body, &|_p: Point| -> Value { -5.0 });

        assert_eq!(res, Resolution::Degenerate { distance: -5.0 });
        assert_eq!(res.state(), ContactState::Penetrating);
        assert_eq!(res.impulse(), Vector::zeros());
        assert_eq!(body.position, Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn offset_sign_does_not_flip_the_normal() {
        let inward = estimate_normal(&offset_sphere, Point::new(0.0, 0.0, 4.0), -0.01);
        assert_relative_eq!(inward.unwrap(), Vector::new(0.0, 0.0, -1.0), epsilon = 1e-4);
        assert!(estimate_normal(&offset_sphere, Point::new(0.0, 0.0, 4.0), 0.0).is_none());
        assert!(estimate_normal(&offset_sphere, Point::new(0.0, 0.0, 4.0), Value::NAN).is_none());
    }

    #[test]
    fn non_finite_gradient_is_degenerate() {
        let field = |p: Point| if p.x > 0.0 { Value::INFINITY } else { -1.0 };
        assert!(estimate_normal(&field, Point::origin(), 0.01).is_none());
    }

    #[test]
    fn resolve_all_keeps_order() {
        let mut bodies = vec![
            CollisionBody::new(Point::origin(), 1.0),
            CollisionBody::new(Point::new(0.0, 0.0, 4.0), 1.0),
        ];
        let results = Resolver::default().resolve_all(&mut bodies, &offset_sphere);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].state(), ContactState::Clear);
        assert_eq!(results[1].state(), ContactState::Penetrating);
        assert_eq!(bodies[0].position, Point::origin());
        assert_relative_eq!(bodies[1].position, Point::new(0.0, 0.0, 2.0), epsilon = 1e-3);
    }
}
