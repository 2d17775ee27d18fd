use ndarray::{Array3, Zip};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{Result, SdfError},
    types::{Field, Point, Value, Vector},
};

/// A regular lattice of field samples.
///
/// The grid has `(size_x + 1) × (size_y + 1) × (size_z + 1)` corner points
/// spanning `size_x × size_y × size_z` cells of edge length
/// [`spacing`](FieldGrid::spacing), starting at [`origin`](FieldGrid::origin).
///
/// Values are stored as `values[[z, y, x]]`.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    /// Number of cells along X.
    pub size_x: usize,
    /// Number of cells along Y.
    pub size_y: usize,
    /// Number of cells along Z.
    pub size_z: usize,
    /// World-space position of corner `(0, 0, 0)`.
    pub origin: Point,
    /// World-space size of each cell edge.
    pub spacing: Value,
    /// Field values, indexed `[z, y, x]`.
    pub values: Array3<Value>,
}

impl FieldGrid {
    /// Creates a grid with the given cell counts, all values `0.0`.
    ///
    /// Returns [`SdfError::EmptyGrid`] if any count is zero.
    pub fn new(size_x: usize, size_y: usize, size_z: usize) -> Result<Self> {
        if size_x == 0 || size_y == 0 || size_z == 0 {
            return Err(SdfError::EmptyGrid);
        }
        Ok(Self {
            size_x,
            size_y,
            size_z,
            origin: Point::origin(),
            spacing: 1.0,
            values: Array3::zeros((size_z + 1, size_y + 1, size_x + 1)),
        })
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the cell edge length. Must be positive and finite.
    pub fn with_spacing(mut self, spacing: Value) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(SdfError::InvalidSpacing(spacing));
        }
        self.spacing = spacing;
        Ok(self)
    }

    /// World-space position of corner `(x, y, z)`.
    #[inline]
    pub fn position(&self, x: usize, y: usize, z: usize) -> Point {
        self.origin + Vector::new(x as Value, y as Value, z as Value) * self.spacing
    }

    /// Returns the sampled value at corner `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Value {
        self.values[[z, y, x]]
    }

    /// Samples `field` at every corner. Work is parallelised with Rayon.
    pub fn fill<F>(&mut self, field: &F)
    where
        F: Field + ?Sized,
    {
        let origin = self.origin;
        let spacing = self.spacing;
        Zip::indexed(&mut self.values).par_for_each(|(z, y, x), v| {
            let p = origin + Vector::new(x as Value, y as Value, z as Value) * spacing;
            *v = field.distance(p);
        });
        debug!(
            corners = self.values.len(),
            inside = self.inside_count(),
            "filled field grid"
        );
    }

    /// Number of corners strictly inside the surface.
    pub fn inside_count(&self) -> usize {
        self.values.iter().filter(|&&v| v < 0.0).count()
    }

    /// Smallest sampled value.
    pub fn min_value(&self) -> Value {
        self.values.iter().copied().fold(Value::INFINITY, Value::min)
    }
}

/// Evaluates `field` at every point, in parallel. Output order matches `points`.
pub fn eval_batch<F>(field: &F, points: &[Point]) -> Vec<Value>
where
    F: Field + ?Sized,
{
    points.par_iter().map(|&p| field.distance(p)).collect()
}
