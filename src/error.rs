use derive_more::{Display, From};

use crate::types::Value;

pub type Result<T> = core::result::Result<T, SdfError>;

#[derive(Debug, Display, From, PartialEq)]
#[display("{self:?}")]
pub enum SdfError {
    /// The finite-difference probe offset must be positive and finite.
    #[from(ignore)]
    InvalidProbeOffset(Value),
    /// A sampling lattice needs at least one cell along every axis.
    EmptyGrid,
    /// Lattice spacing must be positive and finite.
    #[from(ignore)]
    InvalidSpacing(Value),
}

impl std::error::Error for SdfError {}
