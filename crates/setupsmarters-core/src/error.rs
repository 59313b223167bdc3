//! Error handling for the geometry core
//!
//! Every failure here is terminal for the operation that produced it and is
//! handed straight back to the caller. Nothing is retried or defaulted.

use thiserror::Error;

/// Geometry error type
///
/// Raised while deriving a grid or rasterizing a shape onto it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A shape dimension or coordinate is non-positive or not finite
    #[error("Invalid shape: {field} = {value}")]
    InvalidShape {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An environment dimension is non-positive or not finite
    #[error("Invalid grid: {field} = {value}")]
    InvalidGrid {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The isolated area of this session has already been recorded
    #[error("Isolated area already recorded for this environment")]
    DockAlreadyRecorded,
}

impl GeometryError {
    /// Check if this error concerns a shape rather than the grid
    pub fn is_shape_error(&self) -> bool {
        matches!(self, GeometryError::InvalidShape { .. })
    }
}

/// Result type using GeometryError
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

/// Reject non-positive or non-finite lengths.
pub(crate) fn positive(field: &'static str, value: f64) -> GeometryResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidShape { field, value })
    }
}

/// Reject non-finite coordinates. Negative positions are allowed.
pub(crate) fn finite(field: &'static str, value: f64) -> GeometryResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::InvalidShape { field, value })
    }
}
