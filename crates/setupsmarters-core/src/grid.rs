//! Grid discretization
//!
//! The environment is a `length x width` area cut into square tiles of side
//! `tile_size`. Row index `i` runs along the length, column index `j` along
//! the width.

use crate::error::{positive, GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One tile of the discretized environment.
///
/// Coordinates are signed: rasterization does not clip, so a shape placed
/// partly outside the environment yields cells outside `0..rows`/`0..cols`.
/// Serialized as a two-element array `[i, j]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct GridCell {
    pub i: i64,
    pub j: i64,
}

impl GridCell {
    pub fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }
}

impl From<(i64, i64)> for GridCell {
    fn from((i, j): (i64, i64)) -> Self {
        Self { i, j }
    }
}

impl From<GridCell> for (i64, i64) {
    fn from(cell: GridCell) -> Self {
        (cell.i, cell.j)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Largest magnitude, in grid units, a shape coordinate or size may take.
///
/// Keeps every sum of two converted values inside `i64`.
pub const MAX_GRID_UNITS: i64 = i32::MAX as i64;

/// Grid dimensions derived from the continuous environment size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    tile_size: f64,
    env_length: f64,
    env_width: f64,
}

impl GridSpec {
    /// Create a grid; every parameter must be finite and strictly positive.
    ///
    /// A bad tile size is reported as [`GeometryError::InvalidShape`], the
    /// same as any other non-positive dimension; a bad environment size, or
    /// one needing more than `u32::MAX` tiles along a side, as
    /// [`GeometryError::InvalidGrid`].
    pub fn new(tile_size: f64, env_length: f64, env_width: f64) -> GeometryResult<Self> {
        positive("tile_size", tile_size)?;
        for (field, value) in [("env_length", env_length), ("env_width", env_width)] {
            let too_many = (value / tile_size).ceil() > f64::from(u32::MAX);
            if !(value.is_finite() && value > 0.0) || too_many {
                return Err(GeometryError::InvalidGrid { field, value });
            }
        }
        Ok(Self {
            tile_size,
            env_length,
            env_width,
        })
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn env_length(&self) -> f64 {
        self.env_length
    }

    pub fn env_width(&self) -> f64 {
        self.env_width
    }

    /// `ceil(env_length / tile_size)`, never below 1
    pub fn rows(&self) -> u32 {
        ((self.env_length / self.tile_size).ceil() as u32).max(1)
    }

    /// `ceil(env_width / tile_size)`, never below 1
    pub fn cols(&self) -> u32 {
        ((self.env_width / self.tile_size).ceil() as u32).max(1)
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows()) * u64::from(self.cols())
    }

    /// Whether `cell` lies inside `0..rows` x `0..cols`.
    pub fn contains(&self, cell: GridCell) -> bool {
        (0..i64::from(self.rows())).contains(&cell.i) && (0..i64::from(self.cols())).contains(&cell.j)
    }

    /// Continuous length to grid units, ties to even.
    ///
    /// `field` names the value in the error when the result lies beyond
    /// [`MAX_GRID_UNITS`].
    pub fn round_units(&self, field: &'static str, value: f64) -> GeometryResult<i64> {
        to_units(field, value, (value / self.tile_size).round_ties_even())
    }

    /// Continuous coordinate to grid units, rounding down.
    pub fn floor_units(&self, field: &'static str, value: f64) -> GeometryResult<i64> {
        to_units(field, value, (value / self.tile_size).floor())
    }
}

fn to_units(field: &'static str, value: f64, units: f64) -> GeometryResult<i64> {
    // NaN fails the comparison as well
    if units.abs() <= MAX_GRID_UNITS as f64 {
        Ok(units as i64)
    } else {
        Err(GeometryError::InvalidShape { field, value })
    }
}
