//! Continuous-space shapes and their rasterization onto a [`GridSpec`].
//!
//! Rectangles are anchored at their bottom-left corner. Rectangle positions
//! and sizes are converted to grid units by rounding (ties to even), circle
//! centres by flooring. The two rules differ on purpose: existing snapshot
//! files were produced this way and unifying them would move tiles.

use crate::error::{finite, positive, GeometryResult};
use crate::grid::{GridCell, GridSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle, bottom-left corner at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Every cell with `x0 <= i < x0 + w` and `y0 <= j < y0 + h`, in grid units.
    ///
    /// No clipping: cells outside the grid are emitted as-is.
    pub fn rasterize(&self, grid: &GridSpec) -> GeometryResult<Vec<GridCell>> {
        let x = finite("x", self.x)?;
        let y = finite("y", self.y)?;
        let width = positive("width", self.width)?;
        let height = positive("height", self.height)?;

        let x0 = grid.round_units("x", x)?;
        let y0 = grid.round_units("y", y)?;
        let end_x = x0 + grid.round_units("width", width)?;
        let end_y = y0 + grid.round_units("height", height)?;

        let area = span(x0, end_x).saturating_mul(span(y0, end_y));
        let mut cells = Vec::with_capacity(area.min(PREALLOC_LIMIT));
        for i in x0..end_x {
            for j in y0..end_y {
                cells.push(GridCell::new(i, j));
            }
        }
        Ok(cells)
    }
}

/// Circle given by centre and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Every in-grid cell whose distance to the floored centre is at most the
    /// rounded radius.
    ///
    /// Only the bounding box of the circle is scanned; the result, including
    /// its row-major order, is the same as a scan over the whole grid.
    pub fn rasterize(&self, grid: &GridSpec) -> GeometryResult<Vec<GridCell>> {
        let cx = grid.floor_units("center_x", finite("center_x", self.center_x)?)?;
        let cy = grid.floor_units("center_y", finite("center_y", self.center_y)?)?;
        let r = grid.round_units("radius", positive("radius", self.radius)?)?;
        let r_squared = i128::from(r) * i128::from(r);

        let i_range = (cx - r).max(0)..=(cx + r).min(i64::from(grid.rows()) - 1);
        let j_range = (cy - r).max(0)..=(cy + r).min(i64::from(grid.cols()) - 1);

        let mut cells = Vec::new();
        for i in i_range {
            for j in j_range.clone() {
                let (di, dj) = (i128::from(i - cx), i128::from(j - cy));
                if di * di + dj * dj <= r_squared {
                    cells.push(GridCell::new(i, j));
                }
            }
        }
        Ok(cells)
    }
}

/// Shape kind as offered to the user for the isolated area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Square,
    Circle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Circle => "Circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Square" => Ok(Self::Square),
            "Circle" => Ok(Self::Circle),
            _ => Err(format!("Unknown shape kind: {}", s)),
        }
    }
}

/// Any shape the rasterizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Square,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn rasterize(&self, grid: &GridSpec) -> GeometryResult<Vec<GridCell>> {
        match self {
            Shape::Rectangle(rect) => rect.rasterize(grid),
            Shape::Circle(circle) => circle.rasterize(grid),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// Convert one shape into the grid cells it covers.
pub fn rasterize(shape: &Shape, grid: &GridSpec) -> GeometryResult<Vec<GridCell>> {
    shape.rasterize(grid)
}

/// Upper bound on the up-front allocation for one rectangle
const PREALLOC_LIMIT: usize = 1 << 20;

fn span(start: i64, end: i64) -> usize {
    usize::try_from(end - start).unwrap_or(0)
}
