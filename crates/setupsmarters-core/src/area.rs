//! Occupancy buckets for one environment-authoring session.
//!
//! Buckets only grow. Cells are neither deduplicated nor checked for
//! overlap with other buckets: a tile may be both blocked and part of the
//! isolated area if the user stacks shapes that way.

use crate::error::{GeometryError, GeometryResult};
use crate::grid::{GridCell, GridSpec};
use crate::shapes::{Rectangle, Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named occupancy bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Impassable tiles
    Blocked,
    /// Interior of the docking area
    IsolatedArea,
    /// Access opening of the docking area
    Opening,
}

impl Bucket {
    pub fn all() -> &'static [Bucket] {
        &[Bucket::Blocked, Bucket::IsolatedArea, Bucket::Opening]
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::IsolatedArea => write!(f, "isolated_area"),
            Self::Opening => write!(f, "opening"),
        }
    }
}

/// Read-only export of the three buckets, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub blocked: Vec<GridCell>,
    pub isolated_area: Vec<GridCell>,
    pub opening: Vec<GridCell>,
}

impl OccupancySnapshot {
    pub fn bucket(&self, bucket: Bucket) -> &[GridCell] {
        match bucket {
            Bucket::Blocked => &self.blocked,
            Bucket::IsolatedArea => &self.isolated_area,
            Bucket::Opening => &self.opening,
        }
    }
}

/// Accumulates rasterized cells per bucket.
#[derive(Debug, Clone, Default)]
pub struct AreaRegistry {
    cells: OccupancySnapshot,
    dock_kind: Option<ShapeKind>,
}

impl AreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `cells` to `bucket`.
    pub fn record<I>(&mut self, bucket: Bucket, cells: I)
    where
        I: IntoIterator<Item = GridCell>,
    {
        let target = match bucket {
            Bucket::Blocked => &mut self.cells.blocked,
            Bucket::IsolatedArea => &mut self.cells.isolated_area,
            Bucket::Opening => &mut self.cells.opening,
        };
        target.extend(cells);
    }

    /// Rasterize `shape` and append the result to `bucket`.
    pub fn record_shape(
        &mut self,
        bucket: Bucket,
        shape: &Shape,
        grid: &GridSpec,
    ) -> GeometryResult<usize> {
        let cells = shape.rasterize(grid)?;
        let added = cells.len();
        self.record(bucket, cells);
        Ok(added)
    }

    /// Record the docking area and its access opening.
    ///
    /// The opening is always a rectangle, whatever the dock shape. Both
    /// shapes are rasterized before either is stored, so a rejected shape
    /// leaves the registry unchanged. Only one dock per session.
    pub fn record_dock(
        &mut self,
        dock: &Shape,
        opening: &Rectangle,
        grid: &GridSpec,
    ) -> GeometryResult<()> {
        if self.dock_kind.is_some() {
            return Err(GeometryError::DockAlreadyRecorded);
        }
        let interior = dock.rasterize(grid)?;
        let access = opening.rasterize(grid)?;
        self.record(Bucket::IsolatedArea, interior);
        self.record(Bucket::Opening, access);
        self.dock_kind = Some(dock.kind());
        Ok(())
    }

    /// Shape kind of the recorded dock, if any.
    pub fn dock_kind(&self) -> Option<ShapeKind> {
        self.dock_kind
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        self.cells.bucket(bucket).len()
    }

    pub fn is_empty(&self) -> bool {
        Bucket::all().iter().all(|b| self.len(*b) == 0)
    }

    /// Recorded cells lying outside `grid`, per bucket. Nothing is removed.
    pub fn out_of_bounds(&self, grid: &GridSpec) -> Vec<(Bucket, GridCell)> {
        Bucket::all()
            .iter()
            .flat_map(|&bucket| {
                self.cells
                    .bucket(bucket)
                    .iter()
                    .filter(|cell| !grid.contains(**cell))
                    .map(move |cell| (bucket, *cell))
            })
            .collect()
    }

    pub fn snapshot(&self) -> OccupancySnapshot {
        self.cells.clone()
    }

    /// Consume the registry, handing over its buckets.
    pub fn into_snapshot(self) -> OccupancySnapshot {
        self.cells
    }
}
