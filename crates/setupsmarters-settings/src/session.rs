//! Environment-authoring session
//!
//! One session owns one grid and one [`AreaRegistry`]. Shapes are added one
//! at a time as the user authors them; finishing the session turns the
//! registry into the environment section of the snapshot.

use crate::config::{EnvConfig, GenerationBounds};
use crate::error::{AssemblyError, AssemblyResult};
use setupsmarters_core::{
    AreaRegistry, Bucket, Circle, GeometryResult, GridCell, GridSpec, Rectangle, Shape,
};

#[derive(Debug)]
pub struct EnvironmentSession {
    grid: GridSpec,
    registry: AreaRegistry,
    blocked_squares: usize,
    blocked_circles: usize,
}

impl EnvironmentSession {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            registry: AreaRegistry::new(),
            blocked_squares: 0,
            blocked_circles: 0,
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn registry(&self) -> &AreaRegistry {
        &self.registry
    }

    /// Block the tiles under `rect`; returns the number of cells added.
    pub fn add_blocked_square(&mut self, rect: Rectangle) -> GeometryResult<usize> {
        let added = self
            .registry
            .record_shape(Bucket::Blocked, &Shape::Rectangle(rect), &self.grid)?;
        self.blocked_squares += 1;
        Ok(added)
    }

    /// Block the tiles under `circle`; returns the number of cells added.
    pub fn add_blocked_circle(&mut self, circle: Circle) -> GeometryResult<usize> {
        let added = self
            .registry
            .record_shape(Bucket::Blocked, &Shape::Circle(circle), &self.grid)?;
        self.blocked_circles += 1;
        Ok(added)
    }

    /// Place the docking area and its rectangular access opening.
    pub fn set_isolated_area(&mut self, dock: Shape, opening: Rectangle) -> GeometryResult<()> {
        self.registry.record_dock(&dock, &opening, &self.grid)
    }

    /// Number of blocked squares and circles authored so far.
    pub fn blocked_shapes(&self) -> (usize, usize) {
        (self.blocked_squares, self.blocked_circles)
    }

    /// Recorded cells that fall outside the grid.
    pub fn out_of_bounds(&self) -> Vec<(Bucket, GridCell)> {
        self.registry.out_of_bounds(&self.grid)
    }

    /// Close the session and produce the environment section.
    ///
    /// The isolated area shape kind is the one of the recorded dock.
    pub fn finish(self, bounds: GenerationBounds) -> AssemblyResult<EnvConfig> {
        let Some(kind) = self.registry.dock_kind() else {
            return Err(AssemblyError::MissingDockArea {
                bucket: Bucket::IsolatedArea,
            });
        };
        Ok(EnvConfig::new(
            &self.grid,
            bounds,
            kind,
            self.registry.into_snapshot(),
        ))
    }
}
