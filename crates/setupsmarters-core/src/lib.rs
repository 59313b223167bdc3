//! # SetUpSmarters Core
//!
//! Turns user-authored continuous shapes (blocked squares and circles, the
//! isolated docking area and its opening) into grid-cell occupancy for the
//! cutting-robot simulator.

pub mod area;
pub mod error;
pub mod grid;
pub mod shapes;

pub use area::{AreaRegistry, Bucket, OccupancySnapshot};
pub use error::{GeometryError, GeometryResult};
pub use grid::{GridCell, GridSpec};
pub use shapes::{rasterize, Circle, Rectangle, Shape, ShapeKind};
