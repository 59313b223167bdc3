//! Robot, environment and simulator configuration
//!
//! The three sections of a snapshot. Each one is produced once per session
//! and handed by name to [`crate::assembler::assemble`].
//!
//! A robot runs in one of two modes:
//! - built-in, `cutting_mode` holds `"<random|systematic> - <bounce>"` and
//!   `algo` is empty
//! - external, `algo` holds the absolute path of a user cutting algorithm
//!   and `cutting_mode` is empty

use crate::error::{AssemblyError, AssemblyResult, SettingsError, SettingsResult};
use crate::schema::{FieldValue, SnapshotSection};
use serde::Deserialize;
use setupsmarters_core::{GridCell, GridSpec, OccupancySnapshot, ShapeKind};
use setupsmarters_robotdb::{CatalogError, RobotCatalog, RobotSpec, CATALOG_FILE_NAME};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of guide lines, fixed for every robot
pub const GUIDE_LINES: u32 = 2;

/// How the robot sweeps the lawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    Random,
    Systematic,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Systematic => write!(f, "systematic"),
        }
    }
}

/// What the robot does when it meets an obstacle or the border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bounce {
    PingPong,
    Random,
    ProbabilityDistribution,
}

impl fmt::Display for Bounce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PingPong => write!(f, "ping-pong"),
            Self::Random => write!(f, "random"),
            Self::ProbabilityDistribution => write!(f, "probability distribution"),
        }
    }
}

/// Built-in cutting mode, e.g. `"systematic - ping-pong"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CuttingMode {
    pub traversal: Traversal,
    pub bounce: Bounce,
}

impl CuttingMode {
    pub fn new(traversal: Traversal, bounce: Bounce) -> Self {
        Self { traversal, bounce }
    }
}

impl fmt::Display for CuttingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.traversal, self.bounce)
    }
}

impl FromStr for CuttingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (traversal, bounce) = s
            .split_once(" - ")
            .ok_or_else(|| format!("Unknown cutting mode: {}", s))?;
        let traversal = match traversal {
            "random" => Traversal::Random,
            "systematic" => Traversal::Systematic,
            _ => return Err(format!("Unknown cutting mode: {}", s)),
        };
        let bounce = match bounce {
            "ping-pong" => Bounce::PingPong,
            "random" => Bounce::Random,
            "probability distribution" => Bounce::ProbabilityDistribution,
            _ => return Err(format!("Unknown cutting mode: {}", s)),
        };
        Ok(Self { traversal, bounce })
    }
}

/// Typed view of the `cutting_mode` / `algo` pair
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    BuiltIn(CuttingMode),
    External(PathBuf),
}

impl RunMode {
    /// External mode with `path` made absolute against the working directory.
    pub fn external(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::External(std::path::absolute(path)?))
    }

    /// The `(cutting_mode, algo)` strings of this mode.
    pub fn into_fields(self) -> (String, String) {
        match self {
            RunMode::BuiltIn(mode) => (mode.to_string(), String::new()),
            RunMode::External(path) => (String::new(), path.display().to_string()),
        }
    }
}

/// Robot section of the snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    /// Catalog model name; empty for manually entered values
    #[serde(rename = "type")]
    pub robot_type: String,
    pub cutting_mode: String,
    pub speed: f64,
    pub cutting_diameter: f64,
    /// Minutes of operation on one charge
    pub autonomy: u32,
    pub guide_lines: u32,
    pub algo: String,
}

impl RobotConfig {
    pub fn new(robot_type: impl Into<String>, spec: RobotSpec, mode: RunMode) -> Self {
        let (cutting_mode, algo) = mode.into_fields();
        Self::from_raw(robot_type, spec, cutting_mode, algo)
    }

    /// Build from the raw `cutting_mode` / `algo` strings, unchecked.
    pub fn from_raw(
        robot_type: impl Into<String>,
        spec: RobotSpec,
        cutting_mode: impl Into<String>,
        algo: impl Into<String>,
    ) -> Self {
        Self {
            robot_type: robot_type.into(),
            cutting_mode: cutting_mode.into(),
            speed: spec.speed,
            cutting_diameter: spec.cutting_diameter,
            autonomy: spec.autonomy,
            guide_lines: GUIDE_LINES,
            algo: algo.into(),
        }
    }

    /// Hardware values for `type_name`.
    ///
    /// An empty name takes `manual`, which must then be present; any other
    /// name is looked up in `catalog` and `manual` is ignored.
    pub fn resolve_spec(
        catalog: Option<&RobotCatalog>,
        type_name: &str,
        manual: Option<RobotSpec>,
    ) -> SettingsResult<RobotSpec> {
        if type_name.is_empty() {
            return manual.ok_or_else(|| {
                AssemblyError::InvalidRobotConfig(
                    "no robot model selected and no manual values given".to_string(),
                )
                .into()
            });
        }
        let catalog = catalog.ok_or_else(|| {
            SettingsError::from(CatalogError::CatalogUnavailable {
                path: CATALOG_FILE_NAME.to_string(),
                reason: "no catalog loaded".to_string(),
            })
        })?;
        match catalog.resolve(type_name)? {
            Some(spec) => Ok(spec),
            None => Err(AssemblyError::InvalidRobotConfig(format!(
                "robot model '{}' did not resolve",
                type_name
            ))
            .into()),
        }
    }

    /// Decode the run mode; exactly one of `cutting_mode` and `algo` must be set.
    pub fn run_mode(&self) -> AssemblyResult<RunMode> {
        match (self.cutting_mode.is_empty(), self.algo.is_empty()) {
            (false, true) => self
                .cutting_mode
                .parse()
                .map(RunMode::BuiltIn)
                .map_err(AssemblyError::InvalidRobotConfig),
            (true, false) => Ok(RunMode::External(PathBuf::from(&self.algo))),
            (false, false) => Err(AssemblyError::InvalidRobotConfig(
                "cutting_mode and algo are both set".to_string(),
            )),
            (true, true) => Err(AssemblyError::InvalidRobotConfig(
                "neither cutting_mode nor algo is set".to_string(),
            )),
        }
    }
}

impl SnapshotSection for RobotConfig {
    const KEY: &'static str = "robot";

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("type", FieldValue::Str(&self.robot_type)),
            ("cutting_mode", FieldValue::Str(&self.cutting_mode)),
            ("speed", FieldValue::Float(self.speed)),
            ("cutting_diameter", FieldValue::Float(self.cutting_diameter)),
            ("autonomy", FieldValue::Int(i64::from(self.autonomy))),
            ("guide_lines", FieldValue::Int(i64::from(self.guide_lines))),
            ("algo", FieldValue::Str(&self.algo)),
        ]
    }
}

/// Random-map generation bounds handed to the simulator
///
/// Missing keys default to zero when read from a session file. Stored
/// snapshots are read through a strict schema instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationBounds {
    pub num_blocked_squares: u32,
    pub min_width_square: f64,
    pub max_width_square: f64,
    pub min_height_square: f64,
    pub max_height_square: f64,
    pub num_blocked_circles: u32,
    pub min_ray: f64,
    pub max_ray: f64,
    pub isolated_area_min_length: f64,
    pub isolated_area_max_length: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub isolated_area_min_width: f64,
    pub isolated_area_max_width: f64,
}

/// Environment section of the snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub length: f64,
    pub width: f64,
    pub grid_tile_size: f64,
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub bounds: GenerationBounds,
    pub isolated_area_shape: ShapeKind,
    pub blocked: Vec<GridCell>,
    pub isolated_area: Vec<GridCell>,
    pub opening: Vec<GridCell>,
}

impl EnvConfig {
    pub fn new(
        grid: &GridSpec,
        bounds: GenerationBounds,
        isolated_area_shape: ShapeKind,
        occupancy: OccupancySnapshot,
    ) -> Self {
        Self {
            length: grid.env_length(),
            width: grid.env_width(),
            grid_tile_size: grid.tile_size(),
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            bounds,
            isolated_area_shape,
            blocked: occupancy.blocked,
            isolated_area: occupancy.isolated_area,
            opening: occupancy.opening,
        }
    }
}

impl SnapshotSection for EnvConfig {
    const KEY: &'static str = "env";

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let b = &self.bounds;
        vec![
            ("length", FieldValue::Float(self.length)),
            ("width", FieldValue::Float(self.width)),
            ("grid_tile_size", FieldValue::Float(self.grid_tile_size)),
            ("grid_rows", FieldValue::Int(i64::from(self.grid_rows))),
            ("grid_cols", FieldValue::Int(i64::from(self.grid_cols))),
            ("num_blocked_squares", FieldValue::Int(i64::from(b.num_blocked_squares))),
            ("min_width_square", FieldValue::Float(b.min_width_square)),
            ("max_width_square", FieldValue::Float(b.max_width_square)),
            ("min_height_square", FieldValue::Float(b.min_height_square)),
            ("max_height_square", FieldValue::Float(b.max_height_square)),
            ("num_blocked_circles", FieldValue::Int(i64::from(b.num_blocked_circles))),
            ("min_ray", FieldValue::Float(b.min_ray)),
            ("max_ray", FieldValue::Float(b.max_ray)),
            ("isolated_area_min_length", FieldValue::Float(b.isolated_area_min_length)),
            ("isolated_area_max_length", FieldValue::Float(b.isolated_area_max_length)),
            ("min_radius", FieldValue::Float(b.min_radius)),
            ("max_radius", FieldValue::Float(b.max_radius)),
            ("isolated_area_min_width", FieldValue::Float(b.isolated_area_min_width)),
            ("isolated_area_max_width", FieldValue::Float(b.isolated_area_max_width)),
            ("isolated_area_shape", FieldValue::Str(self.isolated_area_shape.as_str())),
            ("blocked", FieldValue::Cells(&self.blocked)),
            ("isolated_area", FieldValue::Cells(&self.isolated_area)),
            ("opening", FieldValue::Cells(&self.opening)),
        ]
    }
}

/// Simulator section of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Tile size; must equal the environment grid tile size
    pub dim_tassel: f64,
    pub num_maps: u32,
    pub repetitions: u32,
    /// Cutting minutes per run
    pub cycle: u32,
}

impl SimulatorConfig {
    pub fn new(dim_tassel: f64, num_maps: u32, repetitions: u32, cycle: u32) -> Self {
        Self {
            dim_tassel,
            num_maps,
            repetitions,
            cycle,
        }
    }
}

impl SnapshotSection for SimulatorConfig {
    const KEY: &'static str = "simulator";

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("dim_tassel", FieldValue::Float(self.dim_tassel)),
            ("num_maps", FieldValue::Int(i64::from(self.num_maps))),
            ("repetitions", FieldValue::Int(i64::from(self.repetitions))),
            ("cycle", FieldValue::Int(i64::from(self.cycle))),
        ]
    }
}
