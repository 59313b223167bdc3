//! Session files
//!
//! A TOML description of one complete setup session: the robot choice, the
//! simulator parameters, the environment size and generation bounds, and
//! the shapes the user authored. Relative paths inside the file are
//! resolved against the file's own directory.
//!
//! ```toml
//! [robot]
//! type = "450X"
//! cutting_mode = "systematic - ping-pong"
//!
//! [simulator]
//! dim_tassel = 0.5
//! num_maps = 3
//! repetitions = 2
//! cycle = 60
//!
//! [environment]
//! length = 20.0
//! width = 15.0
//!
//! [[environment.squares]]
//! x = 1.0
//! y = 1.0
//! width = 2.0
//! height = 2.0
//!
//! [environment.isolated_area]
//! dock = { kind = "rectangle", x = 16.0, y = 10.0, width = 3.0, height = 3.0 }
//! opening = { x = 15.5, y = 11.0, width = 0.5, height = 1.0 }
//! ```

use crate::assembler::{assemble, ConfigSnapshot};
use crate::config::{GenerationBounds, RobotConfig, SimulatorConfig};
use crate::error::{SettingsError, SettingsResult};
use crate::persistence::DATA_FILE_NAME;
use crate::session::EnvironmentSession;
use serde::Deserialize;
use setupsmarters_core::{Circle, GridSpec, Rectangle, Shape};
use setupsmarters_robotdb::{RobotCatalog, RobotSpec, CATALOG_FILE_NAME, DEFAULT_INDEX};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory name under the platform config directory
const APP_DIR: &str = "setupsmarters";

#[derive(Debug, Clone, Deserialize)]
pub struct RobotSection {
    /// Catalog model; leave empty to use the manual values below
    #[serde(rename = "type", default)]
    pub model: String,
    pub speed: Option<f64>,
    pub cutting_diameter: Option<f64>,
    pub autonomy: Option<u32>,
    #[serde(default)]
    pub cutting_mode: String,
    /// Path of an external cutting algorithm
    #[serde(default)]
    pub algo: String,
}

impl RobotSection {
    fn manual_spec(&self) -> Option<RobotSpec> {
        Some(RobotSpec {
            speed: self.speed?,
            cutting_diameter: self.cutting_diameter?,
            autonomy: self.autonomy?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IsolatedAreaSection {
    pub dock: Shape,
    pub opening: Rectangle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSection {
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub bounds: GenerationBounds,
    #[serde(default)]
    pub squares: Vec<Rectangle>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    pub isolated_area: Option<IsolatedAreaSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionFile {
    /// Robot catalog location
    pub catalog: Option<PathBuf>,
    /// Snapshot destination
    pub output: Option<PathBuf>,
    pub robot: RobotSection,
    pub simulator: SimulatorConfig,
    pub environment: EnvironmentSection,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl SessionFile {
    /// Load a session file from disk.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::SessionFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        debug!("Loading session file {}", path.display());
        Self::from_toml_str(&content, base_dir)
    }

    /// Parse session content; relative paths resolve against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> SettingsResult<Self> {
        let mut session: Self = toml::from_str(content)?;
        session.base_dir = base_dir.into();
        Ok(session)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Where the snapshot goes: `output`, else `data_file` beside the session.
    pub fn output_path(&self) -> PathBuf {
        self.resolve(self.output.as_deref().unwrap_or(Path::new(DATA_FILE_NAME)))
    }

    /// Catalog location: `catalog` if set, else `robots.json` beside the
    /// session file, else the platform config directory.
    pub fn catalog_path(&self) -> PathBuf {
        if let Some(explicit) = &self.catalog {
            return self.resolve(explicit);
        }
        let local = self.base_dir.join(CATALOG_FILE_NAME);
        if local.is_file() {
            return local;
        }
        match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join(CATALOG_FILE_NAME),
            None => local,
        }
    }

    /// Robot section; the catalog is only read when a model is named.
    ///
    /// A relative `algo` path is resolved against the session file and
    /// then made absolute.
    pub fn robot_config(&self) -> SettingsResult<RobotConfig> {
        let robot = &self.robot;
        let catalog = if robot.model.is_empty() {
            None
        } else {
            let path = self.catalog_path();
            info!("Resolving robot '{}' against {}", robot.model, path.display());
            if !RobotCatalog::is_known_model(&robot.model) {
                warn!(
                    "Unknown robot model '{}', using catalog entry {}",
                    robot.model, DEFAULT_INDEX
                );
            }
            Some(RobotCatalog::load(&path)?)
        };
        let spec = RobotConfig::resolve_spec(catalog.as_ref(), &robot.model, robot.manual_spec())?;
        let algo = if robot.algo.is_empty() {
            String::new()
        } else {
            let resolved = self.resolve(Path::new(&robot.algo));
            std::path::absolute(&resolved)
                .map_err(|e| SettingsError::SessionFile {
                    path: resolved.display().to_string(),
                    reason: e.to_string(),
                })?
                .display()
                .to_string()
        };
        Ok(RobotConfig::from_raw(
            robot.model.clone(),
            spec,
            robot.cutting_mode.clone(),
            algo,
        ))
    }

    /// Replay the authored shapes into a fresh environment session.
    ///
    /// The grid tile size is the simulator's `dim_tassel`.
    pub fn environment(&self) -> SettingsResult<EnvironmentSession> {
        let env = &self.environment;
        let grid = GridSpec::new(self.simulator.dim_tassel, env.length, env.width)?;
        let mut session = EnvironmentSession::new(grid);
        for rect in &env.squares {
            session.add_blocked_square(*rect)?;
        }
        for circle in &env.circles {
            session.add_blocked_circle(*circle)?;
        }
        if let Some(area) = &env.isolated_area {
            session.set_isolated_area(area.dock, area.opening)?;
        }

        let outside = session.out_of_bounds();
        if !outside.is_empty() {
            warn!(
                "{} recorded cells lie outside the {}x{} grid",
                outside.len(),
                grid.rows(),
                grid.cols()
            );
        }
        Ok(session)
    }

    /// Build the full snapshot described by this session file.
    pub fn build(&self) -> SettingsResult<ConfigSnapshot> {
        let robot = self.robot_config()?;
        let env = self.environment()?.finish(self.environment.bounds)?;
        Ok(assemble(robot, env, self.simulator)?)
    }
}
