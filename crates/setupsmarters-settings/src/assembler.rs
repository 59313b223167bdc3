//! Snapshot assembly
//!
//! Merges the robot, environment and simulator sections into one snapshot.
//! Sections are passed by name; there is no positional list to get out of
//! order.

use crate::config::{EnvConfig, RobotConfig, RunMode, SimulatorConfig, GUIDE_LINES};
use crate::error::{AssemblyError, AssemblyResult};
use setupsmarters_core::{Bucket, GridSpec};

/// The merged configuration written for the simulator. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    robot: RobotConfig,
    env: EnvConfig,
    simulator: SimulatorConfig,
}

impl ConfigSnapshot {
    pub fn robot(&self) -> &RobotConfig {
        &self.robot
    }

    pub fn env(&self) -> &EnvConfig {
        &self.env
    }

    pub fn simulator(&self) -> &SimulatorConfig {
        &self.simulator
    }

    pub fn into_parts(self) -> (RobotConfig, EnvConfig, SimulatorConfig) {
        (self.robot, self.env, self.simulator)
    }
}

/// Validate the three sections against each other and merge them.
///
/// On top of [`check_consistency`], an external cutting algorithm must name
/// an existing file. Its content is never read.
pub fn assemble(
    robot: RobotConfig,
    env: EnvConfig,
    simulator: SimulatorConfig,
) -> AssemblyResult<ConfigSnapshot> {
    check_consistency(&robot, &env, &simulator)?;
    if let RunMode::External(path) = robot.run_mode()? {
        if !path.is_file() {
            return Err(AssemblyError::AlgorithmFileNotFound(path));
        }
    }
    Ok(ConfigSnapshot {
        robot,
        env,
        simulator,
    })
}

/// Rebuild a snapshot read back from disk. Skips the algorithm file check.
pub(crate) fn reassemble(
    robot: RobotConfig,
    env: EnvConfig,
    simulator: SimulatorConfig,
) -> AssemblyResult<ConfigSnapshot> {
    check_consistency(&robot, &env, &simulator)?;
    Ok(ConfigSnapshot {
        robot,
        env,
        simulator,
    })
}

/// Every rule of [`assemble`] that does not touch the filesystem.
pub fn check_consistency(
    robot: &RobotConfig,
    env: &EnvConfig,
    simulator: &SimulatorConfig,
) -> AssemblyResult<()> {
    check_robot(robot)?;
    check_simulator(simulator)?;

    // Exact comparison: both values come from the same user entry
    if simulator.dim_tassel != env.grid_tile_size {
        return Err(AssemblyError::InconsistentTileSize {
            dim_tassel: simulator.dim_tassel,
            grid_tile_size: env.grid_tile_size,
        });
    }
    check_grid(env)?;

    if env.isolated_area.is_empty() {
        return Err(AssemblyError::MissingDockArea {
            bucket: Bucket::IsolatedArea,
        });
    }
    if env.opening.is_empty() {
        return Err(AssemblyError::MissingDockArea {
            bucket: Bucket::Opening,
        });
    }
    Ok(())
}

fn check_robot(robot: &RobotConfig) -> AssemblyResult<()> {
    robot.run_mode()?;

    let invalid = |msg: String| Err(AssemblyError::InvalidRobotConfig(msg));
    if !(robot.speed.is_finite() && robot.speed > 0.0) {
        return invalid(format!("speed must be > 0, got {}", robot.speed));
    }
    if !(robot.cutting_diameter.is_finite() && robot.cutting_diameter > 0.0) {
        return invalid(format!(
            "cutting_diameter must be > 0, got {}",
            robot.cutting_diameter
        ));
    }
    if robot.autonomy == 0 {
        return invalid("autonomy must be > 0".to_string());
    }
    if robot.guide_lines != GUIDE_LINES {
        return invalid(format!(
            "guide_lines must be {}, got {}",
            GUIDE_LINES, robot.guide_lines
        ));
    }
    Ok(())
}

fn check_grid(env: &EnvConfig) -> AssemblyResult<()> {
    let grid = GridSpec::new(env.grid_tile_size, env.length, env.width)
        .map_err(|e| AssemblyError::InvalidEnvConfig(e.to_string()))?;
    if (env.grid_rows, env.grid_cols) != (grid.rows(), grid.cols()) {
        return Err(AssemblyError::InvalidEnvConfig(format!(
            "grid is {}x{} but length {} and width {} at tile size {} give {}x{}",
            env.grid_rows,
            env.grid_cols,
            env.length,
            env.width,
            env.grid_tile_size,
            grid.rows(),
            grid.cols()
        )));
    }
    Ok(())
}

fn check_simulator(simulator: &SimulatorConfig) -> AssemblyResult<()> {
    let invalid = |msg: String| Err(AssemblyError::InvalidSimulatorConfig(msg));
    if !(simulator.dim_tassel.is_finite() && simulator.dim_tassel > 0.0) {
        return invalid(format!("dim_tassel must be > 0, got {}", simulator.dim_tassel));
    }
    for (name, value) in [
        ("num_maps", simulator.num_maps),
        ("repetitions", simulator.repetitions),
        ("cycle", simulator.cycle),
    ] {
        if value == 0 {
            return invalid(format!("{} must be >= 1", name));
        }
    }
    Ok(())
}
