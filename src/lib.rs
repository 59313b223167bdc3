//! # SetUpSmarters
//!
//! Prepares one run of a robotic lawn-mower simulator: the user describes
//! the robot, the lawn and the simulation parameters, and the result is a
//! single JSON snapshot (`data_file`) the simulator consumes.
//!
//! ## Architecture
//!
//! 1. **setupsmarters-core** - Grid, shape rasterization, occupancy buckets
//! 2. **setupsmarters-robotdb** - Robot catalog lookup
//! 3. **setupsmarters-settings** - Configuration sections, assembly, snapshot files
//! 4. **setupsmarters** - Command-line entry point tying the crates together

pub use setupsmarters_core::{
    rasterize, AreaRegistry, Bucket, Circle, GeometryError, GridCell, GridSpec,
    OccupancySnapshot, Rectangle, Shape, ShapeKind,
};
pub use setupsmarters_robotdb::{CatalogError, RobotCatalog, RobotSpec};
pub use setupsmarters_settings::{
    assemble, load_snapshot, parse, serialize, write_snapshot, AssemblyError, ConfigSnapshot,
    CuttingMode, EnvConfig, EnvironmentSession, GenerationBounds, RobotConfig, RunMode,
    SerializationError, SessionFile, SettingsError, SimulatorConfig, DATA_FILE_NAME,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so stdout stays free for the snapshot summary.
/// `RUST_LOG` directives are honoured on top of the INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
