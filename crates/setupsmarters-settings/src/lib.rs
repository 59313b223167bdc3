//! SetUpSmarters Settings Crate
//!
//! Builds the robot, environment and simulator configurations, merges them
//! into one snapshot and writes it for the simulator.

pub mod assembler;
pub mod config;
pub mod error;
pub mod persistence;
pub mod schema;
pub mod session;
pub mod session_file;

pub use assembler::{assemble, check_consistency, ConfigSnapshot};
pub use config::{
    Bounce, CuttingMode, EnvConfig, GenerationBounds, RobotConfig, RunMode, SimulatorConfig,
    Traversal, GUIDE_LINES,
};
pub use error::{
    AssemblyError, AssemblyResult, SerializationError, SerializationResult, SettingsError,
    SettingsResult,
};
pub use persistence::{load_snapshot, parse, serialize, write_snapshot, DATA_FILE_NAME};
pub use schema::{FieldValue, SnapshotSection};
pub use session::EnvironmentSession;
pub use session_file::SessionFile;
