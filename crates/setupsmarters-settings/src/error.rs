//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration assembly,
//! snapshot serialization and session-file loading.

use setupsmarters_core::{Bucket, GeometryError};
use setupsmarters_robotdb::CatalogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while merging the three configurations into a snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// The simulator tile size differs from the environment grid tile size.
    #[error("Simulator dim_tassel {dim_tassel} does not match environment tile size {grid_tile_size}")]
    InconsistentTileSize { dim_tassel: f64, grid_tile_size: f64 },

    /// The robot configuration is inconsistent or out of range.
    #[error("Invalid robot config: {0}")]
    InvalidRobotConfig(String),

    /// A simulator parameter is out of range.
    #[error("Invalid simulator config: {0}")]
    InvalidSimulatorConfig(String),

    /// The environment grid does not follow from its length, width and tile size.
    #[error("Invalid environment config: {0}")]
    InvalidEnvConfig(String),

    /// The environment has no docking area or no opening.
    #[error("Missing dock area: '{bucket}' is empty")]
    MissingDockArea { bucket: Bucket },

    /// The external cutting algorithm file does not exist.
    #[error("Cutting algorithm file not found: {}", .0.display())]
    AlgorithmFileNotFound(PathBuf),
}

/// Errors raised while writing or reading a snapshot.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// A value has no representation in the snapshot schema.
    #[error("Cannot serialize {section}.{field}: {reason}")]
    UnserializableValue {
        section: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A parsed snapshot violates the assembly rules.
    #[error("Invalid snapshot: {0}")]
    Invalid(#[from] AssemblyError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing or reading the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur while building a snapshot from a session.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A shape or grid parameter was rejected.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The robot catalog could not be used.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The configurations do not fit together.
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// The snapshot could not be written or read.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The session file could not be read.
    #[error("Failed to load session file {path}: {reason}")]
    SessionFile { path: String, reason: String },

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Result type alias for serialization operations.
pub type SerializationResult<T> = Result<T, SerializationError>;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
