//! Error types for the robot catalog crate.
//!
//! This module provides structured error types for loading the catalog file
//! and resolving robot models against it.

use thiserror::Error;

/// Errors that can occur while loading or querying the robot catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The catalog file could not be read or parsed.
    #[error("Robot catalog unavailable at {path}: {reason}")]
    CatalogUnavailable { path: String, reason: String },

    /// The resolved catalog index has no entry.
    #[error("Robot catalog has no entry at index {index} ({len} entries)")]
    CatalogIndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
