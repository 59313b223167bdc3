//! Robot catalog
//!
//! Maps a robot model name to one of the presets in `robots.json`. The
//! catalog is immutable once loaded and can be shared freely.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CatalogEntry, CatalogFile, RobotSpec};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional catalog file name
pub const CATALOG_FILE_NAME: &str = "robots.json";

/// Index used for any model name not in the known table
pub const DEFAULT_INDEX: usize = 2;

const KNOWN_MODELS: &[(&str, usize)] = &[("450X", 0), ("430X", 1)];

fn known_index(type_name: &str) -> Option<usize> {
    KNOWN_MODELS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, index)| *index)
}

#[derive(Debug, Clone)]
pub struct RobotCatalog {
    entries: Vec<CatalogEntry>,
    source: Option<PathBuf>,
}

impl RobotCatalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            source: None,
        }
    }

    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let unavailable = |reason: String| CatalogError::CatalogUnavailable {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;

        debug!(
            "Loaded {} robot presets from {}",
            file.robots.robot.len(),
            path.display()
        );
        Ok(Self {
            entries: file.robots.robot,
            source: Some(path.to_path_buf()),
        })
    }

    /// Parse catalog content already held in memory.
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|e| CatalogError::CatalogUnavailable {
                path: "<inline>".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_entries(file.robots.robot))
    }

    /// Catalog index for a model name; `None` for the empty name.
    ///
    /// Unknown names fall back to [`DEFAULT_INDEX`] instead of failing.
    pub fn index_for(type_name: &str) -> Option<usize> {
        if type_name.is_empty() {
            return None;
        }
        Some(known_index(type_name).unwrap_or(DEFAULT_INDEX))
    }

    /// Whether `type_name` has its own catalog entry rather than the fallback.
    pub fn is_known_model(type_name: &str) -> bool {
        known_index(type_name).is_some()
    }

    /// Resolve a model name to its preset.
    ///
    /// An empty name means the caller supplies the values by hand and
    /// yields `Ok(None)`.
    pub fn resolve(&self, type_name: &str) -> CatalogResult<Option<RobotSpec>> {
        let Some(index) = Self::index_for(type_name) else {
            return Ok(None);
        };
        self.entries
            .get(index)
            .map(|entry| Some(RobotSpec::from(entry)))
            .ok_or(CatalogError::CatalogIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
