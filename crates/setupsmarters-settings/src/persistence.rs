//! Snapshot persistence
//!
//! Canonical JSON output: one object with the keys `robot`, `env` and
//! `simulator` in that order, each a flat object whose keys follow the
//! section's field declaration order, indented by two spaces. Occupancy
//! buckets are arrays of `[i, j]` pairs in recording order.

use crate::assembler::{reassemble, ConfigSnapshot};
use crate::config::{EnvConfig, GenerationBounds, RobotConfig, SimulatorConfig};
use crate::error::{SerializationError, SerializationResult};
use crate::schema::{FieldMap, FieldValue, SnapshotSection};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use setupsmarters_core::{GridCell, ShapeKind};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Conventional snapshot file name
pub const DATA_FILE_NAME: &str = "data_file";

type Section<'a> = (&'static str, Vec<(&'static str, FieldValue<'a>)>);

struct Document<'a>(&'a [Section<'a>]);

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, fields) in self.0 {
            map.serialize_entry(key, &FieldMap(fields))?;
        }
        map.end()
    }
}

fn section<T: SnapshotSection>(value: &T) -> SerializationResult<Section<'_>> {
    let fields = value.fields();
    for (field, field_value) in &fields {
        if let Some(reason) = field_value.unrepresentable() {
            return Err(SerializationError::UnserializableValue {
                section: T::KEY,
                field: *field,
                reason,
            });
        }
    }
    Ok((T::KEY, fields))
}

/// Render `snapshot` as canonical JSON bytes.
pub fn serialize(snapshot: &ConfigSnapshot) -> SerializationResult<Vec<u8>> {
    let sections = [
        section(snapshot.robot())?,
        section(snapshot.env())?,
        section(snapshot.simulator())?,
    ];
    Ok(serde_json::to_vec_pretty(&Document(&sections))?)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredSnapshot {
    robot: RobotConfig,
    env: StoredEnv,
    simulator: SimulatorConfig,
}

/// Environment section as written: every key required, no others allowed.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredEnv {
    length: f64,
    width: f64,
    grid_tile_size: f64,
    grid_rows: u32,
    grid_cols: u32,
    num_blocked_squares: u32,
    min_width_square: f64,
    max_width_square: f64,
    min_height_square: f64,
    max_height_square: f64,
    num_blocked_circles: u32,
    min_ray: f64,
    max_ray: f64,
    isolated_area_min_length: f64,
    isolated_area_max_length: f64,
    min_radius: f64,
    max_radius: f64,
    isolated_area_min_width: f64,
    isolated_area_max_width: f64,
    isolated_area_shape: ShapeKind,
    blocked: Vec<GridCell>,
    isolated_area: Vec<GridCell>,
    opening: Vec<GridCell>,
}

impl From<StoredEnv> for EnvConfig {
    fn from(env: StoredEnv) -> Self {
        Self {
            length: env.length,
            width: env.width,
            grid_tile_size: env.grid_tile_size,
            grid_rows: env.grid_rows,
            grid_cols: env.grid_cols,
            bounds: GenerationBounds {
                num_blocked_squares: env.num_blocked_squares,
                min_width_square: env.min_width_square,
                max_width_square: env.max_width_square,
                min_height_square: env.min_height_square,
                max_height_square: env.max_height_square,
                num_blocked_circles: env.num_blocked_circles,
                min_ray: env.min_ray,
                max_ray: env.max_ray,
                isolated_area_min_length: env.isolated_area_min_length,
                isolated_area_max_length: env.isolated_area_max_length,
                min_radius: env.min_radius,
                max_radius: env.max_radius,
                isolated_area_min_width: env.isolated_area_min_width,
                isolated_area_max_width: env.isolated_area_max_width,
            },
            isolated_area_shape: env.isolated_area_shape,
            blocked: env.blocked,
            isolated_area: env.isolated_area,
            opening: env.opening,
        }
    }
}

/// Read a snapshot back from JSON bytes.
///
/// Every key of every section must be present and no other key is
/// accepted. All assembly rules are re-checked, including the grid
/// dimensions, except the existence of an external algorithm file, which
/// may live on another machine.
pub fn parse(bytes: &[u8]) -> SerializationResult<ConfigSnapshot> {
    let stored: StoredSnapshot = serde_json::from_slice(bytes)?;
    Ok(reassemble(stored.robot, stored.env.into(), stored.simulator)?)
}

/// Write `snapshot` to `path`, replacing any existing file.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it, so the target is either the complete new snapshot or untouched.
pub fn write_snapshot(snapshot: &ConfigSnapshot, path: &Path) -> SerializationResult<()> {
    let bytes = serialize(snapshot)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    debug!("Snapshot staged at {}", file.path().display());
    file.persist(path).map_err(|e| e.error)?;

    info!("Wrote snapshot ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Read and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> SerializationResult<ConfigSnapshot> {
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}
