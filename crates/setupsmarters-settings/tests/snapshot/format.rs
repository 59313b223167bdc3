use crate::fixtures;
use proptest::prelude::*;
use serde_json::{json, Value};
use setupsmarters_core::{GridCell, GridSpec, OccupancySnapshot, ShapeKind};
use setupsmarters_robotdb::RobotSpec;
use setupsmarters_settings::{
    assemble, load_snapshot, parse, serialize, write_snapshot, AssemblyError, EnvConfig,
    GenerationBounds, RobotConfig, SerializationError, SimulatorConfig,
};
use std::fs;
use tempfile::TempDir;

const ENV_KEYS: [&str; 23] = [
    "length",
    "width",
    "grid_tile_size",
    "grid_rows",
    "grid_cols",
    "num_blocked_squares",
    "min_width_square",
    "max_width_square",
    "min_height_square",
    "max_height_square",
    "num_blocked_circles",
    "min_ray",
    "max_ray",
    "isolated_area_min_length",
    "isolated_area_max_length",
    "min_radius",
    "max_radius",
    "isolated_area_min_width",
    "isolated_area_max_width",
    "isolated_area_shape",
    "blocked",
    "isolated_area",
    "opening",
];

fn rendered() -> String {
    String::from_utf8(serialize(&fixtures::snapshot()).unwrap()).unwrap()
}

/// Byte offsets of `keys` as nested keys at `indent` spaces.
fn key_offsets(text: &str, indent: usize, keys: &[&str]) -> Vec<usize> {
    keys.iter()
        .map(|key| {
            let needle = format!("\n{}\"{}\": ", " ".repeat(indent), key);
            text.find(&needle)
                .unwrap_or_else(|| panic!("key {} not found", key))
        })
        .collect()
}

fn is_increasing(offsets: &[usize]) -> bool {
    offsets.windows(2).all(|w| w[0] < w[1])
}

#[test]
fn test_top_level_key_order() {
    let text = rendered();
    assert!(text.starts_with("{\n  \"robot\": {\n    \"type\": \"450X\","));
    let offsets = key_offsets(&text, 2, &["robot", "env", "simulator"]);
    assert!(is_increasing(&offsets));
}

#[test]
fn test_section_field_order() {
    let text = rendered();
    let robot = key_offsets(
        &text,
        4,
        &["type", "cutting_mode", "speed", "cutting_diameter", "autonomy", "guide_lines", "algo"],
    );
    assert!(is_increasing(&robot));

    let env_start = text.find("\n  \"env\": ").unwrap();
    let simulator_start = text.find("\n  \"simulator\": ").unwrap();
    let env_text = &text[env_start..simulator_start];
    assert!(is_increasing(&key_offsets(env_text, 4, &ENV_KEYS)));

    let simulator_text = &text[simulator_start..];
    let simulator = key_offsets(
        simulator_text,
        4,
        &["dim_tassel", "num_maps", "repetitions", "cycle"],
    );
    assert!(is_increasing(&simulator));
}

#[test]
fn test_values_and_cells() {
    let value: Value = serde_json::from_str(&rendered()).unwrap();
    let snapshot = fixtures::snapshot();

    assert_eq!(value["robot"]["speed"], json!(0.6));
    assert_eq!(value["robot"]["autonomy"], json!(270));
    assert_eq!(value["robot"]["guide_lines"], json!(2));
    assert_eq!(value["robot"]["algo"], json!(""));
    assert_eq!(value["env"]["isolated_area_shape"], json!("Square"));
    assert_eq!(value["env"]["grid_rows"], json!(20));
    assert_eq!(value["simulator"]["cycle"], json!(60));

    let blocked = value["env"]["blocked"].as_array().unwrap();
    assert_eq!(blocked.len(), snapshot.env().blocked.len());
    let first = snapshot.env().blocked[0];
    assert_eq!(blocked[0], json!([first.i, first.j]));

    let opening = value["env"]["opening"].as_array().unwrap();
    assert_eq!(opening.len(), 1);
}

#[test]
fn test_round_trip() {
    let snapshot = fixtures::snapshot();
    let bytes = serialize(&snapshot).unwrap();
    assert_eq!(parse(&bytes).unwrap(), snapshot);
}

fn finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO
}

fn cells(min: usize) -> impl Strategy<Value = Vec<GridCell>> {
    prop::collection::vec(
        (-1000i64..1000, -1000i64..1000).prop_map(GridCell::from),
        min..20,
    )
}

fn bounds(floats: &[f64], squares: u32, circles: u32) -> GenerationBounds {
    GenerationBounds {
        num_blocked_squares: squares,
        min_width_square: floats[0],
        max_width_square: floats[1],
        min_height_square: floats[2],
        max_height_square: floats[3],
        num_blocked_circles: circles,
        min_ray: floats[4],
        max_ray: floats[5],
        isolated_area_min_length: floats[6],
        isolated_area_max_length: floats[7],
        min_radius: floats[8],
        max_radius: floats[9],
        isolated_area_min_width: floats[10],
        isolated_area_max_width: floats[11],
    }
}

proptest! {
    #[test]
    fn round_trip_preserves_every_field(
        speed in 1.0e-6f64..1.0e3,
        diameter_ratio in 0.001f64..1.0,
        autonomy in 1u32..100_000,
        tile in 0.01f64..5.0,
        length in 0.1f64..1.0e4,
        width in 0.1f64..1.0e4,
        floats in prop::collection::vec(finite(), 12),
        counts in (any::<u32>(), any::<u32>()),
        blocked in cells(0),
        isolated_area in cells(1),
        opening in cells(1),
    ) {
        let spec = RobotSpec {
            speed,
            cutting_diameter: speed * diameter_ratio,
            autonomy,
        };
        let robot = RobotConfig::from_raw("450X", spec, "random - random", "");
        let grid = GridSpec::new(tile, length, width).unwrap();
        let env = EnvConfig::new(
            &grid,
            bounds(&floats, counts.0, counts.1),
            ShapeKind::Circle,
            OccupancySnapshot {
                blocked,
                isolated_area,
                opening,
            },
        );
        let simulator = SimulatorConfig::new(tile, 1, 1, 1);
        let snapshot = assemble(robot, env, simulator).unwrap();

        let bytes = serialize(&snapshot).unwrap();
        prop_assert_eq!(parse(&bytes).unwrap(), snapshot);
    }
}

#[test]
fn test_parse_skips_algorithm_existence() {
    let dir = TempDir::new().unwrap();
    let algo = dir.path().join("spiral.py");
    fs::write(&algo, b"").unwrap();
    let robot = RobotConfig::from_raw("", fixtures::spec(), "", algo.display().to_string());
    let snapshot = assemble(robot, fixtures::env(), fixtures::simulator()).unwrap();
    let bytes = serialize(&snapshot).unwrap();

    fs::remove_file(&algo).unwrap();
    assert_eq!(parse(&bytes).unwrap(), snapshot);
}

#[test]
fn test_parse_rechecks_consistency() {
    let mut value: Value = serde_json::from_slice(&serialize(&fixtures::snapshot()).unwrap()).unwrap();
    value["simulator"]["dim_tassel"] = json!(0.25);
    let err = parse(&serde_json::to_vec(&value).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SerializationError::Invalid(AssemblyError::InconsistentTileSize { .. })
    ));
}

#[test]
fn test_parse_rejects_unknown_section() {
    let mut value: Value = serde_json::from_slice(&serialize(&fixtures::snapshot()).unwrap()).unwrap();
    value["extra"] = json!({});
    let err = parse(&serde_json::to_vec(&value).unwrap()).unwrap_err();
    assert!(matches!(err, SerializationError::Json(_)));

    assert!(matches!(parse(b"{}"), Err(SerializationError::Json(_))));
}

#[test]
fn test_parse_requires_every_env_key() {
    let mut value: Value = serde_json::from_slice(&serialize(&fixtures::snapshot()).unwrap()).unwrap();
    value["env"].as_object_mut().unwrap().remove("min_ray");
    let err = parse(&serde_json::to_vec(&value).unwrap()).unwrap_err();
    assert!(matches!(err, SerializationError::Json(_)));
    assert!(err.to_string().contains("min_ray"));
}

#[test]
fn test_parse_rejects_unknown_section_keys() {
    for section in ["robot", "env", "simulator"] {
        let mut value: Value =
            serde_json::from_slice(&serialize(&fixtures::snapshot()).unwrap()).unwrap();
        value[section]["colour"] = json!("green");
        let err = parse(&serde_json::to_vec(&value).unwrap()).unwrap_err();
        assert!(matches!(err, SerializationError::Json(_)), "{}", section);
    }
}

#[test]
fn test_parse_rederives_grid_dimensions() {
    let mut value: Value = serde_json::from_slice(&serialize(&fixtures::snapshot()).unwrap()).unwrap();
    value["env"]["grid_rows"] = json!(21);
    let err = parse(&serde_json::to_vec(&value).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SerializationError::Invalid(AssemblyError::InvalidEnvConfig(_))
    ));
}

#[test]
fn test_non_finite_value_is_unserializable() {
    let mut env = fixtures::env();
    env.bounds.max_ray = f64::INFINITY;
    let snapshot = assemble(fixtures::robot(), env, fixtures::simulator()).unwrap();

    match serialize(&snapshot) {
        Err(SerializationError::UnserializableValue { section, field, .. }) => {
            assert_eq!(section, "env");
            assert_eq!(field, "max_ray");
        }
        other => panic!("expected UnserializableValue, got {:?}", other),
    }
}

#[test]
fn test_write_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data_file");
    let snapshot = fixtures::snapshot();

    write_snapshot(&snapshot, &path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), serialize(&snapshot).unwrap());
    assert_eq!(load_snapshot(&path).unwrap(), snapshot);

    // Overwrites in place
    fs::write(&path, b"stale").unwrap();
    write_snapshot(&snapshot, &path).unwrap();
    assert_eq!(load_snapshot(&path).unwrap(), snapshot);
}

#[test]
fn test_failed_write_leaves_target_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data_file");
    fs::write(&path, b"previous").unwrap();

    let mut env = fixtures::env();
    env.bounds.min_ray = f64::NAN;
    let snapshot = assemble(fixtures::robot(), env, fixtures::simulator()).unwrap();
    assert!(write_snapshot(&snapshot, &path).is_err());

    assert_eq!(fs::read(&path).unwrap(), b"previous");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_snapshot(&dir.path().join("data_file")).unwrap_err();
    assert!(matches!(err, SerializationError::Io(_)));
}
