use crate::fixtures;
use proptest::prelude::*;
use setupsmarters_core::{Bucket, GridCell, GridSpec};
use setupsmarters_settings::{
    assemble, check_consistency, AssemblyError, RobotConfig, SimulatorConfig, GUIDE_LINES,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_assemble_valid_sections() {
    let snapshot = fixtures::snapshot();
    assert_eq!(snapshot.robot().robot_type, "450X");
    assert_eq!(snapshot.robot().guide_lines, GUIDE_LINES);
    assert_eq!(snapshot.env().grid_rows, 20);
    assert_eq!(snapshot.env().grid_cols, 16);
    assert_eq!(snapshot.simulator().dim_tassel, snapshot.env().grid_tile_size);

    let (robot, env, simulator) = snapshot.into_parts();
    assert_eq!(robot, fixtures::robot());
    assert_eq!(env, fixtures::env());
    assert_eq!(simulator, fixtures::simulator());
}

#[test]
fn test_tile_size_mismatch() {
    let simulator = SimulatorConfig::new(0.25, 2, 3, 60);
    let err = assemble(fixtures::robot(), fixtures::env(), simulator).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::InconsistentTileSize {
            dim_tassel: 0.25,
            grid_tile_size: fixtures::TILE,
        }
    );
}

proptest! {
    #[test]
    fn tile_sizes_must_match_exactly(
        grid_tile_size in 0.01f64..5.0,
        dim_tassel in 0.01f64..5.0,
    ) {
        let mut env = fixtures::env();
        let grid = GridSpec::new(grid_tile_size, env.length, env.width).unwrap();
        env.grid_tile_size = grid_tile_size;
        env.grid_rows = grid.rows();
        env.grid_cols = grid.cols();

        let matching = SimulatorConfig::new(grid_tile_size, 2, 3, 60);
        prop_assert!(assemble(fixtures::robot(), env.clone(), matching).is_ok());

        prop_assume!(dim_tassel != grid_tile_size);
        let simulator = SimulatorConfig::new(dim_tassel, 2, 3, 60);
        prop_assert_eq!(
            assemble(fixtures::robot(), env, simulator),
            Err(AssemblyError::InconsistentTileSize {
                dim_tassel,
                grid_tile_size,
            })
        );
    }
}

#[test]
fn test_grid_dimensions_must_match_environment() {
    let mut env = fixtures::env();
    env.grid_rows += 1;
    let err = assemble(fixtures::robot(), env, fixtures::simulator()).unwrap_err();
    match err {
        AssemblyError::InvalidEnvConfig(reason) => assert!(reason.contains("21x16")),
        other => panic!("expected InvalidEnvConfig, got {:?}", other),
    }

    let mut env = fixtures::env();
    env.length = -1.0;
    assert!(matches!(
        assemble(fixtures::robot(), env, fixtures::simulator()),
        Err(AssemblyError::InvalidEnvConfig(_))
    ));
}

#[test]
fn test_cutting_mode_and_algo_both_set() {
    let robot = RobotConfig::from_raw("", fixtures::spec(), "random - random", "/tmp/algo.json");
    let err = assemble(robot, fixtures::env(), fixtures::simulator()).unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidRobotConfig(_)));
}

#[test]
fn test_cutting_mode_and_algo_both_empty() {
    let robot = RobotConfig::from_raw("", fixtures::spec(), "", "");
    let err = assemble(robot, fixtures::env(), fixtures::simulator()).unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidRobotConfig(_)));
}

#[test]
fn test_robot_values_out_of_range() {
    let mut robot = fixtures::robot();
    robot.speed = 0.0;
    assert!(matches!(
        assemble(robot, fixtures::env(), fixtures::simulator()),
        Err(AssemblyError::InvalidRobotConfig(_))
    ));

    let mut robot = fixtures::robot();
    robot.cutting_diameter = f64::NAN;
    assert!(matches!(
        assemble(robot, fixtures::env(), fixtures::simulator()),
        Err(AssemblyError::InvalidRobotConfig(_))
    ));

    let mut robot = fixtures::robot();
    robot.autonomy = 0;
    assert!(matches!(
        assemble(robot, fixtures::env(), fixtures::simulator()),
        Err(AssemblyError::InvalidRobotConfig(_))
    ));

    let mut robot = fixtures::robot();
    robot.guide_lines = 3;
    assert!(matches!(
        assemble(robot, fixtures::env(), fixtures::simulator()),
        Err(AssemblyError::InvalidRobotConfig(_))
    ));
}

#[test]
fn test_simulator_counts_must_be_positive() {
    for simulator in [
        SimulatorConfig::new(fixtures::TILE, 0, 3, 60),
        SimulatorConfig::new(fixtures::TILE, 2, 0, 60),
        SimulatorConfig::new(fixtures::TILE, 2, 3, 0),
    ] {
        let err = assemble(fixtures::robot(), fixtures::env(), simulator).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidSimulatorConfig(_)));
    }
}

#[test]
fn test_missing_dock_buckets() {
    let mut env = fixtures::env();
    env.opening.clear();
    assert_eq!(
        assemble(fixtures::robot(), env, fixtures::simulator()),
        Err(AssemblyError::MissingDockArea {
            bucket: Bucket::Opening
        })
    );

    let mut env = fixtures::env();
    env.isolated_area.clear();
    assert_eq!(
        assemble(fixtures::robot(), env, fixtures::simulator()),
        Err(AssemblyError::MissingDockArea {
            bucket: Bucket::IsolatedArea
        })
    );
}

#[test]
fn test_overlapping_buckets_are_kept() {
    let mut env = fixtures::env();
    let shared = env.isolated_area[0];
    env.blocked.push(shared);
    let snapshot = assemble(fixtures::robot(), env, fixtures::simulator()).unwrap();
    assert_eq!(snapshot.env().blocked.last(), Some(&shared));
    assert!(snapshot.env().isolated_area.contains(&shared));
}

#[test]
fn test_out_of_grid_cells_are_kept() {
    let mut env = fixtures::env();
    env.blocked.push(GridCell::new(-1, 40));
    assert!(assemble(fixtures::robot(), env, fixtures::simulator()).is_ok());
}

#[test]
fn test_external_algorithm_must_exist() {
    let dir = TempDir::new().unwrap();
    let algo = dir.path().join("spiral.py");

    let robot = RobotConfig::from_raw("", fixtures::spec(), "", algo.display().to_string());
    let err = assemble(robot.clone(), fixtures::env(), fixtures::simulator()).unwrap_err();
    assert_eq!(err, AssemblyError::AlgorithmFileNotFound(algo.clone()));

    // Only existence is checked, never the content
    assert!(check_consistency(&robot, &fixtures::env(), &fixtures::simulator()).is_ok());
    fs::write(&algo, b"not a real algorithm").unwrap();
    let snapshot = assemble(robot, fixtures::env(), fixtures::simulator()).unwrap();
    assert_eq!(snapshot.robot().cutting_mode, "");
    assert_eq!(snapshot.robot().algo, algo.display().to_string());
}

#[test]
fn test_external_algorithm_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let robot = RobotConfig::from_raw("", fixtures::spec(), "", dir.path().display().to_string());
    assert!(matches!(
        assemble(robot, fixtures::env(), fixtures::simulator()),
        Err(AssemblyError::AlgorithmFileNotFound(_))
    ));
}
