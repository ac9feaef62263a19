//! Forward kinematics and Jacobian benchmarks against the in-memory host.

mod common;

use common::{MockEnvironment, MockRobot};
use motion_bench::command::{run_forward_kinematics_command, run_jacobian_command};
use motion_bench::{Benchmark, Error, ForwardKinematicsReport};
use tempfile::TempDir;

#[test]
fn forward_kinematics_phases_sum_to_total() {
    let mut robot = MockRobot::new("herb", 7);
    let report = Benchmark::new()
        .samples(300)
        .seed(5)
        .run_forward_kinematics(&mut robot)
        .unwrap();

    assert_eq!(report.checks, 300);
    assert!((report.dof_elapsed_ms + report.ee_elapsed_ms - report.elapsed_ms).abs() < 1e-9);
    assert!(report.mean_ms >= 0.0);
    assert_eq!(robot.values.len(), 7);
    assert!(robot.values.iter().all(|v| (-1.0..=1.0).contains(v)));
}

#[test]
fn jacobian_report() {
    let mut robot = MockRobot::new("herb", 4);
    let report = Benchmark::new()
        .samples(100)
        .warmup(3)
        .run_jacobian(&mut robot)
        .unwrap();

    assert_eq!(report.checks, 100);
    assert!((report.translational_ms + report.rotational_ms - report.elapsed_ms).abs() < 1e-9);
    assert_eq!(report.summary().phases.len(), 2);
}

#[test]
fn kinematics_with_no_samples() {
    let report = Benchmark::new()
        .samples(0)
        .run_forward_kinematics(&mut MockRobot::new("herb", 3))
        .unwrap();
    assert_eq!(report.checks, 0);
    assert_eq!(report.elapsed_ms, 0.0);
    assert_eq!(report.summary().queries_per_sec(), None);
}

#[test]
fn command_activates_manipulator() {
    let mut env = MockEnvironment::new();
    let report =
        run_forward_kinematics_command(&mut env, "{robot: herb, manip: right, random: 25}").unwrap();
    assert_eq!(report.checks, 25);
    assert_eq!(env.robots["herb"].active.as_deref(), Some("right"));
}

#[test]
fn command_unknown_robot_and_manipulator() {
    let mut env = MockEnvironment::new();
    let err = run_jacobian_command(&mut env, "{robot: ada, manip: right, random: 1}").unwrap_err();
    assert!(matches!(err, Error::UnknownRobot(ref r) if r == "ada"));

    let err = run_jacobian_command(&mut env, "{robot: herb, manip: head, random: 1}").unwrap_err();
    assert!(matches!(err, Error::UnknownManipulator(ref m) if m == "head"));
}

#[test]
fn command_missing_manipulator() {
    let mut env = MockEnvironment::new();
    let err = run_forward_kinematics_command(&mut env, "robot: herb\n").unwrap_err();
    assert!(matches!(err, Error::MissingParameter("manip")));
}

#[test]
fn forward_kinematics_outfile_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fk.yaml");
    let mut env = MockEnvironment::new();
    let payload = format!(
        "{{robot: herb, manip: left, random: 10, outfile: '{}'}}",
        path.display()
    );
    run_forward_kinematics_command(&mut env, &payload).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let report: ForwardKinematicsReport = serde_yaml::from_str(&text).unwrap();
    assert_eq!(report.checks, 10);
    for key in ["elapsed_ms", "dof_elapsed_ms", "ee_elapsed_ms", "checks"] {
        assert!(text.contains(key), "missing {key}");
    }
}
