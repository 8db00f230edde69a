//! Integration tests for the buildpilot binary
//!
//! Drives the compiled CLI against fake cmake/ctest executables and checks
//! exit status, error output, and the recorded invocations.

#![cfg(unix)]

mod common;

use std::process::Command;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::FakeTool;
use predicates::prelude::*;

/// Run the buildpilot binary with a hermetic environment
fn run_buildpilot(temp: &TempDir, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_buildpilot"));
    cmd.current_dir(temp.path());
    cmd.env_remove("CMAKE_ARGS");
    cmd.env_remove("CMAKE_BUILD_PARALLEL_LEVEL");
    cmd.env_remove("CTEST_PARALLEL_LEVEL");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute buildpilot")
}

#[test]
fn test_build_command_configures_and_builds() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::new(temp.path(), "cmake");
    let cmake_arg = cmake.path.display().to_string();

    let output = run_buildpilot(
        &temp,
        &[
            "build",
            "--cmake",
            &cmake_arg,
            "--jobs",
            "2",
            "--",
            "-DFEATURE=ON",
        ],
    );

    assert!(
        output.status.success(),
        "buildpilot build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let args = cmake.arg_lines();
    assert_eq!(args.len(), 2, "one configure call, one build call");
    assert!(predicate::str::contains("-DFEATURE=ON").eval(&args[0]));
    assert!(predicate::str::contains("--config Release").eval(&args[1]));
    assert!(predicate::str::contains("--parallel 2").eval(&args[1]));
    assert!(predicate::str::contains("Build complete")
        .eval(&String::from_utf8_lossy(&output.stdout)));
}

#[test]
fn test_build_conflict_exits_nonzero_without_spawning_cmake() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::new(temp.path(), "cmake");
    let cmake_arg = cmake.path.display().to_string();
    temp.child("build/CMakeCache.txt").write_str("stale").unwrap();

    let output = run_buildpilot(&temp, &["build", "--cmake", &cmake_arg, "--jobs", "2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(predicate::str::contains("already exists")
        .eval(&String::from_utf8_lossy(&output.stderr)));
    temp.child("cmake.log").assert(predicate::path::missing());
}

#[test]
fn test_build_conflict_resolved_by_force() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::new(temp.path(), "cmake");
    let cmake_arg = cmake.path.display().to_string();
    temp.child("build/CMakeCache.txt").write_str("stale").unwrap();

    let output = run_buildpilot(
        &temp,
        &["build", "--force", "--cmake", &cmake_arg, "--jobs", "2"],
    );

    assert!(output.status.success());
    temp.child("build/CMakeCache.txt")
        .assert(predicate::path::missing());
}

#[test]
fn test_test_command_runs_ctest_after_build() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::new(temp.path(), "cmake");
    let ctest = FakeTool::new(temp.path(), "ctest");
    let cmake_arg = cmake.path.display().to_string();
    let ctest_arg = ctest.path.display().to_string();
    // The fake cmake does not create the build dir; ctest needs it as cwd.
    temp.child("build").create_dir_all().unwrap();

    let output = run_buildpilot(
        &temp,
        &[
            "test",
            "--cmake",
            &cmake_arg,
            "--ctest",
            &ctest_arg,
            "--jobs",
            "2",
        ],
    );

    assert!(
        output.status.success(),
        "buildpilot test failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let ctest_args = ctest.arg_lines();
    assert_eq!(ctest_args.len(), 1);
    assert!(predicate::str::contains("--output-on-failure").eval(&ctest_args[0]));
    assert!(predicate::str::contains("--build-config Release").eval(&ctest_args[0]));
}

#[test]
fn test_failing_build_tool_maps_to_exit_code_one() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::with_failure(temp.path(), "cmake", Some("--build"));
    let cmake_arg = cmake.path.display().to_string();

    let output = run_buildpilot(&temp, &["build", "--cmake", &cmake_arg, "--jobs", "2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(predicate::str::contains("Command failed")
        .eval(&String::from_utf8_lossy(&output.stderr)));
}

#[test]
fn test_shared_and_split_jobs_flags_conflict() {
    let temp = TempDir::new().unwrap();
    let output = run_buildpilot(&temp, &["build", "--jobs", "2", "--build-jobs", "3"]);

    // clap usage errors exit with 2
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_overlapping_dirs_are_rejected_before_any_invocation() {
    let temp = TempDir::new().unwrap();
    let cmake = FakeTool::new(temp.path(), "cmake");
    let cmake_arg = cmake.path.display().to_string();

    let output = run_buildpilot(
        &temp,
        &[
            "build",
            "--cmake",
            &cmake_arg,
            "--build-dir",
            "out",
            "--install-dir",
            "out/install",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(predicate::str::contains("must not contain one another")
        .eval(&String::from_utf8_lossy(&output.stderr)));
    temp.child("cmake.log").assert(predicate::path::missing());
}
