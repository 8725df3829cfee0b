use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn trellis_cmd() -> Command {
    Command::cargo_bin("trellis").expect("Failed to find trellis binary")
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    trellis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Coffee Garden",
            "--owner",
            "alice",
            "--tags",
            "coffee",
            "--milestones",
            "Plant,Water,Harvest",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Coffee Garden"))
        .stdout(predicate::str::contains("Plant"));
}

#[test]
fn test_cli_rejects_unknown_plan_kind() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    trellis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Broken",
            "--owner",
            "alice",
            "--kind",
            "cooking",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan kind: cooking"));
}

#[test]
fn test_cli_list_empty_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    trellis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "progress",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No progress records found."));
}

#[test]
fn test_cli_complete_workflow_awards_badges() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    // Register a two-milestone coffee plan
    trellis_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "Coffee Garden",
            "--owner",
            "alice",
            "--tags",
            "coffee",
            "--milestones",
            "Plant,Harvest",
        ])
        .assert()
        .success();

    // Start tracking it
    trellis_cmd()
        .args([
            "--database-file",
            db_arg,
            "progress",
            "start",
            "alice",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created progress record with ID: 1"));

    // First completion crosses the halfway threshold
    trellis_cmd()
        .args([
            "--database-file",
            db_arg,
            "progress",
            "complete",
            "1",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress at 50.0%"))
        .stdout(predicate::str::contains("HALFWAY_HERO"));

    // Second completion finishes the plan
    trellis_cmd()
        .args([
            "--database-file",
            db_arg,
            "progress",
            "complete",
            "1",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress at 100.0%"))
        .stdout(predicate::str::contains("COMPLETION_MASTER"))
        .stdout(predicate::str::contains("COFFEE_GROWER"));

    // All grants are visible on the user's profile
    trellis_cmd()
        .args(["--database-file", db_arg, "badges", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Badges for alice"))
        .stdout(predicate::str::contains("- HALFWAY_HERO"))
        .stdout(predicate::str::contains("- COMPLETION_MASTER"))
        .stdout(predicate::str::contains("- COFFEE_GROWER"));
}

#[test]
fn test_cli_like_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    trellis_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "P",
            "--owner",
            "alice",
            "--milestones",
            "m",
        ])
        .assert()
        .success();
    trellis_cmd()
        .args(["--database-file", db_arg, "progress", "start", "bob", "1"])
        .assert()
        .success();

    trellis_cmd()
        .args(["--database-file", db_arg, "progress", "like", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress 1 now has 1 likes."));
}

#[test]
fn test_cli_missing_record_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    trellis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "progress",
            "complete",
            "42",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Progress record with ID 42 not found"));
}
