use tempfile::NamedTempFile;
use trellis_core::{Database, PlanKind, TrackerError};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_database_initialization() {
    let (_temp_file, _db) = create_test_db();

    assert!(_temp_file.path().exists());
}

#[test]
fn test_create_plan_with_milestones() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(
            PlanKind::Planting,
            "Coffee Garden",
            Some("A backyard coffee patch"),
            "alice",
            &strings(&["coffee"]),
            &strings(&["Plant", "Water", "Harvest"]),
        )
        .expect("Failed to create plan");

    assert!(plan.id > 0);
    assert_eq!(plan.milestones.len(), 3);
    assert_eq!(plan.milestones[0].title, "Plant");
    assert_eq!(plan.milestones[2].order, 2);
    assert_eq!(plan.likes, 0);

    let fetched = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(fetched.kind, PlanKind::Planting);
    assert_eq!(fetched.tags, strings(&["coffee"]));
    assert_eq!(fetched.milestone_ids(), plan.milestone_ids());
}

#[test]
fn test_milestone_ids_are_never_reused() {
    let (_temp_file, mut db) = create_test_db();

    let first = db
        .create_plan(PlanKind::Planting, "One", None, "a", &[], &strings(&["m1", "m2"]))
        .expect("Failed to create plan");
    let second = db
        .create_plan(PlanKind::Learning, "Two", None, "b", &[], &strings(&["m1"]))
        .expect("Failed to create plan");

    let max_first = *first.milestone_ids().iter().max().expect("has milestones");
    let min_second = *second.milestone_ids().iter().min().expect("has milestones");
    assert!(min_second > max_first);
}

#[test]
fn test_create_progress_requires_plan() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.create_progress("alice", 7, None);
    assert!(matches!(result, Err(TrackerError::PlanNotFound { id: 7 })));
}

#[test]
fn test_one_record_per_user_and_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(PlanKind::Planting, "P", None, "owner", &[], &strings(&["m"]))
        .expect("Failed to create plan");

    db.create_progress("alice", plan.id, None)
        .expect("Failed to create progress");
    let duplicate = db.create_progress("alice", plan.id, None);
    assert!(matches!(duplicate, Err(TrackerError::InvalidInput { .. })));

    // A different user on the same plan is fine
    db.create_progress("bob", plan.id, None)
        .expect("Second user should be able to track the plan");
}

#[test]
fn test_completion_recomputes_percentage_and_grants() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(
            PlanKind::Learning,
            "Rust course",
            None,
            "owner",
            &strings(&["programming"]),
            &strings(&["Basics", "Ownership"]),
        )
        .expect("Failed to create plan");
    let record = db
        .create_progress("carol", plan.id, None)
        .expect("Failed to create progress");

    let halfway = db
        .complete_milestone(record.id, plan.milestones[0].id, None, None, &[])
        .expect("Failed to complete milestone");
    assert_eq!(halfway.record.percent_complete, 50.0);
    assert_eq!(halfway.new_badges, strings(&["HALFWAY_HERO"]));

    let full = db
        .complete_milestone(record.id, plan.milestones[1].id, None, None, &[])
        .expect("Failed to complete milestone");
    assert_eq!(full.record.percent_complete, 100.0);
    assert_eq!(
        full.new_badges,
        strings(&["COMPLETION_MASTER", "CODING_EXPERT"])
    );

    // Grants are visible on the profile side
    let profile = db.user_badges("carol").expect("Failed to list user badges");
    assert_eq!(
        profile,
        strings(&["HALFWAY_HERO", "COMPLETION_MASTER", "CODING_EXPERT"])
    );
}

#[test]
fn test_refresh_repairs_drift_after_milestone_removal() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut db = Database::new(temp_file.path()).expect("Failed to create test database");

    let plan = db
        .create_plan(
            PlanKind::Planting,
            "Four steps",
            None,
            "owner",
            &[],
            &strings(&["a", "b", "c", "d"]),
        )
        .expect("Failed to create plan");
    let record = db
        .create_progress("dave", plan.id, None)
        .expect("Failed to create progress");

    db.complete_milestone(record.id, plan.milestones[0].id, None, None, &[])
        .expect("Failed to complete milestone");
    let update = db
        .complete_milestone(record.id, plan.milestones[1].id, None, None, &[])
        .expect("Failed to complete milestone");
    assert_eq!(update.record.percent_complete, 50.0);

    // Remove a completed milestone behind the store's back
    drop(db);
    let conn = rusqlite::Connection::open(temp_file.path()).expect("Failed to open database");
    conn.execute(
        "DELETE FROM milestones WHERE id = ?1",
        [plan.milestones[1].id as i64],
    )
    .expect("Failed to delete milestone");
    drop(conn);

    // Recompute counts only completions that still exist on the plan
    let mut db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let refreshed = db
        .refresh_percentage(record.id)
        .expect("Failed to refresh percentage");
    assert_eq!(refreshed.record.percent_complete, (1.0 / 3.0) * 100.0);
}

#[test]
fn test_delete_progress_keeps_plan_and_profile_badges() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(PlanKind::Planting, "P", None, "owner", &[], &strings(&["m"]))
        .expect("Failed to create plan");
    let record = db
        .create_progress("erin", plan.id, None)
        .expect("Failed to create progress");
    db.award_badge(record.id, "EARLY_ADOPTER")
        .expect("Failed to award badge");

    db.delete_progress(record.id)
        .expect("Failed to delete progress");

    assert!(db
        .get_progress(record.id)
        .expect("Failed to query progress")
        .is_none());
    assert!(db
        .get_plan(plan.id)
        .expect("Failed to query plan")
        .is_some());

    // Profile badges outlive the record that earned them
    let profile = db.user_badges("erin").expect("Failed to list user badges");
    assert_eq!(profile, strings(&["EARLY_ADOPTER"]));
}

#[test]
fn test_recent_progress_ordering() {
    let (_temp_file, mut db) = create_test_db();

    let plan_a = db
        .create_plan(PlanKind::Planting, "A", None, "owner", &[], &strings(&["m1", "m2"]))
        .expect("Failed to create plan");
    let plan_b = db
        .create_plan(PlanKind::Planting, "B", None, "owner", &[], &strings(&["m1"]))
        .expect("Failed to create plan");

    let older = db
        .create_progress("frank", plan_a.id, None)
        .expect("Failed to create progress");
    let newer = db
        .create_progress("frank", plan_b.id, None)
        .expect("Failed to create progress");

    db.complete_milestone(older.id, plan_a.milestones[0].id, None, None, &[])
        .expect("Failed to complete milestone");

    let recent = db
        .recent_progress_by_user("frank")
        .expect("Failed to list recent progress");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, older.id);
    assert_eq!(recent[1].id, newer.id);
}

#[test]
fn test_completed_milestone_details_roundtrip() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(PlanKind::Planting, "P", None, "owner", &[], &strings(&["m"]))
        .expect("Failed to create plan");
    let record = db
        .create_progress("grace", plan.id, None)
        .expect("Failed to create progress");

    let refs = strings(&["https://example.com/a.jpg", "https://example.com/b.jpg"]);
    db.complete_milestone(
        record.id,
        plan.milestones[0].id,
        None,
        Some("looking good"),
        &refs,
    )
    .expect("Failed to complete milestone");

    let fetched = db
        .get_progress(record.id)
        .expect("Failed to get progress")
        .expect("Record should exist");
    assert_eq!(fetched.completed_milestones.len(), 1);
    let entry = &fetched.completed_milestones[0];
    assert_eq!(entry.note.as_deref(), Some("looking good"));
    assert_eq!(entry.media_refs, refs);
}
