use tempfile::TempDir;
use trellis_core::TrackerBuilder;

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, trellis_core::Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}
