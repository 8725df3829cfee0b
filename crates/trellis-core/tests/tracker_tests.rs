mod common;

use common::create_test_tracker;
use trellis_core::{
    params::{CompleteMilestone, CreatePlan, CreateProgress, Id, UserId},
    TrackerError,
};

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_tracking_workflow() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    // Register a three-milestone coffee plan
    let plan = tracker
        .create_plan(&CreatePlan {
            kind: "planting".to_string(),
            title: "Coffee Garden".to_string(),
            description: Some("Backyard coffee from seed to cup".to_string()),
            owner_id: "alice".to_string(),
            tags: vec!["coffee".to_string(), "garden".to_string()],
            milestones: vec![
                "Plant seedlings".to_string(),
                "First flowering".to_string(),
                "Harvest".to_string(),
            ],
        })
        .await
        .expect("Failed to create plan");
    assert_eq!(plan.milestones.len(), 3);

    // Start tracking
    let record = tracker
        .create_progress(&CreateProgress {
            user_id: "bob".to_string(),
            plan_id: plan.id,
            started_at: None,
        })
        .await
        .expect("Failed to create progress");
    assert_eq!(record.percent_complete, 0.0);

    // First milestone: below every threshold
    let first = tracker
        .complete_milestone(&CompleteMilestone {
            progress_id: record.id,
            milestone_id: plan.milestones[0].id,
            ..Default::default()
        })
        .await
        .expect("Failed to complete milestone");
    assert_eq!(first.record.percent_complete, (1.0 / 3.0) * 100.0);
    assert!(first.new_badges.is_empty());

    // Second milestone crosses the halfway threshold
    let second = tracker
        .complete_milestone(&CompleteMilestone {
            progress_id: record.id,
            milestone_id: plan.milestones[1].id,
            ..Default::default()
        })
        .await
        .expect("Failed to complete milestone");
    assert_eq!(second.record.percent_complete, (2.0 / 3.0) * 100.0);
    assert_eq!(second.new_badges, vec!["HALFWAY_HERO".to_string()]);

    // Third milestone completes the plan and triggers the specialty rule
    let third = tracker
        .complete_milestone(&CompleteMilestone {
            progress_id: record.id,
            milestone_id: plan.milestones[2].id,
            ..Default::default()
        })
        .await
        .expect("Failed to complete milestone");
    assert_eq!(third.record.percent_complete, 100.0);
    assert_eq!(
        third.new_badges,
        vec!["COMPLETION_MASTER".to_string(), "COFFEE_GROWER".to_string()]
    );

    // The record holds every badge once, in grant order
    let final_record = tracker
        .get_progress(&Id { id: record.id })
        .await
        .expect("Failed to get progress")
        .expect("Record should exist");
    assert_eq!(
        final_record.badges,
        vec![
            "HALFWAY_HERO".to_string(),
            "COMPLETION_MASTER".to_string(),
            "COFFEE_GROWER".to_string(),
        ]
    );
    assert_eq!(final_record.completed_milestones.len(), 3);

    // Grants propagated to the profile
    let profile = tracker
        .user_badges(&UserId {
            user_id: "bob".to_string(),
        })
        .await
        .expect("Failed to list user badges");
    assert_eq!(profile.len(), 3);

    // Completing a finished plan again changes nothing
    let replay = tracker
        .complete_milestone(&CompleteMilestone {
            progress_id: record.id,
            milestone_id: plan.milestones[2].id,
            ..Default::default()
        })
        .await
        .expect("Repeat completion should succeed");
    assert!(replay.new_badges.is_empty());
    assert_eq!(replay.record.completed_milestones.len(), 3);
}

#[tokio::test]
async fn test_two_users_track_the_same_plan_independently() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let plan = tracker
        .create_plan(&CreatePlan {
            kind: "learning".to_string(),
            title: "Rust course".to_string(),
            description: None,
            owner_id: "instructor-1".to_string(),
            tags: vec!["programming".to_string()],
            milestones: vec!["Basics".to_string(), "Ownership".to_string()],
        })
        .await
        .expect("Failed to create plan");

    let alice = tracker
        .create_progress(&CreateProgress {
            user_id: "alice".to_string(),
            plan_id: plan.id,
            started_at: None,
        })
        .await
        .expect("Failed to create progress");
    let bob = tracker
        .create_progress(&CreateProgress {
            user_id: "bob".to_string(),
            plan_id: plan.id,
            started_at: None,
        })
        .await
        .expect("Failed to create progress");

    tracker
        .complete_milestone(&CompleteMilestone {
            progress_id: alice.id,
            milestone_id: plan.milestones[0].id,
            ..Default::default()
        })
        .await
        .expect("Failed to complete milestone");

    let alice_record = tracker
        .get_progress(&Id { id: alice.id })
        .await
        .expect("Failed to get progress")
        .expect("Record should exist");
    let bob_record = tracker
        .get_progress(&Id { id: bob.id })
        .await
        .expect("Failed to get progress")
        .expect("Record should exist");

    assert_eq!(alice_record.percent_complete, 50.0);
    assert_eq!(bob_record.percent_complete, 0.0);
    assert!(bob_record.badges.is_empty());
}

#[tokio::test]
async fn test_errors_surface_through_the_facade() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let missing_plan = tracker
        .create_progress(&CreateProgress {
            user_id: "alice".to_string(),
            plan_id: 99,
            started_at: None,
        })
        .await;
    assert!(matches!(
        missing_plan,
        Err(TrackerError::PlanNotFound { id: 99 })
    ));

    let missing_record = tracker.update_progress(&Id { id: 42 }).await;
    assert!(matches!(
        missing_record,
        Err(TrackerError::ProgressNotFound { id: 42 })
    ));
}
