//! Achievement rules evaluated against a progress record.
//!
//! Rules are pure: given the derived percentage, the plan's tags, the plan
//! kind, and the badges already held, [`qualifying_badges`] returns the
//! badges that should be newly granted. Each rule is independently
//! idempotent (grant-once), so evaluation order only affects the order of
//! grants, never the final badge set. Persisting the grants is the caller's
//! job; see [`crate::db`].

use crate::models::PlanKind;

/// Badge granted when a plan reaches 100% completion.
pub const COMPLETION_BADGE: &str = "COMPLETION_MASTER";

/// Badge granted when a plan reaches 50% completion.
pub const HALFWAY_BADGE: &str = "HALFWAY_HERO";

/// Evaluate the badge rules and return the badges to grant now.
///
/// Rules, in evaluation order:
/// 1. percentage >= 100 grants [`COMPLETION_BADGE`]
/// 2. percentage >= 50 grants [`HALFWAY_BADGE`]
/// 3. percentage >= 100 and the plan carries the kind's specialty tag
///    grants the kind's specialty badge
///
/// Badges already in `held` are never returned again.
pub fn qualifying_badges(
    kind: PlanKind,
    percent: f64,
    tags: &[String],
    held: &[String],
) -> Vec<String> {
    let mut granted = Vec::new();

    let holds = |badge: &str| held.iter().any(|b| b == badge);

    if percent >= 100.0 && !holds(COMPLETION_BADGE) {
        granted.push(COMPLETION_BADGE.to_string());
    }

    if percent >= 50.0 && !holds(HALFWAY_BADGE) {
        granted.push(HALFWAY_BADGE.to_string());
    }

    if percent >= 100.0
        && tags.iter().any(|t| t == kind.specialty_tag())
        && !holds(kind.specialty_badge())
    {
        granted.push(kind.specialty_badge().to_string());
    }

    granted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_below_halfway_grants_nothing() {
        let granted = qualifying_badges(PlanKind::Planting, 33.3, &tags(&["coffee"]), &[]);
        assert!(granted.is_empty());
    }

    #[test]
    fn test_halfway_grants_only_halfway() {
        let granted = qualifying_badges(PlanKind::Planting, 50.0, &tags(&["coffee"]), &[]);
        assert_eq!(granted, vec![HALFWAY_BADGE.to_string()]);
    }

    #[test]
    fn test_full_completion_grants_all_applicable() {
        let granted = qualifying_badges(PlanKind::Planting, 100.0, &tags(&["coffee"]), &[]);
        assert_eq!(
            granted,
            vec![
                COMPLETION_BADGE.to_string(),
                HALFWAY_BADGE.to_string(),
                "COFFEE_GROWER".to_string(),
            ]
        );
    }

    #[test]
    fn test_specialty_requires_matching_tag() {
        let granted = qualifying_badges(PlanKind::Planting, 100.0, &tags(&["tomato"]), &[]);
        assert_eq!(
            granted,
            vec![COMPLETION_BADGE.to_string(), HALFWAY_BADGE.to_string()]
        );
    }

    #[test]
    fn test_specialty_follows_plan_kind() {
        let granted = qualifying_badges(
            PlanKind::Learning,
            100.0,
            &tags(&["programming", "rust"]),
            &[],
        );
        assert!(granted.contains(&"CODING_EXPERT".to_string()));
        assert!(!granted.contains(&"COFFEE_GROWER".to_string()));
    }

    #[test]
    fn test_held_badges_are_not_regranted() {
        let held = vec![HALFWAY_BADGE.to_string()];
        let granted = qualifying_badges(PlanKind::Planting, 100.0, &tags(&["coffee"]), &held);
        assert_eq!(
            granted,
            vec![COMPLETION_BADGE.to_string(), "COFFEE_GROWER".to_string()]
        );
    }

    #[test]
    fn test_all_held_grants_nothing() {
        let held = vec![
            COMPLETION_BADGE.to_string(),
            HALFWAY_BADGE.to_string(),
            "COFFEE_GROWER".to_string(),
        ];
        let granted = qualifying_badges(PlanKind::Planting, 100.0, &tags(&["coffee"]), &held);
        assert!(granted.is_empty());
    }
}
