use super::common::*;
use crate::assignment::rules::{check_eligibility, match_reasons};
use crate::assignment::{AssignmentConstraints, CapacityPolicy, Ineligibility, MatchReason};

#[test]
fn active_organization_with_headroom_is_eligible() {
    let constraints = AssignmentConstraints::default();
    let result = check_eligibility(
        &case("c1", "Shanghai", "credit card"),
        &strong_org("a"),
        &constraints,
        0,
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn inactive_organization_is_rejected_first() {
    let mut org = strong_org("a");
    org.is_active = false;
    let constraints = AssignmentConstraints {
        excluded_org_ids: vec![org_id("a")],
        ..AssignmentConstraints::default()
    };

    let result = check_eligibility(&case("c1", "Shanghai", "credit card"), &org, &constraints, 0);
    assert_eq!(result, Err(Ineligibility::Inactive));
}

#[test]
fn invocation_cap_blocks_further_cases() {
    let constraints = AssignmentConstraints {
        max_cases_per_org: 2,
        ..AssignmentConstraints::default()
    };

    let result = check_eligibility(
        &case("c1", "Shanghai", "credit card"),
        &strong_org("a"),
        &constraints,
        2,
    );
    assert_eq!(result, Err(Ineligibility::InvocationCapReached { cap: 2 }));
}

#[test]
fn static_capacity_ignores_cases_assigned_in_the_run() {
    let mut org = strong_org("a");
    org.capacity = 1;
    org.current_load = 0;
    let constraints = AssignmentConstraints::default();

    let result = check_eligibility(&case("c1", "Shanghai", "credit card"), &org, &constraints, 5);
    assert_eq!(result, Ok(()));
}

#[test]
fn decrement_policy_counts_cases_assigned_in_the_run() {
    let mut org = strong_org("a");
    org.capacity = 3;
    org.current_load = 1;
    let constraints = AssignmentConstraints {
        capacity_policy: CapacityPolicy::DecrementPerAssignment,
        ..AssignmentConstraints::default()
    };

    let case = case("c1", "Shanghai", "credit card");
    assert_eq!(check_eligibility(&case, &org, &constraints, 1), Ok(()));
    assert_eq!(
        check_eligibility(&case, &org, &constraints, 2),
        Err(Ineligibility::AtCapacity {
            current_load: 3,
            capacity: 3,
        })
    );
}

#[test]
fn full_organization_is_rejected() {
    let mut org = strong_org("a");
    org.current_load = org.capacity;

    let result = check_eligibility(
        &case("c1", "Shanghai", "credit card"),
        &org,
        &AssignmentConstraints::default(),
        0,
    );
    assert!(matches!(result, Err(Ineligibility::AtCapacity { .. })));
}

#[test]
fn excluded_organization_is_rejected() {
    let constraints = AssignmentConstraints {
        excluded_org_ids: vec![org_id("a")],
        ..AssignmentConstraints::default()
    };

    let result = check_eligibility(
        &case("c1", "Shanghai", "credit card"),
        &strong_org("a"),
        &constraints,
        0,
    );
    assert_eq!(result, Err(Ineligibility::Excluded));
}

#[test]
fn region_requirement_rejects_other_regions() {
    let constraints = AssignmentConstraints {
        require_region_match: true,
        ..AssignmentConstraints::default()
    };

    let result = check_eligibility(
        &case("c1", "Shanghai", "credit card"),
        &weak_org("b"),
        &constraints,
        0,
    );
    match result {
        Err(Ineligibility::RegionMismatch { required, actual }) => {
            assert_eq!(required, "Shanghai");
            assert_eq!(actual, "Beijing");
        }
        other => panic!("expected region mismatch, got {other:?}"),
    }
}

#[test]
fn strong_match_reports_every_reason() {
    let reasons = match_reasons(&case("c1", "Shanghai", "credit card"), &strong_org("a"));

    assert_eq!(
        reasons,
        vec![
            MatchReason::RegionMatch {
                region: "Shanghai".to_string()
            },
            MatchReason::HighSuccessRate { success_rate: 85.0 },
            MatchReason::StrongRecoveryRate {
                recovery_rate: 35.0
            },
            MatchReason::SpecialtyMatch {
                product_type: "credit card".to_string()
            },
            MatchReason::SpareCapacity { load_rate: 0.2 },
        ]
    );
    assert_eq!(reasons[4].label(), "spare capacity (20% utilized)");
}

#[test]
fn weak_match_reports_nothing() {
    assert!(match_reasons(&case("c1", "Shanghai", "credit card"), &weak_org("b")).is_empty());
}
