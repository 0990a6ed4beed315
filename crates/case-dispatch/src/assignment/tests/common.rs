use crate::assignment::domain::{CaseDetail, CaseId, OrganizationId, OrganizationProfile};
use crate::assignment::{
    AssignmentConstraints, AssignmentEngine, AssignmentStrategy, AssignmentWeights,
};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn weights() -> AssignmentWeights {
    AssignmentStrategy::Smart.recommended_weights()
}

pub(super) fn zero_weights() -> AssignmentWeights {
    AssignmentWeights {
        region_weight: 0.0,
        performance_weight: 0.0,
        load_weight: 0.0,
        specialty_weight: 0.0,
    }
}

pub(super) fn engine() -> AssignmentEngine {
    AssignmentEngine::new(AssignmentStrategy::Smart, weights())
}

pub(super) fn engine_with(constraints: AssignmentConstraints) -> AssignmentEngine {
    AssignmentEngine::with_constraints(AssignmentStrategy::Smart, weights(), constraints)
}

pub(super) fn case(id: &str, region: &str, product_type: &str) -> CaseDetail {
    CaseDetail {
        id: CaseId(id.to_string()),
        case_code: format!("AJ-{id}"),
        debtor_name: "Li Wei".to_string(),
        debtor_id_card: "310101199001011234".to_string(),
        debtor_phone: Some("13800000000".to_string()),
        loan_amount: 50_000.0,
        remaining_amount: 32_000.0,
        overdue_days: 90,
        region: region.to_string(),
        product_type: product_type.to_string(),
        account_age: 18,
    }
}

/// Strong Shanghai credit-card specialist at 20% load. Scores 84.4 against
/// `case(_, "Shanghai", "credit card")` with the smart weights.
pub(super) fn strong_org(id: &str) -> OrganizationProfile {
    OrganizationProfile {
        id: OrganizationId(id.to_string()),
        name: format!("{id} Recovery"),
        region: "Shanghai".to_string(),
        capacity: 100,
        current_load: 20,
        success_rate: 85.0,
        avg_recovery_rate: 35.0,
        avg_disposal_days: 60.0,
        specialties: vec!["credit card".to_string()],
        rating: 4.5,
        is_active: true,
    }
}

/// Busy Beijing mortgage shop. Scores 9.0 against a Shanghai credit-card case.
pub(super) fn weak_org(id: &str) -> OrganizationProfile {
    OrganizationProfile {
        id: OrganizationId(id.to_string()),
        name: format!("{id} Collections"),
        region: "Beijing".to_string(),
        capacity: 100,
        current_load: 90,
        success_rate: 40.0,
        avg_recovery_rate: 10.0,
        avg_disposal_days: 150.0,
        specialties: vec!["mortgage".to_string()],
        rating: 2.0,
        is_active: true,
    }
}

pub(super) fn org_id(id: &str) -> OrganizationId {
    OrganizationId(id.to_string())
}

pub(super) fn case_id(id: &str) -> CaseId {
    CaseId(id.to_string())
}
