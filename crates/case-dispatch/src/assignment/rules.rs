use serde::{Deserialize, Serialize};

use super::config::{AssignmentConstraints, CapacityPolicy};
use super::domain::{CaseDetail, OrganizationProfile};
use super::strategy::specialty_matches;

const HIGH_SUCCESS_RATE: f64 = 80.0;
const HIGH_RECOVERY_RATE: f64 = 30.0;
const SPARE_CAPACITY_LOAD_RATE: f64 = 0.7;

/// Why an organization was filtered out before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ineligibility {
    Inactive,
    InvocationCapReached { cap: u32 },
    AtCapacity { current_load: u32, capacity: u32 },
    Excluded,
    RegionMismatch { required: String, actual: String },
}

impl Ineligibility {
    pub fn summary(&self) -> String {
        match self {
            Ineligibility::Inactive => "organization is inactive".to_string(),
            Ineligibility::InvocationCapReached { cap } => {
                format!("already received {cap} case(s) in this run")
            }
            Ineligibility::AtCapacity {
                current_load,
                capacity,
            } => format!("at capacity ({current_load}/{capacity})"),
            Ineligibility::Excluded => "excluded by caller".to_string(),
            Ineligibility::RegionMismatch { required, actual } => {
                format!("region {actual} does not match required {required}")
            }
        }
    }
}

/// Hard gate applied to every organization before it is scored for a case.
///
/// `assigned_so_far` is the number of cases this organization has received earlier in the
/// same run.
pub(crate) fn check_eligibility(
    case: &CaseDetail,
    organization: &OrganizationProfile,
    constraints: &AssignmentConstraints,
    assigned_so_far: u32,
) -> Result<(), Ineligibility> {
    if !organization.is_active {
        return Err(Ineligibility::Inactive);
    }

    if assigned_so_far >= constraints.max_cases_per_org {
        return Err(Ineligibility::InvocationCapReached {
            cap: constraints.max_cases_per_org,
        });
    }

    let effective_load = match constraints.capacity_policy {
        CapacityPolicy::StaticSnapshot => organization.current_load,
        CapacityPolicy::DecrementPerAssignment => {
            organization.current_load.saturating_add(assigned_so_far)
        }
    };
    if effective_load >= organization.capacity {
        return Err(Ineligibility::AtCapacity {
            current_load: effective_load,
            capacity: organization.capacity,
        });
    }

    if constraints.is_excluded(&organization.id) {
        return Err(Ineligibility::Excluded);
    }

    if constraints.require_region_match && organization.region != case.region {
        return Err(Ineligibility::RegionMismatch {
            required: case.region.clone(),
            actual: organization.region.clone(),
        });
    }

    Ok(())
}

/// Human-readable explanation attached to an accepted assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchReason {
    RegionMatch { region: String },
    HighSuccessRate { success_rate: f64 },
    StrongRecoveryRate { recovery_rate: f64 },
    SpecialtyMatch { product_type: String },
    SpareCapacity { load_rate: f64 },
}

impl MatchReason {
    pub fn label(&self) -> String {
        match self {
            MatchReason::RegionMatch { region } => format!("region match ({region})"),
            MatchReason::HighSuccessRate { success_rate } => {
                format!("high success rate ({success_rate:.1}%)")
            }
            MatchReason::StrongRecoveryRate { recovery_rate } => {
                format!("recovery rate {recovery_rate:.1}%")
            }
            MatchReason::SpecialtyMatch { product_type } => {
                format!("specialty match ({product_type})")
            }
            MatchReason::SpareCapacity { load_rate } => {
                format!("spare capacity ({:.0}% utilized)", load_rate * 100.0)
            }
        }
    }
}

pub(crate) fn match_reasons(
    case: &CaseDetail,
    organization: &OrganizationProfile,
) -> Vec<MatchReason> {
    let mut reasons = Vec::new();

    if case.region == organization.region {
        reasons.push(MatchReason::RegionMatch {
            region: organization.region.clone(),
        });
    }

    if organization.success_rate > HIGH_SUCCESS_RATE {
        reasons.push(MatchReason::HighSuccessRate {
            success_rate: organization.success_rate,
        });
    }

    if organization.avg_recovery_rate > HIGH_RECOVERY_RATE {
        reasons.push(MatchReason::StrongRecoveryRate {
            recovery_rate: organization.avg_recovery_rate,
        });
    }

    if specialty_matches(case, organization) {
        reasons.push(MatchReason::SpecialtyMatch {
            product_type: case.product_type.clone(),
        });
    }

    let load_rate = organization.load_rate();
    if load_rate < SPARE_CAPACITY_LOAD_RATE {
        reasons.push(MatchReason::SpareCapacity { load_rate });
    }

    reasons
}
