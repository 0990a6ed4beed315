//! Optional fail-fast checks for callers that prefer rejecting malformed batches over the
//! engine's default of scoring them as-is.

use std::collections::HashSet;
use std::fmt;

use super::config::{AssignmentConstraints, AssignmentWeights};
use super::domain::{CaseDetail, CaseId, OrganizationId, OrganizationProfile};

/// Single problem found in the engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputIssue {
    InvalidWeight { name: &'static str, value: f64 },
    AllWeightsZero,
    MinMatchScoreOutOfRange(f64),
    ZeroCaseCap,
    InvalidAmount { case_id: CaseId, field: &'static str, value: f64 },
    DuplicateCase(CaseId),
    ZeroCapacity(OrganizationId),
    OverCapacity { org_id: OrganizationId, current_load: u32, capacity: u32 },
    RateOutOfRange { org_id: OrganizationId, field: &'static str, value: f64 },
    InvalidDisposalDays { org_id: OrganizationId, value: f64 },
    DuplicateOrganization(OrganizationId),
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputIssue::InvalidWeight { name, value } => {
                write!(f, "{name} must be a finite non-negative number (got {value})")
            }
            InputIssue::AllWeightsZero => write!(f, "at least one weight must be positive"),
            InputIssue::MinMatchScoreOutOfRange(value) => {
                write!(f, "minMatchScore must be within 0-100 (got {value})")
            }
            InputIssue::ZeroCaseCap => write!(f, "maxCasesPerOrg must be positive"),
            InputIssue::InvalidAmount {
                case_id,
                field,
                value,
            } => write!(f, "case {case_id}: {field} must be non-negative (got {value})"),
            InputIssue::DuplicateCase(id) => write!(f, "case {id} appears more than once"),
            InputIssue::ZeroCapacity(id) => write!(f, "organization {id} has zero capacity"),
            InputIssue::OverCapacity {
                org_id,
                current_load,
                capacity,
            } => write!(
                f,
                "organization {org_id}: current load {current_load} exceeds capacity {capacity}"
            ),
            InputIssue::RateOutOfRange {
                org_id,
                field,
                value,
            } => write!(f, "organization {org_id}: {field} must be within 0-100 (got {value})"),
            InputIssue::InvalidDisposalDays { org_id, value } => write!(
                f,
                "organization {org_id}: avgDisposalDays must be positive (got {value})"
            ),
            InputIssue::DuplicateOrganization(id) => {
                write!(f, "organization {id} appears more than once")
            }
        }
    }
}

/// Raised by strict execution when the inputs fail validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid assignment input: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<InputIssue>,
}

fn join_issues(issues: &[InputIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate(
    cases: &[CaseDetail],
    organizations: &[OrganizationProfile],
    weights: &AssignmentWeights,
    constraints: &AssignmentConstraints,
) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    let named_weights = [
        ("regionWeight", weights.region_weight),
        ("performanceWeight", weights.performance_weight),
        ("loadWeight", weights.load_weight),
        ("specialtyWeight", weights.specialty_weight),
    ];
    for (name, value) in named_weights {
        if !value.is_finite() || value < 0.0 {
            issues.push(InputIssue::InvalidWeight { name, value });
        }
    }
    if weights.is_degenerate() {
        issues.push(InputIssue::AllWeightsZero);
    }

    if !(0.0..=100.0).contains(&constraints.min_match_score) {
        issues.push(InputIssue::MinMatchScoreOutOfRange(
            constraints.min_match_score,
        ));
    }
    if constraints.max_cases_per_org == 0 {
        issues.push(InputIssue::ZeroCaseCap);
    }

    let mut seen_cases = HashSet::new();
    for case in cases {
        for (field, value) in [
            ("loanAmount", case.loan_amount),
            ("remainingAmount", case.remaining_amount),
        ] {
            if !value.is_finite() || value < 0.0 {
                issues.push(InputIssue::InvalidAmount {
                    case_id: case.id.clone(),
                    field,
                    value,
                });
            }
        }
        if !seen_cases.insert(&case.id) {
            issues.push(InputIssue::DuplicateCase(case.id.clone()));
        }
    }

    let mut seen_orgs = HashSet::new();
    for org in organizations {
        if org.capacity == 0 {
            issues.push(InputIssue::ZeroCapacity(org.id.clone()));
        } else if org.current_load > org.capacity {
            issues.push(InputIssue::OverCapacity {
                org_id: org.id.clone(),
                current_load: org.current_load,
                capacity: org.capacity,
            });
        }

        for (field, value) in [
            ("successRate", org.success_rate),
            ("avgRecoveryRate", org.avg_recovery_rate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                issues.push(InputIssue::RateOutOfRange {
                    org_id: org.id.clone(),
                    field,
                    value,
                });
            }
        }

        if org.avg_disposal_days.is_nan() || org.avg_disposal_days <= 0.0 {
            issues.push(InputIssue::InvalidDisposalDays {
                org_id: org.id.clone(),
                value: org.avg_disposal_days,
            });
        }

        if !seen_orgs.insert(&org.id) {
            issues.push(InputIssue::DuplicateOrganization(org.id.clone()));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}
