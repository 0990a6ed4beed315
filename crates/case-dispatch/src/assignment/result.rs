use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CaseId, OrganizationId};
use super::rules::MatchReason;
use super::strategy::AssignmentStrategy;

/// Why a case left the run without an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnassignmentReason {
    NoEligibleOrganization,
    BelowThreshold {
        best_org_id: OrganizationId,
        score: f64,
        required: f64,
    },
}

impl UnassignmentReason {
    pub fn summary(&self) -> String {
        match self {
            UnassignmentReason::NoEligibleOrganization => {
                "no eligible disposal organization".to_string()
            }
            UnassignmentReason::BelowThreshold {
                best_org_id,
                score,
                required,
            } => format!(
                "best match score {:.1} (organization {}) below required {:.1}",
                score, best_org_id, required
            ),
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            UnassignmentReason::NoEligibleOrganization => {
                "relax the assignment constraints or add organization capacity".to_string()
            }
            UnassignmentReason::BelowThreshold { .. } => {
                "adjust the scoring weights or lower the minimum match score".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedCase {
    pub case_id: CaseId,
    pub case_code: String,
    pub reason: UnassignmentReason,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseAssignment {
    pub case_id: CaseId,
    pub case_code: String,
    pub org_id: OrganizationId,
    pub org_name: String,
    pub match_score: f64,
    pub match_reasons: Vec<MatchReason>,
}

/// Aggregate for one organization that received at least one case in the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgStats {
    pub org_id: OrganizationId,
    pub org_name: String,
    pub assigned_count: u32,
    /// Sum of the remaining amounts of the assigned cases.
    pub total_amount: f64,
    pub avg_score: f64,
    /// `(current_load + assigned_count) / capacity`.
    pub expected_load_rate: f64,
    pub exceeds_max_load_rate: bool,
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    pub strategy: AssignmentStrategy,
    pub total_cases: usize,
    pub assigned_cases: usize,
    pub failed_cases: usize,
    /// Percentage of assigned cases; 0 for an empty batch.
    pub success_rate: f64,
    pub avg_match_score: f64,
    pub unassigned_cases: Vec<UnassignedCase>,
    pub case_assignments: Vec<CaseAssignment>,
    pub org_stats: Vec<OrgStats>,
    pub execution_time: Duration,
    pub timestamp: DateTime<Utc>,
}

impl AssignmentResult {
    pub fn assignment_for(&self, case_id: &CaseId) -> Option<&CaseAssignment> {
        self.case_assignments
            .iter()
            .find(|assignment| &assignment.case_id == case_id)
    }

    pub fn stats_for(&self, org_id: &OrganizationId) -> Option<&OrgStats> {
        self.org_stats.iter().find(|stats| &stats.org_id == org_id)
    }

    pub fn summary(&self) -> AssignmentSummary {
        let organizations = self
            .org_stats
            .iter()
            .map(|stats| OrganizationLine {
                org_name: stats.org_name.clone(),
                assigned_count: stats.assigned_count,
                total_amount: stats.total_amount,
                avg_score: stats.avg_score,
                expected_load_rate: stats.expected_load_rate,
                over_limit: stats.exceeds_max_load_rate,
            })
            .collect();

        let unassigned = self
            .unassigned_cases
            .iter()
            .map(|case| UnassignedLine {
                case_code: case.case_code.clone(),
                reason: case.reason.summary(),
                suggestion: case.suggestion.clone(),
            })
            .collect();

        AssignmentSummary {
            strategy_label: self.strategy.label(),
            total_cases: self.total_cases,
            assigned_cases: self.assigned_cases,
            failed_cases: self.failed_cases,
            success_rate: self.success_rate,
            avg_match_score: self.avg_match_score,
            elapsed_ms: self.execution_time.as_secs_f64() * 1000.0,
            organizations,
            unassigned,
        }
    }
}

/// Flattened, display-ready view of an [`AssignmentResult`].
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub strategy_label: &'static str,
    pub total_cases: usize,
    pub assigned_cases: usize,
    pub failed_cases: usize,
    pub success_rate: f64,
    pub avg_match_score: f64,
    pub elapsed_ms: f64,
    pub organizations: Vec<OrganizationLine>,
    pub unassigned: Vec<UnassignedLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationLine {
    pub org_name: String,
    pub assigned_count: u32,
    pub total_amount: f64,
    pub avg_score: f64,
    pub expected_load_rate: f64,
    pub over_limit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnassignedLine {
    pub case_code: String,
    pub reason: String,
    pub suggestion: Option<String>,
}
