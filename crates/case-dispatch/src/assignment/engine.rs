use std::cmp::Ordering;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{AssignmentConstraints, AssignmentWeights};
use super::domain::{CaseDetail, OrganizationId, OrganizationProfile};
use super::result::{
    AssignmentResult, CaseAssignment, OrgStats, UnassignedCase, UnassignmentReason,
};
use super::rules::{self, Ineligibility};
use super::strategy::{AssignmentStrategy, ScoreBreakdown};
use super::validation::{self, ValidationError};

/// Greedy case-to-organization allocator.
///
/// The engine only holds its configuration. Every call to [`AssignmentEngine::execute`]
/// works on the snapshots it is given and keeps its own per-run counters, so one engine can
/// be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentEngine {
    strategy: AssignmentStrategy,
    weights: AssignmentWeights,
    constraints: AssignmentConstraints,
}

/// Organization scored against a single case, as reported by [`AssignmentEngine::rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOrganization {
    pub org_id: OrganizationId,
    pub org_name: String,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ineligible: Option<Ineligibility>,
}

#[derive(Debug, Clone, Copy, Default)]
struct OrgTally {
    assigned: u32,
    total_amount: f64,
    score_sum: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    breakdown: ScoreBreakdown,
}

impl AssignmentEngine {
    pub fn new(strategy: AssignmentStrategy, weights: AssignmentWeights) -> Self {
        Self::with_constraints(strategy, weights, AssignmentConstraints::default())
    }

    pub fn with_constraints(
        strategy: AssignmentStrategy,
        weights: AssignmentWeights,
        constraints: AssignmentConstraints,
    ) -> Self {
        Self {
            strategy,
            weights,
            constraints,
        }
    }

    pub fn strategy(&self) -> AssignmentStrategy {
        self.strategy
    }

    pub fn weights(&self) -> &AssignmentWeights {
        &self.weights
    }

    pub fn constraints(&self) -> &AssignmentConstraints {
        &self.constraints
    }

    /// Assign `cases` in order, each to its best-scoring eligible organization.
    ///
    /// Earlier cases win contested capacity. A case is never revisited once it has been
    /// assigned or skipped.
    pub fn execute(
        &self,
        cases: &[CaseDetail],
        organizations: &[OrganizationProfile],
    ) -> AssignmentResult {
        let started = Instant::now();
        let scorer = self.strategy.scorer();
        let constraints = &self.constraints;

        if !constraints.preferred_org_ids.is_empty() {
            debug!(
                preferred = constraints.preferred_org_ids.len(),
                "preferred organizations are not weighted by the scorer"
            );
        }

        let mut tallies = vec![OrgTally::default(); organizations.len()];
        let mut case_assignments = Vec::new();
        let mut unassigned_cases = Vec::new();

        for case in cases {
            let mut candidates: Vec<Candidate> = organizations
                .iter()
                .enumerate()
                .filter_map(|(index, org)| {
                    rules::check_eligibility(case, org, constraints, tallies[index].assigned)
                        .ok()?;
                    Some(Candidate {
                        index,
                        breakdown: scorer.score(case, org, &self.weights),
                    })
                })
                .collect();

            if candidates.is_empty() {
                debug!(case_id = %case.id, "no eligible organization");
                unassigned_cases.push(unassigned(
                    case,
                    UnassignmentReason::NoEligibleOrganization,
                ));
                continue;
            }

            // sort_by is stable, so equal scores keep roster order.
            candidates.sort_by(|a, b| {
                b.breakdown
                    .score
                    .partial_cmp(&a.breakdown.score)
                    .unwrap_or(Ordering::Equal)
            });
            let best = candidates[0];
            let org = &organizations[best.index];
            let score = best.breakdown.score;

            if score < constraints.min_match_score {
                debug!(
                    case_id = %case.id,
                    org_id = %org.id,
                    score,
                    required = constraints.min_match_score,
                    "best match below threshold"
                );
                unassigned_cases.push(unassigned(
                    case,
                    UnassignmentReason::BelowThreshold {
                        best_org_id: org.id.clone(),
                        score,
                        required: constraints.min_match_score,
                    },
                ));
                continue;
            }

            let tally = &mut tallies[best.index];
            tally.assigned += 1;
            tally.total_amount += case.remaining_amount;
            tally.score_sum += score;

            debug!(case_id = %case.id, org_id = %org.id, score, "case assigned");
            case_assignments.push(CaseAssignment {
                case_id: case.id.clone(),
                case_code: case.case_code.clone(),
                org_id: org.id.clone(),
                org_name: org.name.clone(),
                match_score: score,
                match_reasons: rules::match_reasons(case, org),
            });
        }

        let org_stats = self.org_stats(organizations, &tallies);

        let total_cases = cases.len();
        let assigned_cases = case_assignments.len();
        let failed_cases = unassigned_cases.len();
        let success_rate = if total_cases == 0 {
            0.0
        } else {
            assigned_cases as f64 / total_cases as f64 * 100.0
        };
        let avg_match_score = if assigned_cases == 0 {
            0.0
        } else {
            case_assignments
                .iter()
                .map(|assignment| assignment.match_score)
                .sum::<f64>()
                / assigned_cases as f64
        };

        let execution_time = started.elapsed();
        info!(
            strategy = %self.strategy,
            total_cases,
            assigned_cases,
            failed_cases,
            elapsed_ms = execution_time.as_secs_f64() * 1000.0,
            "assignment run complete"
        );

        AssignmentResult {
            strategy: self.strategy,
            total_cases,
            assigned_cases,
            failed_cases,
            success_rate,
            avg_match_score,
            unassigned_cases,
            case_assignments,
            org_stats,
            execution_time,
            timestamp: Utc::now(),
        }
    }

    /// Like [`AssignmentEngine::execute`], but refuses malformed inputs up front.
    pub fn execute_strict(
        &self,
        cases: &[CaseDetail],
        organizations: &[OrganizationProfile],
    ) -> Result<AssignmentResult, ValidationError> {
        validation::validate(cases, organizations, &self.weights, &self.constraints)?;
        Ok(self.execute(cases, organizations))
    }

    /// Score every organization for one case without assigning anything.
    ///
    /// Eligibility is evaluated as if the case were the first of a fresh run. Eligible
    /// organizations come first, ordered like the selection step of `execute`.
    pub fn rank(
        &self,
        case: &CaseDetail,
        organizations: &[OrganizationProfile],
    ) -> Vec<RankedOrganization> {
        let scorer = self.strategy.scorer();
        let mut ranked: Vec<RankedOrganization> = organizations
            .iter()
            .map(|org| RankedOrganization {
                org_id: org.id.clone(),
                org_name: org.name.clone(),
                breakdown: scorer.score(case, org, &self.weights),
                ineligible: rules::check_eligibility(case, org, &self.constraints, 0).err(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            a.ineligible
                .is_some()
                .cmp(&b.ineligible.is_some())
                .then_with(|| {
                    b.breakdown
                        .score
                        .partial_cmp(&a.breakdown.score)
                        .unwrap_or(Ordering::Equal)
                })
        });
        ranked
    }

    fn org_stats(
        &self,
        organizations: &[OrganizationProfile],
        tallies: &[OrgTally],
    ) -> Vec<OrgStats> {
        organizations
            .iter()
            .zip(tallies)
            .filter(|(_, tally)| tally.assigned > 0)
            .map(|(org, tally)| {
                let expected_load_rate = if org.capacity == 0 {
                    0.0
                } else {
                    (org.current_load as f64 + tally.assigned as f64) / org.capacity as f64
                };
                let exceeds_max_load_rate = expected_load_rate > self.constraints.max_load_rate;
                if exceeds_max_load_rate {
                    warn!(
                        org_id = %org.id,
                        expected_load_rate,
                        max_load_rate = self.constraints.max_load_rate,
                        "organization load exceeds configured maximum"
                    );
                }

                OrgStats {
                    org_id: org.id.clone(),
                    org_name: org.name.clone(),
                    assigned_count: tally.assigned,
                    total_amount: tally.total_amount,
                    avg_score: tally.score_sum / tally.assigned as f64,
                    expected_load_rate,
                    exceeds_max_load_rate,
                }
            })
            .collect()
    }
}

fn unassigned(case: &CaseDetail, reason: UnassignmentReason) -> UnassignedCase {
    UnassignedCase {
        case_id: case.id.clone(),
        case_code: case.case_code.clone(),
        suggestion: Some(reason.suggestion()),
        reason,
    }
}
