//! Case-to-organization assignment: eligibility filtering, weighted scoring, greedy
//! selection and per-organization load statistics.

mod config;
mod domain;
mod engine;
mod result;
mod rules;
mod strategy;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::{
    AssignmentConstraints, AssignmentWeights, CapacityPolicy, DEFAULT_MAX_CASES_PER_ORG,
    DEFAULT_MAX_LOAD_RATE, DEFAULT_MIN_MATCH_SCORE,
};
pub use domain::{CaseDetail, CaseId, OrganizationId, OrganizationProfile};
pub use engine::{AssignmentEngine, RankedOrganization};
pub use result::{
    AssignmentResult, AssignmentSummary, CaseAssignment, OrgStats, OrganizationLine,
    UnassignedCase, UnassignedLine, UnassignmentReason,
};
pub use rules::{Ineligibility, MatchReason};
pub use strategy::{
    AssignmentStrategy, MatchScorer, ScoreBreakdown, UnknownStrategy, WeightedSumScorer,
    LONG_ARREARS_DAYS, LONG_ARREARS_MARKERS,
};
pub use validation::{InputIssue, ValidationError};
