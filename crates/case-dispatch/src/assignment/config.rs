use serde::{Deserialize, Serialize};

use super::domain::OrganizationId;

pub const DEFAULT_MAX_CASES_PER_ORG: u32 = 100;
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 60.0;
pub const DEFAULT_MAX_LOAD_RATE: f64 = 0.9;

/// Relative weights of the four scoring criteria. Only their ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWeights {
    pub region_weight: f64,
    pub performance_weight: f64,
    pub load_weight: f64,
    pub specialty_weight: f64,
}

impl AssignmentWeights {
    pub fn total(&self) -> f64 {
        self.region_weight + self.performance_weight + self.load_weight + self.specialty_weight
    }

    /// True when no criterion can contribute, which forces every score to 0.
    pub fn is_degenerate(&self) -> bool {
        self.total() <= 0.0
    }
}

/// How the declared organization capacity is checked while a batch is being assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Compare the roster's static `current_load` against `capacity`. Assignments made during
    /// the same run only count toward `max_cases_per_org`, so an organization with one free
    /// slot can still take up to `max_cases_per_org` cases in a single run.
    #[default]
    StaticSnapshot,
    /// Count assignments made during the run against the remaining capacity as well.
    DecrementPerAssignment,
}

impl CapacityPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            CapacityPolicy::StaticSnapshot => "static",
            CapacityPolicy::DecrementPerAssignment => "decrement",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" | "static_snapshot" | "snapshot" => Some(Self::StaticSnapshot),
            "decrement" | "decrement_per_assignment" => Some(Self::DecrementPerAssignment),
            _ => None,
        }
    }
}

/// Hard limits applied on top of the scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentConstraints {
    pub max_cases_per_org: u32,
    pub min_match_score: f64,
    /// Reported against in the per-organization stats; never used to refuse a case.
    pub max_load_rate: f64,
    pub require_region_match: bool,
    /// Accepted for callers that track preferences; the weighted-sum scorer ignores it.
    pub preferred_org_ids: Vec<OrganizationId>,
    pub excluded_org_ids: Vec<OrganizationId>,
    pub capacity_policy: CapacityPolicy,
}

impl Default for AssignmentConstraints {
    fn default() -> Self {
        Self {
            max_cases_per_org: DEFAULT_MAX_CASES_PER_ORG,
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            max_load_rate: DEFAULT_MAX_LOAD_RATE,
            require_region_match: false,
            preferred_org_ids: Vec::new(),
            excluded_org_ids: Vec::new(),
            capacity_policy: CapacityPolicy::default(),
        }
    }
}

impl AssignmentConstraints {
    pub fn is_excluded(&self, id: &OrganizationId) -> bool {
        self.excluded_org_ids.iter().any(|excluded| excluded == id)
    }
}
