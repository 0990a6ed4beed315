use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::AssignmentWeights;
use super::domain::{CaseDetail, OrganizationProfile};

/// Overdue threshold (days) past which long-arrears specialists count as a specialty match.
pub const LONG_ARREARS_DAYS: u32 = 180;

/// Specialty tags that mark an organization as handling long-arrears portfolios.
pub const LONG_ARREARS_MARKERS: &[&str] = &["长账龄", "long-arrears"];

/// Disposal-days denominator of the speed component.
const DISPOSAL_DAYS_HORIZON: f64 = 180.0;

/// Named assignment strategy selected by the caller.
///
/// Every variant currently scores with [`WeightedSumScorer`]; the name is carried into the
/// result and selects the recommended weight preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    #[default]
    Smart,
    RegionFirst,
    PerformanceFirst,
    LoadBalance,
}

impl AssignmentStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentStrategy::Smart => "smart",
            AssignmentStrategy::RegionFirst => "region_first",
            AssignmentStrategy::PerformanceFirst => "performance_first",
            AssignmentStrategy::LoadBalance => "load_balance",
        }
    }

    pub fn scorer(self) -> &'static dyn MatchScorer {
        static WEIGHTED_SUM: WeightedSumScorer = WeightedSumScorer;
        match self {
            AssignmentStrategy::Smart
            | AssignmentStrategy::RegionFirst
            | AssignmentStrategy::PerformanceFirst
            | AssignmentStrategy::LoadBalance => &WEIGHTED_SUM,
        }
    }

    /// Weight preset for callers that do not supply their own.
    pub const fn recommended_weights(self) -> AssignmentWeights {
        match self {
            AssignmentStrategy::Smart => AssignmentWeights {
                region_weight: 30.0,
                performance_weight: 30.0,
                load_weight: 20.0,
                specialty_weight: 20.0,
            },
            AssignmentStrategy::RegionFirst => AssignmentWeights {
                region_weight: 60.0,
                performance_weight: 20.0,
                load_weight: 10.0,
                specialty_weight: 10.0,
            },
            AssignmentStrategy::PerformanceFirst => AssignmentWeights {
                region_weight: 15.0,
                performance_weight: 55.0,
                load_weight: 15.0,
                specialty_weight: 15.0,
            },
            AssignmentStrategy::LoadBalance => AssignmentWeights {
                region_weight: 20.0,
                performance_weight: 20.0,
                load_weight: 50.0,
                specialty_weight: 10.0,
            },
        }
    }
}

impl fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown assignment strategy '{}' (expected smart, region_first, performance_first or load_balance)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for AssignmentStrategy {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "smart" => Ok(Self::Smart),
            "region" | "region_first" => Ok(Self::RegionFirst),
            "performance" | "performance_first" => Ok(Self::PerformanceFirst),
            "load" | "load_balance" => Ok(Self::LoadBalance),
            _ => Err(UnknownStrategy(value.to_string())),
        }
    }
}

/// Per-criterion contributions behind a match score, kept for audits and the rank view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub region: f64,
    pub performance: f64,
    pub load: f64,
    pub specialty: f64,
    pub raw: f64,
    /// Normalized 0-100 score.
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn region_matched(&self) -> bool {
        self.region > 0.0
    }

    pub fn specialty_matched(&self) -> bool {
        self.specialty > 0.0
    }
}

/// Computes the suitability of one organization for one case.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        case: &CaseDetail,
        organization: &OrganizationProfile,
        weights: &AssignmentWeights,
    ) -> ScoreBreakdown;
}

/// Weighted sum of region, performance, load and specialty terms, normalized to 0-100.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSumScorer;

impl MatchScorer for WeightedSumScorer {
    fn score(
        &self,
        case: &CaseDetail,
        organization: &OrganizationProfile,
        weights: &AssignmentWeights,
    ) -> ScoreBreakdown {
        let region = if case.region == organization.region {
            weights.region_weight
        } else {
            0.0
        };

        let load = if organization.capacity == 0 {
            0.0
        } else {
            weights.load_weight * (1.0 - organization.load_rate())
        };

        // Disposal times past the horizon drive the speed component negative.
        let performance = weights.performance_weight
            * (0.4 * organization.success_rate / 100.0
                + 0.4 * organization.avg_recovery_rate / 100.0
                + 0.2 * (1.0 - organization.avg_disposal_days / DISPOSAL_DAYS_HORIZON));

        let specialty = if specialty_matches(case, organization) {
            weights.specialty_weight
        } else {
            0.0
        };

        let raw = region + load + performance + specialty;
        let total = weights.total();
        let score = if total > 0.0 {
            clamp_score(raw / total * 100.0)
        } else {
            0.0
        };

        ScoreBreakdown {
            region,
            performance,
            load,
            specialty,
            raw,
            score,
        }
    }
}

pub(crate) fn specialty_matches(case: &CaseDetail, organization: &OrganizationProfile) -> bool {
    if organization.has_specialty_containing(&case.product_type) {
        return true;
    }

    case.overdue_days > LONG_ARREARS_DAYS
        && LONG_ARREARS_MARKERS
            .iter()
            .any(|marker| organization.has_specialty_containing(marker))
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
