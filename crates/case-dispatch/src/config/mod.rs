use std::env;
use std::fmt;

use crate::assignment::{
    AssignmentConstraints, AssignmentEngine, AssignmentStrategy, AssignmentWeights,
    CapacityPolicy, UnknownStrategy, DEFAULT_MAX_CASES_PER_ORG, DEFAULT_MAX_LOAD_RATE,
    DEFAULT_MIN_MATCH_SCORE,
};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub assignment: AssignmentSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let strategy = match env::var("DISPATCH_STRATEGY") {
            Ok(raw) => raw.parse::<AssignmentStrategy>()?,
            Err(_) => AssignmentStrategy::default(),
        };

        let weights = match env::var("DISPATCH_WEIGHTS") {
            Ok(raw) => Some(parse_weights(&raw)?),
            Err(_) => None,
        };

        let max_cases_per_org = match env::var("DISPATCH_MAX_CASES_PER_ORG") {
            Ok(raw) => parse_case_cap(&raw).ok_or(ConfigError::InvalidNumber {
                key: "DISPATCH_MAX_CASES_PER_ORG",
                value: raw,
            })?,
            Err(_) => DEFAULT_MAX_CASES_PER_ORG,
        };

        let min_match_score =
            float_var("DISPATCH_MIN_MATCH_SCORE")?.unwrap_or(DEFAULT_MIN_MATCH_SCORE);
        let max_load_rate = float_var("DISPATCH_MAX_LOAD_RATE")?.unwrap_or(DEFAULT_MAX_LOAD_RATE);

        let require_region_match = match env::var("DISPATCH_REQUIRE_REGION_MATCH") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "DISPATCH_REQUIRE_REGION_MATCH",
                value: raw,
            })?,
            Err(_) => false,
        };

        let capacity_policy = match env::var("DISPATCH_CAPACITY_POLICY") {
            Ok(raw) => {
                CapacityPolicy::parse(&raw).ok_or(ConfigError::InvalidCapacityPolicy(raw))?
            }
            Err(_) => CapacityPolicy::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            assignment: AssignmentSettings {
                strategy,
                weights,
                constraints: AssignmentConstraints {
                    max_cases_per_org,
                    min_match_score,
                    max_load_rate,
                    require_region_match,
                    capacity_policy,
                    ..AssignmentConstraints::default()
                },
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Engine defaults resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSettings {
    pub strategy: AssignmentStrategy,
    /// Explicit weights; `None` falls back to the strategy preset.
    pub weights: Option<AssignmentWeights>,
    pub constraints: AssignmentConstraints,
}

impl AssignmentSettings {
    pub fn effective_weights(&self) -> AssignmentWeights {
        self.weights
            .unwrap_or_else(|| self.strategy.recommended_weights())
    }

    pub fn engine(&self) -> AssignmentEngine {
        AssignmentEngine::with_constraints(
            self.strategy,
            self.effective_weights(),
            self.constraints.clone(),
        )
    }
}

/// Parse `region,performance,load,specialty` weights.
pub fn parse_weights(raw: &str) -> Result<AssignmentWeights, ConfigError> {
    let invalid = || ConfigError::InvalidWeights(raw.to_string());

    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match values.as_slice() {
        [region, performance, load, specialty]
            if values.iter().all(|value| value.is_finite() && *value >= 0.0) =>
        {
            Ok(AssignmentWeights {
                region_weight: *region,
                performance_weight: *performance,
                load_weight: *load,
                specialty_weight: *specialty,
            })
        }
        _ => Err(invalid()),
    }
}

/// Finite decimal such as a score threshold or load rate. `NaN` and infinities are refused.
pub fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Per-organization case cap; zero would block every assignment.
pub fn parse_case_cap(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
}

/// Boolean words shared by environment variables and CSV columns.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn float_var(key: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(key) {
        Ok(raw) => parse_finite(&raw)
            .map(Some)
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidStrategy(UnknownStrategy),
    InvalidWeights(String),
    InvalidNumber { key: &'static str, value: String },
    InvalidFlag { key: &'static str, value: String },
    InvalidCapacityPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStrategy(err) => write!(f, "DISPATCH_STRATEGY: {err}"),
            ConfigError::InvalidWeights(value) => write!(
                f,
                "weights must be four non-negative numbers 'region,performance,load,specialty' (got '{value}')"
            ),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a valid number (got '{value}')")
            }
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be true or false (got '{value}')")
            }
            ConfigError::InvalidCapacityPolicy(value) => write!(
                f,
                "DISPATCH_CAPACITY_POLICY must be 'static' or 'decrement' (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidStrategy(err) => Some(err),
            ConfigError::InvalidWeights(_)
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidCapacityPolicy(_) => None,
        }
    }
}

impl From<UnknownStrategy> for ConfigError {
    fn from(value: UnknownStrategy) -> Self {
        Self::InvalidStrategy(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "DISPATCH_STRATEGY",
            "DISPATCH_WEIGHTS",
            "DISPATCH_MAX_CASES_PER_ORG",
            "DISPATCH_MIN_MATCH_SCORE",
            "DISPATCH_MAX_LOAD_RATE",
            "DISPATCH_REQUIRE_REGION_MATCH",
            "DISPATCH_CAPACITY_POLICY",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.assignment.strategy, AssignmentStrategy::Smart);
        assert_eq!(config.assignment.weights, None);
        assert_eq!(config.assignment.constraints, AssignmentConstraints::default());
    }

    #[test]
    fn load_reads_assignment_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("DISPATCH_STRATEGY", "region_first");
        env::set_var("DISPATCH_WEIGHTS", "1, 2, 3, 4");
        env::set_var("DISPATCH_MAX_CASES_PER_ORG", "12");
        env::set_var("DISPATCH_MIN_MATCH_SCORE", "45.5");
        env::set_var("DISPATCH_REQUIRE_REGION_MATCH", "yes");
        env::set_var("DISPATCH_CAPACITY_POLICY", "decrement");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        let settings = &config.assignment;
        assert_eq!(settings.strategy, AssignmentStrategy::RegionFirst);
        assert_eq!(settings.effective_weights().load_weight, 3.0);
        assert_eq!(settings.constraints.max_cases_per_org, 12);
        assert_eq!(settings.constraints.min_match_score, 45.5);
        assert!(settings.constraints.require_region_match);
        assert_eq!(
            settings.constraints.capacity_policy,
            CapacityPolicy::DecrementPerAssignment
        );
        assert_eq!(settings.engine().strategy(), AssignmentStrategy::RegionFirst);
    }

    #[test]
    fn rejects_unknown_strategy_and_bad_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DISPATCH_STRATEGY", "lottery");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidStrategy(_))
        ));

        reset_env();
        env::set_var("DISPATCH_MAX_CASES_PER_ORG", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                key: "DISPATCH_MAX_CASES_PER_ORG",
                ..
            })
        ));
        reset_env();
    }

    #[test]
    fn numeric_helpers_refuse_disabling_values() {
        assert_eq!(parse_finite(" 72.5 "), Some(72.5));
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_case_cap("3"), Some(3));
        assert_eq!(parse_case_cap("0"), None);
        assert_eq!(parse_case_cap("-1"), None);
    }

    #[test]
    fn flags_accept_short_and_long_words() {
        for raw in ["1", "true", "Yes", "y", "ON"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["0", "false", "no", "N", "off"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn load_rejects_nan_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DISPATCH_MIN_MATCH_SCORE", "NaN");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                key: "DISPATCH_MIN_MATCH_SCORE",
                ..
            })
        ));
        reset_env();
    }

    #[test]
    fn parse_weights_requires_four_non_negative_values() {
        let weights = parse_weights("30,30,20,20").expect("weights parse");
        assert_eq!(weights.total(), 100.0);
        assert!(parse_weights("30,30,20").is_err());
        assert!(parse_weights("30,-1,20,20").is_err());
        assert!(parse_weights("a,b,c,d").is_err());
    }
}
