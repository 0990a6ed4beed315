use crate::commands::{run_assign, run_demo, run_rank};
use case_dispatch::assignment::{
    AssignmentStrategy, AssignmentWeights, CapacityPolicy, OrganizationId,
};
use case_dispatch::config::{
    parse_case_cap, parse_finite, parse_weights, AppConfig, AssignmentSettings,
};
use case_dispatch::error::AppError;
use case_dispatch::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "case-dispatch",
    about = "Score debt cases against disposal organizations and plan assignments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assign a case batch to an organization roster
    Assign(AssignArgs),
    /// Show how every organization scores for a single case
    Rank(RankArgs),
    /// Run the engine over a built-in synthetic batch
    Demo(DemoArgs),
}

/// Engine overrides layered on top of the environment configuration.
#[derive(Args, Debug, Default)]
pub(crate) struct EngineArgs {
    /// Strategy name (smart, region_first, performance_first, load_balance)
    #[arg(long)]
    pub(crate) strategy: Option<AssignmentStrategy>,
    /// Weights as region,performance,load,specialty
    #[arg(long, value_parser = parse_weights_arg)]
    pub(crate) weights: Option<AssignmentWeights>,
    /// Minimum accepted match score (0-100)
    #[arg(long, value_parser = parse_finite_arg)]
    pub(crate) min_match_score: Option<f64>,
    /// Maximum cases one organization may receive in this run
    #[arg(long, value_parser = parse_case_cap_arg)]
    pub(crate) max_cases_per_org: Option<u32>,
    /// Load rate above which organization stats are flagged
    #[arg(long, value_parser = parse_finite_arg)]
    pub(crate) max_load_rate: Option<f64>,
    /// Only consider organizations in the case's region
    #[arg(long)]
    pub(crate) require_region_match: bool,
    /// Organization id to leave out (repeatable)
    #[arg(long = "exclude")]
    pub(crate) excluded: Vec<String>,
    /// Preferred organization id (repeatable, informational)
    #[arg(long = "prefer")]
    pub(crate) preferred: Vec<String>,
    /// Capacity check: static or decrement
    #[arg(long, value_parser = parse_capacity_policy)]
    pub(crate) capacity_policy: Option<CapacityPolicy>,
}

impl EngineArgs {
    pub(crate) fn apply(self, settings: &mut AssignmentSettings) {
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(weights) = self.weights {
            settings.weights = Some(weights);
        }

        let constraints = &mut settings.constraints;
        if let Some(score) = self.min_match_score {
            constraints.min_match_score = score;
        }
        if let Some(cap) = self.max_cases_per_org {
            constraints.max_cases_per_org = cap;
        }
        if let Some(rate) = self.max_load_rate {
            constraints.max_load_rate = rate;
        }
        if self.require_region_match {
            constraints.require_region_match = true;
        }
        if let Some(policy) = self.capacity_policy {
            constraints.capacity_policy = policy;
        }
        constraints
            .excluded_org_ids
            .extend(self.excluded.into_iter().map(OrganizationId));
        constraints
            .preferred_org_ids
            .extend(self.preferred.into_iter().map(OrganizationId));
    }
}

#[derive(Args, Debug)]
pub(crate) struct AssignArgs {
    /// Case batch export (.csv or .json)
    #[arg(long)]
    pub(crate) cases: PathBuf,
    /// Organization roster export (.csv or .json)
    #[arg(long)]
    pub(crate) organizations: PathBuf,
    #[command(flatten)]
    pub(crate) engine: EngineArgs,
    /// Reject malformed input instead of scoring it as-is
    #[arg(long)]
    pub(crate) strict: bool,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Case batch export (.csv or .json)
    #[arg(long)]
    pub(crate) cases: PathBuf,
    /// Organization roster export (.csv or .json)
    #[arg(long)]
    pub(crate) organizations: PathBuf,
    /// Id of the case to rank organizations for
    #[arg(long)]
    pub(crate) case_id: String,
    #[command(flatten)]
    pub(crate) engine: EngineArgs,
    /// Print the ranking as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) engine: EngineArgs,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let settings = config.assignment;
    match cli.command {
        Command::Assign(args) => run_assign(args, settings),
        Command::Rank(args) => run_rank(args, settings),
        Command::Demo(args) => run_demo(args, settings),
    }
}

fn parse_weights_arg(raw: &str) -> Result<AssignmentWeights, String> {
    parse_weights(raw).map_err(|err| err.to_string())
}

fn parse_finite_arg(raw: &str) -> Result<f64, String> {
    parse_finite(raw).ok_or_else(|| format!("expected a finite number, got '{raw}'"))
}

fn parse_case_cap_arg(raw: &str) -> Result<u32, String> {
    parse_case_cap(raw).ok_or_else(|| format!("expected a positive whole number, got '{raw}'"))
}

fn parse_capacity_policy(raw: &str) -> Result<CapacityPolicy, String> {
    CapacityPolicy::parse(raw).ok_or_else(|| format!("unknown capacity policy '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_dispatch::assignment::AssignmentConstraints;

    fn settings() -> AssignmentSettings {
        AssignmentSettings {
            strategy: AssignmentStrategy::Smart,
            weights: None,
            constraints: AssignmentConstraints::default(),
        }
    }

    #[test]
    fn assign_command_parses_overrides() {
        let cli = Cli::try_parse_from([
            "case-dispatch",
            "assign",
            "--cases",
            "cases.csv",
            "--organizations",
            "orgs.json",
            "--strategy",
            "load_balance",
            "--weights",
            "10,20,30,40",
            "--exclude",
            "org-3",
            "--exclude",
            "org-4",
            "--capacity-policy",
            "decrement",
            "--json",
        ])
        .expect("arguments parse");

        let Command::Assign(args) = cli.command else {
            panic!("expected assign command");
        };
        assert!(args.json);
        assert!(!args.strict);

        let mut settings = settings();
        args.engine.apply(&mut settings);
        assert_eq!(settings.strategy, AssignmentStrategy::LoadBalance);
        assert_eq!(settings.effective_weights().specialty_weight, 40.0);
        assert_eq!(
            settings.constraints.excluded_org_ids,
            vec![
                OrganizationId("org-3".to_string()),
                OrganizationId("org-4".to_string())
            ]
        );
        assert_eq!(
            settings.constraints.capacity_policy,
            CapacityPolicy::DecrementPerAssignment
        );
    }

    #[test]
    fn rejects_malformed_weights() {
        let result = Cli::try_parse_from(["case-dispatch", "demo", "--weights", "10,20"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_thresholds_that_disable_checks() {
        for args in [
            ["case-dispatch", "demo", "--min-match-score", "NaN"],
            ["case-dispatch", "demo", "--max-load-rate", "inf"],
            ["case-dispatch", "demo", "--max-cases-per-org", "0"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?} should be rejected");
        }

        let cli = Cli::try_parse_from([
            "case-dispatch",
            "demo",
            "--min-match-score",
            "72.5",
            "--max-cases-per-org",
            "4",
        ])
        .expect("arguments parse");
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        assert_eq!(args.engine.min_match_score, Some(72.5));
        assert_eq!(args.engine.max_cases_per_org, Some(4));
    }

    #[test]
    fn empty_overrides_keep_configured_settings() {
        let mut settings = settings();
        EngineArgs::default().apply(&mut settings);
        assert_eq!(settings, self::settings());
    }
}
