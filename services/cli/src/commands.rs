use crate::cli::{AssignArgs, DemoArgs, RankArgs};
use crate::demo::{synthetic_cases, synthetic_roster};
use crate::render::{render_ranking, render_result};
use case_dispatch::assignment::CaseId;
use case_dispatch::config::AssignmentSettings;
use case_dispatch::error::AppError;
use case_dispatch::import::{CaseImporter, OrganizationImporter};
use serde::Serialize;
use tracing::info;

pub(crate) fn run_assign(
    args: AssignArgs,
    mut settings: AssignmentSettings,
) -> Result<(), AppError> {
    let AssignArgs {
        cases,
        organizations,
        engine,
        strict,
        json,
    } = args;
    engine.apply(&mut settings);

    let cases = CaseImporter::from_path(&cases)?;
    let roster = OrganizationImporter::from_path(&organizations)?;
    info!(
        cases = cases.len(),
        organizations = roster.len(),
        strategy = %settings.strategy,
        "loaded assignment inputs"
    );

    let engine = settings.engine();
    let weights = engine.weights();
    info!(
        region = weights.region_weight,
        performance = weights.performance_weight,
        load = weights.load_weight,
        specialty = weights.specialty_weight,
        min_match_score = engine.constraints().min_match_score,
        "scoring weights resolved"
    );
    let result = if strict {
        engine.execute_strict(&cases, &roster)?
    } else {
        engine.execute(&cases, &roster)
    };

    emit(&result, json, render_result)
}

pub(crate) fn run_rank(args: RankArgs, mut settings: AssignmentSettings) -> Result<(), AppError> {
    let RankArgs {
        cases,
        organizations,
        case_id,
        engine,
        json,
    } = args;
    engine.apply(&mut settings);

    let cases = CaseImporter::from_path(&cases)?;
    let roster = OrganizationImporter::from_path(&organizations)?;
    let case_id = CaseId(case_id);
    let case = cases
        .iter()
        .find(|case| case.id == case_id)
        .ok_or_else(|| AppError::Usage(format!("case {case_id} not found in batch")))?;

    let ranking = settings.engine().rank(case, &roster);
    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        render_ranking(case, &ranking);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, mut settings: AssignmentSettings) -> Result<(), AppError> {
    let DemoArgs { engine, json } = args;
    engine.apply(&mut settings);

    let cases = synthetic_cases();
    let roster = synthetic_roster();
    if !json {
        println!(
            "Case dispatch demo: {} synthetic cases across {} organizations",
            cases.len(),
            roster.len()
        );
    }

    let result = settings.engine().execute(&cases, &roster);
    emit(&result, json, render_result)
}

fn emit<T: Serialize>(value: &T, json: bool, render: fn(&T)) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        render(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EngineArgs;
    use case_dispatch::assignment::{AssignmentConstraints, AssignmentResult, AssignmentStrategy};

    fn settings() -> AssignmentSettings {
        AssignmentSettings {
            strategy: AssignmentStrategy::Smart,
            weights: None,
            constraints: AssignmentConstraints::default(),
        }
    }

    #[test]
    fn demo_runs_in_json_mode() {
        let args = DemoArgs {
            engine: EngineArgs::default(),
            json: true,
        };
        run_demo(args, settings()).expect("demo runs");
    }

    #[test]
    fn assign_reports_missing_files() {
        let args = AssignArgs {
            cases: "does-not-exist.csv".into(),
            organizations: "does-not-exist.json".into(),
            engine: EngineArgs::default(),
            strict: false,
            json: true,
        };

        match run_assign(args, settings()) {
            Err(AppError::Import(_)) => {}
            other => panic!("expected import error, got {other:?}"),
        }
    }

    #[test]
    fn result_serializes_camel_case() {
        let result: AssignmentResult = settings()
            .engine()
            .execute(&synthetic_cases(), &synthetic_roster());
        let value = serde_json::to_value(&result).expect("result serializes");

        assert!(value.get("caseAssignments").is_some());
        assert!(value.get("orgStats").is_some());
        assert_eq!(value["totalCases"], synthetic_cases().len());
    }
}
