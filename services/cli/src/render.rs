use case_dispatch::assignment::{AssignmentResult, CaseDetail, RankedOrganization};

pub(crate) fn render_result(result: &AssignmentResult) {
    let summary = result.summary();

    println!(
        "Assignment run at {} ({} strategy, {:.2} ms)",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        summary.strategy_label,
        summary.elapsed_ms
    );
    println!(
        "Cases: {} total, {} assigned, {} unassigned ({:.1}% success, avg score {:.1})",
        summary.total_cases,
        summary.assigned_cases,
        summary.failed_cases,
        summary.success_rate,
        summary.avg_match_score
    );

    if summary.organizations.is_empty() {
        println!("\nOrganization load: none assigned");
    } else {
        println!("\nOrganization load");
        for line in &summary.organizations {
            let flag = if line.over_limit { " [over load limit]" } else { "" };
            println!(
                "- {}: {} case(s), {:.2} outstanding, avg score {:.1}, expected load {:.0}%{}",
                line.org_name,
                line.assigned_count,
                line.total_amount,
                line.avg_score,
                line.expected_load_rate * 100.0,
                flag
            );
        }
    }

    if !result.case_assignments.is_empty() {
        println!("\nAssignments");
        for assignment in &result.case_assignments {
            let reasons = assignment
                .match_reasons
                .iter()
                .map(|reason| reason.label())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "- {} -> {} (score {:.1}) {}",
                assignment.case_code, assignment.org_name, assignment.match_score, reasons
            );
        }
    }

    if summary.unassigned.is_empty() {
        println!("\nUnassigned cases: none");
    } else {
        println!("\nUnassigned cases");
        for line in &summary.unassigned {
            match &line.suggestion {
                Some(suggestion) => {
                    println!("- {}: {} ({})", line.case_code, line.reason, suggestion)
                }
                None => println!("- {}: {}", line.case_code, line.reason),
            }
        }
    }
}

pub(crate) fn render_ranking(case: &CaseDetail, ranking: &[RankedOrganization]) {
    println!(
        "Ranking for case {} ({}, {}, {} days overdue)",
        case.case_code, case.region, case.product_type, case.overdue_days
    );

    for (position, entry) in ranking.iter().enumerate() {
        let breakdown = &entry.breakdown;
        let status = match &entry.ineligible {
            Some(reason) => format!("ineligible: {}", reason.summary()),
            None => "eligible".to_string(),
        };
        println!(
            "{}. {} score {:.1} [region {:.1}, performance {:.1}, load {:.1}, specialty {:.1}] {}",
            position + 1,
            entry.org_name,
            breakdown.score,
            breakdown.region,
            breakdown.performance,
            breakdown.load,
            breakdown.specialty,
            status
        );
    }
}
