//! Solve command: build, solve, interpret and report a scenario.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use ugaplan_report::{check_compliance, interpret, to_json};
use ugaplan_solve::{MicroLpSolver, Solver};

use crate::cli::SolveArgs;
use crate::scenario::Scenario;

/// Run the solve pipeline.
pub fn run(args: SolveArgs) -> Result<()> {
    let _cmd = info_span!("solve").entered();

    // 1. Inputs and model
    let scenario = Scenario::load(&args.config, args.horizon)?;
    let model = scenario.build()?;

    // 2. Solve; only outcomes with values go on
    let outcome = MicroLpSolver::new()
        .solve(&model)
        .context("solver backend failed")?;
    info!(outcome = outcome.label(), "solve finished");
    let solution = outcome
        .into_solution()
        .context("scenario has no schedule to report")?;

    // 3. Interpret and check
    let report = interpret(
        &model,
        &scenario.calendar,
        &scenario.zones,
        &scenario.budgets,
        &solution,
    )
    .context("failed to interpret solution")?;
    let issues = check_compliance(
        &report,
        &scenario.calendar,
        scenario.params.wash_window_days(),
    );
    for issue in &issues {
        warn!(%issue, "compliance issue");
    }
    info!(
        objective = report.objective,
        total_deficit_m3 = report.total_deficit_m3(),
        n_issues = issues.len(),
        "schedule ready"
    );

    // 4. Write
    let json = to_json(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
