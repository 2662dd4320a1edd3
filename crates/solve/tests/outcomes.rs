use ugaplan_calendar::CalendarData;
use ugaplan_demand::{
    DemandConfig, FlowCapConfig, RequirementConfig, compute_budgets, compute_requirements,
    flow_cap,
};
use ugaplan_model::{Model, ModelInputs, ModelParams, build_model};
use ugaplan_solve::{
    Assignment, Incumbent, SolutionStatus, SolveError, SolveOutcome, Solver, Unsolved,
};
use ugaplan_zones::{RawZoneRecord, load_zones};

/// Replays a fixed outcome, standing in for a backend with a time limit.
struct Scripted(SolveOutcome);

impl Solver for Scripted {
    fn solve(&self, _model: &Model) -> Result<SolveOutcome, SolveError> {
        Ok(self.0.clone())
    }
}

fn model() -> Model {
    let cal = CalendarData::build(2025).unwrap().truncated(7).unwrap();
    let zones = load_zones(&[RawZoneRecord::park(1, 1000.0)]).unwrap();
    let budgets = compute_budgets(&zones, &cal, &DemandConfig::new()).unwrap();
    let reqs = compute_requirements(&cal, &RequirementConfig::new()).unwrap();
    let inputs = ModelInputs {
        calendar: &cal,
        zones: &zones,
        budgets: &budgets,
        requirements: &reqs,
        flow_cap: flow_cap(&FlowCapConfig::new(), &zones).unwrap(),
    };
    build_model(&inputs, &ModelParams::new()).unwrap()
}

#[test]
fn timed_out_incumbent_is_interpretable() {
    let m = model();
    let assignment = Assignment::from_values(&m, vec![0.0; m.n_variables()]).unwrap();
    let solver = Scripted(SolveOutcome::TimedOut {
        best_known: Some(Incumbent {
            assignment,
            objective: 0.0,
        }),
    });
    let solution = solver.solve(&m).unwrap().into_solution().unwrap();
    assert_eq!(solution.status(), SolutionStatus::TimedOut);
    assert_eq!(solution.status().to_string(), "timed out");
}

#[test]
fn timed_out_without_incumbent_is_an_error() {
    let m = model();
    let solver = Scripted(SolveOutcome::TimedOut { best_known: None });
    let outcome = solver.solve(&m).unwrap();
    assert_eq!(outcome.label(), "timed out");
    assert_eq!(
        outcome.into_solution().unwrap_err(),
        SolveError::Outcome {
            outcome: Unsolved::TimedOut
        }
    );
}

#[test]
fn unbounded_is_an_outcome() {
    let m = model();
    let outcome = Scripted(SolveOutcome::Unbounded).solve(&m).unwrap();
    assert!(!outcome.has_assignment());
    assert!(matches!(
        outcome.into_solution(),
        Err(SolveError::Outcome {
            outcome: Unsolved::Unbounded
        })
    ));
}
