use approx::assert_relative_eq;
use ugaplan_calendar::CalendarData;
use ugaplan_demand::{
    DemandConfig, FlowCapConfig, RequirementConfig, compute_budgets, compute_requirements,
    flow_cap,
};
use ugaplan_model::{Model, ModelInputs, ModelParams, VarFamily, build_model};
use ugaplan_solve::{Assignment, MicroLpSolver, SolveError, SolveOutcome, Solver};
use ugaplan_zones::{RawZoneRecord, load_zones};

fn model(n_days: u16, records: &[RawZoneRecord], demand: &DemandConfig) -> Model {
    let cal = CalendarData::build(2025).unwrap().truncated(n_days).unwrap();
    let zones = load_zones(records).unwrap();
    let budgets = compute_budgets(&zones, &cal, demand).unwrap();
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

fn family_total(model: &Model, assignment: &Assignment, family: VarFamily) -> f64 {
    model
        .variables_in(family)
        .map(|(id, _)| assignment.value(id).unwrap())
        .sum()
}

#[test]
fn tiny_budget_yields_deficit_not_infeasibility() {
    // 1000 m² × 0.007 × 1.3 / 12 m³ of potable water against 2 × 2 m³ of
    // weekly requirement.
    let m = model(7, &[RawZoneRecord::park(1, 1000.0)], &DemandConfig::new());
    let outcome = MicroLpSolver::new().solve(&m).unwrap();
    let SolveOutcome::Optimal {
        assignment,
        objective,
    } = outcome
    else {
        panic!("expected optimal, got {}", outcome.label());
    };
    let budget = 1000.0 * 0.007 * 1.3 / 12.0;
    let deficit = family_total(&m, &assignment, VarFamily::WeeklyDeficit);
    assert_relative_eq!(deficit, 4.0 - budget, epsilon = 1e-6);
    assert_relative_eq!(objective, 0.45 * budget + 120.0 * (4.0 - budget), epsilon = 1e-4);
    assert!(assignment.violations(&m, 1e-6).is_empty());
}

#[test]
fn wash_beyond_budget_is_infeasible() {
    let m = model(
        14,
        &[RawZoneRecord::street(1, 600.0, 5.0)],
        &DemandConfig::new(),
    );
    let outcome = MicroLpSolver::new().solve(&m).unwrap();
    assert_eq!(outcome, SolveOutcome::Infeasible);
    assert_eq!(
        outcome.into_solution().unwrap_err().to_string(),
        "model has no usable solution: infeasible"
    );
}

#[test]
fn single_wash_covers_one_window() {
    let demand = DemandConfig::new().with_allocation_rate(1.0);
    let m = model(14, &[RawZoneRecord::street(1, 600.0, 5.0)], &demand);
    let solution = MicroLpSolver::new().solve(&m).unwrap().into_solution().unwrap();
    assert!(solution.status().is_optimal());
    let washes = family_total(&m, solution.assignment(), VarFamily::Wash);
    assert_relative_eq!(washes, 5.0, epsilon = 1e-6);
    assert_relative_eq!(solution.objective(), 0.45 * 5.0, epsilon = 1e-6);
}

#[test]
fn assignment_length_is_checked() {
    let m = model(7, &[RawZoneRecord::park(1, 1000.0)], &DemandConfig::new());
    let err = Assignment::from_values(&m, vec![0.0; m.n_variables() - 1]).unwrap_err();
    assert_eq!(
        err,
        SolveError::AssignmentLength {
            expected: m.n_variables(),
            got: m.n_variables() - 1,
        }
    );
}

#[test]
fn non_finite_values_are_rejected() {
    let m = model(7, &[RawZoneRecord::park(1, 1000.0)], &DemandConfig::new());
    let mut values = vec![0.0; m.n_variables()];
    values[0] = f64::NAN;
    assert!(matches!(
        Assignment::from_values(&m, values),
        Err(SolveError::NonFiniteValue { .. })
    ));
}

#[test]
fn all_zero_assignment_violates_frequency() {
    let m = model(7, &[RawZoneRecord::park(1, 1000.0)], &DemandConfig::new());
    let zeros = Assignment::from_values(&m, vec![0.0; m.n_variables()]).unwrap();
    let violated: Vec<&str> = zeros
        .violations(&m, 1e-9)
        .into_iter()
        .map(|c| c.name())
        .collect();
    assert!(violated.contains(&"freqpark_z1_w1"));
    assert!(violated.contains(&"vol_z1_w2"));
    assert_eq!(zeros.objective(&m), 0.0);
}
