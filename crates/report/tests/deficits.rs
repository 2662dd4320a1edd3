use approx::assert_relative_eq;
use ugaplan_calendar::CalendarData;
use ugaplan_demand::{
    BudgetTable, DemandConfig, FlowCapConfig, RequirementConfig, compute_budgets,
    compute_requirements, flow_cap,
};
use ugaplan_model::{Model, ModelInputs, ModelParams, build_model};
use ugaplan_report::{ReportError, interpret};
use ugaplan_solve::{Assignment, MicroLpSolver, SolveOutcome, Solver};
use ugaplan_zones::{RawZoneRecord, ZoneRegistry, load_zones};

/// One park of 1000 m² over the first week of 2025, default allocation.
fn scenario() -> (CalendarData, ZoneRegistry, BudgetTable, Model) {
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
    let model = build_model(&inputs, &ModelParams::new()).unwrap();
    (cal, zones, budgets, model)
}

#[test]
fn tiny_budget_reports_nonzero_deficit() {
    let (cal, zones, budgets, model) = scenario();
    let solution = MicroLpSolver::new()
        .solve(&model)
        .unwrap()
        .into_solution()
        .unwrap();
    let interp = interpret(&model, &cal, &zones, &budgets, &solution).unwrap();

    let budget = 1000.0 * 0.007 * 1.3 / 12.0;
    assert_eq!(interp.deficit_report.len(), 2);
    assert_relative_eq!(interp.total_deficit_m3(), 4.0 - budget, epsilon = 1e-6);
    let jan = interp.month(1).unwrap();
    assert_relative_eq!(jan.potable_irrigation_m3, budget, epsilon = 1e-6);
    assert_eq!(jan.grey_irrigation_m3, 0.0);
    assert_eq!(jan.wash_m3, 0.0);
}

#[test]
fn feasible_assignment_is_interpreted_with_bound() {
    let (cal, zones, budgets, model) = scenario();
    let assignment = Assignment::from_values(&model, vec![0.0; model.n_variables()]).unwrap();
    let solution = SolveOutcome::Feasible {
        assignment,
        objective: 0.0,
        bound: -1.0,
    }
    .into_solution()
    .unwrap();
    let interp = interpret(&model, &cal, &zones, &budgets, &solution).unwrap();
    assert_eq!(interp.status, "feasible");
    assert_eq!(interp.bound, Some(-1.0));
    // zeros are still listed
    assert!(interp.deficit_report.iter().all(|d| d.deficit_m3 == 0.0));
    assert!(interp.deficit_report.iter().all(|d| d.delivered_m3 == 0.0));
    assert_eq!(interp.deficit_report[0].required_m3, 2.0);
    let park = &interp.per_zone_schedule[0];
    assert_eq!(park.days.len(), 7);
    assert_eq!(park.active_days().count(), 0);
}

#[test]
fn tiny_values_read_as_zero() {
    let (cal, zones, budgets, model) = scenario();
    let assignment = Assignment::from_values(&model, vec![1e-12; model.n_variables()]).unwrap();
    let solution = SolveOutcome::Optimal {
        assignment,
        objective: 0.0,
    }
    .into_solution()
    .unwrap();
    let interp = interpret(&model, &cal, &zones, &budgets, &solution).unwrap();
    assert!(interp.per_zone_schedule[0].days.iter().all(|d| d.slots.is_empty()));
    assert_eq!(interp.month(1).unwrap().potable_irrigation_m3, 0.0);
}

#[test]
fn zones_outside_the_model_are_rejected() {
    let (cal, _, budgets, model) = scenario();
    let solution = SolveOutcome::Optimal {
        assignment: Assignment::from_values(&model, vec![0.0; model.n_variables()]).unwrap(),
        objective: 0.0,
    }
    .into_solution()
    .unwrap();
    let other = load_zones(&[
        RawZoneRecord::park(1, 1000.0),
        RawZoneRecord::private(2, 300.0),
    ])
    .unwrap();
    assert_eq!(
        interpret(&model, &cal, &other, &budgets, &solution).unwrap_err(),
        ReportError::UnknownKey {
            name: "fp_z2_d1_22h".to_string()
        }
    );
}
