//! Pure-Rust backend over `good_lp` with the `microlp` solver.

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, constraint,
    default_solver, variable,
};
use tracing::{debug, info};
use ugaplan_model::{Domain, LinearExpr, Model, ObjectiveSense, Sense};

use crate::error::SolveError;
use crate::outcome::{Assignment, SolveOutcome};
use crate::solver::Solver;

/// Branch-and-bound MILP solver shipped with `good_lp`.
///
/// Runs to completion, so it reports [`SolveOutcome::Optimal`],
/// [`SolveOutcome::Infeasible`] or [`SolveOutcome::Unbounded`]; it never
/// times out.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, vars: &[good_lp::Variable]) -> Expression {
    let mut out = Expression::from(0.0);
    for (id, coef) in expr.terms() {
        out += coef * vars[id.index()];
    }
    out
}

impl Solver for MicroLpSolver {
    #[tracing::instrument(skip_all, fields(n_variables = model.n_variables(), n_constraints = model.constraints().len()))]
    fn solve(&self, model: &Model) -> Result<SolveOutcome, SolveError> {
        let mut problem = ProblemVariables::new();
        let vars: Vec<good_lp::Variable> = model
            .variables()
            .iter()
            .map(|v| {
                let def = match v.domain() {
                    Domain::Binary => variable().binary(),
                    Domain::Integer => variable().integer().min(v.lower()),
                    Domain::Continuous => variable().min(v.lower()),
                };
                let def = match v.upper() {
                    Some(upper) if v.domain() != Domain::Binary => def.max(upper),
                    _ => def,
                };
                problem.add(def)
            })
            .collect();

        let objective = to_expression(model.objective().expr(), &vars);
        let mut program = match model.objective().sense() {
            ObjectiveSense::Minimize => problem.minimise(objective).using(default_solver),
        };
        for c in model.constraints() {
            let lhs = to_expression(c.expr(), &vars);
            let rhs = c.rhs();
            program = match c.sense() {
                Sense::Le => program.with(constraint!(lhs <= rhs)),
                Sense::Ge => program.with(constraint!(lhs >= rhs)),
                Sense::Eq => program.with(constraint!(lhs == rhs)),
            };
        }
        debug!("problem handed to microlp");

        let solution = match program.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                info!("model is infeasible");
                return Ok(SolveOutcome::Infeasible);
            }
            Err(ResolutionError::Unbounded) => {
                info!("model is unbounded");
                return Ok(SolveOutcome::Unbounded);
            }
            Err(other) => {
                return Err(SolveError::Backend {
                    reason: other.to_string(),
                });
            }
        };

        let values: Vec<f64> = vars.iter().map(|&v| solution.value(v)).collect();
        let assignment = Assignment::from_values(model, values)?;
        let objective = assignment.objective(model);
        info!(objective, "optimal solution found");
        Ok(SolveOutcome::Optimal {
            assignment,
            objective,
        })
    }
}
