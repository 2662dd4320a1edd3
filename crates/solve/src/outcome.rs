//! Solve outcomes, assignments and usable solutions.

use std::fmt;

use ugaplan_model::{Constraint, Model, VarId};

use crate::error::{SolveError, Unsolved};

/// One value per model variable, in variable-id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Wraps solver values for `model`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::AssignmentLength`] if `values` does not hold
    /// exactly one entry per variable, and [`SolveError::NonFiniteValue`]
    /// for the first NaN or infinite entry.
    pub fn from_values(model: &Model, values: Vec<f64>) -> Result<Self, SolveError> {
        if values.len() != model.n_variables() {
            return Err(SolveError::AssignmentLength {
                expected: model.n_variables(),
                got: values.len(),
            });
        }
        for (var, &value) in model.variables().iter().zip(&values) {
            if !value.is_finite() {
                return Err(SolveError::NonFiniteValue {
                    name: var.name(),
                    value,
                });
            }
        }
        Ok(Self { values })
    }

    /// Returns the value of `id`, if it belongs to the model.
    pub fn value(&self, id: VarId) -> Option<f64> {
        self.values.get(id.index()).copied()
    }

    /// Returns all values in variable-id order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Evaluates the model objective at this assignment.
    pub fn objective(&self, model: &Model) -> f64 {
        model.objective().expr().evaluate(&self.values)
    }

    /// Constraints of `model` violated by more than `tol`.
    pub fn violations<'m>(&self, model: &'m Model, tol: f64) -> Vec<&'m Constraint> {
        model
            .constraints()
            .iter()
            .filter(|c| !c.is_satisfied(&self.values, tol))
            .collect()
    }
}

/// The best assignment found before a solver stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// The assignment.
    pub assignment: Assignment,
    /// Its objective value.
    pub objective: f64,
}

/// Every result a solver can report.
///
/// Callers match on all five cases; only [`SolveOutcome::into_solution`]
/// turns an outcome into values, and it refuses the ones without any.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Proven optimal.
    Optimal {
        /// Optimal values.
        assignment: Assignment,
        /// Objective at the optimum.
        objective: f64,
    },
    /// Feasible, optimality not proven.
    Feasible {
        /// Feasible values.
        assignment: Assignment,
        /// Objective at the assignment.
        objective: f64,
        /// Best proven lower bound.
        bound: f64,
    },
    /// No feasible assignment exists.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// The solver hit its limit.
    TimedOut {
        /// Incumbent at the limit, if any.
        best_known: Option<Incumbent>,
    },
}

impl SolveOutcome {
    /// Short lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Optimal { .. } => "optimal",
            SolveOutcome::Feasible { .. } => "feasible",
            SolveOutcome::Infeasible => "infeasible",
            SolveOutcome::Unbounded => "unbounded",
            SolveOutcome::TimedOut { .. } => "timed out",
        }
    }

    /// Whether the outcome carries an assignment.
    pub fn has_assignment(&self) -> bool {
        matches!(
            self,
            SolveOutcome::Optimal { .. }
                | SolveOutcome::Feasible { .. }
                | SolveOutcome::TimedOut {
                    best_known: Some(_)
                }
        )
    }

    /// Converts the outcome into a usable solution.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Outcome`] for infeasible and unbounded models
    /// and for a timeout without an incumbent.
    pub fn into_solution(self) -> Result<Solution, SolveError> {
        match self {
            SolveOutcome::Optimal {
                assignment,
                objective,
            } => Ok(Solution {
                assignment,
                objective,
                status: SolutionStatus::Optimal,
            }),
            SolveOutcome::Feasible {
                assignment,
                objective,
                bound,
            } => Ok(Solution {
                assignment,
                objective,
                status: SolutionStatus::Feasible { bound },
            }),
            SolveOutcome::TimedOut {
                best_known: Some(Incumbent {
                    assignment,
                    objective,
                }),
            } => Ok(Solution {
                assignment,
                objective,
                status: SolutionStatus::TimedOut,
            }),
            SolveOutcome::TimedOut { best_known: None } => Err(SolveError::Outcome {
                outcome: Unsolved::TimedOut,
            }),
            SolveOutcome::Infeasible => Err(SolveError::Outcome {
                outcome: Unsolved::Infeasible,
            }),
            SolveOutcome::Unbounded => Err(SolveError::Outcome {
                outcome: Unsolved::Unbounded,
            }),
        }
    }
}

/// How good a [`Solution`] is known to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolutionStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible with a lower bound.
    Feasible {
        /// Best proven lower bound.
        bound: f64,
    },
    /// Incumbent at a time limit.
    TimedOut,
}

impl SolutionStatus {
    /// Whether optimality is proven.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolutionStatus::Optimal)
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => f.write_str("optimal"),
            SolutionStatus::Feasible { .. } => f.write_str("feasible"),
            SolutionStatus::TimedOut => f.write_str("timed out"),
        }
    }
}

/// An assignment that can be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    assignment: Assignment,
    objective: f64,
    status: SolutionStatus,
}

impl Solution {
    /// Returns the assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the objective value.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns the status.
    pub fn status(&self) -> SolutionStatus {
        self.status
    }

    /// Returns the value of `id`.
    pub fn value(&self, id: VarId) -> Option<f64> {
        self.assignment.value(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> Assignment {
        Assignment {
            values: vec![1.0, 0.0, 2.5],
        }
    }

    #[test]
    fn optimal_into_solution() {
        let sol = SolveOutcome::Optimal {
            assignment: assignment(),
            objective: 3.0,
        }
        .into_solution()
        .unwrap();
        assert_eq!(sol.status(), SolutionStatus::Optimal);
        assert!(sol.status().is_optimal());
        assert_eq!(sol.objective(), 3.0);
        assert_eq!(sol.assignment().values(), &[1.0, 0.0, 2.5]);
    }

    #[test]
    fn feasible_keeps_bound() {
        let sol = SolveOutcome::Feasible {
            assignment: assignment(),
            objective: 3.0,
            bound: 2.0,
        }
        .into_solution()
        .unwrap();
        assert_eq!(sol.status(), SolutionStatus::Feasible { bound: 2.0 });
        assert!(!sol.status().is_optimal());
        assert_eq!(sol.status().to_string(), "feasible");
    }

    #[test]
    fn timeout_with_incumbent_is_usable() {
        let outcome = SolveOutcome::TimedOut {
            best_known: Some(Incumbent {
                assignment: assignment(),
                objective: 4.0,
            }),
        };
        assert!(outcome.has_assignment());
        let sol = outcome.into_solution().unwrap();
        assert_eq!(sol.status(), SolutionStatus::TimedOut);
        assert_eq!(sol.objective(), 4.0);
    }

    #[test]
    fn outcomes_without_values_are_errors() {
        let cases = [
            (SolveOutcome::Infeasible, Unsolved::Infeasible),
            (SolveOutcome::Unbounded, Unsolved::Unbounded),
            (SolveOutcome::TimedOut { best_known: None }, Unsolved::TimedOut),
        ];
        for (outcome, expected) in cases {
            assert!(!outcome.has_assignment());
            assert_eq!(
                outcome.into_solution().unwrap_err(),
                SolveError::Outcome { outcome: expected }
            );
        }
    }

    #[test]
    fn labels() {
        assert_eq!(SolveOutcome::Infeasible.label(), "infeasible");
        assert_eq!(
            SolveOutcome::TimedOut { best_known: None }.label(),
            "timed out"
        );
    }
}
