//! The solver adapter contract.

use ugaplan_model::Model;

use crate::error::SolveError;
use crate::outcome::SolveOutcome;

/// A MILP backend.
///
/// Implementations translate the model into their own representation,
/// run it, and report one of the five [`SolveOutcome`]s. Infeasible,
/// unbounded and timed-out solves are outcomes, not errors; `Err` is
/// reserved for backend failures and malformed results.
pub trait Solver {
    /// Solves `model`.
    fn solve(&self, model: &Model) -> Result<SolveOutcome, SolveError>;
}
