//! Error types for the ugaplan-solve crate.

use std::fmt;

/// A solve that ended without a usable assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsolved {
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can decrease without limit.
    Unbounded,
    /// The solver stopped before finding any incumbent.
    TimedOut,
}

impl fmt::Display for Unsolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unsolved::Infeasible => "infeasible",
            Unsolved::Unbounded => "unbounded",
            Unsolved::TimedOut => "timed out without an incumbent",
        };
        f.write_str(s)
    }
}

/// Error type for all fallible operations in the ugaplan-solve crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// The solve finished but produced no solution to interpret.
    #[error("model has no usable solution: {outcome}")]
    Outcome {
        /// What the solver reported.
        outcome: Unsolved,
    },

    /// An assignment does not cover the model's variables.
    #[error("assignment has {got} values but the model has {expected} variables")]
    AssignmentLength {
        /// Number of model variables.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The solver returned NaN or an infinite value.
    #[error("non-finite value {value} for variable {name}")]
    NonFiniteValue {
        /// Variable name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// The backend failed for a reason outside the outcome set.
    #[error("solver backend failed: {reason}")]
    Backend {
        /// Backend message.
        reason: String,
    },
}
