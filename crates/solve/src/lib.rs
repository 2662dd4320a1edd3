//! # ugaplan-solve
//!
//! Hands a built [`ugaplan_model::Model`] to a MILP backend and reports
//! what came back. The [`Solver`] trait is the seam; [`MicroLpSolver`] is
//! the bundled pure-Rust backend.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ugaplan_model::Model;
//! use ugaplan_solve::{MicroLpSolver, SolveOutcome, Solver};
//!
//! fn run(model: &Model) -> Result<(), ugaplan_solve::SolveError> {
//!     match MicroLpSolver::new().solve(model)? {
//!         SolveOutcome::Optimal { objective, .. } => println!("cost {objective}"),
//!         other => println!("no optimum: {}", other.label()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `solver` | The `Solver` trait |
//! | `outcome` | Outcomes, assignments and solutions |
//! | `microlp` | `good_lp` backend |
//! | `error` | Error types |

mod error;
mod microlp;
mod outcome;
mod solver;

pub use error::{SolveError, Unsolved};
pub use microlp::MicroLpSolver;
pub use outcome::{Assignment, Incumbent, SolveOutcome, Solution, SolutionStatus};
pub use solver::Solver;
