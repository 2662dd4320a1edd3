//! # ugaplan-model
//!
//! Turns a water-management scenario into a mixed-integer linear program:
//! the variable schema, the constraint families and the cost objective.
//!
//! Variables exist only for eligible combinations. Every pruned
//! combination is attributed to a named [`Exclusion`] and counted in the
//! model's [`ExclusionLedger`].
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CalendarData + ZoneRegistry"] --> C["build_model()"]
//!     B["BudgetTable + RequirementTable + FlowCap"] --> C
//!     C --> D["Model"]
//!     D -->|"write_lp()"| E["LP text"]
//!     D -->|"Solver"| F["assignment"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `variable` | Variable keys, families and domains |
//! | `eligibility` | Named eligibility predicates |
//! | `expr` | Linear expressions, constraints, objective |
//! | `params` | Costs and structural parameters |
//! | `builder` | Five-phase model construction |
//! | `model` | The built model and invariant checks |
//! | `lp` | CPLEX LP export |
//! | `error` | Error types |

mod builder;
mod eligibility;
mod error;
mod expr;
mod lp;
mod model;
mod params;
mod variable;

pub use builder::{ModelInputs, build_model};
pub use eligibility::{
    Eligibility, Exclusion, Term, activity_eligibility, day_block_eligibility, grey_eligibility,
    key_eligibility, night_eligibility, slot_eligibility, wash_eligibility, weekly_eligibility,
};
pub use error::ModelError;
pub use expr::{Constraint, Family, LinearExpr, Objective, ObjectiveSense, Sense};
pub use lp::write_lp;
pub use model::{ExclusionLedger, Model};
pub use params::{CostConfig, MIN_PENALTY_RATIO, ModelParams};
pub use variable::{Domain, VarFamily, VarId, VarKey, Variable};
