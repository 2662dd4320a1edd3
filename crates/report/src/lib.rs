//! # ugaplan-report
//!
//! Turns a solved model back into domain terms: what each zone does on
//! each day, how much of each source is used per month, and how far each
//! zone-week falls short of its volume requirement.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Model + Solution"] -->|"interpret()"| B["Interpretation"]
//!     B -->|"check_compliance()"| C["Vec<ComplianceIssue>"]
//!     B -->|"to_json()"| D["JSON"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `interpret` | Solution reader |
//! | `output` | Serialisable records and JSON |
//! | `compliance` | Budget, wash-coverage and ban checks |
//! | `error` | Error types |

mod compliance;
mod error;
mod interpret;
mod output;

pub use compliance::{ComplianceIssue, check_compliance};
pub use error::ReportError;
pub use interpret::{BINARY_THRESHOLD, VOLUME_EPS, interpret};
pub use output::{
    DaySchedule, DeficitEntry, Interpretation, MonthVolumes, SlotVolume, ZoneSchedule, to_json,
};
