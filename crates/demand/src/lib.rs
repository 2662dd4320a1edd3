//! # ugaplan-demand
//!
//! Derives the quantities the model is built against: monthly potable and
//! grey budgets, minimum weekly irrigation requirements per vegetation
//! class and month, and the Big-M flow cap.
//!
//! ## Quick Start
//!
//! ```
//! use ugaplan_calendar::CalendarData;
//! use ugaplan_demand::{DemandConfig, RequirementConfig, compute_budgets, compute_requirements};
//! use ugaplan_zones::{RawZoneRecord, VegetationClass, load_zones};
//!
//! let cal = CalendarData::build(2025).unwrap();
//! let zones = load_zones(&[RawZoneRecord::park(1, 12_000.0)]).unwrap();
//!
//! let budgets = compute_budgets(&zones, &cal, &DemandConfig::new()).unwrap();
//! assert_eq!(budgets.len(), 12);
//!
//! let reqs = compute_requirements(&cal, &RequirementConfig::new()).unwrap();
//! let jan = reqs.get(VegetationClass::Turf, 1).unwrap();
//! assert_eq!(jan.min_frequency(), 2);
//! assert_eq!(jan.min_frequency_parks(), 3);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `budget` | Monthly potable/grey budgets |
//! | `requirement` | Weekly frequency and volume minimums |
//! | `flowcap` | Big-M flow cap |
//! | `error` | Error types |

mod budget;
mod error;
mod flowcap;
mod requirement;

pub use budget::{Budget, BudgetTable, DemandConfig, PEAK_MONTHS, TROUGH_MONTHS, compute_budgets};
pub use error::DemandError;
pub use flowcap::{FlowCap, FlowCapConfig, PLAUSIBLE_FLOW_RANGE, flow_cap};
pub use requirement::{Requirement, RequirementConfig, RequirementTable, compute_requirements};
