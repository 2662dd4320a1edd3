//! # ugaplan-calendar
//!
//! Per-day metadata for a 365-day scheduling year: month, tracked ISO week,
//! municipal irrigation bans, and the intra-day irrigation slots.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["year"] -->|"CalendarData::build()"| B["CalendarData"]
//!     B -->|".days()"| C["DayInfo (month, week, ban)"]
//!     B -->|".weeks()"| D["Week (days, month)"]
//!     B -->|".truncated(n)"| B
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ugaplan_calendar::{CalendarData, Day};
//!
//! let cal = CalendarData::build(2025).unwrap();
//! assert_eq!(cal.n_days(), 365);
//! // 1 January 2025 is a Wednesday: irrigation is banned.
//! assert!(cal.day(Day::new(1).unwrap()).unwrap().is_prohibited());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `day` | Day and week newtypes |
//! | `slots` | Night hours and daytime blocks |
//! | `calendar` | Calendar construction and lookups |
//! | `error` | Error types |

mod calendar;
mod day;
mod error;
mod slots;

pub use calendar::{CalendarData, DayInfo, PROHIBITED_WEEKDAYS, Week};
pub use chrono::Weekday;
pub use day::{DAYS_PER_YEAR, Day, TRACKED_WEEKS, WeekId};
pub use error::CalendarError;
pub use slots::{BLOCK_HOURS, BLOCKS, Block, NIGHT_HOURS, NightHour, Slot};
