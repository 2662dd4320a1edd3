//! # ugaplan-zones
//!
//! Static attributes of the water management units (UGAs): kind, water
//! sources, vegetation, area and wash volume. Raw records are validated in
//! batch so every bad record is reported at once.
//!
//! ## Quick Start
//!
//! ```
//! use ugaplan_zones::{RawZoneRecord, load_zones};
//!
//! let records = vec![
//!     RawZoneRecord::park(1, 2500.0).with_spring(true).with_grey_infra(true),
//!     RawZoneRecord::street(2, 600.0, 5.0),
//! ];
//! let registry = load_zones(&records).unwrap();
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.streets().count(), 1);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `zone` | Validated zone types |
//! | `record` | Raw input records |
//! | `validate` | Batch invariant checks |
//! | `registry` | Registry construction and lookups |
//! | `synthetic` | Seeded synthetic inventories |
//! | `error` | Error types |

mod error;
mod record;
mod registry;
mod synthetic;
mod validate;
mod zone;

pub use error::ZoneError;
pub use record::RawZoneRecord;
pub use registry::{ZoneRegistry, load_zones};
pub use synthetic::{SyntheticZoneConfig, generate_synthetic_zones};
pub use validate::{ZoneRule, ZoneViolation};
pub use zone::{VegetationClass, Zone, ZoneId, ZoneKind};
