//! Error types for the ugaplan-report crate.

use ugaplan_zones::ZoneId;

/// Error type for all fallible operations in the ugaplan-report crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// The solution has no value for a model variable.
    #[error("solution has no value for variable {name}")]
    MissingValue {
        /// Variable name.
        name: String,
    },

    /// A key the interpreter asked for lies outside the model's candidates.
    #[error("variable {name} is not a candidate of the model")]
    UnknownKey {
        /// Variable name.
        name: String,
    },

    /// A month of the horizon has no budget entry.
    #[error("no budget for month {month}")]
    MissingBudget {
        /// 1-indexed month.
        month: u8,
    },

    /// A zone-week has no minimum-volume constraint.
    #[error("no volume requirement for zone {zone} in week {week}")]
    MissingRequirement {
        /// The zone.
        zone: ZoneId,
        /// Tracked week id.
        week: u8,
    },

    /// JSON serialisation failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying message.
        reason: String,
    },
}
