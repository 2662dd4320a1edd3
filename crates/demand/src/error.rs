//! Error types for the ugaplan-demand crate.

/// Error type for all fallible operations in the ugaplan-demand crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemandError {
    /// Returned when the annual allocation rate is non-finite or non-positive.
    #[error("invalid allocation rate: {value} m³/m²/yr (must be finite and > 0)")]
    InvalidAllocationRate {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a seasonal factor is non-finite or non-positive.
    #[error("invalid seasonal factor for month {month}: {value} (must be finite and > 0)")]
    InvalidSeasonalFactor {
        /// 1-indexed month.
        month: u8,
        /// The invalid value.
        value: f64,
    },

    /// Returned when the grey-water fraction is outside `[0, 1]`.
    #[error("invalid grey fraction: {value} (must be in [0, 1])")]
    InvalidGreyFraction {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a requirement parameter is invalid.
    #[error("invalid requirement config: {reason}")]
    InvalidRequirement {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the per-area flow rate is non-finite or non-positive.
    #[error("invalid flow rate: {value} m³/h per m² (must be finite and > 0)")]
    InvalidFlowRate {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a flow cap bound or result leaves the plausible range.
    #[error("flow cap {what} = {value} m³/h outside plausible range [{min}, {max}]")]
    FlowCapOutOfRange {
        /// Which quantity was out of range.
        what: &'static str,
        /// The offending value.
        value: f64,
        /// Lower end of the plausible range.
        min: f64,
        /// Upper end of the plausible range.
        max: f64,
    },

    /// Returned when the lower cap bound exceeds the upper one.
    #[error("flow cap bounds inverted: min {min} > max {max}")]
    InvertedFlowCapBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}
