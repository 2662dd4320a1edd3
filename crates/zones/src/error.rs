//! Error types for the ugaplan-zones crate.

use crate::validate::ZoneViolation;

/// Error type for all fallible operations in the ugaplan-zones crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZoneError {
    /// One or more raw records violated the zone invariants.
    ///
    /// Every violation found in the batch is listed, not only the first.
    #[error("{count} zone validation error(s): {details}")]
    Validation {
        /// Number of accumulated violations.
        count: usize,
        /// Human-readable summary of the violations.
        details: String,
        /// The individual violations, in record order.
        violations: Vec<ZoneViolation>,
    },

    /// Returned when no zone records were supplied.
    #[error("zone registry is empty")]
    Empty,

    /// Returned when a synthetic generator parameter is out of range.
    #[error("invalid synthetic zone config: {reason}")]
    InvalidSyntheticConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ZoneRule;
    use crate::zone::ZoneId;

    #[test]
    fn error_validation() {
        let v = ZoneViolation::new(ZoneId(4), ZoneRule::NoKind, "no kind flag set");
        let err = ZoneError::Validation {
            count: 1,
            details: v.to_string(),
            violations: vec![v],
        };
        assert_eq!(
            err.to_string(),
            "1 zone validation error(s): zone 4: no kind: no kind flag set"
        );
    }

    #[test]
    fn error_empty() {
        assert_eq!(ZoneError::Empty.to_string(), "zone registry is empty");
    }

    #[test]
    fn error_invalid_synthetic_config() {
        let err = ZoneError::InvalidSyntheticConfig {
            reason: "n_zones must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid synthetic zone config: n_zones must be positive"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ZoneError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ZoneError>();
    }
}
