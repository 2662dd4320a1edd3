//! Error types for the ugaplan-model crate.

use ugaplan_zones::{VegetationClass, ZoneId};

use crate::variable::VarFamily;

/// Error type for all fallible operations in the ugaplan-model crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A declared variable breaks an index-family invariant.
    #[error("index invariant violated: {family} variable {name} on zone {zone}: {reason}")]
    IndexInvariant {
        /// Family of the offending variable.
        family: VarFamily,
        /// Variable name.
        name: String,
        /// Zone the variable belongs to.
        zone: ZoneId,
        /// The violated rule.
        reason: String,
    },

    /// A month of the horizon has no budget entry.
    #[error("no budget for month {month}")]
    MissingBudget {
        /// 1-indexed month.
        month: u8,
    },

    /// A zone's (vegetation class, month) pair has no requirement entry.
    #[error("no requirement for zone {zone} ({class:?}) in month {month}")]
    MissingRequirement {
        /// The zone needing the requirement.
        zone: ZoneId,
        /// Its vegetation class.
        class: VegetationClass,
        /// 1-indexed month.
        month: u8,
    },

    /// A cost coefficient is invalid.
    #[error("invalid cost config: {reason}")]
    InvalidCost {
        /// Description of the problem.
        reason: String,
    },

    /// A model parameter is invalid.
    #[error("invalid model params: {reason}")]
    InvalidParams {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_index_invariant() {
        let err = ModelError::IndexInvariant {
            family: VarFamily::Night,
            name: "x_z3_d1_22h".to_string(),
            zone: ZoneId(3),
            reason: "street zone".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "index invariant violated: night variable x_z3_d1_22h on zone 3: street zone"
        );
    }

    #[test]
    fn error_missing_budget() {
        let err = ModelError::MissingBudget { month: 4 };
        assert_eq!(err.to_string(), "no budget for month 4");
    }

    #[test]
    fn error_missing_requirement() {
        let err = ModelError::MissingRequirement {
            zone: ZoneId(2),
            class: VegetationClass::Shrub,
            month: 1,
        };
        assert_eq!(
            err.to_string(),
            "no requirement for zone 2 (Shrub) in month 1"
        );
    }

    #[test]
    fn error_invalid_cost() {
        let err = ModelError::InvalidCost {
            reason: "potable_cost must be finite and >= 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid cost config: potable_cost must be finite and >= 0"
        );
    }

    #[test]
    fn error_invalid_params() {
        let err = ModelError::InvalidParams {
            reason: "wash_window_days must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid model params: wash_window_days must be positive"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ModelError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ModelError>();
    }
}
