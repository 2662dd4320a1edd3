//! Cost coefficients and structural model parameters.

use crate::error::ModelError;

/// Minimum ratio between the deficit penalty and the potable cost.
pub const MIN_PENALTY_RATIO: f64 = 100.0;

/// Objective coefficients.
///
/// # Example
///
/// ```
/// use ugaplan_model::CostConfig;
///
/// let costs = CostConfig::new().with_deficit_penalty(200.0);
/// assert!(costs.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CostConfig {
    potable_cost: f64,
    grey_cost: f64,
    deficit_penalty: f64,
}

impl CostConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `potable_cost = 0.45`, `grey_cost = 0.12`,
    /// `deficit_penalty = 120` (per m³).
    pub fn new() -> Self {
        Self {
            potable_cost: 0.45,
            grey_cost: 0.12,
            deficit_penalty: 120.0,
        }
    }

    /// Sets the potable cost per m³.
    pub fn with_potable_cost(mut self, c: f64) -> Self {
        self.potable_cost = c;
        self
    }

    /// Sets the grey cost per m³.
    pub fn with_grey_cost(mut self, c: f64) -> Self {
        self.grey_cost = c;
        self
    }

    /// Sets the penalty per m³ of weekly deficit.
    pub fn with_deficit_penalty(mut self, c: f64) -> Self {
        self.deficit_penalty = c;
        self
    }

    /// Returns the potable cost.
    pub fn potable_cost(&self) -> f64 {
        self.potable_cost
    }

    /// Returns the grey cost.
    pub fn grey_cost(&self) -> f64 {
        self.grey_cost
    }

    /// Returns the deficit penalty.
    pub fn deficit_penalty(&self) -> f64 {
        self.deficit_penalty
    }

    /// Validates this configuration.
    ///
    /// All coefficients must be finite and non-negative, and the penalty
    /// must be at least [`MIN_PENALTY_RATIO`] times the potable cost.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, c) in [
            ("potable_cost", self.potable_cost),
            ("grey_cost", self.grey_cost),
            ("deficit_penalty", self.deficit_penalty),
        ] {
            if !c.is_finite() || c < 0.0 {
                return Err(ModelError::InvalidCost {
                    reason: format!("{name} must be finite and >= 0, got {c}"),
                });
            }
        }
        if self.deficit_penalty < MIN_PENALTY_RATIO * self.potable_cost {
            return Err(ModelError::InvalidCost {
                reason: format!(
                    "deficit_penalty {} must be at least {MIN_PENALTY_RATIO} x potable_cost {}",
                    self.deficit_penalty, self.potable_cost
                ),
            });
        }
        Ok(())
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural parameters of the formulation.
#[derive(Clone, Debug)]
pub struct ModelParams {
    costs: CostConfig,
    wash_window_days: u16,
    fleet_capacity: Option<u32>,
}

impl ModelParams {
    /// Creates parameters with default costs, a 14-day wash window and no
    /// fleet limit.
    pub fn new() -> Self {
        Self {
            costs: CostConfig::new(),
            wash_window_days: 14,
            fleet_capacity: None,
        }
    }

    /// Sets the cost coefficients.
    pub fn with_costs(mut self, costs: CostConfig) -> Self {
        self.costs = costs;
        self
    }

    /// Sets the rolling wash window length in days.
    pub fn with_wash_window_days(mut self, days: u16) -> Self {
        self.wash_window_days = days;
        self
    }

    /// Limits street washes per day across the city.
    pub fn with_fleet_capacity(mut self, washes_per_day: u32) -> Self {
        self.fleet_capacity = Some(washes_per_day);
        self
    }

    /// Returns the cost coefficients.
    pub fn costs(&self) -> &CostConfig {
        &self.costs
    }

    /// Returns the wash window length.
    pub fn wash_window_days(&self) -> u16 {
        self.wash_window_days
    }

    /// Returns the fleet capacity, if limited.
    pub fn fleet_capacity(&self) -> Option<u32> {
        self.fleet_capacity
    }

    /// Validates these parameters, including the costs.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.costs.validate()?;
        if self.wash_window_days == 0 {
            return Err(ModelError::InvalidParams {
                reason: "wash_window_days must be positive".to_string(),
            });
        }
        if self.fleet_capacity == Some(0) {
            return Err(ModelError::InvalidParams {
                reason: "fleet_capacity must be positive when set".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CostConfig::new().validate().is_ok());
        assert!(ModelParams::new().validate().is_ok());
    }

    #[test]
    fn rejects_negative_cost() {
        let c = CostConfig::new().with_grey_cost(-0.1);
        assert!(matches!(c.validate(), Err(ModelError::InvalidCost { .. })));
    }

    #[test]
    fn rejects_cheap_penalty() {
        let c = CostConfig::new().with_deficit_penalty(10.0);
        assert!(matches!(c.validate(), Err(ModelError::InvalidCost { .. })));
        let c = CostConfig::new().with_deficit_penalty(50.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_window() {
        let p = ModelParams::new().with_wash_window_days(0);
        assert!(matches!(p.validate(), Err(ModelError::InvalidParams { .. })));
    }

    #[test]
    fn rejects_zero_fleet() {
        let p = ModelParams::new().with_fleet_capacity(0);
        assert!(p.validate().is_err());
        let p = ModelParams::new().with_fleet_capacity(1);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn params_validate_costs() {
        let p = ModelParams::new().with_costs(CostConfig::new().with_potable_cost(f64::NAN));
        assert!(p.validate().is_err());
    }
}
