//! Big-M flow cap for the indicator/flow coupling.

use tracing::debug;
use ugaplan_zones::ZoneRegistry;

use crate::error::DemandError;

/// Physically plausible range for a zone's hourly flow (m³/h).
pub const PLAUSIBLE_FLOW_RANGE: (f64, f64) = (3.0, 9.0);

/// Configuration for the flow cap `M`.
///
/// `M = clamp(flow_per_m2 × largest zone area, min_cap, max_cap)`, rounded
/// to 0.1 m³/h, unless a fixed value overrides it.
#[derive(Clone, Debug)]
pub struct FlowCapConfig {
    flow_per_m2: f64,
    min_cap: f64,
    max_cap: f64,
    fixed: Option<f64>,
}

impl FlowCapConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `flow_per_m2 = 0.002`, `min_cap = 3.0`, `max_cap = 8.0`,
    /// no fixed override.
    pub fn new() -> Self {
        Self {
            flow_per_m2: 0.002,
            min_cap: 3.0,
            max_cap: 8.0,
            fixed: None,
        }
    }

    /// Sets the hourly flow per square metre of the largest zone.
    pub fn with_flow_per_m2(mut self, rate: f64) -> Self {
        self.flow_per_m2 = rate;
        self
    }

    /// Sets the clamp bounds.
    pub fn with_bounds(mut self, min_cap: f64, max_cap: f64) -> Self {
        self.min_cap = min_cap;
        self.max_cap = max_cap;
        self
    }

    /// Uses `cap` verbatim instead of deriving it from zone areas.
    pub fn with_fixed(mut self, cap: f64) -> Self {
        self.fixed = Some(cap);
        self
    }

    /// Returns the per-area flow rate.
    pub fn flow_per_m2(&self) -> f64 {
        self.flow_per_m2
    }

    /// Returns the clamp bounds `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_cap, self.max_cap)
    }

    /// Returns the fixed override, if any.
    pub fn fixed(&self) -> Option<f64> {
        self.fixed
    }

    /// Validates this configuration against [`PLAUSIBLE_FLOW_RANGE`].
    pub fn validate(&self) -> Result<(), DemandError> {
        if !self.flow_per_m2.is_finite() || self.flow_per_m2 <= 0.0 {
            return Err(DemandError::InvalidFlowRate {
                value: self.flow_per_m2,
            });
        }
        check_plausible("min_cap", self.min_cap)?;
        check_plausible("max_cap", self.max_cap)?;
        if self.min_cap > self.max_cap {
            return Err(DemandError::InvertedFlowCapBounds {
                min: self.min_cap,
                max: self.max_cap,
            });
        }
        if let Some(v) = self.fixed {
            check_plausible("fixed", v)?;
        }
        Ok(())
    }
}

impl Default for FlowCapConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_plausible(what: &'static str, value: f64) -> Result<(), DemandError> {
    let (min, max) = PLAUSIBLE_FLOW_RANGE;
    if !value.is_finite() || value < min || value > max {
        return Err(DemandError::FlowCapOutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validated maximum hourly flow per zone (m³/h).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowCap(f64);

impl FlowCap {
    /// Creates a cap after checking it against [`PLAUSIBLE_FLOW_RANGE`].
    ///
    /// # Errors
    ///
    /// Returns [`DemandError::FlowCapOutOfRange`] outside the range.
    pub fn new(per_hour: f64) -> Result<Self, DemandError> {
        check_plausible("cap", per_hour)?;
        Ok(Self(per_hour))
    }

    /// Cap for one hour.
    pub fn per_hour(self) -> f64 {
        self.0
    }

    /// Cap for a slot lasting `hours`.
    pub fn for_hours(self, hours: f64) -> f64 {
        self.0 * hours
    }
}

/// Derives the flow cap from the largest zone area.
///
/// # Errors
///
/// Returns a [`DemandError`] if `config` does not validate.
pub fn flow_cap(config: &FlowCapConfig, zones: &ZoneRegistry) -> Result<FlowCap, DemandError> {
    config.validate()?;
    let cap = match config.fixed {
        Some(v) => v,
        None => {
            let raw = config.flow_per_m2 * zones.max_area_m2();
            let clamped = raw.clamp(config.min_cap, config.max_cap);
            (clamped * 10.0).round() / 10.0
        }
    };
    debug!(cap, "flow cap");
    FlowCap::new(cap)
}
