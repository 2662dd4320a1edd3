//! Monthly potable and grey water budgets.

use std::collections::BTreeMap;

use tracing::{debug, info};
use ugaplan_calendar::CalendarData;
use ugaplan_zones::ZoneRegistry;

use crate::error::DemandError;

/// Months (1-indexed) with peak irrigation demand.
pub const PEAK_MONTHS: [u8; 3] = [12, 1, 2];

/// Months (1-indexed) with the lowest irrigation demand.
pub const TROUGH_MONTHS: [u8; 2] = [6, 7];

/// Configuration for monthly budget derivation.
///
/// # Example
///
/// ```
/// use ugaplan_demand::DemandConfig;
///
/// let config = DemandConfig::new()
///     .with_peak_trough(1.5, 0.8)
///     .with_grey_fraction(0.3);
/// assert_eq!(config.seasonal_factors()[0], 1.5);
/// assert_eq!(config.seasonal_factors()[5], 0.8);
/// ```
#[derive(Clone, Debug)]
pub struct DemandConfig {
    allocation_rate: f64,
    seasonal_factors: [f64; 12],
    grey_fraction: f64,
}

impl DemandConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `allocation_rate = 0.007` m³/m²/yr, seasonal factors 1.3
    /// in the peak months, 0.9 in the trough months and 1.0 otherwise,
    /// `grey_fraction = 0.4`.
    pub fn new() -> Self {
        Self {
            allocation_rate: 0.007,
            seasonal_factors: peak_trough_factors(1.3, 0.9),
            grey_fraction: 0.4,
        }
    }

    /// Sets the annual potable allocation per unit area (m³/m²/yr).
    pub fn with_allocation_rate(mut self, rate: f64) -> Self {
        self.allocation_rate = rate;
        self
    }

    /// Sets all twelve monthly seasonal factors.
    pub fn with_seasonal_factors(mut self, factors: [f64; 12]) -> Self {
        self.seasonal_factors = factors;
        self
    }

    /// Sets the seasonal factors from a peak/trough pair; other months
    /// get 1.0.
    pub fn with_peak_trough(mut self, peak: f64, trough: f64) -> Self {
        self.seasonal_factors = peak_trough_factors(peak, trough);
        self
    }

    /// Sets the grey budget as a fraction of the potable budget.
    pub fn with_grey_fraction(mut self, fraction: f64) -> Self {
        self.grey_fraction = fraction;
        self
    }

    /// Returns the annual allocation rate.
    pub fn allocation_rate(&self) -> f64 {
        self.allocation_rate
    }

    /// Returns the monthly seasonal factors (index 0 = January).
    pub fn seasonal_factors(&self) -> &[f64; 12] {
        &self.seasonal_factors
    }

    /// Returns the grey-water fraction.
    pub fn grey_fraction(&self) -> f64 {
        self.grey_fraction
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), DemandError> {
        if !self.allocation_rate.is_finite() || self.allocation_rate <= 0.0 {
            return Err(DemandError::InvalidAllocationRate {
                value: self.allocation_rate,
            });
        }
        for (i, &f) in self.seasonal_factors.iter().enumerate() {
            if !f.is_finite() || f <= 0.0 {
                return Err(DemandError::InvalidSeasonalFactor {
                    month: (i + 1) as u8,
                    value: f,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.grey_fraction) {
            return Err(DemandError::InvalidGreyFraction {
                value: self.grey_fraction,
            });
        }
        Ok(())
    }
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn peak_trough_factors(peak: f64, trough: f64) -> [f64; 12] {
    let mut factors = [1.0; 12];
    for m in PEAK_MONTHS {
        factors[(m - 1) as usize] = peak;
    }
    for m in TROUGH_MONTHS {
        factors[(m - 1) as usize] = trough;
    }
    factors
}

/// Water budget for one month, shared by all zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    month: u8,
    potable_m3: f64,
    grey_m3: f64,
}

impl Budget {
    /// Returns the month (1..=12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Maximum potable volume for the month (m³).
    pub fn potable_m3(&self) -> f64 {
        self.potable_m3
    }

    /// Maximum grey volume for the month (m³).
    pub fn grey_m3(&self) -> f64 {
        self.grey_m3
    }
}

/// Budgets for every month covered by a calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    budgets: BTreeMap<u8, Budget>,
}

impl BudgetTable {
    /// Returns the budget for `month`, if the month is covered.
    pub fn get(&self, month: u8) -> Option<&Budget> {
        self.budgets.get(&month)
    }

    /// Iterates over budgets in month order.
    pub fn iter(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.values()
    }

    /// Returns the number of months covered.
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// Returns `true` if no month is covered.
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

/// Derives monthly budgets for every month of `calendar`.
///
/// Potable budget for month `s` is
/// `total_area × allocation_rate × seasonal_factor[s] / 12`; the grey
/// budget is `grey_fraction` of it.
///
/// # Errors
///
/// Returns a [`DemandError`] if `config` does not validate.
#[tracing::instrument(skip_all, fields(n_zones = zones.len()))]
pub fn compute_budgets(
    zones: &ZoneRegistry,
    calendar: &CalendarData,
    config: &DemandConfig,
) -> Result<BudgetTable, DemandError> {
    config.validate()?;
    let total_area = zones.total_area_m2();

    let budgets: BTreeMap<u8, Budget> = calendar
        .months()
        .into_iter()
        .map(|month| {
            let factor = config.seasonal_factors[(month - 1) as usize];
            let potable_m3 = total_area * config.allocation_rate * factor / 12.0;
            let budget = Budget {
                month,
                potable_m3,
                grey_m3: potable_m3 * config.grey_fraction,
            };
            debug!(month, potable_m3, grey_m3 = budget.grey_m3, "budget");
            (month, budget)
        })
        .collect();

    info!(n_months = budgets.len(), total_area, "budgets computed");
    Ok(BudgetTable { budgets })
}
