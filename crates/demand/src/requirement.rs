//! Minimum weekly irrigation requirements per vegetation class and month.

use std::collections::BTreeMap;

use tracing::info;
use ugaplan_calendar::CalendarData;
use ugaplan_zones::{VegetationClass, Zone};

use crate::budget::PEAK_MONTHS;
use crate::error::DemandError;

/// Most visits a week can hold.
const MAX_WEEKLY_FREQUENCY: u32 = 7;

/// Configuration for requirement derivation.
///
/// Weekly frequency is `peak_frequency` in the peak months and
/// `off_peak_frequency` otherwise; parks get `park_bonus` extra visits.
/// The weekly volume is `base frequency × volume_per_visit_m3 × class factor`.
#[derive(Clone, Debug)]
pub struct RequirementConfig {
    peak_months: Vec<u8>,
    peak_frequency: u32,
    off_peak_frequency: u32,
    park_bonus: u32,
    volume_per_visit_m3: f64,
    vegetation_factors: [f64; 3],
}

impl RequirementConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: peak months Dec/Jan/Feb, 2 visits/week in peak months and
    /// 1 otherwise, park bonus +1, 1.0 m³ per visit, all vegetation
    /// factors 1.0.
    pub fn new() -> Self {
        Self {
            peak_months: PEAK_MONTHS.to_vec(),
            peak_frequency: 2,
            off_peak_frequency: 1,
            park_bonus: 1,
            volume_per_visit_m3: 1.0,
            vegetation_factors: [1.0; 3],
        }
    }

    /// Sets the peak months (1-indexed).
    pub fn with_peak_months(mut self, months: Vec<u8>) -> Self {
        self.peak_months = months;
        self
    }

    /// Sets the weekly visit count in peak months.
    pub fn with_peak_frequency(mut self, n: u32) -> Self {
        self.peak_frequency = n;
        self
    }

    /// Sets the weekly visit count outside peak months.
    pub fn with_off_peak_frequency(mut self, n: u32) -> Self {
        self.off_peak_frequency = n;
        self
    }

    /// Sets the extra weekly visits required in parks.
    pub fn with_park_bonus(mut self, n: u32) -> Self {
        self.park_bonus = n;
        self
    }

    /// Sets the volume each required visit contributes (m³).
    pub fn with_volume_per_visit_m3(mut self, v: f64) -> Self {
        self.volume_per_visit_m3 = v;
        self
    }

    /// Sets the volume multipliers for turf, shrub and mixed vegetation.
    pub fn with_vegetation_factors(mut self, factors: [f64; 3]) -> Self {
        self.vegetation_factors = factors;
        self
    }

    /// Returns the peak months.
    pub fn peak_months(&self) -> &[u8] {
        &self.peak_months
    }

    /// Returns the peak-month frequency.
    pub fn peak_frequency(&self) -> u32 {
        self.peak_frequency
    }

    /// Returns the off-peak frequency.
    pub fn off_peak_frequency(&self) -> u32 {
        self.off_peak_frequency
    }

    /// Returns the park bonus.
    pub fn park_bonus(&self) -> u32 {
        self.park_bonus
    }

    /// Returns the volume per visit.
    pub fn volume_per_visit_m3(&self) -> f64 {
        self.volume_per_visit_m3
    }

    /// Returns the vegetation factors (turf, shrub, mixed).
    pub fn vegetation_factors(&self) -> &[f64; 3] {
        &self.vegetation_factors
    }

    /// Base weekly frequency for `month`.
    pub fn base_frequency(&self, month: u8) -> u32 {
        if self.peak_months.contains(&month) {
            self.peak_frequency
        } else {
            self.off_peak_frequency
        }
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), DemandError> {
        for &m in &self.peak_months {
            if !(1..=12).contains(&m) {
                return Err(DemandError::InvalidMonth { month: m });
            }
        }
        for (name, n) in [
            ("peak_frequency", self.peak_frequency),
            ("off_peak_frequency", self.off_peak_frequency),
        ] {
            let total = n.checked_add(self.park_bonus);
            if total.is_none_or(|t| t > MAX_WEEKLY_FREQUENCY) {
                return Err(DemandError::InvalidRequirement {
                    reason: format!(
                        "{name} + park_bonus must be <= {MAX_WEEKLY_FREQUENCY}, got {n} + {}",
                        self.park_bonus
                    ),
                });
            }
        }
        if !self.volume_per_visit_m3.is_finite() || self.volume_per_visit_m3 < 0.0 {
            return Err(DemandError::InvalidRequirement {
                reason: format!(
                    "volume_per_visit_m3 must be finite and >= 0, got {}",
                    self.volume_per_visit_m3
                ),
            });
        }
        for (class, &f) in VegetationClass::IRRIGATED.iter().zip(&self.vegetation_factors) {
            if !f.is_finite() || f < 0.0 {
                return Err(DemandError::InvalidRequirement {
                    reason: format!("vegetation factor for {class:?} must be finite and >= 0, got {f}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for RequirementConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Weekly minimums for one (vegetation class, month) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requirement {
    min_frequency: u32,
    min_frequency_parks: u32,
    min_volume_m3: f64,
}

impl Requirement {
    /// Minimum active days per week for any irrigated zone.
    pub fn min_frequency(&self) -> u32 {
        self.min_frequency
    }

    /// Minimum active days per week for parks (never below the general one).
    pub fn min_frequency_parks(&self) -> u32 {
        self.min_frequency_parks
    }

    /// Minimum delivered volume per week (m³).
    pub fn min_volume_m3(&self) -> f64 {
        self.min_volume_m3
    }

    /// Frequency that applies to `zone`.
    pub fn frequency_for(&self, zone: &Zone) -> u32 {
        if zone.is_park() {
            self.min_frequency_parks
        } else {
            self.min_frequency
        }
    }
}

/// Requirements keyed by (vegetation class, month).
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementTable {
    entries: BTreeMap<(VegetationClass, u8), Requirement>,
}

impl RequirementTable {
    /// Returns the requirement for `class` in `month`.
    pub fn get(&self, class: VegetationClass, month: u8) -> Option<&Requirement> {
        self.entries.get(&(class, month))
    }

    /// Iterates over `((class, month), requirement)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&(VegetationClass, u8), &Requirement)> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the requirement table for every irrigated class and every
/// month of `calendar`.
///
/// # Errors
///
/// Returns a [`DemandError`] if `config` does not validate.
#[tracing::instrument(skip_all, fields(n_days = calendar.n_days()))]
pub fn compute_requirements(
    calendar: &CalendarData,
    config: &RequirementConfig,
) -> Result<RequirementTable, DemandError> {
    config.validate()?;

    let mut entries = BTreeMap::new();
    for month in calendar.months() {
        let base = config.base_frequency(month);
        for (class, factor) in VegetationClass::IRRIGATED
            .into_iter()
            .zip(config.vegetation_factors)
        {
            entries.insert(
                (class, month),
                Requirement {
                    min_frequency: base,
                    min_frequency_parks: base + config.park_bonus,
                    min_volume_m3: base as f64 * config.volume_per_visit_m3 * factor,
                },
            );
        }
    }

    info!(n_entries = entries.len(), "requirements computed");
    Ok(RequirementTable { entries })
}
