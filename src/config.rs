use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use ugaplan_zones::RawZoneRecord;

/// Top-level scenario configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// TOML file holding `[[zones]]` records, relative to the scenario file.
    #[serde(default)]
    pub zones_file: Option<PathBuf>,

    /// Inline zone records.
    #[serde(default)]
    pub zones: Vec<RawZoneRecord>,

    /// Calendar settings.
    #[serde(default)]
    pub calendar: CalendarToml,

    /// Budget settings.
    #[serde(default)]
    pub demand: DemandToml,

    /// Weekly requirement settings.
    #[serde(default)]
    pub requirements: RequirementsToml,

    /// Flow cap settings.
    #[serde(default)]
    pub hydraulics: HydraulicsToml,

    /// Objective coefficients.
    #[serde(default)]
    pub costs: CostsToml,

    /// Street washing settings.
    #[serde(default)]
    pub washing: WashingToml,
}

/// A standalone zone file, as written by `generate-zones`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZonesFile {
    pub zones: Vec<RawZoneRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    #[serde(default = "default_year")]
    pub year: i32,
    /// Restrict the model to the first `horizon_days` days.
    #[serde(default)]
    pub horizon_days: Option<u16>,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            year: default_year(),
            horizon_days: None,
        }
    }
}

fn default_year() -> i32 {
    2025
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemandToml {
    #[serde(default = "default_allocation_rate")]
    pub allocation_rate: f64,
    /// Explicit monthly factors; overrides `peak_factor`/`trough_factor`.
    #[serde(default)]
    pub seasonal_factors: Option<[f64; 12]>,
    #[serde(default = "default_peak_factor")]
    pub peak_factor: f64,
    #[serde(default = "default_trough_factor")]
    pub trough_factor: f64,
    #[serde(default = "default_grey_fraction")]
    pub grey_fraction: f64,
}

impl Default for DemandToml {
    fn default() -> Self {
        Self {
            allocation_rate: default_allocation_rate(),
            seasonal_factors: None,
            peak_factor: default_peak_factor(),
            trough_factor: default_trough_factor(),
            grey_fraction: default_grey_fraction(),
        }
    }
}

fn default_allocation_rate() -> f64 {
    0.007
}
fn default_peak_factor() -> f64 {
    1.3
}
fn default_trough_factor() -> f64 {
    0.9
}
fn default_grey_fraction() -> f64 {
    0.4
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsToml {
    #[serde(default = "default_peak_months")]
    pub peak_months: Vec<u8>,
    #[serde(default = "default_peak_frequency")]
    pub peak_frequency: u32,
    #[serde(default = "default_off_peak_frequency")]
    pub off_peak_frequency: u32,
    #[serde(default = "default_park_bonus")]
    pub park_bonus: u32,
    #[serde(default = "default_volume_per_visit")]
    pub volume_per_visit_m3: f64,
    /// Volume factors for turf, shrub and mixed vegetation.
    #[serde(default = "default_vegetation_factors")]
    pub vegetation_factors: [f64; 3],
}

impl Default for RequirementsToml {
    fn default() -> Self {
        Self {
            peak_months: default_peak_months(),
            peak_frequency: default_peak_frequency(),
            off_peak_frequency: default_off_peak_frequency(),
            park_bonus: default_park_bonus(),
            volume_per_visit_m3: default_volume_per_visit(),
            vegetation_factors: default_vegetation_factors(),
        }
    }
}

fn default_peak_months() -> Vec<u8> {
    vec![12, 1, 2]
}
fn default_peak_frequency() -> u32 {
    2
}
fn default_off_peak_frequency() -> u32 {
    1
}
fn default_park_bonus() -> u32 {
    1
}
fn default_volume_per_visit() -> f64 {
    1.0
}
fn default_vegetation_factors() -> [f64; 3] {
    [1.0; 3]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HydraulicsToml {
    #[serde(default = "default_flow_per_m2")]
    pub flow_per_m2: f64,
    #[serde(default = "default_min_cap")]
    pub min_cap: f64,
    #[serde(default = "default_max_cap")]
    pub max_cap: f64,
    /// Fixed cap in m³/h; skips the area rule.
    #[serde(default)]
    pub fixed_cap: Option<f64>,
}

impl Default for HydraulicsToml {
    fn default() -> Self {
        Self {
            flow_per_m2: default_flow_per_m2(),
            min_cap: default_min_cap(),
            max_cap: default_max_cap(),
            fixed_cap: None,
        }
    }
}

fn default_flow_per_m2() -> f64 {
    0.002
}
fn default_min_cap() -> f64 {
    3.0
}
fn default_max_cap() -> f64 {
    8.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostsToml {
    #[serde(default = "default_potable_cost")]
    pub potable: f64,
    #[serde(default = "default_grey_cost")]
    pub grey: f64,
    #[serde(default = "default_deficit_penalty")]
    pub deficit_penalty: f64,
}

impl Default for CostsToml {
    fn default() -> Self {
        Self {
            potable: default_potable_cost(),
            grey: default_grey_cost(),
            deficit_penalty: default_deficit_penalty(),
        }
    }
}

fn default_potable_cost() -> f64 {
    0.45
}
fn default_grey_cost() -> f64 {
    0.12
}
fn default_deficit_penalty() -> f64 {
    120.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WashingToml {
    /// Volume for street records that do not set their own.
    #[serde(default = "default_wash_volume")]
    pub volume_m3: f64,
    #[serde(default = "default_window_days")]
    pub window_days: u16,
    #[serde(default)]
    pub fleet_capacity: Option<u32>,
}

impl Default for WashingToml {
    fn default() -> Self {
        Self {
            volume_m3: default_wash_volume(),
            window_days: default_window_days(),
            fleet_capacity: None,
        }
    }
}

fn default_wash_volume() -> f64 {
    5.0
}
fn default_window_days() -> u16 {
    14
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: ScenarioConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.calendar.year, 2025);
        assert_eq!(cfg.calendar.horizon_days, None);
        assert_eq!(cfg.demand.allocation_rate, 0.007);
        assert_eq!(cfg.requirements.peak_months, vec![12, 1, 2]);
        assert_eq!(cfg.costs.deficit_penalty, 120.0);
        assert_eq!(cfg.washing.window_days, 14);
        assert!(cfg.zones.is_empty());
        assert!(cfg.zones_file.is_none());
    }

    #[test]
    fn inline_zones_and_overrides() {
        let text = r#"
            [calendar]
            year = 2023
            horizon_days = 28

            [costs]
            potable = 0.5

            [washing]
            fleet_capacity = 2

            [[zones]]
            id = 1
            park = true
            has_spring = true
            vegetation_class = 1
            area_m2 = 2500.0

            [[zones]]
            id = 2
            street = true
            area_m2 = 400.0
        "#;
        let cfg: ScenarioConfig = toml::from_str(text).unwrap();
        assert_eq!(cfg.calendar.year, 2023);
        assert_eq!(cfg.calendar.horizon_days, Some(28));
        assert_eq!(cfg.costs.potable, 0.5);
        assert_eq!(cfg.costs.grey, 0.12);
        assert_eq!(cfg.washing.fleet_capacity, Some(2));
        assert_eq!(cfg.zones.len(), 2);
        assert!(cfg.zones[0].has_spring);
        assert_eq!(cfg.zones[1].wash_volume_m3, None);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<ScenarioConfig>("[costs]\nwell = 0.1\n").is_err());
        assert!(toml::from_str::<ScenarioConfig>("horizon = 3\n").is_err());
    }
}
