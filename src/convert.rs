//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use ugaplan_demand::{DemandConfig, FlowCapConfig, RequirementConfig};
use ugaplan_model::{CostConfig, ModelParams};
use ugaplan_zones::RawZoneRecord;

use crate::config::*;

/// Builds a validated [`DemandConfig`].
///
/// Explicit `seasonal_factors` win over the peak/trough pair.
pub fn build_demand_config(t: &DemandToml) -> Result<DemandConfig> {
    let cfg = DemandConfig::new()
        .with_allocation_rate(t.allocation_rate)
        .with_grey_fraction(t.grey_fraction);
    let cfg = match t.seasonal_factors {
        Some(factors) => cfg.with_seasonal_factors(factors),
        None => cfg.with_peak_trough(t.peak_factor, t.trough_factor),
    };
    cfg.validate().context("invalid [demand] section")?;
    Ok(cfg)
}

/// Builds a validated [`RequirementConfig`].
pub fn build_requirement_config(t: &RequirementsToml) -> Result<RequirementConfig> {
    let cfg = RequirementConfig::new()
        .with_peak_months(t.peak_months.clone())
        .with_peak_frequency(t.peak_frequency)
        .with_off_peak_frequency(t.off_peak_frequency)
        .with_park_bonus(t.park_bonus)
        .with_volume_per_visit_m3(t.volume_per_visit_m3)
        .with_vegetation_factors(t.vegetation_factors);
    cfg.validate().context("invalid [requirements] section")?;
    Ok(cfg)
}

/// Builds a validated [`FlowCapConfig`].
pub fn build_flow_cap_config(t: &HydraulicsToml) -> Result<FlowCapConfig> {
    let mut cfg = FlowCapConfig::new()
        .with_flow_per_m2(t.flow_per_m2)
        .with_bounds(t.min_cap, t.max_cap);
    if let Some(cap) = t.fixed_cap {
        cfg = cfg.with_fixed(cap);
    }
    cfg.validate().context("invalid [hydraulics] section")?;
    Ok(cfg)
}

/// Builds validated [`ModelParams`] from the cost and washing sections.
pub fn build_model_params(costs: &CostsToml, washing: &WashingToml) -> Result<ModelParams> {
    let costs = CostConfig::new()
        .with_potable_cost(costs.potable)
        .with_grey_cost(costs.grey)
        .with_deficit_penalty(costs.deficit_penalty);
    let mut params = ModelParams::new()
        .with_costs(costs)
        .with_wash_window_days(washing.window_days);
    if let Some(cap) = washing.fleet_capacity {
        params = params.with_fleet_capacity(cap);
    }
    params
        .validate()
        .context("invalid [costs] or [washing] section")?;
    Ok(params)
}

/// Fills the wash volume of street records that leave it unset.
///
/// An explicit volume, including 0, is kept for zone validation to judge.
pub fn apply_default_wash_volume(records: &mut [RawZoneRecord], volume_m3: f64) {
    for r in records.iter_mut().filter(|r| r.street) {
        r.wash_volume_m3.get_or_insert(volume_m3);
    }
}

/// Resolves the horizon: the CLI flag wins over `[calendar].horizon_days`.
pub fn resolve_horizon(cli: Option<u16>, t: &CalendarToml) -> Result<Option<u16>> {
    match cli.or(t.horizon_days) {
        Some(0) => bail!("horizon must be at least one day"),
        other => Ok(other),
    }
}
