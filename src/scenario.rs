//! Loads a scenario file and assembles every model input.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use ugaplan_calendar::CalendarData;
use ugaplan_demand::{
    BudgetTable, FlowCap, RequirementTable, compute_budgets, compute_requirements, flow_cap,
};
use ugaplan_model::{Model, ModelInputs, ModelParams, build_model};
use ugaplan_zones::{RawZoneRecord, ZoneRegistry, load_zones};

use crate::config::{ScenarioConfig, ZonesFile};
use crate::convert;

/// Everything needed to build, solve and interpret one model.
pub struct Scenario {
    /// Calendar, truncated to the horizon when one is set.
    pub calendar: CalendarData,
    /// Validated zones.
    pub zones: ZoneRegistry,
    /// Monthly potable and grey budgets.
    pub budgets: BudgetTable,
    /// Weekly requirements per vegetation class and month.
    pub requirements: RequirementTable,
    /// Hourly flow cap for the Big-M coupling.
    pub flow_cap: FlowCap,
    /// Costs, wash window and fleet capacity.
    pub params: ModelParams,
}

impl Scenario {
    /// Reads `path` and builds all inputs. `horizon` overrides
    /// `[calendar].horizon_days`.
    pub fn load(path: &Path, horizon: Option<u16>) -> Result<Self> {
        // Step 1: Parse TOML
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: ScenarioConfig =
            toml::from_str(&toml_str).context("failed to parse TOML config")?;

        // Step 2: Build library configs
        let demand_cfg = convert::build_demand_config(&config.demand)?;
        let requirement_cfg = convert::build_requirement_config(&config.requirements)?;
        let flow_cfg = convert::build_flow_cap_config(&config.hydraulics)?;
        let params = convert::build_model_params(&config.costs, &config.washing)?;

        // Step 3: Calendar
        let mut calendar = CalendarData::build(config.calendar.year)
            .with_context(|| format!("failed to build calendar for {}", config.calendar.year))?;
        if let Some(n) = convert::resolve_horizon(horizon, &config.calendar)? {
            calendar = calendar
                .truncated(n)
                .with_context(|| format!("invalid horizon of {n} days"))?;
        }
        info!(
            year = calendar.year(),
            n_days = calendar.n_days(),
            n_weeks = calendar.weeks().len(),
            "calendar built"
        );

        // Step 4: Zones
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut records = collect_records(&config, base)?;
        convert::apply_default_wash_volume(&mut records, config.washing.volume_m3);
        let zones = load_zones(&records).context("zone validation failed")?;

        // Step 5: Budgets, requirements, flow cap
        let budgets = compute_budgets(&zones, &calendar, &demand_cfg)
            .context("failed to compute budgets")?;
        let requirements = compute_requirements(&calendar, &requirement_cfg)
            .context("failed to compute requirements")?;
        let flow_cap = flow_cap(&flow_cfg, &zones).context("failed to compute flow cap")?;
        info!(cap = flow_cap.per_hour(), "flow cap");

        Ok(Self {
            calendar,
            zones,
            budgets,
            requirements,
            flow_cap,
            params,
        })
    }

    /// Builds the model.
    pub fn build(&self) -> Result<Model> {
        let inputs = ModelInputs {
            calendar: &self.calendar,
            zones: &self.zones,
            budgets: &self.budgets,
            requirements: &self.requirements,
            flow_cap: self.flow_cap,
        };
        build_model(&inputs, &self.params).context("model construction failed")
    }
}

/// Inline records followed by those of `zones_file`.
fn collect_records(config: &ScenarioConfig, base: &Path) -> Result<Vec<RawZoneRecord>> {
    let mut records = config.zones.clone();
    if let Some(file) = &config.zones_file {
        let path = base.join(file);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read zones file: {}", path.display()))?;
        let parsed: ZonesFile = toml::from_str(&text)
            .with_context(|| format!("failed to parse zones file: {}", path.display()))?;
        records.extend(parsed.zones);
    }
    if records.is_empty() {
        bail!("no zones: add [[zones]] records or set zones_file");
    }
    Ok(records)
}
