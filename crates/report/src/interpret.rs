//! Reads a solution back into schedules, volumes and deficits.

use std::collections::BTreeMap;

use tracing::{info, warn};
use ugaplan_calendar::{BLOCKS, CalendarData, NIGHT_HOURS, Slot};
use ugaplan_demand::BudgetTable;
use ugaplan_model::{Family, Model, Term, VarKey};
use ugaplan_solve::{Solution, SolutionStatus};
use ugaplan_zones::{Zone, ZoneRegistry};

use crate::error::ReportError;
use crate::output::{DaySchedule, DeficitEntry, Interpretation, MonthVolumes, SlotVolume, ZoneSchedule};

/// Binary variables at or above this value read as 1.
pub const BINARY_THRESHOLD: f64 = 0.5;

/// Continuous values below this read as 0.
pub const VOLUME_EPS: f64 = 1e-9;

struct Reader<'a> {
    model: &'a Model,
    solution: &'a Solution,
}

impl Reader<'_> {
    fn raw(&self, key: VarKey) -> Result<f64, ReportError> {
        match self.model.term(&key) {
            Some(Term::Var(id)) => self
                .solution
                .value(id)
                .ok_or_else(|| ReportError::MissingValue { name: key.name() }),
            Some(Term::Zero(_)) => Ok(0.0),
            None => Err(ReportError::UnknownKey { name: key.name() }),
        }
    }

    fn flag(&self, key: VarKey) -> Result<bool, ReportError> {
        Ok(self.raw(key)? >= BINARY_THRESHOLD)
    }

    fn volume(&self, key: VarKey) -> Result<f64, ReportError> {
        let v = self.raw(key)?;
        Ok(if v < VOLUME_EPS { 0.0 } else { v })
    }
}

/// Interprets `solution` of `model`.
///
/// Works on any usable solution, optimal or not. Excluded variables read
/// as 0.
///
/// # Errors
///
/// Returns [`ReportError`] if the solution does not belong to the model, a
/// month lacks a budget, or a zone-week lacks its volume requirement.
#[tracing::instrument(skip_all, fields(status = %solution.status()))]
pub fn interpret(
    model: &Model,
    calendar: &CalendarData,
    zones: &ZoneRegistry,
    budgets: &BudgetTable,
    solution: &Solution,
) -> Result<Interpretation, ReportError> {
    let reader = Reader { model, solution };

    let per_zone_schedule = zones
        .zones()
        .iter()
        .map(|zone| zone_schedule(&reader, calendar, zone))
        .collect::<Result<Vec<_>, _>>()?;
    let per_month_source_volumes = month_volumes(calendar, budgets, &per_zone_schedule)?;
    let deficit_report = deficits(&reader, calendar, zones, &per_zone_schedule)?;

    let bound = match solution.status() {
        SolutionStatus::Feasible { bound } => Some(bound),
        SolutionStatus::Optimal | SolutionStatus::TimedOut => None,
    };
    if !solution.status().is_optimal() {
        warn!(status = %solution.status(), "interpreting a non-optimal solution");
    }

    let interpretation = Interpretation {
        status: solution.status().to_string(),
        objective: solution.objective(),
        bound,
        per_zone_schedule,
        per_month_source_volumes,
        deficit_report,
    };
    info!(
        objective = interpretation.objective,
        total_deficit_m3 = interpretation.total_deficit_m3(),
        "solution interpreted"
    );
    Ok(interpretation)
}

fn zone_schedule(
    reader: &Reader<'_>,
    calendar: &CalendarData,
    zone: &Zone,
) -> Result<ZoneSchedule, ReportError> {
    let z = zone.id();
    let mut days = Vec::with_capacity(calendar.n_days());
    for info in calendar.days() {
        let day = info.day();
        let mut slots = Vec::new();
        let all = NIGHT_HOURS
            .into_iter()
            .map(Slot::Night)
            .chain(BLOCKS.into_iter().map(Slot::Block));
        for slot in all {
            let potable_m3 = reader.volume(VarKey::Potable { zone: z, day, slot })?;
            let grey_m3 = reader.volume(VarKey::Grey { zone: z, day, slot })?;
            if potable_m3 > 0.0 || grey_m3 > 0.0 {
                slots.push(SlotVolume {
                    slot: slot.to_string(),
                    potable_m3,
                    grey_m3,
                });
            }
        }
        days.push(DaySchedule {
            day: day.get(),
            month: info.month(),
            active: reader.flag(VarKey::Active { zone: z, day })?,
            slots,
            wash_m3: reader.volume(VarKey::Wash { zone: z, day })?,
        });
    }
    Ok(ZoneSchedule {
        zone: z,
        kind: zone.kind(),
        days,
    })
}

fn month_volumes(
    calendar: &CalendarData,
    budgets: &BudgetTable,
    schedule: &[ZoneSchedule],
) -> Result<Vec<MonthVolumes>, ReportError> {
    // month -> (potable irrigation, grey irrigation, wash)
    let mut sums: BTreeMap<u8, (f64, f64, f64)> = BTreeMap::new();
    for day in schedule.iter().flat_map(|z| &z.days) {
        let entry = sums.entry(day.month).or_default();
        entry.0 += day.potable_m3();
        entry.1 += day.grey_m3();
        entry.2 += day.wash_m3;
    }

    calendar
        .months()
        .into_iter()
        .map(|month| {
            let budget = budgets
                .get(month)
                .ok_or(ReportError::MissingBudget { month })?;
            let (potable, grey, wash) = sums.get(&month).copied().unwrap_or_default();
            Ok(MonthVolumes {
                month,
                potable_irrigation_m3: potable,
                grey_irrigation_m3: grey,
                wash_m3: wash,
                potable_total_m3: potable + wash,
                potable_budget_m3: budget.potable_m3(),
                grey_budget_m3: budget.grey_m3(),
            })
        })
        .collect()
}

fn deficits(
    reader: &Reader<'_>,
    calendar: &CalendarData,
    zones: &ZoneRegistry,
    schedule: &[ZoneSchedule],
) -> Result<Vec<DeficitEntry>, ReportError> {
    let required: BTreeMap<&str, f64> = reader
        .model
        .constraints_in(Family::MinVolume)
        .map(|c| (c.name(), c.rhs()))
        .collect();

    let mut out = Vec::new();
    for (zone, zs) in zones.zones().iter().zip(schedule) {
        if !zone.is_irrigable() {
            continue;
        }
        let z = zone.id();
        for week in calendar.weeks() {
            let w = week.id();
            let name = format!("{}_z{z}_w{w}", Family::MinVolume.prefix());
            let required_m3 = *required
                .get(name.as_str())
                .ok_or(ReportError::MissingRequirement { zone: z, week: w.get() })?;
            let delivered_m3: f64 = week
                .days()
                .iter()
                .filter_map(|d| zs.days.get(d.index()))
                .map(|d| d.potable_m3() + d.grey_m3())
                .sum();
            out.push(DeficitEntry {
                zone: z,
                week: w.get(),
                month: week.month(),
                required_m3,
                delivered_m3,
                deficit_m3: reader.volume(VarKey::WeeklyDeficit { zone: z, week: w })?,
            });
        }
    }
    Ok(out)
}
