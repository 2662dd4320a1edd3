//! Model construction.
//!
//! Five phases: declare variables, hard constraints, coupling constraints,
//! soft (deficit) constraints, objective. Phase 1 is sequential because
//! variable ids follow declaration order. Constraint families only read the
//! inputs and the variable index, so they are built in parallel, each into
//! its own vector, and concatenated in [`Family::ALL`] order.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};
use ugaplan_calendar::{BLOCKS, CalendarData, Day, DayInfo, NIGHT_HOURS, Slot, Week};
use ugaplan_demand::{BudgetTable, FlowCap, Requirement, RequirementTable};
use ugaplan_zones::{Zone, ZoneRegistry};

use crate::eligibility::{
    Eligibility, Exclusion, Term, activity_eligibility, grey_eligibility, slot_eligibility,
    wash_eligibility, weekly_eligibility,
};
use crate::error::ModelError;
use crate::expr::{Constraint, Family, LinearExpr, Objective, ObjectiveSense, Sense};
use crate::model::{ExclusionLedger, Model};
use crate::params::ModelParams;
use crate::variable::{VarId, VarKey, Variable};

/// Read-only inputs of [`build_model`].
#[derive(Debug, Clone, Copy)]
pub struct ModelInputs<'a> {
    /// Scheduling horizon.
    pub calendar: &'a CalendarData,
    /// Validated zones.
    pub zones: &'a ZoneRegistry,
    /// Monthly budgets for every month of the horizon.
    pub budgets: &'a BudgetTable,
    /// Weekly requirements for every irrigated class and month.
    pub requirements: &'a RequirementTable,
    /// Hourly flow cap `M`.
    pub flow_cap: FlowCap,
}

/// Night hours first, then daytime blocks.
fn all_slots() -> impl Iterator<Item = Slot> {
    NIGHT_HOURS
        .into_iter()
        .map(Slot::Night)
        .chain(BLOCKS.into_iter().map(Slot::Block))
}

/// Builds the complete model.
///
/// The builder is a pure function of its inputs: identical inputs give
/// equal models.
///
/// # Errors
///
/// Returns [`ModelError`] if `params` does not validate, a month lacks a
/// budget, a zone lacks a requirement, or the built variables fail
/// [`Model::check_invariants`].
#[tracing::instrument(skip_all, fields(n_zones = inputs.zones.len(), n_days = inputs.calendar.n_days()))]
pub fn build_model(inputs: &ModelInputs<'_>, params: &ModelParams) -> Result<Model, ModelError> {
    params.validate()?;

    // Phase 1: variables
    let decl = Declarations::build(inputs);
    debug!(
        n_variables = decl.variables.len(),
        n_excluded = decl.ledger.total(),
        "variables declared"
    );
    for ((family, exclusion), n) in decl.ledger.iter() {
        debug!(%family, %exclusion, n, "excluded candidates");
    }

    // Phases 2-4: constraint families
    let ctx = FamilyCtx {
        inputs,
        params,
        decl: &decl,
    };
    let built: Vec<Vec<Constraint>> = Family::ALL
        .par_iter()
        .map(|&family| family_builder(family)(&ctx))
        .collect::<Result<_, _>>()?;
    for (family, cs) in Family::ALL.iter().zip(&built) {
        debug!(%family, n = cs.len(), "constraint family built");
    }
    let constraints: Vec<Constraint> = built.into_iter().flatten().collect();

    // Phase 5: objective
    let objective = build_objective(&ctx);

    let Declarations {
        variables,
        index,
        excluded,
        ledger,
    } = decl;
    let model = Model {
        variables,
        index,
        excluded,
        ledger,
        constraints,
        objective,
    };
    model.check_invariants(inputs.calendar, inputs.zones)?;

    info!(
        n_variables = model.n_variables(),
        n_constraints = model.constraints().len(),
        n_excluded = model.exclusions().total(),
        "model built"
    );
    Ok(model)
}

/// Phase 1 output.
struct Declarations {
    variables: Vec<Variable>,
    index: BTreeMap<VarKey, VarId>,
    excluded: BTreeMap<VarKey, Exclusion>,
    ledger: ExclusionLedger,
}

impl Declarations {
    fn build(inputs: &ModelInputs<'_>) -> Self {
        let mut decl = Self {
            variables: Vec::new(),
            index: BTreeMap::new(),
            excluded: BTreeMap::new(),
            ledger: ExclusionLedger::default(),
        };
        let cap = inputs.flow_cap;

        for zone in inputs.zones.zones() {
            let z = zone.id();
            for info in inputs.calendar.days() {
                let day = info.day();
                for slot in all_slots() {
                    let slot_ok = slot_eligibility(zone, info, slot);
                    let upper = Some(cap.for_hours(slot.hours()));
                    decl.declare(VarKey::Irrigate { zone: z, day, slot }, slot_ok, Variable::binary);
                    decl.declare(VarKey::Potable { zone: z, day, slot }, slot_ok, |k| {
                        Variable::continuous(k, upper)
                    });
                    decl.declare(
                        VarKey::Grey { zone: z, day, slot },
                        slot_ok.and_then(|| grey_eligibility(zone)),
                        |k| Variable::continuous(k, upper),
                    );
                }
                decl.declare(
                    VarKey::Active { zone: z, day },
                    activity_eligibility(zone, info),
                    Variable::binary,
                );
                decl.declare(VarKey::Wash { zone: z, day }, wash_eligibility(zone), |k| {
                    Variable::continuous(k, Some(zone.wash_volume_m3()))
                });
            }

            for week in inputs.calendar.weeks() {
                let open_days = week
                    .days()
                    .iter()
                    .filter(|&&day| decl.index.contains_key(&VarKey::Active { zone: z, day }))
                    .count();
                decl.declare(
                    VarKey::WeeklyCount { zone: z, week: week.id() },
                    weekly_eligibility(zone),
                    |k| Variable::integer(k, open_days as f64),
                );
                decl.declare(
                    VarKey::WeeklyDeficit { zone: z, week: week.id() },
                    weekly_eligibility(zone),
                    |k| Variable::continuous(k, None),
                );
            }
        }
        decl
    }

    fn declare(&mut self, key: VarKey, eligibility: Eligibility, make: impl FnOnce(VarKey) -> Variable) {
        match eligibility {
            Eligibility::Eligible => {
                let id = VarId(self.variables.len() as u32);
                self.variables.push(make(key));
                self.index.insert(key, id);
            }
            Eligibility::Excluded(e) => {
                self.excluded.insert(key, e);
                self.ledger.record(key.family(), e);
            }
        }
    }
}

type FamilyFn = fn(&FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError>;

fn family_builder(family: Family) -> FamilyFn {
    match family {
        Family::ActivityLower => activity_lower,
        Family::ActivityUpper => activity_upper,
        Family::NightFlowCoupling => night_flow_coupling,
        Family::DayFlowCoupling => day_flow_coupling,
        Family::WashLink => wash_link,
        Family::PotableBudget => potable_budget,
        Family::GreyBudget => grey_budget,
        Family::WeeklyCount => weekly_count,
        Family::MinFrequency => min_frequency,
        Family::MinFrequencyParks => min_frequency_parks,
        Family::MinVolume => min_volume,
        Family::WashCoverage => wash_coverage,
        Family::FleetCapacity => fleet_capacity,
    }
}

/// Shared read-only state for the constraint families.
struct FamilyCtx<'a> {
    inputs: &'a ModelInputs<'a>,
    params: &'a ModelParams,
    decl: &'a Declarations,
}

impl FamilyCtx<'_> {
    fn zones(&self) -> &[Zone] {
        self.inputs.zones.zones()
    }

    fn days(&self) -> &[DayInfo] {
        self.inputs.calendar.days()
    }

    fn weeks(&self) -> &[Week] {
        self.inputs.calendar.weeks()
    }

    /// Resolves a candidate key; keys outside the candidate set are a
    /// builder bug and surface as an invariant error.
    fn term(&self, key: VarKey) -> Result<Term, ModelError> {
        if let Some(&id) = self.decl.index.get(&key) {
            return Ok(Term::Var(id));
        }
        match self.decl.excluded.get(&key) {
            Some(&e) => Ok(Term::Zero(e)),
            None => Err(ModelError::IndexInvariant {
                family: key.family(),
                name: key.name(),
                zone: key.zone(),
                reason: "key outside the candidate set".to_string(),
            }),
        }
    }

    /// Like [`FamilyCtx::term`] but the variable must exist.
    fn require(&self, key: VarKey) -> Result<VarId, ModelError> {
        match self.term(key)? {
            Term::Var(id) => Ok(id),
            Term::Zero(e) => Err(ModelError::IndexInvariant {
                family: key.family(),
                name: key.name(),
                zone: key.zone(),
                reason: format!("linked variable excluded by {e}"),
            }),
        }
    }

    fn requirement(&self, zone: &Zone, month: u8) -> Result<&Requirement, ModelError> {
        self.inputs
            .requirements
            .get(zone.vegetation(), month)
            .ok_or(ModelError::MissingRequirement {
                zone: zone.id(),
                class: zone.vegetation(),
                month,
            })
    }

    /// Flow terms (potable and grey) of a zone over `days`.
    fn flow_terms(&self, zone: &Zone, days: &[Day]) -> Result<LinearExpr, ModelError> {
        let mut expr = LinearExpr::new();
        for &day in days {
            for slot in all_slots() {
                let z = zone.id();
                expr.add_term(self.term(VarKey::Potable { zone: z, day, slot })?, 1.0);
                expr.add_term(self.term(VarKey::Grey { zone: z, day, slot })?, 1.0);
            }
        }
        Ok(expr)
    }

    /// Activity terms of a zone over `days`, plus how many exist.
    fn active_terms(&self, zone: &Zone, days: &[Day]) -> Result<(LinearExpr, usize), ModelError> {
        let mut expr = LinearExpr::new();
        let mut n = 0;
        for &day in days {
            let term = self.term(VarKey::Active { zone: zone.id(), day })?;
            if term.var().is_some() {
                n += 1;
            }
            expr.add_term(term, 1.0);
        }
        Ok((expr, n))
    }
}

// --- Coupling ---

/// `x[z,d,s] <= active[z,d]` for every declared slot indicator.
fn activity_lower(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for (i, var) in ctx.decl.variables.iter().enumerate() {
        let VarKey::Irrigate { zone, day, slot } = var.key else {
            continue;
        };
        let active = ctx.require(VarKey::Active { zone, day })?;
        let expr = LinearExpr::new()
            .with(VarId(i as u32), 1.0)
            .with(active, -1.0);
        out.push(Constraint::new(
            Family::ActivityLower,
            format_args!("z{zone}_d{day}_{slot}"),
            expr,
            Sense::Le,
            0.0,
        ));
    }
    Ok(out)
}

/// `active[z,d] <= Σ_s x[z,d,s]` for irrigable zones.
fn activity_upper(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for zone in ctx.zones().iter().filter(|z| z.is_irrigable()) {
        let z = zone.id();
        for info in ctx.days() {
            let day = info.day();
            let Term::Var(active) = ctx.term(VarKey::Active { zone: z, day })? else {
                continue;
            };
            let mut expr = LinearExpr::new().with(active, 1.0);
            for slot in all_slots() {
                expr.add_term(ctx.term(VarKey::Irrigate { zone: z, day, slot })?, -1.0);
            }
            out.push(Constraint::new(
                Family::ActivityUpper,
                format_args!("z{z}_d{day}"),
                expr,
                Sense::Le,
                0.0,
            ));
        }
    }
    Ok(out)
}

/// `fp + fg - cap × hours × x <= 0` for every declared indicator of the
/// chosen slot kind.
fn flow_coupling(
    ctx: &FamilyCtx<'_>,
    family: Family,
    night: bool,
) -> Result<Vec<Constraint>, ModelError> {
    let cap = ctx.inputs.flow_cap;
    let mut out = Vec::new();
    for (i, var) in ctx.decl.variables.iter().enumerate() {
        let VarKey::Irrigate { zone, day, slot } = var.key else {
            continue;
        };
        if matches!(slot, Slot::Night(_)) != night {
            continue;
        }
        let mut expr = LinearExpr::new().with(VarId(i as u32), -cap.for_hours(slot.hours()));
        expr.add(ctx.require(VarKey::Potable { zone, day, slot })?, 1.0);
        expr.add_term(ctx.term(VarKey::Grey { zone, day, slot })?, 1.0);
        out.push(Constraint::new(
            family,
            format_args!("z{zone}_d{day}_{slot}"),
            expr,
            Sense::Le,
            0.0,
        ));
    }
    Ok(out)
}

fn night_flow_coupling(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    flow_coupling(ctx, Family::NightFlowCoupling, true)
}

fn day_flow_coupling(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    flow_coupling(ctx, Family::DayFlowCoupling, false)
}

/// `wash[z,d] = volume × active[z,d]` for street zones.
fn wash_link(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for zone in ctx.zones().iter().filter(|z| z.is_street()) {
        let z = zone.id();
        for info in ctx.days() {
            let day = info.day();
            let expr = LinearExpr::new()
                .with(ctx.require(VarKey::Wash { zone: z, day })?, 1.0)
                .with(
                    ctx.require(VarKey::Active { zone: z, day })?,
                    -zone.wash_volume_m3(),
                );
            out.push(Constraint::new(
                Family::WashLink,
                format_args!("z{z}_d{day}"),
                expr,
                Sense::Eq,
                0.0,
            ));
        }
    }
    Ok(out)
}

// --- Shared resources ---

/// Sums variables selected by `pick` per month of their day.
fn monthly_sums(
    ctx: &FamilyCtx<'_>,
    pick: impl Fn(&VarKey) -> bool,
) -> BTreeMap<u8, LinearExpr> {
    let mut sums: BTreeMap<u8, LinearExpr> = ctx
        .inputs
        .calendar
        .months()
        .into_iter()
        .map(|m| (m, LinearExpr::new()))
        .collect();
    for (i, var) in ctx.decl.variables.iter().enumerate() {
        if !pick(&var.key) {
            continue;
        }
        let month = var
            .key
            .day()
            .and_then(|d| ctx.inputs.calendar.day(d))
            .map(DayInfo::month);
        if let Some(expr) = month.and_then(|m| sums.get_mut(&m)) {
            expr.add(VarId(i as u32), 1.0);
        }
    }
    sums
}

/// Potable irrigation plus wash volume per month within the potable budget.
fn potable_budget(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let sums = monthly_sums(ctx, |k| {
        matches!(k, VarKey::Potable { .. } | VarKey::Wash { .. })
    });
    let mut out = Vec::with_capacity(sums.len());
    for (month, expr) in sums {
        let budget = ctx
            .inputs
            .budgets
            .get(month)
            .ok_or(ModelError::MissingBudget { month })?;
        out.push(Constraint::new(
            Family::PotableBudget,
            format_args!("m{month}"),
            expr,
            Sense::Le,
            budget.potable_m3(),
        ));
    }
    Ok(out)
}

/// Grey irrigation per month within the grey budget.
fn grey_budget(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let sums = monthly_sums(ctx, |k| matches!(k, VarKey::Grey { .. }));
    let mut out = Vec::with_capacity(sums.len());
    for (month, expr) in sums {
        let budget = ctx
            .inputs
            .budgets
            .get(month)
            .ok_or(ModelError::MissingBudget { month })?;
        out.push(Constraint::new(
            Family::GreyBudget,
            format_args!("m{month}"),
            expr,
            Sense::Le,
            budget.grey_m3(),
        ));
    }
    Ok(out)
}

// --- Weekly requirements ---

/// `count[z,w] = Σ_{d in w} active[z,d]`.
fn weekly_count(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for zone in ctx.zones().iter().filter(|z| z.is_irrigable()) {
        let z = zone.id();
        for week in ctx.weeks() {
            let count = ctx.require(VarKey::WeeklyCount { zone: z, week: week.id() })?;
            let (active, _) = ctx.active_terms(zone, week.days())?;
            let mut expr = LinearExpr::new().with(count, 1.0);
            expr.add_scaled(&active, -1.0);
            out.push(Constraint::new(
                Family::WeeklyCount,
                format_args!("z{z}_w{}", week.id()),
                expr,
                Sense::Eq,
                0.0,
            ));
        }
    }
    Ok(out)
}

/// `count[z,w] >= min(required, open days)` where `required` comes from
/// `frequency`.
fn frequency_floor(
    ctx: &FamilyCtx<'_>,
    family: Family,
    applies: impl Fn(&Zone) -> bool,
    frequency: impl Fn(&Requirement) -> u32,
) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for zone in ctx.zones().iter().filter(|z| z.is_irrigable() && applies(z)) {
        let z = zone.id();
        for week in ctx.weeks() {
            let req = ctx.requirement(zone, week.month())?;
            let (_, open_days) = ctx.active_terms(zone, week.days())?;
            let rhs = frequency(req).min(open_days as u32);
            if rhs == 0 {
                continue;
            }
            let count = ctx.require(VarKey::WeeklyCount { zone: z, week: week.id() })?;
            out.push(Constraint::new(
                family,
                format_args!("z{z}_w{}", week.id()),
                LinearExpr::new().with(count, 1.0),
                Sense::Ge,
                rhs as f64,
            ));
        }
    }
    Ok(out)
}

fn min_frequency(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    frequency_floor(ctx, Family::MinFrequency, |_| true, Requirement::min_frequency)
}

fn min_frequency_parks(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    frequency_floor(
        ctx,
        Family::MinFrequencyParks,
        Zone::is_park,
        Requirement::min_frequency_parks,
    )
}

/// `Σ flow over the week + deficit[z,w] >= min volume`.
fn min_volume(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let mut out = Vec::new();
    for zone in ctx.zones().iter().filter(|z| z.is_irrigable()) {
        let z = zone.id();
        for week in ctx.weeks() {
            let req = ctx.requirement(zone, week.month())?;
            let mut expr = ctx.flow_terms(zone, week.days())?;
            expr.add(ctx.require(VarKey::WeeklyDeficit { zone: z, week: week.id() })?, 1.0);
            out.push(Constraint::new(
                Family::MinVolume,
                format_args!("z{z}_w{}", week.id()),
                expr,
                Sense::Ge,
                req.min_volume_m3(),
            ));
        }
    }
    Ok(out)
}

// --- Street washing ---

/// At least one wash in every rolling window, one constraint per window end.
fn wash_coverage(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let window = ctx.params.wash_window_days() as usize;
    let days: Vec<Day> = ctx.days().iter().map(DayInfo::day).collect();
    let mut out = Vec::new();
    if days.len() < window {
        return Ok(out);
    }
    for zone in ctx.zones().iter().filter(|z| z.is_street()) {
        let z = zone.id();
        for span in days.windows(window) {
            let (expr, _) = ctx.active_terms(zone, span)?;
            let end = span[window - 1];
            out.push(Constraint::new(
                Family::WashCoverage,
                format_args!("z{z}_d{end}"),
                expr,
                Sense::Ge,
                1.0,
            ));
        }
    }
    Ok(out)
}

/// `Σ_street active[z,d] <= fleet capacity` per day, when limited.
fn fleet_capacity(ctx: &FamilyCtx<'_>) -> Result<Vec<Constraint>, ModelError> {
    let Some(cap) = ctx.params.fleet_capacity() else {
        return Ok(Vec::new());
    };
    let streets: Vec<&Zone> = ctx.zones().iter().filter(|z| z.is_street()).collect();
    let mut out = Vec::new();
    if streets.is_empty() {
        return Ok(out);
    }
    for info in ctx.days() {
        let day = info.day();
        let mut expr = LinearExpr::new();
        for zone in &streets {
            expr.add(ctx.require(VarKey::Active { zone: zone.id(), day })?, 1.0);
        }
        out.push(Constraint::new(
            Family::FleetCapacity,
            format_args!("d{day}"),
            expr,
            Sense::Le,
            cap as f64,
        ));
    }
    Ok(out)
}

// --- Objective ---

fn build_objective(ctx: &FamilyCtx<'_>) -> Objective {
    let costs = ctx.params.costs();
    let mut expr = LinearExpr::new();
    for (i, var) in ctx.decl.variables.iter().enumerate() {
        let coef = match var.key {
            VarKey::Potable { .. } | VarKey::Wash { .. } => costs.potable_cost(),
            VarKey::Grey { .. } => costs.grey_cost(),
            VarKey::WeeklyDeficit { .. } => costs.deficit_penalty(),
            _ => continue,
        };
        expr.add(VarId(i as u32), coef);
    }
    Objective {
        sense: ObjectiveSense::Minimize,
        expr,
    }
}
