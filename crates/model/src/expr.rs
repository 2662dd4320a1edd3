//! Linear expressions, constraints and the objective.

use std::collections::BTreeMap;
use std::fmt;

use crate::eligibility::Term;
use crate::variable::VarId;

/// Coefficients below this magnitude are dropped.
const COEF_EPS: f64 = 1e-12;

/// A sparse linear expression `Σ coef × var`.
///
/// Terms are kept in variable order so two expressions built from the same
/// inputs compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, f64>,
}

impl LinearExpr {
    /// The empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coef × var`, merging with an existing term.
    pub fn add(&mut self, var: VarId, coef: f64) {
        let c = self.terms.entry(var).or_insert(0.0);
        *c += coef;
        if c.abs() <= COEF_EPS {
            self.terms.remove(&var);
        }
    }

    /// Adds `coef × term`; a [`Term::Zero`] contributes nothing.
    pub fn add_term(&mut self, term: Term, coef: f64) {
        if let Term::Var(var) = term {
            self.add(var, coef);
        }
    }

    /// Builder form of [`LinearExpr::add`].
    pub fn with(mut self, var: VarId, coef: f64) -> Self {
        self.add(var, coef);
        self
    }

    /// Adds every term of `other`, scaled by `k`.
    pub fn add_scaled(&mut self, other: &LinearExpr, k: f64) {
        for (&v, &c) in &other.terms {
            self.add(v, c * k);
        }
    }

    /// Iterates over `(var, coef)` in variable order.
    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.terms.iter().map(|(&v, &c)| (v, c))
    }

    /// Returns the coefficient of `var` (0 if absent).
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms.get(&var).copied().unwrap_or(0.0)
    }

    /// Returns the number of nonzero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression against a dense value vector.
    ///
    /// Missing entries count as 0.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(v, c)| c * values.get(v.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
    /// `expr = rhs`
    Eq,
}

impl Sense {
    /// Returns the LP-format operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Le => "<=",
            Sense::Ge => ">=",
            Sense::Eq => "=",
        }
    }
}

/// The constraint families of the formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// Activity at least each slot indicator.
    ActivityLower,
    /// Activity at most the sum of slot indicators.
    ActivityUpper,
    /// Night flow enabled by its indicator.
    NightFlowCoupling,
    /// Daytime-block flow enabled by its indicator.
    DayFlowCoupling,
    /// Street wash volume tied to activity.
    WashLink,
    /// Monthly potable budget.
    PotableBudget,
    /// Monthly grey budget.
    GreyBudget,
    /// Weekly count definition.
    WeeklyCount,
    /// General minimum weekly frequency.
    MinFrequency,
    /// Park minimum weekly frequency.
    MinFrequencyParks,
    /// Minimum weekly volume with deficit.
    MinVolume,
    /// At least one wash per rolling window.
    WashCoverage,
    /// Daily wash fleet capacity.
    FleetCapacity,
}

impl Family {
    /// Every family, in build order.
    pub const ALL: [Family; 13] = [
        Family::ActivityLower,
        Family::ActivityUpper,
        Family::NightFlowCoupling,
        Family::DayFlowCoupling,
        Family::WashLink,
        Family::PotableBudget,
        Family::GreyBudget,
        Family::WeeklyCount,
        Family::MinFrequency,
        Family::MinFrequencyParks,
        Family::MinVolume,
        Family::WashCoverage,
        Family::FleetCapacity,
    ];

    /// Short prefix used in constraint names.
    pub fn prefix(self) -> &'static str {
        match self {
            Family::ActivityLower => "actlo",
            Family::ActivityUpper => "acthi",
            Family::NightFlowCoupling => "bign",
            Family::DayFlowCoupling => "bigd",
            Family::WashLink => "wash",
            Family::PotableBudget => "budpot",
            Family::GreyBudget => "budgrey",
            Family::WeeklyCount => "cnt",
            Family::MinFrequency => "freq",
            Family::MinFrequencyParks => "freqpark",
            Family::MinVolume => "vol",
            Family::WashCoverage => "cover",
            Family::FleetCapacity => "fleet",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::ActivityLower => "activity lower link",
            Family::ActivityUpper => "activity upper link",
            Family::NightFlowCoupling => "night flow coupling",
            Family::DayFlowCoupling => "day flow coupling",
            Family::WashLink => "wash link",
            Family::PotableBudget => "potable budget",
            Family::GreyBudget => "grey budget",
            Family::WeeklyCount => "weekly count",
            Family::MinFrequency => "minimum frequency",
            Family::MinFrequencyParks => "park minimum frequency",
            Family::MinVolume => "minimum volume",
            Family::WashCoverage => "wash coverage",
            Family::FleetCapacity => "fleet capacity",
        };
        f.write_str(s)
    }
}

/// A named linear constraint `expr (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub(crate) name: String,
    pub(crate) family: Family,
    pub(crate) expr: LinearExpr,
    pub(crate) sense: Sense,
    pub(crate) rhs: f64,
}

impl Constraint {
    pub(crate) fn new(
        family: Family,
        suffix: impl fmt::Display,
        expr: LinearExpr,
        sense: Sense,
        rhs: f64,
    ) -> Self {
        Self {
            name: format!("{}_{suffix}", family.prefix()),
            family,
            expr,
            sense,
            rhs,
        }
    }

    /// Returns the unique constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the left-hand side.
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    /// Returns the sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Returns the right-hand side.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Whether `values` satisfy the constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tol,
            Sense::Ge => lhs >= self.rhs - tol,
            Sense::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}

/// Optimisation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Minimise the objective.
    Minimize,
}

/// The scalar objective.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub(crate) sense: ObjectiveSense,
    pub(crate) expr: LinearExpr,
}

impl Objective {
    /// Returns the direction.
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Returns the objective expression.
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }
}
