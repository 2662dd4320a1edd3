//! The built model: variables, constraints, objective and exclusions.

use std::collections::BTreeMap;

use ugaplan_calendar::CalendarData;
use ugaplan_zones::ZoneRegistry;

use crate::eligibility::{Eligibility, Exclusion, Term, key_eligibility};
use crate::error::ModelError;
use crate::expr::{Constraint, Family, Objective};
use crate::variable::{VarFamily, VarId, VarKey, Variable};

/// Count of excluded candidates per (family, rule).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionLedger {
    counts: BTreeMap<(VarFamily, Exclusion), usize>,
}

impl ExclusionLedger {
    pub(crate) fn record(&mut self, family: VarFamily, exclusion: Exclusion) {
        *self.counts.entry((family, exclusion)).or_insert(0) += 1;
    }

    /// Candidates of `family` removed by `exclusion`.
    pub fn count(&self, family: VarFamily, exclusion: Exclusion) -> usize {
        self.counts.get(&(family, exclusion)).copied().unwrap_or(0)
    }

    /// Candidates of `family` removed by any rule.
    pub fn excluded_in(&self, family: VarFamily) -> usize {
        self.counts
            .iter()
            .filter(|((f, _), _)| *f == family)
            .map(|(_, n)| n)
            .sum()
    }

    /// All excluded candidates.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates over `((family, rule), count)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = ((VarFamily, Exclusion), usize)> + '_ {
        self.counts.iter().map(|(&k, &n)| (k, n))
    }
}

/// A fully built mixed-integer linear program.
///
/// Built by [`crate::build_model`]; immutable afterwards. Two builds from
/// identical inputs compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) variables: Vec<Variable>,
    pub(crate) index: BTreeMap<VarKey, VarId>,
    pub(crate) excluded: BTreeMap<VarKey, Exclusion>,
    pub(crate) ledger: ExclusionLedger,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
}

impl Model {
    /// Returns all variables in id order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the variable with id `id`.
    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    /// Returns the number of variables.
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    /// Returns all constraints in family order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Iterates over the constraints of one family.
    pub fn constraints_in(&self, family: Family) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Returns the objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Returns the id of the variable with `key`, if declared.
    pub fn lookup(&self, key: &VarKey) -> Option<VarId> {
        self.index.get(key).copied()
    }

    /// Resolves `key` to the variable or to the rule that excluded it.
    ///
    /// Returns `None` only for keys outside the candidate set, e.g. a day
    /// past the horizon or an unknown zone.
    pub fn term(&self, key: &VarKey) -> Option<Term> {
        if let Some(&id) = self.index.get(key) {
            return Some(Term::Var(id));
        }
        self.excluded.get(key).map(|&e| Term::Zero(e))
    }

    /// Iterates over declared variables of one family.
    pub fn variables_in(&self, family: VarFamily) -> impl Iterator<Item = (VarId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .filter(move |(_, v)| v.key.family() == family)
            .map(|(i, v)| (VarId(i as u32), v))
    }

    /// Returns the exclusion ledger.
    pub fn exclusions(&self) -> &ExclusionLedger {
        &self.ledger
    }

    /// Re-verifies every declared variable against the eligibility rules.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexInvariant`] for the first variable that
    /// sits on an unknown zone, outside the horizon, or on a combination an
    /// eligibility rule excludes (e.g. irrigation on a street zone or a
    /// prohibited day, grey flow without infrastructure, wash volume off
    /// street).
    pub fn check_invariants(
        &self,
        calendar: &CalendarData,
        zones: &ZoneRegistry,
    ) -> Result<(), ModelError> {
        for var in &self.variables {
            let key = var.key;
            let violation = |reason: String| ModelError::IndexInvariant {
                family: key.family(),
                name: key.name(),
                zone: key.zone(),
                reason,
            };

            let zone = zones
                .get(key.zone())
                .ok_or_else(|| violation("unknown zone".to_string()))?;
            match key_eligibility(&key, zone, calendar) {
                None => return Err(violation("day outside horizon".to_string())),
                Some(Eligibility::Excluded(e)) => return Err(violation(e.to_string())),
                Some(Eligibility::Eligible) => {}
            }
            if let VarKey::WeeklyCount { week, .. } | VarKey::WeeklyDeficit { week, .. } = key {
                if calendar.week(week).is_none() {
                    return Err(violation(format!("week {week} outside horizon")));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_counts() {
        let mut l = ExclusionLedger::default();
        l.record(VarFamily::Night, Exclusion::CalendarBan);
        l.record(VarFamily::Night, Exclusion::CalendarBan);
        l.record(VarFamily::Night, Exclusion::StreetZone);
        l.record(VarFamily::Wash, Exclusion::NotStreet);
        assert_eq!(l.count(VarFamily::Night, Exclusion::CalendarBan), 2);
        assert_eq!(l.count(VarFamily::DayBlock, Exclusion::CalendarBan), 0);
        assert_eq!(l.excluded_in(VarFamily::Night), 3);
        assert_eq!(l.total(), 4);
        assert_eq!(l.iter().count(), 3);
    }
}
