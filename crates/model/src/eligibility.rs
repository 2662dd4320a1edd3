//! Eligibility predicates for every variable family.
//!
//! Each predicate names the rule that excludes a combination, so a missing
//! variable is always traceable to an [`Exclusion`]. The builder evaluates
//! these once per candidate index; [`crate::Model::check_invariants`]
//! re-evaluates them on every declared variable.

use std::fmt;

use ugaplan_calendar::{Block, CalendarData, DayInfo, Slot};
use ugaplan_zones::Zone;

use crate::variable::{VarId, VarKey};

/// The rule that removes a candidate combination from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Exclusion {
    /// Street zones are washed, never irrigated.
    StreetZone,
    /// Only street zones are washed.
    NotStreet,
    /// Irrigation is banned on this weekday.
    CalendarBan,
    /// Private zones may not irrigate during blocks 1 to 4.
    PrivateHours,
    /// Daytime irrigation needs a spring source.
    NoSpring,
    /// Grey flow needs reclaimed-water infrastructure.
    NoGreyInfra,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Exclusion::StreetZone => "street zone",
            Exclusion::NotStreet => "not a street zone",
            Exclusion::CalendarBan => "calendar ban",
            Exclusion::PrivateHours => "private hours",
            Exclusion::NoSpring => "no spring source",
            Exclusion::NoGreyInfra => "no grey infrastructure",
        };
        f.write_str(s)
    }
}

/// Outcome of an eligibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The variable exists.
    Eligible,
    /// The variable is definitionally zero.
    Excluded(Exclusion),
}

impl Eligibility {
    /// Whether the combination is eligible.
    pub fn is_eligible(self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// Evaluates `next` only when `self` is eligible.
    pub fn and_then(self, next: impl FnOnce() -> Eligibility) -> Eligibility {
        match self {
            Eligibility::Eligible => next(),
            excluded => excluded,
        }
    }

    fn unless(excluded: bool, why: Exclusion) -> Eligibility {
        if excluded {
            Eligibility::Excluded(why)
        } else {
            Eligibility::Eligible
        }
    }
}

/// A variable's contribution to an expression: either the variable or an
/// explicit zero with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// The variable exists.
    Var(VarId),
    /// The variable was excluded.
    Zero(Exclusion),
}

impl Term {
    /// Returns the variable id, if any.
    pub fn var(self) -> Option<VarId> {
        match self {
            Term::Var(v) => Some(v),
            Term::Zero(_) => None,
        }
    }
}

/// Night irrigation: irrigable zones on non-prohibited days.
pub fn night_eligibility(zone: &Zone, day: &DayInfo) -> Eligibility {
    Eligibility::unless(zone.is_street(), Exclusion::StreetZone)
        .and_then(|| Eligibility::unless(day.is_prohibited(), Exclusion::CalendarBan))
}

/// Daytime-block irrigation: night rules, plus private hours and the spring
/// gate.
pub fn day_block_eligibility(zone: &Zone, day: &DayInfo, block: Block) -> Eligibility {
    night_eligibility(zone, day)
        .and_then(|| {
            Eligibility::unless(
                zone.is_private() && block.is_working_hours(),
                Exclusion::PrivateHours,
            )
        })
        .and_then(|| Eligibility::unless(!zone.has_spring(), Exclusion::NoSpring))
}

/// Irrigation in any slot.
pub fn slot_eligibility(zone: &Zone, day: &DayInfo, slot: Slot) -> Eligibility {
    match slot {
        Slot::Night(_) => night_eligibility(zone, day),
        Slot::Block(b) => day_block_eligibility(zone, day, b),
    }
}

/// Grey flow: the zone must be connected to the reclaimed network.
pub fn grey_eligibility(zone: &Zone) -> Eligibility {
    Eligibility::unless(!zone.has_grey_infra(), Exclusion::NoGreyInfra)
}

/// Daily activity: streets on every day, irrigable zones on permitted days.
pub fn activity_eligibility(zone: &Zone, day: &DayInfo) -> Eligibility {
    if zone.is_street() {
        Eligibility::Eligible
    } else {
        Eligibility::unless(day.is_prohibited(), Exclusion::CalendarBan)
    }
}

/// Wash volume: street zones only.
pub fn wash_eligibility(zone: &Zone) -> Eligibility {
    Eligibility::unless(!zone.is_street(), Exclusion::NotStreet)
}

/// Weekly count and deficit: irrigable zones only.
pub fn weekly_eligibility(zone: &Zone) -> Eligibility {
    Eligibility::unless(zone.is_street(), Exclusion::StreetZone)
}

/// Eligibility of an arbitrary key.
///
/// Returns `None` when the key's day lies outside `calendar`.
pub fn key_eligibility(key: &VarKey, zone: &Zone, calendar: &CalendarData) -> Option<Eligibility> {
    let day = match key.day() {
        Some(d) => Some(calendar.day(d)?),
        None => None,
    };
    let eligibility = match (*key, day) {
        (VarKey::Irrigate { slot, .. } | VarKey::Potable { slot, .. }, Some(d)) => {
            slot_eligibility(zone, d, slot)
        }
        (VarKey::Grey { slot, .. }, Some(d)) => {
            slot_eligibility(zone, d, slot).and_then(|| grey_eligibility(zone))
        }
        (VarKey::Active { .. }, Some(d)) => activity_eligibility(zone, d),
        (VarKey::Wash { .. }, _) => wash_eligibility(zone),
        (VarKey::WeeklyCount { .. } | VarKey::WeeklyDeficit { .. }, _) => weekly_eligibility(zone),
        // day-indexed keys always resolved a day above
        (_, None) => return None,
    };
    Some(eligibility)
}
