//! Decision variable schema.

use std::fmt;

use ugaplan_calendar::{Day, Slot, WeekId};
use ugaplan_zones::ZoneId;

/// Dense index of a variable within a [`crate::Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// Returns the position of the variable in [`crate::Model::variables`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The variable families of the formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VarFamily {
    /// Night-hour irrigation indicator.
    Night,
    /// Potable flow in a night hour.
    NightPotable,
    /// Grey flow in a night hour.
    NightGrey,
    /// Daytime-block irrigation indicator.
    DayBlock,
    /// Potable flow in a daytime block.
    DayPotable,
    /// Grey flow in a daytime block.
    DayGrey,
    /// Daily activity indicator.
    Active,
    /// Street wash volume.
    Wash,
    /// Active days per ISO week.
    WeeklyCount,
    /// Weekly volume shortfall.
    WeeklyDeficit,
}

impl VarFamily {
    /// Every family, in declaration order.
    pub const ALL: [VarFamily; 10] = [
        VarFamily::Night,
        VarFamily::NightPotable,
        VarFamily::NightGrey,
        VarFamily::DayBlock,
        VarFamily::DayPotable,
        VarFamily::DayGrey,
        VarFamily::Active,
        VarFamily::Wash,
        VarFamily::WeeklyCount,
        VarFamily::WeeklyDeficit,
    ];
}

impl fmt::Display for VarFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VarFamily::Night => "night",
            VarFamily::NightPotable => "night potable flow",
            VarFamily::NightGrey => "night grey flow",
            VarFamily::DayBlock => "day block",
            VarFamily::DayPotable => "day potable flow",
            VarFamily::DayGrey => "day grey flow",
            VarFamily::Active => "active",
            VarFamily::Wash => "wash volume",
            VarFamily::WeeklyCount => "weekly count",
            VarFamily::WeeklyDeficit => "weekly deficit",
        };
        f.write_str(s)
    }
}

/// Typed index of a variable.
///
/// Slot-indexed keys cover both night hours and daytime blocks; the
/// [`Slot`] variant selects the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VarKey {
    /// Irrigation indicator for a zone, day and slot.
    Irrigate { zone: ZoneId, day: Day, slot: Slot },
    /// Potable flow for a zone, day and slot.
    Potable { zone: ZoneId, day: Day, slot: Slot },
    /// Grey flow for a zone, day and slot.
    Grey { zone: ZoneId, day: Day, slot: Slot },
    /// Any activity in a zone on a day.
    Active { zone: ZoneId, day: Day },
    /// Wash volume on a street zone on a day.
    Wash { zone: ZoneId, day: Day },
    /// Active days of a zone in a week.
    WeeklyCount { zone: ZoneId, week: WeekId },
    /// Volume shortfall of a zone in a week.
    WeeklyDeficit { zone: ZoneId, week: WeekId },
}

impl VarKey {
    /// Returns the variable family.
    pub fn family(&self) -> VarFamily {
        match *self {
            VarKey::Irrigate { slot, .. } => match slot {
                Slot::Night(_) => VarFamily::Night,
                Slot::Block(_) => VarFamily::DayBlock,
            },
            VarKey::Potable { slot, .. } => match slot {
                Slot::Night(_) => VarFamily::NightPotable,
                Slot::Block(_) => VarFamily::DayPotable,
            },
            VarKey::Grey { slot, .. } => match slot {
                Slot::Night(_) => VarFamily::NightGrey,
                Slot::Block(_) => VarFamily::DayGrey,
            },
            VarKey::Active { .. } => VarFamily::Active,
            VarKey::Wash { .. } => VarFamily::Wash,
            VarKey::WeeklyCount { .. } => VarFamily::WeeklyCount,
            VarKey::WeeklyDeficit { .. } => VarFamily::WeeklyDeficit,
        }
    }

    /// Returns the zone the variable belongs to.
    pub fn zone(&self) -> ZoneId {
        match *self {
            VarKey::Irrigate { zone, .. }
            | VarKey::Potable { zone, .. }
            | VarKey::Grey { zone, .. }
            | VarKey::Active { zone, .. }
            | VarKey::Wash { zone, .. }
            | VarKey::WeeklyCount { zone, .. }
            | VarKey::WeeklyDeficit { zone, .. } => zone,
        }
    }

    /// Returns the day for day-indexed keys.
    pub fn day(&self) -> Option<Day> {
        match *self {
            VarKey::Irrigate { day, .. }
            | VarKey::Potable { day, .. }
            | VarKey::Grey { day, .. }
            | VarKey::Active { day, .. }
            | VarKey::Wash { day, .. } => Some(day),
            VarKey::WeeklyCount { .. } | VarKey::WeeklyDeficit { .. } => None,
        }
    }

    /// Returns the slot for slot-indexed keys.
    pub fn slot(&self) -> Option<Slot> {
        match *self {
            VarKey::Irrigate { slot, .. }
            | VarKey::Potable { slot, .. }
            | VarKey::Grey { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Returns a solver-safe name, e.g. `x_z3_d41_b5`.
    pub fn name(&self) -> String {
        match *self {
            VarKey::Irrigate { zone, day, slot } => format!("x_z{zone}_d{day}_{slot}"),
            VarKey::Potable { zone, day, slot } => format!("fp_z{zone}_d{day}_{slot}"),
            VarKey::Grey { zone, day, slot } => format!("fg_z{zone}_d{day}_{slot}"),
            VarKey::Active { zone, day } => format!("a_z{zone}_d{day}"),
            VarKey::Wash { zone, day } => format!("w_z{zone}_d{day}"),
            VarKey::WeeklyCount { zone, week } => format!("n_z{zone}_w{week}"),
            VarKey::WeeklyDeficit { zone, week } => format!("def_z{zone}_w{week}"),
        }
    }
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// 0 or 1.
    Binary,
    /// Non-negative integer.
    Integer,
    /// Non-negative real.
    Continuous,
}

/// A declared decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(crate) key: VarKey,
    pub(crate) domain: Domain,
    pub(crate) lower: f64,
    pub(crate) upper: Option<f64>,
}

impl Variable {
    pub(crate) fn binary(key: VarKey) -> Self {
        Self {
            key,
            domain: Domain::Binary,
            lower: 0.0,
            upper: Some(1.0),
        }
    }

    pub(crate) fn integer(key: VarKey, upper: f64) -> Self {
        Self {
            key,
            domain: Domain::Integer,
            lower: 0.0,
            upper: Some(upper),
        }
    }

    pub(crate) fn continuous(key: VarKey, upper: Option<f64>) -> Self {
        Self {
            key,
            domain: Domain::Continuous,
            lower: 0.0,
            upper,
        }
    }

    /// Returns the typed key.
    pub fn key(&self) -> &VarKey {
        &self.key
    }

    /// Returns the solver-safe name.
    pub fn name(&self) -> String {
        self.key.name()
    }

    /// Returns the domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound, `None` for unbounded.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugaplan_calendar::{Block, NightHour};

    fn day(d: u16) -> Day {
        Day::new(d).unwrap()
    }

    #[test]
    fn slot_selects_family() {
        let night = Slot::Night(NightHour::new(23).unwrap());
        let block = Slot::Block(Block::new(5).unwrap());
        let z = ZoneId(1);
        let d = day(3);
        assert_eq!(
            VarKey::Irrigate { zone: z, day: d, slot: night }.family(),
            VarFamily::Night
        );
        assert_eq!(
            VarKey::Grey { zone: z, day: d, slot: block }.family(),
            VarFamily::DayGrey
        );
    }

    #[test]
    fn names() {
        let key = VarKey::Irrigate {
            zone: ZoneId(3),
            day: day(41),
            slot: Slot::Block(Block::new(5).unwrap()),
        };
        assert_eq!(key.name(), "x_z3_d41_b5");
        let key = VarKey::Potable {
            zone: ZoneId(1),
            day: day(2),
            slot: Slot::Night(NightHour::new(3).unwrap()),
        };
        assert_eq!(key.name(), "fp_z1_d2_03h");
        let key = VarKey::WeeklyDeficit {
            zone: ZoneId(7),
            week: WeekId::new(12).unwrap(),
        };
        assert_eq!(key.name(), "def_z7_w12");
    }

    #[test]
    fn accessors() {
        let key = VarKey::WeeklyCount {
            zone: ZoneId(2),
            week: WeekId::new(1).unwrap(),
        };
        assert_eq!(key.zone(), ZoneId(2));
        assert!(key.day().is_none());
        assert!(key.slot().is_none());
    }

    #[test]
    fn constructors_set_bounds() {
        let key = VarKey::Active {
            zone: ZoneId(1),
            day: day(1),
        };
        let v = Variable::binary(key);
        assert_eq!(v.domain(), Domain::Binary);
        assert_eq!(v.upper(), Some(1.0));
        let v = Variable::continuous(key, None);
        assert_eq!(v.lower(), 0.0);
        assert!(v.upper().is_none());
    }
}
