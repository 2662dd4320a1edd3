//! Serialisable interpretation records.

use serde::Serialize;
use ugaplan_zones::{ZoneId, ZoneKind};

use crate::error::ReportError;

/// Interpreted solution of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    /// Solution status label (`optimal`, `feasible`, `timed out`).
    pub status: String,
    /// Objective value of the solution.
    pub objective: f64,
    /// Proven lower bound, for feasible-but-not-optimal solutions.
    pub bound: Option<f64>,
    /// Per-zone, per-day schedule.
    pub per_zone_schedule: Vec<ZoneSchedule>,
    /// Source volumes and budgets per month.
    pub per_month_source_volumes: Vec<MonthVolumes>,
    /// Every irrigable zone-week, zero deficits included.
    pub deficit_report: Vec<DeficitEntry>,
}

impl Interpretation {
    /// Returns the schedule of `zone`, if present.
    pub fn zone(&self, zone: ZoneId) -> Option<&ZoneSchedule> {
        self.per_zone_schedule.iter().find(|z| z.zone == zone)
    }

    /// Returns the volumes of `month`, if inside the horizon.
    pub fn month(&self, month: u8) -> Option<&MonthVolumes> {
        self.per_month_source_volumes.iter().find(|m| m.month == month)
    }

    /// Sum of all weekly deficits (m³).
    pub fn total_deficit_m3(&self) -> f64 {
        self.deficit_report.iter().map(|d| d.deficit_m3).sum()
    }
}

/// Schedule of one zone over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSchedule {
    pub zone: ZoneId,
    pub kind: ZoneKind,
    /// One entry per horizon day, in day order.
    pub days: Vec<DaySchedule>,
}

impl ZoneSchedule {
    /// Days with `active = 1`.
    pub fn active_days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter().filter(|d| d.active)
    }
}

/// One zone-day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub day: u16,
    pub month: u8,
    pub active: bool,
    /// Slots with a nonzero volume only.
    pub slots: Vec<SlotVolume>,
    pub wash_m3: f64,
}

impl DaySchedule {
    /// Potable irrigation volume of the day.
    pub fn potable_m3(&self) -> f64 {
        self.slots.iter().map(|s| s.potable_m3).sum()
    }

    /// Grey irrigation volume of the day.
    pub fn grey_m3(&self) -> f64 {
        self.slots.iter().map(|s| s.grey_m3).sum()
    }

    /// Whether a street wash happened.
    pub fn is_wash_event(&self) -> bool {
        self.active && self.wash_m3 > 0.0
    }
}

/// Irrigation volume delivered in one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotVolume {
    /// Slot label: `22h` for night hours, `b1`..`b6` for daytime blocks.
    pub slot: String,
    pub potable_m3: f64,
    pub grey_m3: f64,
}

/// Monthly use per source against the budgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthVolumes {
    pub month: u8,
    pub potable_irrigation_m3: f64,
    pub grey_irrigation_m3: f64,
    pub wash_m3: f64,
    /// Potable irrigation plus washing.
    pub potable_total_m3: f64,
    pub potable_budget_m3: f64,
    pub grey_budget_m3: f64,
}

/// Weekly volume requirement of one zone and how it was met.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeficitEntry {
    pub zone: ZoneId,
    pub week: u8,
    pub month: u8,
    pub required_m3: f64,
    pub delivered_m3: f64,
    pub deficit_m3: f64,
}

/// Serialize an interpretation to a pretty JSON string.
pub fn to_json(interpretation: &Interpretation) -> Result<String, ReportError> {
    serde_json::to_string_pretty(interpretation).map_err(|e| ReportError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u16, active: bool, potable: f64, wash: f64) -> DaySchedule {
        DaySchedule {
            day,
            month: 1,
            active,
            slots: if potable > 0.0 {
                vec![SlotVolume {
                    slot: "23h".to_string(),
                    potable_m3: potable,
                    grey_m3: 0.5,
                }]
            } else {
                vec![]
            },
            wash_m3: wash,
        }
    }

    #[test]
    fn day_totals() {
        let d = day(2, true, 1.5, 0.0);
        assert_eq!(d.potable_m3(), 1.5);
        assert_eq!(d.grey_m3(), 0.5);
        assert!(!d.is_wash_event());
        assert!(day(3, true, 0.0, 5.0).is_wash_event());
        assert!(!day(3, false, 0.0, 5.0).is_wash_event());
    }

    #[test]
    fn test_to_json() {
        let interp = Interpretation {
            status: "optimal".to_string(),
            objective: 12.5,
            bound: None,
            per_zone_schedule: vec![ZoneSchedule {
                zone: ZoneId(3),
                kind: ZoneKind::Street,
                days: vec![day(1, true, 0.0, 5.0)],
            }],
            per_month_source_volumes: vec![],
            deficit_report: vec![DeficitEntry {
                zone: ZoneId(1),
                week: 2,
                month: 1,
                required_m3: 2.0,
                delivered_m3: 2.0,
                deficit_m3: 0.0,
            }],
        };
        let json = to_json(&interp).unwrap();
        assert!(json.contains("\"status\": \"optimal\""));
        assert!(json.contains("\"kind\": \"street\""));
        assert!(json.contains("\"zone\": 3"));
        assert!(json.contains("\"deficit_m3\": 0.0"));
        assert!(json.contains("\"bound\": null"));
        assert_eq!(interp.total_deficit_m3(), 0.0);
        assert_eq!(interp.zone(ZoneId(3)).unwrap().active_days().count(), 1);
        assert!(interp.zone(ZoneId(9)).is_none());
    }
}
