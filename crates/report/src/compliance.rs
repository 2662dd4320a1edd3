//! Post-solve checks of an interpreted schedule.

use std::fmt;

use serde::Serialize;
use ugaplan_calendar::{CalendarData, Day};
use ugaplan_zones::{ZoneId, ZoneKind};

use crate::output::Interpretation;

/// Absolute slack allowed on budget checks (m³).
const BUDGET_TOL: f64 = 1e-6;

/// A rule the interpreted schedule breaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ComplianceIssue {
    /// Potable irrigation plus washing exceeds the month's budget.
    PotableBudgetExceeded {
        month: u8,
        used_m3: f64,
        budget_m3: f64,
    },
    /// Grey irrigation exceeds the month's budget.
    GreyBudgetExceeded {
        month: u8,
        used_m3: f64,
        budget_m3: f64,
    },
    /// A street goes a full window without a wash event.
    WashGap {
        zone: ZoneId,
        first_day: u16,
        last_day: u16,
    },
    /// Irrigation volume on a banned day.
    ProhibitedDayIrrigation { zone: ZoneId, day: u16 },
}

impl fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceIssue::PotableBudgetExceeded {
                month,
                used_m3,
                budget_m3,
            } => write!(
                f,
                "month {month}: potable use {used_m3:.3} m³ exceeds budget {budget_m3:.3} m³"
            ),
            ComplianceIssue::GreyBudgetExceeded {
                month,
                used_m3,
                budget_m3,
            } => write!(
                f,
                "month {month}: grey use {used_m3:.3} m³ exceeds budget {budget_m3:.3} m³"
            ),
            ComplianceIssue::WashGap {
                zone,
                first_day,
                last_day,
            } => write!(f, "zone {zone}: no wash between days {first_day} and {last_day}"),
            ComplianceIssue::ProhibitedDayIrrigation { zone, day } => {
                write!(f, "zone {zone}: irrigated on prohibited day {day}")
            }
        }
    }
}

/// Checks budgets, wash coverage over every `wash_window_days` window, and
/// the irrigation ban on `interpretation`.
///
/// An empty result means the schedule complies.
pub fn check_compliance(
    interpretation: &Interpretation,
    calendar: &CalendarData,
    wash_window_days: u16,
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();

    for m in &interpretation.per_month_source_volumes {
        if m.potable_total_m3 > m.potable_budget_m3 + BUDGET_TOL {
            issues.push(ComplianceIssue::PotableBudgetExceeded {
                month: m.month,
                used_m3: m.potable_total_m3,
                budget_m3: m.potable_budget_m3,
            });
        }
        if m.grey_irrigation_m3 > m.grey_budget_m3 + BUDGET_TOL {
            issues.push(ComplianceIssue::GreyBudgetExceeded {
                month: m.month,
                used_m3: m.grey_irrigation_m3,
                budget_m3: m.grey_budget_m3,
            });
        }
    }

    let window = wash_window_days as usize;
    for zs in &interpretation.per_zone_schedule {
        if zs.kind == ZoneKind::Street {
            if window == 0 || zs.days.len() < window {
                continue;
            }
            for span in zs.days.windows(window) {
                if !span.iter().any(|d| d.is_wash_event()) {
                    issues.push(ComplianceIssue::WashGap {
                        zone: zs.zone,
                        first_day: span[0].day,
                        last_day: span[window - 1].day,
                    });
                }
            }
        } else {
            for d in &zs.days {
                let banned = Day::new(d.day)
                    .ok()
                    .and_then(|day| calendar.day(day))
                    .is_some_and(|info| info.is_prohibited());
                if banned && !d.slots.is_empty() {
                    issues.push(ComplianceIssue::ProhibitedDayIrrigation {
                        zone: zs.zone,
                        day: d.day,
                    });
                }
            }
        }
    }
    issues
}
