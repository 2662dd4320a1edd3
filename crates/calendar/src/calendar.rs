//! Calendar construction: per-day metadata and ISO-week grouping.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::day::{DAYS_PER_YEAR, Day, TRACKED_WEEKS, WeekId};
use crate::error::CalendarError;

/// Weekdays on which municipal ordinance bans irrigation.
pub const PROHIBITED_WEEKDAYS: [Weekday; 2] = [Weekday::Wed, Weekday::Sun];

/// Metadata for one day of the scheduling year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    day: Day,
    month: u8,
    weekday: Weekday,
    iso_week: Option<WeekId>,
    prohibited: bool,
}

impl DayInfo {
    /// Creates day metadata. The prohibition flag is derived from `weekday`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn new(
        day: Day,
        month: u8,
        weekday: Weekday,
        iso_week: Option<WeekId>,
    ) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self {
            day,
            month,
            weekday,
            iso_week,
            prohibited: PROHIBITED_WEEKDAYS.contains(&weekday),
        })
    }

    fn from_date(day: Day, date: NaiveDate) -> Self {
        let iso = date.iso_week().week();
        let iso_week = if iso <= TRACKED_WEEKS as u32 {
            Some(WeekId(iso as u8))
        } else {
            None
        };
        Self {
            day,
            month: date.month() as u8,
            weekday: date.weekday(),
            iso_week,
            prohibited: PROHIBITED_WEEKDAYS.contains(&date.weekday()),
        }
    }

    /// Returns the day.
    pub fn day(&self) -> Day {
        self.day
    }

    /// Returns the month (1..=12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the weekday.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Returns the tracked ISO week, or `None` for ISO week 53.
    pub fn iso_week(&self) -> Option<WeekId> {
        self.iso_week
    }

    /// Whether irrigation is banned on this day (street washing is exempt).
    pub fn is_prohibited(&self) -> bool {
        self.prohibited
    }
}

/// A tracked ISO week and the days of the scheduling year that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    id: WeekId,
    days: Vec<Day>,
    month: u8,
}

impl Week {
    /// Returns the week id.
    pub fn id(&self) -> WeekId {
        self.id
    }

    /// Returns the days of this week in ascending order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Month of the first tracked day, used to resolve month-indexed
    /// requirements for weekly constraints.
    pub fn month(&self) -> u8 {
        self.month
    }
}

/// Immutable calendar for one scheduling year (or a truncated horizon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarData {
    year: i32,
    days: Vec<DayInfo>,
    weeks: Vec<Week>,
}

impl CalendarData {
    /// Builds the full calendar for `year`.
    ///
    /// Every date of the year becomes one [`DayInfo`]. Days are filed under
    /// their ISO week number; the last days of December that belong to
    /// ISO week 1 of the next year are filed under week 1, and days in ISO
    /// week 53 are untracked.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Integrity`] unless the year has exactly 365
    /// days, and [`CalendarError::InvalidYear`] if the year is not
    /// representable.
    pub fn build(year: i32) -> Result<Self, CalendarError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::InvalidYear { year })?;
        let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| d.year() == year).collect();
        if dates.len() != DAYS_PER_YEAR {
            return Err(CalendarError::Integrity {
                year,
                expected: DAYS_PER_YEAR,
                got: dates.len(),
            });
        }

        let days = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| DayInfo::from_date(Day::from_index(i), date))
            .collect();
        Self::from_days(year, days)
    }

    /// Builds a calendar from an explicit day list.
    ///
    /// The list must contain days `1..=n` exactly once each, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DuplicateDay`] or [`CalendarError::MissingDay`]
    /// when the list does not partition `1..=n`.
    pub fn from_days(year: i32, days: Vec<DayInfo>) -> Result<Self, CalendarError> {
        if days.is_empty() {
            return Err(CalendarError::MissingDay { day: 1 });
        }
        for (i, info) in days.iter().enumerate() {
            let expected = i as u16 + 1;
            let got = info.day.get();
            if got < expected {
                return Err(CalendarError::DuplicateDay { day: got });
            }
            if got > expected {
                return Err(CalendarError::MissingDay { day: expected });
            }
        }

        let mut weeks: Vec<Week> = Vec::new();
        for info in &days {
            let Some(id) = info.iso_week else {
                continue;
            };
            match weeks.iter_mut().find(|w| w.id == id) {
                Some(week) => week.days.push(info.day),
                None => weeks.push(Week {
                    id,
                    days: vec![info.day],
                    month: info.month,
                }),
            }
        }
        weeks.sort_by_key(|w| w.id);

        Ok(Self { year, days, weeks })
    }

    /// Returns a calendar restricted to the first `n_days` days.
    ///
    /// Weeks keep only surviving days; weeks left empty are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidHorizon`] if `n_days` is zero or
    /// exceeds the current number of days.
    pub fn truncated(&self, n_days: u16) -> Result<Self, CalendarError> {
        if n_days == 0 || n_days as usize > self.days.len() {
            return Err(CalendarError::InvalidHorizon {
                n_days,
                available: self.days.len(),
            });
        }
        Self::from_days(self.year, self.days[..n_days as usize].to_vec())
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns all days in order.
    pub fn days(&self) -> &[DayInfo] {
        &self.days
    }

    /// Returns the number of days in the horizon.
    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    /// Returns the metadata for `day`, if it lies inside the horizon.
    pub fn day(&self, day: Day) -> Option<&DayInfo> {
        self.days.get(day.index())
    }

    /// Returns the tracked weeks sorted by id.
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Returns the week with the given id, if tracked within the horizon.
    pub fn week(&self, id: WeekId) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == id)
    }

    /// Returns the distinct months covered by the horizon, ascending.
    pub fn months(&self) -> Vec<u8> {
        let mut months: Vec<u8> = self.days.iter().map(|d| d.month).collect();
        months.dedup();
        months
    }

    /// Returns the days that fall in `month`.
    pub fn days_in_month(&self, month: u8) -> impl Iterator<Item = &DayInfo> {
        self.days.iter().filter(move |d| d.month == month)
    }

    /// Returns the days on which irrigation is banned.
    pub fn prohibited_days(&self) -> impl Iterator<Item = Day> + '_ {
        self.days.iter().filter(|d| d.prohibited).map(|d| d.day)
    }
}
