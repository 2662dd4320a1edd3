//! Day and week newtypes for the 365-day reference year.

use std::fmt;

use crate::error::CalendarError;

/// Number of days in the reference year. Leap years are not supported.
pub const DAYS_PER_YEAR: usize = 365;

/// Number of ISO weeks tracked by the scheduler. ISO week 53 is untracked.
pub const TRACKED_WEEKS: u8 = 52;

/// Day of the reference year (1..=365).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u16);

impl Day {
    /// Creates a new `Day` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDay`] if `day` is not in 1..=365.
    pub fn new(day: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_PER_YEAR as u16).contains(&day) {
            return Err(CalendarError::InvalidDay { day });
        }
        Ok(Self(day))
    }

    /// Builds a `Day` from a 0-based index. Callers guarantee `index < 365`.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u16 + 1)
    }

    /// Returns the inner day value (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=364).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO week id within the tracked range (1..=52).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekId(pub(crate) u8);

impl WeekId {
    /// Creates a new `WeekId`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWeek`] if `week` is not in 1..=52.
    pub fn new(week: u8) -> Result<Self, CalendarError> {
        if !(1..=TRACKED_WEEKS).contains(&week) {
            return Err(CalendarError::InvalidWeek { week });
        }
        Ok(Self(week))
    }

    /// Returns the inner week id.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
