//! Error types for the ugaplan-calendar crate.

/// Error type for all fallible operations in the ugaplan-calendar crate.
///
/// Covers out-of-range day, week, hour and block values as well as
/// calendars whose day list does not partition the reference year.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day value is outside the valid range 1..=365.
    #[error("invalid day: {day} (must be 1..=365)")]
    InvalidDay {
        /// The invalid day value that was provided.
        day: u16,
    },

    /// Returned when an ISO week id is outside the tracked range 1..=52.
    #[error("invalid week: {week} (must be 1..=52)")]
    InvalidWeek {
        /// The invalid week id.
        week: u8,
    },

    /// Returned when an hour is not one of the night irrigation hours.
    #[error("invalid night hour: {hour} (must be 22, 23 or 0..=9)")]
    InvalidNightHour {
        /// The invalid hour.
        hour: u8,
    },

    /// Returned when a daytime block id is outside 1..=6.
    #[error("invalid block: {block} (must be 1..=6)")]
    InvalidBlock {
        /// The invalid block id.
        block: u8,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month.
        month: u8,
    },

    /// Returned when the year cannot be represented as a calendar date.
    #[error("invalid year: {year}")]
    InvalidYear {
        /// The invalid year.
        year: i32,
    },

    /// Returned when the generated calendar does not contain exactly
    /// the reference number of days (leap years, calendar edge cases).
    #[error("calendar integrity error for year {year}: expected {expected} days, got {got}")]
    Integrity {
        /// Year the calendar was generated for.
        year: i32,
        /// Number of days the reference year must contain.
        expected: usize,
        /// Number of days actually generated.
        got: usize,
    },

    /// Returned when a day appears more than once in a day list.
    #[error("calendar integrity error: day {day} appears more than once")]
    DuplicateDay {
        /// The repeated day.
        day: u16,
    },

    /// Returned when a day list skips a day.
    #[error("calendar integrity error: day {day} is missing")]
    MissingDay {
        /// The first skipped day.
        day: u16,
    },

    /// Returned when a truncation horizon is empty or longer than the calendar.
    #[error("invalid horizon: {n_days} days (calendar has {available})")]
    InvalidHorizon {
        /// Requested number of days.
        n_days: u16,
        /// Number of days available.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_day() {
        let err = CalendarError::InvalidDay { day: 0 };
        assert_eq!(err.to_string(), "invalid day: 0 (must be 1..=365)");
    }

    #[test]
    fn error_invalid_week() {
        let err = CalendarError::InvalidWeek { week: 53 };
        assert_eq!(err.to_string(), "invalid week: 53 (must be 1..=52)");
    }

    #[test]
    fn error_invalid_night_hour() {
        let err = CalendarError::InvalidNightHour { hour: 12 };
        assert_eq!(
            err.to_string(),
            "invalid night hour: 12 (must be 22, 23 or 0..=9)"
        );
    }

    #[test]
    fn error_integrity() {
        let err = CalendarError::Integrity {
            year: 2024,
            expected: 365,
            got: 366,
        };
        assert_eq!(
            err.to_string(),
            "calendar integrity error for year 2024: expected 365 days, got 366"
        );
    }

    #[test]
    fn error_duplicate_and_missing() {
        assert_eq!(
            CalendarError::DuplicateDay { day: 7 }.to_string(),
            "calendar integrity error: day 7 appears more than once"
        );
        assert_eq!(
            CalendarError::MissingDay { day: 8 }.to_string(),
            "calendar integrity error: day 8 is missing"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_partial_eq() {
        let a = CalendarError::InvalidBlock { block: 0 };
        let b = CalendarError::InvalidBlock { block: 0 };
        assert_eq!(a, b);
        assert_ne!(a, CalendarError::InvalidBlock { block: 7 });
    }
}
