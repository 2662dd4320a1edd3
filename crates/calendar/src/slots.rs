//! Intra-day irrigation slots: night hours and two-hour daytime blocks.

use std::fmt;

use crate::error::CalendarError;

/// An hour of the night irrigation window (22:00 to 09:59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NightHour(u8);

/// The twelve night hours in chronological order, starting at 22:00.
pub const NIGHT_HOURS: [NightHour; 12] = [
    NightHour(22),
    NightHour(23),
    NightHour(0),
    NightHour(1),
    NightHour(2),
    NightHour(3),
    NightHour(4),
    NightHour(5),
    NightHour(6),
    NightHour(7),
    NightHour(8),
    NightHour(9),
];

impl NightHour {
    /// Creates a night hour.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidNightHour`] unless `hour` is 22, 23
    /// or in 0..=9.
    pub fn new(hour: u8) -> Result<Self, CalendarError> {
        if hour == 22 || hour == 23 || hour <= 9 {
            Ok(Self(hour))
        } else {
            Err(CalendarError::InvalidNightHour { hour })
        }
    }

    /// Returns the clock hour (0..=23).
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for NightHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h", self.0)
    }
}

/// A two-hour daytime irrigation block (1..=6), 10:00 to 22:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block(u8);

/// The six daytime blocks in order.
pub const BLOCKS: [Block; 6] = [Block(1), Block(2), Block(3), Block(4), Block(5), Block(6)];

/// Duration of a daytime block in hours.
pub const BLOCK_HOURS: f64 = 2.0;

impl Block {
    /// Creates a daytime block.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidBlock`] if `block` is not in 1..=6.
    pub fn new(block: u8) -> Result<Self, CalendarError> {
        if !(1..=6).contains(&block) {
            return Err(CalendarError::InvalidBlock { block });
        }
        Ok(Self(block))
    }

    /// Returns the block id (1..=6).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Clock hour at which the block starts (10, 12, ..., 20).
    pub fn start_hour(self) -> u8 {
        8 + 2 * self.0
    }

    /// Whether the block falls in the 10:00-18:00 public/working window.
    pub fn is_working_hours(self) -> bool {
        self.0 <= 4
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Either a night hour or a daytime block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// A one-hour night slot.
    Night(NightHour),
    /// A two-hour daytime block.
    Block(Block),
}

impl Slot {
    /// Length of the slot in hours.
    pub fn hours(self) -> f64 {
        match self {
            Slot::Night(_) => 1.0,
            Slot::Block(_) => BLOCK_HOURS,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Night(h) => write!(f, "{h}"),
            Slot::Block(b) => write!(f, "{b}"),
        }
    }
}
