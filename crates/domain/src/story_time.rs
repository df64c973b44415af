//! The in-fiction story clock.
//!
//! Time in a story is a day counter plus a fixed five-phase cycle. Advancing
//! past the last phase rolls over to the next day's first phase.

use serde::{Deserialize, Serialize};

// =============================================================================
// Time of Day
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "Early Morning",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }

    /// Returns the next phase in sequence, wrapping after `Night`.
    pub fn next(&self) -> TimeOfDay {
        match self {
            TimeOfDay::EarlyMorning => TimeOfDay::Morning,
            TimeOfDay::Morning => TimeOfDay::Afternoon,
            TimeOfDay::Afternoon => TimeOfDay::Evening,
            TimeOfDay::Evening => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::EarlyMorning,
        }
    }

    /// First phase of a day.
    pub fn first() -> TimeOfDay {
        TimeOfDay::EarlyMorning
    }

    /// All phases in order.
    pub fn all() -> [TimeOfDay; 5] {
        [
            TimeOfDay::EarlyMorning,
            TimeOfDay::Morning,
            TimeOfDay::Afternoon,
            TimeOfDay::Evening,
            TimeOfDay::Night,
        ]
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Story Clock
// =============================================================================

/// Day counter plus time-of-day phase for one story.
///
/// `day` is 1-based and only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryClock {
    pub day: u32,
    pub time_of_day: TimeOfDay,
}

impl StoryClock {
    /// Fresh clock for a new story: day 1, morning.
    pub fn new() -> Self {
        Self {
            day: 1,
            time_of_day: TimeOfDay::Morning,
        }
    }

    pub fn at(day: u32, time_of_day: TimeOfDay) -> Self {
        Self {
            day: day.max(1),
            time_of_day,
        }
    }

    /// Move to the next phase. Wrapping past `Night` increments the day and
    /// resets to the first phase.
    pub fn advance(&mut self) {
        if self.time_of_day == TimeOfDay::Night {
            self.day += 1;
            self.time_of_day = TimeOfDay::first();
        } else {
            self.time_of_day = self.time_of_day.next();
        }
    }

    /// Human-readable form; not a wire contract, display only.
    pub fn display(&self) -> String {
        format!("Day {}, {}", self.day, self.time_of_day)
    }
}

impl Default for StoryClock {
    fn default() -> Self {
        Self::new()
    }
}
