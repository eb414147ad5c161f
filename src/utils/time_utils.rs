//! Wall-clock access and timestamp formatting

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Second-resolution timestamp format used in generated file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Current time formatted with [`TIMESTAMP_FORMAT`]
    fn timestamp(&self) -> String {
        format_timestamp(&self.now())
    }
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Clock fixed at the given date and time; `None` if out of range
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let clock = FixedClock::at(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(clock.timestamp(), "2024-03-09_07-05-01");
    }

    #[test]
    fn test_invalid_fixed_clock() {
        assert!(FixedClock::at(2024, 2, 30, 0, 0, 0).is_none());
    }
}
