// Rust guideline compliant 2026-02-06

//! Hour-of-day sources for access recording.

use chrono::{Local, Timelike};

/// Supplies the hour of day (0-23) at which an access happens.
pub trait HourClock {
    /// Returns the current hour of day.
    fn current_hour(&self) -> i32;
}

/// Reads the hour from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl HourClock for SystemClock {
    fn current_hour(&self) -> i32 {
        Local::now().hour() as i32
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl HourClock for FixedClock {
    fn current_hour(&self) -> i32 {
        self.0
    }
}
