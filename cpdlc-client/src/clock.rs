//! Time sources.
//!
//! The message list stamps every bucket with a wall-clock UTC `h:m` pair
//! for display and a monotonic duration for timeout arithmetic. Both come
//! through [`TimeSource`] so tests can inject a fake clock.

use std::{
    sync::OnceLock,
    time::{Duration, Instant},
};

use chrono::{Timelike, Utc};

/// An injectable clock.
pub trait TimeSource: Send + Sync {
    /// Current UTC wall-clock hours and minutes.
    fn utc_hours_mins(&self) -> (u8, u8);

    /// Monotonic elapsed time since an arbitrary fixed epoch.
    fn monotonic(&self) -> Duration;
}

/// Process-wide monotonic microsecond counter.
pub fn monotonic_us() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_micros() as u64
}

/// The real clock: UTC from the system, monotonic time from the
/// process-wide microsecond counter, so all instances share one epoch.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemClock {
    fn utc_hours_mins(&self) -> (u8, u8) {
        let now = Utc::now();
        (now.hour() as u8, now.minute() as u8)
    }

    fn monotonic(&self) -> Duration {
        Duration::from_micros(monotonic_us())
    }
}
