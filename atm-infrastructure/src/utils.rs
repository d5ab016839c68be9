use chrono::{Local, NaiveDateTime, Timelike};

use atm_domain::Clock;

/// Local wall-clock time truncated to whole seconds, matching the storage layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}
