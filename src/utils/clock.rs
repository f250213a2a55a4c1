// Wall-clock access, injectable so time-dependent logic can be tested

use chrono::{Local, NaiveDateTime};
use std::cell::Cell;

/// Source of the current time
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
    /// Current local date and time
    fn local_now(&self) -> NaiveDateTime;
}

/// The real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    millis: Cell<i64>,
    local: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(millis: i64, local: NaiveDateTime) -> Self {
        Self {
            millis: Cell::new(millis),
            local: Cell::new(local),
        }
    }

    /// Fixed at `millis`, with local time derived from it as UTC
    pub fn at_millis(millis: i64) -> Self {
        let local = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .naive_utc();
        Self::new(millis, local)
    }

    pub fn advance_millis(&self, delta: i64) {
        self.millis.set(self.millis.get() + delta);
        self.local
            .set(self.local.get() + chrono::Duration::milliseconds(delta));
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.get()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.local.get()
    }
}
