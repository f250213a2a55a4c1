use std::time::{Duration, Instant};

/// Period of the countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Source of periodic ticks.
///
/// The event loop asks how long until the next tick, waits that long (or
/// less, if input arrives), and calls `advance` when it delivers one.
/// `cancel` takes effect immediately: once it returns, no further tick is due.
pub trait Scheduler {
    /// Start ticking. Arming an armed scheduler keeps the current phase.
    fn arm(&mut self);
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
    /// Time until the next tick is due, `None` while disarmed
    fn until_next(&self) -> Option<Duration>;
    /// Record that the due tick was delivered
    fn advance(&mut self);
}

/// Wall-clock scheduler with a fixed period
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Scheduler for IntervalScheduler {
    fn arm(&mut self) {
        if self.next_due.is_none() {
            self.next_due = Some(Instant::now() + self.period);
        }
    }

    fn cancel(&mut self) {
        self.next_due = None;
    }

    fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    fn until_next(&self) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(Instant::now()))
    }

    fn advance(&mut self) {
        // Measured from delivery, not from the previous due time
        if self.next_due.is_some() {
            self.next_due = Some(Instant::now() + self.period);
        }
    }
}

/// Scheduler whose ticks are always due immediately while armed.
/// Lets the countdown run without waiting on the wall clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: bool,
    delivered: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks delivered so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn until_next(&self) -> Option<Duration> {
        self.armed.then_some(Duration::ZERO)
    }

    fn advance(&mut self) {
        if self.armed {
            self.delivered += 1;
        }
    }
}
