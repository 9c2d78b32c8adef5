use chrono::Local;

use crate::types::SlotTime;

/// Source of "now" for slot generation.
pub trait Clock {
    fn now(&self) -> SlotTime;
}

/// Local wall clock with the time zone dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SlotTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SlotTime);

impl Clock for FixedClock {
    fn now(&self) -> SlotTime {
        self.0
    }
}
