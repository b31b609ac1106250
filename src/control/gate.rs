//! Minimum-interval admission for the control cycle.
//!
//! The host may poll as fast as it likes; the pipeline body runs at most
//! once per stability interval, which keeps inter-cycle spacing (and so
//! per-cycle inflow/outflow amounts) independent of the poll rate.

use crate::scheduler::Interval;

pub struct CycleGate {
    interval: Interval,
    admitted: u64,
}

impl CycleGate {
    pub fn new(stability_interval_ms: u32) -> Self {
        Self {
            interval: Interval::new(stability_interval_ms),
            admitted: 0,
        }
    }

    /// True at most once per stability interval.
    pub fn admit(&mut self, now_ms: u32) -> bool {
        let admitted = self.interval.fire_if_due(now_ms);
        if admitted {
            self.admitted += 1;
        }
        admitted
    }

    /// Number of cycles admitted since startup.
    pub fn admitted(&self) -> u64 {
        self.admitted
    }
}
