//! Pool level classification and net-rate signal.
//!
//! ```text
//!  0 ── low_lower ── low_higher ── high_lower ── critical_lower ── full_lower ── full_cutoff ≤ capacity
//!  │ Empty │   Low    │     Ok      │    High     │    Critical     │        Full         │
//!                                                                    motor forced off ──▶│
//! ```
//!
//! Classification is a pure function of the quantity.  The stateful part
//! of the hysteresis (low-power entry/exit timing) lives in the safety
//! supervisor.

use core::fmt;

use serde::Serialize;

use crate::config::ControllerConfig;

/// Six ordered, non-overlapping bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PoolLevel {
    Empty,
    Low,
    Ok,
    High,
    Critical,
    Full,
}

impl PoolLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Low => "LOW",
            Self::Ok => "OK",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for PoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band boundaries, copied out of [`ControllerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelThresholds {
    pub low_lower: u32,
    pub low_higher: u32,
    pub high_lower: u32,
    pub critical_lower: u32,
    pub full_lower: u32,
    pub full_cutoff: u32,
}

impl LevelThresholds {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            low_lower: config.low_lower,
            low_higher: config.low_higher,
            high_lower: config.high_lower,
            critical_lower: config.critical_lower,
            full_lower: config.full_lower,
            full_cutoff: config.full_cutoff,
        }
    }

    pub fn classify(&self, quantity: u32) -> PoolLevel {
        if quantity < self.low_lower {
            PoolLevel::Empty
        } else if quantity < self.low_higher {
            PoolLevel::Low
        } else if quantity < self.high_lower {
            PoolLevel::Ok
        } else if quantity < self.critical_lower {
            PoolLevel::High
        } else if quantity < self.full_lower {
            PoolLevel::Critical
        } else {
            PoolLevel::Full
        }
    }

    /// True at or above the hard cutoff inside the top of the range.
    pub fn at_cutoff(&self, quantity: u32) -> bool {
        quantity >= self.full_cutoff
    }

    /// Turn-on band: strictly above `low_higher`, up to and including `high_lower`.
    pub fn in_safe_band(&self, quantity: u32) -> bool {
        quantity > self.low_higher && quantity <= self.high_lower
    }
}

// ───────────────────────────────────────────────────────────────
// Net rate
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Gain,
    Loss,
    Steady,
}

/// Magnitude and direction of the pool change since the last log snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetRate {
    pub magnitude: u32,
    pub trend: Trend,
}

impl NetRate {
    pub const STEADY: Self = Self {
        magnitude: 0,
        trend: Trend::Steady,
    };

    pub fn between(previous: u32, current: u32) -> Self {
        let trend = match current.cmp(&previous) {
            core::cmp::Ordering::Greater => Trend::Gain,
            core::cmp::Ordering::Less => Trend::Loss,
            core::cmp::Ordering::Equal => Trend::Steady,
        };
        Self {
            magnitude: current.abs_diff(previous),
            trend,
        }
    }
}
