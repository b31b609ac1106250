//! Level safety supervisor.
//!
//! Runs **every admitted cycle right after classification** and couples
//! the pool level to the motor:
//!
//! 1. `Empty` forces the motor off.
//! 2. At or above the full cutoff the motor is forced off.  The cutoff sits
//!    inside the top of the range, above the `Critical` warning band.
//! 3. `Low` requests low-power mode.  Requests are spaced by their own
//!    timeout, and a request only takes effect while the motor runs and
//!    is not already in low-power mode.
//! 4. Leaving `Low` with the motor running and the flag set exits
//!    low-power mode.  With the motor off the flag is left alone until
//!    the motor restarts.
//!
//! Forced shutdowns are no-ops when the motor is already off.

use core::fmt;

use log::{error, info};
use serde::Serialize;

use crate::config::ControllerConfig;
use crate::control::context::ControlContext;
use crate::control::level::PoolLevel;
use crate::scheduler::Interval;

/// Why the supervisor stopped the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShutdownCause {
    /// Pool drained below the low band.
    PoolEmpty,
    /// Pool reached the hard full cutoff.
    PoolFull,
}

impl fmt::Display for ShutdownCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolEmpty => write!(f, "pool empty"),
            Self::PoolFull => write!(f, "pool full"),
        }
    }
}

/// What the supervisor did this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyAction {
    ForcedShutdown(ShutdownCause),
    LowPowerEntered,
    LowPowerExited,
}

pub struct SafetySupervisor {
    low_power_requests: Interval,
}

impl SafetySupervisor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            low_power_requests: Interval::new(config.low_power_request_timeout_ms),
        }
    }

    /// Evaluate the current classification against the motor state.
    pub fn evaluate(&mut self, ctx: &mut ControlContext, now_ms: u32) -> Option<SafetyAction> {
        let quantity = ctx.pool.quantity();

        // ── Hard tripwires ────────────────────────────────────────
        let cause = if ctx.level == PoolLevel::Empty {
            Some(ShutdownCause::PoolEmpty)
        } else if ctx.thresholds.at_cutoff(quantity) {
            Some(ShutdownCause::PoolFull)
        } else {
            None
        };
        if let Some(cause) = cause {
            if ctx.motor.turn_off().is_ok() {
                error!("SAFETY: {cause} (quantity={quantity}), motor forced off");
                return Some(SafetyAction::ForcedShutdown(cause));
            }
        }

        // ── Low-power hysteresis ──────────────────────────────────
        if ctx.level == PoolLevel::Low {
            if self.low_power_requests.fire_if_due(now_ms)
                && ctx.motor.is_running()
                && !ctx.motor.low_power()
            {
                ctx.motor.enter_low_power();
                info!("SAFETY: pool low, entering low power mode");
                return Some(SafetyAction::LowPowerEntered);
            }
        } else if ctx.motor.is_running() && ctx.motor.low_power() {
            ctx.motor.exit_low_power(ctx.sensors.regulator);
            info!("SAFETY: pool left low band, exiting low power mode");
            return Some(SafetyAction::LowPowerExited);
        }

        None
    }
}
