//! Polling software timers and the blink scheduler.
//!
//! Nothing here blocks or sleeps.  Each timer is a `(last_fired, period)`
//! pair compared against the same monotonic millisecond clock; the control
//! cycle asks "is it due?" once per admitted tick.
//!
//! ```text
//!   Clock ──now_ms──▶ Interval::fire_if_due ──▶ cycle gate
//!                                           ├─▶ stochastic inflow
//!                                           ├─▶ log cadence
//!                                           └─▶ low-power requests
//!
//!   Clock ──now_ms──▶ BlinkScheduler::blink(channel) ──▶ level indicators
//! ```
//!
//! All arithmetic is `wrapping_sub` on `u32` milliseconds, so the 49-day
//! wrap of the millisecond counter is harmless.

use serde::Serialize;

// ═══════════════════════════════════════════════════════════════
//  Interval timer
// ═══════════════════════════════════════════════════════════════

/// A polled periodic timer.
///
/// The timer starts as if it last fired at timestamp 0 (boot).  A check
/// that finds the period elapsed fires **once** and restarts the period
/// from `now`; a gap spanning several periods still yields a single fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u32,
    last_fired_ms: u32,
}

impl Interval {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_fired_ms: 0,
        }
    }

    /// True if at least one period has elapsed since the last fire.
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_fired_ms) >= self.period_ms
    }

    /// Fire if due.  Returns whether it fired.
    pub fn fire_if_due(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_fired_ms = now_ms;
            true
        } else {
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Blink scheduler
// ═══════════════════════════════════════════════════════════════

/// Pool-level indicator channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum IndicatorChannel {
    Low = 0,
    Ok = 1,
    High = 2,
    Critical = 3,
}

impl IndicatorChannel {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [Self::Low, Self::Ok, Self::High, Self::Critical];

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    on: bool,
    last_change_ms: u32,
}

/// Rate-limited on/off toggling, one independent timestamp per channel.
#[derive(Debug, Clone, Default)]
pub struct BlinkScheduler {
    channels: [ChannelState; IndicatorChannel::COUNT],
}

impl BlinkScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `channel` if at least `timeout_ms` passed since its last
    /// change.  Returns whether the channel toggled.
    pub fn blink(&mut self, channel: IndicatorChannel, timeout_ms: u32, now_ms: u32) -> bool {
        let state = &mut self.channels[channel.index()];
        if now_ms.wrapping_sub(state.last_change_ms) >= timeout_ms {
            state.on = !state.on;
            state.last_change_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Force a steady level.  Does not touch the blink timestamp.
    pub fn set(&mut self, channel: IndicatorChannel, on: bool) {
        self.channels[channel.index()].on = on;
    }

    pub fn is_on(&self, channel: IndicatorChannel) -> bool {
        self.channels[channel.index()].on
    }

    /// Switch every channel except `keep` off.
    pub fn only(&mut self, keep: IndicatorChannel) {
        for ch in IndicatorChannel::ALL {
            if ch != keep {
                self.set(ch, false);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
