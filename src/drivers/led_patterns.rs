//! Indicator pattern engine for the pool level and net-rate LEDs.
//!
//! The main loop calls [`LevelIndicators::tick`] each admitted cycle with
//! the current classification and gets back an [`IndicatorFrame`] to feed
//! into the actuator port.
//!
//! ## Level → channel
//!
//! | Level    | Channel  | Pattern                      |
//! |----------|----------|------------------------------|
//! | Empty    | Low      | Solid                        |
//! | Low      | Low      | Blink, `low_blink_ms`        |
//! | Ok       | Ok       | Blink, `ok_blink_ms`         |
//! | High     | High     | Blink, `high_blink_ms`       |
//! | Critical | Critical | Blink, `critical_blink_ms`   |
//! | Full     | Critical | Solid                        |
//!
//! Exactly one channel is active at a time; the others are held dark.
//!
//! ## Net rate
//!
//! The net-rate LEDs are analog.  [`net_rate_intensity`] maps a change
//! magnitude linearly onto the output range, clamped at both ends.

use crate::config::ControllerConfig;
use crate::control::level::{NetRate, PoolLevel, Trend};
use crate::scheduler::{BlinkScheduler, IndicatorChannel};

/// Output levels of the four pool-level indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorFrame {
    pub low: bool,
    pub ok: bool,
    pub high: bool,
    pub critical: bool,
}

/// Analog levels of the gain / loss indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetRateOutput {
    pub gain: u8,
    pub loss: u8,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Solid,
    Blink(u32),
}

pub struct LevelIndicators {
    blink: BlinkScheduler,
    low_blink_ms: u32,
    ok_blink_ms: u32,
    high_blink_ms: u32,
    critical_blink_ms: u32,
}

impl LevelIndicators {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            blink: BlinkScheduler::new(),
            low_blink_ms: config.low_blink_ms,
            ok_blink_ms: config.ok_blink_ms,
            high_blink_ms: config.high_blink_ms,
            critical_blink_ms: config.critical_blink_ms,
        }
    }

    /// Advance the active channel's pattern and return the output frame.
    pub fn tick(&mut self, level: PoolLevel, now_ms: u32) -> IndicatorFrame {
        let (channel, pattern) = self.select(level);
        self.blink.only(channel);
        match pattern {
            Pattern::Solid => self.blink.set(channel, true),
            Pattern::Blink(timeout_ms) => {
                self.blink.blink(channel, timeout_ms, now_ms);
            }
        }
        self.frame()
    }

    pub fn frame(&self) -> IndicatorFrame {
        IndicatorFrame {
            low: self.blink.is_on(IndicatorChannel::Low),
            ok: self.blink.is_on(IndicatorChannel::Ok),
            high: self.blink.is_on(IndicatorChannel::High),
            critical: self.blink.is_on(IndicatorChannel::Critical),
        }
    }

    fn select(&self, level: PoolLevel) -> (IndicatorChannel, Pattern) {
        match level {
            PoolLevel::Empty => (IndicatorChannel::Low, Pattern::Solid),
            PoolLevel::Low => (IndicatorChannel::Low, Pattern::Blink(self.low_blink_ms)),
            PoolLevel::Ok => (IndicatorChannel::Ok, Pattern::Blink(self.ok_blink_ms)),
            PoolLevel::High => (IndicatorChannel::High, Pattern::Blink(self.high_blink_ms)),
            PoolLevel::Critical => (
                IndicatorChannel::Critical,
                Pattern::Blink(self.critical_blink_ms),
            ),
            PoolLevel::Full => (IndicatorChannel::Critical, Pattern::Solid),
        }
    }
}

/// Linear map of `[0, abs_max]` onto `[0, out_max]`, clamped.
pub fn net_rate_intensity(magnitude: u32, abs_max: u32, out_max: u8) -> u8 {
    if abs_max == 0 {
        return out_max;
    }
    let clamped = u64::from(magnitude.min(abs_max));
    (clamped * u64::from(out_max) / u64::from(abs_max)) as u8
}

/// Route the mapped intensity onto the channel matching the trend.
pub fn net_rate_output(rate: NetRate, abs_max: u32, out_max: u8) -> NetRateOutput {
    let intensity = net_rate_intensity(rate.magnitude, abs_max, out_max);
    match rate.trend {
        Trend::Gain => NetRateOutput {
            gain: intensity,
            loss: 0,
        },
        Trend::Loss => NetRateOutput {
            gain: 0,
            loss: intensity,
        },
        Trend::Steady => NetRateOutput::default(),
    }
}
