//! Controller configuration parameters
//!
//! Every tunable constant of the energy-harvesting controller lives here.
//! Values are fixed at build time; the firmware never negotiates them at
//! runtime, but the struct is serde-enabled so a host tool can dump or
//! load a profile.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Pool ---
    /// Absolute pool capacity (energy units).
    pub capacity: u32,
    /// Below this the pool is `Empty`.
    pub low_lower: u32,
    /// Start of the `Ok` band; turn-on requires quantity strictly above it.
    pub low_higher: u32,
    /// Start of the `High` band; upper (inclusive) edge of the turn-on band.
    pub high_lower: u32,
    /// Start of the `Critical` warning band.
    pub critical_lower: u32,
    /// Start of the `Full` band.
    pub full_lower: u32,
    /// Hard cutoff: motor is forced off at or above this quantity.
    pub full_cutoff: u32,
    /// Net-rate magnitude that maps to full indicator intensity.
    pub inflow_abs_max: u32,

    // --- Stochastic inflow ---
    /// Upper bound (inclusive) of the random inflow bonus.
    pub random_inflow_max: u32,
    /// Interval between random inflow bonuses (milliseconds).
    pub random_inflow_interval_ms: u32,

    // --- Motor regulator bands (exclusive upper cutoffs) ---
    pub quarter_speed_max: u16,
    pub half_speed_max: u16,
    pub three_quarter_speed_max: u16,

    // --- Analog ranges ---
    /// Full-scale reading of the analog inputs (valve, regulator).
    pub analog_read_max: u16,
    /// Full-scale value of the analog (PWM) outputs.
    pub analog_write_max: u8,
    /// Tone frequency of the motor-off signal (Hz).
    pub motor_off_tone_hz: u32,

    // --- Timing (milliseconds) ---
    pub debounce_interval_ms: u32,
    pub log_interval_ms: u32,
    pub low_blink_ms: u32,
    pub ok_blink_ms: u32,
    pub high_blink_ms: u32,
    pub critical_blink_ms: u32,
    /// Minimum spacing between two low-power entry requests.
    pub low_power_request_timeout_ms: u32,
    /// Minimum spacing between two admitted control cycles.
    pub stability_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Pool
            capacity: 5_000_000,
            low_lower: 500_000,
            low_higher: 1_200_000,
            high_lower: 2_500_000,
            critical_lower: 3_500_000,
            full_lower: 4_000_000,
            full_cutoff: 5_000_000,
            inflow_abs_max: 150_000,

            // Stochastic inflow
            random_inflow_max: 1000,
            random_inflow_interval_ms: 1000,

            // Regulator bands
            quarter_speed_max: 256,
            half_speed_max: 512,
            three_quarter_speed_max: 767,

            // Analog ranges
            analog_read_max: 1023,
            analog_write_max: 255,
            motor_off_tone_hz: 50_000,

            // Timing
            debounce_interval_ms: 50,
            log_interval_ms: 3000,
            low_blink_ms: 1000,
            ok_blink_ms: 1000,
            high_blink_ms: 500,
            critical_blink_ms: 250,
            low_power_request_timeout_ms: 50,
            stability_interval_ms: 25, // 40 Hz
        }
    }
}

impl ControllerConfig {
    /// Reject configurations that would break the band or timing invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            self.low_lower,
            self.low_higher,
            self.high_lower,
            self.critical_lower,
            self.full_lower,
            self.full_cutoff,
        ];
        if self.low_lower == 0 {
            return Err(ConfigError::ValidationFailed("low_lower must be above zero"));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ValidationFailed(
                "pool thresholds must be strictly increasing",
            ));
        }
        if self.full_cutoff > self.capacity {
            return Err(ConfigError::ValidationFailed(
                "full_cutoff must not exceed capacity",
            ));
        }
        if !(self.quarter_speed_max < self.half_speed_max
            && self.half_speed_max < self.three_quarter_speed_max)
        {
            return Err(ConfigError::ValidationFailed(
                "regulator cutoffs must be strictly increasing",
            ));
        }
        if self.inflow_abs_max == 0 {
            return Err(ConfigError::ValidationFailed("inflow_abs_max must be above zero"));
        }
        if self.analog_read_max == 0 || self.analog_write_max == 0 {
            return Err(ConfigError::ValidationFailed("analog full scale must be above zero"));
        }

        let intervals = [
            self.random_inflow_interval_ms,
            self.debounce_interval_ms,
            self.log_interval_ms,
            self.low_blink_ms,
            self.ok_blink_ms,
            self.high_blink_ms,
            self.critical_blink_ms,
            self.low_power_request_timeout_ms,
            self.stability_interval_ms,
        ];
        if intervals.contains(&0) {
            return Err(ConfigError::ValidationFailed("intervals must be above zero"));
        }
        Ok(())
    }
}
