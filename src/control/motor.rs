//! Motor speed, direction and low-power state machine.
//!
//! ```text
//!            turn_on [safe band]                 toggle_direction
//!   OFF ─────────────────────────▶ RUNNING ◀──────────────────┐
//!  (Zero) ◀───────────────────────  (Quarter..Full) ──────────┘
//!            turn_off / forced off
//! ```
//!
//! `speed == Zero` is the only representation of "off".  Direction is kept
//! while the motor is off so a restart resumes the previous rotation.
//! Commands are idempotent: a redundant command returns a warning-class
//! [`MotorError`] and leaves the state untouched.

use core::fmt;

use serde::Serialize;

use crate::config::ControllerConfig;
use crate::control::level::LevelThresholds;
use crate::error::MotorError;

/// Discrete speed ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Speed {
    Zero,
    Quarter,
    Half,
    ThreeQuarter,
    Full,
}

impl Speed {
    /// 8-bit drive duty for this speed.
    pub const fn duty(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Quarter => 64,
            Self::Half => 128,
            Self::ThreeQuarter => 191,
            Self::Full => 255,
        }
    }

    pub const fn percent(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Quarter => 25,
            Self::Half => 50,
            Self::ThreeQuarter => 75,
            Self::Full => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// H-bridge input pair `(in1, in2)`.
    pub fn polarity(self) -> Polarity {
        match self {
            Self::Clockwise => Polarity { in1: true, in2: false },
            Self::CounterClockwise => Polarity { in1: false, in2: true },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clockwise => "CLOCKWISE",
            Self::CounterClockwise => "COUNTER-CLOCKWISE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two-bit actuator polarity derived from [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity {
    pub in1: bool,
    pub in2: bool,
}

/// Regulator cutoffs (exclusive upper bounds) for the four running speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedBands {
    pub quarter_max: u16,
    pub half_max: u16,
    pub three_quarter_max: u16,
}

impl SpeedBands {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            quarter_max: config.quarter_speed_max,
            half_max: config.half_speed_max,
            three_quarter_max: config.three_quarter_speed_max,
        }
    }

    /// Map a regulator reading onto a running speed.  The top band is open-ended.
    pub fn speed_for(&self, regulator: u16) -> Speed {
        if regulator < self.quarter_max {
            Speed::Quarter
        } else if regulator < self.half_max {
            Speed::Half
        } else if regulator < self.three_quarter_max {
            Speed::ThreeQuarter
        } else {
            Speed::Full
        }
    }
}

pub struct MotorController {
    speed: Speed,
    direction: Direction,
    low_power: bool,
    bands: SpeedBands,
    thresholds: LevelThresholds,
}

impl MotorController {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            speed: Speed::Zero,
            direction: Direction::Clockwise,
            low_power: false,
            bands: SpeedBands::from_config(config),
            thresholds: LevelThresholds::from_config(config),
        }
    }

    /// Start the motor.  Only allowed while the pool is inside the safe band.
    pub fn turn_on(&mut self, quantity: u32, regulator: u16) -> Result<Speed, MotorError> {
        if self.is_running() {
            return Err(MotorError::AlreadyRunning);
        }
        if !self.thresholds.in_safe_band(quantity) {
            return Err(MotorError::UnsafeLevel { quantity });
        }
        Ok(self.adjust_speed(regulator))
    }

    pub fn turn_off(&mut self) -> Result<(), MotorError> {
        if !self.is_running() {
            return Err(MotorError::AlreadyStopped);
        }
        self.speed = Speed::Zero;
        Ok(())
    }

    /// Flip the rotation direction.  Returns the new direction.
    pub fn toggle_direction(&mut self) -> Result<Direction, MotorError> {
        if !self.is_running() {
            return Err(MotorError::NotRunning);
        }
        self.direction = self.direction.flipped();
        Ok(self.direction)
    }

    /// Recompute the running speed.  Low-power mode pins it to `Quarter`.
    pub fn adjust_speed(&mut self, regulator: u16) -> Speed {
        self.speed = if self.low_power {
            Speed::Quarter
        } else {
            self.bands.speed_for(regulator)
        };
        self.speed
    }

    pub fn enter_low_power(&mut self) {
        self.low_power = true;
        if self.is_running() {
            self.speed = Speed::Quarter;
        }
    }

    /// Leave low-power mode and restore the regulator-selected speed.
    pub fn exit_low_power(&mut self, regulator: u16) {
        self.low_power = false;
        if self.is_running() {
            self.adjust_speed(regulator);
        }
    }

    pub fn is_running(&self) -> bool {
        self.speed != Speed::Zero
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn low_power(&self) -> bool {
        self.low_power
    }
}
