//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: a human-readable log line, a JSON
//! record, a test recorder.

use serde::Serialize;

use crate::app::commands::Command;
use crate::control::level::PoolLevel;
use crate::control::motor::{Direction, Speed};
use crate::control::pool::PoolDeltas;
use crate::error::MotorError;
use crate::safety::ShutdownCause;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum AppEvent {
    /// The controller has been constructed (carries the initial level).
    Started(PoolLevel),

    /// Periodic telemetry snapshot, once per log interval.
    Telemetry(TelemetryData),

    /// The pool moved into a different band.
    LevelChanged { from: PoolLevel, to: PoolLevel },

    MotorStarted { speed: Speed, direction: Direction },

    MotorStopped,

    DirectionChanged(Direction),

    /// Redundant command; nothing changed.
    CommandIgnored { command: Command, reason: MotorError },

    /// Unsafe command; refused.
    CommandRejected { command: Command, reason: MotorError },

    /// The safety supervisor stopped the motor.
    ForcedShutdown(ShutdownCause),

    LowPowerEntered,

    LowPowerExited,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryData {
    pub motor_on: bool,
    /// 0 / 25 / 50 / 75 / 100.
    pub speed_percent: u8,
    pub direction: Direction,
    pub level: PoolLevel,
    pub quantity: u32,
    pub capacity: u32,
    /// Windowed deltas since the previous telemetry snapshot.
    pub deltas: PoolDeltas,
    pub valve_open_percent: u8,
    pub low_power: bool,
}
