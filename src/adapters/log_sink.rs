//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger → UART / USB-CDC in production,
//! whatever logger the host installs otherwise).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | motor={} speed={}% dir={} | level={} pool={}/{} ({:+}) | \
                     in=+{} used=-{} released=-{} | valve={}% | low_power={}",
                    if t.motor_on { "ON" } else { "OFF" },
                    t.speed_percent,
                    t.direction,
                    t.level,
                    t.quantity,
                    t.capacity,
                    t.deltas.quantity,
                    t.deltas.inflow,
                    t.deltas.consumed,
                    t.deltas.released,
                    t.valve_open_percent,
                    t.low_power,
                );
            }
            AppEvent::Started(level) => info!("START | level={level}"),
            AppEvent::LevelChanged { from, to } => info!("LEVEL | {from} -> {to}"),
            AppEvent::MotorStarted { speed, direction } => {
                info!("MOTOR | on, {}% {direction}", speed.percent());
            }
            AppEvent::MotorStopped => info!("MOTOR | off"),
            AppEvent::DirectionChanged(direction) => info!("MOTOR | direction {direction}"),
            AppEvent::CommandIgnored { command, reason } => {
                warn!("CMD | {command} ignored: {reason}");
            }
            AppEvent::CommandRejected { command, reason } => {
                error!("CMD | {command} rejected: {reason}");
            }
            AppEvent::ForcedShutdown(cause) => error!("SAFETY | motor forced off: {cause}"),
            AppEvent::LowPowerEntered => info!("SAFETY | low power on"),
            AppEvent::LowPowerExited => info!("SAFETY | low power off"),
        }
    }
}
