//! Shared mutable context threaded through every control stage.
//!
//! `ControlContext` is the single struct the cycle stages read from and
//! write to: the pool, the motor, the three debounced inputs, the latest
//! sensor snapshot and the derived classification.  Nothing lives in a
//! static; the controller owns exactly one context.

use heapless::Vec;

use crate::app::commands::Command;
use crate::config::ControllerConfig;
use crate::control::level::{LevelThresholds, NetRate, PoolLevel};
use crate::control::motor::MotorController;
use crate::control::pool::EnergyPool;
use crate::drivers::button::DebouncedInput;

// ---------------------------------------------------------------------------
// Sensor snapshot (written by the sensor port, read by the stages)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every input of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Measured inflow, already scaled to energy units.
    pub inflow: u32,
    /// Speed regulator reading.
    pub regulator: u16,
    /// Release valve reading, subtracted from the pool as release.
    pub valve: u16,
    /// Raw On button level (true = pressed).
    pub on_pressed: bool,
    /// Raw Off button level.
    pub off_pressed: bool,
    /// Raw Toggle button level.
    pub toggle_pressed: bool,
}

impl SensorSnapshot {
    fn raw_level(&self, command: Command) -> bool {
        match command {
            Command::On => self.on_pressed,
            Command::Off => self.off_pressed,
            Command::Toggle => self.toggle_pressed,
        }
    }
}

/// Edges found in one sampling pass, in dispatch order.
pub type CommandEdges = Vec<Command, 3>;

// ---------------------------------------------------------------------------
// ControlContext
// ---------------------------------------------------------------------------

pub struct ControlContext {
    pub pool: EnergyPool,
    pub motor: MotorController,
    /// One debounced input per command, in [`Command::ALL`] order.
    pub inputs: [DebouncedInput; 3],
    pub thresholds: LevelThresholds,
    /// Latest sensor readings.  Updated at the start of each admitted cycle.
    pub sensors: SensorSnapshot,
    /// Classification as of the last classification stage.
    pub level: PoolLevel,
    /// Change since the last log snapshot, recomputed every cycle.
    pub net_rate: NetRate,
}

impl ControlContext {
    pub fn new(config: &ControllerConfig) -> Self {
        let pool = EnergyPool::new(config.capacity);
        let thresholds = LevelThresholds::from_config(config);
        let level = thresholds.classify(pool.quantity());
        Self {
            pool,
            motor: MotorController::new(config),
            inputs: Command::ALL.map(|c| DebouncedInput::new(c, config.debounce_interval_ms)),
            thresholds,
            sensors: SensorSnapshot::default(),
            level,
            net_rate: NetRate::STEADY,
        }
    }

    /// Sample every debounced input against the current snapshot.
    pub fn sample_inputs(&mut self, now_ms: u32) -> CommandEdges {
        let mut edges = CommandEdges::new();
        for input in &mut self.inputs {
            let raw = self.sensors.raw_level(input.command());
            if let Some(cmd) = input.sample(raw, now_ms) {
                // Capacity equals the number of inputs; each fires at most once.
                let _ = edges.push(cmd);
            }
        }
        edges
    }

    /// Reclassify the pool.  Returns the previous level when it changed.
    pub fn reclassify(&mut self) -> Option<PoolLevel> {
        let next = self.thresholds.classify(self.pool.quantity());
        self.net_rate = NetRate::between(self.pool.previous_quantity(), self.pool.quantity());
        if next == self.level {
            None
        } else {
            Some(core::mem::replace(&mut self.level, next))
        }
    }
}
