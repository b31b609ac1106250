//! Application service: the hexagonal core.
//!
//! [`Controller`] owns the control context, the safety supervisor, the
//! software timers and the indicator engine.  All I/O flows through port
//! traits injected at construction (clock, entropy) or at call sites
//! (sensors, actuators, events), making the entire cycle testable with
//! mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          Controller          │
//! ActuatorPort ◀──│ Gate · Pool · Motor · Safety │
//!                 └──────────────────────────────┘
//!                        ▲               ▲
//!                      Clock       EntropySource
//! ```
//!
//! ## Cycle order
//!
//! One admitted [`tick`](Controller::tick) runs, in this fixed order:
//!
//! 1. inflow (measured + stochastic bonus when its interval elapsed)
//! 2. debounced inputs → motor commands (On, Off, Toggle)
//! 3. speed recomputation for a running motor
//! 4. outflow (motor consumption + valve release)
//! 5. classification → safety supervisor
//! 6. actuator outputs (motor drive, off signal, level indicators)
//! 7. net-rate indicators and telemetry, at the log cadence
//!
//! Later stages always observe the effects of earlier ones.

use log::{error, info, warn};

use crate::config::ControllerConfig;
use crate::control::context::ControlContext;
use crate::control::gate::CycleGate;
use crate::control::level::PoolLevel;
use crate::control::motor::MotorController;
use crate::control::pool::{EnergyPool, PoolDeltas};
use crate::drivers::led_patterns::{net_rate_output, LevelIndicators};
use crate::error::{Result, Severity};
use crate::safety::{SafetyAction, SafetySupervisor};
use crate::scheduler::Interval;

use super::commands::Command;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, Clock, EntropySource, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller<C: Clock, R: EntropySource> {
    config: ControllerConfig,
    clock: C,
    entropy: R,
    ctx: ControlContext,
    gate: CycleGate,
    safety: SafetySupervisor,
    indicators: LevelIndicators,
    stochastic_inflow: Interval,
    log_cadence: Interval,
}

impl<C: Clock, R: EntropySource> Controller<C, R> {
    /// Validate the configuration and build a controller with an empty
    /// pool and the motor off.
    pub fn new(config: ControllerConfig, clock: C, entropy: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ctx: ControlContext::new(&config),
            gate: CycleGate::new(config.stability_interval_ms),
            safety: SafetySupervisor::new(&config),
            indicators: LevelIndicators::new(&config),
            stochastic_inflow: Interval::new(config.random_inflow_interval_ms),
            log_cadence: Interval::new(config.log_interval_ms),
            config,
            clock,
            entropy,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the controller.  Call once before the first tick.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!(
            "Controller started: level={} quantity={}/{}",
            self.ctx.level,
            self.ctx.pool.quantity(),
            self.ctx.pool.capacity()
        );
        sink.emit(&AppEvent::Started(self.ctx.level));
    }

    /// Start with the pool pre-charged to `quantity` (clamped to capacity).
    ///
    /// Counters start at zero.  Used by simulations and bench rigs that
    /// need to begin in a given band.
    pub fn start_from(&mut self, quantity: u32, sink: &mut impl EventSink) {
        self.ctx.pool = EnergyPool::with_quantity(self.config.capacity, quantity);
        self.ctx.reclassify();
        self.start(sink);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle if the cycle gate admits it.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.  Returns whether the cycle
    /// ran.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> bool {
        let now = self.clock.now_ms();
        if !self.gate.admit(now) {
            return false;
        }

        // 1. Inflow
        self.ctx.sensors = hw.read_all();
        let bonus = if self.stochastic_inflow.fire_if_due(now) {
            self.stochastic_bonus()
        } else {
            0
        };
        self.ctx.pool.absorb_inflow(self.ctx.sensors.inflow, bonus);

        // 2. Commands
        for command in self.ctx.sample_inputs(now) {
            self.dispatch(command, sink);
        }

        // 3. Speed
        if self.ctx.motor.is_running() {
            self.ctx.motor.adjust_speed(self.ctx.sensors.regulator);
        }

        // 4. Outflow
        self.ctx.pool.absorb_outflow(
            u32::from(self.ctx.motor.speed().duty()),
            u32::from(self.ctx.sensors.valve),
        );

        // 5. Classification + safety
        if let Some(from) = self.ctx.reclassify() {
            let to = self.ctx.level;
            info!("Pool level {from} -> {to} (quantity={})", self.ctx.pool.quantity());
            sink.emit(&AppEvent::LevelChanged { from, to });
        }
        if let Some(action) = self.safety.evaluate(&mut self.ctx, now) {
            sink.emit(&match action {
                SafetyAction::ForcedShutdown(cause) => AppEvent::ForcedShutdown(cause),
                SafetyAction::LowPowerEntered => AppEvent::LowPowerEntered,
                SafetyAction::LowPowerExited => AppEvent::LowPowerExited,
            });
        }

        // 6. Actuators
        self.apply_actuators(hw, now);

        // 7. Log cadence
        if self.log_cadence.fire_if_due(now) {
            let rate = net_rate_output(
                self.ctx.net_rate,
                self.config.inflow_abs_max,
                self.config.analog_write_max,
            );
            hw.set_net_rate(rate.gain, rate.loss);
            let deltas = self.ctx.pool.snapshot_deltas();
            sink.emit(&AppEvent::Telemetry(self.build_telemetry(deltas)));
        }

        true
    }

    // ── Command handling ──────────────────────────────────────

    /// Run a command outside the input path (host console, tests).
    ///
    /// Takes effect on the actuators at the next admitted cycle.
    pub fn handle_command(&mut self, command: Command, sink: &mut impl EventSink) {
        self.dispatch(command, sink);
    }

    fn dispatch(&mut self, command: Command, sink: &mut impl EventSink) {
        let quantity = self.ctx.pool.quantity();
        let motor = &mut self.ctx.motor;
        let outcome = match command {
            Command::On => motor
                .turn_on(quantity, self.ctx.sensors.regulator)
                .map(|speed| AppEvent::MotorStarted {
                    speed,
                    direction: motor.direction(),
                }),
            Command::Off => motor.turn_off().map(|()| AppEvent::MotorStopped),
            Command::Toggle => motor.toggle_direction().map(AppEvent::DirectionChanged),
        };

        match outcome {
            Ok(event) => {
                info!("Command {command} accepted");
                sink.emit(&event);
            }
            Err(reason) => match reason.severity() {
                Severity::Warning => {
                    warn!("Command {command} ignored: {reason}");
                    sink.emit(&AppEvent::CommandIgnored { command, reason });
                }
                Severity::Error => {
                    error!("Command {command} rejected: {reason}");
                    sink.emit(&AppEvent::CommandRejected { command, reason });
                }
            },
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot around the given window deltas.
    pub fn build_telemetry(&self, deltas: PoolDeltas) -> TelemetryData {
        let motor = &self.ctx.motor;
        TelemetryData {
            motor_on: motor.is_running(),
            speed_percent: motor.speed().percent(),
            direction: motor.direction(),
            level: self.ctx.level,
            quantity: self.ctx.pool.quantity(),
            capacity: self.ctx.pool.capacity(),
            deltas,
            valve_open_percent: self.valve_open_percent(),
            low_power: motor.low_power(),
        }
    }

    /// Valve reading as a share of the analog full scale, clamped to 100.
    pub fn valve_open_percent(&self) -> u8 {
        let pct = u32::from(self.ctx.sensors.valve) * 100 / u32::from(self.config.analog_read_max);
        pct.min(100) as u8
    }

    pub fn level(&self) -> PoolLevel {
        self.ctx.level
    }

    pub fn pool(&self) -> &EnergyPool {
        &self.ctx.pool
    }

    pub fn motor(&self) -> &MotorController {
        &self.ctx.motor
    }

    pub fn context(&self) -> &ControlContext {
        &self.ctx
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Total control cycles admitted since startup.
    pub fn admitted_cycles(&self) -> u64 {
        self.gate.admitted()
    }

    // ── Internal ──────────────────────────────────────────────

    fn stochastic_bonus(&mut self) -> u32 {
        let raw = self.entropy.next_u32();
        match self.config.random_inflow_max.checked_add(1) {
            Some(span) => raw % span,
            None => raw,
        }
    }

    /// Rewrite every per-cycle output, changed or not.
    fn apply_actuators(&mut self, hw: &mut impl ActuatorPort, now: u32) {
        let motor = &self.ctx.motor;
        hw.drive_motor(motor.speed().duty(), motor.direction().polarity());
        hw.set_off_signal(!motor.is_running());
        let frame = self.indicators.tick(self.ctx.level, now);
        hw.set_level_indicators(frame);
    }
}
