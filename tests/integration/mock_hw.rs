//! Mock hardware adapter for integration tests.
//!
//! Serves a settable [`SensorSnapshot`] and records every actuator call
//! so tests can assert on the full output history without touching real
//! GPIO/PWM registers.

use harvester::adapters::entropy::XorShiftEntropy;
use harvester::adapters::time::ManualClock;
use harvester::app::events::AppEvent;
use harvester::app::ports::{ActuatorPort, EventSink, SensorPort};
use harvester::control::context::SensorSnapshot;
use harvester::control::motor::Polarity;
use harvester::drivers::led_patterns::IndicatorFrame;
use harvester::{Controller, ControllerConfig};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    DriveMotor { duty: u8, polarity: Polarity },
    OffSignal(bool),
    LevelIndicators(IndicatorFrame),
    NetRate { gain: u8, loss: u8 },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    /// Returned verbatim by every `read_all`.
    pub input: SensorSnapshot,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_drive(&self) -> Option<(u8, Polarity)> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::DriveMotor { duty, polarity } => Some((duty, polarity)),
            _ => None,
        })
    }

    pub fn off_signal(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::OffSignal(on) => Some(on),
            _ => None,
        })
    }

    pub fn last_frame(&self) -> Option<IndicatorFrame> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::LevelIndicators(f) => Some(f),
            _ => None,
        })
    }

    pub fn net_rate_writes(&self) -> Vec<(u8, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                ActuatorCall::NetRate { gain, loss } => Some((gain, loss)),
                _ => None,
            })
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.input
    }
}

impl ActuatorPort for MockHardware {
    fn drive_motor(&mut self, duty: u8, polarity: Polarity) {
        self.calls.push(ActuatorCall::DriveMotor { duty, polarity });
    }

    fn set_off_signal(&mut self, active: bool) {
        self.calls.push(ActuatorCall::OffSignal(active));
    }

    fn set_level_indicators(&mut self, frame: IndicatorFrame) {
        self.calls.push(ActuatorCall::LevelIndicators(frame));
    }

    fn set_net_rate(&mut self, gain: u8, loss: u8) {
        self.calls.push(ActuatorCall::NetRate { gain, loss });
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn telemetry(&self) -> Vec<harvester::app::events::TelemetryData> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig helpers ───────────────────────────────────────────────

pub type TestController<'a> = Controller<&'a ManualClock, XorShiftEntropy>;

/// Defaults with the stochastic bonus disabled, so pool arithmetic is exact.
#[allow(dead_code)]
pub fn quiet_config() -> ControllerConfig {
    ControllerConfig {
        random_inflow_max: 0,
        ..ControllerConfig::default()
    }
}

pub fn controller(clock: &ManualClock, config: ControllerConfig) -> TestController<'_> {
    Controller::new(config, clock, XorShiftEntropy::new(0xC0FF_EE11)).unwrap()
}

/// Advance one stability interval and run the admitted cycle.
pub fn cycle(
    c: &mut TestController<'_>,
    clock: &ManualClock,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) {
    clock.advance(c.config().stability_interval_ms);
    assert!(c.tick(hw, sink), "cycle at {} ms was not admitted", clock_now(clock));
}

fn clock_now(clock: &ManualClock) -> u32 {
    use harvester::app::ports::Clock;
    clock.now_ms()
}
