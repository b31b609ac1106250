//! Port traits: the hexagonal boundary between the control core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, time, randomness)
//! implement these traits.  The [`Controller`](super::service::Controller)
//! consumes them via generics, so the control core never touches hardware
//! directly and every cycle can be replayed against fakes.

use crate::control::context::SensorSnapshot;
use crate::control::motor::Polarity;
use crate::drivers::led_patterns::IndicatorFrame;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the controller calls this once per admitted cycle.
pub trait SensorPort {
    /// Read every input and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the controller rewrites every output each admitted cycle.
pub trait ActuatorPort {
    /// Motor drive duty (0 = stopped) and H-bridge polarity.
    fn drive_motor(&mut self, duty: u8, polarity: Polarity);

    /// Tone shown while the motor is off.
    fn set_off_signal(&mut self, active: bool);

    /// Pool-level indicator outputs.
    fn set_level_indicators(&mut self, frame: IndicatorFrame);

    /// Net-rate analog outputs.
    fn set_net_rate(&mut self, gain: u8, loss: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond timestamp.  Wraps after ~49 days; every
/// consumer compares with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Entropy port
// ───────────────────────────────────────────────────────────────

/// Source of the stochastic inflow bonus.
pub trait EntropySource {
    fn next_u32(&mut self) -> u32;
}

impl<R: EntropySource + ?Sized> EntropySource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
