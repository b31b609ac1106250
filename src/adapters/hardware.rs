//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  Everything is generic
//! over `embedded-hal` traits, so the same adapter runs on ESP-IDF
//! drivers in the binary and on recording fakes in tests.
//!
//! | Type param | Trait                   | Used for                        |
//! |------------|-------------------------|---------------------------------|
//! | `A`        | [`AnalogInput`]         | inflow, regulator, valve        |
//! | `I`        | `digital::InputPin`     | On / Off / Toggle buttons       |
//! | `P`        | `digital::OutputPin`    | bridge polarity, level LEDs     |
//! | `D`        | `pwm::SetDutyCycle`     | motor enable, tone, net-rate    |

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::context::SensorSnapshot;
use crate::control::motor::Polarity;
use crate::drivers::indicators::{LevelLeds, NetRateLeds};
use crate::drivers::led_patterns::IndicatorFrame;
use crate::drivers::motor_drive::{MotorDrive, OffSignal};
use crate::sensors::{AnalogInput, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<A, I, P, D> {
    sensor_hub: SensorHub<A, I>,
    motor: MotorDrive<P, D>,
    off_signal: OffSignal<D>,
    level_leds: LevelLeds<P>,
    net_rate: NetRateLeds<D>,
}

impl<A, I, P, D> HardwareAdapter<A, I, P, D>
where
    A: AnalogInput,
    I: InputPin,
    P: OutputPin,
    D: SetDutyCycle,
{
    pub fn new(
        sensor_hub: SensorHub<A, I>,
        motor: MotorDrive<P, D>,
        off_signal: OffSignal<D>,
        level_leds: LevelLeds<P>,
        net_rate: NetRateLeds<D>,
    ) -> Self {
        Self {
            sensor_hub,
            motor,
            off_signal,
            level_leds,
            net_rate,
        }
    }

    pub fn motor(&self) -> &MotorDrive<P, D> {
        &self.motor
    }

    pub fn off_signal(&self) -> &OffSignal<D> {
        &self.off_signal
    }

    pub fn level_leds(&self) -> &LevelLeds<P> {
        &self.level_leds
    }

    pub fn net_rate(&self) -> &NetRateLeds<D> {
        &self.net_rate
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A, I, P, D> SensorPort for HardwareAdapter<A, I, P, D>
where
    A: AnalogInput,
    I: InputPin,
{
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A, I, P, D> ActuatorPort for HardwareAdapter<A, I, P, D>
where
    P: OutputPin,
    D: SetDutyCycle,
{
    fn drive_motor(&mut self, duty: u8, polarity: Polarity) {
        self.motor.set(duty, polarity);
    }

    fn set_off_signal(&mut self, active: bool) {
        self.off_signal.set(active);
    }

    fn set_level_indicators(&mut self, frame: IndicatorFrame) {
        self.level_leds.show(frame);
    }

    fn set_net_rate(&mut self, gain: u8, loss: u8) {
        self.net_rate.set(gain, loss);
    }
}
