//! Indicator LED drivers.
//!
//! - [`LevelLeds`]: four discrete GPIO LEDs (Low, Ok, High, Critical).
//! - [`NetRateLeds`]: two PWM LEDs (gain, loss) whose brightness tracks
//!   the pool change rate.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::warn;

use crate::drivers::led_patterns::IndicatorFrame;
use crate::drivers::motor_drive::write_pin;

pub struct LevelLeds<P> {
    low: P,
    ok: P,
    high: P,
    critical: P,
    current: IndicatorFrame,
}

impl<P: OutputPin> LevelLeds<P> {
    pub fn new([low, ok, high, critical]: [P; 4]) -> Self {
        Self {
            low,
            ok,
            high,
            critical,
            current: IndicatorFrame::default(),
        }
    }

    pub fn show(&mut self, frame: IndicatorFrame) {
        write_pin(&mut self.low, frame.low, "low LED");
        write_pin(&mut self.ok, frame.ok, "ok LED");
        write_pin(&mut self.high, frame.high, "high LED");
        write_pin(&mut self.critical, frame.critical, "critical LED");
        self.current = frame;
    }

    pub fn current(&self) -> IndicatorFrame {
        self.current
    }
}

pub struct NetRateLeds<D> {
    gain: D,
    loss: D,
    /// Full-scale value of the 8-bit intensities handed in.
    full_scale: u8,
    current: (u8, u8),
}

impl<D: SetDutyCycle> NetRateLeds<D> {
    pub fn new(gain: D, loss: D, full_scale: u8) -> Self {
        Self {
            gain,
            loss,
            full_scale,
            current: (0, 0),
        }
    }

    pub fn set(&mut self, gain: u8, loss: u8) {
        let full_scale = u16::from(self.full_scale.max(1));
        for (led, value, label) in [(&mut self.gain, gain, "gain"), (&mut self.loss, loss, "loss")] {
            let value = u16::from(value).min(full_scale);
            if let Err(e) = led.set_duty_cycle_fraction(value, full_scale) {
                warn!("{label} LED PWM write failed: {:?}", e.kind());
            }
        }
        self.current = (gain, loss);
    }

    pub fn current(&self) -> (u8, u8) {
        self.current
    }
}
