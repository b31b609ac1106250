//! DC motor driver (L293D-style H-bridge) and the motor-off tone.
//!
//! Speed is a PWM duty on the bridge enable line; direction is the
//! `(in1, in2)` polarity pair.  The off signal is a square wave at the
//! configured tone frequency (the frequency lives in the PWM timer set up
//! by the binary); this driver only gates it on and off.
//!
//! ## Safety contract
//!
//! The motor must never run while the pool is empty or at the full
//! cutoff.  Enforced by the safety supervisor; this driver is a dumb
//! actuator.  Pin errors are logged and otherwise ignored because the
//! controller rewrites every output each cycle.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::warn;

use crate::control::motor::Polarity;

pub struct MotorDrive<P, D> {
    enable: D,
    in1: P,
    in2: P,
    duty: u8,
    polarity: Polarity,
}

impl<P: OutputPin, D: SetDutyCycle> MotorDrive<P, D> {
    pub fn new(enable: D, in1: P, in2: P) -> Self {
        Self {
            enable,
            in1,
            in2,
            duty: 0,
            polarity: Polarity {
                in1: false,
                in2: false,
            },
        }
    }

    /// Write polarity, then duty (`0..=255`).
    pub fn set(&mut self, duty: u8, polarity: Polarity) {
        write_pin(&mut self.in1, polarity.in1, "in1");
        write_pin(&mut self.in2, polarity.in2, "in2");
        if let Err(e) = self.enable.set_duty_cycle_fraction(u16::from(duty), 255) {
            warn!("Motor enable PWM write failed: {:?}", e.kind());
        }
        self.duty = duty;
        self.polarity = polarity;
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

/// Tone gate for the motor-off signal.
pub struct OffSignal<D> {
    tone: D,
    active: bool,
}

impl<D: SetDutyCycle> OffSignal<D> {
    pub fn new(tone: D) -> Self {
        Self {
            tone,
            active: false,
        }
    }

    /// 50 % duty while active, silent otherwise.
    pub fn set(&mut self, active: bool) {
        let res = if active {
            self.tone.set_duty_cycle_percent(50)
        } else {
            self.tone.set_duty_cycle_fully_off()
        };
        if let Err(e) = res {
            warn!("Off-signal PWM write failed: {:?}", e.kind());
        }
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

pub(crate) fn write_pin(pin: &mut impl OutputPin, high: bool, label: &str) {
    if let Err(e) = pin.set_state(PinState::from(high)) {
        warn!("GPIO {label} write failed: {:?}", e.kind());
    }
}
