//! Sensor subsystem: analog channels, command buttons and the
//! aggregating [`SensorHub`].
//!
//! The hub owns every input and produces a [`SensorSnapshot`] each
//! admitted cycle that gets written into `ControlContext.sensors`.
//!
//! | Channel   | Kind        | Meaning                                  |
//! |-----------|-------------|------------------------------------------|
//! | inflow    | analog      | energy source, added to the pool as-is   |
//! | regulator | analog      | speed potentiometer                      |
//! | valve     | analog      | release valve, subtracted as release     |
//! | on / off / toggle | digital, active high | motor command buttons |

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::control::context::SensorSnapshot;

/// One-shot analog read in raw ADC counts.
///
/// Blanket-implemented for `FnMut() -> u16`, so a closure around a HAL
/// ADC driver (or a test fixture) is a valid channel.
pub trait AnalogInput {
    fn read_raw(&mut self) -> u16;
}

impl<F: FnMut() -> u16> AnalogInput for F {
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

/// Aggregates all inputs and produces a unified snapshot.
///
/// The three analog channels share one type; boxing
/// (`Box<dyn FnMut() -> u16>`) erases per-pin ADC driver types.
pub struct SensorHub<A, I> {
    pub inflow: A,
    pub regulator: A,
    pub valve: A,
    pub on_button: I,
    pub off_button: I,
    pub toggle_button: I,
    /// Raw reads are clamped to this full scale.
    analog_max: u16,
}

impl<A: AnalogInput, I: InputPin> SensorHub<A, I> {
    pub fn new(
        inflow: A,
        regulator: A,
        valve: A,
        [on_button, off_button, toggle_button]: [I; 3],
        analog_max: u16,
    ) -> Self {
        Self {
            inflow,
            regulator,
            valve,
            on_button,
            off_button,
            toggle_button,
            analog_max,
        }
    }

    /// Read every input and return a unified snapshot.
    ///
    /// A failed button read is logged and treated as released; a single
    /// flaky line must not stall the control loop.
    pub fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            inflow: u32::from(self.inflow.read_raw().min(self.analog_max)),
            regulator: self.regulator.read_raw().min(self.analog_max),
            valve: self.valve.read_raw().min(self.analog_max),
            on_pressed: pressed(&mut self.on_button, "on"),
            off_pressed: pressed(&mut self.off_button, "off"),
            toggle_pressed: pressed(&mut self.toggle_button, "toggle"),
        }
    }
}

fn pressed(pin: &mut impl InputPin, label: &str) -> bool {
    match pin.is_high() {
        Ok(level) => level,
        Err(e) => {
            warn!("{label} button read failed: {:?}", e.kind());
            false
        }
    }
}
