//! Time-debounced push-button input.
//!
//! ## Hardware
//!
//! Three momentary switches (On, Off, Toggle) read as plain digital
//! levels once per admitted control cycle.  No ISR is involved; the
//! debounce is a polled state machine driven by the cycle timestamp.
//!
//! ## Debounce rule
//!
//! | Step | Condition                                           | Effect                     |
//! |------|-----------------------------------------------------|----------------------------|
//! | 1    | raw != previous raw                                 | restart stability window   |
//! | 2    | window >= debounce interval and raw != stable state | commit; fire on rising edge|
//! | 3    | always                                              | previous raw = raw         |
//!
//! A press shorter than the debounce interval never registers, a held
//! press fires exactly once, and release never fires.

use crate::app::commands::Command;

pub struct DebouncedInput {
    command: Command,
    debounce_ms: u32,
    previous_raw: bool,
    stable: bool,
    last_transition_ms: u32,
}

impl DebouncedInput {
    pub fn new(command: Command, debounce_ms: u32) -> Self {
        Self {
            command,
            debounce_ms,
            previous_raw: false,
            stable: false,
            last_transition_ms: 0,
        }
    }

    /// Feed one raw reading.  Returns the bound command on a stable
    /// rising edge.
    pub fn sample(&mut self, raw: bool, now_ms: u32) -> Option<Command> {
        if raw != self.previous_raw {
            self.last_transition_ms = now_ms;
        }

        let mut fired = None;
        if now_ms.wrapping_sub(self.last_transition_ms) >= self.debounce_ms && raw != self.stable {
            self.stable = raw;
            if raw {
                fired = Some(self.command);
            }
        }

        self.previous_raw = raw;
        fired
    }

    /// Command bound to this input.
    pub fn command(&self) -> Command {
        self.command
    }

    /// Debounced level.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
