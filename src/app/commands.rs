//! Inbound motor commands.
//!
//! Each physical push-button is bound to one variant; a host console or
//! test can inject the same variants through
//! [`Controller::handle_command`](super::service::Controller::handle_command).

use core::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Start the motor (only inside the safe band).
    On,
    /// Stop the motor.
    Off,
    /// Reverse the rotation of a running motor.
    Toggle,
}

impl Command {
    /// Dispatch order when several edges land in the same cycle.
    pub const ALL: [Self; 3] = [Self::On, Self::Off, Self::Toggle];
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("ON"),
            Self::Off => f.write_str("OFF"),
            Self::Toggle => f.write_str("TOGGLE"),
        }
    }
}
