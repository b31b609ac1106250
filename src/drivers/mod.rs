//! Input and actuator drivers over `embedded-hal` traits, plus the
//! indicator pattern engine.

pub mod button;
pub mod indicators;
pub mod led_patterns;
pub mod motor_drive;
