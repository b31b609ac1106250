//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the orchestration of one control cycle and the
//! command dispatch.  All interaction with hardware, time and randomness
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
