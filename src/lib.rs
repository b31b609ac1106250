//! Energy-harvesting pool controller.
//!
//! Exposes the pure control core and the host-compilable adapters for
//! integration testing and simulation.  ESP-IDF-specific code is guarded
//! by the `espidf` cargo feature inside each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod safety;
pub mod scheduler;
pub mod sensors;

pub use app::service::Controller;
pub use config::ControllerConfig;
