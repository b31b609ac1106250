//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no real
//! hardware required.

mod command_tests;
mod mock_hw;
mod safety_scenario_tests;
mod telemetry_tests;
