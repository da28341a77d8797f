//! # Car library.
//!
//! This library allows other crates in the workspace (and the benchmarks and integration tests)
//! to access items defined inside the car crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Car control module - turns velocity commands into steering, heading and position state
pub mod car_ctrl;

/// Car node - owns the car state and pushes each new snapshot to a sink
pub mod car_node;

/// Idle republisher - keeps the initial state visible until the first command arrives
pub mod idle;

/// Executable parameters
pub mod params;

/// Telecommand client - recieves velocity commands from the teleop console
pub mod tc_client;

/// Telemetry server - publishes the car's state
pub mod tm_server;
