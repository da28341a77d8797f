//! # Communications interface crate.
//!
//! Provides the common communications interfaces for the car model software: the velocity
//! commands sent to the car, the telemetry it publishes, and the network abstractions used to
//! move both around.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Geometric primitives shared by telecommands and telemetry
pub mod geometry;

/// Telecommands (inbound commands to the car executable)
pub mod tc;

/// Telemetry (outbound state published by the car executable)
pub mod tm;

/// Network module
pub mod net;
