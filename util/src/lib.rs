//! Utility library for the car model software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod convert;
pub mod host;
pub mod logger;
pub mod maths;
pub mod module;
pub mod params;
pub mod session;
pub mod script_interpreter;
pub mod time;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use comms_if;
