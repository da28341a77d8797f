//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod car_ctrl;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// Internal
use car_ctrl::Twist;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the car by an operator or a
/// script.
///
/// TCs are exchanged as JSON, for example
/// `{"Drive":{"linear":{"x":1.0,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":0.5}}}`
/// or `"Heartbeat"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tc {
    /// Keep-alive, has no effect on the car.
    Heartbeat,

    /// Apply a velocity command.
    Drive(Twist)
}

/// Response sent back for every received telecommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TcResponse {
    /// The TC was accepted and will be executed
    Ok,

    /// The TC could not be parsed or failed validation and was discarded
    Invalid
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Drive TC contains non-finite components: {0:?}")]
    NonFiniteCommand(Twist)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet.
    ///
    /// The TC is validated before being returned, so a successfully parsed TC
    /// is safe to execute.
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        let tc: Tc = serde_json::from_str(json_str)
            .map_err(TcParseError::InvalidJson)?;

        tc.validate()?;

        Ok(tc)
    }

    /// Check that the TC's payload can be safely executed.
    ///
    /// Drive commands with NaN or infinite components are rejected, as the
    /// car accumulates heading and displacement which would never recover.
    pub fn validate(&self) -> Result<(), TcParseError> {
        match self {
            Tc::Heartbeat => Ok(()),
            Tc::Drive(t) if !t.is_finite() => Err(TcParseError::NonFiniteCommand(*t)),
            Tc::Drive(_) => Ok(())
        }
    }

    /// Serialise the TC into JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
