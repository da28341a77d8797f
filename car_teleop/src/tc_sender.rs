//! # Telecommand sender
//!
//! The console's end of the telecommand link. It binds the endpoint that the car executable's
//! `TcClient` connects to, sends one TC at a time and waits for the response.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    net::{zmq, MonitoredSocket, SocketOptions},
    tc::{Tc, TcResponse}
};

use crate::TeleopError;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Time to wait for the car to respond to a TC.
///
/// Units: milliseconds
const RESPONSE_TIMEOUT_MS: i32 = 1000;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct TcSender {
    socket: MonitoredSocket
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TcSender {
    /// Bind a new sender to the given endpoint.
    ///
    /// This function will not block until the car connects.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, TeleopError> {
        // A relaxed REQ socket can send again even if the car never answered the last TC
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            req_correlate: true,
            req_relaxed: true,
            linger: 1,
            recv_timeout: RESPONSE_TIMEOUT_MS,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::REQ, socket_options, endpoint)
            .map_err(TeleopError::SocketError)?;

        Ok(Self { socket })
    }

    /// Send a TC and wait for the car's response.
    pub fn send(&self, tc: &Tc) -> Result<TcResponse, TeleopError> {
        let tc_str = tc.to_json()
            .map_err(TeleopError::SerializationError)?;

        self.socket.send(&tc_str, 0)
            .map_err(TeleopError::SendError)?;

        let response_str = match self.socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(TeleopError::NonUtf8Response),
            Err(zmq::Error::EAGAIN) => return Err(TeleopError::NoResponse),
            Err(e) => return Err(TeleopError::RecvError(e))
        };

        serde_json::from_str(&response_str)
            .map_err(TeleopError::InvalidResponse)
    }
}
