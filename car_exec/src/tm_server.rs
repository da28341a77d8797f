//! # TM Server
//!
//! Publishes every snapshot of the car as three messages, one per topic. Each message is the
//! topic name, a space, and the JSON serialised message, so subscribers can filter on topic with
//! zmq's prefix subscriptions.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use comms_if::{
    net::{MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions, zmq},
    tm::{Snapshot, JOINT_STATES_TOPIC, ODOM_TOPIC, TF_TOPIC}
};

use crate::car_node::StateSink;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Telemetry server
pub struct TmServer {
    socket: MonitoredSocket
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TmServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send telemetry on {0}: {1}")]
    SendError(&'static str, zmq::Error),

    #[error("Could not serialize the telemetry: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TmServer {
    /// Create a new instance of the TM Server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, TmServerError> {
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            bind: true,
            connect_timeout: 1000,
            heartbeat_ivl: 500,
            heartbeat_ttl: 1000,
            heartbeat_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            socket_options,
            &params.tm_endpoint
        ).map_err(TmServerError::SocketError)?;

        Ok(Self {
            socket
        })
    }

    /// Send all three messages of a snapshot.
    pub fn send(&mut self, snapshot: &Snapshot) -> Result<(), TmServerError> {
        self.send_topic(JOINT_STATES_TOPIC, &snapshot.joint_state)?;
        self.send_topic(TF_TOPIC, &snapshot.transform)?;
        self.send_topic(ODOM_TOPIC, &snapshot.odometry)
    }

    fn send_topic<T: Serialize>(
        &mut self,
        topic: &'static str,
        msg: &T
    ) -> Result<(), TmServerError> {
        let frame = topic_frame(topic, msg)?;

        self.socket.send(&frame, 0)
            .map_err(|e| TmServerError::SendError(topic, e))
    }
}

impl StateSink for TmServer {
    type Error = TmServerError;

    fn publish(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.send(snapshot)
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the wire frame for a message on a topic.
pub fn topic_frame<T: Serialize>(topic: &str, msg: &T) -> Result<String, TmServerError> {
    let json = serde_json::to_string(msg)
        .map_err(TmServerError::SerializationError)?;

    Ok(format!("{} {}", topic, json))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::car_ctrl::CarCtrl;

    #[test]
    fn test_topic_frames() {
        let car = CarCtrl::default();
        let snapshot = car.snapshot();

        let frame = topic_frame(JOINT_STATES_TOPIC, &snapshot.joint_state).unwrap();
        assert!(frame.starts_with("joint_states {"));
        assert!(frame.contains("front_left_wheel_to_front_axle"));

        let frame = topic_frame(TF_TOPIC, &snapshot.transform).unwrap();
        assert!(frame.starts_with("tf {"));
        assert!(frame.contains("\"child_frame_id\":\"base_footprint\""));

        let frame = topic_frame(ODOM_TOPIC, &snapshot.odometry).unwrap();
        let (topic, json) = frame.split_at(frame.find(' ').unwrap());
        assert_eq!(topic, "odom");

        let odom: comms_if::tm::Odometry = serde_json::from_str(json.trim()).unwrap();
        assert_eq!(odom.header, snapshot.odometry.header);
        assert_eq!(odom.child_frame_id, "base_footprint");
    }
}
