//! F1 2017 UDP telemetry wire format.
//!
//! F1 2017 broadcasts one fixed-layout, packed, little-endian datagram of
//! exactly 1289 bytes per telemetry tick, on UDP port **20777** by default.
//! This crate turns those bytes into a [`TelemetryPacket`].
//!
//! # Layout
//!
//! | Offset    | Size | Content                                        |
//! |-----------|------|------------------------------------------------|
//! | 0-67      | 68   | session clock, distances, motion vectors       |
//! | 68-115    | 48   | suspension position/velocity, wheel speed      |
//! | 116-203   | 88   | driver inputs, car state, sector times         |
//! | 204-235   | 32   | brake temperatures, tyre pressures             |
//! | 236-303   | 68   | session info, engine, angular velocity         |
//! | 304-336   | 33   | tyre/damage bytes, session clock, car counts   |
//! | 337-1236  | 900  | 20 × 45-byte car records                       |
//! | 1237-1288 | 52   | orientation, local velocity, accelerations     |
//!
//! Per-wheel arrays are ordered RL, RR, FL, FR. Single-byte fields are
//! signed.
//!
//! # Usage
//!
//! ```rust
//! use f1_telemetry_wire::{decode, PACKET_SIZE};
//!
//! let raw = [0u8; PACKET_SIZE];
//! let packet = decode(&raw)?;
//! assert_eq!(packet.num_cars, 0);
//! # Ok::<(), f1_telemetry_wire::WireError>(())
//! ```

#![deny(static_mut_refs)]

mod decode;
#[cfg(any(test, feature = "test-support"))]
mod encode;
pub mod labels;
pub mod layout;
pub mod packet;
mod reader;

pub use decode::decode;
#[cfg(any(test, feature = "test-support"))]
pub use encode::encode;
pub use layout::{CAR_RECORD_SIZE, MAX_CARS, PACKET_SIZE};
pub use packet::{CarRecord, TelemetryPacket, Wheel};

/// Failure to interpret a datagram as an F1 2017 telemetry packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("malformed packet: expected {expected} bytes, got {actual}")]
    MalformedPacket { expected: usize, actual: usize },
}
