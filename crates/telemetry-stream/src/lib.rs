//! Time-ordered stream of F1 2017 telemetry packets.
//!
//! An [`OrderedPacketStream`] pulls one datagram at a time from a
//! [`PacketSource`], decodes it with [`f1_telemetry_wire::decode`] and only
//! emits packets whose session `time` is strictly greater than the last
//! emitted one. Malformed datagrams are skipped; a failing source ends the
//! stream.
//!
//! ```rust,no_run
//! use f1_telemetry_stream::{OrderedPacketStream, UdpPacketSource, UdpSourceConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), f1_telemetry_stream::StreamError> {
//! let source = UdpPacketSource::bind(&UdpSourceConfig::from_env()).await?;
//! let mut stream = OrderedPacketStream::new(source);
//! while let Some(packet) = stream.next_packet().await? {
//!     println!("{:.3} s, {:.0} mph", packet.time, packet.speed);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]

pub mod config;
pub mod filter;
pub mod ordered;
pub mod source;

pub use config::UdpSourceConfig;
pub use filter::MonotonicFilter;
pub use ordered::{Decoder, OrderedPacketStream, StreamStats, run};
pub use source::{PacketSource, UdpPacketSource};

use std::time::Duration;
use thiserror::Error;

/// Fatal stream conditions. Malformed datagrams never surface here.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Packet source closed")]
    SourceClosed,

    #[error("Packet source I/O error: {0}")]
    SourceIo(#[from] std::io::Error),

    #[error("No datagram received within {0:?}")]
    ReceiveTimeout(Duration),
}
