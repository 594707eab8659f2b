//! Datagram sources feeding an [`crate::OrderedPacketStream`].

use crate::{StreamError, UdpSourceConfig};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Receive buffer size; larger than any well-formed packet so oversize
/// datagrams reach the decoder's length check instead of being cut to fit.
pub const MAX_DATAGRAM_BYTES: usize = 2048;

/// Something that yields one complete datagram per call.
#[async_trait]
pub trait PacketSource: Send {
    /// Wait for the next datagram, copy it into `buf` and return its length.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the stream reading from this source.
    async fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<usize, StreamError>;
}

/// Live F1 2017 telemetry from a bound UDP socket.
#[derive(Debug)]
pub struct UdpPacketSource {
    socket: UdpSocket,
    recv_timeout: Option<Duration>,
}

impl UdpPacketSource {
    /// Bind the socket described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::SourceIo`] if the address cannot be bound.
    pub async fn bind(config: &UdpSourceConfig) -> Result<Self, StreamError> {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(addr).await.map_err(|err| {
            warn!(error = %err, %addr, "F1 2017 UDP socket bind failed");
            StreamError::SourceIo(err)
        })?;
        let local = socket.local_addr()?;
        info!(addr = %local, timeout = ?config.recv_timeout, "F1 2017 UDP source bound");
        Ok(Self {
            socket,
            recv_timeout: config.recv_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, StreamError> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl PacketSource for UdpPacketSource {
    async fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let result = match self.recv_timeout {
            Some(limit) => tokio::time::timeout(limit, self.socket.recv(buf))
                .await
                .map_err(|_elapsed| StreamError::ReceiveTimeout(limit))?,
            None => self.socket.recv(buf).await,
        };
        result.map_err(|err| {
            warn!(error = %err, "F1 2017 UDP receive error");
            StreamError::SourceIo(err)
        })
    }
}

/// In-process source: each message is one datagram. Closing every sender
/// ends the stream with [`StreamError::SourceClosed`].
#[async_trait]
impl PacketSource for mpsc::Receiver<Vec<u8>> {
    async fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let datagram = self.recv().await.ok_or(StreamError::SourceClosed)?;
        // Like a UDP socket, a datagram longer than `buf` is truncated.
        let len = datagram.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..len), datagram.get(..len)) {
            dst.copy_from_slice(src);
        }
        Ok(len)
    }
}
