//! Ordered packet stream: datagrams in, time-ordered packets out.

use crate::filter::MonotonicFilter;
use crate::source::{MAX_DATAGRAM_BYTES, PacketSource};
use crate::StreamError;
use f1_telemetry_wire::{TelemetryPacket, WireError};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

/// Turns one datagram into a packet.
pub type Decoder = fn(&[u8]) -> Result<TelemetryPacket, WireError>;

/// Counters for one stream instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub datagrams_received: u64,
    pub packets_emitted: u64,
    pub dropped_out_of_order: u64,
    pub malformed: u64,
}

/// Pulls datagrams from `S`, decodes them and yields packets in strictly
/// increasing session-time order.
///
/// One instance owns its source, filter and buffer; independent instances
/// share nothing and can run on separate tasks.
pub struct OrderedPacketStream<S> {
    source: S,
    decode: Decoder,
    filter: MonotonicFilter,
    buf: Vec<u8>,
    stats: StreamStats,
    shutdown: Option<broadcast::Receiver<()>>,
    cancelled: bool,
}

impl<S> std::fmt::Debug for OrderedPacketStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedPacketStream")
            .field("filter", &self.filter)
            .field("stats", &self.stats)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl<S: PacketSource> OrderedPacketStream<S> {
    /// Stream decoding with [`f1_telemetry_wire::decode`].
    pub fn new(source: S) -> Self {
        Self::with_decoder(source, f1_telemetry_wire::decode)
    }

    pub fn with_decoder(source: S, decode: Decoder) -> Self {
        Self {
            source,
            decode,
            filter: MonotonicFilter::new(),
            buf: vec![0u8; MAX_DATAGRAM_BYTES],
            stats: StreamStats::default(),
            shutdown: None,
            cancelled: false,
        }
    }

    /// Stop cleanly once a message arrives on `shutdown`.
    ///
    /// Dropping every sender is not a shutdown request; the stream keeps
    /// reading from its source.
    pub fn with_shutdown(mut self, shutdown: broadcast::Receiver<()>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Next packet that passes the ordering filter.
    ///
    /// Returns `Ok(None)` once shutdown has been requested; later calls keep
    /// returning `Ok(None)`. Malformed datagrams and out-of-order packets are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Any [`PacketSource`] failure is returned unchanged and ends the stream.
    pub async fn next_packet(&mut self) -> Result<Option<TelemetryPacket>, StreamError> {
        loop {
            let Some(len) = self.recv().await? else {
                return Ok(None);
            };
            self.stats.datagrams_received = self.stats.datagrams_received.saturating_add(1);

            let datagram = self.buf.get(..len).unwrap_or_default();
            let packet = match (self.decode)(datagram) {
                Ok(packet) => packet,
                Err(err) => {
                    self.stats.malformed = self.stats.malformed.saturating_add(1);
                    debug!(len, error = %err, "discarding malformed datagram");
                    continue;
                }
            };

            if self.filter.admit(packet.time) {
                self.stats.packets_emitted = self.stats.packets_emitted.saturating_add(1);
                return Ok(Some(packet));
            }
            self.stats.dropped_out_of_order = self.stats.dropped_out_of_order.saturating_add(1);
        }
    }

    /// Invoke `on_packet` for every admitted packet until shutdown.
    ///
    /// # Errors
    ///
    /// Returns the source failure that ended the stream.
    pub async fn run<F>(&mut self, mut on_packet: F) -> Result<(), StreamError>
    where
        F: FnMut(TelemetryPacket),
    {
        while let Some(packet) = self.next_packet().await? {
            on_packet(packet);
        }
        info!(stats = ?self.stats, "telemetry stream stopped");
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<usize>, StreamError> {
        let Self {
            source,
            buf,
            shutdown,
            cancelled,
            ..
        } = self;
        if *cancelled {
            return Ok(None);
        }
        loop {
            let Some(rx) = shutdown.as_mut() else {
                return Ok(Some(source.recv_datagram(buf).await?));
            };
            let signal = tokio::select! {
                biased;
                signal = rx.recv() => signal,
                result = source.recv_datagram(buf) => return Ok(Some(result?)),
            };
            if matches!(signal, Err(broadcast::error::RecvError::Closed)) {
                // Every sender is gone, so no shutdown can arrive.
                debug!("shutdown channel closed without a request");
                *shutdown = None;
                continue;
            }
            trace!(?signal, "shutdown channel fired");
            info!("telemetry stream shutdown requested");
            *cancelled = true;
            return Ok(None);
        }
    }
}

impl<S: PacketSource + 'static> OrderedPacketStream<S> {
    /// Run this stream on its own tokio task, forwarding packets over a
    /// channel of `capacity`.
    ///
    /// The task ends when the returned receiver is dropped, on shutdown, or
    /// when the source fails; the join handle carries the outcome.
    pub fn spawn(
        mut self,
        capacity: usize,
    ) -> (
        mpsc::Receiver<TelemetryPacket>,
        JoinHandle<Result<(), StreamError>>,
    ) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    _ = tx.closed() => break,
                    next = self.next_packet() => next?,
                };
                let Some(packet) = next else {
                    break;
                };
                if tx.send(packet).await.is_err() {
                    break;
                }
            }
            debug!(stats = ?self.stats, "telemetry stream task finished");
            Ok::<(), StreamError>(())
        });
        (rx, handle)
    }
}

/// Stream packets from `source` through `decode` into `on_packet` until the
/// source fails.
///
/// # Errors
///
/// Returns the source failure that ended the stream.
pub async fn run<S, F>(source: S, decode: Decoder, on_packet: F) -> Result<(), StreamError>
where
    S: PacketSource,
    F: FnMut(TelemetryPacket),
{
    OrderedPacketStream::with_decoder(source, decode)
        .run(on_packet)
        .await
}
