//! f1-telemetry - live console monitor for F1 2017 UDP telemetry
//!
//! Binds the telemetry port, keeps only packets whose session time moves
//! forward, and prints one line per packet until Ctrl-C.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use f1_telemetry_stream::{OrderedPacketStream, PacketSource, UdpPacketSource, UdpSourceConfig};
use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "f1-telemetry")]
#[command(about = "Print live F1 2017 UDP telemetry in session-time order")]
#[command(version)]
#[command(long_about = "
f1-telemetry listens for the F1 2017 UDP telemetry broadcast and prints one
line per packet: session time, lap, gear, speed, race position and track.
Duplicated or out-of-order packets are dropped; malformed datagrams are skipped.

Enable UDP telemetry in the game's settings and point it at this machine.
Use --json for one machine-readable packet per line.
")]
struct Cli {
    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    bind: Option<IpAddr>,

    /// UDP port the game sends to [default: 20777]
    #[arg(short, long)]
    port: Option<u16>,

    /// Stop with an error if no datagram arrives for this long (0 disables)
    #[arg(long)]
    recv_timeout_ms: Option<u64>,

    /// Print each packet as a JSON object
    #[arg(long)]
    json: bool,

    /// Also list every active car
    #[arg(long)]
    cars: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Environment (`F1_TELEMETRY_*`) first, then command-line flags.
    fn source_config(&self) -> UdpSourceConfig {
        self.apply_to(UdpSourceConfig::from_env())
    }

    fn apply_to(&self, mut config: UdpSourceConfig) -> UdpSourceConfig {
        if let Some(bind) = self.bind {
            config = config.with_bind_addr(bind);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        match self.recv_timeout_ms {
            Some(0) => config = config.with_recv_timeout(None),
            Some(ms) => config = config.with_recv_timeout(Some(Duration::from_millis(ms))),
            None => {}
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("f1_telemetry={log_level},f1_telemetry_stream={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match monitor(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn monitor(cli: &Cli) -> Result<()> {
    let config = cli.source_config();
    let source = UdpPacketSource::bind(&config)
        .await
        .map_err(|source| CliError::Bind {
            addr: config.socket_addr(),
            source,
        })?;

    let signals = ShutdownSignals::install()?;
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let waiter = tokio::spawn(signals.forward(shutdown_tx.clone()));

    let mut stream = OrderedPacketStream::new(source).with_shutdown(shutdown_rx);
    let result = stream_packets(&mut stream, cli.json, cli.cars).await;
    waiter.abort();
    drop(shutdown_tx);

    output::print_stats(&stream.stats(), cli.json);
    result?;
    Ok(())
}

/// Print packets until shutdown; any source failure is an error.
async fn stream_packets<S: PacketSource>(
    stream: &mut OrderedPacketStream<S>,
    json: bool,
    cars: bool,
) -> Result<(), CliError> {
    stream
        .run(|packet| output::print_packet(&packet, json, cars))
        .await
        .map_err(CliError::Stream)
}

/// Ctrl-C (and SIGTERM on unix) handlers, registered before streaming starts.
#[cfg(unix)]
struct ShutdownSignals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn install() -> Result<Self, CliError> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigterm: signal(SignalKind::terminate()).map_err(CliError::Signal)?,
            sigint: signal(SignalKind::interrupt()).map_err(CliError::Signal)?,
        })
    }

    async fn forward(mut self, shutdown_tx: broadcast::Sender<()>) {
        tokio::select! {
            _ = self.sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = self.sigint.recv() => {
                info!("Received SIGINT");
            }
        }
        if shutdown_tx.send(()).is_err() {
            warn!("Telemetry stream already stopped");
        }
    }
}

#[cfg(windows)]
struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl ShutdownSignals {
    fn install() -> Result<Self, CliError> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c().map_err(CliError::Signal)?,
        })
    }

    async fn forward(mut self, shutdown_tx: broadcast::Sender<()>) {
        self.ctrl_c.recv().await;
        info!("Received Ctrl+C");
        if shutdown_tx.send(()).is_err() {
            warn!("Telemetry stream already stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn no_flags_keep_base_config() -> TestResult {
        let cli = Cli::try_parse_from(["f1-telemetry"])?;
        assert!(!cli.json);
        assert!(!cli.cars);
        assert_eq!(cli.verbose, 0);
        let config = cli.apply_to(UdpSourceConfig::default());
        assert_eq!(config, UdpSourceConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:20777");
        Ok(())
    }

    #[test]
    fn flags_override_config() -> TestResult {
        let cli = Cli::try_parse_from([
            "f1-telemetry",
            "--bind",
            "127.0.0.1",
            "--port",
            "20778",
            "--recv-timeout-ms",
            "500",
            "--json",
            "--cars",
            "-vv",
        ])?;
        let config = cli.apply_to(UdpSourceConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:20778");
        assert_eq!(config.recv_timeout, Some(Duration::from_millis(500)));
        assert!(cli.json && cli.cars);
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn zero_timeout_means_none() -> TestResult {
        let cli = Cli::try_parse_from(["f1-telemetry", "--recv-timeout-ms", "0"])?;
        let base = UdpSourceConfig::default();
        assert_eq!(cli.apply_to(base).recv_timeout, None);
        Ok(())
    }

    #[test]
    fn zero_timeout_clears_env_configured_timeout() -> TestResult {
        let cli = Cli::try_parse_from(["f1-telemetry", "--recv-timeout-ms", "0"])?;
        let base = UdpSourceConfig::from_lookup(|name| {
            (name == f1_telemetry_stream::config::ENV_RECV_TIMEOUT_MS).then(|| "3000".to_string())
        });
        assert_eq!(base.recv_timeout, Some(Duration::from_secs(3)));
        assert_eq!(cli.apply_to(base).recv_timeout, None);
        Ok(())
    }

    #[test]
    fn missing_timeout_flag_keeps_env_configured_timeout() -> TestResult {
        let cli = Cli::try_parse_from(["f1-telemetry"])?;
        let base = UdpSourceConfig::default().with_recv_timeout(Some(Duration::from_secs(3)));
        assert_eq!(cli.apply_to(base).recv_timeout, Some(Duration::from_secs(3)));
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["f1-telemetry", "--port", "70000"]).is_err());
    }

    // ── Shutdown ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn dropped_shutdown_sender_does_not_stop_monitoring() -> TestResult {
        let (tx, rx) = tokio::sync::mpsc::channel(2);
        for time in [1.0f32, 2.0] {
            tx.send(f1_telemetry_wire::encode(&f1_telemetry_wire::TelemetryPacket {
                time,
                ..Default::default()
            }))
            .await?;
        }
        drop(tx);
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        drop(shutdown_tx);

        let mut stream = OrderedPacketStream::new(rx).with_shutdown(shutdown_rx);
        let result = stream_packets(&mut stream, true, false).await;

        assert!(matches!(
            result,
            Err(CliError::Stream(f1_telemetry_stream::StreamError::SourceClosed))
        ));
        assert_eq!(stream.stats().packets_emitted, 2);
        Ok(())
    }

    #[tokio::test]
    async fn signal_request_stops_monitoring_cleanly() -> TestResult {
        let (_tx, rx) = tokio::sync::mpsc::channel::<Vec<u8>>(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        shutdown_tx.send(())?;

        let mut stream = OrderedPacketStream::new(rx).with_shutdown(shutdown_rx);
        stream_packets(&mut stream, true, false).await?;
        assert_eq!(stream.stats().packets_emitted, 0);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn signal_handlers_install_before_streaming() -> TestResult {
        let signals = ShutdownSignals::install()?;
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let waiter = tokio::spawn(signals.forward(shutdown_tx.clone()));
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());
        assert!(shutdown_rx.try_recv().is_err());
        waiter.abort();
        Ok(())
    }
}
