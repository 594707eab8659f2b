//! Error types for the f1-telemetry CLI

use f1_telemetry_stream::StreamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not bind UDP source on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: StreamError,
    },

    #[error("Telemetry stream failed: {0}")]
    Stream(#[source] StreamError),

    #[error("Signal handler setup failed: {0}")]
    Signal(#[source] std::io::Error),
}

impl CliError {
    /// Process exit code for this failure. 2 stays reserved for clap's
    /// usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Bind { .. } => 6,
            CliError::Stream(StreamError::ReceiveTimeout(_)) => 4,
            CliError::Stream(_) => 3,
            CliError::Signal(_) => 5,
        }
    }
}
