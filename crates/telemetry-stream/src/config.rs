//! UDP source configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Port F1 2017 broadcasts telemetry on unless changed in-game.
pub const DEFAULT_PORT: u16 = 20777;

pub const ENV_BIND_ADDR: &str = "F1_TELEMETRY_BIND_ADDR";
pub const ENV_PORT: &str = "F1_TELEMETRY_UDP_PORT";
pub const ENV_RECV_TIMEOUT_MS: &str = "F1_TELEMETRY_RECV_TIMEOUT_MS";

/// Where and how [`crate::UdpPacketSource`] listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpSourceConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Fail the stream if no datagram arrives within this window.
    pub recv_timeout: Option<Duration>,
}

impl Default for UdpSourceConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            recv_timeout: None,
        }
    }
}

impl UdpSourceConfig {
    /// Defaults overridden by `F1_TELEMETRY_*` environment variables.
    ///
    /// Unparseable or zero values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: lookup(ENV_BIND_ADDR)
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
                .unwrap_or(defaults.bind_addr),
            port: parse_nonzero::<u16>(lookup(ENV_PORT)).unwrap_or(defaults.port),
            recv_timeout: parse_nonzero::<u64>(lookup(ENV_RECV_TIMEOUT_MS))
                .map(Duration::from_millis)
                .or(defaults.recv_timeout),
        }
    }

    pub fn with_bind_addr(mut self, bind_addr: IpAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Override the UDP port (port 0 asks the OS for an ephemeral one).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_recv_timeout(mut self, recv_timeout: Option<Duration>) -> Self {
        self.recv_timeout = recv_timeout;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

// ── Env helpers ───────────────────────────────────────────────────────────────

fn parse_nonzero<T>(raw: Option<String>) -> Option<T>
where
    T: std::str::FromStr + Default + PartialEq,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_listens_on_all_interfaces_port_20777() {
        let config = UdpSourceConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:20777");
        assert_eq!(config.recv_timeout, None);
    }

    #[test]
    fn lookup_overrides_every_field() {
        let config = UdpSourceConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "127.0.0.1"),
            (ENV_PORT, "20778"),
            (ENV_RECV_TIMEOUT_MS, "1500"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:20778");
        assert_eq!(config.recv_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn invalid_and_zero_values_fall_back() {
        let config = UdpSourceConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "not-an-ip"),
            (ENV_PORT, "0"),
            (ENV_RECV_TIMEOUT_MS, "-5"),
        ]));
        assert_eq!(config, UdpSourceConfig::default());

        let config = UdpSourceConfig::from_lookup(lookup_from(&[(ENV_PORT, "70000")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn builder_setters() {
        let config = UdpSourceConfig::default()
            .with_bind_addr(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_port(0)
            .with_recv_timeout(Some(Duration::from_secs(2)));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:0");
        assert_eq!(config.recv_timeout, Some(Duration::from_secs(2)));
    }
}
