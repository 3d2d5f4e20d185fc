//! Server configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::api::NaptanConfig;
use crate::cache::CacheConfig;

/// Default listen address.
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Upstream API client settings
    pub naptan: NaptanConfig,
    /// Response cache settings
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `NAPTAN_ADDR` | `127.0.0.1:3000` |
    /// | `NAPTAN_BASE_URL` | public API |
    /// | `NAPTAN_TIMEOUT_SECS` | 30 |
    /// | `NAPTAN_CACHE_TTL_SECS` | 3600 |
    /// | `NAPTAN_STRICT_ROWS` | false (invalid rows are skipped) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_var(&lookup, "NAPTAN_ADDR", "not a socket address")?
            .unwrap_or(DEFAULT_ADDR);

        let mut naptan = NaptanConfig::new();
        if let Some(url) = lookup("NAPTAN_BASE_URL") {
            naptan = naptan.with_base_url(url);
        }
        if let Some(secs) = parse_var(&lookup, "NAPTAN_TIMEOUT_SECS", "not a whole number")? {
            naptan = naptan.with_timeout(secs);
        }
        let strict = match lookup("NAPTAN_STRICT_ROWS") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError {
                var: "NAPTAN_STRICT_ROWS",
                value,
                reason: "expected true/false/1/0",
            })?,
        };
        naptan = naptan.with_skip_invalid_rows(!strict);

        let mut cache = CacheConfig::default();
        if let Some(secs) = parse_var(&lookup, "NAPTAN_CACHE_TTL_SECS", "not a whole number")? {
            cache.ttl = Duration::from_secs(secs);
        }

        Ok(Self {
            addr,
            naptan,
            cache,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    reason: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError {
                var,
                value,
                reason,
            })
        })
        .transpose()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
