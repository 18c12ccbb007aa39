//! Server configuration from the environment.

use std::net::SocketAddr;

use crate::feed::FeedConfig;

/// Overrides the station status feed URL.
pub const ENV_STATUS_URL: &str = "CITIBIKE_STATUS_URL";
/// Overrides the station information feed URL.
pub const ENV_INFORMATION_URL: &str = "CITIBIKE_INFORMATION_URL";
/// Optional request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CITIBIKE_TIMEOUT_SECS";
/// If set, serve HTTP on this address instead of MCP over stdio.
pub const ENV_HTTP_ADDR: &str = "CITIBIKE_HTTP_ADDR";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds, got {value}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

/// How the server exposes the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// MCP over stdin/stdout
    Stdio,
    /// Plain HTTP on the given address
    Http(SocketAddr),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub feeds: FeedConfig,
    pub transport: Transport,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut feeds = FeedConfig::new();

        if let Some(url) = get(ENV_STATUS_URL) {
            feeds = feeds.with_status_url(parse_url(ENV_STATUS_URL, url)?);
        }
        if let Some(url) = get(ENV_INFORMATION_URL) {
            feeds = feeds.with_information_url(parse_url(ENV_INFORMATION_URL, url)?);
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
            feeds = feeds.with_timeout(secs);
        }

        let transport = match get(ENV_HTTP_ADDR) {
            Some(value) => Transport::Http(value.trim().parse().map_err(|_| {
                ConfigError::InvalidAddr {
                    var: ENV_HTTP_ADDR,
                    value: value.clone(),
                }
            })?),
            None => Transport::Stdio,
        };

        Ok(Self { feeds, transport })
    }
}

fn parse_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    match reqwest::Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.trim().to_string()),
        _ => Err(ConfigError::InvalidUrl { var, value }),
    }
}
