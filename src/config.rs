//! Client configuration loaded from environment variables and an optional
//! fetched JSON document.
//!
//! All local settings come from environment variables (or a `.env` file
//! via `dotenvy`). The SSR address can additionally be served as JSON from
//! `SSR_CONFIG_URL`; if that fetch fails the address falls back to
//! `SSR_URL` and finally to [`DEFAULT_SSR_URL`].

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;
use crate::protocol::DEFAULT_SUBSCRIPTIONS;

/// SSR WebSocket address used when nothing else is configured.
pub const DEFAULT_SSR_URL: &str = "ws://localhost:9422";

const DEFAULT_SSR_HOST: &str = "localhost";
const DEFAULT_SSR_PORT: u16 = 9422;

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Socket address of the local API (e.g. `127.0.0.1:9423`).
    pub listen_addr: SocketAddr,

    /// SSR WebSocket URL used when no remote config is available.
    pub ssr_url: String,

    /// URL of a JSON document overriding the SSR address.
    pub config_url: Option<String>,

    /// Upper bound for fetching `config_url` (connect plus response).
    pub config_timeout: Duration,

    /// Topics sent with `subscribe` after connecting.
    pub subscriptions: Vec<String>,

    /// Capacity of the scene event broadcast channel.
    pub event_bus_capacity: usize,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `LISTEN_ADDR` is set but cannot
    /// be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let listen_addr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:9423".to_string())
            .parse()
            .map_err(|err| ClientError::Config(format!("LISTEN_ADDR: {err}")))?;

        let ssr_url = std::env::var("SSR_URL").unwrap_or_else(|_| DEFAULT_SSR_URL.to_string());
        let config_url = std::env::var("SSR_CONFIG_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let config_timeout = Duration::from_millis(parse_env("SSR_CONFIG_TIMEOUT_MS", 5000));

        let subscriptions = std::env::var("SSR_SUBSCRIPTIONS")
            .ok()
            .map(|raw| parse_list(&raw))
            .filter(|topics| !topics.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_SUBSCRIPTIONS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            });

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 1024);
        let log_json = matches!(std::env::var("LOG_FORMAT").ok().as_deref(), Some("json"));

        Ok(Self {
            listen_addr,
            ssr_url,
            config_url,
            config_timeout,
            subscriptions,
            event_bus_capacity,
            log_json,
        })
    }

    /// Determines the SSR address, consulting `config_url` first.
    ///
    /// A failed fetch is logged and the local `ssr_url` is used instead.
    pub async fn resolve_ssr_url(&self) -> String {
        let Some(config_url) = &self.config_url else {
            return self.ssr_url.clone();
        };
        match fetch_remote_config(config_url, self.config_timeout).await {
            Ok(remote) => {
                let url = remote.websocket_url();
                tracing::info!(config_url, %url, "using SSR address from remote config");
                url
            }
            Err(err) => {
                tracing::error!(config_url, error = %err, "could not load remote config");
                self.ssr_url.clone()
            }
        }
    }
}

/// SSR address as served by the config endpoint.
///
/// Either a full `url`, or `host`/`port` (each defaulting to the
/// renderer's defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    /// Full WebSocket URL; wins over `host`/`port`.
    #[serde(default)]
    pub url: Option<String>,
    /// Renderer host name.
    #[serde(default)]
    pub host: Option<String>,
    /// Renderer WebSocket port.
    #[serde(default)]
    pub port: Option<u16>,
}

impl RemoteConfig {
    /// Builds the WebSocket URL described by this config.
    #[must_use]
    pub fn websocket_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let host = self.host.as_deref().unwrap_or(DEFAULT_SSR_HOST);
        let port = self.port.unwrap_or(DEFAULT_SSR_PORT);
        format!("ws://{host}:{port}")
    }
}

/// Fetches and parses the JSON config document at `url`, giving up after
/// `timeout`.
///
/// # Errors
///
/// Returns [`ClientError::ConfigFetch`] on network errors, timeouts,
/// non-success status codes, or an unparsable body.
pub async fn fetch_remote_config(
    url: &str,
    timeout: Duration,
) -> Result<RemoteConfig, ClientError> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;
    let config = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<RemoteConfig>()
        .await?;
    Ok(config)
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated list, dropping empty items.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
