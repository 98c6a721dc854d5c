//! Client configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset variables fall back to the local publisher backend at
//! `localhost:8001`.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Base endpoint used when `PUBLISHER_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Path of the backend's status push socket.
pub const STATUS_SOCKET_PATH: &str = "/ws/status";

/// Default capacity of the socket lifecycle broadcast channel.
pub const DEFAULT_LIFECYCLE_CAPACITY: usize = 256;

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`], or built for an
/// explicit backend with [`ClientConfig::for_base_url`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the publisher backend (e.g. `http://localhost:8001`).
    pub api_url: Url,

    /// Full URL of the status WebSocket (e.g. `ws://localhost:8001/ws/status`).
    pub status_socket_url: Url,

    /// Per-request timeout. `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,

    /// Capacity of the socket lifecycle broadcast channel.
    pub lifecycle_capacity: usize,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    /// `PUBLISHER_WS_URL` overrides the socket URL derived from
    /// `PUBLISHER_API_URL`. A zero `PUBLISHER_REQUEST_TIMEOUT_SECS`
    /// disables the request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either URL is set but cannot be parsed,
    /// or uses a scheme the client cannot speak.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url =
            std::env::var("PUBLISHER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::for_base_url(&api_url)?;

        if let Ok(ws_url) = std::env::var("PUBLISHER_WS_URL") {
            config.status_socket_url = parse_url("PUBLISHER_WS_URL", &ws_url)?;
        }

        let timeout_secs: u64 = parse_env("PUBLISHER_REQUEST_TIMEOUT_SECS", 0);
        config.request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        config.lifecycle_capacity =
            parse_env("PUBLISHER_LIFECYCLE_CAPACITY", DEFAULT_LIFECYCLE_CAPACITY).max(1);

        Ok(config)
    }

    /// Builds a default configuration targeting `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `base` is not a valid `http`/`https`
    /// (or `ws`/`wss`) URL.
    pub fn for_base_url(base: &str) -> Result<Self, ConfigError> {
        let api_url = parse_url("PUBLISHER_API_URL", base)?;
        let status_socket_url = derive_status_socket_url(&api_url)?;
        Ok(Self {
            api_url,
            status_socket_url,
            request_timeout: None,
            lifecycle_capacity: DEFAULT_LIFECYCLE_CAPACITY,
        })
    }

    /// Re-targets this configuration at another backend, re-deriving the
    /// status socket URL and keeping the remaining settings.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::for_base_url`].
    pub fn with_api_url(self, base: &str) -> Result<Self, ConfigError> {
        let retargeted = Self::for_base_url(base)?;
        Ok(Self {
            api_url: retargeted.api_url,
            status_socket_url: retargeted.status_socket_url,
            ..self
        })
    }
}

/// Maps the API base URL onto the status socket: `http→ws`, `https→wss`,
/// path prefix preserved, `/ws/status` appended.
fn derive_status_socket_url(api_url: &Url) -> Result<Url, ConfigError> {
    let scheme = match api_url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    };

    let mut url = api_url.clone();
    url.set_scheme(scheme)
        .map_err(|()| ConfigError::UnsupportedScheme(api_url.scheme().to_string()))?;
    let prefix = api_url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{prefix}{STATUS_SOCKET_PATH}"));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_derives_status_socket() {
        let Ok(config) = ClientConfig::for_base_url(DEFAULT_API_URL) else {
            panic!("default url must parse");
        };
        assert_eq!(config.status_socket_url.as_str(), "ws://localhost:8001/ws/status");
        assert!(config.request_timeout.is_none());
        assert_eq!(config.lifecycle_capacity, DEFAULT_LIFECYCLE_CAPACITY);
    }

    #[test]
    fn https_maps_to_wss() {
        let Ok(config) = ClientConfig::for_base_url("https://publisher.example.com") else {
            panic!("https url must parse");
        };
        assert_eq!(
            config.status_socket_url.as_str(),
            "wss://publisher.example.com/ws/status"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        let Ok(config) = ClientConfig::for_base_url("http://10.0.0.5:9000/publisher/?x=1") else {
            panic!("prefixed url must parse");
        };
        assert_eq!(
            config.status_socket_url.as_str(),
            "ws://10.0.0.5:9000/publisher/ws/status"
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = ClientConfig::for_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let result = ClientConfig::for_base_url("ftp://localhost:8001");
        let Err(ConfigError::UnsupportedScheme(scheme)) = result else {
            panic!("expected unsupported scheme");
        };
        assert_eq!(scheme, "ftp");
    }

    #[test]
    fn with_api_url_keeps_timeout() {
        let Ok(mut config) = ClientConfig::for_base_url(DEFAULT_API_URL) else {
            panic!("default url must parse");
        };
        config.request_timeout = Some(Duration::from_secs(5));
        let Ok(config) = config.with_api_url("http://192.168.1.20:8001") else {
            panic!("retarget failed");
        };
        assert_eq!(config.api_url.as_str(), "http://192.168.1.20:8001/");
        assert_eq!(
            config.status_socket_url.as_str(),
            "ws://192.168.1.20:8001/ws/status"
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn parse_env_falls_back_on_missing() {
        let value: u64 = parse_env("PUBLISHER_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
