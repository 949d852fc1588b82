//! Configuration management for the relnotes service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use relnotes_core::ResponseEncoding;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::AppState;

const CONFIG_FILE: &str = "relnotes.toml";
const ENV_PREFIX: &str = "RELNOTES_";

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables prefixed `RELNOTES_` (highest priority)
/// 2. Configuration file (`relnotes.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// # Example
///
/// ```no_run
/// use relnotes_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Server will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address.
    ///
    /// Environment variable: `RELNOTES_HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `RELNOTES_PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    ///
    /// Environment variable: `RELNOTES_REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Largest accepted request body in bytes.
    ///
    /// Environment variable: `RELNOTES_MAX_BODY_BYTES`
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Encoding of successful responses, `binary-digits` or `markdown`.
    ///
    /// Environment variable: `RELNOTES_RESPONSE_ENCODING`
    #[serde(default)]
    pub response_encoding: ResponseEncoding,
    /// Log filter used when `RUST_LOG` is unset.
    ///
    /// Environment variable: `RELNOTES_LOG_LEVEL`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides, then validate it.
    pub fn load() -> Result<Self> {
        let config: Self = Self::figment().extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Layered configuration sources in priority order.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Shared request state derived from this configuration.
    pub fn app_state(&self) -> AppState {
        AppState::from(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than 0");
        }

        self.parse_server_addr()?;
        self.log_filter()?;

        Ok(())
    }

    /// Log filter built from `log_level`.
    pub fn log_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("Invalid log_level {:?}", self.log_level))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            response_encoding: ResponseEncoding::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    AppState::DEFAULT_MAX_BODY_BYTES
}

fn default_log_level() -> String {
    "info,relnotes=debug,tower_http=debug".to_string()
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.port, 80);
        assert_eq!(config.response_encoding, ResponseEncoding::BinaryDigits);
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn env_overrides_file_and_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                port = 9000
                request_timeout = 5
                response_encoding = "markdown"
                "#,
            )?;
            jail.set_env("RELNOTES_PORT", "9090");
            jail.set_env("RELNOTES_MAX_BODY_BYTES", "2048");

            let config: Config = Config::figment().extract()?;

            assert_eq!(config.port, 9090);
            assert_eq!(config.request_timeout, 5);
            assert_eq!(config.max_body_bytes, 2048);
            assert_eq!(config.response_encoding, ResponseEncoding::Markdown);
            assert_eq!(config.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn unknown_encoding_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("RELNOTES_RESPONSE_ENCODING", "base64");

            assert!(Config::figment().extract::<Config>().is_err());
            Ok(())
        });
    }

    #[test]
    fn invalid_config_validation_fails() {
        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.request_timeout = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.max_body_bytes = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.host = "not a host".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.log_level = "relnotes=loudest".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_log_level_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("RELNOTES_LOG_LEVEL", "relnotes=loudest");

            let error = Config::load().unwrap_err();

            assert!(format!("{error:#}").contains("Invalid log_level"));
            Ok(())
        });
    }

    #[test]
    fn socket_address_parsing() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 9000;

        let addr = config.parse_server_addr().expect("Should parse socket address");

        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn app_state_follows_config() {
        let config = Config {
            response_encoding: ResponseEncoding::Markdown,
            max_body_bytes: 512,
            ..Config::default()
        };

        let state = config.app_state();

        assert_eq!(state.encoding, ResponseEncoding::Markdown);
        assert_eq!(state.max_body_bytes, 512);
    }
}
