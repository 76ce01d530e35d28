//! Relay configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! `credit-relay.{toml,yaml,json}` file, then `CREDIT_RELAY_*` environment
//! variables. The upstream secret defaults to `CRED_ACCESS_TOKEN`.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::Error;

/// Environment variable holding the upstream bearer credential.
pub const ACCESS_TOKEN_ENV: &str = "CRED_ACCESS_TOKEN";

/// Configuration for the credit relay.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::upstream_base_url")]
    pub upstream_base_url: String,

    #[serde(default = "defaults::access_token")]
    pub access_token: String,

    #[serde(default = "defaults::upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    #[serde(default = "defaults::connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            upstream_base_url: defaults::upstream_base_url(),
            access_token: defaults::access_token(),
            upstream_timeout_ms: defaults::upstream_timeout_ms(),
            connect_timeout_ms: defaults::connect_timeout_ms(),
        }
    }
}

// The token never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("upstream_base_url", &self.upstream_base_url)
            .field("access_token", &"<redacted>")
            .field("upstream_timeout_ms", &self.upstream_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl Config {
    /// Load from `credit-relay.*` (optional) and `CREDIT_RELAY_*` env vars.
    pub fn load() -> Result<Self, Error> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("credit-relay").required(false))
                .add_source(config::Environment::with_prefix("CREDIT_RELAY")),
        )
    }

    /// Deserialize from an arbitrary source stack.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Error> {
        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject settings the relay cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.access_token.trim().is_empty() {
            return Err(Error::Config(format!(
                "{ACCESS_TOKEN_ENV} is not set or empty"
            )));
        }
        let base = Url::parse(&self.upstream_base_url)
            .map_err(|e| Error::Config(format!("invalid upstream_base_url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(
                "upstream_base_url cannot carry path segments".into(),
            ));
        }
        if self.upstream_timeout_ms == 0 || self.connect_timeout_ms == 0 {
            return Err(Error::Config("timeouts must be non-zero".into()));
        }
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:54600".into()
    }

    pub fn upstream_base_url() -> String {
        "https://beta.credprotocol.com/api/score/address".into()
    }

    pub fn access_token() -> String {
        std::env::var(super::ACCESS_TOKEN_ENV).unwrap_or_default()
    }

    pub fn upstream_timeout_ms() -> u64 {
        5_000
    }

    pub fn connect_timeout_ms() -> u64 {
        2_000
    }
}
