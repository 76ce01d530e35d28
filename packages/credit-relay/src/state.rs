//! Application state shared across handlers.

use crate::config::Config;
use crate::upstream::UpstreamClient;
use tokio_util::sync::CancellationToken;

/// Shared application state. Immutable after startup.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    /// Parent of every per-request token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        Ok(Self {
            upstream: UpstreamClient::new(&config)?,
            config,
            shutdown: CancellationToken::new(),
        })
    }
}
