//! Single-shot score fetch.

use primitive_types::U256;
use std::time::Duration;
use tracing::{debug, warn};

use crate::encode::decode_score;
use crate::request::{ScoreQuery, DEFAULT_BASE_URL};
use crate::OracleError;

/// Knobs for one callback invocation.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// JSON pointer to the score inside the body, e.g. `/score`.
    pub json_pointer: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(5_000),
            json_pointer: None,
        }
    }
}

pub struct ScoreFetcher {
    http: reqwest::Client,
    options: FetchOptions,
}

impl ScoreFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| OracleError::Transport(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, options })
    }

    /// One `GET`, then decode. Non-2xx is an error, never a zero score.
    pub async fn fetch(&self, query: &ScoreQuery) -> Result<U256, OracleError> {
        let url = query.url(&self.options.base_url)?;
        debug!(url = %url, "Requesting credit score");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Score endpoint returned an error");
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_score(&body, self.options.json_pointer.as_deref())
    }
}
