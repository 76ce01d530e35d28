//! Outbound client for the Cred Protocol score API.
//!
//! One `GET` per inbound request, no retries. Any HTTP response, success or
//! not, is handed back as an [`UpstreamReply`]; only a missing response is an
//! error.

use axum::http::{header, HeaderValue, StatusCode};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::Error;

/// Status, content type and raw body of an upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// HTTP client bound to the configured upstream and credential.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url = Url::parse(&config.upstream_base_url)
            .map_err(|e| Error::Config(format!("invalid upstream_base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(
                "upstream_base_url cannot carry path segments".into(),
            ));
        }

        let mut authorization =
            HeaderValue::from_str(&format!("Token {}", config.access_token.trim()))
                .map_err(|_| Error::Config("access token is not a valid header value".into()))?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::Config(format!("HTTP client build failed: {e}")))?;

        info!(
            upstream = %base_url,
            timeout_ms = config.upstream_timeout_ms,
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            base_url,
            authorization,
        })
    }

    /// `{base}/{address}/`, with `address` as a single path segment.
    pub fn score_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(address).push("");
        }
        url
    }

    /// Issue the lookup and read the full body.
    pub async fn fetch_score(&self, address: &str) -> Result<UpstreamReply, Error> {
        let url = self.score_url(address);
        debug!(url = %url, "Fetching credit score");

        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }

    /// Same as [`fetch_score`](Self::fetch_score), but on its own task that
    /// drops the outbound call as soon as `cancel` fires. The task watches the
    /// token itself, so it also stops when the awaiting caller is dropped.
    pub async fn fetch_score_scoped(
        &self,
        address: &str,
        cancel: CancellationToken,
    ) -> Result<UpstreamReply, Error> {
        let client = self.clone();
        let address = address.to_owned();
        let task = tokio::spawn(async move {
            tokio::select! {
                result = client.fetch_score(&address) => result,
                _ = cancel.cancelled() => {
                    debug!(address = %address, "Upstream call cancelled");
                    Err(Error::Cancelled)
                }
            }
        });

        task.await
            .unwrap_or_else(|e| Err(Error::Upstream(format!("upstream task failed: {e}"))))
    }
}
