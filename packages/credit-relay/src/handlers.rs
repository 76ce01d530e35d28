//! HTTP request handlers.

use crate::error::Error;
use crate::middleware::RequestId;
use crate::response;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Relay a score lookup. `GET /fetchCreditScore/{address}`
///
/// The outbound call is cancelled if this future is dropped (caller went
/// away) or the server is shutting down.
pub async fn fetch_credit_score(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Extension(RequestId(req_id)): Extension<RequestId>,
) -> Response {
    let start = Instant::now();

    info!(req_id = %req_id, address = %address, "Relaying credit score request");

    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    match state.upstream.fetch_score_scoped(&address, cancel).await {
        Ok(reply) if reply.status.is_success() => {
            info!(
                req_id = %req_id,
                status = reply.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Credit score relayed"
            );
            response::relay(reply)
        }
        Ok(reply) => {
            warn!(
                req_id = %req_id,
                status = reply.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream returned an error, passing through"
            );
            response::relay(reply)
        }
        Err(Error::Cancelled) => {
            info!(req_id = %req_id, "Request cancelled before upstream answered");
            Error::Cancelled.into_response()
        }
        Err(e) => {
            error!(
                req_id = %req_id,
                error = %e,
                upstream = %state.config.upstream_base_url,
                timeout_ms = state.config.upstream_timeout_ms,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Error fetching credit score"
            );
            e.into_response()
        }
    }
}
