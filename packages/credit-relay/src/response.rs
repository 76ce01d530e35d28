//! Mapping from upstream replies to relay responses.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::upstream::UpstreamReply;

/// Body returned when the upstream gave no response at all.
pub const FAILURE_MESSAGE: &str = "Failed to fetch credit score";

/// Success collapses to 200 + JSON; anything else is mirrored as-is.
pub fn relay(reply: UpstreamReply) -> Response {
    if reply.status.is_success() {
        return (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            Body::from(reply.body),
        )
            .into_response();
    }

    let mut response = (reply.status, Body::from(reply.body)).into_response();
    if let Some(content_type) = reply.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}
