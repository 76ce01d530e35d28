//! Error types for the relay.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::fmt;

use crate::response::FAILURE_MESSAGE;

/// Relay error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// No usable response from the upstream (connect, DNS, timeout, body read).
    Upstream(String),
    /// The inbound request went away before the upstream answered.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Upstream(msg) => write!(f, "upstream error: {msg}"),
            Error::Cancelled => write!(f, "upstream call cancelled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Upstream(format!("timed out: {e}"))
        } else {
            Error::Upstream(e.to_string())
        }
    }
}

/// Detail stays in the logs; callers get the fixed message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            FAILURE_MESSAGE,
        )
            .into_response()
    }
}
