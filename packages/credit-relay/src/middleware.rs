//! Request correlation middleware.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Propagate or generate `x-request-id` for end-to-end correlation.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(generate);

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    response
}

fn generate() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    format!("rel-{:016x}", rng.gen::<u64>())
}

/// Request correlation ID, extractable from `Request::extensions()`.
#[derive(Clone, Debug, Default)]
pub struct RequestId(pub String);
