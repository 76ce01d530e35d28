//! HTTP router setup.
//!
//! Routes are declared in [`ROUTES`] and mounted from there.

use crate::handlers;
use crate::middleware::inject_request_id;
use crate::state::AppState;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Handler behind a declared route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FetchCreditScore,
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub name: &'static str,
    pub method: MethodFilter,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

pub static ROUTES: &[RouteSpec] = &[RouteSpec {
    name: "fetch_credit_score",
    method: MethodFilter::GET,
    path: "/fetchCreditScore/{address}",
    endpoint: Endpoint::FetchCreditScore,
}];

impl RouteSpec {
    fn method_router(&self) -> MethodRouter<Arc<AppState>> {
        match self.endpoint {
            Endpoint::FetchCreditScore => on(self.method, handlers::fetch_credit_score),
        }
    }
}

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    ROUTES
        .iter()
        .fold(Router::new(), |router, spec| {
            debug!(route = spec.name, path = spec.path, "Mounting route");
            router.route(spec.path, spec.method_router())
        })
        .layer(axum::middleware::from_fn(inject_request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
