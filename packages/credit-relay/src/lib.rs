//! # Credit Relay
//!
//! Forwards credit score lookups to the Cred Protocol API. The bearer token
//! stays on the server; callers only see the upstream's answer.
//!
//! ## Quick Start
//! ```bash
//! CRED_ACCESS_TOKEN=... cargo run --bin credit-relay
//! ```
//!
//! ## Endpoints
//! - `GET /fetchCreditScore/{address}` - Relay a score lookup upstream

pub mod config;
mod error;
mod handlers;
pub mod middleware;
mod response;
pub mod router;
mod state;
pub mod upstream;

pub use config::Config;
pub use error::Error;
pub use response::FAILURE_MESSAGE;
pub use router::{create as create_router, RouteSpec, ROUTES};
pub use state::AppState;
pub use upstream::{UpstreamClient, UpstreamReply};
