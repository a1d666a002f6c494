//! Shree relay crate - stateless chat relay to the upstream generation API.
//!
//! Serves `POST /api/chat`, which prepends the receptionist persona to the
//! caller's transcript and returns the upstream response envelope verbatim,
//! plus a `GET /health` probe.

pub mod backend;
pub mod error;
pub mod handlers;
pub mod persona;
pub mod rate_limit;
pub mod relay;
pub mod routes;
pub mod state;

pub use backend::{GeminiBackend, GenerationBackend};
pub use error::{ApiError, RelayError};
pub use relay::{build_upstream_request, Relay};
pub use routes::{create_router, start_server};
pub use state::AppState;
