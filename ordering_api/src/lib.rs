// Ordering API Server Library
//
// This library provides the HTTP API server for the restaurant ordering
// backend. It exposes REST endpoints for managing dishes and orders over an
// injected data store.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod validate;

pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use server::{ApiServer, ApiServerConfig};
pub use state::ApiState;
