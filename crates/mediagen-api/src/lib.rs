//! Axum HTTP API server.
//!
//! Thin request surface over the provider client: validates input shape,
//! delegates to the image and video services, and streams result bytes
//! back to the caller.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
