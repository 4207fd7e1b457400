//! Axum HTTP API server for the subtitle gateway.
//!
//! This crate provides:
//! - Track listing, subtitle download, and subtitle proxy endpoints
//! - CORS-open responses with request-id propagation
//! - Environment-based configuration

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
