//! API routes
//!
//! - [`health`] - liveness probe
//! - [`print`] - certificate, signing and ticket endpoints

pub mod convert;
pub mod health;
pub mod print;

use axum::Router;
use shared::error::{AppError, ErrorCode};

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(print::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}
