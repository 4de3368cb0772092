//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store wiring + the auth/post service operations
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `render.rs`: HTML page rendering
//! - `errors.rs`: consistent error responses and redirects

use std::sync::Arc;

use axum::{Extension, Router};
use sqlx::sqlite::SqlitePool;

use crate::middleware;

pub mod errors;
pub mod render;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(pool: SqlitePool) -> Router {
    let services = Arc::new(services::AppServices::new(pool));
    let session_state = middleware::SessionState {
        services: services.clone(),
    };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        ))
}
