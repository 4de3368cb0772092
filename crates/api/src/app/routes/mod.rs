use axum::{routing::get, Router};

pub mod auth;
pub mod blog;
pub mod system;

/// The full route tree. Session resolution happens in middleware above
/// this router; per-route auth is enforced by guards inside the handlers.
pub fn router() -> Router {
    Router::new()
        .route("/", get(blog::index))
        .route("/health", get(system::health))
        .nest("/auth", auth::router())
        .nest("/post", blog::router())
}
