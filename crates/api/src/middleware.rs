use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use quill_auth::SessionToken;

use crate::app::services::AppServices;
use crate::context::ViewerContext;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct SessionState {
    pub services: Arc<AppServices>,
}

/// Resolve the session cookie to a [`ViewerContext`] and attach it to the
/// request. Runs for every route; anonymous requests pass through with an
/// anonymous context rather than being rejected here.
pub async fn session_middleware(
    State(state): State<SessionState>,
    jar: CookieJar,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let viewer = resolve_viewer(&state, &jar).await;
    req.extensions_mut().insert(viewer);
    next.run(req).await
}

async fn resolve_viewer(state: &SessionState, jar: &CookieJar) -> ViewerContext {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return ViewerContext::anonymous();
    };

    // A malformed or stale token is treated as no session at all.
    let Ok(token) = cookie.value().parse::<SessionToken>() else {
        return ViewerContext::anonymous();
    };

    match state.services.current_user(token).await {
        Ok(Some(principal)) => ViewerContext::authenticated(principal, token),
        Ok(None) => ViewerContext::anonymous(),
        Err(err) => {
            tracing::error!(error = %err, "session lookup failed");
            ViewerContext::anonymous()
        }
    }
}
