//! Explicit handler guards.
//!
//! Login/ownership requirements are enforced by plain functions called at
//! the top of each handler, returning a typed result rather than
//! decorator-style control flow. The ownership half of the rule lives in
//! the post service, where the post is actually loaded.

use axum::response::Response;

use quill_auth::Principal;

use crate::app::errors::redirect;
use crate::context::ViewerContext;

/// Require a logged-in viewer; anonymous requests get a 302 to the login
/// page.
pub fn require_login(viewer: &ViewerContext) -> Result<Principal, Response> {
    match viewer.user() {
        Some(user) => Ok(user.clone()),
        None => Err(redirect("/auth/login")),
    }
}
