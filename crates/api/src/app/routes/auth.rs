use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use quill_core::DomainError;

use crate::app::services::{AppServices, ServiceError};
use crate::app::{errors, render};
use crate::context::ViewerContext;
use crate::guards;
use crate::middleware::SESSION_COOKIE;

pub fn router() -> Router {
    Router::new()
        .route("/register", get(register_form).post(register_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn register_form(Extension(viewer): Extension<ViewerContext>) -> Html<String> {
    Html(render::register_page(viewer.user(), None))
}

pub async fn register_submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Form(form): Form<CredentialsForm>,
) -> axum::response::Response {
    match services.register(&form.username, &form.password).await {
        Ok(_) => errors::redirect("/auth/login"),
        Err(ServiceError::Domain(DomainError::Validation(message))) => {
            Html(render::register_page(viewer.user(), Some(&message))).into_response()
        }
        Err(err) => errors::error_response(err),
    }
}

pub async fn login_form(Extension(viewer): Extension<ViewerContext>) -> Html<String> {
    Html(render::login_page(viewer.user(), None))
}

pub async fn login_submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> axum::response::Response {
    match services.login(&form.username, &form.password).await {
        Ok((_, token)) => {
            let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), errors::redirect("/")).into_response()
        }
        Err(ServiceError::Domain(err @ (DomainError::Auth(_) | DomainError::Validation(_)))) => {
            Html(render::login_page(viewer.user(), Some(&err.to_string()))).into_response()
        }
        Err(err) => errors::error_response(err),
    }
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    jar: CookieJar,
) -> axum::response::Response {
    if let Err(response) = guards::require_login(&viewer) {
        return response;
    }

    if let Some(token) = viewer.token() {
        if let Err(err) = services.logout(token).await {
            return errors::error_response(err);
        }
    }

    let stale = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(stale), errors::redirect("/")).into_response()
}
