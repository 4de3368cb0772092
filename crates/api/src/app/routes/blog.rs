use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use quill_core::{DomainError, PostId};

use crate::app::services::{AppServices, ServiceError};
use crate::app::{errors, render};
use crate::context::ViewerContext;
use crate::guards;

pub fn router() -> Router {
    Router::new()
        .route("/create", get(create_form).post(create_submit))
        .route("/:id", get(detail))
        .route("/update/:id", get(update_form).post(update_submit))
        .route("/delete/:id", post(delete))
}

/// Title/body as submitted. Extracted as `Option<Form<_>>` in the mutating
/// handlers so that a missing or malformed body still reaches the login
/// guard instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
) -> axum::response::Response {
    match services.list_posts().await {
        Ok(posts) => Html(render::index_page(&posts, viewer.user())).into_response(),
        Err(err) => errors::error_response(err),
    }
}

pub async fn detail(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.get_post(PostId::new(id)).await {
        Ok(post) => Html(render::detail_page(&post, viewer.user())).into_response(),
        Err(err) => errors::error_response(err),
    }
}

pub async fn create_form(Extension(viewer): Extension<ViewerContext>) -> axum::response::Response {
    let user = match guards::require_login(&viewer) {
        Ok(user) => user,
        Err(response) => return response,
    };
    Html(render::create_page(&user, None, "", "")).into_response()
}

pub async fn create_submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    form: Option<Form<PostForm>>,
) -> axum::response::Response {
    let user = match guards::require_login(&viewer) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let PostForm { title, body } = form.map(|Form(form)| form).unwrap_or_default();

    match services.create_post(&user, &title, &body).await {
        Ok(_) => errors::redirect("/"),
        Err(ServiceError::Domain(DomainError::Validation(message))) => {
            Html(render::create_page(&user, Some(&message), &title, &body)).into_response()
        }
        Err(err) => errors::error_response(err),
    }
}

pub async fn update_form(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let user = match guards::require_login(&viewer) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match services.post_for_edit(PostId::new(id), &user).await {
        Ok(post) => {
            Html(render::edit_page(&user, post.id, None, &post.title, &post.body)).into_response()
        }
        Err(err) => errors::error_response(err),
    }
}

pub async fn update_submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<i64>,
    form: Option<Form<PostForm>>,
) -> axum::response::Response {
    let user = match guards::require_login(&viewer) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let id = PostId::new(id);
    let PostForm { title, body } = form.map(|Form(form)| form).unwrap_or_default();

    match services.update_post(id, &user, &title, &body).await {
        Ok(()) => errors::redirect("/"),
        Err(ServiceError::Domain(DomainError::Validation(message))) => {
            Html(render::edit_page(&user, id, Some(&message), &title, &body)).into_response()
        }
        Err(err) => errors::error_response(err),
    }
}

pub async fn delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(viewer): Extension<ViewerContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let user = match guards::require_login(&viewer) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match services.delete_post(PostId::new(id), &user).await {
        Ok(()) => errors::redirect("/"),
        Err(err) => errors::error_response(err),
    }
}
