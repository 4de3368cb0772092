use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};

use quill_core::DomainError;

use crate::app::render;
use crate::app::services::ServiceError;

/// A literal `302 Found` redirect.
///
/// axum's `Redirect` helpers emit 303/307; browsers and the tests expect
/// the classic form-handling 302.
pub fn redirect(location: &str) -> axum::response::Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Map a service failure to a response.
///
/// Validation and auth failures are normally intercepted by the form
/// handlers (they re-render the form); anything arriving here is mapped to
/// a plain status page.
pub fn error_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::NotFound) => {
            (StatusCode::NOT_FOUND, Html(render::error_page("404 Not Found"))).into_response()
        }
        ServiceError::Domain(DomainError::Forbidden) => {
            (StatusCode::FORBIDDEN, Html(render::error_page("403 Forbidden"))).into_response()
        }
        ServiceError::Domain(err) => {
            (StatusCode::BAD_REQUEST, Html(render::error_page(&err.to_string()))).into_response()
        }
        ServiceError::Storage(err) => {
            tracing::error!(error = %err, "storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::error_page("500 Internal Server Error")),
            )
                .into_response()
        }
        ServiceError::Hash(err) => {
            tracing::error!(error = %err, "password hashing failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::error_page("500 Internal Server Error")),
            )
                .into_response()
        }
    }
}
