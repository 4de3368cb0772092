use quill_auth::{Principal, SessionToken};

/// Who is looking at this request.
///
/// Resolved once per request by the session middleware and carried as a
/// request extension; handlers and services receive it explicitly. Most
/// routes accept anonymous viewers, so the principal is optional here and
/// guards narrow it where login is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    principal: Option<Principal>,
    token: Option<SessionToken>,
}

impl ViewerContext {
    pub fn anonymous() -> Self {
        Self {
            principal: None,
            token: None,
        }
    }

    pub fn authenticated(principal: Principal, token: SessionToken) -> Self {
        Self {
            principal: Some(principal),
            token: Some(token),
        }
    }

    pub fn user(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The session token behind this viewer, when logged in.
    pub fn token(&self) -> Option<SessionToken> {
        self.token
    }
}
