//! Validation of submitted post content.

use quill_core::{DomainError, DomainResult};

/// Validated title/body pair, accepted for insert or overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    /// Validate raw form input.
    ///
    /// The title must contain at least one non-whitespace character and is
    /// stored trimmed; the body may be empty and is kept verbatim.
    pub fn parse(title: &str, body: &str) -> DomainResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Title is required."));
        }
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}
