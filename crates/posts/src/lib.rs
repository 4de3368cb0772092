//! `quill-posts` — post domain: the entity, content validation, ownership.

pub mod draft;
pub mod post;

pub use draft::PostDraft;
pub use post::Post;
