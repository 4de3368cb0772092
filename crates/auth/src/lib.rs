//! `quill-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: credential
//! validation, password hashing, and the principal/session-token types.
//! Looking tokens up and persisting users is the storage layer's job.

pub mod credentials;
pub mod password;
pub mod principal;
pub mod session;

pub use credentials::Registration;
pub use password::{hash_password, verify_password, HashError};
pub use principal::Principal;
pub use session::SessionToken;
