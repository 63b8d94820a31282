//! Request middleware and extractors.
//!
//! The authentication flow: a client sends `Authorization: Bearer <token>`,
//! [`auth::require_auth`] (or the [`auth::AuthUser`] extractor directly)
//! verifies it, and the decoded claims are handed to the handler. Requests
//! failing verification never reach business logic.

pub mod auth;
