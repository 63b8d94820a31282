//! Feature modules. Each follows the same layout: `model.rs` for data
//! structures and DTOs, `service.rs` for business logic, `controller.rs`
//! for HTTP handlers and `router.rs` for route wiring.

pub mod auth;
pub mod comments;
pub mod lessons;
pub mod users;
