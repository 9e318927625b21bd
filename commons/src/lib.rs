//! Cross-cutting commons for Actix Web microservices.
//!
//! Purpose: bundle the request/response traceability middleware, the generic
//! CRUD service wrapper, and the error-to-HTTP mapping boundary shared by
//! services built on this crate. Persistence, routing, and wiring stay in the
//! host application.

pub mod api;
pub mod middleware;
pub mod models;
pub mod service;

pub use middleware::Traceability;
