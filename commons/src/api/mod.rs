//! HTTP adapter surface.
//!
//! Purpose: Map service failures onto HTTP responses.

pub mod error;

pub use error::{ErrorResponse, status_for};
