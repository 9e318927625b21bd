//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as traceability.

pub mod traceability;

pub use traceability::Traceability;
