//! Generic CRUD services.
//!
//! Purpose: Wrap repository ports with uniform storage-error translation and
//! optional post-processing transforms.

pub mod crud;
pub mod error;

pub use crud::{CrudService, EntityRepository, RepositoryError, unchanged};
pub use error::Error;
