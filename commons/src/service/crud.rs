//! Generic CRUD operations over a repository port.
//!
//! [`CrudService`] translates storage failures into service error kinds and
//! threads an optional post-processing transform through each operation. It
//! carries no algorithmic content beyond that mapping; persistence itself
//! lives behind [`EntityRepository`] in the host application.

use std::future::{Future, Ready, ready};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use super::error::Error;
use crate::models::Entity;

/// Storage-level failures surfaced by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("uniqueness constraint violated: {message}")]
    UniqueViolation {
        /// Backend-supplied description of the violation.
        message: String,
    },

    /// Any other backend failure.
    #[error("storage backend failed: {message}")]
    Backend {
        /// Backend-supplied description of the failure.
        message: String,
    },
}

impl RepositoryError {
    /// Helper for uniqueness violations.
    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
        }
    }

    /// Helper for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port implemented by storage adapters for a single entity type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityRepository<E: Entity + 'static>: Send + Sync {
    /// Persist the entity, returning the stored representation.
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    /// Look up one entity by its guid.
    async fn find_by_guid(&self, guid: Uuid) -> Result<Option<E>, RepositoryError>;

    /// Retrieve every entity of this type.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Remove the entity from storage.
    async fn delete(&self, entity: E) -> Result<(), RepositoryError>;
}

/// Identity post-processing transform.
///
/// Pass this where no post-processing is needed.
pub fn unchanged<E>(entity: E) -> Ready<Result<E, Error>> {
    ready(Ok(entity))
}

/// Generic CRUD service over a repository port.
///
/// Each operation accepts a post-processing transform applied to the entity
/// after the core storage operation succeeds; use [`unchanged`] when none is
/// needed.
pub struct CrudService<E, R> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> Clone for CrudService<E, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _entity: PhantomData,
        }
    }
}

impl<E, R> CrudService<E, R>
where
    E: Entity + 'static,
    R: EntityRepository<E>,
{
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    /// Persist a new entity.
    ///
    /// A uniqueness violation maps to [`Error::DuplicateEntity`]; the
    /// post-processing transform runs only after successful persistence.
    pub async fn create<F, Fut>(&self, entity: E, fn_modify: F) -> Result<E, Error>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Result<E, Error>>,
    {
        let guid = entity.guid();
        let saved = self
            .repository
            .save(entity)
            .await
            .map_err(|error| match error {
                RepositoryError::UniqueViolation { .. } => Error::duplicate_entity(E::KIND, guid),
                RepositoryError::Backend { .. } => unexpected("creating", E::KIND, &error),
            })?;
        fn_modify(saved).await
    }

    /// Look up the entity identified by `guid`.
    pub async fn find_by_guid<F, Fut>(&self, guid: Uuid, fn_modify: F) -> Result<E, Error>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Result<E, Error>>,
    {
        let entity = self
            .repository
            .find_by_guid(guid)
            .await
            .map_err(|error| unexpected("finding", E::KIND, &error))?
            .ok_or_else(|| Error::entity_not_found(E::KIND, guid))?;
        fn_modify(entity).await
    }

    /// List every entity, applying the transform to each.
    pub async fn list<F, Fut>(&self, fn_modify: F) -> Result<Vec<E>, Error>
    where
        F: Fn(E) -> Fut,
        Fut: Future<Output = Result<E, Error>>,
    {
        let entities = self
            .repository
            .find_all()
            .await
            .map_err(|error| unexpected("retrieving", E::KIND, &error))?;
        let mut modified = Vec::with_capacity(entities.len());
        for entity in entities {
            modified.push(fn_modify(entity).await?);
        }
        Ok(modified)
    }

    /// Update the entity identified by `guid`.
    ///
    /// The mutation `fn_entity` is applied before the save, the
    /// post-processing transform after.
    pub async fn update<M, F, Fut>(&self, guid: Uuid, fn_entity: M, fn_modify: F) -> Result<E, Error>
    where
        M: FnOnce(E) -> E,
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Result<E, Error>>,
    {
        let entity = self
            .repository
            .find_by_guid(guid)
            .await
            .map_err(|error| unexpected("updating", E::KIND, &error))?
            .ok_or_else(|| Error::entity_not_found(E::KIND, guid))?;
        let saved = self
            .repository
            .save(fn_entity(entity))
            .await
            .map_err(|error| unexpected("updating", E::KIND, &error))?;
        fn_modify(saved).await
    }

    /// Delete the entity identified by `guid`.
    pub async fn delete(&self, guid: Uuid) -> Result<(), Error> {
        let entity = self
            .repository
            .find_by_guid(guid)
            .await
            .map_err(|error| unexpected("deleting", E::KIND, &error))?
            .ok_or_else(|| Error::entity_not_found(E::KIND, guid))?;
        self.repository
            .delete(entity)
            .await
            .map_err(|error| unexpected("deleting", E::KIND, &error))
    }
}

fn unexpected(action: &str, entity_type: &str, error: &RepositoryError) -> Error {
    warn!(%error, entity_type, "repository operation failed");
    Error::service(format!("Unexpected error when {action} {entity_type}"))
}
