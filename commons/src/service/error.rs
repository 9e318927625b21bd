//! Service-level error kinds.
//!
//! These errors are transport agnostic. The `api` module translates them into
//! HTTP responses; no other layer emits HTTP-specific error data.

use thiserror::Error;
use uuid::Uuid;

/// Errors signaled by services built on the CRUD wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A record with the same identity already exists.
    #[error("a duplicate {entity_type} already exists with guid {guid}")]
    DuplicateEntity {
        /// Entity type name.
        entity_type: String,
        /// Identity of the conflicting record.
        guid: Uuid,
    },

    /// The submitted entity failed validation.
    #[error("the {entity_type} is invalid: {message}")]
    InvalidEntity {
        /// Entity type name.
        entity_type: String,
        /// Validation summary.
        message: String,
        /// Field-level validation failures.
        binding_errors: Vec<String>,
    },

    /// The submitted patch document failed validation.
    #[error("the patch for {entity_type} is invalid: {message}")]
    PatchInvalid {
        /// Entity type name.
        entity_type: String,
        /// Validation summary.
        message: String,
        /// Field-level validation failures.
        binding_errors: Vec<String>,
    },

    /// No record exists for the requested identity.
    #[error("unable to find {entity_type} with guid {guid}")]
    EntityNotFound {
        /// Entity type name.
        entity_type: String,
        /// Requested identity.
        guid: Uuid,
    },

    /// Catch-all for unexpected service failures.
    #[error("{message}")]
    Service {
        /// Descriptive failure message.
        message: String,
    },

    /// A precondition check failed before the operation ran.
    #[error("{message}")]
    PreconditionFailed {
        /// Description of the failed check.
        message: String,
    },
}

impl Error {
    /// Helper for duplicate-identity failures.
    pub fn duplicate_entity(entity_type: impl Into<String>, guid: Uuid) -> Self {
        Self::DuplicateEntity {
            entity_type: entity_type.into(),
            guid,
        }
    }

    /// Helper for entity validation failures.
    pub fn invalid_entity(
        entity_type: impl Into<String>,
        message: impl Into<String>,
        binding_errors: Vec<String>,
    ) -> Self {
        Self::InvalidEntity {
            entity_type: entity_type.into(),
            message: message.into(),
            binding_errors,
        }
    }

    /// Helper for patch validation failures.
    pub fn patch_invalid(
        entity_type: impl Into<String>,
        message: impl Into<String>,
        binding_errors: Vec<String>,
    ) -> Self {
        Self::PatchInvalid {
            entity_type: entity_type.into(),
            message: message.into(),
            binding_errors,
        }
    }

    /// Helper for missing-record failures.
    pub fn entity_not_found(entity_type: impl Into<String>, guid: Uuid) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            guid,
        }
    }

    /// Helper for unexpected service failures.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Helper for failed precondition checks.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Field-level validation failures carried by this error.
    ///
    /// Empty for every kind except [`Self::InvalidEntity`] and
    /// [`Self::PatchInvalid`].
    #[must_use]
    pub fn binding_errors(&self) -> &[String] {
        match self {
            Self::InvalidEntity { binding_errors, .. }
            | Self::PatchInvalid { binding_errors, .. } => binding_errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_entity_type_and_guid() {
        let guid = Uuid::nil();
        let error = Error::entity_not_found("Widget", guid);
        assert_eq!(
            error.to_string(),
            format!("unable to find Widget with guid {guid}")
        );
    }

    #[test]
    fn binding_errors_empty_for_non_validation_kinds() {
        assert!(Error::service("boom").binding_errors().is_empty());
        assert!(
            Error::duplicate_entity("Widget", Uuid::nil())
                .binding_errors()
                .is_empty()
        );
    }

    #[test]
    fn binding_errors_surface_for_validation_kinds() {
        let error = Error::invalid_entity("Widget", "bad", vec!["label must not be empty".into()]);
        assert_eq!(error.binding_errors(), ["label must not be empty"]);
    }
}
