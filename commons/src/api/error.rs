//! HTTP error payloads and mapping from service errors.
//!
//! Keep services free of transport concerns by translating [`Error`] into
//! Actix responses here. This module is the single point emitting
//! HTTP-specific error data.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::service::Error;

/// Standard error envelope returned by HTTP adapters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status name, e.g. `"Conflict"`.
    pub status: String,
    /// Numeric HTTP status code.
    pub code: u16,
    /// Human-readable message, when one is available.
    pub message: Option<String>,
    /// Capture time of the failure.
    pub timestamp: DateTime<Utc>,
    /// Field-level validation failures; empty for most kinds.
    pub binding_errors: Vec<String>,
}

impl ErrorResponse {
    /// Build an envelope for the given status, capturing the current instant.
    #[must_use]
    pub fn new(status: StatusCode, message: Option<String>, binding_errors: Vec<String>) -> Self {
        Self {
            status: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            code: status.as_u16(),
            message,
            timestamp: Utc::now(),
            binding_errors,
        }
    }

    /// Build the envelope for a service error using the status mapping table.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        Self::new(
            status_for(error),
            Some(error.to_string()),
            error.binding_errors().to_vec(),
        )
    }
}

/// HTTP status for each service error kind.
#[must_use]
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::DuplicateEntity { .. } => StatusCode::CONFLICT,
        Error::InvalidEntity { .. }
        | Error::PatchInvalid { .. }
        | Error::PreconditionFailed { .. } => StatusCode::BAD_REQUEST,
        Error::EntityNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Service { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from_error(self))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    #[case::duplicate(Error::duplicate_entity("Widget", Uuid::nil()), StatusCode::CONFLICT)]
    #[case::invalid(
        Error::invalid_entity("Widget", "bad", Vec::new()),
        StatusCode::BAD_REQUEST
    )]
    #[case::patch_invalid(
        Error::patch_invalid("Widget", "bad", Vec::new()),
        StatusCode::BAD_REQUEST
    )]
    #[case::not_found(Error::entity_not_found("Widget", Uuid::nil()), StatusCode::NOT_FOUND)]
    #[case::service(Error::service("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::precondition(Error::precondition_failed("boom"), StatusCode::BAD_REQUEST)]
    fn maps_each_error_kind_to_its_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(status_for(&error), expected);
    }

    #[test]
    fn envelope_carries_status_name_code_and_timestamp() {
        let before = Utc::now();
        let envelope = ErrorResponse::from_error(&Error::duplicate_entity("Widget", Uuid::nil()));
        assert_eq!(envelope.status, "Conflict");
        assert_eq!(envelope.code, 409);
        assert!(envelope.timestamp >= before);
        assert!(envelope.binding_errors.is_empty());
    }

    #[test]
    fn envelope_surfaces_binding_errors_for_validation_kinds() {
        let error = Error::invalid_entity("Widget", "bad", vec!["label must not be empty".into()]);
        let envelope = ErrorResponse::from_error(&error);
        assert_eq!(envelope.code, 400);
        assert_eq!(envelope.binding_errors, ["label must not be empty"]);
    }

    #[test]
    fn envelope_serializes_with_camel_case_keys() {
        let envelope = ErrorResponse::from_error(&Error::service("boom"));
        let value = serde_json::to_value(&envelope).expect("serializes");
        let object = value.as_object().expect("json object");
        assert!(object.contains_key("bindingErrors"));
        assert!(object.contains_key("timestamp"));
        assert_eq!(object.get("status").and_then(|v| v.as_str()), Some("Internal Server Error"));
        assert_eq!(object.get("code").and_then(serde_json::Value::as_u64), Some(500));
    }

    #[actix_web::test]
    async fn handler_errors_render_the_envelope() {
        let app = init_service(App::new().route(
            "/",
            web::get().to(|| async {
                Result::<HttpResponse, Error>::Err(Error::duplicate_entity("Widget", Uuid::nil()))
            }),
        ))
        .await;
        let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: ErrorResponse = read_body_json(res).await;
        assert_eq!(body.status, "Conflict");
        assert_eq!(body.code, 409);
        assert!(body.message.is_some());
        assert!(body.binding_errors.is_empty());
    }
}
