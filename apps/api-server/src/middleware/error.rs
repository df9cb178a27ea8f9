//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode, web};
use blog_core::DomainError;
use blog_core::error::FieldErrors;
use blog_shared::ErrorResponse;
use thiserror::Error;

use crate::observability::current_request_id;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {detail}")]
    NotFound { detail: String, id: Option<u64> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation errors: {0}")]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound { detail, id } => {
                let body = ErrorResponse::not_found(detail);
                match id {
                    Some(id) => body.with_id(*id),
                    None => body,
                }
            }
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(fields) => {
                let detail = if fields.missing.is_empty() {
                    "Invalid field values."
                } else {
                    "Missing required fields."
                };
                ErrorResponse::bad_request(detail)
                    .with_fields(fields.missing.iter().copied(), fields.invalid.iter().copied())
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let error = match current_request_id() {
            Some(request_id) => error.with_request_id(request_id),
            None => error,
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => AppError::NotFound {
                detail: format!("{} with id {} not found", entity_type, id),
                id: Some(id),
            },
            DomainError::Validation(fields) => AppError::Validation(fields),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Extractor settings so malformed input gets the same problem bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        tracing::debug!(error = %err, "Rejected JSON body");
        error::Error::from(AppError::BadRequest("Invalid or missing JSON".to_string()))
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::debug!(error = %err, path = req.path(), "Unparseable path segment");
        error::Error::from(AppError::NotFound {
            detail: format!("No resource at {}", req.path()),
            id: None,
        })
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::BadRequest(format!("Invalid query string: {}", err)))
    })
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let not_found = AppError::from(DomainError::post_not_found(8));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(DomainError::Validation(FieldErrors::invalid("sort")));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let internal = AppError::from(DomainError::Internal("boom".to_string()));
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_body_has_no_request_id_outside_a_request() {
        let resp = AppError::BadRequest("nope".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "nope");
        assert!(body.get("request_id").is_none());
    }

    #[test]
    fn test_not_found_carries_id() {
        match AppError::from(DomainError::post_not_found(8)) {
            AppError::NotFound { detail, id } => {
                assert_eq!(detail, "Post with id 8 not found");
                assert_eq!(id, Some(8));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
