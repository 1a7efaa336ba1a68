//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use scribe_core::error::{DomainError, PublishError, RepoError};
use scribe_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound { code: &'static str, detail: String },
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict { code: &'static str, detail: String },
    /// A draft failed an admission rule; `code` names the rule.
    Validation { code: &'static str, detail: String },
    Internal(String),
}

impl AppError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        AppError::NotFound {
            code: "NOT_FOUND",
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound { detail, .. } => write!(f, "Not found: {}", detail),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict { detail, .. } => write!(f, "Conflict: {}", detail),
            AppError::Validation { code, detail } => write!(f, "{}: {}", code, detail),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound { code, detail } => {
                ErrorResponse::not_found(detail).with_code(*code)
            }
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden(detail) => ErrorResponse::forbidden().with_detail(detail),
            AppError::Conflict { code, detail } => {
                ErrorResponse::conflict(detail).with_code(*code)
            }
            AppError::Validation { code, detail } => ErrorResponse::unprocessable(*code, detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => AppError::NotFound {
                code: if entity_type == "Draft" {
                    "DRAFT_NOT_FOUND"
                } else {
                    "NOT_FOUND"
                },
                detail: format!("{} with id {} not found", entity_type, id),
            },
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict {
                code: "CONFLICT",
                detail: msg,
            },
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        let detail = err.to_string();
        match err {
            PublishError::DraftNotFound { .. } => AppError::NotFound {
                code: "DRAFT_NOT_FOUND",
                detail,
            },
            PublishError::Validation { reason, detail } => AppError::Validation {
                code: reason.code(),
                detail,
            },
            PublishError::AlreadyPublished { .. } => AppError::Conflict {
                code: "ALREADY_PUBLISHED",
                detail,
            },
            PublishError::Conflict { .. } => AppError::Conflict {
                code: "CONFLICT",
                detail,
            },
            PublishError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::not_found("Resource not found"),
            RepoError::Constraint(msg) => AppError::Conflict {
                code: "CONFLICT",
                detail: msg,
            },
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::ValidationReason;

    #[test]
    fn test_publish_errors_keep_their_codes() {
        let cases = [
            (
                AppError::from(PublishError::DraftNotFound {
                    draft_id: "unknown".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(PublishError::Validation {
                    reason: ValidationReason::InterestReadTimeNotMet,
                    detail: "too short".into(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(PublishError::AlreadyPublished {
                    draft_id: "d1".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(PublishError::Internal("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status);
        }
        assert!(matches!(
            AppError::from(PublishError::Validation {
                reason: ValidationReason::InterestReadTimeNotMet,
                detail: String::new(),
            }),
            AppError::Validation {
                code: "INTEREST_READ_TIME_NOT_MET",
                ..
            }
        ));
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let response = AppError::Internal("password=hunter2".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
