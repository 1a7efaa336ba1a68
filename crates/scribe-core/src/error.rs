//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// Domain errors - business logic failures outside the publish transition.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Map a storage failure for the entity identified by `id`.
    pub fn from_repo(err: RepoError, entity_type: &'static str, id: &str) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type,
                id: id.to_string(),
            },
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Why a draft was refused by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    MalformedDocument,
    InvalidInterest,
    InterestReadTimeNotMet,
    MinimumReadTimeNotMet,
}

impl ValidationReason {
    /// Stable machine-readable code, surfaced to API clients.
    pub fn code(self) -> &'static str {
        match self {
            ValidationReason::MalformedDocument => "MALFORMED_DOCUMENT",
            ValidationReason::InvalidInterest => "INVALID_INTEREST",
            ValidationReason::InterestReadTimeNotMet => "INTEREST_READ_TIME_NOT_MET",
            ValidationReason::MinimumReadTimeNotMet => "MINIMUM_READ_TIME_NOT_MET",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validator failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The draft breaks a content or admission rule.
    #[error("{reason}: {detail}")]
    Rejected {
        reason: ValidationReason,
        detail: String,
    },

    /// The interest catalog could not be consulted.
    #[error("Interest catalog unavailable: {0}")]
    Catalog(#[from] RepoError),
}

impl ValidationError {
    pub(crate) fn rejected(reason: ValidationReason, detail: impl Into<String>) -> Self {
        ValidationError::Rejected {
            reason,
            detail: detail.into(),
        }
    }

    /// The rejection reason, if this is a rule violation.
    pub fn reason(&self) -> Option<ValidationReason> {
        match self {
            ValidationError::Rejected { reason, .. } => Some(*reason),
            ValidationError::Catalog(_) => None,
        }
    }
}

/// Failures of the draft-to-post transition.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Draft {draft_id} not found")]
    DraftNotFound { draft_id: String },

    #[error("Draft validation failed: {reason}: {detail}")]
    Validation {
        reason: ValidationReason,
        detail: String,
    },

    #[error("Draft {draft_id} is already published")]
    AlreadyPublished { draft_id: String },

    #[error("Post {post_id} already exists")]
    Conflict { post_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for PublishError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Rejected { reason, detail } => {
                PublishError::Validation { reason, detail }
            }
            ValidationError::Catalog(cause) => PublishError::Internal(cause.to_string()),
        }
    }
}
