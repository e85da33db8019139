//! Typed failures returned by every service operation.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::patch::ReferenceField;
use crate::domain::validation::FieldErrors;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// One message per offending field; user-correctable.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// A referenced aggregate does not exist or is soft-deleted.
    #[error("{0} not found")]
    RelatedNotFound(ReferenceField),

    #[error("duplicate value for {0}")]
    Duplicate(String),

    #[error("record not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Stable identifier of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_failed",
            ServiceError::RelatedNotFound(_) => "related_not_found",
            ServiceError::Duplicate(_) => "duplicate_conflict",
            ServiceError::NotFound => "not_found",
            ServiceError::StorageUnavailable(_) => "storage_unavailable",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Field-scoped messages for failures the caller can correct.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors.clone()),
            ServiceError::Duplicate(field) => Some(FieldErrors::single(
                field.clone(),
                format!("a record with this {field} already exists"),
            )),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Duplicate(field) => ServiceError::Duplicate(field),
            RepositoryError::ConnectionError(message) => {
                log::error!("Storage unavailable: {message}");
                ServiceError::StorageUnavailable(message)
            }
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::Internal(other.to_string())
            }
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors.into())
    }
}
