//! Error conversion glue between the domain and repository layers.
//!
//! The domain layer must not depend on repository error types, but row
//! conversions at the storage boundary produce domain errors that need to
//! travel through `RepositoryResult`.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
