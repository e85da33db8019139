//! Merge-patch engine for partial updates.

use validator::Validate;

use crate::domain::patch::{MergePatch, Merged, Patch, Reference};
use crate::domain::validation::FieldErrors;
use crate::repository::ReferenceReader;
use crate::services::{ServiceError, ServiceResult};

/// Rejects a patch that carries no field at all.
pub fn ensure_not_empty<P: Patch>(patch: &P) -> ServiceResult<()> {
    if patch.is_empty() {
        return Err(ServiceError::Validation(FieldErrors::single(
            "body",
            "body must not be empty",
        )));
    }
    Ok(())
}

/// Confirms each reference resolves to a live aggregate, in order.
///
/// Stops at the first missing reference.
pub fn ensure_references<R>(repo: &R, references: &[Reference]) -> ServiceResult<()>
where
    R: ReferenceReader + ?Sized,
{
    for reference in references {
        if !repo.reference_exists(reference)? {
            log::info!("Rejected write: {} {:?} not found", reference.field(), reference);
            return Err(ServiceError::RelatedNotFound(reference.field()));
        }
    }
    Ok(())
}

/// Merges `patch` into `existing` and returns the value to persist.
///
/// The merged value must pass the same validation as a new aggregate, and
/// every foreign key carried by the patch must resolve before the caller
/// writes anything.
pub fn apply_patch<R, T, P>(repo: &R, existing: &T, patch: &P) -> ServiceResult<T>
where
    R: ReferenceReader + ?Sized,
    T: MergePatch<P> + Validate,
    P: Patch,
{
    ensure_not_empty(patch)?;

    let Merged { value, references } = existing.merge(patch);
    value.validate()?;
    ensure_references(repo, &references)?;

    Ok(value)
}
