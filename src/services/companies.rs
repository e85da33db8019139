//! Company use cases.

use validator::Validate;

use crate::domain::company::{Company, CompanyData, CompanyPatch, CompanySort, CompanySummary};
use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::patch::Reference;
use crate::domain::types::CompanyId;
use crate::pagination::Page;
use crate::repository::{CompanyListQuery, CompanyReader, CompanyWriter, ReferenceReader};
use crate::services::list::list;
use crate::services::patch::{apply_patch, ensure_not_empty, ensure_references};
use crate::services::{ServiceError, ServiceResult};

/// Validates and stores a new company owned by an existing user.
pub fn create_company<R>(repo: &R, data: CompanyData) -> ServiceResult<Company>
where
    R: CompanyWriter + ReferenceReader + ?Sized,
{
    data.validate()?;
    ensure_references(repo, &[Reference::SalesOwner(data.sales_owner)])?;

    let company = repo.create_company(&data)?;
    log::info!("Created company {}", company.id);
    Ok(company)
}

pub fn get_company<R>(repo: &R, id: CompanyId) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    repo.get_company_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn list_companies<R>(
    repo: &R,
    params: &ListParams,
    defaults: PageDefaults,
) -> ServiceResult<Page<CompanySummary>>
where
    R: CompanyReader + ?Sized,
{
    list::<CompanySort, _, _>(params, defaults, |filter| {
        repo.list_companies(&CompanyListQuery::new(filter))
    })
}

/// Applies a sparse update; a new sales owner must exist.
pub fn update_company<R>(repo: &R, id: CompanyId, patch: &CompanyPatch) -> ServiceResult<Company>
where
    R: CompanyReader + CompanyWriter + ReferenceReader + ?Sized,
{
    ensure_not_empty(patch)?;

    let existing = get_company(repo, id)?;
    let merged = apply_patch(repo, &existing.data, patch)?;

    let company = repo.update_company(id, &merged)?;
    log::info!("Updated company {id}");
    Ok(company)
}

/// Marks the company as deleted.
pub fn delete_company<R>(repo: &R, id: CompanyId) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    repo.delete_company(id)?;
    log::info!("Deleted company {id}");
    Ok(())
}
