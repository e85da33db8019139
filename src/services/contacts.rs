//! Contact use cases.

use validator::Validate;

use crate::domain::contact::{Contact, ContactData, ContactPatch, ContactSort, ContactSummary};
use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::patch::Reference;
use crate::domain::types::{CompanyId, ContactId};
use crate::pagination::Page;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, ReferenceReader};
use crate::services::list::list;
use crate::services::patch::{apply_patch, ensure_not_empty, ensure_references};
use crate::services::{ServiceError, ServiceResult};

/// Validates and stores a new contact of a live company.
pub fn create_contact<R>(repo: &R, data: ContactData) -> ServiceResult<Contact>
where
    R: ContactWriter + ReferenceReader + ?Sized,
{
    data.validate()?;
    ensure_references(repo, &[Reference::Company(data.company_id)])?;

    let contact = repo.create_contact(&data)?;
    log::info!("Created contact {}", contact.id);
    Ok(contact)
}

pub fn get_contact<R>(repo: &R, id: ContactId) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Lists contacts, optionally restricted to one company.
pub fn list_contacts<R>(
    repo: &R,
    params: &ListParams,
    defaults: PageDefaults,
    company_id: Option<CompanyId>,
) -> ServiceResult<Page<ContactSummary>>
where
    R: ContactReader + ?Sized,
{
    list::<ContactSort, _, _>(params, defaults, |filter| {
        let query = ContactListQuery::new(filter);
        let query = match company_id {
            Some(company_id) => query.company_id(company_id),
            None => query,
        };
        repo.list_contacts(&query)
    })
}

pub fn update_contact<R>(repo: &R, id: ContactId, patch: &ContactPatch) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + ReferenceReader + ?Sized,
{
    ensure_not_empty(patch)?;

    let existing = get_contact(repo, id)?;
    let merged = apply_patch(repo, &existing.data, patch)?;

    let contact = repo.update_contact(id, &merged)?;
    log::info!("Updated contact {id}");
    Ok(contact)
}

/// Marks the contact as deleted.
pub fn delete_contact<R>(repo: &R, id: ContactId) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    repo.delete_contact(id)?;
    log::info!("Deleted contact {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patch::ReferenceField;
    use crate::repository::test::TestRepository;
    use crate::services::companies::delete_company;

    fn data(company_id: CompanyId, email: &str) -> ContactData {
        ContactData {
            name: "Jon Cruz".to_string(),
            email: email.to_string(),
            company_id,
            title: "CTO".to_string(),
            status: "lead".to_string(),
        }
    }

    #[test]
    fn create_rejects_soft_deleted_company() {
        let repo = TestRepository::new();
        let owner = repo.seed_user();
        let company = repo.seed_company(owner);
        delete_company(&repo, company).unwrap();

        let err = create_contact(&repo, data(company, "jon@acme.io")).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::RelatedNotFound(ReferenceField::Company)
        ));
    }

    #[test]
    fn moving_to_a_deleted_company_is_rejected() {
        let repo = TestRepository::new();
        let owner = repo.seed_user();
        let company = repo.seed_company(owner);
        let other = repo.seed_company(owner);
        let contact = create_contact(&repo, data(company, "jon@acme.io")).unwrap();
        delete_company(&repo, other).unwrap();

        let patch = ContactPatch {
            company_id: Some(other),
            ..ContactPatch::default()
        };
        let err = update_contact(&repo, contact.id, &patch).unwrap_err();
        assert_eq!(err.kind(), "related_not_found");
        assert_eq!(get_contact(&repo, contact.id).unwrap().data.company_id, company);
    }

    #[test]
    fn update_to_taken_email_is_a_conflict() {
        let repo = TestRepository::new();
        let owner = repo.seed_user();
        let company = repo.seed_company(owner);
        create_contact(&repo, data(company, "jon@acme.io")).unwrap();
        let second = create_contact(&repo, data(company, "ana@acme.io")).unwrap();

        let patch = ContactPatch {
            email: Some("jon@acme.io".to_string()),
            ..ContactPatch::default()
        };
        let err = update_contact(&repo, second.id, &patch).unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(ref field) if field == "email"));
    }

    #[test]
    fn list_filters_by_company() {
        let repo = TestRepository::new();
        let owner = repo.seed_user();
        let first = repo.seed_company(owner);
        let second = repo.seed_company(owner);
        repo.seed_contact(first);
        repo.seed_contact(second);
        repo.seed_contact(second);

        let page = list_contacts(
            &repo,
            &ListParams::default(),
            PageDefaults::default(),
            Some(second),
        )
        .unwrap();
        assert_eq!(page.metadata.total_records, 2);
        assert!(page.data.iter().all(|c| c.contact.data.company_id == second));
    }

    #[test]
    fn empty_patch_issues_no_storage_call() {
        let repo = TestRepository::new();
        let err = update_contact(&repo, ContactId::new(), &ContactPatch::default()).unwrap_err();
        assert_eq!(err.kind(), "validation_failed");
        assert_eq!(repo.calls(), 0);
    }
}
