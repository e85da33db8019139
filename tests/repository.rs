use std::collections::HashSet;

use zentrix_crm::domain::company::CompanyPatch;
use zentrix_crm::domain::filter::{ListParams, PageDefaults};
use zentrix_crm::domain::patch::ReferenceField;
use zentrix_crm::domain::product::ProductData;
use zentrix_crm::domain::quote::QuoteData;
use zentrix_crm::domain::types::{CompanyId, ContactId, UserId};
use zentrix_crm::repository::errors::RepositoryError;
use zentrix_crm::repository::{CompanyWriter, ProductReader, QuoteReader};
use zentrix_crm::services::{ServiceError, companies, contacts, quotes};

mod common;

fn item(title: &str, unit_price: i32) -> ProductData {
    ProductData {
        title: title.to_string(),
        unit_price,
        quantity: 1,
        discount: 0,
    }
}

fn quote(company_id: CompanyId, prepared_by: UserId, prepared_for: ContactId) -> QuoteData {
    QuoteData {
        name: "Q-2024-001".to_string(),
        company_id,
        sales_tax: 12,
        stage: "draft".to_string(),
        notes: String::new(),
        prepared_by,
        prepared_for,
    }
}

#[test]
fn test_company_list_pages_and_sorts() {
    let test_db = common::TestDb::new("test_company_list_pages_and_sorts.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    for name in ["Echo", "Alpha", "Delta", "Bravo", "Charlie"] {
        common::seed_company(&repo, owner, name);
    }

    let params = ListParams::default().page(2).page_size(2).sort("name");
    let page = companies::list_companies(&repo, &params, PageDefaults::default()).unwrap();

    let names: Vec<_> = page
        .data
        .iter()
        .map(|row| row.company.data.name.as_str())
        .collect();
    assert_eq!(names, ["Charlie", "Delta"]);
    assert_eq!(page.metadata.total_records, 5);
    assert_eq!(page.metadata.current_page, 2);
    assert_eq!(page.metadata.last_page, 3);
    assert_eq!(page.data[0].sales_owner_name, "Ana Reyes");

    let params = ListParams::default().sort("-name").page_size(1);
    let page = companies::list_companies(&repo, &params, PageDefaults::default()).unwrap();
    assert_eq!(page.data[0].company.data.name, "Echo");
}

#[test]
fn test_page_past_the_end_keeps_total() {
    let test_db = common::TestDb::new("test_page_past_the_end_keeps_total.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    for name in ["Alpha", "Bravo", "Charlie"] {
        common::seed_company(&repo, owner, name);
    }

    let params = ListParams::default().page(9).page_size(2);
    let page = companies::list_companies(&repo, &params, PageDefaults::default()).unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.metadata.total_records, 3);
    assert_eq!(page.metadata.last_page, 2);
}

#[test]
fn test_empty_list_has_zeroed_metadata() {
    let test_db = common::TestDb::new("test_empty_list_has_zeroed_metadata.db");
    let repo = test_db.repo();

    let page =
        companies::list_companies(&repo, &ListParams::default(), PageDefaults::default()).unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.metadata.total_records, 0);
    assert_eq!(page.metadata.last_page, 0);
}

#[test]
fn test_unknown_sort_is_rejected() {
    let test_db = common::TestDb::new("test_unknown_sort_is_rejected.db");
    let repo = test_db.repo();

    let params = ListParams::default().sort("sales_owner; DROP TABLE companies");
    let err = companies::list_companies(&repo, &params, PageDefaults::default()).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("sort")));
}

#[test]
fn test_soft_deleted_company_disappears() {
    let test_db = common::TestDb::new("test_soft_deleted_company_disappears.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let kept = common::seed_company(&repo, owner, "Kept");
    let gone = common::seed_company(&repo, owner, "Gone");

    companies::delete_company(&repo, gone).unwrap();

    assert!(matches!(
        companies::get_company(&repo, gone),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        companies::delete_company(&repo, gone),
        Err(ServiceError::NotFound)
    ));
    let page =
        companies::list_companies(&repo, &ListParams::default(), PageDefaults::default()).unwrap();
    assert_eq!(page.metadata.total_records, 1);
    assert_eq!(page.data[0].company.id, kept);

    let err = contacts::create_contact(
        &repo,
        zentrix_crm::domain::contact::ContactData {
            name: "Jon".to_string(),
            email: "jon@example.com".to_string(),
            company_id: gone,
            title: "CTO".to_string(),
            status: "lead".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::RelatedNotFound(ReferenceField::Company)
    ));
}

#[test]
fn test_duplicate_email_is_reported_by_field() {
    let test_db = common::TestDb::new("test_duplicate_email_is_reported_by_field.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let first = common::company_data(owner, "Acme", "hq@acme.example");
    repo.create_company(&first).unwrap();

    let second = common::company_data(owner, "Acme Two", "hq@acme.example");
    let err = repo.create_company(&second).unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(ref field) if field == "email"));

    let err = companies::create_company(&repo, second).unwrap_err();
    assert_eq!(err.kind(), "duplicate_conflict");
}

#[test]
fn test_patch_clears_nullable_column() {
    let test_db = common::TestDb::new("test_patch_clears_nullable_column.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");

    let patch = CompanyPatch {
        website: Some(None),
        industry: Some("Logistics".to_string()),
        ..CompanyPatch::default()
    };
    let updated = companies::update_company(&repo, company, &patch).unwrap();

    assert_eq!(updated.data.website, None);
    assert_eq!(updated.data.industry, "Logistics");
    assert_eq!(companies::get_company(&repo, company).unwrap(), updated);
}

#[test]
fn test_quote_with_products_round_trip() {
    let test_db = common::TestDb::new("test_quote_with_products_round_trip.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");
    let contact = common::seed_contact(&repo, company, "maria@acme.example");

    let items = vec![item("Pump", 1200), item("Valve", 300), item("Hose", 40)];
    let created =
        quotes::create_quote_with_products(&repo, quote(company, owner, contact), items).unwrap();

    let stored = quotes::get_quote(&repo, created.quote.id).unwrap();
    let titles: Vec<_> = stored
        .products
        .iter()
        .map(|p| p.data.title.as_str())
        .collect();
    assert_eq!(titles, ["Pump", "Valve", "Hose"]);

    let page = quotes::list_quotes(
        &repo,
        &ListParams::default(),
        PageDefaults::default(),
        Some(company),
    )
    .unwrap();
    assert_eq!(page.metadata.total_records, 1);
    assert_eq!(page.data[0].company_name, "Acme");
    assert_eq!(page.data[0].prepared_by_name, "Ana Reyes");
    assert_eq!(page.data[0].prepared_for_name, "Maria Santos");
}

#[test]
fn test_invalid_product_leaves_no_quote_behind() {
    let test_db = common::TestDb::new("test_invalid_product_leaves_no_quote_behind.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");
    let contact = common::seed_contact(&repo, company, "maria@acme.example");

    let items = vec![item("Pump", 1200), item("Valve", 0)];
    let err = quotes::create_quote_with_products(&repo, quote(company, owner, contact), items)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("products[1].unit_price")));

    let page =
        quotes::list_quotes(&repo, &ListParams::default(), PageDefaults::default(), None).unwrap();
    assert_eq!(page.metadata.total_records, 0);
}

#[test]
fn test_delete_quote_removes_products() {
    let test_db = common::TestDb::new("test_delete_quote_removes_products.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");
    let contact = common::seed_contact(&repo, company, "maria@acme.example");
    let created = quotes::create_quote_with_products(
        &repo,
        quote(company, owner, contact),
        vec![item("Pump", 10)],
    )
    .unwrap();

    quotes::delete_quote(&repo, created.quote.id).unwrap();

    assert!(repo.get_quote_by_id(created.quote.id).unwrap().is_none());
    assert!(
        repo.get_product_by_id(created.products[0].id)
            .unwrap()
            .is_none()
    );
    assert!(matches!(
        quotes::delete_quote(&repo, created.quote.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn test_contact_pages_are_stable_over_equal_names() {
    let test_db = common::TestDb::new("test_contact_pages_are_stable_over_equal_names.db");
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");
    let other = common::seed_company(&repo, owner, "Globex");
    common::seed_contact(&repo, other, "outsider@globex.example");

    let mut seeded = HashSet::new();
    for index in 0..5 {
        let email = format!("buyer{index}@acme.example");
        seeded.insert(common::seed_contact(&repo, company, &email));
    }

    let mut seen = HashSet::new();
    for page in 1..=5 {
        let params = ListParams::default().sort("name").page_size(1).page(page);
        let result =
            contacts::list_contacts(&repo, &params, PageDefaults::default(), Some(company))
                .unwrap();

        assert_eq!(result.metadata.total_records, 5);
        assert_eq!(result.metadata.last_page, 5);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].company_name, "Acme");
        assert!(seen.insert(result.data[0].contact.id), "page {page} repeated a row");
    }
    assert_eq!(seen, seeded);

    let params = ListParams::default().sort("name").page_size(1).page(6);
    let past_end =
        contacts::list_contacts(&repo, &params, PageDefaults::default(), Some(company)).unwrap();
    assert!(past_end.data.is_empty());
    assert_eq!(past_end.metadata.total_records, 5);
}
