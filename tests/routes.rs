use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use zentrix_crm::domain::filter::PageDefaults;
use zentrix_crm::routes::{configure, json_config};

mod common;

macro_rules! app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(json_config(1024 * 1024))
                .app_data(web::Data::new($test_db.repo()))
                .app_data(web::Data::new(PageDefaults::default()))
                .configure(configure),
        )
        .await
    };
}

struct Seeded {
    owner: String,
    company: String,
    contact: String,
}

fn seed(test_db: &common::TestDb) -> Seeded {
    let repo = test_db.repo();
    let owner = common::seed_user(&repo, "owner@example.com");
    let company = common::seed_company(&repo, owner, "Acme");
    let contact = common::seed_contact(&repo, company, "maria@acme.example");
    Seeded {
        owner: owner.to_string(),
        company: company.to_string(),
        contact: contact.to_string(),
    }
}

fn quote_body(seeded: &Seeded, products: Value) -> Value {
    json!({
        "name": "Q-1",
        "company_id": seeded.company,
        "sales_tax": 12,
        "stage": "draft",
        "notes": "",
        "prepared_by": seeded.owner,
        "prepared_for": seeded.contact,
        "products": products,
    })
}

#[actix_web::test]
async fn healthcheck_reports_version() {
    let test_db = common::TestDb::new("healthcheck_reports_version.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/healthcheck").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "available");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn create_company_returns_location() {
    let test_db = common::TestDb::new("create_company_returns_location.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({
            "name": "Globex",
            "address": "2 Street",
            "sales_owner": seeded.owner,
            "email": "HQ@Globex.example",
            "company_size": "500+",
            "industry": "Energy",
            "business_type": "B2B",
            "country": "US"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "hq@globex.example");
    assert_eq!(location, format!("/companies/{}", body["data"]["id"].as_str().unwrap()));
}

#[actix_web::test]
async fn unknown_body_key_is_a_bad_request() {
    let test_db = common::TestDb::new("unknown_body_key_is_a_bad_request.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({ "name": "Globex", "tier": "gold" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let test_db = common::TestDb::new("malformed_json_is_a_bad_request.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/quotes")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_company_is_not_found() {
    let test_db = common::TestDb::new("missing_company_is_not_found.db");
    let mut seeded = seed(&test_db);
    seeded.company = zentrix_crm::domain::types::CompanyId::new().to_string();
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(quote_body(&seeded, json!([])))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "related_not_found");
    assert_eq!(body["error"], "company not found");
}

#[actix_web::test]
async fn invalid_line_item_is_reported_by_index() {
    let test_db = common::TestDb::new("invalid_line_item_is_reported_by_index.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let products = json!([
        { "title": "Pump", "unit_price": 100, "quantity": 1, "discount": 0 },
        { "title": "Valve", "unit_price": 0, "quantity": 1, "discount": 0 }
    ]);
    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(quote_body(&seeded, products))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["products[1].unit_price"].is_string());

    let req = test::TestRequest::get().uri("/quotes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["metadata"]["total_records"], 0);
}

#[actix_web::test]
async fn created_quote_lists_products_in_order() {
    let test_db = common::TestDb::new("created_quote_lists_products_in_order.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let products = json!([
        { "title": "Pump", "unit_price": 100, "quantity": 1, "discount": 0 },
        { "title": "Valve", "unit_price": 20, "quantity": 3, "discount": 5 }
    ]);
    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(quote_body(&seeded, products))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/quotes/{id}/products"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"][0]["title"], "Pump");
    assert_eq!(body["data"][1]["title"], "Valve");
}

#[actix_web::test]
async fn list_rejects_unsafe_sort() {
    let test_db = common::TestDb::new("list_rejects_unsafe_sort.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/companies?sort=password&page=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["sort"], "invalid sort value");
    assert_eq!(body["error"]["page"], "must be a number value");
}

#[actix_web::test]
async fn empty_patch_is_rejected() {
    let test_db = common::TestDb::new("empty_patch_is_rejected.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let req = test::TestRequest::patch()
        .uri(&format!("/companies/{}", seeded.company))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["body"], "body must not be empty");
}

#[actix_web::test]
async fn malformed_path_id_is_not_found() {
    let test_db = common::TestDb::new("malformed_path_id_is_not_found.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/contacts/42").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_contact_is_gone() {
    let test_db = common::TestDb::new("deleted_contact_is_gone.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let uri = format!("/contacts/{}", seeded.contact);
    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn oversized_amounts_are_field_errors() {
    let test_db = common::TestDb::new("oversized_amounts_are_field_errors.db");
    let seeded = seed(&test_db);
    let app = app!(test_db);

    let products = json!([
        { "title": "Pump", "unit_price": 3000000000i64, "quantity": 1, "discount": 0 }
    ]);
    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(quote_body(&seeded, products))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "validation_failed");
    assert_eq!(
        body["error"]["products[0].unit_price"],
        "unit_price must be greater than zero and less than 10,000,000"
    );

    let mut body = quote_body(&seeded, json!([]));
    body["sales_tax"] = json!(5000000000i64);
    let req = test::TestRequest::post()
        .uri("/quotes")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["sales_tax"], "sales_tax is out of range");

    let req = test::TestRequest::get().uri("/quotes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["metadata"]["total_records"], 0);
}
