//! JSON API handlers.
//!
//! Handlers are thin: decode the body or query, call one service function,
//! and wrap the outcome in an envelope. Services run synchronously inside the
//! handler, so once a workflow starts it runs to completion even if the client
//! goes away.

use std::str::FromStr;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::pagination::Page;
use crate::services::ServiceError;

pub mod companies;
pub mod contacts;
pub mod health;
pub mod products;
pub mod quotes;

const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

#[derive(Serialize)]
struct DataEnvelope<T> {
    data: T,
}

/// `200 OK` with `{"data": ..}`.
pub fn respond_ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(DataEnvelope { data })
}

/// `201 Created` pointing at the new resource.
pub fn respond_created<T: Serialize>(location: String, data: T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((LOCATION, location))
        .json(DataEnvelope { data })
}

/// `200 OK` with `{"data": [..], "metadata": {..}}`.
pub fn respond_page<T: Serialize>(page: Page<T>) -> HttpResponse {
    HttpResponse::Ok().json(page)
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) | ServiceError::Duplicate(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::RelatedNotFound(_) | ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a service failure as `{"error": .., "kind": ..}`.
///
/// Field-scoped failures carry a field to message object; storage and
/// internal failures never leak their details to the client.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let error = match err {
        ServiceError::Validation(_) | ServiceError::Duplicate(_) => {
            json!(err.field_errors().unwrap_or_default())
        }
        ServiceError::RelatedNotFound(field) => json!(format!("{field} not found")),
        ServiceError::NotFound => json!("the requested resource could not be found"),
        ServiceError::StorageUnavailable(_) => {
            json!("the storage backend is temporarily unavailable")
        }
        ServiceError::Internal(_) => json!(SERVER_ERROR_MESSAGE),
    };

    HttpResponse::build(status_for(err)).json(json!({
        "error": error,
        "kind": err.kind(),
    }))
}

/// Collapses a service outcome into a response.
pub fn respond<T>(
    result: Result<T, ServiceError>,
    on_success: impl FnOnce(T) -> HttpResponse,
) -> HttpResponse {
    match result {
        Ok(value) => on_success(value),
        Err(err) => error_response(&err),
    }
}

/// Parses an id taken from the path. An unparseable id names no resource.
pub fn parse_path_id<T: FromStr>(raw: &str) -> Result<T, ServiceError> {
    raw.parse().map_err(|_| ServiceError::NotFound)
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "error": message,
        "kind": "bad_request",
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("body must not be larger than {limit} bytes")
        }
        JsonPayloadError::ContentType => "body must be JSON".to_string(),
        JsonPayloadError::Deserialize(inner) if inner.is_data() => {
            format!("body contains invalid data: {inner}")
        }
        JsonPayloadError::Deserialize(inner) if inner.is_eof() => {
            "body must not be empty".to_string()
        }
        JsonPayloadError::Deserialize(_) => "body contains badly formed JSON".to_string(),
        other => other.to_string(),
    };
    log::info!("Rejected request body: {err}");
    InternalError::from_response(err, bad_request(message)).into()
}

/// JSON extractor settings shared by every handler.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// Registers every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::healthcheck)
        .service(companies::create_company)
        .service(companies::list_companies)
        .service(companies::get_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(contacts::create_contact)
        .service(contacts::list_contacts)
        .service(contacts::get_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(quotes::create_quote)
        .service(quotes::list_quotes)
        .service(quotes::get_quote)
        .service(quotes::update_quote)
        .service(quotes::delete_quote)
        .service(quotes::list_quote_products)
        .service(products::update_product)
        .service(products::delete_product);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patch::ReferenceField;
    use crate::domain::validation::FieldErrors;

    #[test]
    fn maps_every_kind_to_a_status() {
        let cases = [
            (
                ServiceError::Validation(FieldErrors::single("name", "name is required")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::Duplicate("email".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::RelatedNotFound(ReferenceField::Company),
                StatusCode::NOT_FOUND,
            ),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ServiceError::StorageUnavailable("timed out".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ServiceError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status, "{}", err.kind());
        }
    }

    #[test]
    fn malformed_path_id_is_not_found() {
        let parsed: Result<crate::domain::types::QuoteId, _> = parse_path_id("abc");
        assert!(matches!(parsed, Err(ServiceError::NotFound)));
    }
}
