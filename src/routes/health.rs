use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/healthcheck")]
pub async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "available",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
