use actix_web::{HttpResponse, Responder, delete, patch, web};

use crate::domain::product::ProductPatch;
use crate::domain::types::ProductId;
use crate::forms::products::UpdateProductForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_path_id, respond, respond_ok};
use crate::services::{ServiceError, products};

#[patch("/products/{id}")]
pub async fn update_product(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<UpdateProductForm>,
) -> impl Responder {
    let id = match parse_path_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let result = ProductPatch::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|patch| products::update_product(repo.get_ref(), id, &patch));
    respond(result, respond_ok)
}

#[delete("/products/{id}")]
pub async fn delete_product(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<ProductId>(&id)
        .and_then(|id| products::delete_product(repo.get_ref(), id));
    respond(result, |()| HttpResponse::NoContent().finish())
}
