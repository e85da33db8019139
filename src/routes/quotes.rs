use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::quote::QuotePatch;
use crate::domain::types::QuoteId;
use crate::forms::quotes::{CreateQuoteForm, UpdateQuoteForm};
use crate::repository::DieselRepository;
use crate::routes::contacts::CompanyFilter;
use crate::routes::{
    error_response, parse_path_id, respond, respond_created, respond_ok, respond_page,
};
use crate::services::{ServiceError, products, quotes};

#[post("/quotes")]
pub async fn create_quote(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateQuoteForm>,
) -> impl Responder {
    let result = form
        .into_parts()
        .map_err(ServiceError::from)
        .and_then(|(quote, items)| {
            quotes::create_quote_with_products(repo.get_ref(), quote, items)
        });

    respond(result, |created| {
        respond_created(format!("/quotes/{}", created.quote.id), created)
    })
}

#[get("/quotes")]
pub async fn list_quotes(
    repo: web::Data<DieselRepository>,
    defaults: web::Data<PageDefaults>,
    params: web::Query<ListParams>,
    filter: web::Query<CompanyFilter>,
) -> impl Responder {
    let result = filter
        .parse()
        .and_then(|company_id| quotes::list_quotes(repo.get_ref(), &params, **defaults, company_id));
    respond(result, respond_page)
}

#[get("/quotes/{id}")]
pub async fn get_quote(repo: web::Data<DieselRepository>, id: web::Path<String>) -> impl Responder {
    let result =
        parse_path_id::<QuoteId>(&id).and_then(|id| quotes::get_quote(repo.get_ref(), id));
    respond(result, respond_ok)
}

#[patch("/quotes/{id}")]
pub async fn update_quote(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<UpdateQuoteForm>,
) -> impl Responder {
    let id = match parse_path_id::<QuoteId>(&id) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let result = QuotePatch::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|patch| quotes::update_quote(repo.get_ref(), id, &patch));
    respond(result, respond_ok)
}

#[delete("/quotes/{id}")]
pub async fn delete_quote(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result =
        parse_path_id::<QuoteId>(&id).and_then(|id| quotes::delete_quote(repo.get_ref(), id));
    respond(result, |()| HttpResponse::NoContent().finish())
}

#[get("/quotes/{id}/products")]
pub async fn list_quote_products(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<QuoteId>(&id)
        .and_then(|id| products::list_quote_products(repo.get_ref(), id));
    respond(result, respond_ok)
}
