use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::domain::company::{CompanyData, CompanyPatch};
use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::types::CompanyId;
use crate::forms::companies::{CreateCompanyForm, UpdateCompanyForm};
use crate::repository::DieselRepository;
use crate::routes::{
    error_response, parse_path_id, respond, respond_created, respond_ok, respond_page,
};
use crate::services::{ServiceError, companies};

#[post("/companies")]
pub async fn create_company(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCompanyForm>,
) -> impl Responder {
    let result = CompanyData::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|data| companies::create_company(repo.get_ref(), data));

    respond(result, |company| {
        respond_created(format!("/companies/{}", company.id), company)
    })
}

#[get("/companies")]
pub async fn list_companies(
    repo: web::Data<DieselRepository>,
    defaults: web::Data<PageDefaults>,
    params: web::Query<ListParams>,
) -> impl Responder {
    respond(
        companies::list_companies(repo.get_ref(), &params, **defaults),
        respond_page,
    )
}

#[get("/companies/{id}")]
pub async fn get_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<CompanyId>(&id)
        .and_then(|id| companies::get_company(repo.get_ref(), id));
    respond(result, respond_ok)
}

#[patch("/companies/{id}")]
pub async fn update_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<UpdateCompanyForm>,
) -> impl Responder {
    let id = match parse_path_id::<CompanyId>(&id) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let result = CompanyPatch::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|patch| companies::update_company(repo.get_ref(), id, &patch));
    respond(result, respond_ok)
}

#[delete("/companies/{id}")]
pub async fn delete_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<CompanyId>(&id)
        .and_then(|id| companies::delete_company(repo.get_ref(), id));
    respond(result, |()| HttpResponse::NoContent().finish())
}
