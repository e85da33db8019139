use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::contact::{ContactData, ContactPatch};
use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::types::{CompanyId, ContactId};
use crate::domain::validation::FieldErrors;
use crate::forms::contacts::{CreateContactForm, UpdateContactForm};
use crate::repository::DieselRepository;
use crate::routes::{
    error_response, parse_path_id, respond, respond_created, respond_ok, respond_page,
};
use crate::services::{ServiceError, contacts};

/// Optional `?company_id=` restriction shared by contact and quote lists.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyFilter {
    pub company_id: Option<String>,
}

impl CompanyFilter {
    pub fn parse(&self) -> Result<Option<CompanyId>, ServiceError> {
        match self.company_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                ServiceError::Validation(FieldErrors::single(
                    "company_id",
                    "company_id must be a valid id",
                ))
            }),
        }
    }
}

#[post("/contacts")]
pub async fn create_contact(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateContactForm>,
) -> impl Responder {
    let result = ContactData::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|data| contacts::create_contact(repo.get_ref(), data));

    respond(result, |contact| {
        respond_created(format!("/contacts/{}", contact.id), contact)
    })
}

#[get("/contacts")]
pub async fn list_contacts(
    repo: web::Data<DieselRepository>,
    defaults: web::Data<PageDefaults>,
    params: web::Query<ListParams>,
    filter: web::Query<CompanyFilter>,
) -> impl Responder {
    let result = filter
        .parse()
        .and_then(|company_id| contacts::list_contacts(repo.get_ref(), &params, **defaults, company_id));
    respond(result, respond_page)
}

#[get("/contacts/{id}")]
pub async fn get_contact(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<ContactId>(&id)
        .and_then(|id| contacts::get_contact(repo.get_ref(), id));
    respond(result, respond_ok)
}

#[patch("/contacts/{id}")]
pub async fn update_contact(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<UpdateContactForm>,
) -> impl Responder {
    let id = match parse_path_id::<ContactId>(&id) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let result = ContactPatch::try_from(form)
        .map_err(ServiceError::from)
        .and_then(|patch| contacts::update_contact(repo.get_ref(), id, &patch));
    respond(result, respond_ok)
}

#[delete("/contacts/{id}")]
pub async fn delete_contact(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> impl Responder {
    let result = parse_path_id::<ContactId>(&id)
        .and_then(|id| contacts::delete_contact(repo.get_ref(), id));
    respond(result, |()| HttpResponse::NoContent().finish())
}
