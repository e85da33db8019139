//! Diesel models for contacts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{Contact as DomainContact, ContactData};
use crate::domain::types::{CompanyId, ContactId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Contact {
    pub id: Vec<u8>,
    pub name: String,
    pub email: String,
    pub company_id: Vec<u8>,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct NewContact<'a> {
    pub id: &'a [u8],
    pub name: &'a str,
    pub email: &'a str,
    pub company_id: &'a [u8],
    pub title: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
pub struct UpdateContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub company_id: &'a [u8],
    pub title: &'a str,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewContact<'a> {
    pub fn new(id: &'a ContactId, data: &'a ContactData, now: NaiveDateTime) -> Self {
        Self {
            id: id.as_bytes(),
            name: &data.name,
            email: &data.email,
            company_id: data.company_id.as_bytes(),
            title: &data.title,
            status: &data.status,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateContact<'a> {
    pub fn new(data: &'a ContactData, now: NaiveDateTime) -> Self {
        Self {
            name: &data.name,
            email: &data.email,
            company_id: data.company_id.as_bytes(),
            title: &data.title,
            status: &data.status,
            updated_at: now,
        }
    }
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::from_bytes(&contact.id)?,
            data: ContactData {
                name: contact.name,
                email: contact.email,
                company_id: CompanyId::from_bytes(&contact.company_id)?,
                title: contact.title,
                status: contact.status,
            },
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            deleted_at: contact.deleted_at,
        })
    }
}
