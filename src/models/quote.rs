//! Diesel models for quotes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::quote::{Quote as DomainQuote, QuoteData};
use crate::domain::types::{CompanyId, ContactId, QuoteId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Quote {
    pub id: Vec<u8>,
    pub name: String,
    pub company_id: Vec<u8>,
    pub sales_tax: i32,
    pub stage: String,
    pub notes: String,
    pub prepared_by: Vec<u8>,
    pub prepared_for: Vec<u8>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotes)]
pub struct NewQuote<'a> {
    pub id: &'a [u8],
    pub name: &'a str,
    pub company_id: &'a [u8],
    pub sales_tax: i32,
    pub stage: &'a str,
    pub notes: &'a str,
    pub prepared_by: &'a [u8],
    pub prepared_for: &'a [u8],
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
pub struct UpdateQuote<'a> {
    pub name: &'a str,
    pub company_id: &'a [u8],
    pub sales_tax: i32,
    pub stage: &'a str,
    pub notes: &'a str,
    pub prepared_by: &'a [u8],
    pub prepared_for: &'a [u8],
    pub updated_at: NaiveDateTime,
}

impl<'a> NewQuote<'a> {
    pub fn new(id: &'a QuoteId, data: &'a QuoteData, now: NaiveDateTime) -> Self {
        Self {
            id: id.as_bytes(),
            name: &data.name,
            company_id: data.company_id.as_bytes(),
            sales_tax: data.sales_tax,
            stage: &data.stage,
            notes: &data.notes,
            prepared_by: data.prepared_by.as_bytes(),
            prepared_for: data.prepared_for.as_bytes(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateQuote<'a> {
    pub fn new(data: &'a QuoteData, now: NaiveDateTime) -> Self {
        Self {
            name: &data.name,
            company_id: data.company_id.as_bytes(),
            sales_tax: data.sales_tax,
            stage: &data.stage,
            notes: &data.notes,
            prepared_by: data.prepared_by.as_bytes(),
            prepared_for: data.prepared_for.as_bytes(),
            updated_at: now,
        }
    }
}

impl TryFrom<Quote> for DomainQuote {
    type Error = TypeConstraintError;

    fn try_from(quote: Quote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuoteId::from_bytes(&quote.id)?,
            data: QuoteData {
                name: quote.name,
                company_id: CompanyId::from_bytes(&quote.company_id)?,
                sales_tax: quote.sales_tax,
                stage: quote.stage,
                notes: quote.notes,
                prepared_by: UserId::from_bytes(&quote.prepared_by)?,
                prepared_for: ContactId::from_bytes(&quote.prepared_for)?,
            },
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        })
    }
}
