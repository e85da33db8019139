//! Diesel models for companies.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{Company as DomainCompany, CompanyData};
use crate::domain::types::{CompanyId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: Vec<u8>,
    pub name: String,
    pub address: String,
    pub sales_owner: Vec<u8>,
    pub email: String,
    pub company_size: String,
    pub industry: String,
    pub business_type: String,
    pub country: String,
    pub image: Option<String>,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub id: &'a [u8],
    pub name: &'a str,
    pub address: &'a str,
    pub sales_owner: &'a [u8],
    pub email: &'a str,
    pub company_size: &'a str,
    pub industry: &'a str,
    pub business_type: &'a str,
    pub country: &'a str,
    pub image: Option<&'a str>,
    pub website: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies, treat_none_as_null = true)]
/// Full overwrite of a company's mutable columns.
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub sales_owner: &'a [u8],
    pub email: &'a str,
    pub company_size: &'a str,
    pub industry: &'a str,
    pub business_type: &'a str,
    pub country: &'a str,
    pub image: Option<&'a str>,
    pub website: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewCompany<'a> {
    pub fn new(id: &'a CompanyId, data: &'a CompanyData, now: NaiveDateTime) -> Self {
        Self {
            id: id.as_bytes(),
            name: &data.name,
            address: &data.address,
            sales_owner: data.sales_owner.as_bytes(),
            email: &data.email,
            company_size: &data.company_size,
            industry: &data.industry,
            business_type: &data.business_type,
            country: &data.country,
            image: data.image.as_deref(),
            website: data.website.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateCompany<'a> {
    pub fn new(data: &'a CompanyData, now: NaiveDateTime) -> Self {
        Self {
            name: &data.name,
            address: &data.address,
            sales_owner: data.sales_owner.as_bytes(),
            email: &data.email,
            company_size: &data.company_size,
            industry: &data.industry,
            business_type: &data.business_type,
            country: &data.country,
            image: data.image.as_deref(),
            website: data.website.as_deref(),
            updated_at: now,
        }
    }
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::from_bytes(&company.id)?,
            data: CompanyData {
                name: company.name,
                address: company.address,
                sales_owner: UserId::from_bytes(&company.sales_owner)?,
                email: company.email,
                company_size: company.company_size,
                industry: company.industry,
                business_type: company.business_type,
                country: company.country,
                image: company.image,
                website: company.website,
            },
            created_at: company.created_at,
            updated_at: company.updated_at,
            deleted_at: company.deleted_at,
        })
    }
}
