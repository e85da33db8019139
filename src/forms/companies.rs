use serde::Deserialize;

use crate::domain::company::{CompanyData, CompanyPatch};
use crate::domain::patch::present;
use crate::domain::types::UserId;
use crate::domain::validation::FieldErrors;
use crate::forms::{normalize_email, parse_id, parse_optional_id};

/// Body of `POST /companies`. Missing text fields fail validation as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateCompanyForm {
    pub name: String,
    pub address: String,
    pub sales_owner: String,
    pub email: String,
    pub company_size: String,
    pub industry: String,
    pub business_type: String,
    pub country: String,
    pub image: Option<String>,
    pub website: Option<String>,
}

impl TryFrom<CreateCompanyForm> for CompanyData {
    type Error = FieldErrors;

    fn try_from(form: CreateCompanyForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let sales_owner: Option<UserId> = parse_id(&form.sales_owner, "sales_owner", &mut errors);

        match sales_owner {
            Some(sales_owner) if errors.is_empty() => Ok(CompanyData {
                name: form.name,
                address: form.address,
                sales_owner,
                email: normalize_email(&form.email),
                company_size: form.company_size,
                industry: form.industry,
                business_type: form.business_type,
                country: form.country,
                image: form.image,
                website: form.website,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /companies/{id}`. `image` and `website` accept `null` to clear.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCompanyForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub sales_owner: Option<String>,
    pub email: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub business_type: Option<String>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub website: Option<Option<String>>,
}

impl TryFrom<UpdateCompanyForm> for CompanyPatch {
    type Error = FieldErrors;

    fn try_from(form: UpdateCompanyForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let sales_owner = parse_optional_id(form.sales_owner.as_deref(), "sales_owner", &mut errors);
        errors.into_result()?;

        Ok(CompanyPatch {
            name: form.name,
            address: form.address,
            sales_owner,
            email: form.email.as_deref().map(normalize_email),
            company_size: form.company_size,
            industry: form.industry,
            business_type: form.business_type,
            country: form.country,
            image: form.image,
            website: form.website,
        })
    }
}
