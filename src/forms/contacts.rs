use serde::Deserialize;

use crate::domain::contact::{ContactData, ContactPatch};
use crate::domain::types::CompanyId;
use crate::domain::validation::FieldErrors;
use crate::forms::{normalize_email, parse_id, parse_optional_id};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateContactForm {
    pub name: String,
    pub email: String,
    pub company_id: String,
    pub title: String,
    pub status: String,
}

impl TryFrom<CreateContactForm> for ContactData {
    type Error = FieldErrors;

    fn try_from(form: CreateContactForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let company_id: Option<CompanyId> = parse_id(&form.company_id, "company_id", &mut errors);

        match company_id {
            Some(company_id) => Ok(ContactData {
                name: form.name,
                email: normalize_email(&form.email),
                company_id,
                title: form.title,
                status: form.status,
            }),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_id: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<UpdateContactForm> for ContactPatch {
    type Error = FieldErrors;

    fn try_from(form: UpdateContactForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let company_id = parse_optional_id(form.company_id.as_deref(), "company_id", &mut errors);
        errors.into_result()?;

        Ok(ContactPatch {
            name: form.name,
            email: form.email.as_deref().map(normalize_email),
            company_id,
            title: form.title,
            status: form.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_company_is_required() {
        let form = CreateContactForm {
            name: "Jon".to_string(),
            ..CreateContactForm::default()
        };
        let errors = ContactData::try_from(form).unwrap_err();
        assert_eq!(errors.get("company_id"), Some("company_id is required"));
    }

    #[test]
    fn empty_body_yields_empty_patch() {
        let form: UpdateContactForm = serde_json::from_str("{}").unwrap();
        let patch = ContactPatch::try_from(form).unwrap();
        assert_eq!(patch, ContactPatch::default());
    }
}
