use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::filter::SortKey;
use crate::domain::patch::{Merged, MergePatch, Patch, Reference, overwrite};
use crate::domain::types::{CompanyId, UserId};
use crate::domain::validation::required_text_255;

/// Mutable attributes of a company, validated on create and after every patch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct CompanyData {
    #[validate(custom(function = "required_text_255"))]
    pub name: String,
    #[validate(custom(function = "required_text_255"))]
    pub address: String,
    pub sales_owner: UserId,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "required_text_255"))]
    pub company_size: String,
    #[validate(custom(function = "required_text_255"))]
    pub industry: String,
    #[validate(custom(function = "required_text_255"))]
    pub business_type: String,
    #[validate(custom(function = "required_text_255"))]
    pub country: String,
    pub image: Option<String>,
    pub website: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    #[serde(flatten)]
    pub data: CompanyData,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Soft-deletion marker; a set value means the company no longer exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Company {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// List row: the company plus its sales owner's display name.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompanySummary {
    #[serde(flatten)]
    pub company: Company,
    pub sales_owner_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub sales_owner: Option<UserId>,
    pub email: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub business_type: Option<String>,
    pub country: Option<String>,
    pub image: Option<Option<String>>,
    pub website: Option<Option<String>>,
}

impl Patch for CompanyPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.sales_owner.is_none()
            && self.email.is_none()
            && self.company_size.is_none()
            && self.industry.is_none()
            && self.business_type.is_none()
            && self.country.is_none()
            && self.image.is_none()
            && self.website.is_none()
    }
}

impl MergePatch<CompanyPatch> for CompanyData {
    fn merge(&self, patch: &CompanyPatch) -> Merged<Self> {
        let mut value = self.clone();
        overwrite(&mut value.name, &patch.name);
        overwrite(&mut value.address, &patch.address);
        overwrite(&mut value.sales_owner, &patch.sales_owner);
        overwrite(&mut value.email, &patch.email);
        overwrite(&mut value.company_size, &patch.company_size);
        overwrite(&mut value.industry, &patch.industry);
        overwrite(&mut value.business_type, &patch.business_type);
        overwrite(&mut value.country, &patch.country);
        overwrite(&mut value.image, &patch.image);
        overwrite(&mut value.website, &patch.website);

        let references = patch
            .sales_owner
            .map(Reference::SalesOwner)
            .into_iter()
            .collect();

        Merged { value, references }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySort {
    Id,
    Name,
    Address,
    Email,
    CreatedAt,
    UpdatedAt,
}

impl SortKey for CompanySort {
    const SAFELIST: &'static [(&'static str, Self)] = &[
        ("id", CompanySort::Id),
        ("name", CompanySort::Name),
        ("address", CompanySort::Address),
        ("email", CompanySort::Email),
        ("created_at", CompanySort::CreatedAt),
        ("updated_at", CompanySort::UpdatedAt),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompanyData {
        CompanyData {
            name: "Acme".to_string(),
            address: "1 Road".to_string(),
            sales_owner: UserId::new(),
            email: "sales@acme.io".to_string(),
            company_size: "50-100".to_string(),
            industry: "Manufacturing".to_string(),
            business_type: "B2B".to_string(),
            country: "PH".to_string(),
            image: None,
            website: Some("https://acme.io".to_string()),
        }
    }

    #[test]
    fn valid_company_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn merge_overwrites_present_fields_only() {
        let existing = sample();
        let patch = CompanyPatch {
            name: Some("Acme Ltd".to_string()),
            website: Some(None),
            ..CompanyPatch::default()
        };

        let merged = existing.merge(&patch);
        assert_eq!(merged.value.name, "Acme Ltd");
        assert_eq!(merged.value.website, None);
        assert_eq!(merged.value.address, existing.address);
        assert!(merged.references.is_empty());
    }

    #[test]
    fn merge_reports_changed_sales_owner() {
        let owner = UserId::new();
        let patch = CompanyPatch {
            sales_owner: Some(owner),
            ..CompanyPatch::default()
        };
        let merged = sample().merge(&patch);
        assert_eq!(merged.references, vec![Reference::SalesOwner(owner)]);
        assert_eq!(merged.value.sales_owner, owner);
    }

    #[test]
    fn empty_string_is_an_overwrite_that_fails_validation() {
        let patch = CompanyPatch {
            country: Some(String::new()),
            ..CompanyPatch::default()
        };
        assert!(!patch.is_empty());
        let merged = sample().merge(&patch);
        assert!(merged.value.validate().is_err());
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(CompanyPatch::default().is_empty());
    }
}
