use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::filter::SortKey;
use crate::domain::patch::{Merged, MergePatch, Patch, Reference, overwrite};
use crate::domain::types::{CompanyId, ContactId};
use crate::domain::validation::required_text_255;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ContactData {
    #[validate(custom(function = "required_text_255"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub company_id: CompanyId,
    #[validate(custom(function = "required_text_255"))]
    pub title: String,
    #[validate(custom(function = "required_text_255"))]
    pub status: String,
}

/// A person at a client company. Soft-deletable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    #[serde(flatten)]
    pub data: ContactData,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Contact {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// List row: the contact plus the name of its company.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ContactSummary {
    #[serde(flatten)]
    pub contact: Contact,
    pub company_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_id: Option<CompanyId>,
    pub title: Option<String>,
    pub status: Option<String>,
}

impl Patch for ContactPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company_id.is_none()
            && self.title.is_none()
            && self.status.is_none()
    }
}

impl MergePatch<ContactPatch> for ContactData {
    fn merge(&self, patch: &ContactPatch) -> Merged<Self> {
        let mut value = self.clone();
        overwrite(&mut value.name, &patch.name);
        overwrite(&mut value.email, &patch.email);
        overwrite(&mut value.company_id, &patch.company_id);
        overwrite(&mut value.title, &patch.title);
        overwrite(&mut value.status, &patch.status);

        let references = patch
            .company_id
            .map(Reference::Company)
            .into_iter()
            .collect();

        Merged { value, references }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSort {
    Id,
    Name,
    Email,
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortKey for ContactSort {
    const SAFELIST: &'static [(&'static str, Self)] = &[
        ("id", ContactSort::Id),
        ("name", ContactSort::Name),
        ("email", ContactSort::Email),
        ("title", ContactSort::Title),
        ("status", ContactSort::Status),
        ("created_at", ContactSort::CreatedAt),
        ("updated_at", ContactSort::UpdatedAt),
    ];
}
