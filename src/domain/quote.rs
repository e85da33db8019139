use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::filter::SortKey;
use crate::domain::patch::{Merged, MergePatch, Patch, Reference, overwrite};
use crate::domain::product::Product;
use crate::domain::types::{CompanyId, ContactId, QuoteId, UserId};
use crate::domain::validation::required_text_255;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct QuoteData {
    #[validate(custom(function = "required_text_255"))]
    pub name: String,
    pub company_id: CompanyId,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub sales_tax: i32,
    #[validate(custom(function = "required_text_255"))]
    pub stage: String,
    #[validate(length(max = 10000, message = "must not exceed 10,000 characters"))]
    pub notes: String,
    pub prepared_by: UserId,
    pub prepared_for: ContactId,
}

impl QuoteData {
    /// Every foreign key of the quote, in the order they are checked.
    pub fn references(&self) -> [Reference; 3] {
        [
            Reference::Company(self.company_id),
            Reference::PreparedBy(self.prepared_by),
            Reference::PreparedFor(self.prepared_for),
        ]
    }
}

/// Root of the quote aggregate. Line items live in [`Product`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub id: QuoteId,
    #[serde(flatten)]
    pub data: QuoteData,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// List row with display names of the referenced aggregates.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuoteSummary {
    #[serde(flatten)]
    pub quote: Quote,
    pub company_name: String,
    pub prepared_by_name: String,
    pub prepared_for_name: String,
}

/// A quote together with its line items in submission order.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuoteWithProducts {
    #[serde(flatten)]
    pub quote: Quote,
    pub products: Vec<Product>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotePatch {
    pub name: Option<String>,
    pub company_id: Option<CompanyId>,
    pub sales_tax: Option<i32>,
    pub stage: Option<String>,
    pub notes: Option<String>,
    pub prepared_by: Option<UserId>,
    pub prepared_for: Option<ContactId>,
}

impl Patch for QuotePatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company_id.is_none()
            && self.sales_tax.is_none()
            && self.stage.is_none()
            && self.notes.is_none()
            && self.prepared_by.is_none()
            && self.prepared_for.is_none()
    }
}

impl MergePatch<QuotePatch> for QuoteData {
    fn merge(&self, patch: &QuotePatch) -> Merged<Self> {
        let mut value = self.clone();
        overwrite(&mut value.name, &patch.name);
        overwrite(&mut value.company_id, &patch.company_id);
        overwrite(&mut value.sales_tax, &patch.sales_tax);
        overwrite(&mut value.stage, &patch.stage);
        overwrite(&mut value.notes, &patch.notes);
        overwrite(&mut value.prepared_by, &patch.prepared_by);
        overwrite(&mut value.prepared_for, &patch.prepared_for);

        let references = [
            patch.company_id.map(Reference::Company),
            patch.prepared_by.map(Reference::PreparedBy),
            patch.prepared_for.map(Reference::PreparedFor),
        ]
        .into_iter()
        .flatten()
        .collect();

        Merged { value, references }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSort {
    Id,
    CompanyId,
    Name,
    PreparedBy,
    PreparedFor,
    Stage,
    CreatedAt,
    UpdatedAt,
}

impl SortKey for QuoteSort {
    const SAFELIST: &'static [(&'static str, Self)] = &[
        ("id", QuoteSort::Id),
        ("company_id", QuoteSort::CompanyId),
        ("name", QuoteSort::Name),
        ("prepared_by", QuoteSort::PreparedBy),
        ("prepared_for", QuoteSort::PreparedFor),
        ("stage", QuoteSort::Stage),
        ("created_at", QuoteSort::CreatedAt),
        ("updated_at", QuoteSort::UpdatedAt),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuoteData {
        QuoteData {
            name: "Q-1001".to_string(),
            company_id: CompanyId::new(),
            sales_tax: 12,
            stage: "draft".to_string(),
            notes: String::new(),
            prepared_by: UserId::new(),
            prepared_for: ContactId::new(),
        }
    }

    #[test]
    fn references_follow_check_order() {
        let quote = sample();
        let fields: Vec<_> = quote.references().iter().map(Reference::field).collect();
        assert_eq!(
            fields,
            vec![
                crate::domain::patch::ReferenceField::Company,
                crate::domain::patch::ReferenceField::PreparedBy,
                crate::domain::patch::ReferenceField::PreparedFor,
            ]
        );
    }

    #[test]
    fn negative_sales_tax_is_rejected() {
        let mut quote = sample();
        quote.sales_tax = -1;
        let errors = quote.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sales_tax"));
    }

    #[test]
    fn notes_are_capped() {
        let mut quote = sample();
        quote.notes = "n".repeat(10_000);
        assert!(quote.validate().is_ok());
        quote.notes.push('n');
        assert!(quote.validate().is_err());
    }

    #[test]
    fn merge_lists_only_patched_references() {
        let contact = ContactId::new();
        let patch = QuotePatch {
            stage: Some("sent".to_string()),
            prepared_for: Some(contact),
            ..QuotePatch::default()
        };
        let merged = sample().merge(&patch);
        assert_eq!(merged.value.stage, "sent");
        assert_eq!(merged.references, vec![Reference::PreparedFor(contact)]);
    }
}
