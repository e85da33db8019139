use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::patch::{Merged, MergePatch, Patch, overwrite};
use crate::domain::types::{ProductId, QuoteId};
use crate::domain::validation::required_text_255;

/// Priced attributes of a quote line item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ProductData {
    #[validate(custom(function = "required_text_255"))]
    pub title: String,
    #[validate(range(
        exclusive_min = 0,
        exclusive_max = 10_000_000,
        message = "must be greater than zero and less than 10,000,000"
    ))]
    pub unit_price: i32,
    #[validate(range(
        min = 0,
        exclusive_max = 1_000_000,
        message = "must be between 0 and 999,999"
    ))]
    pub quantity: i32,
    #[validate(range(min = 0, exclusive_max = 100, message = "must be between 0 and 99"))]
    pub discount: i32,
}

/// A line item. Always belongs to exactly one quote.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub quote_id: QuoteId,
    /// Zero-based index the item was submitted at.
    pub position: i32,
    #[serde(flatten)]
    pub data: ProductData,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable line item bound to its quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProduct {
    pub quote_id: QuoteId,
    pub position: i32,
    pub data: ProductData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub unit_price: Option<i32>,
    pub quantity: Option<i32>,
    pub discount: Option<i32>,
}

impl Patch for ProductPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.unit_price.is_none()
            && self.quantity.is_none()
            && self.discount.is_none()
    }
}

impl MergePatch<ProductPatch> for ProductData {
    fn merge(&self, patch: &ProductPatch) -> Merged<Self> {
        let mut value = self.clone();
        overwrite(&mut value.title, &patch.title);
        overwrite(&mut value.unit_price, &patch.unit_price);
        overwrite(&mut value.quantity, &patch.quantity);
        overwrite(&mut value.discount, &patch.discount);

        // A line item never changes quote through a patch.
        Merged {
            value,
            references: Vec::new(),
        }
    }
}
