use serde::Deserialize;

use crate::domain::product::ProductData;
use crate::domain::quote::{QuoteData, QuotePatch};
use crate::domain::validation::FieldErrors;
use crate::forms::products::ProductForm;
use crate::forms::{narrow, parse_id, parse_optional_id};

const SALES_TAX_RANGE: &str = "is out of range";

/// Body of `POST /quotes`: the quote and its line items in one document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateQuoteForm {
    pub name: String,
    pub company_id: String,
    pub sales_tax: i64,
    pub stage: String,
    pub notes: String,
    pub prepared_by: String,
    pub prepared_for: String,
    pub products: Vec<ProductForm>,
}

impl CreateQuoteForm {
    /// Splits the body into the quote and its products, keeping item order.
    ///
    /// Amounts that do not fit the stored integer width are reported here,
    /// keyed like the rule they would break (`products[i].unit_price`).
    pub fn into_parts(self) -> Result<(QuoteData, Vec<ProductData>), FieldErrors> {
        let mut errors = FieldErrors::new();
        let company_id = parse_id(&self.company_id, "company_id", &mut errors);
        let prepared_by = parse_id(&self.prepared_by, "prepared_by", &mut errors);
        let prepared_for = parse_id(&self.prepared_for, "prepared_for", &mut errors);
        let sales_tax = narrow(self.sales_tax, "sales_tax", SALES_TAX_RANGE, &mut errors);

        let mut products = Vec::with_capacity(self.products.len());
        for (index, form) in self.products.into_iter().enumerate() {
            match ProductData::try_from(form) {
                Ok(product) => products.push(product),
                Err(item_errors) => errors.merge(item_errors.nested("products", index)),
            }
        }

        let (Some(company_id), Some(prepared_by), Some(prepared_for)) =
            (company_id, prepared_by, prepared_for)
        else {
            return Err(errors);
        };
        errors.into_result()?;

        let quote = QuoteData {
            name: self.name,
            company_id,
            sales_tax,
            stage: self.stage,
            notes: self.notes,
            prepared_by,
            prepared_for,
        };
        Ok((quote, products))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateQuoteForm {
    pub name: Option<String>,
    pub company_id: Option<String>,
    pub sales_tax: Option<i64>,
    pub stage: Option<String>,
    pub notes: Option<String>,
    pub prepared_by: Option<String>,
    pub prepared_for: Option<String>,
}

impl TryFrom<UpdateQuoteForm> for QuotePatch {
    type Error = FieldErrors;

    fn try_from(form: UpdateQuoteForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let company_id = parse_optional_id(form.company_id.as_deref(), "company_id", &mut errors);
        let prepared_by =
            parse_optional_id(form.prepared_by.as_deref(), "prepared_by", &mut errors);
        let prepared_for =
            parse_optional_id(form.prepared_for.as_deref(), "prepared_for", &mut errors);
        let sales_tax = form
            .sales_tax
            .map(|value| narrow(value, "sales_tax", SALES_TAX_RANGE, &mut errors));
        errors.into_result()?;

        Ok(QuotePatch {
            name: form.name,
            company_id,
            sales_tax,
            stage: form.stage,
            notes: form.notes,
            prepared_by,
            prepared_for,
        })
    }
}
