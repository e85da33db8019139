use serde::Deserialize;

use crate::domain::product::{ProductData, ProductPatch};
use crate::domain::validation::FieldErrors;
use crate::forms::narrow;

const UNIT_PRICE_RANGE: &str = "must be greater than zero and less than 10,000,000";
const QUANTITY_RANGE: &str = "must be between 0 and 999,999";
const DISCOUNT_RANGE: &str = "must be between 0 and 99";

/// One line item inside a quote creation body.
///
/// Amounts are read as 64-bit so an oversized value is reported against its
/// field instead of failing the whole body.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductForm {
    pub title: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub discount: i64,
}

impl TryFrom<ProductForm> for ProductData {
    type Error = FieldErrors;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let data = ProductData {
            title: form.title,
            unit_price: narrow(form.unit_price, "unit_price", UNIT_PRICE_RANGE, &mut errors),
            quantity: narrow(form.quantity, "quantity", QUANTITY_RANGE, &mut errors),
            discount: narrow(form.discount, "discount", DISCOUNT_RANGE, &mut errors),
        };
        errors.into_result()?;
        Ok(data)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductForm {
    pub title: Option<String>,
    pub unit_price: Option<i64>,
    pub quantity: Option<i64>,
    pub discount: Option<i64>,
}

impl TryFrom<UpdateProductForm> for ProductPatch {
    type Error = FieldErrors;

    fn try_from(form: UpdateProductForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let patch = ProductPatch {
            title: form.title,
            unit_price: form
                .unit_price
                .map(|value| narrow(value, "unit_price", UNIT_PRICE_RANGE, &mut errors)),
            quantity: form
                .quantity
                .map(|value| narrow(value, "quantity", QUANTITY_RANGE, &mut errors)),
            discount: form
                .discount
                .map(|value| narrow(value, "discount", DISCOUNT_RANGE, &mut errors)),
        };
        errors.into_result()?;
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_amounts_are_field_errors() {
        let form = ProductForm {
            title: "Pump".to_string(),
            unit_price: 3_000_000_000,
            quantity: 1,
            discount: -5_000_000_000,
        };
        let errors = ProductData::try_from(form).unwrap_err();
        assert_eq!(
            errors.get("unit_price"),
            Some("unit_price must be greater than zero and less than 10,000,000")
        );
        assert!(errors.contains("discount"));
        assert!(!errors.contains("quantity"));
    }

    #[test]
    fn patch_narrows_only_present_amounts() {
        let form = UpdateProductForm {
            quantity: Some(4_294_967_296),
            ..UpdateProductForm::default()
        };
        let errors = ProductPatch::try_from(form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("quantity"));

        let form = UpdateProductForm {
            discount: Some(10),
            ..UpdateProductForm::default()
        };
        let patch = ProductPatch::try_from(form).unwrap();
        assert_eq!(patch.discount, Some(10));
        assert_eq!(patch.unit_price, None);
    }
}
