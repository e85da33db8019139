//! Line item use cases outside of quote creation.

use crate::domain::product::{Product, ProductPatch};
use crate::domain::types::{ProductId, QuoteId};
use crate::repository::{ProductReader, ProductWriter, QuoteReader, ReferenceReader};
use crate::services::patch::{apply_patch, ensure_not_empty};
use crate::services::{ServiceError, ServiceResult};

/// Products of an existing quote in submission order.
pub fn list_quote_products<R>(repo: &R, quote_id: QuoteId) -> ServiceResult<Vec<Product>>
where
    R: QuoteReader + ProductReader + ?Sized,
{
    if repo.get_quote_by_id(quote_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }
    Ok(repo.list_products_by_quote(quote_id)?)
}

pub fn update_product<R>(repo: &R, id: ProductId, patch: &ProductPatch) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ReferenceReader + ?Sized,
{
    ensure_not_empty(patch)?;

    let existing = repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let merged = apply_patch(repo, &existing.data, patch)?;

    let product = repo.update_product(id, &merged)?;
    log::info!("Updated product {id} of quote {}", product.quote_id);
    Ok(product)
}

pub fn delete_product<R>(repo: &R, id: ProductId) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(id)?;
    log::info!("Deleted product {id}");
    Ok(())
}
