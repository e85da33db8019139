//! Quote use cases, including the composite quote + line items workflow.
//!
//! Storage calls are independent of each other, so creating a quote with its
//! products is a short saga: the quote is written first, each product after
//! it, and any failure while writing products retracts the quote (and with it
//! the products already written) before the error is returned.

use validator::Validate;

use crate::domain::filter::{ListParams, PageDefaults};
use crate::domain::product::{NewProduct, Product, ProductData};
use crate::domain::quote::{Quote, QuoteData, QuotePatch, QuoteSort, QuoteSummary, QuoteWithProducts};
use crate::domain::types::{CompanyId, QuoteId};
use crate::domain::validation::FieldErrors;
use crate::pagination::Page;
use crate::repository::{
    ProductReader, ProductWriter, QuoteListQuery, QuoteReader, QuoteWriter, ReferenceReader,
};
use crate::services::list::list;
use crate::services::patch::{apply_patch, ensure_not_empty, ensure_references};
use crate::services::{ServiceError, ServiceResult};

/// Creates a quote and its line items as one unit.
///
/// Steps, in order: validate the quote; check company, preparer and
/// recipient exist (stopping at the first missing one); persist the quote;
/// then validate and persist each product in submission order. Nothing is
/// written before the first two steps pass. A failure after the quote is
/// persisted triggers a compensating delete so the partial quote is never
/// visible; if that delete fails too the caller gets
/// [`ServiceError::Internal`] naming the quote id.
pub fn create_quote_with_products<R>(
    repo: &R,
    quote: QuoteData,
    products: Vec<ProductData>,
) -> ServiceResult<QuoteWithProducts>
where
    R: QuoteWriter + ProductWriter + ReferenceReader + ?Sized,
{
    quote.validate()?;
    ensure_references(repo, &quote.references())?;

    let quote = repo.create_quote(&quote)?;

    let mut persisted = Vec::with_capacity(products.len());
    for (index, data) in products.into_iter().enumerate() {
        match persist_product(repo, quote.id, index, data) {
            Ok(product) => persisted.push(product),
            Err(cause) => return Err(retract_quote(repo, quote.id, cause)),
        }
    }

    log::info!(
        "Created quote {} with {} products",
        quote.id,
        persisted.len()
    );

    Ok(QuoteWithProducts {
        quote,
        products: persisted,
    })
}

fn persist_product<R>(
    repo: &R,
    quote_id: QuoteId,
    index: usize,
    data: ProductData,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    data.validate()
        .map_err(|errors| FieldErrors::from(errors).nested("products", index))?;

    let position = i32::try_from(index).map_err(|_| {
        ServiceError::Validation(FieldErrors::single("products", "too many products"))
    })?;

    let product = repo.create_product(&NewProduct {
        quote_id,
        position,
        data,
    })?;
    Ok(product)
}

/// Deletes a partially written quote and decides which error the caller sees.
fn retract_quote<R>(repo: &R, quote_id: QuoteId, cause: ServiceError) -> ServiceError
where
    R: QuoteWriter + ?Sized,
{
    match repo.delete_quote(quote_id) {
        Ok(()) => {
            log::warn!("Retracted quote {quote_id} after a line item failed: {cause}");
            cause
        }
        Err(err) => {
            log::error!(
                "Quote {quote_id} needs manual reconciliation: retract failed ({err}) after: {cause}"
            );
            ServiceError::Internal(format!(
                "quote {quote_id} was stored without all of its products and could not be retracted: {err}"
            ))
        }
    }
}

/// Loads a quote with its products in submission order.
pub fn get_quote<R>(repo: &R, id: QuoteId) -> ServiceResult<QuoteWithProducts>
where
    R: QuoteReader + ProductReader + ?Sized,
{
    let quote = repo.get_quote_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let products = repo.list_products_by_quote(id)?;
    Ok(QuoteWithProducts { quote, products })
}

pub fn list_quotes<R>(
    repo: &R,
    params: &ListParams,
    defaults: PageDefaults,
    company_id: Option<CompanyId>,
) -> ServiceResult<Page<QuoteSummary>>
where
    R: QuoteReader + ?Sized,
{
    list::<QuoteSort, _, _>(params, defaults, |filter| {
        let query = QuoteListQuery::new(filter);
        let query = match company_id {
            Some(company_id) => query.company_id(company_id),
            None => query,
        };
        repo.list_quotes(&query)
    })
}

/// Applies a sparse update; changed references are checked in the order
/// company, preparer, recipient.
pub fn update_quote<R>(repo: &R, id: QuoteId, patch: &QuotePatch) -> ServiceResult<Quote>
where
    R: QuoteReader + QuoteWriter + ReferenceReader + ?Sized,
{
    ensure_not_empty(patch)?;

    let existing = repo.get_quote_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let merged = apply_patch(repo, &existing.data, patch)?;

    let quote = repo.update_quote(id, &merged)?;
    log::info!("Updated quote {id}");
    Ok(quote)
}

/// Deletes the quote together with its products.
pub fn delete_quote<R>(repo: &R, id: QuoteId) -> ServiceResult<()>
where
    R: QuoteWriter + ?Sized,
{
    repo.delete_quote(id)?;
    log::info!("Deleted quote {id}");
    Ok(())
}
