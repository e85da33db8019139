//! Diesel models for quote line items.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductData,
};
use crate::domain::types::{ProductId, QuoteId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: Vec<u8>,
    pub quote_id: Vec<u8>,
    pub position: i32,
    pub title: String,
    pub unit_price: i32,
    pub quantity: i32,
    pub discount: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: &'a [u8],
    pub quote_id: &'a [u8],
    pub position: i32,
    pub title: &'a str,
    pub unit_price: i32,
    pub quantity: i32,
    pub discount: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub title: &'a str,
    pub unit_price: i32,
    pub quantity: i32,
    pub discount: i32,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewProduct<'a> {
    pub fn new(id: &'a ProductId, product: &'a DomainNewProduct, now: NaiveDateTime) -> Self {
        Self {
            id: id.as_bytes(),
            quote_id: product.quote_id.as_bytes(),
            position: product.position,
            title: &product.data.title,
            unit_price: product.data.unit_price,
            quantity: product.data.quantity,
            discount: product.data.discount,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn new(data: &'a ProductData, now: NaiveDateTime) -> Self {
        Self {
            title: &data.title,
            unit_price: data.unit_price,
            quantity: data.quantity,
            discount: data.discount,
            updated_at: now,
        }
    }
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::from_bytes(&product.id)?,
            quote_id: QuoteId::from_bytes(&product.quote_id)?,
            position: product.position,
            data: ProductData {
                title: product.title,
                unit_price: product.unit_price,
                quantity: product.quantity,
                discount: product.discount,
            },
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}
