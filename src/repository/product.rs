//! Repository implementation for quote line items.

use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, ProductData};
use crate::domain::types::{ProductId, QuoteId};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter, now};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id.as_bytes().as_slice()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(Product::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_products_by_quote(&self, quote_id: QuoteId) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        products::table
            .filter(products::quote_id.eq(quote_id.as_bytes().as_slice()))
            .order((products::position.asc(), products::created_at.asc()))
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(|product| Product::try_from(product).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let id = ProductId::new();
        let new_product = DbNewProduct::new(&id, product, now());

        let db_product = diesel::insert_into(products::table)
            .values(&new_product)
            .get_result::<DbProduct>(&mut conn)?;

        Product::try_from(db_product).map_err(RepositoryError::from)
    }

    fn update_product(&self, id: ProductId, data: &ProductData) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updates = DbUpdateProduct::new(data, now());

        let db_product =
            diesel::update(products::table.filter(products::id.eq(id.as_bytes().as_slice())))
                .set(&updates)
                .get_result::<DbProduct>(&mut conn)?;

        Product::try_from(db_product).map_err(RepositoryError::from)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let affected = diesel::delete(products::table.filter(products::id.eq(id.as_bytes().as_slice())))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
