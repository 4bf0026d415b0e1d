use crate::db::{DbConnection, DbPool};
use crate::domain::discount::{Discount, DiscountListQuery, NewDiscount, UpdateDiscount};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};

pub mod errors;

pub mod discount;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
///
/// Returned products carry their linked discounts in link order; the set may
/// include discounts outside their active window.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over discount records.
pub trait DiscountReader {
    fn get_discount_by_id(&self, id: i32) -> RepositoryResult<Option<Discount>>;
    fn list_discounts(&self, query: DiscountListQuery)
    -> RepositoryResult<(usize, Vec<Discount>)>;
    fn list_discount_product_ids(&self, discount_id: i32) -> RepositoryResult<Vec<i32>>;
}

/// Write operations over discount records and their product associations.
pub trait DiscountWriter {
    fn create_discount(&self, new_discount: &NewDiscount) -> RepositoryResult<Discount>;
    fn update_discount(
        &self,
        discount_id: i32,
        updates: &UpdateDiscount,
    ) -> RepositoryResult<Discount>;
    fn delete_discount(&self, discount_id: i32) -> RepositoryResult<()>;
    fn replace_discount_products(
        &self,
        discount_id: i32,
        product_ids: &[i32],
    ) -> RepositoryResult<()>;
}
