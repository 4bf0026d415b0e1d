use mockall::mock;

use super::{DiscountReader, DiscountWriter, ProductReader, ProductWriter};
use crate::domain::{
    discount::{Discount, DiscountListQuery, NewDiscount, UpdateDiscount},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub DiscountReader {}

    impl DiscountReader for DiscountReader {
        fn get_discount_by_id(&self, id: i32) -> RepositoryResult<Option<Discount>>;
        fn list_discounts(&self, query: DiscountListQuery) -> RepositoryResult<(usize, Vec<Discount>)>;
        fn list_discount_product_ids(&self, discount_id: i32) -> RepositoryResult<Vec<i32>>;
    }
}

mock! {
    pub DiscountWriter {}

    impl DiscountWriter for DiscountWriter {
        fn create_discount(&self, new_discount: &NewDiscount) -> RepositoryResult<Discount>;
        fn update_discount(&self, discount_id: i32, updates: &UpdateDiscount) -> RepositoryResult<Discount>;
        fn delete_discount(&self, discount_id: i32) -> RepositoryResult<()>;
        fn replace_discount_products(&self, discount_id: i32, product_ids: &[i32]) -> RepositoryResult<()>;
    }
}

// For services that read the stored discount before writing it.
mock! {
    pub DiscountRepository {}

    impl DiscountReader for DiscountRepository {
        fn get_discount_by_id(&self, id: i32) -> RepositoryResult<Option<Discount>>;
        fn list_discounts(&self, query: DiscountListQuery) -> RepositoryResult<(usize, Vec<Discount>)>;
        fn list_discount_product_ids(&self, discount_id: i32) -> RepositoryResult<Vec<i32>>;
    }

    impl DiscountWriter for DiscountRepository {
        fn create_discount(&self, new_discount: &NewDiscount) -> RepositoryResult<Discount>;
        fn update_discount(&self, discount_id: i32, updates: &UpdateDiscount) -> RepositoryResult<Discount>;
        fn delete_discount(&self, discount_id: i32) -> RepositoryResult<()>;
        fn replace_discount_products(&self, discount_id: i32, product_ids: &[i32]) -> RepositoryResult<()>;
    }
}
